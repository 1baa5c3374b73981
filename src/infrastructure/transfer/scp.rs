//! SCP Transfer Strategy
//!
//! Fallback when rsync is missing, common on minimal hosts with plain
//! OpenSSH. Scp neither transfers incrementally nor creates remote
//! directories, so the destination is pre-created over ssh and whole
//! files are copied every push.

use std::path::Path;
use std::process::{Command, Stdio};

use super::{TransferOptions, TransferStrategy};
use crate::error::{KilnError, KilnResult};

pub struct ScpTransfer;

impl ScpTransfer {
    /// Check if scp is installed and available.
    pub fn check_available() -> bool {
        // scp without args exits non-zero, but spawning it proves it exists.
        Command::new("scp")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }

    fn create_remote_dir(
        remote_host: &str,
        remote_path: &str,
        options: &TransferOptions,
    ) -> KilnResult<()> {
        let mkdir = format!("mkdir -p {}", shell_quote(remote_path));

        let status = Command::new("ssh")
            .arg("-o")
            .arg(format!("ConnectTimeout={}", options.timeout_secs))
            .arg(remote_host)
            .arg(&mkdir)
            .stdout(Stdio::null())
            .stderr(if options.quiet {
                Stdio::null()
            } else {
                Stdio::inherit()
            })
            .status()
            .map_err(|err| KilnError::TransferFailed {
                message: format!("could not run ssh: {err}"),
            })?;

        if !status.success() {
            return Err(KilnError::TransferFailed {
                message: format!("could not create remote directory {remote_path}"),
            });
        }
        Ok(())
    }
}

impl TransferStrategy for ScpTransfer {
    fn name(&self) -> &'static str {
        "scp"
    }

    fn is_available(&self) -> bool {
        Self::check_available()
    }

    fn transfer(
        &self,
        image_dir: &Path,
        remote_host: &str,
        remote_path: &str,
        options: &TransferOptions,
    ) -> KilnResult<()> {
        let remote_dest = format!("{}:{}", remote_host, remote_path);

        Self::create_remote_dir(remote_host, remote_path, options)?;

        // Copy the directory's top-level entries so contents land directly
        // under remote_path, matching the rsync trailing-slash behavior.
        let entries: Vec<_> = std::fs::read_dir(image_dir)
            .map_err(|err| KilnError::TransferFailed {
                message: format!("could not read {}: {err}", image_dir.display()),
            })?
            .filter_map(|e| e.ok())
            .collect();

        if entries.is_empty() {
            return Ok(());
        }

        let mut cmd = Command::new("scp");
        cmd.arg("-r")
            .arg("-p")
            .arg("-o")
            .arg(format!("ConnectTimeout={}", options.timeout_secs))
            .stdin(Stdio::inherit()); // allow password prompts

        for entry in &entries {
            cmd.arg(entry.path());
        }
        cmd.arg(&remote_dest);

        if options.quiet {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        } else {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }

        let status = cmd.status().map_err(|err| KilnError::TransferFailed {
            message: format!("could not run scp: {err}"),
        })?;

        if !status.success() {
            return Err(KilnError::TransferFailed {
                message: format!("scp exited with code {:?}", status.code()),
            });
        }
        Ok(())
    }
}

/// Quote a path for the remote shell (simple single-quote escaping).
fn shell_quote(path: &str) -> String {
    format!("'{}'", path.replace('\'', "'\\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scp_transfer_name() {
        assert_eq!(ScpTransfer.name(), "scp");
    }

    #[test]
    fn check_available_does_not_panic() {
        let _ = ScpTransfer::check_available();
    }

    #[test]
    fn shell_quote_simple() {
        assert_eq!(shell_quote("/srv/images/web"), "'/srv/images/web'");
    }

    #[test]
    fn shell_quote_embedded_quote() {
        assert_eq!(shell_quote("it's here"), "'it'\\''s here'");
    }
}
