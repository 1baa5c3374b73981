//! Rsync Transfer Strategy
//!
//! Preferred on systems that have it; incremental transfers make repeated
//! pushes of a rebuilt image cheap.

use std::path::Path;
use std::process::{Command, Stdio};

use super::{TransferOptions, TransferStrategy};
use crate::error::{KilnError, KilnResult};

pub struct RsyncTransfer;

impl RsyncTransfer {
    /// Check if rsync is installed and available.
    pub fn check_available() -> bool {
        Command::new("rsync")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Arguments for one push; the trailing slash copies directory contents.
    fn build_args(image_dir: &Path, remote_dest: &str, options: &TransferOptions) -> Vec<String> {
        let mut args = vec![
            "-az".to_string(),
            format!("--timeout={}", options.timeout_secs),
            "-e".to_string(),
            "ssh".to_string(),
        ];
        if !options.quiet {
            args.push("--progress".to_string());
        }
        args.push(format!("{}/", image_dir.display()));
        args.push(remote_dest.to_string());
        args
    }
}

impl TransferStrategy for RsyncTransfer {
    fn name(&self) -> &'static str {
        "rsync"
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

        let mut cmd = Command::new("rsync");
        cmd.args(Self::build_args(image_dir, &remote_dest, options))
            .stdin(Stdio::inherit()); // allow password prompts

        if options.quiet {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        } else {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }

        let status = cmd.status().map_err(|err| KilnError::TransferFailed {
            message: format!("could not run rsync: {err}"),
        })?;

        if !status.success() {
            return Err(KilnError::TransferFailed {
                message: format!("rsync exited with code {:?}", status.code()),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsync_transfer_name() {
        assert_eq!(RsyncTransfer.name(), "rsync");
    }

    #[test]
    fn check_available_does_not_panic() {
        let _ = RsyncTransfer::check_available();
    }

    #[test]
    fn build_args_copies_contents_with_timeout() {
        let options = TransferOptions {
            timeout_secs: 60,
            quiet: true,
        };
        let args = RsyncTransfer::build_args(
            Path::new("/store/images/web/latest"),
            "deploy@host:/srv/images/web",
            &options,
        );

        assert_eq!(
            args,
            vec![
                "-az",
                "--timeout=60",
                "-e",
                "ssh",
                "/store/images/web/latest/",
                "deploy@host:/srv/images/web",
            ]
        );
    }

    #[test]
    fn build_args_shows_progress_when_not_quiet() {
        let options = TransferOptions {
            timeout_secs: 30,
            quiet: false,
        };
        let args = RsyncTransfer::build_args(Path::new("/img"), "host:/dest", &options);
        assert!(args.contains(&"--progress".to_string()));
    }
}
