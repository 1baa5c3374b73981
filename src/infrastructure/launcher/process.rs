//! Child process launching
//!
//! Spawns an image's startup command inside its rootfs with the composed
//! environment. Stdio is inherited so the service's streams pass straight
//! through (images are stamped unbuffered at assembly time).

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus};

use crate::error::{KilnError, KilnResult};

/// Everything needed to spawn an image's process.
#[derive(Debug, Clone)]
pub struct LaunchSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Image rootfs; becomes the child's working directory.
    pub rootfs: PathBuf,
    /// Composed environment applied on top of the parent's.
    pub env: BTreeMap<String, String>,
}

/// A spawned image process.
#[derive(Debug)]
pub struct RunningProcess {
    child: Child,
}

impl RunningProcess {
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Non-blocking poll; `Some(status)` once the child has exited.
    pub fn try_wait(&mut self) -> KilnResult<Option<ExitStatus>> {
        Ok(self.child.try_wait()?)
    }

    /// Block until the child exits.
    pub fn wait(&mut self) -> KilnResult<ExitStatus> {
        Ok(self.child.wait()?)
    }

    /// Kill and reap the child. A child that already exited is fine.
    pub fn terminate(&mut self) -> KilnResult<()> {
        match self.child.kill() {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::InvalidInput => {}
            Err(err) => return Err(err.into()),
        }
        let _ = self.child.wait();
        Ok(())
    }
}

/// Spawn the image process described by `spec`.
///
/// The program resolves against the image's `bin/` directory first, then the
/// regular `PATH` (which itself gets `rootfs/bin` prepended).
pub fn spawn(spec: &LaunchSpec) -> KilnResult<RunningProcess> {
    let program = resolve_program(&spec.rootfs, &spec.program);

    let mut command = Command::new(&program);
    command.args(&spec.args).current_dir(&spec.rootfs);
    for (key, value) in &spec.env {
        command.env(key, value);
    }
    command.env(
        "PATH",
        prefixed_path(&spec.rootfs, spec.env.get("PATH").map(String::as_str)),
    );

    let child = command.spawn().map_err(|err| KilnError::LaunchFailed {
        program: spec.program.clone(),
        message: err.to_string(),
    })?;

    Ok(RunningProcess { child })
}

/// Map an exit status to a process exit code; signal deaths read as 1.
pub fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

fn resolve_program(rootfs: &Path, program: &str) -> PathBuf {
    let as_path = Path::new(program);
    if as_path.is_absolute() {
        return as_path.to_path_buf();
    }
    if program.contains('/') {
        return rootfs.join(as_path);
    }
    let staged = rootfs.join("bin").join(program);
    if staged.is_file() {
        return staged;
    }
    as_path.to_path_buf()
}

fn prefixed_path(rootfs: &Path, explicit: Option<&str>) -> OsString {
    let bin = rootfs.join("bin");
    let mut paths = vec![bin.clone()];

    let base = explicit
        .map(str::to_owned)
        .or_else(|| std::env::var("PATH").ok());
    if let Some(base) = base {
        paths.extend(std::env::split_paths(&base));
    }

    std::env::join_paths(paths).unwrap_or_else(|_| bin.into_os_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn absolute_program_is_used_verbatim() {
        let resolved = resolve_program(Path::new("/images/web/rootfs"), "/bin/sh");
        assert_eq!(resolved, PathBuf::from("/bin/sh"));
    }

    #[test]
    fn bare_program_prefers_staged_bin() {
        let dir = tempdir().unwrap();
        let bin = dir.path().join("bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("uvicorn"), "#!/usr/bin/env python3").unwrap();

        let resolved = resolve_program(dir.path(), "uvicorn");

        assert_eq!(resolved, bin.join("uvicorn"));
    }

    #[test]
    fn bare_program_without_staged_copy_falls_back_to_path_lookup() {
        let dir = tempdir().unwrap();
        let resolved = resolve_program(dir.path(), "uvicorn");
        assert_eq!(resolved, PathBuf::from("uvicorn"));
    }

    #[test]
    fn relative_program_resolves_inside_rootfs() {
        let resolved = resolve_program(Path::new("/rootfs"), "bin/serve");
        assert_eq!(resolved, PathBuf::from("/rootfs/bin/serve"));
    }

    #[test]
    fn prefixed_path_starts_with_image_bin() {
        let dir = tempdir().unwrap();
        let path = prefixed_path(dir.path(), Some("/usr/bin"));
        let parts: Vec<PathBuf> = std::env::split_paths(&path).collect();
        assert_eq!(parts[0], dir.path().join("bin"));
        assert!(parts.contains(&PathBuf::from("/usr/bin")));
    }

    #[cfg(unix)]
    #[test]
    fn spawn_propagates_child_exit_code() {
        let dir = tempdir().unwrap();
        let spec = LaunchSpec {
            program: "/bin/sh".to_string(),
            args: vec!["-c".to_string(), "exit 7".to_string()],
            rootfs: dir.path().to_path_buf(),
            env: BTreeMap::new(),
        };

        let status = spawn(&spec).unwrap().wait().unwrap();

        assert_eq!(exit_code(status), 7);
    }

    #[cfg(unix)]
    #[test]
    fn spawn_applies_composed_environment() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("env.txt");
        let mut env = BTreeMap::new();
        env.insert("APP_API_KEY".to_string(), "s3cret".to_string());

        let spec = LaunchSpec {
            program: "/bin/sh".to_string(),
            args: vec![
                "-c".to_string(),
                format!("printf %s \"$APP_API_KEY\" > {}", out.display()),
            ],
            rootfs: dir.path().to_path_buf(),
            env,
        };
        let status = spawn(&spec).unwrap().wait().unwrap();

        assert!(status.success());
        assert_eq!(fs::read_to_string(&out).unwrap(), "s3cret");
    }

    #[cfg(unix)]
    #[test]
    fn spawn_prepends_image_bin_to_path() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("path.txt");
        let spec = LaunchSpec {
            program: "/bin/sh".to_string(),
            args: vec![
                "-c".to_string(),
                format!("printf %s \"$PATH\" > {}", out.display()),
            ],
            rootfs: dir.path().to_path_buf(),
            env: BTreeMap::new(),
        };

        spawn(&spec).unwrap().wait().unwrap();

        let path = fs::read_to_string(&out).unwrap();
        assert!(path.starts_with(&dir.path().join("bin").display().to_string()));
    }

    #[test]
    fn spawn_missing_program_is_launch_failed() {
        let dir = tempdir().unwrap();
        let spec = LaunchSpec {
            program: "/nonexistent/program".to_string(),
            args: vec![],
            rootfs: dir.path().to_path_buf(),
            env: BTreeMap::new(),
        };

        let err = spawn(&spec).unwrap_err();

        assert!(matches!(err, KilnError::LaunchFailed { .. }));
        assert!(err.to_string().contains("/nonexistent/program"));
    }
}
