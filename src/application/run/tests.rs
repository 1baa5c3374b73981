//! Run Use Case Tests

use super::*;
use crate::domain::entities::{
    CommandSpec, ImageManifest, MANIFEST_FORMAT_VERSION, UNBUFFERED_ENV_NAME, UNBUFFERED_ENV_VALUE,
};
use crate::domain::value_objects::{Digest, ImageRef};
use crate::error::KilnError;
use crate::infrastructure::repositories::save_image_manifest;
use chrono::Utc;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tempfile::tempdir;

fn manifest_with(name: &str, command: CommandSpec, port: u16) -> ImageManifest {
    let mut env = BTreeMap::new();
    env.insert("APP_API_KEY".to_string(), String::new());
    env.insert(
        UNBUFFERED_ENV_NAME.to_string(),
        UNBUFFERED_ENV_VALUE.to_string(),
    );
    ImageManifest {
        version: MANIFEST_FORMAT_VERSION,
        name: name.to_string(),
        tag: "latest".to_string(),
        digest: Digest::from_bytes(b"fixture"),
        created_at: Utc::now(),
        exposed_port: port,
        entrypoint: "main.py".to_string(),
        env,
        command,
        packages: BTreeMap::new(),
        system_packages: BTreeMap::new(),
        files: BTreeMap::new(),
    }
}

/// Place a hand-built image into the store, rootfs included.
fn install_image(store: &Path, manifest: &ImageManifest) {
    let image_dir = store.join("images").join(&manifest.name).join(&manifest.tag);
    fs::create_dir_all(image_dir.join("rootfs")).unwrap();
    save_image_manifest(&image_dir, manifest).unwrap();
}

#[cfg(unix)]
fn sh(script: &str) -> CommandSpec {
    CommandSpec {
        program: "/bin/sh".to_string(),
        args: vec!["-c".to_string(), script.to_string()],
    }
}

fn running_flag(value: bool) -> Arc<AtomicBool> {
    Arc::new(AtomicBool::new(value))
}

#[test]
fn run_missing_image_fails() {
    let dir = tempdir().unwrap();
    let image = ImageRef::parse("ghost:latest").unwrap();
    let options = RunOptions::new(dir.path());

    let err = RunUseCase::new()
        .run(&image, &options, running_flag(true), |_, _| {})
        .unwrap_err();
    assert!(matches!(
        err,
        KilnError::ImageNotFound { ref reference } if reference == "ghost:latest"
    ));
}

#[test]
fn run_missing_rootfs_is_store_corruption() {
    let dir = tempdir().unwrap();
    let manifest = manifest_with(
        "app",
        CommandSpec {
            program: "true".to_string(),
            args: Vec::new(),
        },
        8000,
    );
    // Manifest without a rootfs next to it.
    let image_dir = dir.path().join("images/app/latest");
    fs::create_dir_all(&image_dir).unwrap();
    save_image_manifest(&image_dir, &manifest).unwrap();

    let image = ImageRef::parse("app:latest").unwrap();
    let err = RunUseCase::new()
        .run(&image, &RunOptions::new(dir.path()), running_flag(true), |_, _| {})
        .unwrap_err();
    assert!(matches!(err, KilnError::StoreCorrupted { .. }));
}

#[cfg(unix)]
#[test]
fn run_propagates_exit_code() {
    let dir = tempdir().unwrap();
    install_image(dir.path(), &manifest_with("app", sh("exit 7"), 8000));

    let image = ImageRef::parse("app:latest").unwrap();
    let outcome = RunUseCase::new()
        .run(&image, &RunOptions::new(dir.path()), running_flag(true), |_, _| {})
        .unwrap();

    assert_eq!(outcome.exit_code, 7);
    assert!(!outcome.interrupted);
}

#[cfg(unix)]
#[test]
fn run_interrupt_terminates_child() {
    let dir = tempdir().unwrap();
    install_image(dir.path(), &manifest_with("app", sh("sleep 5"), 8000));

    let image = ImageRef::parse("app:latest").unwrap();
    let outcome = RunUseCase::new()
        .run(&image, &RunOptions::new(dir.path()), running_flag(false), |_, _| {})
        .unwrap();

    assert_eq!(outcome.exit_code, 130);
    assert!(outcome.interrupted);
}

#[cfg(unix)]
#[test]
fn run_env_defaults_stay_empty_until_overridden() {
    let dir = tempdir().unwrap();
    install_image(
        dir.path(),
        &manifest_with("app", sh(r#"printf %s "$APP_API_KEY" > out.txt"#), 8000),
    );
    let rootfs = dir.path().join("images/app/latest/rootfs");
    let image = ImageRef::parse("app:latest").unwrap();
    let use_case = RunUseCase::new();

    // First launch: the placeholder default is the empty string.
    let outcome = use_case
        .run(&image, &RunOptions::new(dir.path()), running_flag(true), |_, _| {})
        .unwrap();
    assert_eq!(outcome.exit_code, 0);
    assert_eq!(fs::read_to_string(rootfs.join("out.txt")).unwrap(), "");

    // Second launch of the same image: the override applies without a rebuild.
    let options = RunOptions::new(dir.path())
        .with_env(vec![("APP_API_KEY".to_string(), "s3cret".to_string())]);
    use_case.run(&image, &options, running_flag(true), |_, _| {}).unwrap();
    assert_eq!(fs::read_to_string(rootfs.join("out.txt")).unwrap(), "s3cret");
}

#[cfg(unix)]
#[test]
fn smoke_reports_ready_when_port_accepts() {
    let dir = tempdir().unwrap();
    // The test owns the listener; the child just has to stay alive while the
    // probe finds the open port.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    install_image(dir.path(), &manifest_with("app", sh("sleep 5"), port));

    let image = ImageRef::parse("app:latest").unwrap();
    let options = SmokeOptions::new(dir.path()).with_timeout_secs(5);
    let report = RunUseCase::new().smoke(&image, &options).unwrap();

    assert!(report.is_ready());
    assert_eq!(report.port, port);
    assert_eq!(report.reference, "app:latest");
}

#[cfg(unix)]
#[test]
fn smoke_times_out_when_nothing_listens() {
    let dir = tempdir().unwrap();
    // Bind then drop to get a port that was free a moment ago.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    install_image(dir.path(), &manifest_with("app", sh("sleep 5"), port));

    let image = ImageRef::parse("app:latest").unwrap();
    let options = SmokeOptions::new(dir.path()).with_timeout_secs(0);
    let report = RunUseCase::new().smoke(&image, &options).unwrap();

    assert_eq!(report.outcome, SmokeOutcome::TimedOut { secs: 0 });
}

#[cfg(unix)]
#[test]
fn smoke_reports_early_process_exit() {
    let dir = tempdir().unwrap();
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    install_image(dir.path(), &manifest_with("app", sh("exit 3"), port));

    let image = ImageRef::parse("app:latest").unwrap();
    let options = SmokeOptions::new(dir.path()).with_timeout_secs(5);
    let report = RunUseCase::new().smoke(&image, &options).unwrap();

    assert_eq!(report.outcome, SmokeOutcome::ProcessExited { exit_code: 3 });
    assert!(!report.is_ready());
}

#[cfg(unix)]
#[test]
fn run_wait_port_reports_readiness() {
    let dir = tempdir().unwrap();
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    install_image(dir.path(), &manifest_with("app", sh("sleep 5"), port));

    let image = ImageRef::parse("app:latest").unwrap();
    let options = RunOptions::new(dir.path())
        .with_wait_port()
        .with_wait_timeout_secs(5);
    let running = running_flag(true);

    // Interrupt as soon as readiness is reported, so the run returns without
    // waiting out the child.
    let flag = running.clone();
    let seen = std::cell::Cell::new(None);
    let outcome = RunUseCase::new()
        .run(&image, &options, running, |port, elapsed| {
            seen.set(Some((port, elapsed)));
            flag.store(false, std::sync::atomic::Ordering::SeqCst);
        })
        .unwrap();

    assert!(outcome.interrupted);
    assert!(outcome.port_ready_ms.is_some());
    assert_eq!(seen.get().map(|(p, _)| p), Some(port));
}

#[cfg(unix)]
#[test]
fn run_wait_port_timeout_terminates_child() {
    let dir = tempdir().unwrap();
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    install_image(dir.path(), &manifest_with("app", sh("sleep 5"), port));

    let image = ImageRef::parse("app:latest").unwrap();
    let options = RunOptions::new(dir.path())
        .with_wait_port()
        .with_wait_timeout_secs(0);

    let err = RunUseCase::new()
        .run(&image, &options, running_flag(true), |_, _| {})
        .unwrap_err();

    assert!(matches!(
        err,
        KilnError::PortWaitTimeout { port: p, secs: 0 } if p == port
    ));
}

#[test]
fn smoke_missing_image_fails() {
    let dir = tempdir().unwrap();
    let image = ImageRef::parse("ghost:latest").unwrap();
    let err = RunUseCase::new()
        .smoke(&image, &SmokeOptions::new(dir.path()))
        .unwrap_err();
    assert!(matches!(err, KilnError::ImageNotFound { .. }));
}

#[test]
fn parse_env_assignments_accepts_key_value() {
    let env = parse_env_assignments(&[
        "APP_API_KEY=s3cret".to_string(),
        "EMPTY=".to_string(),
        "WITH=equals=inside".to_string(),
    ])
    .unwrap();

    assert_eq!(
        env,
        vec![
            ("APP_API_KEY".to_string(), "s3cret".to_string()),
            ("EMPTY".to_string(), String::new()),
            ("WITH".to_string(), "equals=inside".to_string()),
        ]
    );
}

#[test]
fn parse_env_assignments_rejects_missing_key() {
    let err = parse_env_assignments(&["=value".to_string()]).unwrap_err();
    assert!(matches!(err, KilnError::InvalidEnvAssignment { .. }));

    let err = parse_env_assignments(&["no-equals".to_string()]).unwrap_err();
    assert!(matches!(err, KilnError::InvalidEnvAssignment { .. }));
}
