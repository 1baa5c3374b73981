//! Integration tests for the CLI surface itself: help, version and
//! argument errors.

mod common;

use common::*;

fn bare_env() -> TestEnv {
    TestEnv::builder().build()
}

#[test]
fn help_lists_every_command() {
    let env = bare_env();
    let result = env.run(&["--help"]);

    assert!(result.success, "{}", result.combined_output());
    for command in [
        "build", "run", "smoke", "check", "images", "inspect", "diff", "clean", "push", "init",
    ] {
        assert!(
            result.stdout.contains(command),
            "help does not mention '{}':\n{}",
            command,
            result.stdout
        );
    }
    assert_output_contains!(result, "Two-stage image builder and runner");
    assert_output_contains!(result, "Run 'kiln init' to scaffold a new build definition.");
}

#[test]
fn version_prints_the_package_version() {
    let env = bare_env();
    let result = env.run(&["--version"]);

    assert!(result.success, "{}", result.combined_output());
    assert_output_contains!(result, "kiln");
    assert_output_contains!(result, env!("CARGO_PKG_VERSION"));
}

#[test]
fn no_arguments_shows_help() {
    let env = bare_env();
    let result = env.run(&[]);

    assert!(!result.success);
    assert_eq!(result.exit_code, 2, "{}", result.combined_output());
    assert_output_contains!(result, "Commands:");
    assert_output_contains!(result, "Run 'kiln init' to scaffold a new build definition.");
}

#[test]
fn unknown_subcommand_is_rejected() {
    let env = bare_env();
    let result = env.run(&["frobnicate"]);

    assert!(!result.success);
    assert_eq!(result.exit_code, 2, "{}", result.combined_output());
}

#[test]
fn build_help_documents_the_flags() {
    let env = bare_env();
    let result = env.run(&["build", "--help"]);

    assert!(result.success, "{}", result.combined_output());
    for flag in ["--file", "--tag", "--repository", "--timeout-secs", "--dry-run", "--store"] {
        assert!(
            result.stdout.contains(flag),
            "build help does not mention '{}':\n{}",
            flag,
            result.stdout
        );
    }
}

#[test]
fn run_help_documents_the_port_wait() {
    let env = bare_env();
    let result = env.run(&["run", "--help"]);

    assert!(result.success, "{}", result.combined_output());
    assert_output_contains!(result, "--wait-port");
    assert_output_contains!(result, "--wait-timeout-secs");
    assert_output_contains!(result, "--env");
}
