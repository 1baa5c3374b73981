//! Integration tests for `kiln clean`.
//!
//! The interactive confirmation needs a terminal, so these tests drive the
//! non-prompting paths: --yes, --dry-run and --json.

mod common;

use common::*;

fn env_with_two_images() -> TestEnv {
    let env = TestEnv::builder()
        .with_definition(DEFINITION_WEB)
        .with_project_file("requirements.txt", REQUIREMENTS_WEB)
        .with_project_file("main.py", MAIN_PY)
        .with_package(
            "flask",
            "3.0.0",
            &[
                ("lib/flask/__init__.py", PY_MODULE),
                ("lib/flask/app.py", PY_MODULE),
            ],
        )
        .with_package(
            "click",
            "8.1.7",
            &[("lib/click/__init__.py", PY_MODULE), ("bin/click", "#!/bin/sh\n")],
        )
        .build();
    assert!(env.run(&["build"]).success);
    assert!(env.run(&["build", "--tag", "v2"]).success);
    env
}

#[test]
fn clean_all_yes_empties_the_store() {
    let env = env_with_two_images();
    let result = env.run(&["clean", "--all", "--yes"]);

    assert!(result.success, "{}", result.combined_output());
    assert_output_contains!(result, "removed web:latest");
    assert_output_contains!(result, "removed web:v2");
    assert_output_contains!(result, "Removed 2 image(s) (10 files)");
    assert_not_stored!(env, "web", "latest");
    assert_not_stored!(env, "web", "v2");

    let listed = env.run(&["images", "--json"]);
    assert!(listed.json_events().is_empty(), "{}", listed.stdout);
}

#[test]
fn clean_one_reference_keeps_the_rest() {
    let env = env_with_two_images();
    let result = env.run(&["clean", "web:latest", "--yes"]);

    assert!(result.success, "{}", result.combined_output());
    assert_output_contains!(result, "removed web:latest");
    assert_not_stored!(env, "web", "latest");
    assert_stored!(env, "web", "v2");
}

#[test]
fn clean_dry_run_removes_nothing() {
    let env = env_with_two_images();
    let result = env.run(&["clean", "--all", "--dry-run"]);

    assert!(result.success, "{}", result.combined_output());
    assert_output_contains!(result, "Would remove 2 image(s):");
    assert_output_contains!(result, "Dry run:");
    assert_stored!(env, "web", "latest");
    assert_stored!(env, "web", "v2");
}

#[test]
fn clean_without_selection_fails() {
    let env = TestEnv::builder().build();
    let result = env.run(&["clean"]);

    assert_eq!(result.exit_code, 1);
    assert_output_contains!(result, "nothing selected - pass an image reference or --all");
}

#[test]
fn clean_missing_reference_fails() {
    let env = env_with_two_images();
    let result = env.run(&["clean", "ghost", "--yes"]);

    assert_eq!(result.exit_code, 1);
    assert_output_contains!(result, "'ghost:latest' not found in the store");
    // Nothing half-removed.
    assert_stored!(env, "web", "latest");
    assert_stored!(env, "web", "v2");
}

#[test]
fn clean_all_on_empty_store_is_a_no_op() {
    let env = TestEnv::builder().build();
    let result = env.run(&["clean", "--all", "--yes"]);

    assert!(result.success, "{}", result.combined_output());
    assert_output_contains!(result, "Nothing to remove.");
}

#[test]
fn clean_json_removes_without_prompting() {
    let env = env_with_two_images();
    let result = env.run(&["clean", "web:v2", "--json"]);

    assert!(result.success, "{}", result.combined_output());
    let events = result.json_events();
    assert_eq!(events.len(), 1, "{}", result.stdout);
    assert_eq!(events[0]["event"], "clean_completed");
    assert_eq!(events[0]["removed"][0], "web:v2");
    assert_eq!(events[0]["removed_count"], 1);
    assert_eq!(events[0]["dry_run"], false);
    assert_not_stored!(env, "web", "v2");
    assert_stored!(env, "web", "latest");
}
