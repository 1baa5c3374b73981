//! Integration tests for the --json surface.
//!
//! Every line on stdout must be one self-describing JSON object with an
//! `event` field; CI consumers key off the event names asserted here.

mod common;

use common::*;

fn web_env() -> TestEnv {
    TestEnv::builder()
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
        .build()
}

// ============================================================================
// kiln build --json
// ============================================================================

#[test]
fn build_emits_the_full_event_sequence() {
    let env = web_env();
    let result = env.run(&["build", "--json"]);
    assert!(result.success, "{}", result.combined_output());

    let events = result.json_events();
    assert!(!events.is_empty(), "{}", result.stdout);
    for event in &events {
        assert!(
            event["event"].is_string(),
            "Every event must be tagged:\n{}",
            event
        );
    }

    assert_eq!(events[0]["event"], "build_started");
    assert_eq!(events[0]["reference"], "web:latest");
    assert_eq!(events[0]["dry_run"], false);

    let names: Vec<&str> = events
        .iter()
        .map(|e| e["event"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"package_resolved"), "{:?}", names);
    assert!(names.contains(&"package_installed"), "{:?}", names);
    assert!(names.contains(&"entry_point_copied"), "{:?}", names);

    // Builder stage first, runtime stage second.
    let stages: Vec<&str> = events
        .iter()
        .filter(|e| e["event"] == "stage_started")
        .map(|e| e["stage"].as_str().unwrap())
        .collect();
    assert_eq!(stages, vec!["builder", "runtime"]);

    let completed = events.last().unwrap();
    assert_eq!(completed["event"], "build_completed");
    assert_eq!(completed["reference"], "web:latest");
    assert_eq!(completed["files"], 5);
    assert!(completed["digest"].as_str().unwrap().starts_with("sha256:"));
    assert!(completed["duration_ms"].is_number());
    assert_eq!(completed["dry_run"], false);
}

#[test]
fn dry_run_resolves_but_never_stages() {
    let env = web_env();
    let result = env.run(&["build", "--json", "--dry-run"]);
    assert!(result.success, "{}", result.combined_output());

    let events = result.json_events();
    let names: Vec<&str> = events
        .iter()
        .map(|e| e["event"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"package_resolved"), "{:?}", names);
    assert!(!names.contains(&"stage_started"), "{:?}", names);
    assert!(!names.contains(&"package_installed"), "{:?}", names);

    let completed = events.last().unwrap();
    assert_eq!(completed["event"], "build_completed");
    assert_eq!(completed["dry_run"], true);
    assert_eq!(completed["files"], 0);
    assert_eq!(completed["digest"], "");
}

#[test]
fn config_warnings_surface_as_events() {
    let definition = format!("{}\n[output]\nverbosty = \"normal\"\n", DEFINITION_WEB);
    let env = TestEnv::builder()
        .with_definition(&definition)
        .with_project_file("requirements.txt", "")
        .with_project_file("main.py", MAIN_PY)
        .build();

    let result = env.run(&["build", "--json"]);
    assert!(result.success, "{}", result.combined_output());

    let events = result.json_events();
    let warning = events
        .iter()
        .find(|e| e["event"] == "config_warning")
        .expect("expected a config_warning event");
    assert_eq!(warning["key"], "verbosty");
    assert_eq!(warning["suggestion"], "verbosity");
    assert_eq!(warning["file"], "kiln.toml");
}

#[test]
fn overwrite_warnings_surface_as_events() {
    let env = TestEnv::builder()
        .with_definition(DEFINITION_MINIMAL)
        .with_project_file("requirements.txt", "alpha==1.0.0\nbeta==1.0.0\n")
        .with_project_file("main.py", MAIN_PY)
        .with_package("alpha", "1.0.0", &[("lib/shared/util.py", "alpha\n")])
        .with_package("beta", "1.0.0", &[("lib/shared/util.py", "beta\n")])
        .build();

    let result = env.run(&["build", "--json"]);
    assert!(result.success, "{}", result.combined_output());

    let events = result.json_events();
    let warning = events
        .iter()
        .find(|e| e["event"] == "warning")
        .expect("expected a warning event");
    assert_eq!(warning["message"], "beta replaced lib/shared/util.py");
}

// ============================================================================
// Read-only commands
// ============================================================================

#[test]
fn inspect_event_files_key_follows_the_flag() {
    let env = web_env();
    assert!(env.run(&["build"]).success);

    let bare = env.run(&["inspect", "web", "--json"]);
    assert!(bare.success, "{}", bare.combined_output());
    let event = &bare.json_events()[0];
    assert_eq!(event["event"], "manifest");
    assert_eq!(event["reference"], "web:latest");
    assert_eq!(event["port"], 8000);
    assert_eq!(event["packages"]["flask"], "3.0.0");
    assert_eq!(event["file_count"], 5);
    assert!(event.get("files").is_none());

    let with_files = env.run(&["inspect", "web", "--files", "--json"]);
    let event = &with_files.json_events()[0];
    assert!(
        event["files"]["main.py"]
            .as_str()
            .unwrap()
            .starts_with("sha256:"),
        "{}",
        event
    );
}

#[test]
fn diff_event_for_identical_images() {
    let env = web_env();
    assert!(env.run(&["build"]).success);

    let result = env.run(&["diff", "web", "web", "--json"]);
    assert!(result.success, "{}", result.combined_output());

    let event = &result.json_events()[0];
    assert_eq!(event["event"], "diff");
    assert_eq!(event["identical"], true);
    assert_eq!(event["added"].as_array().unwrap().len(), 0);
    assert_eq!(event["metadata_changed"], false);
}
