//! End-to-end tests for `skiff deployment destroy` against a fake directory.
//!
//! Every test points `SKIFF_CONFIG` at an empty temp path and passes the
//! server address through `SKIFF_SERVER_ADDRESS`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use skiff_common::{ApplicationRef, LifecycleState, PhysicalState, WorkspaceRef};
use tempfile::TempDir;

use crate::fake_directory::{Directory, FakeDirectory, PROJECT, record, succeeded};

struct Env {
    _config: TempDir,
    config_path: String,
}

impl Env {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let config_path = dir
            .path()
            .join("config.yaml")
            .to_string_lossy()
            .into_owned();
        Self {
            _config: dir,
            config_path,
        }
    }

    fn skiff(&self, server: &FakeDirectory) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("skiff"));
        cmd.env("NO_COLOR", "1")
            .env("SKIFF_CONFIG", &self.config_path)
            .env("SKIFF_SERVER_ADDRESS", server.address())
            .env_remove("SKIFF_TOKEN")
            .env_remove("SKIFF_PROJECT")
            .env_remove("SKIFF_WORKSPACE")
            .env_remove("SKIFF_YES")
            .env_remove("CI");
        cmd
    }
}

fn two_apps(mut directory: Directory) -> Directory {
    directory.applications = vec![
        ApplicationRef::new(PROJECT, "web"),
        ApplicationRef::new(PROJECT, "api"),
    ];
    directory
}

// ---------------------------------------------------------------------------
// Explicit ids
// ---------------------------------------------------------------------------

#[test]
fn test_destroy_explicit_ids_in_given_order() {
    let server = FakeDirectory::start(Directory {
        records: vec![succeeded("d1", "web", 1), succeeded("d2", "api", 2)],
        ..Directory::default()
    });
    let env = Env::new();

    env.skiff(&server)
        .args(["deployment", "destroy", "d2", "d1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 deployments will be destroyed."))
        .stdout(predicate::str::contains("Destroying deployment: d2"))
        .stdout(predicate::str::contains("Destroying deployment: d1"));

    assert_eq!(server.state().destroyed, vec!["d2", "d1"]);
}

#[test]
fn test_destroy_without_config_file_uses_default_workspace() {
    let server = FakeDirectory::start(two_apps(Directory {
        records: vec![succeeded("w1", "web", 1)],
        ..Directory::default()
    }));
    let env = Env::new();

    env.skiff(&server)
        .args(["--project", PROJECT, "deployment", "destroy", "--force"])
        .assert()
        .success();

    assert!(!std::path::Path::new(&env.config_path).exists());
    let state = server.state();
    assert_eq!(state.destroyed, vec!["w1"]);
    assert_eq!(state.list_queries[0]["workspace"], "default");
}

#[test]
fn test_destroy_does_not_prompt_for_explicit_ids() {
    let server = FakeDirectory::start(Directory {
        records: vec![succeeded("d1", "web", 1)],
        ..Directory::default()
    });
    let env = Env::new();

    // No --force and no TTY: an explicit batch must not ask for confirmation.
    env.skiff(&server)
        .args(["deployment", "destroy", "d1"])
        .assert()
        .success();
    assert_eq!(server.state().destroyed, vec!["d1"]);
}

#[test]
fn test_destroy_unknown_id_fails_without_destroying() {
    let server = FakeDirectory::start(Directory {
        records: vec![succeeded("d1", "web", 1)],
        ..Directory::default()
    });
    let env = Env::new();

    env.skiff(&server)
        .args(["deployment", "destroy", "d1", "missing"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Deployment 'missing' not found."))
        .stdout(predicate::str::contains("will be destroyed").not());

    assert!(server.state().destroyed.is_empty());
}

#[test]
fn test_destroy_skips_deployments_that_did_not_succeed() {
    let server = FakeDirectory::start(Directory {
        records: vec![
            record("d1", "web", LifecycleState::Error, 1),
            succeeded("d2", "web", 2),
        ],
        ..Directory::default()
    });
    let env = Env::new();

    env.skiff(&server)
        .args(["deployment", "destroy", "d1", "d2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 deployments will be destroyed."))
        .stdout(predicate::str::contains("Destroying deployment: d1").not());

    assert_eq!(server.state().destroyed, vec!["d2"]);
}

#[test]
fn test_destroy_stops_at_first_server_failure() {
    let mut directory = Directory {
        records: vec![
            succeeded("d1", "web", 1),
            succeeded("d2", "web", 2),
            succeeded("d3", "web", 3),
        ],
        ..Directory::default()
    };
    directory.fail_destroy.insert("d2".to_string());
    let server = FakeDirectory::start(directory);
    let env = Env::new();

    env.skiff(&server)
        .args(["deployment", "destroy", "d1", "d2", "d3"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error destroying the deployment"))
        .stderr(predicate::str::contains("teardown failed"))
        .stdout(predicate::str::contains("Destroying deployment: d3").not());

    let state = server.state();
    assert_eq!(state.destroyed, vec!["d1"]);
    let d3 = state.records.iter().find(|r| r.id == "d3").unwrap();
    assert_eq!(d3.physical_state, PhysicalState::Created);
}

#[test]
fn test_destroy_sends_bearer_token() {
    let server = FakeDirectory::start(Directory {
        records: vec![succeeded("d1", "web", 1)],
        ..Directory::default()
    });
    let env = Env::new();

    env.skiff(&server)
        .env("SKIFF_TOKEN", "sk-test")
        .args(["deployment", "destroy", "d1"])
        .assert()
        .success();

    let state = server.state();
    assert!(!state.auth.is_empty());
    assert!(
        state
            .auth
            .iter()
            .all(|a| a.as_deref() == Some("Bearer sk-test")),
        "{:?}",
        state.auth
    );
}

// ---------------------------------------------------------------------------
// Enumeration mode
// ---------------------------------------------------------------------------

#[test]
fn test_destroy_all_declined_in_non_interactive_mode() {
    let server = FakeDirectory::start(two_apps(Directory {
        records: vec![succeeded("w1", "web", 1)],
        ..Directory::default()
    }));
    let env = Env::new();

    env.skiff(&server)
        .env("CI", "1")
        .args(["--project", PROJECT, "deployment", "destroy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled."));

    let state = server.state();
    assert!(state.destroyed.is_empty());
    assert!(state.auth.is_empty(), "no request may reach the server");
}

#[test]
fn test_destroy_all_yes_flag_answers_prompt() {
    let server = FakeDirectory::start(two_apps(Directory {
        records: vec![succeeded("w1", "web", 1), succeeded("a1", "api", 2)],
        ..Directory::default()
    }));
    let env = Env::new();

    env.skiff(&server)
        .env("CI", "1")
        .args(["-y", "--project", PROJECT, "deployment", "destroy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled.").not());

    assert_eq!(server.state().destroyed, vec!["w1", "a1"]);
}

#[test]
fn test_destroy_all_with_force_sweeps_created_latest_first() {
    let mut gone = succeeded("w0", "web", 9);
    gone.physical_state = PhysicalState::Destroyed;
    let server = FakeDirectory::start(two_apps(Directory {
        records: vec![
            succeeded("w1", "web", 1),
            succeeded("w2", "web", 5),
            gone,
            succeeded("a1", "api", 3),
        ],
        ..Directory::default()
    }));
    let env = Env::new();

    env.skiff(&server)
        .args(["--project", PROJECT, "deployment", "destroy", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 deployments will be destroyed."));

    let state = server.state();
    assert_eq!(state.destroyed, vec!["w2", "w1", "a1"]);
    for query in &state.list_queries {
        assert_eq!(query["workspace"], "default");
        assert_eq!(query["physical_state"], "CREATED");
        assert_eq!(query["order"], "COMPLETE_TIME");
        assert_eq!(query["desc"], "true");
    }
}

#[test]
fn test_destroy_all_respects_workspace_override() {
    let mut staging = succeeded("s1", "web", 1);
    staging.workspace = WorkspaceRef::new("staging");
    let server = FakeDirectory::start(two_apps(Directory {
        records: vec![staging, succeeded("p1", "web", 2)],
        ..Directory::default()
    }));
    let env = Env::new();

    env.skiff(&server)
        .args([
            "--project",
            PROJECT,
            "--workspace",
            "staging",
            "deployment",
            "destroy",
            "--force",
        ])
        .assert()
        .success();

    assert_eq!(server.state().destroyed, vec!["s1"]);
}

#[test]
fn test_destroy_all_with_app_filter_only_sweeps_that_app() {
    let server = FakeDirectory::start(two_apps(Directory {
        records: vec![succeeded("w1", "web", 1), succeeded("a1", "api", 2)],
        ..Directory::default()
    }));
    let env = Env::new();

    env.skiff(&server)
        .args([
            "--project",
            PROJECT,
            "deployment",
            "destroy",
            "--force",
            "--app",
            "api",
        ])
        .assert()
        .success();

    let state = server.state();
    assert_eq!(state.destroyed, vec!["a1"]);
    assert_eq!(state.list_queries.len(), 1);
}

#[test]
fn test_destroy_all_without_project_fails() {
    let server = FakeDirectory::start(Directory::default());
    let env = Env::new();

    env.skiff(&server)
        .args(["deployment", "destroy", "--force"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No project configured"));
}

// ---------------------------------------------------------------------------
// Configuration errors and JSON output
// ---------------------------------------------------------------------------

#[test]
fn test_destroy_without_server_address_fails() {
    let env = Env::new();
    Command::new(assert_cmd::cargo::cargo_bin!("skiff"))
        .env("NO_COLOR", "1")
        .env("SKIFF_CONFIG", &env.config_path)
        .env_remove("SKIFF_SERVER_ADDRESS")
        .args(["deployment", "destroy", "d1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No server address configured"));
}

#[test]
fn test_destroy_json_reports_outcome() {
    let server = FakeDirectory::start(Directory {
        records: vec![
            succeeded("d1", "web", 1),
            record("d2", "web", LifecycleState::Running, 2),
        ],
        ..Directory::default()
    });
    let env = Env::new();

    let output = env
        .skiff(&server)
        .args(["--json", "deployment", "destroy", "d1", "d2"])
        .output()
        .expect("run skiff");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["candidates"], 2);
    assert_eq!(value["destroyed"], serde_json::json!(["d1"]));
}

#[test]
fn test_destroy_json_reports_not_found_error() {
    let server = FakeDirectory::start(Directory::default());
    let env = Env::new();

    let output = env
        .skiff(&server)
        .args(["--json", "deployment", "destroy", "missing"])
        .output()
        .expect("run skiff");

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "not_found");
    assert_eq!(value["message"], "Deployment 'missing' not found.");
}
