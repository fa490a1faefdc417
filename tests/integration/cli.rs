//! CLI workflow tests against the `mcphub` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn mcphub(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mcphub").unwrap();
    cmd.env("MCPHUB_HOME", home).env_remove("MCPHUB_CONFIG");
    cmd
}

#[test]
fn server_add_list_show_remove() {
    let home = tempdir().unwrap();

    mcphub(home.path())
        .args([
            "server",
            "add",
            "github",
            "npx",
            "--arg",
            "-y",
            "--arg",
            "@modelcontextprotocol/server-github",
            "--env",
            "GITHUB_PERSONAL_ACCESS_TOKEN=token",
            "--tag",
            "git",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered server 'github'"));

    mcphub(home.path())
        .args(["server", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("github"));

    mcphub(home.path())
        .args(["server", "show", "github"])
        .assert()
        .success()
        .stdout(predicate::str::contains("npx"))
        .stdout(predicate::str::contains("GITHUB_PERSONAL_ACCESS_TOKEN"));

    // Duplicate names are rejected
    mcphub(home.path())
        .args(["server", "add", "github", "other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    mcphub(home.path())
        .args(["server", "remove", "github"])
        .assert()
        .success();

    mcphub(home.path())
        .args(["server", "show", "github"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no server named 'github'"));
}

#[test]
fn full_sync_workflow_preserves_user_content() {
    let home = tempdir().unwrap();
    let target = tempdir().unwrap();
    let config = target.path().join("settings.json");
    fs::write(
        &config,
        serde_json::to_vec_pretty(&json!({
            "theme": "dark",
            "context_servers": { "old": { "command": "stale" } }
        }))
        .unwrap(),
    )
    .unwrap();

    mcphub(home.path())
        .args(["server", "add", "fetch", "uvx", "--arg", "mcp-server-fetch"])
        .assert()
        .success();

    mcphub(home.path())
        .args([
            "instance",
            "add",
            "my-zed",
            "--kind",
            "zed",
            "--path",
            config.to_str().unwrap(),
        ])
        .assert()
        .success();

    mcphub(home.path())
        .args(["instance", "enable", "my-zed", "fetch"])
        .assert()
        .success();

    mcphub(home.path())
        .args(["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("needs sync"));

    mcphub(home.path())
        .args(["sync", "my-zed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("synced"));

    let value: Value = serde_json::from_slice(&fs::read(&config).unwrap()).unwrap();
    assert_eq!(value["theme"], json!("dark"));
    assert_eq!(value["context_servers"]["fetch"]["command"], json!("uvx"));
    assert!(value["context_servers"]["old"].is_null());

    // The pre-sync file was backed up into the hub home
    let backups: Vec<_> = fs::read_dir(home.path().join("backups"))
        .unwrap()
        .collect();
    assert_eq!(backups.len(), 1);

    mcphub(home.path())
        .args(["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("in sync"));

    // A second sync is a no-op
    mcphub(home.path())
        .args(["sync", "my-zed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already up to date"));
}

#[test]
fn sync_all_reports_failures_per_instance() {
    let home = tempdir().unwrap();
    let target = tempdir().unwrap();
    let bad = target.path().join("bad.json");
    fs::write(&bad, "not json").unwrap();
    let good = target.path().join("good.json");

    mcphub(home.path())
        .args(["server", "add", "memory", "npx"])
        .assert()
        .success();
    for (name, path) in [("broken", &bad), ("working", &good)] {
        mcphub(home.path())
            .args([
                "instance",
                "add",
                name,
                "--kind",
                "custom",
                "--path",
                path.to_str().unwrap(),
            ])
            .assert()
            .success();
        mcphub(home.path())
            .args(["instance", "enable", name, "memory"])
            .assert()
            .success();
    }

    mcphub(home.path())
        .args(["sync", "--all"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("working"))
        .stderr(predicate::str::contains("1 of 2 instance(s) failed"));

    // The working target was still written
    let value: Value = serde_json::from_slice(&fs::read(&good).unwrap()).unwrap();
    assert_eq!(value["mcpServers"]["memory"]["command"], json!("npx"));
    // The broken one was left alone
    assert_eq!(fs::read(&bad).unwrap(), b"not json");
}

#[test]
fn status_flags_instances_before_their_first_sync() {
    let home = tempdir().unwrap();
    let target = tempdir().unwrap();
    let config = target.path().join("mcp.json");

    mcphub(home.path())
        .args([
            "instance",
            "add",
            "fresh",
            "--kind",
            "custom",
            "--path",
            config.to_str().unwrap(),
        ])
        .assert()
        .success();

    // A never-synced instance is drifted even with nothing enabled yet
    mcphub(home.path())
        .args(["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("needs sync"));

    mcphub(home.path())
        .args(["sync", "fresh"])
        .assert()
        .success();

    // The first sync writes the explicit empty managed section
    let value: Value = serde_json::from_slice(&fs::read(&config).unwrap()).unwrap();
    assert_eq!(value["mcpServers"], json!({}));

    mcphub(home.path())
        .args(["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("in sync"));
}

#[test]
fn instance_add_custom_requires_path() {
    let home = tempdir().unwrap();
    mcphub(home.path())
        .args(["instance", "add", "mystery", "--kind", "custom"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no usable config file path"));
}

#[test]
fn unknown_client_kind_is_rejected() {
    let home = tempdir().unwrap();
    mcphub(home.path())
        .args(["instance", "add", "x", "--kind", "emacs-mcp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown client kind"));
}

#[test]
fn detect_json_output_is_parseable() {
    let home = tempdir().unwrap();
    let output = mcphub(home.path())
        .args(["detect", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let detected: Value = serde_json::from_slice(&output).unwrap();
    assert!(detected.is_array());
    for entry in detected.as_array().unwrap() {
        assert!(entry["configPath"].is_string());
        assert!(entry["hasConfig"].is_boolean());
    }
}

#[test]
fn import_lifts_servers_from_existing_config() {
    let home = tempdir().unwrap();
    let target = tempdir().unwrap();
    let config = target.path().join("mcp.json");
    fs::write(
        &config,
        serde_json::to_vec(&json!({
            "mcpServers": {
                "sqlite": { "command": "uvx", "args": ["mcp-server-sqlite"] }
            }
        }))
        .unwrap(),
    )
    .unwrap();

    mcphub(home.path())
        .args(["import", config.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("imported 'sqlite'"));

    mcphub(home.path())
        .args(["server", "show", "sqlite"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported"));
}

#[test]
fn registry_browse_and_import() {
    let home = tempdir().unwrap();

    mcphub(home.path())
        .args(["registry", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("filesystem"));

    mcphub(home.path())
        .args(["registry", "show", "github"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GITHUB_PERSONAL_ACCESS_TOKEN"));

    mcphub(home.path())
        .args(["registry", "import", "fetch"])
        .assert()
        .success();

    mcphub(home.path())
        .args(["server", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fetch"));
}

#[test]
fn config_show_and_set() {
    let home = tempdir().unwrap();

    mcphub(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("create-backups        = true"))
        .stdout(predicate::str::contains("backup-retention-days = 30"));

    mcphub(home.path())
        .args(["config", "set", "backup-retention-days", "7"])
        .assert()
        .success();

    mcphub(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("backup-retention-days = 7"));

    mcphub(home.path())
        .args(["config", "set", "nonsense", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown setting"));
}

#[test]
fn backup_prune_respects_retention() {
    let home = tempdir().unwrap();

    mcphub(home.path())
        .args(["backup", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No backups recorded"));

    mcphub(home.path())
        .args(["backup", "prune", "--days", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to prune"));
}
