//! End-to-end reconciler tests over temporary directories.
//!
//! These exercise the guarantees the sync engine makes as a whole: repeated
//! syncs are byte-stable, foreign config content survives, backups appear
//! exactly when content changes, and one broken instance never takes down a
//! sync-all run.

use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

use mcphub_cli::backup::BackupManager;
use mcphub_cli::client::ClientKind;
use mcphub_cli::core::HubError;
use mcphub_cli::models::{AppSettings, ClientInstance, ServerDefinition};
use mcphub_cli::store::Store;
use mcphub_cli::sync::Reconciler;

struct Harness {
    _dir: TempDir,
    root: PathBuf,
}

impl Harness {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        let root = dir.path().to_path_buf();
        Self {
            _dir: dir,
            root,
        }
    }

    fn store(&self) -> Store {
        Store::open(self.root.join("registry.json")).unwrap()
    }

    fn reconciler(&self, store: Store, settings: AppSettings) -> Reconciler {
        Reconciler::new(store, settings, BackupManager::new(self.root.join("backups")))
    }

    fn config_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

fn add_server(store: &mut Store, name: &str) -> String {
    let def = ServerDefinition::new(name, "npx", vec!["-y".to_string(), format!("@mcp/{name}")]);
    let id = def.id.clone();
    store.add_server(def).unwrap();
    id
}

fn add_instance(store: &mut Store, name: &str, kind: ClientKind, path: &Path) -> String {
    let inst = ClientInstance::new(name, kind, path.display().to_string());
    let id = inst.id.clone();
    store.add_instance(inst).unwrap();
    id
}

fn parse(path: &Path) -> Value {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}

#[tokio::test]
async fn first_sync_creates_file_without_backup() {
    let h = Harness::new();
    let mut store = h.store();
    let server = add_server(&mut store, "github");
    let config = h.config_path("mcp.json");
    let inst = add_instance(&mut store, "laptop", ClientKind::Cursor, &config);
    store.set_server_enabled(&inst, &server, true).unwrap();

    let mut reconciler = h.reconciler(store, AppSettings::default());
    let report = reconciler.sync_one(&inst).await.unwrap();

    assert!(report.changed);
    assert!(report.backup_path.is_none());
    let value = parse(&config);
    assert_eq!(value["mcpServers"]["github"]["command"], json!("npx"));

    let store = reconciler.into_store();
    assert!(store.backups().is_empty());
    assert!(store.instance(&inst).unwrap().last_synced.is_some());
}

#[tokio::test]
async fn repeated_sync_is_idempotent_and_backup_free() {
    let h = Harness::new();
    let mut store = h.store();
    let server = add_server(&mut store, "github");
    let config = h.config_path("mcp.json");
    let inst = add_instance(&mut store, "laptop", ClientKind::Cursor, &config);
    store.set_server_enabled(&inst, &server, true).unwrap();

    let mut reconciler = h.reconciler(store, AppSettings::default());
    reconciler.sync_one(&inst).await.unwrap();
    let first_bytes = fs::read(&config).unwrap();

    let report = reconciler.sync_one(&inst).await.unwrap();
    assert!(!report.changed);
    assert!(report.backup_path.is_none());
    assert_eq!(fs::read(&config).unwrap(), first_bytes);
    assert!(reconciler.store().backups().is_empty());
}

#[tokio::test]
async fn sync_preserves_foreign_keys_and_backs_up_once() {
    let h = Harness::new();
    let config = h.config_path("settings.json");
    fs::write(
        &config,
        serde_json::to_vec_pretty(&json!({
            "theme": "ayu",
            "vim_mode": true,
            "context_servers": { "stale": { "command": "old" } }
        }))
        .unwrap(),
    )
    .unwrap();

    let mut store = h.store();
    let server = add_server(&mut store, "fresh");
    let inst = add_instance(&mut store, "zed", ClientKind::Zed, &config);
    store.set_server_enabled(&inst, &server, true).unwrap();

    let mut reconciler = h.reconciler(store, AppSettings::default());
    let report = reconciler.sync_one(&inst).await.unwrap();

    assert!(report.changed);
    let backup = report.backup_path.expect("non-empty file must be backed up");
    assert!(backup.exists());

    let value = parse(&config);
    assert_eq!(value["theme"], json!("ayu"));
    assert_eq!(value["vim_mode"], json!(true));
    assert!(value["context_servers"]["stale"].is_null());
    assert_eq!(value["context_servers"]["fresh"]["command"], json!("npx"));

    // The backup holds the pre-sync bytes
    let backed_up: Value = serde_json::from_slice(&fs::read(&backup).unwrap()).unwrap();
    assert_eq!(backed_up["context_servers"]["stale"]["command"], json!("old"));
    assert_eq!(reconciler.store().backups().len(), 1);
}

#[tokio::test]
async fn enablement_change_triggers_exactly_one_new_backup() {
    let h = Harness::new();
    let mut store = h.store();
    let github = add_server(&mut store, "github");
    let fetch = add_server(&mut store, "fetch");
    let config = h.config_path("mcp.json");
    let inst = add_instance(&mut store, "laptop", ClientKind::Cursor, &config);
    store.set_server_enabled(&inst, &github, true).unwrap();

    let mut reconciler = h.reconciler(store, AppSettings::default());
    reconciler.sync_one(&inst).await.unwrap();
    assert!(reconciler.store().backups().is_empty());

    let mut store = reconciler.into_store();
    store.set_server_enabled(&inst, &fetch, true).unwrap();
    let mut reconciler = h.reconciler(store, AppSettings::default());
    let report = reconciler.sync_one(&inst).await.unwrap();

    assert!(report.changed);
    assert!(report.backup_path.is_some());
    assert_eq!(reconciler.store().backups().len(), 1);
}

#[tokio::test]
async fn backups_can_be_disabled() {
    let h = Harness::new();
    let config = h.config_path("mcp.json");
    fs::write(&config, b"{\"keep\": 1}").unwrap();

    let mut store = h.store();
    let server = add_server(&mut store, "github");
    let inst = add_instance(&mut store, "laptop", ClientKind::Cursor, &config);
    store.set_server_enabled(&inst, &server, true).unwrap();

    let settings = AppSettings {
        create_backups: false,
        ..AppSettings::default()
    };
    let mut reconciler = h.reconciler(store, settings);
    let report = reconciler.sync_one(&inst).await.unwrap();

    assert!(report.changed);
    assert!(report.backup_path.is_none());
    assert!(reconciler.store().backups().is_empty());
    assert_eq!(parse(&config)["keep"], json!(1));
}

#[tokio::test]
async fn failed_backup_blocks_the_write() {
    let h = Harness::new();
    let config = h.config_path("mcp.json");
    let original = serde_json::to_vec(&json!({ "user": "content" })).unwrap();
    fs::write(&config, &original).unwrap();

    // Occupy the backup directory path with a plain file
    fs::write(h.root.join("backups"), b"not a directory").unwrap();

    let mut store = h.store();
    let server = add_server(&mut store, "github");
    let inst = add_instance(&mut store, "laptop", ClientKind::Cursor, &config);
    store.set_server_enabled(&inst, &server, true).unwrap();

    let mut reconciler = h.reconciler(store, AppSettings::default());
    let err = reconciler.sync_one(&inst).await.unwrap_err();

    assert!(matches!(err, HubError::BackupFailed { .. }));
    // The target file is untouched and the failure left no sync stamp
    assert_eq!(fs::read(&config).unwrap(), original);
    assert!(reconciler.store().instance(&inst).unwrap().last_synced.is_none());
}

#[tokio::test]
async fn corrupt_config_is_reported_not_overwritten() {
    let h = Harness::new();
    let config = h.config_path("mcp.json");
    fs::write(&config, b"{ this is not json").unwrap();

    let mut store = h.store();
    let server = add_server(&mut store, "github");
    let inst = add_instance(&mut store, "laptop", ClientKind::Cursor, &config);
    store.set_server_enabled(&inst, &server, true).unwrap();

    let mut reconciler = h.reconciler(store, AppSettings::default());
    let err = reconciler.sync_one(&inst).await.unwrap_err();

    assert!(matches!(err, HubError::ConfigCorrupt { .. }));
    assert_eq!(fs::read(&config).unwrap(), b"{ this is not json");
}

#[tokio::test]
async fn dangling_server_ids_are_skipped() {
    let h = Harness::new();
    let mut store = h.store();
    let github = add_server(&mut store, "github");
    let doomed = add_server(&mut store, "doomed");
    let config = h.config_path("mcp.json");
    let inst = add_instance(&mut store, "laptop", ClientKind::Cursor, &config);
    store.set_server_enabled(&inst, &doomed, true).unwrap();
    store.set_server_enabled(&inst, &github, true).unwrap();
    store.remove_server(&doomed).unwrap();

    let mut reconciler = h.reconciler(store, AppSettings::default());
    reconciler.sync_one(&inst).await.unwrap();

    let managed = parse(&config)["mcpServers"].as_object().unwrap().clone();
    assert_eq!(managed.len(), 1);
    assert!(managed.contains_key("github"));
}

#[tokio::test]
async fn sync_all_isolates_failures() {
    let h = Harness::new();
    let mut store = h.store();
    let server = add_server(&mut store, "github");

    let bad_config = h.config_path("bad.json");
    fs::write(&bad_config, b"not json at all").unwrap();
    let good_config = h.config_path("good.json");

    // Names chosen so the broken instance sorts first
    let bad = add_instance(&mut store, "a-broken", ClientKind::Cursor, &bad_config);
    let good = add_instance(&mut store, "b-working", ClientKind::Cursor, &good_config);
    store.set_server_enabled(&bad, &server, true).unwrap();
    store.set_server_enabled(&good, &server, true).unwrap();

    let mut reconciler = h.reconciler(store, AppSettings::default());
    let outcomes = reconciler.sync_all().await;

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].instance_name, "a-broken");
    assert!(matches!(
        outcomes[0].result,
        Err(HubError::ConfigCorrupt { .. })
    ));
    assert!(outcomes[1].result.is_ok());
    // The working instance was fully synced despite the earlier failure
    assert_eq!(parse(&good_config)["mcpServers"]["github"]["command"], json!("npx"));
}

#[tokio::test]
async fn unknown_instance_is_reported() {
    let h = Harness::new();
    let mut reconciler = h.reconciler(h.store(), AppSettings::default());
    let err = reconciler.sync_one("no-such-id").await.unwrap_err();
    assert!(matches!(err, HubError::InstanceNotFound { .. }));
}

#[tokio::test]
async fn custom_instance_without_path_fails_to_resolve() {
    let h = Harness::new();
    let mut store = h.store();
    let inst = ClientInstance::new("mystery", ClientKind::Custom, "");
    let inst_id = inst.id.clone();
    store.add_instance(inst).unwrap();

    let mut reconciler = h.reconciler(store, AppSettings::default());
    let err = reconciler.sync_one(&inst_id).await.unwrap_err();
    assert!(matches!(err, HubError::PathUnresolved { .. }));
}

#[tokio::test]
async fn disabling_everything_leaves_explicit_empty_section() {
    let h = Harness::new();
    let mut store = h.store();
    let server = add_server(&mut store, "github");
    let config = h.config_path("mcp.json");
    let inst = add_instance(&mut store, "laptop", ClientKind::Cursor, &config);
    store.set_server_enabled(&inst, &server, true).unwrap();

    let mut reconciler = h.reconciler(store, AppSettings::default());
    reconciler.sync_one(&inst).await.unwrap();

    let mut store = reconciler.into_store();
    store.set_server_enabled(&inst, &server, false).unwrap();
    let mut reconciler = h.reconciler(store, AppSettings::default());
    reconciler.sync_one(&inst).await.unwrap();

    assert_eq!(parse(&config)["mcpServers"], json!({}));
}
