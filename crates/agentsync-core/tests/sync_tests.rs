//! Tests for the SyncEngine and Validator against a temporary project

use agentsync_core::{
    ClaudeSource, Error, LogLevel, SyncEngine, SyncLog, SyncOptions, Validator,
};
use agentsync_fs::{NormalizedPath, WriteAction};
use agentsync_meta::{AgentSyncConfig, Protocol, RulesFormat, TargetConfig, TargetKind};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CLAUDE_MD: &str = "# Project\n\nintro\n\n## Usage\nRun it.\n\n## Secrets\nnever share\n### Keys\nrotate\n\n## Style\nBe terse.\n";

fn project() -> (TempDir, AgentSyncConfig) {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    let mut config = AgentSyncConfig::new(NormalizedPath::new(root));
    config.source.global_config = "home/.claude.json".to_string();
    config.rules.exclude_sections = vec!["Secrets".to_string()];

    let mut cursor = TargetConfig::new(TargetKind::Cursor);
    cursor.mcp_path = Some(".cursor/mcp.json".to_string());
    cursor.rules_path = Some(".cursor/rules/project.mdc".to_string());
    cursor.rules_format = RulesFormat::Mdc;

    let mut codex = TargetConfig::new(TargetKind::Codex);
    codex.config_path = Some(".codex/config.toml".to_string());
    codex.rules_path = Some("AGENTS.md".to_string());
    codex.exclude_servers = vec!["Codex".to_string()];

    let mut antigravity = TargetConfig::new(TargetKind::Antigravity);
    antigravity.mcp_path = Some(".gemini/mcp_config.json".to_string());

    config.targets.insert("cursor".to_string(), cursor);
    config.targets.insert("codex".to_string(), codex);
    config.targets.insert("antigravity".to_string(), antigravity);

    let project_key = config.config_dir.as_str().to_string();
    write_json(
        &root.join("home/.claude.json"),
        json!({
            "mcpServers": {
                "a": {"command": "global"},
                "codex": {"command": "codex", "args": ["mcp"]},
            },
            "projects": {
                project_key: {"mcpServers": {"a": {"command": "project-block"}}},
            },
        }),
    );
    write_json(
        &root.join(".mcp.json"),
        json!({"mcpServers": {"notion": {"url": "https://mcp.notion.com/mcp"}}}),
    );
    fs::write(root.join("CLAUDE.md"), CLAUDE_MD).unwrap();

    (temp, config)
}

fn write_json(path: &Path, value: Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn sync(config: &AgentSyncConfig, options: &SyncOptions) -> agentsync_core::SyncReport {
    SyncEngine::new(config)
        .run(options, &mut SyncLog::new(options.dry_run))
        .unwrap()
}

#[test]
fn test_project_block_wins_over_global() {
    let (_temp, config) = project();
    let registry = ClaudeSource::from_config(&config).load_servers(&mut SyncLog::new(false));

    assert_eq!(
        registry.identities().collect::<Vec<_>>(),
        vec!["a", "codex", "notion"]
    );
    assert_eq!(registry.get("a").unwrap().config["command"], "project-block");
}

#[test]
fn test_local_file_wins_and_collapses_case() {
    let (temp, config) = project();
    write_json(
        &temp.path().join(".mcp.json"),
        json!({"mcpServers": {"A": {"command": "local"}}}),
    );

    let mut log = SyncLog::new(false);
    let registry = ClaudeSource::from_config(&config).load_servers(&mut log);

    let a = registry.get("a").unwrap();
    assert_eq!(a.name, "A");
    assert_eq!(a.config["command"], "local");
    assert!(log.lines().iter().any(|l| l.contains("Dedup: 'a' replaced by 'A'")));
}

#[test]
fn test_missing_sources_contribute_nothing() {
    let temp = TempDir::new().unwrap();
    let mut config = AgentSyncConfig::new(NormalizedPath::new(temp.path()));
    config.source.global_config = "nope.json".to_string();
    fs::write(temp.path().join(".mcp.json"), "{ broken").unwrap();

    let mut log = SyncLog::new(false);
    let source = ClaudeSource::from_config(&config);
    assert!(source.load_servers(&mut log).is_empty());
    assert!(source.load_rules(&mut log).is_empty());
    assert_eq!(log.count(LogLevel::Warn), 3);
    assert_eq!(log.count(LogLevel::Error), 0);
}

#[test]
fn test_dry_run_touches_nothing() {
    let (temp, config) = project();
    let options = SyncOptions {
        dry_run: true,
        ..SyncOptions::default()
    };

    let report = sync(&config, &options);

    assert!(report.success);
    assert!(report.dry_run);
    assert!(!temp.path().join(".cursor").exists());
    assert!(!temp.path().join("AGENTS.md").exists());
    let actions: Vec<WriteAction> = report.changes().map(|w| w.action).collect();
    assert_eq!(actions, vec![WriteAction::Create; 5]);
    assert!(report.changes().all(|w| !w.written));
}

#[test]
fn test_sync_writes_every_target() {
    let (temp, config) = project();
    let root = temp.path();

    let report = sync(&config, &SyncOptions::default());
    assert!(report.success, "{report:?}");

    let cursor = read_json(&root.join(".cursor/mcp.json"));
    let names: Vec<&String> = cursor["mcpServers"].as_object().unwrap().keys().collect();
    assert_eq!(names, vec!["a", "codex", "notion"]);
    assert_eq!(cursor["mcpServers"]["a"]["command"], "project-block");

    let antigravity = read_json(&root.join(".gemini/mcp_config.json"));
    let names: Vec<&String> = antigravity["mcpServers"].as_object().unwrap().keys().collect();
    assert_eq!(names, vec!["a", "codex"]);

    let codex = fs::read_to_string(root.join(".codex/config.toml")).unwrap();
    assert!(codex.contains("[mcp_servers.a]"));
    assert!(codex.contains("[mcp_servers.notion]"));
    assert!(!codex.contains("[mcp_servers.codex]"));

    let mdc = fs::read_to_string(root.join(".cursor/rules/project.mdc")).unwrap();
    assert!(mdc.starts_with("---\n"));
    let agents = fs::read_to_string(root.join("AGENTS.md")).unwrap();
    assert_eq!(agents, "## Usage\nRun it.\n\n## Style\nBe terse.\n");
}

#[test]
fn test_second_run_is_unchanged() {
    let (temp, config) = project();
    sync(&config, &SyncOptions::default());

    let report = sync(&config, &SyncOptions::default());

    assert!(report.success);
    assert_eq!(report.changes().count(), 0);
    assert!(
        report
            .targets
            .iter()
            .flat_map(|t| &t.writes)
            .all(|w| w.action == WriteAction::Unchanged)
    );
    assert!(!temp.path().join(".agentsync/backups").exists());
}

#[test]
fn test_codex_keeps_user_settings() {
    let (temp, config) = project();
    let toml_path = temp.path().join(".codex/config.toml");
    fs::create_dir_all(toml_path.parent().unwrap()).unwrap();
    fs::write(&toml_path, "model = \"o3\"\n").unwrap();

    sync(&config, &SyncOptions::default());
    let first = fs::read_to_string(&toml_path).unwrap();
    assert!(first.starts_with("model = \"o3\"\n\n# === AGENTSYNC START ===\n"));

    sync(&config, &SyncOptions::default());
    assert_eq!(fs::read_to_string(&toml_path).unwrap(), first);
}

#[test]
fn test_changed_file_is_backed_up() {
    let (temp, config) = project();
    sync(&config, &SyncOptions::default());
    fs::write(temp.path().join("AGENTS.md"), "hand edited\n").unwrap();

    let report = sync(&config, &SyncOptions::default());
    let rewrite = report.changes().next().unwrap();
    let backup = rewrite.backup.as_ref().unwrap();

    assert!(backup.as_str().contains(".agentsync/backups/AGENTS.md."));
    assert_eq!(fs::read_to_string(backup.to_native()).unwrap(), "hand edited\n");
}

#[test]
fn test_no_backup_option() {
    let (temp, config) = project();
    sync(&config, &SyncOptions::default());
    fs::write(temp.path().join("AGENTS.md"), "hand edited\n").unwrap();

    let options = SyncOptions {
        backup: false,
        ..SyncOptions::default()
    };
    let report = sync(&config, &options);
    assert!(report.changes().all(|w| w.backup.is_none()));
    assert!(!temp.path().join(".agentsync/backups").exists());
}

#[rstest]
#[case::mcp_only(true, false, 3)]
#[case::rules_only(false, true, 2)]
fn test_phase_selection(#[case] mcp_only: bool, #[case] rules_only: bool, #[case] writes: usize) {
    let (_temp, config) = project();
    let options = SyncOptions {
        dry_run: true,
        mcp_only,
        rules_only,
        ..SyncOptions::default()
    };
    assert_eq!(sync(&config, &options).changes().count(), writes);
}

#[test]
fn test_both_phases_skipped_is_error() {
    let (_temp, config) = project();
    let options = SyncOptions {
        mcp_only: true,
        rules_only: true,
        ..SyncOptions::default()
    };
    let err = SyncEngine::new(&config)
        .run(&options, &mut SyncLog::new(false))
        .unwrap_err();
    assert!(matches!(err, Error::NothingToSync));
}

#[test]
fn test_unknown_target_aborts_before_writing() {
    let (temp, config) = project();
    let options = SyncOptions {
        target: Some("vscode".to_string()),
        ..SyncOptions::default()
    };
    let err = SyncEngine::new(&config)
        .run(&options, &mut SyncLog::new(false))
        .unwrap_err();

    assert!(matches!(err, Error::UnknownTarget { ref name, .. } if name == "vscode"));
    assert!(!temp.path().join(".cursor").exists());
}

#[test]
fn test_single_target() {
    let (temp, config) = project();
    let options = SyncOptions {
        target: Some("codex".to_string()),
        ..SyncOptions::default()
    };
    let report = sync(&config, &options);

    assert_eq!(report.targets.len(), 1);
    assert!(temp.path().join("AGENTS.md").exists());
    assert!(!temp.path().join(".cursor").exists());
}

#[test]
fn test_failing_target_does_not_stop_others() {
    let (temp, config) = project();
    write_json(
        &temp.path().join(".mcp.json"),
        json!({"mcpServers": {"my-server": {"command": "a"}, "my_server": {"command": "b"}}}),
    );

    let report = sync(&config, &SyncOptions::default());

    assert!(!report.success);
    let failed: Vec<&str> = report.failed_targets().map(|t| t.name.as_str()).collect();
    assert_eq!(failed, vec!["codex"]);
    assert!(report.targets[1].errors[0].contains("my_server"));
    assert!(temp.path().join(".cursor/mcp.json").exists());
    assert!(temp.path().join(".gemini/mcp_config.json").exists());
    // Codex rules still go out.
    assert!(temp.path().join("AGENTS.md").exists());
}

#[test]
fn test_validate_after_sync_passes() {
    let (_temp, config) = project();
    sync(&config, &SyncOptions::default());

    let report = Validator::new(&config)
        .run(None, &mut SyncLog::new(false))
        .unwrap();
    assert!(report.passed, "{:#?}", report.findings);
}

#[test]
fn test_validate_before_sync_reports_missing_files() {
    let (_temp, config) = project();
    let report = Validator::new(&config)
        .run(None, &mut SyncLog::new(false))
        .unwrap();

    assert!(report.passed);
    assert!(
        report
            .findings
            .iter()
            .any(|f| f.name == "cursor: MCP servers" && f.message.ends_with("does not exist yet"))
    );
}

#[test]
fn test_validate_names_missing_server() {
    let (temp, config) = project();
    sync(&config, &SyncOptions::default());
    write_json(
        &temp.path().join(".cursor/mcp.json"),
        json!({"mcpServers": {"a": {"command": "x"}, "extra": {"command": "y"}}}),
    );

    let report = Validator::new(&config)
        .run(Some("cursor"), &mut SyncLog::new(false))
        .unwrap();

    assert!(!report.passed);
    let failure = report.failures().next().unwrap();
    assert_eq!(failure.name, "cursor: MCP servers");
    assert_eq!(failure.message, "missing 2: codex, notion; extra 1: extra");
}

#[test]
fn test_validate_detects_leaked_section() {
    let (temp, config) = project();
    sync(&config, &SyncOptions::default());
    fs::write(temp.path().join("AGENTS.md"), "## Usage\n### Secrets\n").unwrap();

    let report = Validator::new(&config)
        .run(Some("codex"), &mut SyncLog::new(false))
        .unwrap();
    let failure = report.failures().next().unwrap();
    assert_eq!(failure.name, "codex: rules");
    assert_eq!(failure.message, "contains 1 excluded sections: Secrets");
}

#[test]
fn test_validate_codex_without_markers_warns() {
    let (temp, config) = project();
    let toml_path = temp.path().join(".codex/config.toml");
    fs::create_dir_all(toml_path.parent().unwrap()).unwrap();
    fs::write(&toml_path, "[mcp_servers.mine]\ncommand = \"x\"\n").unwrap();

    let report = Validator::new(&config)
        .run(Some("codex"), &mut SyncLog::new(false))
        .unwrap();
    assert!(report.passed);
    assert_eq!(report.warnings().count(), 1);
}

#[test]
fn test_validate_invalid_target_json_fails() {
    let (temp, config) = project();
    let path = temp.path().join(".cursor/mcp.json");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{ nope").unwrap();

    let report = Validator::new(&config)
        .run(Some("cursor"), &mut SyncLog::new(false))
        .unwrap();
    assert!(!report.passed);
}

#[test]
fn test_protocol_allow_list_applies_to_validation() {
    let (_temp, mut config) = project();
    config.targets.get_mut("cursor").unwrap().protocols = vec![Protocol::Http];
    sync(&config, &SyncOptions::default());

    let written = read_json(&config.resolve(".cursor/mcp.json").to_native());
    let names: Vec<&String> = written["mcpServers"].as_object().unwrap().keys().collect();
    assert_eq!(names, vec!["notion"]);

    let report = Validator::new(&config)
        .run(Some("cursor"), &mut SyncLog::new(false))
        .unwrap();
    assert!(report.passed);
}
