use clap::Parser;
use minivc::config::MvcConfig;
use minivc::tooling::cli::{Cli, CliContext, Commands};
use minivc::MvcError;

use crate::integration::support::{read_file, write_file, Sandbox};

fn context(sandbox: &Sandbox, workspace: &str) -> CliContext {
    let config = MvcConfig {
        base_path: sandbox.base(),
        ..MvcConfig::default()
    };
    CliContext::new(sandbox.workspace(workspace), config)
        .unwrap()
        .with_assume_yes(true)
}

fn json_format() -> String {
    "json".to_string()
}

#[test]
fn list_json_contract_has_required_fields() {
    let sandbox = Sandbox::new();
    let cli = context(&sandbox, "ws");
    assert_eq!(cli.repository().base_path(), sandbox.base());
    cli.execute(&Commands::Create {
        project: "demo".to_string(),
    })
    .unwrap();

    let output = cli.execute(&Commands::List { format: json_format() }).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed.get("total").and_then(|v| v.as_u64()), Some(1));
    let projects = parsed.get("projects").and_then(|v| v.as_array()).unwrap();
    assert_eq!(projects[0]["name"], "demo");
    assert_eq!(projects[0]["version"], "v0.0.0");
    assert!(projects[0]["id"].get("release").is_some());
}

#[test]
fn submit_review_and_status_through_cli() {
    let sandbox = Sandbox::new();
    let ws = sandbox.workspace("ws");
    let cli = context(&sandbox, "ws");
    cli.execute(&Commands::Create {
        project: "demo".to_string(),
    })
    .unwrap();
    write_file(&ws, "a.txt", "alpha");

    let output = cli
        .execute(&Commands::Submit {
            files: vec!["a.txt".to_string()],
            description: "first".to_string(),
        })
        .unwrap();
    assert!(output.contains("v0.0.1"));

    let status = cli.execute(&Commands::Status { format: json_format() }).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&status).unwrap();
    assert_eq!(parsed["items"][1], "first");

    let changes = cli.execute(&Commands::Changes { format: json_format() }).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&changes).unwrap();
    assert_eq!(parsed["total"], 0);

    write_file(&ws, "a.txt", "edited");
    let output = cli.execute(&Commands::Review).unwrap();
    assert!(output.starts_with("Reviewed 1 file(s)"));
    assert_eq!(read_file(&ws, "a.txt"), "alpha");
}

#[test]
fn save_release_load_through_cli() {
    let sandbox = Sandbox::new();
    let ws = sandbox.workspace("author");
    let author = context(&sandbox, "author");
    author
        .execute(&Commands::Create {
            project: "demo".to_string(),
        })
        .unwrap();
    write_file(&ws, "a.txt", "alpha");
    author
        .execute(&Commands::Submit {
            files: vec!["a.txt".to_string()],
            description: "d".to_string(),
        })
        .unwrap();
    assert_eq!(
        author
            .execute(&Commands::Save {
                description: "s".to_string()
            })
            .unwrap(),
        "Saved stable version v0.1.0"
    );
    assert_eq!(
        author
            .execute(&Commands::Release {
                description: "r".to_string()
            })
            .unwrap(),
        "Released version v1.0.0"
    );

    let reader = context(&sandbox, "reader");
    let output = reader
        .execute(&Commands::Load {
            project: "demo".to_string(),
            release: Some(1),
        })
        .unwrap();
    assert_eq!(output, "Loaded 1 file(s) from demo");
    assert_eq!(read_file(&sandbox.workspace("reader"), "a.txt"), "alpha");

    let contents = reader.execute(&Commands::Contents { format: "text".to_string() }).unwrap();
    assert!(contents.ends_with("a.txt"));
}

#[test]
fn errors_surface_as_typed_variants() {
    let sandbox = Sandbox::new();
    let cli = context(&sandbox, "ws");
    assert!(matches!(
        cli.execute(&Commands::Review),
        Err(MvcError::NoWorkspace(_))
    ));
    assert!(matches!(
        cli.execute(&Commands::Load {
            project: "ghost".to_string(),
            release: None
        }),
        Err(MvcError::InvalidProject(_))
    ));
}

#[test]
fn context_rejects_missing_base_path() {
    let sandbox = Sandbox::new();
    let config = MvcConfig {
        base_path: sandbox.root.path().join("missing"),
        ..MvcConfig::default()
    };
    assert!(matches!(
        CliContext::new(sandbox.workspace("ws"), config),
        Err(MvcError::InvalidBasePath(_))
    ));
}

#[test]
fn config_command_renders_effective_toml() {
    let sandbox = Sandbox::new();
    let cli = context(&sandbox, "ws");
    let output = cli.execute(&Commands::Config).unwrap();
    let parsed: MvcConfig = toml::from_str(&output).unwrap();
    assert_eq!(parsed.base_path, sandbox.base());
    assert_eq!(parsed.logging.level, "warn");
}

#[test]
fn cli_overrides_apply_over_config_file() {
    let sandbox = Sandbox::new();
    let config_path = sandbox.root.path().join("mvc.toml");
    std::fs::write(
        &config_path,
        "base_path = \"/from/file\"\n[logging]\nlevel = \"info\"\n",
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "mvc",
        "--config",
        config_path.to_str().unwrap(),
        "--base-path",
        sandbox.base().to_str().unwrap(),
        "--verbose",
        "list",
    ])
    .unwrap();
    let config = CliContext::resolve_config(&cli).unwrap();
    assert_eq!(config.base_path, sandbox.base());
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn config_resolves_before_workspace_is_opened() {
    let sandbox = Sandbox::new();
    let missing_ws = sandbox.root.path().join("not-yet-there");
    let cli = Cli::try_parse_from([
        "mvc",
        "--workspace",
        missing_ws.to_str().unwrap(),
        "--base-path",
        sandbox.base().to_str().unwrap(),
        "--log-level",
        "info",
        "list",
    ])
    .unwrap();

    let config = CliContext::resolve_config(&cli).unwrap();
    assert_eq!(config.logging.level, "info");
    assert!(matches!(
        CliContext::new(cli.workspace.clone(), config),
        Err(MvcError::Io { .. })
    ));
}
