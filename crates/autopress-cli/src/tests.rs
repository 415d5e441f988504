use std::path::{Path, PathBuf};

use autopress_core::AppConfig;
use clap::Parser;

use super::*;

fn test_config(max_response_bytes: usize) -> AppConfig {
    AppConfig {
        log_level: "info".to_string(),
        link_rules_path: Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("link_rules.yaml"),
        default_max_links: 1,
        max_response_bytes,
    }
}

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("autopress-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).expect("write temp file");
    path
}

#[test]
fn parses_recover_with_file() {
    let cli = Cli::try_parse_from(["autopress", "recover", "response.txt"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Recover { ref input } if input == "response.txt"
    ));
}

#[test]
fn parses_recover_from_stdin() {
    let cli = Cli::try_parse_from(["autopress", "recover", "-"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Recover { ref input } if input == "-"));
}

#[test]
fn parses_inject_without_rules_override() {
    let cli = Cli::try_parse_from(["autopress", "inject", "post.html"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Inject { rules: None, .. }
    ));
}

#[test]
fn parses_assemble_with_rules_override() {
    let cli = Cli::try_parse_from([
        "autopress",
        "assemble",
        "response.txt",
        "--rules",
        "custom.yaml",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Assemble { rules: Some(ref p), .. } if p == Path::new("custom.yaml")
    ));
}

#[test]
fn parses_rules_check() {
    let cli = Cli::try_parse_from(["autopress", "rules", "check"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Rules {
            command: RulesCommands::Check { rules: None }
        }
    ));
}

#[test]
fn missing_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["autopress"]).is_err());
}

#[test]
fn recover_requires_input() {
    assert!(Cli::try_parse_from(["autopress", "recover"]).is_err());
}

#[test]
fn resolve_rules_uses_configured_path() {
    let rules = commands::resolve_rules(&test_config(1024), None).unwrap();
    assert!(!rules.is_empty());
}

#[test]
fn resolve_rules_reports_missing_override() {
    let err = commands::resolve_rules(
        &test_config(1024),
        Some(Path::new("/nonexistent/rules.yaml")),
    )
    .unwrap_err();
    assert!(err.to_string().contains("/nonexistent/rules.yaml"));
}

#[tokio::test]
async fn read_input_reads_file() {
    let path = write_temp("read.txt", "<p>hello</p>");
    let text = commands::read_input(path.to_str().unwrap(), 1024)
        .await
        .unwrap();
    assert_eq!(text, "<p>hello</p>");
    std::fs::remove_file(path).ok();
}

#[tokio::test]
async fn read_input_rejects_oversized_file() {
    let path = write_temp("big.txt", "0123456789");
    let err = commands::read_input(path.to_str().unwrap(), 4)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("4-byte limit"));
    std::fs::remove_file(path).ok();
}
