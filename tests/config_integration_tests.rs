//! Tests for layered settings resolution from CLI arguments and config files
use clap::Parser;
use tdls_language_server::config::{Args, Config, PROJECT_CONFIG_FILE};
use tdls_language_server::validate_document;

fn config_from(args: &[&str]) -> Config {
    let args = Args::try_parse_from(std::iter::once("tdls").chain(args.iter().copied()))
        .expect("parse args");
    let mut config = Config::from_args(args).expect("create config");
    // Keep the developer's own config out of the tests
    config.user_config_file = None;
    config
}

#[test]
fn test_defaults() {
    let config = config_from(&[]);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.cli_max_number_of_problems, None);
    assert_eq!(config.load_layers(None).resolve().max_number_of_problems, 100);
}

#[test]
fn test_workspace_config_file() {
    let workspace = tempfile::tempdir().expect("create temp dir");
    std::fs::write(
        workspace.path().join(PROJECT_CONFIG_FILE),
        "max_number_of_problems = 2\n",
    )
    .expect("write config");

    let config = config_from(&[]);
    let settings = config.load_layers(Some(workspace.path())).resolve();
    assert_eq!(settings.max_number_of_problems, 2);

    let text = "- a\n- b\n- c\n- d";
    assert_eq!(
        validate_document(text, settings.max_number_of_problems)
            .diagnostics
            .len(),
        2
    );
}

#[test]
fn test_cli_overrides_files() {
    let workspace = tempfile::tempdir().expect("create temp dir");
    std::fs::write(
        workspace.path().join(PROJECT_CONFIG_FILE),
        "max_number_of_problems = 2\n",
    )
    .expect("write config");

    let config = config_from(&["--max-number-of-problems", "9"]);
    let layers = config.load_layers(Some(workspace.path()));
    assert_eq!(layers.workspace_file, Some(2));
    assert_eq!(layers.resolve().max_number_of_problems, 9);
}

#[test]
fn test_explicit_config_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "max_number_of_problems = 4\n").expect("write config");

    let config = config_from(&["--config", path.to_str().unwrap(), "--log-level", "debug"]);
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.load_layers(None).resolve().max_number_of_problems, 4);
    let resolved = path.canonicalize().expect("canonical path");
    assert!(config.watched_files(None).contains(&resolved));
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let args = Args::try_parse_from(["tdls", "--config", "/definitely/not/here.toml"])
        .expect("parse args");
    assert!(Config::from_args(args).is_err());
}

#[test]
fn test_malformed_workspace_config_is_ignored() {
    let workspace = tempfile::tempdir().expect("create temp dir");
    std::fs::write(
        workspace.path().join(PROJECT_CONFIG_FILE),
        "max_number_of_problems = [",
    )
    .expect("write config");

    let layers = config_from(&[]).load_layers(Some(workspace.path()));
    assert_eq!(layers.workspace_file, None);
    assert_eq!(layers.resolve().max_number_of_problems, 100);
}
