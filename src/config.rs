//! Configuration management for the dialogue script language server.
//!
//! Handles:
//! - Command-line argument parsing
//! - `.tdls.toml` config files (user-global, workspace, explicit `--config`)
//! - Client settings pushed over `workspace/didChangeConfiguration`
//!
//! The only setting is the problem cap. Layers are resolved from highest to
//! lowest priority: client settings, CLI, `--config` file, workspace file,
//! user-global file, built-in default. A missing or zero value falls through.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

/// Problem cap used when no layer sets one
pub const DEFAULT_MAX_NUMBER_OF_PROBLEMS: usize = 100;

/// Workspace config file name
pub const PROJECT_CONFIG_FILE: &str = ".tdls.toml";

/// Command-line arguments for the language server
#[derive(Debug, Parser)]
#[command(name = "tdls")]
#[command(about = "Language server for dialogue script files")]
#[command(version)]
pub struct Args {
    /// Maximum number of diagnostics reported per document
    #[arg(long, help = "Maximum number of problems reported per document")]
    pub max_number_of_problems: Option<usize>,

    /// Explicit config file
    #[arg(long, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    /// Log level for the language server
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from command line and environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Problem cap set on the command line
    pub cli_max_number_of_problems: Option<usize>,
    /// Config file given with `--config`
    pub config_file: Option<PathBuf>,
    /// `<config_dir>/tdls/config.toml`
    pub user_config_file: Option<PathBuf>,
    /// Log level
    pub log_level: String,
}

/// Contents of a TOML config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileSettings {
    pub max_number_of_problems: Option<usize>,
}

/// Settings object sent by the client
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClientSettings {
    #[serde(default, alias = "languageServerExample")]
    pub tdls: Option<ClientSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSection {
    pub max_number_of_problems: Option<i64>,
}

/// Effective settings threaded into every validation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub max_number_of_problems: usize,
}

/// Problem cap as set by each configuration source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsLayers {
    pub user_file: Option<usize>,
    pub workspace_file: Option<usize>,
    pub config_file: Option<usize>,
    pub cli: Option<usize>,
    pub client: Option<usize>,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let config_file = match args.config {
            Some(path) if !path.is_file() => {
                anyhow::bail!("Config file not found: {}", path.display())
            }
            Some(path) => Some(
                path.canonicalize()
                    .with_context(|| format!("Failed to resolve {}", path.display()))?,
            ),
            None => None,
        };

        let user_config_file = dirs::config_dir().map(|dir| dir.join("tdls").join("config.toml"));

        Ok(Config {
            cli_max_number_of_problems: args.max_number_of_problems,
            config_file,
            user_config_file,
            log_level: args.log_level,
        })
    }

    /// Workspace config file for a workspace root
    pub fn workspace_config_file(workspace_root: &Path) -> PathBuf {
        workspace_root.join(PROJECT_CONFIG_FILE)
    }

    /// Config files whose changes should trigger a settings reload
    pub fn watched_files(&self, workspace_root: Option<&Path>) -> Vec<PathBuf> {
        let mut files = Vec::new();
        files.extend(self.user_config_file.clone());
        files.extend(workspace_root.map(Self::workspace_config_file));
        files.extend(self.config_file.clone());
        files
    }

    /// Read every file layer. Unreadable or malformed files are logged and skipped.
    pub fn load_layers(&self, workspace_root: Option<&Path>) -> SettingsLayers {
        let read = |path: Option<PathBuf>| -> Option<usize> {
            let path = path?;
            match FileSettings::load(&path) {
                Ok(settings) => settings?.max_number_of_problems,
                Err(e) => {
                    log::warn!("Ignoring config file: {:#}", e);
                    None
                }
            }
        };

        SettingsLayers {
            user_file: read(self.user_config_file.clone()),
            workspace_file: read(workspace_root.map(Self::workspace_config_file)),
            config_file: read(self.config_file.clone()),
            cli: self.cli_max_number_of_problems,
            client: None,
        }
    }
}

impl FileSettings {
    /// Load a config file; `Ok(None)` when it does not exist
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
            .map(Some)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

impl ClientSettings {
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value).context("Invalid client settings")
    }

    /// Problem cap, if set to a positive number
    pub fn max_number_of_problems(&self) -> Option<usize> {
        let n = self.tdls.as_ref()?.max_number_of_problems?;
        usize::try_from(n).ok().filter(|n| *n > 0)
    }
}

impl SettingsLayers {
    /// Resolve the effective settings
    pub fn resolve(&self) -> Settings {
        let max_number_of_problems = [
            self.client,
            self.cli,
            self.config_file,
            self.workspace_file,
            self.user_file,
        ]
        .into_iter()
        .flatten()
        .find(|n| *n > 0)
        .unwrap_or(DEFAULT_MAX_NUMBER_OF_PROBLEMS);

        Settings {
            max_number_of_problems,
        }
    }

    /// Replace the file layers, keeping CLI and client values
    pub fn reload_files(&mut self, fresh: SettingsLayers) {
        self.user_file = fresh.user_file;
        self.workspace_file = fresh.workspace_file;
        self.config_file = fresh.config_file;
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_number_of_problems: DEFAULT_MAX_NUMBER_OF_PROBLEMS,
        }
    }
}
