use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use tdls_language_server::config::{Args, Config};
use tdls_language_server::lsp::server::init_logging;
use tdls_language_server::validation::{validate_document, Severity, BYTE_ORDER_MARK};

/// Validate dialogue script files without an editor
#[derive(Debug, Parser)]
#[command(name = "tdls-check")]
#[command(version)]
struct CheckArgs {
    /// Script files to validate
    #[arg(required = true)]
    files: Vec<PathBuf>,

    #[command(flatten)]
    common: Args,
}

fn main() -> Result<ExitCode> {
    let args = CheckArgs::parse();
    let config = Config::from_args(args.common)?;
    init_logging(&config.log_level);

    let cwd = std::env::current_dir().context("Could not determine current directory")?;
    let settings = config.load_layers(Some(cwd.as_path())).resolve();
    log::debug!("maxNumberOfProblems = {}", settings.max_number_of_problems);

    let mut errors = 0;
    for path in &args.files {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(&content);

        let result = validate_document(content, settings.max_number_of_problems);
        for d in &result.diagnostics {
            let severity = match d.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            println!(
                "{}:{}:{}: {}: {}",
                path.display(),
                d.range.start.line + 1,
                d.range.start.character + 1,
                severity,
                d.message
            );
        }
        errors += result.error_count();
    }

    Ok(if errors > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
