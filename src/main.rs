//! wasm-harness CLI entry point.
//!
//! A thin stand-in for the external caller: reads a compiled module from
//! disk, executes it once, and prints the log stream and the outcome.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wasm_harness_common::{HarnessConfig, LanguageHint};
use wasm_harness_runner::Harness;

/// Execute a WebAssembly module and print its diagnostic output.
#[derive(Debug, Parser)]
#[command(name = "wasm-harness", version, about)]
struct Cli {
    /// Path to the compiled module (.wasm).
    module: PathBuf,

    /// Language hint selecting the import/entry-point profile
    /// (typescript, python, java, generic). Defaults to the configured
    /// default, which tries all known conventions.
    #[arg(short, long)]
    language: Option<LanguageHint>,

    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit the full execution report as JSON instead of plain text.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,wasm_harness=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => HarnessConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => HarnessConfig::default(),
    };

    let hint = cli.language.unwrap_or(config.default_language);

    let bytes = std::fs::read(&cli.module)
        .with_context(|| format!("failed to read module {}", cli.module.display()))?;

    info!(module = %cli.module.display(), hint = %hint, bytes = bytes.len(), "Executing module");

    let harness = Harness::new(&config.engine)?;
    let report = harness.execute(&bytes, hint).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for entry in &report.logs {
            println!("[{}] {}", entry.kind, entry.message);
        }
        match report.outcome.kind() {
            None => println!("{}", report.outcome.message()),
            Some(kind) => eprintln!("error ({kind}): {}", report.outcome.message()),
        }
    }

    Ok(if report.outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
