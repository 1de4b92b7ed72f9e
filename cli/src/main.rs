use std::fs;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use foodcourt_kernel::config::StoreConfig;
use foodcourt_kernel::invariants::InvariantEngine;
use foodcourt_kernel::session::Command;
use foodcourt_kernel::simulate::simulate_session;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Food counter session runner
#[derive(Parser, Debug)]
#[command(name = "foodcourt")]
#[command(about = "Replay a scripted food counter session", long_about = None)]
struct Cli {
    /// Path to store config JSON (admin credentials, seed menu)
    #[arg(long)]
    config: Option<String>,

    /// Path to session JSON (array of commands)
    #[arg(long)]
    session: String,

    /// Diagnostic log level; RUST_LOG takes precedence
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Emit diagnostic logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(level: LogLevel, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    // Logs go to stderr; stdout carries the JSON report.
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level, cli.json_logs);

    // ----------------------------
    // Load config
    // ----------------------------
    let config = if let Some(path) = &cli.config {
        let data = fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
        serde_json::from_str::<StoreConfig>(&data)
            .with_context(|| format!("parsing config {path}"))?
    } else {
        StoreConfig::default_config()
    };

    // ----------------------------
    // Load session
    // ----------------------------
    let data = fs::read_to_string(&cli.session)
        .with_context(|| format!("reading session {}", cli.session))?;
    let commands: Vec<Command> = serde_json::from_str(&data)
        .with_context(|| format!("parsing session {}", cli.session))?;
    debug!(commands = commands.len(), "session loaded");

    // ----------------------------
    // Run
    // ----------------------------
    let invariants = InvariantEngine::with_defaults();
    let result = simulate_session(&config, commands, &invariants)?;

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
