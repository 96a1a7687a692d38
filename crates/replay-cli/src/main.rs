//! Terminal frontend for the scripted chat replay demo.
//!
//! Two modes share the same engine: a ratatui TUI with a chat panel
//! and a thinking panel, and a plain transcript mode that plays the
//! whole script to stdout for piping.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use replay_core::Script;
use replay_engine::ReplayEngine;
use replay_telemetry::{LogConfig, setup_logging};

mod render;
mod theme;
mod transcript;
mod tui;

/// Scripted chat replay demo.
#[derive(Debug, Parser)]
#[command(name = "replay", version, about)]
struct Cli {
    /// Script feed to play (JSON). Defaults to the bundled demo.
    script: Option<PathBuf>,

    /// Frontend mode.
    #[arg(long, value_enum, default_value_t = Mode::Tui)]
    mode: Mode,

    /// Base log level.
    #[arg(long, default_value = "warn", env = "REPLAY_LOG")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Interactive two-panel TUI.
    Tui,
    /// Non-interactive stdout playback of the whole script.
    Transcript,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The TUI owns stdout, so logs always go to stderr.
    setup_logging(&LogConfig::new(&cli.log_level).with_stderr())
        .context("failed to install logging")?;

    let script = match &cli.script {
        Some(path) => Script::from_path(path)
            .with_context(|| format!("failed to load script {}", path.display()))?,
        None => Script::bundled_demo(),
    };
    tracing::info!(turns = script.len(), "script loaded");

    let engine = ReplayEngine::new(script.clone());

    match cli.mode {
        Mode::Tui => tui::run(engine).await,
        Mode::Transcript => transcript::run(&engine, &script).await,
    }
}
