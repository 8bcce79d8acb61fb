use anyhow::Context;
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub mod tui;

const LOG_FILE: &str = "checkers.log";

fn main() -> anyhow::Result<()> {
    init_logging()?;
    tui::run().context("terminal front end failed")
}

/// Logs go to a file; stderr belongs to the raw-mode screen.
fn init_logging() -> anyhow::Result<()> {
    let file = File::create(LOG_FILE).with_context(|| format!("creating {LOG_FILE}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
