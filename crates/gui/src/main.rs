use anyhow::Context;
use tracing_subscriber::EnvFilter;

mod gui;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    gui::run().context("checkers window failed")
}
