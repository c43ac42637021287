use std::fs::OpenOptions;

use anyhow::Context;
use clap::Parser;

use torlife::{Sim, ToroidalGrid};

use config::Config;
mod config;

mod view;

/// Logs go to `--log-file` only; stderr would draw over the grid.
fn init_logger(config: &Config) -> anyhow::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("could not open log file {}", path.display()))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

pub fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_logger(&config)?;

    let seed = config.seed.unwrap_or_else(rand::random);
    let (width, height) = config.grid_size(termion::terminal_size().ok());
    log::info!("starting a {width}x{height} torus with seed {seed}");

    let simulation = Sim::<ToroidalGrid>::with_seed(width, height, seed)
        .context("could not create the simulation")?;
    view::run(simulation, &config, seed)
}
