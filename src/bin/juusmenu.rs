// src/bin/juusmenu.rs

use anyhow::Result;
use clap::Parser;
use colored::*;
use juusmenu::cli::{Cli, handlers};

/// The main entry point of the `juusmenu` demo.
/// It sets up logging, parses arguments, runs the requested mode and performs
/// centralized error handling.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        eprintln!("\n{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let options = cli.resolve_options()?;

    if cli.show_options {
        handlers::options::show(&options);
        return Ok(());
    }
    if let Some(path) = &cli.write_config {
        return handlers::options::write(path, &options);
    }

    handlers::demo::handle(options)
}
