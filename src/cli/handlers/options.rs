// src/cli/handlers/options.rs

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::models::MenuOptions;
use crate::system::options_config;

/// Prints the effective options followed by what each one does.
pub fn show(options: &MenuOptions) {
    println!("\n{}", options.to_string().trim_end());
    println!("\n--- {} ---\n", t!("options.info.header").yellow());
    println!("{}", MenuOptions::info());
}

/// Saves `options` as TOML, so later runs can load them with `--config`.
pub fn write(path: &Path, options: &MenuOptions) -> Result<()> {
    options_config::write_options(path, options)?;
    println!(
        "{}",
        format!(t!("options.success.written"), path = path.display()).green()
    );
    Ok(())
}
