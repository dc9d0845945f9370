use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::models::{Alignment, MenuOptions};
use crate::system::options_config;

/// One handler per mode of the binary.
pub mod handlers;

/// Builds the color-aware help string at runtime.
fn build_help_string() -> &'static str {
    let use_colors = colored::control::SHOULD_COLORIZE.should_colorize();

    let template = t!("cli.help.template");

    let title = if use_colors { "\x1b[1;33m" } else { "" }; // Bold Yellow
    let hl = if use_colors { "\x1b[1;36m" } else { "" }; // Bold Cyan
    let group = if use_colors { "\x1b[1;32m" } else { "" }; // Bold Green
    let dim = if use_colors { "\x1b[2m" } else { "" };
    let reset = if use_colors { "\x1b[0m" } else { "" };

    let formatted_string = template
        .replace("<title>", title)
        .replace("</title>", reset)
        .replace("<hl>", hl)
        .replace("</hl>", reset)
        .replace("<group>", group)
        .replace("</group>", reset)
        .replace("<dim>", dim)
        .replace("</dim>", reset);

    Box::leak(formatted_string.into_boxed_str())
}

/// juusmenu: a nestable text menu engine, with a demo menu tree.
#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about,
    help_template = { build_help_string() },
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
pub struct Cli {
    /// Read menu options from this TOML file instead of the user's options file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the effective options to this TOML file and exit.
    #[arg(long, value_name = "FILE")]
    pub write_config: Option<PathBuf>,

    /// Print the effective options with an explanation of each, then exit.
    #[arg(long)]
    pub show_options: bool,

    /// Phrase that closes every open menu at once. An empty value disables it.
    #[arg(long, value_name = "PHRASE")]
    pub kill_phrase: Option<String>,

    /// Prompt printed under each menu.
    #[arg(long, value_name = "TEXT")]
    pub prompt: Option<String>,

    /// Right-align the entry rows.
    #[arg(long)]
    pub align_right: bool,

    /// Do not wait for <RET> after an action's output.
    #[arg(long)]
    pub no_pause: bool,

    /// Log configuration problems instead of printing them.
    #[arg(long)]
    pub quiet_alerts: bool,

    /// Do not repeat the menu title and choice around an action's output.
    #[arg(long)]
    pub no_echo: bool,
}

impl Cli {
    /// Options from `--config` (or the user's options file), with the
    /// command-line flags applied on top.
    pub fn resolve_options(&self) -> Result<MenuOptions> {
        let mut options = match &self.config {
            Some(path) => options_config::load_options(path)?,
            None => options_config::load_user_options()?,
        };
        self.apply_overrides(&mut options);
        Ok(options)
    }

    fn apply_overrides(&self, options: &mut MenuOptions) {
        if let Some(phrase) = &self.kill_phrase {
            options.set_kill_phrase(phrase);
        }
        if let Some(prompt) = &self.prompt {
            options.set_menu_prompt(prompt);
        }
        if self.align_right {
            options.set_alignment(Alignment::Right);
        }
        if self.no_pause {
            options.set_pause_on_output(false);
        }
        if self.quiet_alerts {
            options.set_alerts_display(false);
        }
        if self.no_echo {
            options.set_echo_menu_and_key(false);
        }
    }
}
