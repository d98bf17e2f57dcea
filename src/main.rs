//! vibe-flow - Claude Vibe Flow installer
//!
//! Installs the Claude Vibe Flow prompt framework (agents, slash commands, hook
//! scripts, skills) into a project directory, merging JSON configs and leaving
//! user-owned files untouched.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod context;
mod domain;
mod error;
mod hash;
mod inspector;
mod installer;
mod progress;
mod source;
mod stamp;
mod temp;
mod ui;

use cli::Cli;

/// Whether `DEBUG` asks for debug output
fn debug_enabled() -> bool {
    match std::env::var("DEBUG") {
        Ok(value) => !matches!(value.trim(), "" | "0" | "false"),
        Err(_) => false,
    }
}

fn main() {
    let cli = Cli::parse();
    let debug = debug_enabled();

    let default_level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let (args, upgrade) = cli.into_install_args();
    let result = commands::install::run(args, upgrade);

    if let Err(e) = result {
        ui::print_error(&e, debug);
        std::process::exit(e.exit_code());
    }
}
