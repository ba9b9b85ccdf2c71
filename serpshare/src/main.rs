// serpshare/src/main.rs
//! serpshare entry point.

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use std::process::ExitCode;

use serpshare::cli::{Cli, Commands};
use serpshare::commands::{analyze::run_analyze, error_msg, importance::run_importance};
use serpshare::logger;
use serpshare::ui::theme::{build_theme_map, ThemeMap};

fn main() -> Result<ExitCode> {
    // A missing .env is fine; it only supplies RUST_LOG / SERPSHARE_CONFIG.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    let theme = build_theme_map(cli.theme.as_ref()).context("Theme error")?;
    if let Err(e) = run(&cli, &theme) {
        error_msg(format!("{:#}", e), &theme);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn run(cli: &Cli, theme: &ThemeMap) -> Result<()> {
    match &cli.command {
        Commands::Analyze(cmd) => run_analyze(cmd, cli.quiet, theme),
        Commands::Importance(args) => run_importance(args, theme),
    }
}
