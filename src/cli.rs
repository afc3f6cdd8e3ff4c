//! Command-line interface
//!
//! Supports both the graphical sandbox (default) and headless scenarios.

use clap::Parser;
use std::path::PathBuf;

/// Health-driven aura lighting for board tokens
#[derive(Parser, Debug)]
#[command(name = "token-health-aura")]
#[command(about = "Health-driven aura lighting for board tokens")]
#[command(version)]
pub struct Args {
    /// Run in headless mode with the specified JSON scenario file
    #[arg(long, value_name = "SCENARIO_FILE")]
    pub headless: Option<PathBuf>,

    /// Output path for the scenario report (headless mode only)
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Aura settings file (RON)
    #[arg(long, value_name = "SETTINGS_FILE")]
    pub settings: Option<PathBuf>,

    /// Game system id for the sandbox board
    #[arg(long, default_value = "dnd5e")]
    pub system: String,

    /// How many tokens to place on the sandbox board
    #[arg(long, default_value = "4")]
    pub tokens: usize,
}

pub fn parse_args() -> Args {
    Args::parse()
}
