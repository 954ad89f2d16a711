//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Expand on-call rotations into concrete shifts
#[derive(Parser, Debug)]
#[command(name = "rota")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (default: ./config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Expand rotation groups into shifts
    Expand(ExpandArgs),

    /// Check rotation groups without expanding them
    Validate {
        /// JSON documents holding one layer, a list of layers or a schedule
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct ExpandArgs {
    /// JSON documents holding one layer, a list of layers or a schedule
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Weeks to expand past each rotation start (default from config)
    #[arg(long)]
    pub horizon_weeks: Option<u32>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Timezone the calendar is laid out in
    #[arg(long)]
    pub display_timezone: Option<String>,

    /// Seed for calendar colors
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Shift records as JSON
    Json,
    /// Month-by-month HTML calendar
    Html,
}
