//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;

pub mod abbrev;
pub mod build;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract and normalize the timetable report
    Build(build::BuildArgs),

    /// Resolve teacher abbreviations against the full-name roster
    Abbrev(abbrev::AbbrevArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Build(args) => args.execute(),
            Commands::Abbrev(args) => args.execute(),
        }
    }
}

/// Initialize logging based on verbosity level
pub(crate) fn init_logging(quiet: bool, verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(log_level),
        )
        .try_init();
    }
}
