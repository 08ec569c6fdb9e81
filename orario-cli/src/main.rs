//! Entry point for the orario CLI

use anyhow::Result;
use clap::Parser;
use orario_cli::commands::Commands;

/// Timetable extraction and teacher-identity resolution
#[derive(Debug, Parser)]
#[command(name = "orario", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
