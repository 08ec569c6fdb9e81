//! Abbreviation resolution command

use crate::error::CliError;
use crate::input::FileReader;
use crate::output::write_pretty;
use anyhow::{Context, Result};
use clap::Args;
use orario_core::{collect_abbreviations, resolve_abbreviations, ClassTimetable};
use std::collections::HashMap;
use std::path::PathBuf;

/// Arguments for the abbrev command
#[derive(Debug, Args)]
pub struct AbbrevArgs {
    /// Nested timetable JSON produced by `orario build`
    #[arg(short, long, value_name = "FILE")]
    pub timetable: PathBuf,

    /// Roster of full names, one "SURNAME GIVEN_NAMES" per line
    #[arg(short, long, value_name = "FILE")]
    pub roster: PathBuf,

    /// Override table: "ABBREVIATION,FULL NAME" rows
    #[arg(long, value_name = "FILE")]
    pub overrides: Option<PathBuf>,

    /// Matched abbreviations output
    #[arg(long, value_name = "FILE", default_value = "abbreviations_matches.json")]
    pub matches_out: PathBuf,

    /// Unmatched abbreviations output
    #[arg(long, value_name = "FILE", default_value = "abbreviations_unmatched.json")]
    pub unmatched_out: PathBuf,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl AbbrevArgs {
    /// Execute the abbrev command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.quiet, self.verbose);

        let content = FileReader::read_text(&self.timetable)?;
        let classes: Vec<ClassTimetable> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse timetable: {}", self.timetable.display()))?;
        let roster = FileReader::read_lines(&self.roster)?;
        let overrides = match &self.overrides {
            Some(path) => parse_overrides(&FileReader::read_lines(path)?)?,
            None => HashMap::new(),
        };

        let abbreviations = collect_abbreviations(&classes);
        log::info!(
            "Resolving {} abbreviations against {} roster names",
            abbreviations.len(),
            roster.len()
        );

        let outcome = resolve_abbreviations(&abbreviations, &roster, &overrides);
        for matched in &outcome.matches {
            log::debug!("{} -> {}", matched.abbreviation, matched.full_name);
        }
        if !outcome.unmatched.is_empty() {
            log::warn!(
                "{} abbreviations need manual resolution",
                outcome.unmatched.len()
            );
        }

        write_pretty(&self.matches_out, &outcome.matches)?;
        write_pretty(&self.unmatched_out, &outcome.unmatched)?;

        Ok(())
    }
}

/// Parse the two-column override rows
fn parse_overrides(lines: &[String]) -> Result<HashMap<String, String>> {
    let mut table = HashMap::new();
    for line in lines {
        let (abbreviation, full_name) = line
            .split_once(',')
            .ok_or_else(|| CliError::MalformedData(format!("override row without comma: {line}")))?;
        table.insert(
            abbreviation.trim().to_string(),
            full_name.trim().to_string(),
        );
    }
    Ok(table)
}
