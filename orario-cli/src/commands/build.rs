//! Build command implementation

use crate::config::CliConfig;
use crate::input::FileReader;
use crate::output::write_pretty;
use anyhow::{Context, Result};
use clap::Args;
use orario_core::{HomonymRecord, ReportInputs, TimetablePipeline};
use std::path::PathBuf;

/// Arguments for the build command
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Raw report text export
    #[arg(short, long, value_name = "FILE")]
    pub report: PathBuf,

    /// Daily-hours table: one line per class, six dot-separated counts
    #[arg(long, value_name = "FILE")]
    pub hours: PathBuf,

    /// Start corrections: one line per class, six dot-separated codes
    #[arg(long, value_name = "FILE")]
    pub corrections: PathBuf,

    /// Persisted homonym records; read if present, written back updated
    #[arg(long, value_name = "FILE")]
    pub homonyms: Option<PathBuf>,

    /// Nested per-class timetable output
    #[arg(long, value_name = "FILE", default_value = "orario.json")]
    pub timetable_out: PathBuf,

    /// Flat export rows output
    #[arg(long, value_name = "FILE", default_value = "orario_export.json")]
    pub export_out: PathBuf,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl BuildArgs {
    /// Execute the build command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.quiet, self.verbose);

        log::info!("Reading report inputs");
        let report = FileReader::read_text(&self.report)?;
        let hours = FileReader::read_text(&self.hours)?;
        let corrections = FileReader::read_text(&self.corrections)?;
        let prior = self.read_prior_records()?;

        let mut pipeline = TimetablePipeline::new();
        if let Some(path) = &self.config {
            let config = CliConfig::load(path)?;
            pipeline = pipeline
                .with_layout(config.report_layout())
                .with_rules(config.load_rules());
        }

        log::info!("Running extraction pipeline");
        let inputs = ReportInputs {
            report: &report,
            daily_hours: &hours,
            start_corrections: &corrections,
        };
        let bundle = pipeline.run(inputs, &prior)?;

        log::info!(
            "Extracted {} classes into {} export rows",
            bundle.classes.len(),
            bundle.export_rows.len()
        );
        for record in &bundle.homonym_records {
            log::debug!(
                "surname {} split into {} identities",
                record.surname,
                record.identities.len()
            );
            if record.identities.iter().any(|i| i.name.is_empty()) {
                log::warn!("surname {} has unnamed identities, edit the homonym records", record.surname);
            }
        }

        write_pretty(&self.timetable_out, &bundle.classes)?;
        write_pretty(&self.export_out, &bundle.export_rows)?;
        if let Some(path) = &self.homonyms {
            write_pretty(path, &bundle.homonym_records)?;
        }

        Ok(())
    }

    /// Load the homonym records persisted by an earlier run, if any
    fn read_prior_records(&self) -> Result<Vec<HomonymRecord>> {
        match &self.homonyms {
            Some(path) if path.exists() => {
                let content = FileReader::read_text(path)?;
                serde_json::from_str(&content).with_context(|| {
                    format!("Failed to parse homonym records: {}", path.display())
                })
            }
            _ => Ok(Vec::new()),
        }
    }
}
