//! End-to-end pipeline orchestration
//!
//! One batch invocation: lex, extract, map, aggregate, resolve,
//! relabel. All state lives in owned accumulators passed stage to
//! stage; nothing here touches the filesystem.

use crate::error::Result;
use crate::extractor::extract_lessons;
use crate::homonyms::{resolve_homonyms, HomonymRecord};
use crate::layout::{LoadRules, ReportLayout};
use crate::lexer::LexedReport;
use crate::load::aggregate_loads;
use crate::relabel::relabel;
use crate::schedule::{assign_periods, DailyHoursTable, StartCorrections};
use crate::timetable::{export_rows, ClassTimetable, ExportRow};

/// The three raw sources of one run
#[derive(Debug, Clone, Copy)]
pub struct ReportInputs<'a> {
    /// Raw report text
    pub report: &'a str,
    /// Daily-hours source: one line per class, dot-separated 6 integers
    pub daily_hours: &'a str,
    /// Start-correction source: one line per class, dot-separated codes
    pub start_corrections: &'a str,
}

/// Everything one run produces, ready for a caller to serialize
#[derive(Debug, Clone)]
pub struct TimetableBundle {
    /// Per-class lesson sequences, relabeled
    pub classes: Vec<ClassTimetable>,
    /// Flat export rows, relabeled
    pub export_rows: Vec<ExportRow>,
    /// Updated homonym records, to be persisted for the next run
    pub homonym_records: Vec<HomonymRecord>,
}

/// Configured pipeline runner
#[derive(Debug, Clone, Default)]
pub struct TimetablePipeline {
    layout: ReportLayout,
    rules: LoadRules,
}

impl TimetablePipeline {
    /// Pipeline with default layout and heuristics
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the report layout
    pub fn with_layout(mut self, layout: ReportLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Override the load heuristics
    pub fn with_rules(mut self, rules: LoadRules) -> Self {
        self.rules = rules;
        self
    }

    /// Run the whole pipeline over one report.
    ///
    /// `prior` is the homonym record set persisted by an earlier run;
    /// pass an empty slice on the first run.
    pub fn run(&self, inputs: ReportInputs<'_>, prior: &[HomonymRecord]) -> Result<TimetableBundle> {
        let report = LexedReport::lex(inputs.report, &self.layout);
        let mut classes = extract_lessons(&report, &self.layout)?;

        let hours = DailyHoursTable::parse(inputs.daily_hours)?;
        let corrections = StartCorrections::parse(inputs.start_corrections)?;
        assign_periods(&mut classes, &hours, &corrections)?;

        // Flattening validates the day/period invariant; nothing may
        // be emitted past this point if it fails.
        let mut rows = export_rows(&classes)?;

        let book = aggregate_loads(&classes, &self.rules);
        let homonym_records = resolve_homonyms(&book, prior, &self.rules);
        relabel(&mut classes, &mut rows, &homonym_records);

        Ok(TimetableBundle {
            classes,
            export_rows: rows,
            homonym_records,
        })
    }
}
