//! Timetable extraction and teacher-identity resolution
//!
//! This crate turns a fixed-layout school timetable report (a printed
//! export dumped to text) into normalized per-class lesson records, and
//! resolves the two data-quality problems inherent to the source:
//! same-surname teachers that the report cannot distinguish, and
//! truncated teacher abbreviations used by a companion export.
//!
//! The pipeline runs in fixed stages over owned accumulators:
//! lexing, lesson extraction, schedule mapping, load aggregation,
//! homonymy resolution, relabeling. Abbreviation resolution is an
//! independent downstream consumer of a finalized timetable.

#![warn(missing_docs)]

pub mod abbrev;
pub mod error;
pub mod extractor;
pub mod homonyms;
pub mod layout;
pub mod lexer;
pub mod load;
pub mod names;
pub mod pipeline;
pub mod relabel;
pub mod schedule;
pub mod timetable;

// Re-export key types
pub use abbrev::{collect_abbreviations, resolve_abbreviations, AbbreviationMatch, ResolutionOutcome};
pub use error::{CoreError, Result};
pub use extractor::extract_lessons;
pub use homonyms::{CompatibilityGraph, HomonymIdentity, HomonymRecord};
pub use layout::{LoadRules, ReportLayout};
pub use lexer::LexedReport;
pub use load::{LoadBook, TeacherLoad};
pub use pipeline::{ReportInputs, TimetableBundle, TimetablePipeline};
pub use schedule::{DailyHoursTable, StartCorrections};
pub use timetable::{ClassTimetable, ExportRow, LessonSlot, TeacherClassroom};
