//! Orario CLI library
//!
//! This library provides the command-line interface for the orario
//! timetable extraction and teacher-resolution pipeline.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;

pub use error::{CliError, CliResult};
