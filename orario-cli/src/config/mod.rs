//! Configuration module
//!
//! The layout and heuristic constants of the pipeline are institution
//! specific; an optional TOML file overrides any of them without
//! rebuilding.

use crate::error::CliError;
use crate::input::FileReader;
use anyhow::Result;
use orario_core::{LoadRules, ReportLayout};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Report layout overrides
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Load heuristic overrides
    #[serde(default)]
    pub rules: RulesConfig,
}

/// Report-layout configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Institutional title anchoring a class block
    pub class_anchor: String,

    /// Raw-line offset from the anchor to the class name
    pub class_name_offset: usize,

    /// Raw-line lookahead past a teacher line
    pub teacher_lookahead: usize,

    /// Prefix of page-number lines
    pub page_marker: String,

    /// The fixed weekday header line
    pub weekday_header: String,

    /// Substring identifying time lines
    pub time_marker: String,

    /// Room prefixes treated as teacher-like by the lookahead
    pub room_prefixes: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let layout = ReportLayout::default();
        Self {
            class_anchor: layout.class_anchor,
            class_name_offset: layout.class_name_offset,
            teacher_lookahead: layout.teacher_lookahead,
            page_marker: layout.page_marker,
            weekday_header: layout.weekday_header,
            time_marker: layout.time_marker,
            room_prefixes: layout.room_prefixes,
        }
    }
}

/// Load-heuristic configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Maximum weekly hours plausibly taught by one person
    pub single_person_max_hours: u32,

    /// Subject whose lone weekly hour is discounted as noise
    pub elective_subject: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        let rules = LoadRules::default();
        Self {
            single_person_max_hours: rules.single_person_max_hours,
            elective_subject: rules.elective_subject,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = FileReader::read_text(path)?;
        toml::from_str(&content)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())).into())
    }

    /// The configured report layout
    pub fn report_layout(&self) -> ReportLayout {
        ReportLayout {
            class_anchor: self.layout.class_anchor.clone(),
            class_name_offset: self.layout.class_name_offset,
            teacher_lookahead: self.layout.teacher_lookahead,
            page_marker: self.layout.page_marker.clone(),
            weekday_header: self.layout.weekday_header.clone(),
            time_marker: self.layout.time_marker.clone(),
            room_prefixes: self.layout.room_prefixes.clone(),
        }
    }

    /// The configured load rules
    pub fn load_rules(&self) -> LoadRules {
        LoadRules {
            single_person_max_hours: self.rules.single_person_max_hours,
            elective_subject: self.rules.elective_subject.clone(),
        }
    }
}
