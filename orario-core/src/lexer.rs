//! Report lexer
//!
//! Splits the raw report into trimmed lines, drops blank and
//! page-marker lines, and keeps each surviving line's position in the
//! raw report. Positions matter: the extractor's class-name offset and
//! teacher lookahead are expressed in raw-line distance, so they must
//! survive the filtering.

use crate::layout::{weekday_range_noise, ReportLayout};

/// A trimmed report line with its 0-based raw position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 0-based position in the raw report
    pub index: usize,
    /// Trimmed text
    pub text: String,
}

/// The lexed report: surviving lines in order, raw indices preserved
#[derive(Debug, Clone)]
pub struct LexedReport {
    lines: Vec<RawLine>,
}

impl LexedReport {
    /// Lex a raw report
    pub fn lex(raw: &str, layout: &ReportLayout) -> Self {
        // Weekday-range annotations are smeared mid-line by the export
        // and would corrupt whatever line they land on; scrub them
        // before splitting.
        let cleaned = weekday_range_noise().replace_all(raw, "");

        let page_marker = layout.page_marker.to_lowercase();
        let lines = cleaned
            .lines()
            .enumerate()
            .map(|(index, text)| RawLine {
                index,
                text: text.trim().to_string(),
            })
            .filter(|line| {
                !line.text.is_empty() && !line.text.to_lowercase().contains(&page_marker)
            })
            .collect();

        Self { lines }
    }

    /// Surviving lines in report order
    pub fn lines(&self) -> &[RawLine] {
        &self.lines
    }

    /// Text of the line at a raw position, if it survived lexing
    pub fn text_at_raw(&self, raw_index: usize) -> Option<&str> {
        self.lines
            .binary_search_by_key(&raw_index, |line| line.index)
            .ok()
            .map(|pos| self.lines[pos].text.as_str())
    }

    /// Position (into `lines`) of the first line strictly after a raw index
    pub fn position_after_raw(&self, raw_index: usize) -> usize {
        self.lines.partition_point(|line| line.index <= raw_index)
    }
}
