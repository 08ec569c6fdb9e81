//! Named layout and heuristic constants
//!
//! The source report has one fixed, versioned layout. Every positional
//! assumption the pipeline makes about it lives here as a named value,
//! so the coupling is visible and swappable instead of buried as magic
//! numbers in the extraction code.

use regex::Regex;
use std::sync::OnceLock;

/// Raw-line distance from the header anchor to the class-name line.
pub const CLASS_NAME_OFFSET: usize = 6;

/// Raw-line distance peeked past a teacher line to decide whether it
/// was the last teacher of the current slot.
pub const TEACHER_LOOKAHEAD: usize = 3;

/// Structural constants of the report layout
#[derive(Debug, Clone)]
pub struct ReportLayout {
    /// Institutional title marking the start of a class block
    /// (matched case-insensitively, as a substring)
    pub class_anchor: String,
    /// Raw-line offset from the anchor to the class name
    pub class_name_offset: usize,
    /// Raw-line lookahead used by the teacher state
    pub teacher_lookahead: usize,
    /// Prefix of page-number lines dropped by the lexer
    pub page_marker: String,
    /// The fixed weekday header line, ignored during extraction
    pub weekday_header: String,
    /// Substring identifying time lines, ignored during extraction
    pub time_marker: String,
    /// Room prefixes treated as teacher-like by the lookahead test
    pub room_prefixes: Vec<String>,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            class_anchor: "I.T.I.S. \"Paleocapa\"".to_string(),
            class_name_offset: CLASS_NAME_OFFSET,
            teacher_lookahead: TEACHER_LOOKAHEAD,
            page_marker: "Pagina ".to_string(),
            weekday_header: "lunedì martedì mercoledì giovedì venerdì sabato".to_string(),
            time_marker: ":00".to_string(),
            room_prefixes: vec!["Lab".to_string(), "Palestra".to_string()],
        }
    }
}

/// Domain heuristics used by load aggregation and homonymy detection.
///
/// Both values are tuned empirically to one institution's timetable and
/// are not derivable from the data itself, hence overridable.
#[derive(Debug, Clone)]
pub struct LoadRules {
    /// Maximum weekly hours plausibly taught by a single person.
    /// Teachers at or below this build the compatibility graph; teachers
    /// above it are homonym candidates.
    pub single_person_max_hours: u32,
    /// Subject whose lone weekly hour is discounted as stand-in noise
    pub elective_subject: String,
}

impl Default for LoadRules {
    fn default() -> Self {
        Self {
            single_person_max_hours: 18,
            elective_subject: "Religione".to_string(),
        }
    }
}

/// Pattern for subject-class codes (single letter, 2-4 digits, hyphen,
/// alphanumeric tail). Used to keep hyphen-bearing teacher lines from
/// being rejected, and to exclude non-teacher abbreviations from the
/// unmatched report.
pub fn subject_class_code() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[A-Za-z][0-9]{2,4}-[A-Za-z0-9]+").expect("subject-class code pattern")
    })
}

/// Pattern for the weekday-range annotations occasionally smeared over
/// the report (e.g. `lun 08...-...12`). Unexplained export noise,
/// removed before line splitting.
pub fn weekday_range_noise() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(lun|mar|mer|gio|ven|sab)[a-zì]*\s+[0-9]{2}\.*\s*-\s*\.*[0-9]{2}")
            .expect("weekday-range noise pattern")
    })
}
