//! Core error types

use thiserror::Error;

/// Errors raised by the extraction and resolution pipeline
#[derive(Error, Debug)]
pub enum CoreError {
    /// A class header was found but the class-name line is missing
    #[error("class name line missing after header at report line {anchor_line}")]
    MissingClassName {
        /// Raw line index of the header anchor
        anchor_line: usize,
    },

    /// A lesson slot survived mapping without a day/period assignment
    #[error("class {class}: lesson slot left without day/period assignment")]
    IncompleteLesson {
        /// The class whose lesson set broke the invariant
        class: String,
    },

    /// A daily-hours row could not be parsed
    #[error("daily-hours row {line}: {reason}")]
    MalformedHours {
        /// 0-based row index in the source
        line: usize,
        /// What was wrong with the row
        reason: String,
    },

    /// A start-correction row could not be parsed
    #[error("start-correction row {line}: {reason}")]
    MalformedCorrections {
        /// 0-based row index in the source
        line: usize,
        /// What was wrong with the row
        reason: String,
    },

    /// A class has no row in the auxiliary hour tables
    #[error("no hour table row for class {class} (index {index})")]
    MissingClassSchedule {
        /// The class missing its row
        class: String,
        /// The class position the tables were indexed with
        index: usize,
    },
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, CoreError>;
