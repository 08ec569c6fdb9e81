//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Required input file not found or inaccessible
    MissingInput(String),
    /// Configuration error
    ConfigError(String),
    /// Malformed auxiliary data (roster, overrides, persisted records)
    MalformedData(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::MissingInput(path) => write!(f, "Required input missing: {path}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::MalformedData(msg) => write!(f, "Malformed data: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_display() {
        let error = CliError::MissingInput("orario.txt".to_string());
        assert_eq!(error.to_string(), "Required input missing: orario.txt");
    }

    #[test]
    fn test_config_error_display() {
        let error = CliError::ConfigError("bad threshold".to_string());
        assert_eq!(error.to_string(), "Configuration error: bad threshold");
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = CliError::MalformedData("overrides row".to_string());
        let _: &dyn std::error::Error = &error;
        assert!(format!("{error:?}").contains("MalformedData"));
    }
}
