//! Error types for assocrec operations.
//!
//! Only genuine precondition violations and I/O problems are errors. "Nothing
//! found" outcomes (no frequent itemsets, no rule fired) are empty collections.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for mining, rule generation and recommendation.
///
/// [`InvalidInput`](Self::InvalidInput) and [`EmptyInput`](Self::EmptyInput)
/// together form the invalid-input kind: the caller broke a precondition.
/// Test for the kind with [`RulesError::is_invalid_input`] rather than
/// matching a single variant.
///
/// # Examples
///
/// ```
/// use assocrec::error::RulesError;
///
/// let err = RulesError::InvalidInput {
///     param: "min_support".to_string(),
///     value: "1.5".to_string(),
///     constraint: "in (0, 1]".to_string(),
/// };
/// assert!(err.to_string().contains("min_support"));
/// ```
#[derive(Debug, Error)]
pub enum RulesError {
    /// A threshold, count or rating is outside its valid range.
    #[error("Invalid input: {param} = {value}, expected {constraint}")]
    InvalidInput {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// A collection that must be non-empty was empty. Part of the
    /// invalid-input kind.
    #[error("Invalid input: empty {0}")]
    EmptyInput(String),

    /// A row of a data file could not be decoded.
    #[error("Parse error in {}{}: {cause}", .file.display(), line_suffix(.line))]
    Parse {
        /// File being read
        file: PathBuf,
        /// 1-based line number, when known
        line: Option<u64>,
        /// What went wrong
        cause: String,
    },

    /// Configuration file could not be decoded.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O error (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RulesError {
    /// Create an out-of-range error for `param`.
    #[must_use]
    pub fn invalid_input(param: &str, value: impl ToString, constraint: &str) -> Self {
        Self::InvalidInput {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::EmptyInput(context.to_string())
    }

    /// Whether this error is a caller precondition violation, as opposed to
    /// a data or environment problem.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::EmptyInput(_))
    }

    pub(crate) fn from_csv(file: &std::path::Path, err: csv::Error) -> Self {
        let line = err.position().map(csv::Position::line);
        let cause = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(e) => Self::Io(e),
            _ => Self::Parse {
                file: file.to_path_buf(),
                line,
                cause,
            },
        }
    }
}

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|l| format!(" line {l}")).unwrap_or_default()
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, RulesError>;

/// Check that a ratio threshold lies in `(0, 1]`.
pub(crate) fn check_unit_interval(param: &str, value: f64) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(RulesError::invalid_input(param, value, "in (0, 1]"))
    }
}

/// Check that a result count is positive.
pub(crate) fn check_top_n(top_n: usize) -> Result<()> {
    if top_n == 0 {
        Err(RulesError::invalid_input("top_n", top_n, ">= 1"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = RulesError::invalid_input("min_confidence", 0.0, "in (0, 1]");
        let msg = err.to_string();
        assert!(msg.contains("Invalid input"));
        assert!(msg.contains("min_confidence"));
        assert!(msg.contains("(0, 1]"));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_empty_input_display() {
        let err = RulesError::empty_input("transactions");
        assert_eq!(err.to_string(), "Invalid input: empty transactions");
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_parse_display_with_line() {
        let err = RulesError::Parse {
            file: PathBuf::from("ratings.csv"),
            line: Some(7),
            cause: "bad rating".into(),
        };
        assert_eq!(
            err.to_string(),
            "Parse error in ratings.csv line 7: bad rating"
        );
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn test_parse_display_without_line() {
        let err = RulesError::Parse {
            file: PathBuf::from("movies.csv"),
            line: None,
            cause: "missing header".into(),
        };
        assert_eq!(err.to_string(), "Parse error in movies.csv: missing header");
    }

    #[test]
    fn test_io_from() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: RulesError = io.into();
        assert!(matches!(err, RulesError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_check_unit_interval() {
        assert!(check_unit_interval("min_support", 1.0).is_ok());
        assert!(check_unit_interval("min_support", 0.02).is_ok());
        assert!(check_unit_interval("min_support", 0.0).is_err());
        assert!(check_unit_interval("min_support", -0.1).is_err());
        assert!(check_unit_interval("min_support", 1.01).is_err());
        assert!(check_unit_interval("min_support", f64::NAN).is_err());
    }

    #[test]
    fn test_check_top_n() {
        assert!(check_top_n(0).is_err());
        assert!(check_top_n(1).is_ok());
    }
}
