//! Error types for chart loading.

use std::fmt;
use std::path::PathBuf;

use crate::model::ChartKind;
use crate::parser::Section;

/// A problem with the contents of a chart file.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// The declared `type` does not match the parser's dimensionality.
    TypeMismatch {
        /// The kind the parser expects.
        expected: ChartKind,
        /// The tag found in the file, upper-cased.
        found: String,
    },

    /// A token in a data line is not a finite number.
    InvalidNumber {
        /// 1-based line number.
        line: usize,
        /// The block the line belongs to.
        section: Section,
        /// The offending token.
        token: String,
    },

    /// A data line has the wrong shape (token count or missing `->`).
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// The block the line belongs to.
        section: Section,
        /// What the line should have looked like.
        reason: &'static str,
    },

    /// A section every chart file must declare is absent.
    MissingSection {
        /// The missing section.
        section: Section,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::TypeMismatch { expected, found } => {
                write!(f, "chart type \"{}\" is not {}", found, expected)
            }
            FormatError::InvalidNumber {
                line,
                section,
                token,
            } => {
                write!(f, "line {} ({}): '{}' is not a number", line, section, token)
            }
            FormatError::MalformedLine {
                line,
                section,
                reason,
            } => {
                write!(f, "line {} ({}): {}", line, section, reason)
            }
            FormatError::MissingSection { section } => {
                write!(f, "missing required section '{}'", section)
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// Errors that can occur while loading a chart file.
#[derive(Debug)]
pub enum ChartError {
    /// The file does not exist.
    NotFound {
        /// The path that was requested.
        path: String,
    },

    /// Failed to read the file.
    Io {
        /// The path that failed to load.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The file was read but its contents are not a valid chart.
    Format {
        /// The path being parsed.
        path: String,
        /// What went wrong.
        error: FormatError,
    },
}

impl ChartError {
    /// The format error, if this is one.
    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            ChartError::Format { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartError::NotFound { path } => {
                write!(f, "Chart file not found: {}", path)
            }
            ChartError::Io { path, source } => {
                write!(f, "IO error loading '{}': {}", path.display(), source)
            }
            ChartError::Format { path, error } => {
                write!(f, "Failed to parse '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for ChartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChartError::Io { source, .. } => Some(source),
            ChartError::Format { error, .. } => Some(error),
            ChartError::NotFound { .. } => None,
        }
    }
}

impl From<std::io::Error> for ChartError {
    fn from(err: std::io::Error) -> Self {
        ChartError::Io {
            path: PathBuf::new(),
            source: err,
        }
    }
}

/// Result type alias for chart loading.
pub type ChartResult<T> = Result<T, ChartError>;
