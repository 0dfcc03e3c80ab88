//! Centralized error handling for gapline
//! Defines common error types, severity levels, and error codes

use crate::constants::errors;
use std::fmt;
use std::io;

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational message (not really an error)
    Info,
    /// Warning - something might be wrong but operation can continue
    Warning,
    /// Standard error - operation failed but the buffer is intact
    Error,
    /// Critical error - may lead to data loss
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Category of the error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    /// Generic file system or I/O errors
    Io,
    /// The file does not exist
    NotFound,
    /// The file exists but may not be read or written
    PermissionDenied,
    /// Fewer bytes were read or written than expected
    ShortRead,
    /// Offset or span outside the buffer
    Range,
    /// Configuration or settings errors
    Settings,
    /// Internal logic or invariant violations
    Internal,
    /// Errors that don't fit other categories
    Other,
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "IO"),
            Self::NotFound => write!(f, "NotFound"),
            Self::PermissionDenied => write!(f, "PermissionDenied"),
            Self::ShortRead => write!(f, "ShortRead"),
            Self::Range => write!(f, "Range"),
            Self::Settings => write!(f, "Settings"),
            Self::Internal => write!(f, "Internal"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A structured error raised by the engine or its file collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapError {
    /// How serious the error is
    pub severity: ErrorSeverity,
    /// What kind of error occurred
    pub kind: ErrorType,
    /// Machine-readable error code (e.g. "FILE_NOT_FOUND")
    pub code: String,
    /// Human-readable description
    pub message: String,
}

impl GapError {
    /// Create a new standard error (Severity: Error)
    pub fn new(kind: ErrorType, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Error,
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a new critical error (Severity: Critical)
    pub fn critical(kind: ErrorType, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Critical,
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a new warning (Severity: Warning)
    pub fn warning(kind: ErrorType, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Warning,
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Offset or span outside `[0, len]`
    pub fn out_of_range(what: &str, value: usize, len: usize) -> Self {
        Self::new(
            ErrorType::Range,
            errors::OUT_OF_RANGE,
            format!("{what} {value} out of bounds (len: {len})"),
        )
    }

    /// Span with `start > end`, or an empty span where one is not allowed
    pub fn invalid_span(start: usize, end: usize) -> Self {
        Self::new(
            ErrorType::Range,
            errors::INVALID_SPAN,
            format!("Invalid span [{start}, {end})"),
        )
    }

    /// Check if the message contains a substring (useful for tests)
    pub fn contains_msg(&self, sub: &str) -> bool {
        self.message.contains(sub)
    }
}

impl fmt::Display for GapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}({}): {}",
            self.severity, self.kind, self.code, self.message
        )
    }
}

impl std::error::Error for GapError {}

impl From<String> for GapError {
    fn from(msg: String) -> Self {
        Self::new(ErrorType::Other, errors::GENERIC_ERROR, msg)
    }
}

impl From<&str> for GapError {
    fn from(msg: &str) -> Self {
        Self::new(ErrorType::Other, errors::GENERIC_ERROR, msg)
    }
}

impl From<io::Error> for GapError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => {
                Self::new(ErrorType::NotFound, errors::FILE_NOT_FOUND, err.to_string())
            }
            io::ErrorKind::PermissionDenied => Self::new(
                ErrorType::PermissionDenied,
                errors::PERMISSION_DENIED,
                err.to_string(),
            ),
            io::ErrorKind::UnexpectedEof | io::ErrorKind::WriteZero => {
                Self::new(ErrorType::ShortRead, errors::SHORT_READ, err.to_string())
            }
            _ => Self::new(ErrorType::Io, errors::IO_ERROR, err.to_string()),
        }
    }
}

/// Result alias for gapline operations
pub type Result<T> = std::result::Result<T, GapError>;
