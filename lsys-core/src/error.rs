//! Error types for the grammar engine and the interpreter.

use std::fmt;

// ---------------------------------------------------------------------------
// Error severity
// ---------------------------------------------------------------------------

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Warning (the configuration was accepted with a fallback).
    Warning,
    /// Error (the configuration or drawing was rejected).
    Error,
    /// Fatal error (an interpretation pass was aborted).
    Fatal,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// An error or diagnostic produced while building or running an L-system.
#[derive(Debug, Clone, PartialEq)]
pub struct LsysError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Index of the offending symbol in the interpreted string, if any.
    pub position: Option<usize>,
    /// Severity.
    pub severity: Severity,
}

impl LsysError {
    /// Create a new error.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            position: None,
            severity: Severity::Error,
        }
    }

    /// Attach the symbol index.
    #[must_use]
    pub const fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Set severity.
    #[must_use]
    pub const fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl fmt::Display for LsysError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(pos) = self.position {
            write!(f, "[symbol {pos}] ")?;
        }
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for LsysError {}

// ---------------------------------------------------------------------------
// Error kinds
// ---------------------------------------------------------------------------

/// Categories of errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // -- Configuration errors --
    /// A weighted production without alternatives.
    InvalidProduction,
    /// A production rule with an empty key.
    EmptyRuleKey,
    /// A repeated rule key, or two keys where one is a prefix of the other.
    AmbiguousRules,
    /// A non-positive or non-finite alternative weight, or an overflowing total.
    InvalidWeight,
    /// A drawing parameter out of range (zero scale factor, NaN angle, ...).
    InvalidParameter,
    /// An extension binding naming an action that does not exist.
    UnknownAction,
    /// Malformed configuration document.
    InvalidConfig,

    // -- Interpretation errors --
    /// `]` with nothing on the state stack.
    StackUnderflow,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidProduction => write!(f, "invalid production"),
            Self::EmptyRuleKey => write!(f, "empty rule key"),
            Self::AmbiguousRules => write!(f, "ambiguous rules"),
            Self::InvalidWeight => write!(f, "invalid weight"),
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::UnknownAction => write!(f, "unknown action"),
            Self::InvalidConfig => write!(f, "invalid configuration"),
            Self::StackUnderflow => write!(f, "stack underflow"),
        }
    }
}

/// Convenience type alias for results using [`LsysError`].
pub type LsysResult<T> = Result<T, LsysError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = LsysError::new(ErrorKind::StackUnderflow, "`]` without matching `[`")
            .with_position(7);
        let s = format!("{err}");
        assert!(s.contains("[symbol 7]"), "missing position: {s}");
        assert!(s.contains("stack underflow"), "missing kind: {s}");
        assert!(s.contains("without matching"), "missing message: {s}");
    }

    #[test]
    fn error_without_position() {
        let err = LsysError::new(ErrorKind::InvalidWeight, "weight must be positive");
        let s = format!("{err}");
        assert!(!s.contains('['), "should not have position: {s}");
        assert_eq!(err.severity, Severity::Error);
    }

    #[test]
    fn severity_builder() {
        let err = LsysError::new(ErrorKind::UnknownAction, "no such action")
            .with_severity(Severity::Warning);
        assert_eq!(err.severity, Severity::Warning);
    }
}
