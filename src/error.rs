//! Error and diagnostic types shared by the record decoders.
//!
//! Malformed input almost never aborts a decode: the decoders repair what
//! they can, default what they cannot, and report each defect as a
//! [`Diagnostic`] attached to the returned record. Only conditions that make
//! the record unusable (I/O failure, or a record of the wrong kind) surface
//! as a [`ReadError`].

use std::fmt;
use thiserror::Error;

/// How bad a format defect is.
///
/// Everything below `Program` is recoverable: the decoder substitutes a
/// default and keeps going. `Program` marks an internal inconsistency the
/// caller should treat as a bug report, not an input problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// A field was absent and a default was applied.
    Info,
    /// Likely a caller or input mistake, recovered from.
    Warning,
    /// Format violation; parsing continued but the output is suspect.
    Serious,
    /// Internal invariant violated.
    Program,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Serious => "serious",
            Severity::Program => "program error",
        };
        f.write_str(s)
    }
}

/// One defect found while decoding a record.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    /// Forward the diagnostic to the `log` facade at a matching level.
    pub fn emit(&self) {
        match self.severity {
            Severity::Info => log::info!("{}", self.message),
            Severity::Warning => log::warn!("{}", self.message),
            Severity::Serious | Severity::Program => log::error!("{}", self.message),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Unrecoverable decode failures.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error while reading record: {0}")]
    Io(#[from] std::io::Error),

    /// The block decoder found a matrix header where a block was expected.
    #[error("matrix record encountered while reading a block: {line}")]
    NotABlock { line: String },

    /// The matrix decoder found a block header where a matrix was expected.
    #[error("block record encountered while reading a matrix: {line}")]
    NotAMatrix { line: String },
}
