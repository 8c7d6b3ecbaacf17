//! Diagnostic types collected during a conversion.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a conversion diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Observational; only reported in verbose mode.
    Info,
    /// Something the target platform does not support was found.
    Warning,
    /// A conversion step failed outright.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic produced while converting one document.
///
/// Line numbers are 1-based; line 0 means the diagnostic applies to the
/// document as a whole rather than a specific line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionWarning {
    /// Source label (usually the input file path).
    pub file: String,

    /// 1-based line number, or 0 for document-wide diagnostics.
    pub line: u32,

    /// Human-readable description.
    pub message: String,

    /// Diagnostic severity.
    pub severity: Severity,
}

impl ConversionWarning {
    /// Create an info-level diagnostic.
    pub fn info(file: impl Into<String>, line: u32, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            message: message.into(),
            severity: Severity::Info,
        }
    }

    /// Create a warning-level diagnostic.
    pub fn warning(file: impl Into<String>, line: u32, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    /// Create an error-level diagnostic.
    pub fn error(file: impl Into<String>, line: u32, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// Append-only log of diagnostics for one document conversion.
///
/// Every pipeline stage records into the same log; nothing ever reads
/// it back during conversion. The orchestrator hands the accumulated
/// entries to the caller as part of the conversion result.
#[derive(Debug, Default)]
pub struct WarningLog {
    entries: Vec<ConversionWarning>,
}

impl WarningLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic.
    pub fn record(&mut self, warning: ConversionWarning) {
        self.entries.push(warning);
    }

    /// Number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrow the recorded diagnostics in recording order.
    pub fn entries(&self) -> &[ConversionWarning] {
        &self.entries
    }

    /// Consume the log and return the diagnostics in recording order.
    pub fn into_entries(self) -> Vec<ConversionWarning> {
        self.entries
    }
}
