//! # notedown
//!
//! Convert standard Markdown into the dialect note.com accepts.
//!
//! note's editor supports only heading levels 2–3, no raw HTML, no
//! footnotes, no tables, and exactly one math-delimiter spelling per
//! context. This library rewrites a document accordingly: math
//! delimiters are normalized to `$$...$$` / `$${...}$$`, tables become
//! KaTeX `array` blocks, heading depth is compressed, and unsupported
//! constructs are flagged as diagnostics.
//!
//! ## Quick Start
//!
//! ```
//! use notedown::convert;
//!
//! let result = convert("# Title\n\nInline $x^2$ math.", "article.md", false);
//! assert_eq!(result.text, "## Title\n\nInline $${x^2}$$ math.");
//! assert!(result.warnings.is_empty());
//! ```
//!
//! ## Design
//!
//! - **Total**: `convert` never fails for any input string. Malformed
//!   constructs degrade to a passthrough plus a diagnostic — a
//!   publishing tool must never destroy content on an edge case.
//! - **Pure**: the core does no I/O and holds no state across
//!   documents, so callers can convert files in parallel freely.
//! - **Explicit diagnostics**: warnings come back as part of the
//!   result, not through a shared collector.

pub mod convert;
pub mod error;
pub mod model;
pub mod report;

// Re-export commonly used types
pub use convert::{is_table_candidate, Conversion, ConvertOptions, Converter};
pub use error::{Error, Result};
pub use model::{Alignment, ConversionWarning, Fragment, Severity, TableBlock, WarningLog};
pub use report::{Report, DISPLAY_CAP};

/// Convert one Markdown document to the note dialect.
///
/// `source` labels the diagnostics (usually the input file path);
/// `verbose` enables info-level diagnostics in addition to warnings.
///
/// # Example
///
/// ```
/// let result = notedown::convert("Some claim.[^1]", "doc.md", false);
/// assert_eq!(result.text, "Some claim.[^1]");
/// assert_eq!(result.warnings.len(), 1);
/// ```
pub fn convert(text: &str, source: &str, verbose: bool) -> Conversion {
    Converter::with_options(ConvertOptions::new().with_verbose(verbose)).convert(text, source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_entry_point() {
        let result = convert("# Title", "doc.md", false);
        assert_eq!(result.text, "## Title");
    }

    #[test]
    fn test_converter_reusable_across_documents() {
        let converter = Converter::new();
        let a = converter.convert("# A", "a.md");
        let b = converter.convert("plain", "b.md");
        assert_eq!(a.text, "## A");
        assert_eq!(b.text, "plain");
        assert!(b.warnings.is_empty());
    }
}
