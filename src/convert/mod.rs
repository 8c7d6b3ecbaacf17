//! Document conversion pipeline.
//!
//! Two strictly sequential passes over the text: the math normalizer
//! first (whole document, fixed rule order), then the line pass, which
//! hands table runs to the array renderer as it meets them. Both passes
//! are pure text-to-text stages; diagnostics travel in an explicit log
//! that becomes part of the returned [`Conversion`], so independent
//! documents can be converted in parallel with no shared state.

mod lines;
mod math;
mod table;

pub use lines::{is_table_candidate, LinePass};
pub use math::MathNormalizer;
pub use table::TableRenderer;

use crate::model::{ConversionWarning, WarningLog};

/// Conversion configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    /// Record info-level diagnostics in addition to warnings and errors.
    pub verbose: bool,
}

impl ConvertOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable verbose diagnostics.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Result of converting one document.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The converted document text.
    pub text: String,

    /// Diagnostics accumulated during this conversion, in order.
    pub warnings: Vec<ConversionWarning>,
}

/// The conversion orchestrator.
///
/// Holds the configuration and the compiled pipeline stages; one
/// instance can convert any number of documents, each conversion fully
/// independent of the others.
pub struct Converter {
    options: ConvertOptions,
    math: MathNormalizer,
    lines: LinePass,
}

impl Converter {
    /// Create a converter with default options.
    pub fn new() -> Self {
        Self::with_options(ConvertOptions::default())
    }

    /// Create a converter with the given options.
    pub fn with_options(options: ConvertOptions) -> Self {
        Self {
            options,
            math: MathNormalizer::new(),
            lines: LinePass::new(),
        }
    }

    /// Enable verbose diagnostics.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.options.verbose = verbose;
        self
    }

    /// Convert one document.
    ///
    /// Total for any input string: malformed constructs degrade to a
    /// passthrough of the original text plus a diagnostic, never an
    /// error. `source` labels the diagnostics (usually the file path).
    pub fn convert(&self, text: &str, source: &str) -> Conversion {
        let mut log = WarningLog::new();

        let normalized = self
            .math
            .normalize(text, source, self.options.verbose, &mut log);
        let converted = self
            .lines
            .run(&normalized, source, self.options.verbose, &mut log);

        log::debug!(
            "converted {} ({} bytes in, {} bytes out, {} diagnostics)",
            source,
            text.len(),
            converted.len(),
            log.len()
        );

        Conversion {
            text: converted,
            warnings: log.into_entries(),
        }
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_on_plain_text() {
        let input = "Just a paragraph.\n\nAnother one.";
        let result = Converter::new().convert(input, "test.md");
        assert_eq!(result.text, input);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_passes_run_in_order() {
        // The math pass produces the inline span the table pass then
        // recognizes inside a cell.
        let input = "| F |\n| - |\n| $x^2$ |";
        let result = Converter::new().convert(input, "test.md");
        assert!(result.text.contains("x^2 \\\\\\\\"));
        assert!(!result.text.contains("$${x^2}$$"));
    }

    #[test]
    fn test_verbose_gates_info_diagnostics() {
        let input = "# Title";
        let quiet = Converter::new().convert(input, "test.md");
        assert!(quiet.warnings.is_empty());

        let verbose = Converter::new().verbose(true).convert(input, "test.md");
        assert_eq!(verbose.warnings.len(), 1);
    }

    #[test]
    fn test_options_builder() {
        let options = ConvertOptions::new().with_verbose(true);
        assert!(options.verbose);
    }
}
