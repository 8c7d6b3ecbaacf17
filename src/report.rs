//! Grouped diagnostic report.

use crate::model::{ConversionWarning, Severity};

/// Entries shown per severity group; everything is retained internally,
/// the cap only limits display.
pub const DISPLAY_CAP: usize = 10;

/// Diagnostics grouped by severity for presentation.
///
/// Groups keep recording order, so the cap always shows the earliest
/// entries.
pub struct Report<'a> {
    errors: Vec<&'a ConversionWarning>,
    warnings: Vec<&'a ConversionWarning>,
    infos: Vec<&'a ConversionWarning>,
}

impl<'a> Report<'a> {
    /// Group a warning sequence by severity.
    pub fn new(entries: &'a [ConversionWarning]) -> Self {
        let mut report = Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            infos: Vec::new(),
        };
        for entry in entries {
            match entry.severity {
                Severity::Error => report.errors.push(entry),
                Severity::Warning => report.warnings.push(entry),
                Severity::Info => report.infos.push(entry),
            }
        }
        report
    }

    /// Error-severity entries in recording order.
    pub fn errors(&self) -> &[&'a ConversionWarning] {
        &self.errors
    }

    /// Warning-severity entries in recording order.
    pub fn warnings(&self) -> &[&'a ConversionWarning] {
        &self.warnings
    }

    /// Info-severity entries in recording order.
    pub fn infos(&self) -> &[&'a ConversionWarning] {
        &self.infos
    }

    /// Check whether there is nothing to report at all.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty() && self.infos.is_empty()
    }

    /// Format the report as plain text.
    ///
    /// Errors first, then warnings, then info; the info group only
    /// appears in verbose mode. Each group shows at most
    /// [`DISPLAY_CAP`] entries. Returns `None` when no group would be
    /// shown.
    pub fn format(&self, verbose: bool) -> Option<String> {
        let show_infos = verbose && !self.infos.is_empty();
        if self.errors.is_empty() && self.warnings.is_empty() && !show_infos {
            return None;
        }

        let mut out = String::from("=== Conversion report ===\n");

        if !self.errors.is_empty() {
            out.push_str(&format_group("Errors", &self.errors));
        }
        if !self.warnings.is_empty() {
            out.push_str(&format_group("Warnings", &self.warnings));
        }
        if show_infos {
            out.push_str(&format_group("Info", &self.infos));
        }

        Some(out)
    }
}

fn format_group(title: &str, entries: &[&ConversionWarning]) -> String {
    let mut out = format!("\n{} ({}):\n", title, entries.len());
    for entry in entries.iter().take(DISPLAY_CAP) {
        out.push_str(&format!(
            "  {}:{} - {}\n",
            entry.file, entry.line, entry.message
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(n: usize) -> ConversionWarning {
        ConversionWarning::warning("doc.md", n as u32, format!("warning {}", n))
    }

    #[test]
    fn test_empty_report_formats_to_none() {
        let report = Report::new(&[]);
        assert!(report.format(true).is_none());
    }

    #[test]
    fn test_info_hidden_unless_verbose() {
        let entries = vec![ConversionWarning::info("doc.md", 0, "note")];
        let report = Report::new(&entries);
        assert!(report.format(false).is_none());
        assert!(report.format(true).unwrap().contains("Info (1):"));
    }

    #[test]
    fn test_groups_ordered_errors_first() {
        let entries = vec![
            ConversionWarning::info("doc.md", 0, "i"),
            ConversionWarning::warning("doc.md", 2, "w"),
            ConversionWarning::error("doc.md", 3, "e"),
        ];
        let text = Report::new(&entries).format(true).unwrap();
        let errors_at = text.find("Errors").unwrap();
        let warnings_at = text.find("Warnings").unwrap();
        let info_at = text.find("Info").unwrap();
        assert!(errors_at < warnings_at && warnings_at < info_at);
    }

    #[test]
    fn test_display_cap_shows_earliest_ten() {
        let entries: Vec<_> = (1..=15).map(warning).collect();
        let report = Report::new(&entries);
        assert_eq!(report.warnings().len(), 15);

        let text = report.format(false).unwrap();
        assert!(text.contains("Warnings (15):"));
        assert!(text.contains("warning 10"));
        assert!(!text.contains("warning 11"));
    }
}
