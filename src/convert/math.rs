//! Math notation normalization.
//!
//! note.com accepts exactly one spelling per math context: display math
//! as a `$$` fenced block and inline math as `$${...}$$`. This pass
//! rewrites the common source spellings (`\[...\]`, `\(...\)`,
//! `` $`...`$ `` and single-dollar spans) into those canonical forms,
//! then repairs display blocks whose continuation lines start with a
//! bare operator, which note renders as broken fragments.

use regex::{Captures, Regex};

use crate::model::{ConversionWarning, WarningLog};

/// Whole-document math rewriting pass.
///
/// The four delimiter rules run in a fixed order over the full text; a
/// later rule never re-matches output of an earlier one (the canonical
/// inline form always has a `$` adjacent to every `$`, which the
/// single-dollar rule excludes). The operator-line repair runs last,
/// scoped to each display block independently.
pub struct MathNormalizer {
    display_brackets: Regex,
    inline_parens: Regex,
    inline_backticks: Regex,
    display_block: Regex,
    operator_only: Regex,
    named_operator_only: Regex,
    leading_operator: Regex,
}

impl MathNormalizer {
    /// Create a normalizer with its patterns compiled.
    pub fn new() -> Self {
        Self {
            display_brackets: Regex::new(r"(?s)\\\[\s*(.*?)\s*\\\]").unwrap(),
            inline_parens: Regex::new(r"(?s)\\\(\s*(.*?)\s*\\\)").unwrap(),
            inline_backticks: Regex::new(r"\$`([^`]+?)`\$").unwrap(),
            display_block: Regex::new(r"(?s)\$\$\s*\n?(.*?)\n?\s*\$\$").unwrap(),
            operator_only: Regex::new(r"^\s*[=≈≃+\-]\s*$").unwrap(),
            named_operator_only: Regex::new(r"^\s*\\(simeq|approx|equiv|leq|geq|neq|le|ge|ne)\s*$")
                .unwrap(),
            leading_operator: Regex::new(r"^\s*[+\-]\s+\S").unwrap(),
        }
    }

    /// Rewrite all recognized math spellings in `text` into canonical form.
    ///
    /// Records one document-wide info diagnostic when verbose mode is on
    /// and any rule changed the text.
    pub fn normalize(&self, text: &str, source: &str, verbose: bool, log: &mut WarningLog) -> String {
        let mut content = self
            .display_brackets
            .replace_all(text, |caps: &Captures| {
                format!("$$\n{}\n$$", caps[1].trim())
            })
            .into_owned();

        content = self
            .inline_parens
            .replace_all(&content, |caps: &Captures| inline_form(&caps[1]))
            .into_owned();

        content = self
            .inline_backticks
            .replace_all(&content, |caps: &Captures| inline_form(&caps[1]))
            .into_owned();

        content = single_dollar_spans(&content);

        content = self
            .display_block
            .replace_all(&content, |caps: &Captures| {
                self.join_operator_lines(&caps[0])
            })
            .into_owned();

        if verbose && content != text {
            log.record(ConversionWarning::info(
                source,
                0,
                "Converted math notation to note format",
            ));
        }

        content
    }

    /// Merge operator-only continuation lines onto the preceding line.
    ///
    /// Applied to one display block at a time (delimiters included). A
    /// line holding nothing but `=`, `≈`, `≃`, `+`, `-` or a named
    /// relational operator is appended to the previous line; so is a
    /// line that starts with `+`/`-` followed by content, provided the
    /// previous line is not blank.
    fn join_operator_lines(&self, block: &str) -> String {
        let lines: Vec<&str> = block.split('\n').collect();
        let mut fixed: Vec<String> = Vec::with_capacity(lines.len());
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];
            if i + 1 < lines.len() {
                let next = lines[i + 1].trim();
                let operator_only =
                    self.operator_only.is_match(next) || self.named_operator_only.is_match(next);
                let starts_with_operator = self.leading_operator.is_match(next);

                if operator_only || (starts_with_operator && !line.trim().is_empty()) {
                    fixed.push(format!("{} {}", line.trim_end(), next));
                    i += 2;
                    continue;
                }
            }
            fixed.push(line.to_string());
            i += 1;
        }

        fixed.join("\n")
    }
}

impl Default for MathNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonical inline form: `$${<trimmed content>}$$` on one line.
fn inline_form(inner: &str) -> String {
    let joined = inner
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ");
    format!("$${{{}}}$$", joined.trim())
}

/// Rewrite single-dollar spans (`$...$`) into the canonical inline form.
///
/// A span only matches when neither delimiter has another `$` adjacent
/// to it and the content holds no `$` or newline, so already-canonical
/// `$${...}$$` spans are never re-wrapped and the pass is idempotent.
///
/// Known limitation: two unrelated dollar signs on one line (currency
/// markers, say) are indistinguishable from a genuine math span when the
/// text between them happens to satisfy the match condition. This
/// mirrors the documented heuristic rather than inventing a
/// disambiguation.
///
/// Hand-rolled because the `regex` crate has no lookaround to express
/// the adjacency exclusion.
fn single_dollar_spans(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len() + 16);
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            let start = i;
            while i < bytes.len() && bytes[i] != b'$' {
                i += 1;
            }
            out.push_str(&text[start..i]);
            continue;
        }

        let prev_is_dollar = i > 0 && bytes[i - 1] == b'$';
        let next_is_dollar = i + 1 < bytes.len() && bytes[i + 1] == b'$';

        if !prev_is_dollar && !next_is_dollar {
            let mut j = i + 1;
            while j < bytes.len() && bytes[j] != b'$' && bytes[j] != b'\n' {
                j += 1;
            }
            let closed = j < bytes.len()
                && bytes[j] == b'$'
                && j > i + 1
                && (j + 1 >= bytes.len() || bytes[j + 1] != b'$');
            if closed {
                out.push_str("$${");
                out.push_str(text[i + 1..j].trim());
                out.push_str("}$$");
                i = j + 1;
                continue;
            }
        }

        out.push('$');
        i += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(text: &str) -> String {
        let mut log = WarningLog::new();
        MathNormalizer::new().normalize(text, "test.md", false, &mut log)
    }

    #[test]
    fn test_display_brackets() {
        assert_eq!(normalize(r"\[ E = mc^2 \]"), "$$\nE = mc^2\n$$");
    }

    #[test]
    fn test_display_brackets_multiline() {
        let input = "\\[\n  E = mc^2\n\\]";
        assert_eq!(normalize(input), "$$\nE = mc^2\n$$");
    }

    #[test]
    fn test_inline_parens() {
        assert_eq!(normalize(r"text \( x + y \) text"), "text $${x + y}$$ text");
    }

    #[test]
    fn test_inline_backticks() {
        assert_eq!(normalize("value $`a_n`$ here"), "value $${a_n}$$ here");
    }

    #[test]
    fn test_single_dollar() {
        assert_eq!(normalize("This is $x^2$ inline."), "This is $${x^2}$$ inline.");
    }

    #[test]
    fn test_single_dollar_not_across_lines() {
        let input = "price $5\nand $6 more";
        assert_eq!(normalize(input), input);
    }

    #[test]
    fn test_existing_display_block_untouched() {
        let input = "$$\nE = mc^2\n$$";
        assert_eq!(normalize(input), input);
    }

    #[test]
    fn test_idempotent_on_canonical_inline() {
        let once = normalize("value $x$ here");
        assert_eq!(once, "value $${x}$$ here");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_all_inline_forms_agree() {
        let expected = "$${x^2}$$";
        assert_eq!(normalize(r"\(x^2\)"), expected);
        assert_eq!(normalize("$`x^2`$"), expected);
        assert_eq!(normalize("$x^2$"), expected);
    }

    #[test]
    fn test_operator_only_line_merged() {
        let input = "$$\nE\n=\nmc^2\n$$";
        assert_eq!(normalize(input), "$$\nE =\nmc^2\n$$");
    }

    #[test]
    fn test_named_operator_line_merged() {
        let input = "$$\na\n\\simeq\nb\n$$";
        assert_eq!(normalize(input), "$$\na \\simeq\nb\n$$");
    }

    #[test]
    fn test_leading_operator_line_merged() {
        let input = "$$\nM_total\n+ M_info\n$$";
        assert_eq!(normalize(input), "$$\nM_total + M_info\n$$");
    }

    #[test]
    fn test_verbose_records_document_wide_info() {
        let mut log = WarningLog::new();
        let normalizer = MathNormalizer::new();
        normalizer.normalize("a $x$ b", "doc.md", true, &mut log);
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].line, 0);
    }

    #[test]
    fn test_no_diagnostic_when_unchanged() {
        let mut log = WarningLog::new();
        MathNormalizer::new().normalize("plain text", "doc.md", true, &mut log);
        assert!(log.is_empty());
    }
}
