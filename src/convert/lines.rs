//! Line-level structural remapping.
//!
//! A single forward pass over the document: the leading YAML front
//! matter is dropped, table runs are handed to the array renderer, and
//! every other line goes through heading remap, HTML tag stripping and
//! footnote detection in that order.

use regex::Regex;

use crate::model::{ConversionWarning, WarningLog};

use super::table::TableRenderer;

/// The forward line pass.
pub struct LinePass {
    h1: Regex,
    deep_heading: Regex,
    comment: Regex,
    tag: Regex,
    footnote: Regex,
    tables: TableRenderer,
}

impl LinePass {
    /// Create a pass with its patterns compiled.
    pub fn new() -> Self {
        Self {
            h1: Regex::new(r"^# [^#]").unwrap(),
            deep_heading: Regex::new(r"^(#{4,})\s+(.+)$").unwrap(),
            comment: Regex::new(r"<!--.*?-->").unwrap(),
            tag: Regex::new(r"<[^>]+>").unwrap(),
            footnote: Regex::new(r"\[\^.+?\]").unwrap(),
            tables: TableRenderer::new(),
        }
    }

    /// Run the pass over the whole document text.
    pub fn run(&self, text: &str, source: &str, verbose: bool, log: &mut WarningLog) -> String {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut out: Vec<String> = Vec::with_capacity(lines.len());
        let mut i = 0;

        while i < lines.len() {
            if i == 0 && lines[0].trim() == "---" {
                i = self.skip_front_matter(&lines, source, log);
                continue;
            }

            if is_table_candidate(lines[i]) {
                let start = i;
                while i < lines.len() && is_table_candidate(lines[i]) {
                    i += 1;
                }
                let run: Vec<String> = lines[start..i].iter().map(|s| s.to_string()).collect();
                out.push(self.tables.render(&run, source, (start + 1) as u32, log));
                continue;
            }

            let line = self.remap_heading(lines[i], source, verbose, log);
            let line = self.strip_tags(&line, source, (i + 1) as u32, log);
            self.check_footnote(&line, source, (i + 1) as u32, log);
            out.push(line);
            i += 1;
        }

        out.join("\n")
    }

    /// Skip a leading YAML front-matter block and return the resume index.
    ///
    /// When the closing delimiter is never found, only the opening line
    /// is consumed so the rest of the document survives.
    fn skip_front_matter(&self, lines: &[&str], source: &str, log: &mut WarningLog) -> usize {
        for (i, line) in lines.iter().enumerate().skip(1) {
            if line.trim() == "---" {
                log.record(ConversionWarning::info(
                    source,
                    1,
                    "Removed YAML front matter",
                ));
                return i + 1;
            }
        }
        1
    }

    /// Compress heading depth to the range note supports.
    ///
    /// H1 becomes H2 (note's own title occupies H1) and H4 or deeper
    /// collapses to H3. H2 and H3 pass through untouched, which keeps
    /// the remap idempotent.
    fn remap_heading(&self, line: &str, source: &str, verbose: bool, log: &mut WarningLog) -> String {
        if self.h1.is_match(line) {
            if verbose {
                log.record(ConversionWarning::info(source, 0, "Converted H1 to H2"));
            }
            return format!("#{}", line);
        }

        if let Some(caps) = self.deep_heading.captures(line) {
            if verbose {
                log.record(ConversionWarning::info(
                    source,
                    0,
                    format!("Converted H{} to H3", caps[1].len()),
                ));
            }
            return format!("### {}", &caps[2]);
        }

        line.to_string()
    }

    /// Delete HTML comments and strip remaining tag markup.
    ///
    /// Comments vanish silently; any other tag produces one warning per
    /// line, with the enclosed text preserved.
    fn strip_tags(&self, line: &str, source: &str, line_num: u32, log: &mut WarningLog) -> String {
        if !(line.contains('<') && line.contains('>')) {
            return line.to_string();
        }

        let mut line = line.to_string();
        if line.contains("<!--") {
            line = self.comment.replace_all(&line, "").into_owned();
        }

        if self.tag.is_match(&line) {
            log.record(ConversionWarning::warning(
                source,
                line_num,
                "Found HTML tag markup (unsupported on note)",
            ));
            line = self.tag.replace_all(&line, "").into_owned();
        }

        line
    }

    /// Flag footnote references; the line itself is never modified.
    fn check_footnote(&self, line: &str, source: &str, line_num: u32, log: &mut WarningLog) {
        if self.footnote.is_match(line) {
            log.record(ConversionWarning::warning(
                source,
                line_num,
                "Found footnote syntax (unsupported on note, inline it manually)",
            ));
        }
    }
}

impl Default for LinePass {
    fn default() -> Self {
        Self::new()
    }
}

/// Table detection rule: non-empty after trimming, and either starting
/// with a pipe or containing at least two pipes.
pub fn is_table_candidate(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && (trimmed.starts_with('|') || trimmed.matches('|').count() >= 2)
}
