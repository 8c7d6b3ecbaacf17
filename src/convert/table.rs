//! Table-to-math-array conversion.
//!
//! note.com has no table renderer at all, so a Markdown table becomes a
//! KaTeX `array` environment inside a display-math block: vertical
//! rules on the outer edges only, the header framed by solid rules and
//! forced line breaks, data rows separated by dashed rules.

use regex::Regex;

use crate::model::{render_fragments, ConversionWarning, Fragment, TableBlock, WarningLog};

/// Forced line break as note's editor expects it.
///
/// Pasting multi-line math into the note editor strips one level of
/// backslash escaping, so emitting `\\` takes four backslashes here.
const ROW_BREAK: &str = "\\\\\\\\";

/// Renders one pipe-delimited run as a LaTeX array.
pub struct TableRenderer {
    bold: Regex,
    bold_underscore: Regex,
    link: Regex,
    math_span: Regex,
}

impl TableRenderer {
    /// Create a renderer with its cell-cleaning patterns compiled.
    pub fn new() -> Self {
        Self {
            bold: Regex::new(r"\*\*(.+?)\*\*").unwrap(),
            bold_underscore: Regex::new(r"__(.+?)__").unwrap(),
            link: Regex::new(r"\[(.+?)\]\(.+?\)").unwrap(),
            math_span: Regex::new(r"\$\$\{(.+?)\}\$\$").unwrap(),
        }
    }

    /// Convert a contiguous table run into a single rendered string.
    ///
    /// A block with fewer than two lines cannot form a table; it is
    /// returned unchanged with a warning so the conversion of the rest
    /// of the document is never at risk.
    pub fn render(
        &self,
        lines: &[String],
        source: &str,
        start_line: u32,
        log: &mut WarningLog,
    ) -> String {
        let Some(block) = TableBlock::parse(lines) else {
            log.record(ConversionWarning::warning(
                source,
                start_line,
                "Malformed table block",
            ));
            return lines.join("\n");
        };

        let mut out: Vec<String> = Vec::with_capacity(block.rows.len() * 2 + 6);
        out.push("$$".to_string());
        out.push(format!(
            "\\begin{{array}}{{|{}|}} \\hline",
            block.column_spec()
        ));

        let header = self.render_row(&block.header);
        out.push(format!("{ROW_BREAK}{header} {ROW_BREAK}"));
        out.push("\\hline \\hline".to_string());

        let row_count = block.rows.len();
        for (i, row) in block.rows.iter().enumerate() {
            out.push(format!("{} {ROW_BREAK}", self.render_row(row)));
            if i == row_count - 1 {
                out.push("\\hline".to_string());
            } else {
                out.push("\\hdashline".to_string());
            }
        }

        out.push("\\end{array}".to_string());
        out.push("$$".to_string());

        log.record(ConversionWarning::info(
            source,
            start_line,
            "Converted table to LaTeX array (column alignment preserved)",
        ));

        out.join("\n")
    }

    fn render_row(&self, cells: &[String]) -> String {
        cells
            .iter()
            .map(|cell| self.clean_cell(cell))
            .collect::<Vec<_>>()
            .join(" & ")
    }

    /// Prepare one cell for use inside the math array.
    ///
    /// Bold markers and link syntax are stripped first; then the cell is
    /// split into math and text fragments so prose ends up inside
    /// `\text{}` while math spans go in bare.
    fn clean_cell(&self, cell: &str) -> String {
        if cell.trim().is_empty() {
            return String::new();
        }

        let cell = self.bold.replace_all(cell, "$1");
        let cell = self.bold_underscore.replace_all(&cell, "$1");
        let cell = self.link.replace_all(&cell, "$1").into_owned();

        if !self.math_span.is_match(&cell) {
            return Fragment::Text(cell.trim().to_string()).render();
        }

        let mut fragments: Vec<Fragment> = Vec::new();
        let mut last_end = 0;
        for caps in self.math_span.captures_iter(&cell) {
            let span = caps.get(0).expect("whole match");
            if span.start() > last_end {
                let text = cell[last_end..span.start()].trim();
                if !text.is_empty() {
                    fragments.push(Fragment::Text(text.to_string()));
                }
            }
            fragments.push(Fragment::Math(caps[1].to_string()));
            last_end = span.end();
        }
        if last_end < cell.len() {
            let text = cell[last_end..].trim();
            if !text.is_empty() {
                fragments.push(Fragment::Text(text.to_string()));
            }
        }

        render_fragments(&fragments)
    }
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}
