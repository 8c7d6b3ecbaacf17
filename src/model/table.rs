//! Table block model.

use serde::{Deserialize, Serialize};

/// Column alignment inferred from a table separator row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
}

impl Alignment {
    /// LaTeX array column letter for this alignment.
    pub fn letter(self) -> char {
        match self {
            Alignment::Left => 'l',
            Alignment::Center => 'c',
            Alignment::Right => 'r',
        }
    }

    /// Infer an alignment from one separator-row cell (`:---:`, `---:`, `---`).
    pub fn from_separator_cell(cell: &str) -> Self {
        let cell = cell.trim();
        if cell.starts_with(':') && cell.ends_with(':') {
            Alignment::Center
        } else if cell.ends_with(':') {
            Alignment::Right
        } else {
            Alignment::Left
        }
    }
}

/// A contiguous run of pipe-delimited lines parsed into a table.
///
/// Built transiently while scanning; the column count is fixed by the
/// header, and every data row is padded with empty cells or truncated
/// to match, so downstream rendering never sees a ragged row.
#[derive(Debug, Clone)]
pub struct TableBlock {
    /// Header row cells
    pub header: Vec<String>,

    /// Per-column alignment, exactly one entry per header cell
    pub alignments: Vec<Alignment>,

    /// Data rows, each exactly as wide as the header
    pub rows: Vec<Vec<String>>,
}

impl TableBlock {
    /// Parse a table block from its raw lines.
    ///
    /// Returns `None` when the block has fewer than two lines, which
    /// cannot form a valid table. A separator row is only consumed when
    /// the second line contains nothing but alignment syntax; otherwise
    /// every line after the header is treated as data and all columns
    /// default to left alignment.
    pub fn parse(lines: &[String]) -> Option<Self> {
        if lines.len() < 2 {
            return None;
        }

        let header = split_row(&lines[0]);
        let columns = header.len();

        let separator_cells = split_row(&lines[1]);
        let has_separator = !separator_cells.is_empty()
            && separator_cells.iter().all(|c| is_separator_cell(c));

        let (mut alignments, data_start) = if has_separator {
            let alignments = separator_cells
                .iter()
                .map(|c| Alignment::from_separator_cell(c))
                .collect::<Vec<_>>();
            (alignments, 2)
        } else {
            (vec![Alignment::Left; columns], 1)
        };

        alignments.resize(columns, Alignment::Left);

        let rows = lines[data_start..]
            .iter()
            .map(|line| {
                let mut cells = split_row(line);
                cells.resize(columns, String::new());
                cells
            })
            .collect();

        Some(Self {
            header,
            alignments,
            rows,
        })
    }

    /// Number of columns, fixed by the header.
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// LaTeX column specification letters, e.g. `lcr`.
    pub fn column_spec(&self) -> String {
        self.alignments.iter().map(|a| a.letter()).collect()
    }
}

/// Split one pipe-delimited table row into trimmed cells.
///
/// One optional leading and one optional trailing pipe are stripped
/// before splitting on interior pipes.
pub fn split_row(line: &str) -> Vec<String> {
    let mut s = line.trim();
    if let Some(stripped) = s.strip_prefix('|') {
        s = stripped;
    }
    if let Some(stripped) = s.strip_suffix('|') {
        s = stripped;
    }
    s.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// Check whether a cell contains only alignment syntax (`:?-+:?`).
fn is_separator_cell(cell: &str) -> bool {
    let cell = cell.trim();
    let body = cell.strip_prefix(':').unwrap_or(cell);
    let body = body.strip_suffix(':').unwrap_or(body);
    !body.is_empty() && body.chars().all(|c| c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_row() {
        assert_eq!(split_row("| a | b | c |"), vec!["a", "b", "c"]);
        assert_eq!(split_row("a | b"), vec!["a", "b"]);
        assert_eq!(split_row("| a "), vec!["a"]);
    }

    #[test]
    fn test_alignment_from_separator() {
        assert_eq!(Alignment::from_separator_cell(":--:"), Alignment::Center);
        assert_eq!(Alignment::from_separator_cell("--:"), Alignment::Right);
        assert_eq!(Alignment::from_separator_cell("---"), Alignment::Left);
        assert_eq!(Alignment::from_separator_cell(":--"), Alignment::Left);
    }

    #[test]
    fn test_parse_with_separator() {
        let lines: Vec<String> = ["| A | B |", "| :-: | --: |", "| 1 | 2 |"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let block = TableBlock::parse(&lines).unwrap();
        assert_eq!(block.header, vec!["A", "B"]);
        assert_eq!(block.column_spec(), "cr");
        assert_eq!(block.rows, vec![vec!["1".to_string(), "2".to_string()]]);
    }

    #[test]
    fn test_parse_without_separator() {
        let lines: Vec<String> = ["| A | B |", "| 1 | 2 |"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let block = TableBlock::parse(&lines).unwrap();
        assert_eq!(block.column_spec(), "ll");
        assert_eq!(block.rows.len(), 1);
    }

    #[test]
    fn test_parse_pads_and_truncates_rows() {
        let lines: Vec<String> = ["| A | B | C |", "| - | - | - |", "| 1 |", "| 1 | 2 | 3 | 4 |"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let block = TableBlock::parse(&lines).unwrap();
        assert_eq!(block.rows[0], vec!["1", "", ""]);
        assert_eq!(block.rows[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn test_parse_short_block_rejected() {
        let lines = vec!["| only |".to_string()];
        assert!(TableBlock::parse(&lines).is_none());
    }

    #[test]
    fn test_alignment_padding_to_header_width() {
        let lines: Vec<String> = ["| A | B | C |", "| :-: |", "| 1 | 2 | 3 |"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let block = TableBlock::parse(&lines).unwrap();
        assert_eq!(block.column_spec(), "cll");
    }
}
