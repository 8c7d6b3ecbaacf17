//! Typed cell-content fragments.

/// One piece of a table cell after cleaning.
///
/// note.com renders tables as a LaTeX `array`, so every cell ends up
/// inside math mode. Prose has to be wrapped in `\text{}` while math
/// spans go in bare. A cell that mixes both becomes an ordered sequence
/// of fragments, joined with single spaces when rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// A math expression, stored without its `$${...}$$` wrapper.
    Math(String),
    /// Plain prose, rendered inside `\text{}`.
    Text(String),
}

impl Fragment {
    /// Render the fragment for use inside a math array cell.
    pub fn render(&self) -> String {
        match self {
            Fragment::Math(expr) => expr.clone(),
            Fragment::Text(text) => {
                if text.starts_with("\\text{") {
                    text.clone()
                } else {
                    format!("\\text{{{}}}", text)
                }
            }
        }
    }
}

/// Join a fragment sequence with single spaces.
pub fn render_fragments(fragments: &[Fragment]) -> String {
    fragments
        .iter()
        .map(Fragment::render)
        .collect::<Vec<_>>()
        .join(" ")
}
