//! Data model for document conversion.
//!
//! These types carry no transformation logic of their own: warnings are
//! an append-only side channel, and a `TableBlock` is a transient parse
//! of one pipe-delimited run that never outlives its conversion.

mod fragment;
mod table;
mod warning;

pub use fragment::{render_fragments, Fragment};
pub use table::{split_row, Alignment, TableBlock};
pub use warning::{ConversionWarning, Severity, WarningLog};
