//! Document and cursor model shared by the QuillPad editor crates.
//!
//! A document is an ordered sequence of blocks (lines) addressed by
//! absolute character offsets; cursors are `(anchor, position)` offset
//! pairs. The block structure is what the search engine walks, so the
//! invariants live here: blocks never contain `\n` and each block
//! separator counts as exactly one character position.

pub mod casing;
mod cursor;
mod document;
pub mod offsets;
pub mod words;

pub use cursor::Cursor;
pub use document::{Document, DocumentError};
