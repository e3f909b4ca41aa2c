//! Search engine used by the QuillPad editor.
//!
//! The matcher locates the next or previous occurrence of a query within a
//! block-structured document, covering plain single-line patterns,
//! patterns with embedded newlines that span blocks, and regular
//! expressions, in both directions. Bounded variants let the viewport
//! highlighter stop scanning at the visible edge, and [`SearchHistory`]
//! keeps the bounded pattern history shared by every window of a session.

mod history;
mod matcher;
mod options;

pub use history::SearchHistory;
pub use matcher::DocumentSearcher;
pub use options::{SearchDirection, SearchError, SearchMode, SearchOptions};
