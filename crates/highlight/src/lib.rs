//! Viewport highlighting for the QuillPad editor.
//!
//! Search-occurrence highlighting re-runs the matcher over the currently
//! visible slice of the document (plus a small overscan margin) and
//! produces an ordered list of decorations for the display layer. The list
//! is rebuilt from scratch on every trigger; nothing here patches a
//! previous result.

mod decoration;
mod viewport;

pub use decoration::{merge_layers, Decoration, StyleTag};
pub use viewport::{collect_matches, Viewport};
