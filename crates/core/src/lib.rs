//! Editor view state and the find/replace entry points for QuillPad.
//!
//! [`EditorView`] ties the document, caret, viewport geometry, active
//! search, and decoration list together; its methods are what toolbar
//! buttons and Enter keystrokes call into.

pub mod view;

pub use view::EditorView;
