use quillpad_search::{DocumentSearcher, SearchMode, SearchOptions};
use quillpad_text::{casing, Cursor, Document};

/// The visible slice of the document, as absolute character offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub start: usize,
    pub end: usize,
}

impl Viewport {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// A viewport covering the whole document.
    pub fn full(doc: &Document) -> Self {
        Self {
            start: 0,
            end: doc.len(),
        }
    }

    /// Widens the range by the pattern's character count on both sides so
    /// matches straddling the viewport edges are still found. A regex has
    /// no fixed width, so in regex mode the range is only clamped.
    pub fn padded(&self, options: &SearchOptions, doc: &Document) -> Self {
        let margin = match options.mode {
            SearchMode::Plain => options.pattern.chars().count(),
            SearchMode::Regex => 0,
        };
        Self {
            start: self.start.saturating_sub(margin),
            end: self.end.saturating_add(margin).min(doc.len()),
        }
    }
}

/// Collects every match of the active search inside `viewport`, in
/// document order. Callers pass the already padded range.
///
/// For a plain pattern, one case-respecting containment check over the
/// extracted window runs first; when the term is plainly absent the
/// per-occurrence scan is skipped entirely. This is the one performance
/// guard in the subsystem: it keeps keystroke and scroll refreshes cheap
/// on windows that do not show the term at all.
pub fn collect_matches(
    doc: &Document,
    options: &SearchOptions,
    viewport: Viewport,
) -> Vec<Cursor> {
    if options.pattern.is_empty() || viewport.start >= viewport.end {
        return Vec::new();
    }
    if matches!(options.mode, SearchMode::Plain) {
        let window = doc.text_between(viewport.start, viewport.end);
        if !casing::contains(&window, &options.pattern, options.case_sensitive) {
            return Vec::new();
        }
    }
    DocumentSearcher::new(doc).find_all_bounded(options, viewport.start..viewport.end)
}
