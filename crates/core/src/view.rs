use quillpad_highlight::{collect_matches, merge_layers, Decoration, Viewport};
use quillpad_search::{DocumentSearcher, SearchDirection, SearchHistory, SearchOptions};
use quillpad_text::{Cursor, Document};

/// The state one text widget exposes to the search subsystem: document,
/// caret, visible range, the active search, and the decoration list that
/// gets pushed to the display layer.
///
/// Everything runs synchronously on the caller's thread. The only hazard
/// is a rehighlight triggered while a scan is already collecting; a guard
/// flag turns such nested calls into no-ops.
pub struct EditorView {
    doc: Document,
    cursor: Cursor,
    viewport: Viewport,
    search: Option<SearchOptions>,
    highlight_current_line: bool,
    replacement_spans: Vec<Cursor>,
    blue_layer: Vec<Cursor>,
    red_layer: Vec<Cursor>,
    decorations: Vec<Decoration>,
    rehighlighting: bool,
}

impl EditorView {
    pub fn new(doc: Document) -> Self {
        let viewport = Viewport::full(&doc);
        let mut view = Self {
            doc,
            cursor: Cursor::collapsed(0),
            viewport,
            search: None,
            highlight_current_line: false,
            replacement_spans: Vec::new(),
            blue_layer: Vec::new(),
            red_layer: Vec::new(),
            decorations: Vec::new(),
            rehighlighting: false,
        };
        view.rehighlight();
        view
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// The decoration list as of the last rehighlight, in paint order.
    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    pub fn active_search(&self) -> Option<&SearchOptions> {
        self.search.as_ref()
    }

    /// Spans replaced by the most recent replace operation, in document
    /// order.
    pub fn replacement_spans(&self) -> &[Cursor] {
        &self.replacement_spans
    }

    pub fn set_cursor(&mut self, cursor: Cursor) {
        debug_assert!(cursor.selection_end() <= self.doc.len());
        self.cursor = cursor;
        self.rehighlight();
    }

    /// Replaces the visible range; the display layer calls this on every
    /// scroll or resize.
    pub fn set_viewport(&mut self, start: usize, end: usize) {
        let len = self.doc.len();
        self.viewport = Viewport::new(start.min(len), end.min(len));
        self.rehighlight();
    }

    pub fn set_highlight_current_line(&mut self, enabled: bool) {
        self.highlight_current_line = enabled;
        self.rehighlight();
    }

    /// Externally owned decoration layers, painted above search matches.
    pub fn set_selection_layers(&mut self, blue: Vec<Cursor>, red: Vec<Cursor>) {
        self.blue_layer = blue;
        self.red_layer = red;
        self.rehighlight();
    }

    /// Replaces the whole document, resetting the viewport to cover it.
    pub fn set_text(&mut self, text: &str) {
        self.doc = Document::from_text(text);
        self.viewport = Viewport::full(&self.doc);
        if self.cursor.selection_end() > self.doc.len() {
            self.cursor = Cursor::collapsed(self.doc.len());
        }
        self.replacement_spans.clear();
        self.rehighlight();
    }

    /// Applies a single edit, as the editing surface does on a keystroke
    /// or paste.
    pub fn replace_range(&mut self, start: usize, end: usize, text: &str) {
        self.doc.replace_range(start, end, text);
        self.clamp_to_document();
        self.rehighlight();
    }

    /// Activates a search, recording the pattern in the shared history.
    pub fn start_search(&mut self, options: SearchOptions, history: &mut SearchHistory) {
        history.record(&options.pattern);
        self.search = Some(options);
        self.replacement_spans.clear();
        self.rehighlight();
    }

    pub fn clear_search(&mut self) {
        self.search = None;
        self.replacement_spans.clear();
        self.rehighlight();
    }

    /// Rebuilds the decoration list from scratch: pads the viewport,
    /// collects the visible matches, and merges every layer in priority
    /// order in one assignment. Idempotent, and safe to call from any
    /// trigger; a nested call while a scan is running returns immediately.
    pub fn rehighlight(&mut self) {
        if self.rehighlighting {
            return;
        }
        self.rehighlighting = true;
        let matches = match &self.search {
            Some(options) if !options.pattern.is_empty() => {
                let padded = self.viewport.padded(options, &self.doc);
                collect_matches(&self.doc, options, padded)
            }
            _ => Vec::new(),
        };
        self.decorations = merge_layers(
            self.current_line_span(),
            &self.replacement_spans,
            &matches,
            &self.blue_layer,
            &self.red_layer,
        );
        self.rehighlighting = false;
    }

    /// Jumps to the next (or previous) occurrence of the active search.
    ///
    /// A miss retries once from the document edge, so the search wraps
    /// around exactly once and then gives up. The selection is only
    /// touched when a match is found; the highlight refresh runs either
    /// way.
    pub fn find_next(&mut self, forward: bool) -> bool {
        let Some(mut options) = self.search.clone() else {
            return false;
        };
        options.direction = if forward {
            SearchDirection::Forward
        } else {
            SearchDirection::Backward
        };
        let found = {
            let searcher = DocumentSearcher::new(&self.doc);
            searcher.find(&options, self.cursor).or_else(|| {
                let edge = if forward {
                    Cursor::collapsed(0)
                } else {
                    Cursor::collapsed(self.doc.len())
                };
                searcher.find(&options, edge)
            })
        };
        if let Some(m) = found {
            // The caret lands on the near edge of the match: after it when
            // moving forward, before it when moving backward.
            self.cursor = if forward {
                Cursor::new(m.selection_start(), m.selection_end())
            } else {
                Cursor::new(m.selection_end(), m.selection_start())
            };
        }
        self.rehighlight();
        found.is_some()
    }

    /// Replaces the current selection when it spans a live match, records
    /// the new text in the replacement layer, and advances to the next
    /// occurrence. Returns whether a replacement happened; a cursor not
    /// sitting on a match only advances.
    pub fn replace_current(&mut self, replacement: &str) -> bool {
        let Some(options) = self.search.clone() else {
            return false;
        };
        if !self.cursor.has_selection() {
            self.find_next(!matches!(options.direction, SearchDirection::Backward));
            return false;
        }
        let selection = self.cursor;
        let confirmed = {
            let mut forward = options;
            forward.direction = SearchDirection::Forward;
            DocumentSearcher::new(&self.doc)
                .find(&forward, Cursor::collapsed(selection.selection_start()))
                .map_or(false, |m| {
                    m.selection_start() == selection.selection_start()
                        && m.selection_end() == selection.selection_end()
                })
        };
        if !confirmed {
            self.find_next(true);
            return false;
        }
        let start = selection.selection_start();
        self.doc
            .replace_range(start, selection.selection_end(), replacement);
        let end = start + replacement.chars().count();
        self.replacement_spans.push(Cursor::spanning(start, end));
        self.cursor = Cursor::collapsed(end);
        self.clamp_to_document();
        self.find_next(true);
        true
    }

    /// Replaces every occurrence in the document, collecting each replaced
    /// span for the replacement decoration layer. Returns the number of
    /// replacements performed.
    pub fn replace_all(&mut self, replacement: &str) -> usize {
        let Some(options) = self.search.clone() else {
            return 0;
        };
        let mut forward = options;
        forward.direction = SearchDirection::Forward;
        let replacement_len = replacement.chars().count();
        self.replacement_spans.clear();
        let mut from = 0usize;
        let mut count = 0usize;
        loop {
            let found = DocumentSearcher::new(&self.doc).find(&forward, Cursor::collapsed(from));
            let Some(m) = found else {
                break;
            };
            let start = m.selection_start();
            self.doc
                .replace_range(start, m.selection_end(), replacement);
            self.replacement_spans
                .push(Cursor::spanning(start, start + replacement_len));
            // An empty replacement shrinks the document, so rescanning the
            // same offset still terminates.
            from = if replacement_len == 0 {
                start
            } else {
                start + replacement_len
            };
            count += 1;
        }
        if count > 0 {
            self.clamp_to_document();
        }
        self.rehighlight();
        count
    }

    fn clamp_to_document(&mut self) {
        let len = self.doc.len();
        self.viewport = Viewport::new(self.viewport.start.min(len), self.viewport.end.min(len));
        if self.cursor.selection_end() > len {
            self.cursor = Cursor::collapsed(len);
        }
    }

    fn current_line_span(&self) -> Option<Cursor> {
        if !self.highlight_current_line {
            return None;
        }
        let block = self.doc.block_at(self.cursor.position().min(self.doc.len()));
        Some(Cursor::spanning(
            self.doc.block_start(block),
            self.doc.block_end(block),
        ))
    }
}
