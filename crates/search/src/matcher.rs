//! The pattern matcher: finds the next or previous occurrence of a query
//! in a block document.
//!
//! Four scan families are implemented. Plain single-line patterns go
//! forward through the document's native find primitive and backward
//! through a block-walking last-index helper. Plain patterns with embedded
//! newlines anchor their first line at a block end and then compare whole
//! blocks. Regex patterns are matched block-locally, forward and backward.
//! Every family returns `None` instead of an error when nothing matches —
//! including for an unparseable regex, which callers treat the same as "no
//! occurrence".

use std::ops::Range;

use quillpad_text::casing;
use quillpad_text::offsets::{byte_to_char, char_to_byte};
use quillpad_text::words::is_word_boundary;
use quillpad_text::{Cursor, Document};

use crate::options::{SearchDirection, SearchMode, SearchOptions};

/// Searches a document without owning it.
pub struct DocumentSearcher<'a> {
    doc: &'a Document,
}

impl<'a> DocumentSearcher<'a> {
    pub fn new(doc: &'a Document) -> Self {
        Self { doc }
    }

    /// Finds the next occurrence from `from` in the direction carried by
    /// `options`. Forward searches begin at the cursor's selection end and
    /// backward searches at its selection start, so repeating a search from
    /// a selected match never returns the same span. The search does not
    /// wrap; callers that want wrap-around retry from a document edge.
    pub fn find(&self, options: &SearchOptions, from: Cursor) -> Option<Cursor> {
        self.find_impl(options, from, None)
    }

    /// Like [`find`](Self::find), but gives up once a located match would
    /// start past `end`. The viewport highlighter uses this to stop at the
    /// visible edge.
    pub fn find_bounded(
        &self,
        options: &SearchOptions,
        from: Cursor,
        end: usize,
    ) -> Option<Cursor> {
        self.find_impl(options, from, Some(end))
    }

    /// Collects every match starting inside `range`, scanning forward
    /// regardless of the direction in `options`, each search resuming at
    /// the previous match's end.
    pub fn find_all_bounded(&self, options: &SearchOptions, range: Range<usize>) -> Vec<Cursor> {
        let mut forward = options.clone();
        forward.direction = SearchDirection::Forward;
        let mut matches = Vec::new();
        let mut from = range.start;
        while let Some(m) = self.find_bounded(&forward, Cursor::collapsed(from), range.end) {
            if m.selection_end() <= from {
                break;
            }
            from = m.selection_end();
            matches.push(m);
        }
        matches
    }

    fn find_impl(
        &self,
        options: &SearchOptions,
        from: Cursor,
        bound: Option<usize>,
    ) -> Option<Cursor> {
        if options.pattern.is_empty() {
            return None;
        }
        match (options.mode, options.direction) {
            (SearchMode::Regex, SearchDirection::Forward) => {
                self.regex_forward(options, from, bound)
            }
            (SearchMode::Regex, SearchDirection::Backward) => self.regex_backward(options, from),
            (SearchMode::Plain, SearchDirection::Forward)
                if options.pattern.contains('\n') =>
            {
                self.multiline_forward(options, from, bound)
            }
            (SearchMode::Plain, SearchDirection::Backward)
                if options.pattern.contains('\n') =>
            {
                self.multiline_backward(options, from)
            }
            (SearchMode::Plain, SearchDirection::Forward) => {
                self.plain_forward(options, from, bound)
            }
            (SearchMode::Plain, SearchDirection::Backward) => self.plain_backward(options, from),
        }
    }

    fn plain_forward(
        &self,
        options: &SearchOptions,
        from: Cursor,
        bound: Option<usize>,
    ) -> Option<Cursor> {
        let start = from.selection_end().min(self.doc.len());
        let (s, e) = self.doc.find_forward(
            &options.pattern,
            start,
            options.case_sensitive,
            options.effective_whole_word(),
        )?;
        if bound.map_or(false, |b| s > b) {
            return None;
        }
        Some(Cursor::spanning(s, e))
    }

    fn plain_backward(&self, options: &SearchOptions, from: Cursor) -> Option<Cursor> {
        let pattern: Vec<char> = options.pattern.chars().collect();
        let start = from.selection_start().min(self.doc.len());
        // Highest offset the match could start at; the whole match must sit
        // before the cursor.
        let candidate = start.checked_sub(pattern.len())?;
        let mut block = self.doc.block_at(candidate);
        let mut before = candidate - self.doc.block_start(block);
        loop {
            if let Some(intra) = last_index_in_block(
                self.doc.block_text(block),
                &pattern,
                before,
                options.case_sensitive,
                options.effective_whole_word(),
            ) {
                let s = self.doc.block_start(block) + intra;
                return Some(Cursor::spanning(s, s + pattern.len()));
            }
            if block == 0 {
                return None;
            }
            block -= 1;
            before = self.doc.block_len(block);
        }
    }

    fn multiline_forward(
        &self,
        options: &SearchOptions,
        from: Cursor,
        bound: Option<usize>,
    ) -> Option<Cursor> {
        let lines: Vec<&str> = options.pattern.split('\n').collect();
        let tail = lines.len() - 1;
        let whole_word = options.effective_whole_word();
        let mut search_from = from.selection_end().min(self.doc.len());

        loop {
            // Anchor the first line so its match ends exactly at a block
            // end. An empty first line anchors at the end of the block the
            // caret is in.
            let (anchor_block, start) = if lines[0].is_empty() {
                let block = self.doc.block_at(search_from);
                (block, self.doc.block_end(block))
            } else {
                let mut f = search_from;
                loop {
                    let (s, e) = self.doc.find_forward(
                        lines[0],
                        f,
                        options.case_sensitive,
                        whole_word,
                    )?;
                    let block = self.doc.block_at(s);
                    if e == self.doc.block_end(block) {
                        break (block, s);
                    }
                    f = s + 1;
                }
            };

            if bound.map_or(false, |b| start > b) {
                return None;
            }

            // Interior lines must equal the entire text of their block; the
            // final line must sit at the start of its block.
            if anchor_block + tail < self.doc.block_count() {
                let interior_ok = (1..tail).all(|i| {
                    casing::eq_str(
                        self.doc.block_text(anchor_block + i),
                        lines[i],
                        options.case_sensitive,
                    )
                });
                if interior_ok && self.block_starts_with(anchor_block + tail, lines[tail], options)
                {
                    let end =
                        self.doc.block_start(anchor_block + tail) + lines[tail].chars().count();
                    return Some(Cursor::spanning(start, end));
                }
            }

            // A failed attempt restarts one block past the anchor, never a
            // deeper backtrack.
            if anchor_block + 1 >= self.doc.block_count() {
                return None;
            }
            search_from = self.doc.block_start(anchor_block + 1);
        }
    }

    fn multiline_backward(&self, options: &SearchOptions, from: Cursor) -> Option<Cursor> {
        let lines: Vec<&str> = options.pattern.split('\n').collect();
        let tail = lines.len() - 1;
        let limit = from.selection_start().min(self.doc.len());
        let mut block = self.doc.block_at(limit);

        // Mirror image of the forward walk: anchor the final line at a
        // block start, compare interior blocks upward, then require the
        // first line to close out the block above them.
        loop {
            let end = self.doc.block_start(block) + lines[tail].chars().count();
            if block >= tail && end <= limit && self.block_starts_with(block, lines[tail], options)
            {
                let first = block - tail;
                let interior_ok = (1..tail).all(|i| {
                    casing::eq_str(
                        self.doc.block_text(first + i),
                        lines[i],
                        options.case_sensitive,
                    )
                });
                if interior_ok && self.block_ends_with(first, lines[0], options) {
                    let start = self.doc.block_end(first) - lines[0].chars().count();
                    return Some(Cursor::spanning(start, end));
                }
            }
            if block == 0 {
                return None;
            }
            block -= 1;
        }
    }

    /// Whether `line` sits at the very start of the block, with a word
    /// boundary after it when whole-word filtering applies. Empty lines
    /// match trivially.
    fn block_starts_with(&self, block: usize, line: &str, options: &SearchOptions) -> bool {
        if line.is_empty() {
            return true;
        }
        let text = self.doc.block_text(block);
        if !casing::starts_with(text, line, options.case_sensitive) {
            return false;
        }
        if options.effective_whole_word() {
            let chars: Vec<char> = text.chars().collect();
            return is_word_boundary(&chars, 0, line.chars().count());
        }
        true
    }

    /// Whether `line` closes out the block, with a word boundary before it
    /// when whole-word filtering applies. Empty lines match trivially.
    fn block_ends_with(&self, block: usize, line: &str, options: &SearchOptions) -> bool {
        if line.is_empty() {
            return true;
        }
        let text = self.doc.block_text(block);
        if !casing::ends_with(text, line, options.case_sensitive) {
            return false;
        }
        if options.effective_whole_word() {
            let chars: Vec<char> = text.chars().collect();
            let len = line.chars().count();
            return is_word_boundary(&chars, chars.len() - len, chars.len());
        }
        true
    }

    fn regex_forward(
        &self,
        options: &SearchOptions,
        from: Cursor,
        bound: Option<usize>,
    ) -> Option<Cursor> {
        let re = options.compile_regex().ok()?;
        let start = from.selection_end().min(self.doc.len());
        let mut block = self.doc.block_at(start);
        let mut intra = start - self.doc.block_start(block);
        while block < self.doc.block_count() {
            let text = self.doc.block_text(block);
            let mut byte_from = char_to_byte(text, intra);
            while byte_from <= text.len() {
                let Some(m) = re.find_at(text, byte_from) else {
                    break;
                };
                if m.start() == m.end() {
                    // Zero-length match: step one character and retry.
                    match text[m.start()..].chars().next() {
                        Some(ch) => byte_from = m.start() + ch.len_utf8(),
                        None => break,
                    }
                    continue;
                }
                let s = self.doc.block_start(block) + byte_to_char(text, m.start());
                if bound.map_or(false, |b| s > b) {
                    return None;
                }
                let e = self.doc.block_start(block) + byte_to_char(text, m.end());
                return Some(Cursor::spanning(s, e));
            }
            block += 1;
            intra = 0;
        }
        None
    }

    fn regex_backward(&self, options: &SearchOptions, from: Cursor) -> Option<Cursor> {
        let re = options.compile_regex().ok()?;
        let origin = from.selection_start().min(self.doc.len());
        let mut block = self.doc.block_at(origin);
        let mut before = origin - self.doc.block_start(block);
        loop {
            let text = self.doc.block_text(block);
            let block_start = self.doc.block_start(block);
            let mut found: Option<(usize, usize)> = None;
            for m in re.find_iter(text) {
                let s = byte_to_char(text, m.start());
                if s > before {
                    break;
                }
                // Zero-length matches, and a match that merely re-finds the
                // starting position, do not count.
                if m.start() == m.end() || block_start + s == origin {
                    continue;
                }
                found = Some((s, byte_to_char(text, m.end())));
            }
            if let Some((s, e)) = found {
                return Some(Cursor::spanning(block_start + s, block_start + e));
            }
            if block == 0 {
                return None;
            }
            block -= 1;
            before = self.doc.block_len(block);
        }
    }
}

/// Last occurrence of `pattern` in `text` starting at or before `before`
/// (character offsets).
fn last_index_in_block(
    text: &str,
    pattern: &[char],
    before: usize,
    case_sensitive: bool,
    whole_word: bool,
) -> Option<usize> {
    let chars: Vec<char> = text.chars().collect();
    if pattern.is_empty() || pattern.len() > chars.len() {
        return None;
    }
    let max_start = before.min(chars.len() - pattern.len());
    for start in (0..=max_start).rev() {
        let matched = chars[start..start + pattern.len()]
            .iter()
            .zip(pattern)
            .all(|(a, b)| casing::eq_char(*a, *b, case_sensitive));
        if matched && (!whole_word || is_word_boundary(&chars, start, start + pattern.len())) {
            return Some(start);
        }
    }
    None
}
