use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::casing::eq_char;
use crate::offsets::char_to_byte;
use crate::words::is_word_boundary;

/// Errors raised while loading a document from disk.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("file is not valid UTF-8")]
    InvalidUtf8,
}

/// A plain-text document held as an ordered sequence of blocks (lines).
///
/// Blocks never contain `\n`; each separator between consecutive blocks
/// counts as exactly one character position, so `len()` equals the sum of
/// the block lengths plus one per separator. Every offset handed to or
/// returned by this type is an absolute character offset into that
/// flattened sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<String>,
    starts: Vec<usize>,
    len: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document: one empty block.
    pub fn new() -> Self {
        Self::from_text("")
    }

    /// Builds a document from raw text, normalising `\r\n` and `\r` to `\n`
    /// before splitting into blocks.
    pub fn from_text(text: &str) -> Self {
        let normalised = normalize_newlines(text);
        let blocks: Vec<String> = normalised.split('\n').map(str::to_owned).collect();
        let mut doc = Self {
            blocks,
            starts: Vec::new(),
            len: 0,
        };
        doc.reindex();
        doc
    }

    /// Loads a UTF-8 text file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|_| DocumentError::InvalidUtf8)?;
        Ok(Self::from_text(&text))
    }

    fn reindex(&mut self) {
        self.starts.clear();
        let mut offset = 0;
        for block in &self.blocks {
            self.starts.push(offset);
            offset += block.chars().count() + 1;
        }
        // `split` always yields at least one block, so the trailing
        // separator accounted for above is surplus.
        self.len = offset - 1;
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn block_text(&self, index: usize) -> &str {
        &self.blocks[index]
    }

    /// Absolute offset of the block's first character.
    pub fn block_start(&self, index: usize) -> usize {
        self.starts[index]
    }

    /// Block length in characters, separator excluded.
    pub fn block_len(&self, index: usize) -> usize {
        match self.starts.get(index + 1) {
            Some(next) => next - self.starts[index] - 1,
            None => self.len - self.starts[index],
        }
    }

    /// Offset one past the block's last character: the separator position,
    /// or the document end for the final block.
    pub fn block_end(&self, index: usize) -> usize {
        self.block_start(index) + self.block_len(index)
    }

    /// Index of the block containing `offset`. A separator belongs to the
    /// block it terminates.
    pub fn block_at(&self, offset: usize) -> usize {
        debug_assert!(offset <= self.len);
        self.starts
            .partition_point(|start| *start <= offset)
            .saturating_sub(1)
    }

    /// Total length in characters, separators included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The full text with `\n` separators.
    pub fn text(&self) -> String {
        self.blocks.join("\n")
    }

    /// The character at `offset`; separators read back as `\n`.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        if offset >= self.len {
            return None;
        }
        let block = self.block_at(offset);
        let intra = offset - self.starts[block];
        self.blocks[block].chars().nth(intra).or(Some('\n'))
    }

    /// Extracts `[start, end)` as a string, separators included. Offsets
    /// beyond the document clamp to its end.
    pub fn text_between(&self, start: usize, end: usize) -> String {
        let start = start.min(self.len);
        let end = end.min(self.len);
        if start >= end {
            return String::new();
        }
        let mut out = String::with_capacity(end - start);
        let mut block = self.block_at(start);
        let mut offset = start;
        while offset < end {
            let block_start = self.starts[block];
            let block_len = self.block_len(block);
            let from = offset - block_start;
            let to = (end - block_start).min(block_len);
            if from < to {
                out.push_str(char_slice(&self.blocks[block], from, to));
            }
            offset = block_start + to;
            if offset < end {
                out.push('\n');
                offset += 1;
                block += 1;
            }
        }
        out
    }

    /// The native forward find primitive: locates the first occurrence of a
    /// single-line `pattern` starting at or after `from`, returning the
    /// match span as absolute offsets.
    pub fn find_forward(
        &self,
        pattern: &str,
        from: usize,
        case_sensitive: bool,
        whole_word: bool,
    ) -> Option<(usize, usize)> {
        debug_assert!(!pattern.contains('\n'));
        if pattern.is_empty() || from > self.len {
            return None;
        }
        let pattern: Vec<char> = pattern.chars().collect();
        let mut block = self.block_at(from);
        let mut intra = from - self.starts[block];
        while block < self.blocks.len() {
            let chars: Vec<char> = self.blocks[block].chars().collect();
            if let Some(start) = find_in_chars(&chars, &pattern, intra, case_sensitive, whole_word)
            {
                let abs = self.starts[block] + start;
                return Some((abs, abs + pattern.len()));
            }
            block += 1;
            intra = 0;
        }
        None
    }

    /// Replaces `[start, end)` (character offsets) with `text`, rebuilding
    /// the block index.
    pub fn replace_range(&mut self, start: usize, end: usize, text: &str) {
        debug_assert!(start <= end && end <= self.len);
        let mut full = self.text();
        let byte_start = char_to_byte(&full, start);
        let byte_end = char_to_byte(&full, end);
        full.replace_range(byte_start..byte_end, text);
        *self = Self::from_text(&full);
    }
}

fn find_in_chars(
    chars: &[char],
    pattern: &[char],
    from: usize,
    case_sensitive: bool,
    whole_word: bool,
) -> Option<usize> {
    if pattern.is_empty() || pattern.len() > chars.len() {
        return None;
    }
    let last = chars.len() - pattern.len();
    if from > last {
        return None;
    }
    for start in from..=last {
        let matched = chars[start..start + pattern.len()]
            .iter()
            .zip(pattern)
            .all(|(a, b)| eq_char(*a, *b, case_sensitive));
        if matched && (!whole_word || is_word_boundary(chars, start, start + pattern.len())) {
            return Some(start);
        }
    }
    None
}

/// Byte-slices `text` by character positions.
fn char_slice(text: &str, from: usize, to: usize) -> &str {
    let start = char_to_byte(text, from);
    let end = char_to_byte(text, to);
    &text[start..end]
}

fn normalize_newlines(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                result.push('\n');
            }
            _ => result.push(ch),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_index_accounts_for_separators() {
        let doc = Document::from_text("foo\nbar\nbazqux");
        assert_eq!(doc.block_count(), 3);
        assert_eq!(doc.len(), 14);
        assert_eq!(doc.block_start(0), 0);
        assert_eq!(doc.block_start(1), 4);
        assert_eq!(doc.block_start(2), 8);
        assert_eq!(doc.block_len(2), 6);
        assert_eq!(doc.block_end(0), 3);
    }

    #[test]
    fn separators_belong_to_the_block_they_terminate() {
        let doc = Document::from_text("foo\nbar");
        assert_eq!(doc.block_at(0), 0);
        assert_eq!(doc.block_at(3), 0);
        assert_eq!(doc.block_at(4), 1);
        assert_eq!(doc.block_at(doc.len()), 1);
    }

    #[test]
    fn newlines_are_normalised_on_load() {
        let doc = Document::from_text("one\r\ntwo\rthree");
        assert_eq!(doc.block_count(), 3);
        assert_eq!(doc.text(), "one\ntwo\nthree");
    }

    #[test]
    fn trailing_newline_creates_an_empty_final_block() {
        let doc = Document::from_text("alpha\n");
        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.block_len(1), 0);
        assert_eq!(doc.len(), 6);
    }

    #[test]
    fn char_at_reads_separators_as_newlines() {
        let doc = Document::from_text("ab\ncd");
        assert_eq!(doc.char_at(0), Some('a'));
        assert_eq!(doc.char_at(2), Some('\n'));
        assert_eq!(doc.char_at(3), Some('c'));
        assert_eq!(doc.char_at(5), None);
    }

    #[test]
    fn text_between_spans_blocks() {
        let doc = Document::from_text("foo\nbar\nbaz");
        assert_eq!(doc.text_between(2, 6), "o\nba");
        assert_eq!(doc.text_between(0, doc.len()), "foo\nbar\nbaz");
        assert_eq!(doc.text_between(3, 4), "\n");
        assert_eq!(doc.text_between(5, 5), "");
        assert_eq!(doc.text_between(9, 100), "az");
    }

    #[test]
    fn find_forward_crosses_blocks() {
        let doc = Document::from_text("alpha\nbeta\ngamma");
        assert_eq!(doc.find_forward("beta", 0, true, false), Some((6, 10)));
        assert_eq!(doc.find_forward("gamma", 7, true, false), Some((11, 16)));
        assert_eq!(doc.find_forward("beta", 7, true, false), None);
    }

    #[test]
    fn find_forward_respects_case_flag() {
        let doc = Document::from_text("Alpha ALPHA alpha");
        assert_eq!(doc.find_forward("alpha", 0, true, false), Some((12, 17)));
        assert_eq!(doc.find_forward("alpha", 0, false, false), Some((0, 5)));
    }

    #[test]
    fn find_forward_whole_word_skips_embedded_hits() {
        let doc = Document::from_text("concatenate cat");
        assert_eq!(doc.find_forward("cat", 0, true, true), Some((12, 15)));
        assert_eq!(doc.find_forward("cat", 0, true, false), Some((3, 6)));
    }

    #[test]
    fn find_forward_counts_multibyte_characters_once() {
        let doc = Document::from_text("café au lait\ncafé");
        assert_eq!(doc.find_forward("café", 1, true, false), Some((13, 17)));
    }

    #[test]
    fn replace_range_rebuilds_the_index() {
        let mut doc = Document::from_text("one two three");
        doc.replace_range(4, 7, "2");
        assert_eq!(doc.text(), "one 2 three");
        doc.replace_range(0, 3, "uno\ndos");
        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.text(), "uno\ndos 2 three");
    }

    #[test]
    fn from_file_reads_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        std::fs::write(&path, "line1\r\nline2").unwrap();
        let doc = Document::from_file(&path).unwrap();
        assert_eq!(doc.text(), "line1\nline2");
    }

    #[test]
    fn from_file_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.bin");
        std::fs::write(&path, [0xFF, 0xFE, 0x00]).unwrap();
        assert!(matches!(
            Document::from_file(&path),
            Err(DocumentError::InvalidUtf8)
        ));
    }
}
