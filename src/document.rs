//! Document text split into lines, plus offset-to-position lookup for hosts.

use serde::{Deserialize, Serialize};

/// How a line's start offset is derived from the lines before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineOffsets {
    /// Each line starts after the previous line's content and its terminator.
    #[default]
    Exact,
    /// Each line starts after the previous line's content only. Terminators are
    /// not counted, so offsets drift one byte per LF/CR line and two per CRLF line.
    Legacy,
}

/// One line of a document with its terminator stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Line text without the terminator.
    pub content: &'a str,
    /// Offset of the first byte of `content`, per the document's `LineOffsets`.
    pub start: usize,
    /// Length of the stripped terminator: 0 (last line), 1 (LF or CR), or 2 (CRLF).
    pub terminator_len: usize,
}

impl Line<'_> {
    /// Offset one past the last content byte.
    pub const fn end(&self) -> usize {
        return self.start.saturating_add(self.content.len());
    }
}

/// Immutable snapshot of the text for one classification pass.
#[derive(Debug, Clone)]
pub struct Document<'a> {
    /// Lines in order. Never empty: empty text is one empty line.
    lines: Vec<Line<'a>>,
    /// The full text.
    text: &'a str,
}

impl<'a> Document<'a> {
    /// Split `text` on CRLF, CR, and LF. A trailing terminator yields a final empty line.
    pub fn new(text: &'a str, offsets: LineOffsets) -> Self {
        let mut lines = Vec::new();
        let mut rest = text;
        let mut start = 0_usize;

        loop {
            let Some(idx) = rest.find(['\r', '\n']) else {
                lines.push(Line { content: rest, start, terminator_len: 0 });
                break;
            };
            let terminator_len = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
            let content = &rest[..idx];
            lines.push(Line { content, start, terminator_len });

            let advance = match offsets {
                LineOffsets::Exact => content.len().saturating_add(terminator_len),
                LineOffsets::Legacy => content.len(),
            };
            start = start.saturating_add(advance);
            rest = &rest[idx.saturating_add(terminator_len)..];
        }

        return Self { lines, text };
    }

    /// Lines in document order.
    pub fn lines(&self) -> &[Line<'a>] {
        return &self.lines;
    }

    /// Length of the full text in bytes.
    pub const fn len(&self) -> usize {
        return self.text.len();
    }

    /// True if the document text is empty.
    pub const fn is_empty(&self) -> bool {
        return self.text.is_empty();
    }
}

/// Zero-based line and column. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    /// Column within the line, in characters.
    pub column: usize,
    /// Line number.
    pub line: usize,
}

/// Offset-to-position lookup over the exact line starts of a text.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    /// Exact byte offset of each line start. `line_starts[0]` is always 0.
    line_starts: Vec<usize>,
    /// The indexed text.
    text: &'a str,
}

impl<'a> LineIndex<'a> {
    /// Build the index. Uses exact offsets regardless of how the text was classified.
    pub fn new(text: &'a str) -> Self {
        let line_starts = Document::new(text, LineOffsets::Exact)
            .lines()
            .iter()
            .map(|l| return l.start)
            .collect();
        return Self { line_starts, text };
    }

    /// Number of lines in the text.
    pub fn line_count(&self) -> usize {
        return self.line_starts.len();
    }

    /// Position of a byte offset. Offsets past the end clamp to the end of the
    /// text; offsets inside a multi-byte character count that character as passed.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let column = self
            .text
            .get(line_start..)
            .unwrap_or("")
            .char_indices()
            .take_while(|(i, _)| return line_start.saturating_add(*i) < offset)
            .count();
        return Position { column, line };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starts(text: &str, offsets: LineOffsets) -> Vec<usize> {
        return Document::new(text, offsets).lines().iter().map(|l| return l.start).collect();
    }

    #[test]
    fn splits_on_every_line_ending() {
        let doc = Document::new("a\r\nb\rc\nd", LineOffsets::Exact);
        let contents: Vec<&str> = doc.lines().iter().map(|l| return l.content).collect();
        assert_eq!(contents, ["a", "b", "c", "d"]);
        let terminators: Vec<usize> = doc.lines().iter().map(|l| return l.terminator_len).collect();
        assert_eq!(terminators, [2, 1, 1, 0]);
    }

    #[test]
    fn exact_offsets_count_terminators() {
        assert_eq!(starts("ab\r\ncd\nef", LineOffsets::Exact), [0, 4, 7]);
    }

    #[test]
    fn legacy_offsets_drift_per_terminator() {
        assert_eq!(starts("ab\r\ncd\nef", LineOffsets::Legacy), [0, 2, 4]);
    }

    #[test]
    fn trailing_newline_yields_empty_last_line() {
        let doc = Document::new("x\n", LineOffsets::Exact);
        assert_eq!(doc.lines().len(), 2);
        assert_eq!(doc.lines()[1].content, "");
        assert_eq!(doc.lines()[1].start, 2);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        let doc = Document::new("", LineOffsets::Exact);
        assert!(doc.is_empty());
        assert_eq!(doc.lines().len(), 1);
    }

    #[test]
    fn position_counts_characters() {
        let index = LineIndex::new("héllo\r\nwörld foo");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.position(0), Position { column: 0, line: 0 });
        // "wörld " is 7 bytes, 6 characters
        let foo = "héllo\r\nwörld foo".find("foo").unwrap();
        assert_eq!(index.position(foo), Position { column: 6, line: 1 });
        assert_eq!(index.position(999), Position { column: 9, line: 1 });
    }
}
