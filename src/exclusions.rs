//! Exclusion scanner: comment and string regions that must never be highlighted.
//!
//! The scan is line by line. Block comments carry state across lines; line
//! comments and strings are resolved within a single line.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::classifier::CancellationToken;
use crate::document::{Document, Line};
use crate::error::Error;
use crate::types::{Exclusion, ExclusionKind};

/// Standalone `OBTW`: whitespace or line edge on both sides.
static BLOCK_OPEN: LazyLock<Regex> =
    LazyLock::new(|| return Regex::new(r"(?:^|\s)(OBTW)(?:\s|$)").expect("valid regex"));

/// Standalone `TLDR`: whitespace or line edge on both sides.
static BLOCK_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| return Regex::new(r"(?:^|\s)(TLDR)(?:\s|$)").expect("valid regex"));

/// `BTW` as a whole word. `OBTW` never matches because `O` is a word character.
static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| return Regex::new(r"\bBTW\b").expect("valid regex"));

/// How far a string literal's exclusion reaches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StringExclusion {
    /// Only the quoted run itself, delimiters included. Every string on the line
    /// counts, and `BTW` or `OBTW` inside a quoted run is string text.
    ToClosingQuote,
    /// From the first string's opening delimiter to the end of its line.
    #[default]
    ToLineEnd,
}

/// Union of excluded ranges: sorted, merged, and clamped to the text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    /// Disjoint, non-adjacent ranges in increasing order.
    ranges: Vec<Range<usize>>,
}

impl ExclusionSet {
    /// Normalize raw exclusions into a union clamped to `text_len`. Empty ranges vanish.
    pub fn from_exclusions(exclusions: &[Exclusion], text_len: usize) -> Self {
        let mut raw: Vec<Range<usize>> = exclusions
            .iter()
            .map(|e| return e.range.start.min(text_len)..e.range.end.min(text_len))
            .filter(|r| return r.start < r.end)
            .collect();
        raw.sort_by_key(|r| return r.start);

        let mut ranges: Vec<Range<usize>> = Vec::with_capacity(raw.len());
        for range in raw {
            match ranges.last_mut() {
                Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
                _ => ranges.push(range),
            }
        }
        return Self { ranges };
    }

    /// True if `offset` lies inside any excluded range.
    pub fn contains(&self, offset: usize) -> bool {
        let idx = self.ranges.partition_point(|r| return r.end <= offset);
        return self.ranges.get(idx).is_some_and(|r| return r.start <= offset);
    }

    /// The merged ranges in increasing order.
    pub fn ranges(&self) -> &[Range<usize>] {
        return &self.ranges;
    }
}

/// Cross-line state: the start of the open block comment, if any.
#[derive(Debug, Default)]
struct BlockState {
    /// Offset of the `OBTW` that opened the current block comment.
    open_at: Option<usize>,
}

/// Scan every line and collect the regions that must not be highlighted.
///
/// # Errors
///
/// Returns `Error::Cancelled` if `cancel` fires between lines.
pub fn scan_exclusions(
    document: &Document<'_>,
    strings: StringExclusion,
    cancel: &dyn CancellationToken,
) -> Result<ExclusionSet, Error> {
    let mut exclusions = Vec::new();
    let mut block = BlockState::default();

    for line in document.lines() {
        if cancel.is_cancellation_requested() {
            return Err(Error::Cancelled);
        }
        let quoted = quoted_runs(line.content);
        let shielded: &[Range<usize>] = match strings {
            StringExclusion::ToClosingQuote => &quoted,
            StringExclusion::ToLineEnd => &[],
        };
        scan_block_markers(line, shielded, &mut block, &mut exclusions);
        scan_line_comment(line, shielded, &mut exclusions);
        scan_strings(line, &quoted, strings, &mut exclusions);
    }

    if let Some(start) = block.open_at {
        tracing::debug!(start, "block comment never closed, excluding to end of document");
        exclusions.push(Exclusion { kind: ExclusionKind::BlockComment, range: start..document.len() });
    }

    let count = |kind: ExclusionKind| return exclusions.iter().filter(|e| return e.kind == kind).count();
    tracing::debug!(
        block = count(ExclusionKind::BlockComment),
        line = count(ExclusionKind::LineComment),
        string = count(ExclusionKind::StringLiteral),
        "scanned exclusions"
    );
    return Ok(ExclusionSet::from_exclusions(&exclusions, document.len()));
}

/// Walk the line left to right, closing an open block at `TLDR` and opening
/// one at `OBTW`, so a line can close a block and open the next, or hold a
/// whole block. An `OBTW` starting inside a `shielded` run is string text.
/// `TLDR` is never shielded: inside an open block, quotes are comment text.
fn scan_block_markers(
    line: &Line<'_>,
    shielded: &[Range<usize>],
    block: &mut BlockState,
    out: &mut Vec<Exclusion>,
) {
    let mut cursor = 0_usize;
    loop {
        let marker = if block.open_at.is_some() { &*BLOCK_CLOSE } else { &*BLOCK_OPEN };
        let Some(token) = find_standalone(marker, line.content, cursor) else { return };
        cursor = token.end;
        let at = line.start.saturating_add(token.start);

        match block.open_at.take() {
            Some(start) => {
                let end = line.start.saturating_add(token.end);
                out.push(Exclusion { kind: ExclusionKind::BlockComment, range: start..end });
            },
            None if inside(shielded, token.start) => {},
            None => block.open_at = Some(at),
        }
    }
}

/// Locate the marker's token (capture group 1) at or after `from` within `content`.
fn find_standalone(marker: &Regex, content: &str, from: usize) -> Option<Range<usize>> {
    if from > content.len() {
        return None;
    }
    let cap = marker.captures_at(content, from)?;
    return cap.get(1).map(|m| return m.range());
}

/// Exclude from the first `BTW` outside any `shielded` run to the end of the line.
fn scan_line_comment(line: &Line<'_>, shielded: &[Range<usize>], out: &mut Vec<Exclusion>) {
    let Some(m) = LINE_COMMENT.find_iter(line.content).find(|m| return !inside(shielded, m.start())) else {
        return;
    };
    out.push(Exclusion {
        kind: ExclusionKind::LineComment,
        range: line.start.saturating_add(m.start())..line.end(),
    });
}

/// Exclude the line's quoted runs according to `mode`.
fn scan_strings(line: &Line<'_>, quoted: &[Range<usize>], mode: StringExclusion, out: &mut Vec<Exclusion>) {
    match mode {
        StringExclusion::ToLineEnd => {
            if let Some(first) = quoted.first() {
                let start = line.start.saturating_add(first.start);
                out.push(Exclusion { kind: ExclusionKind::StringLiteral, range: start..line.end() });
            }
        },
        StringExclusion::ToClosingQuote => {
            for run in quoted {
                let range = line.start.saturating_add(run.start)..line.start.saturating_add(run.end);
                out.push(Exclusion { kind: ExclusionKind::StringLiteral, range });
            }
        },
    }
}

/// True if `offset` falls inside one of the sorted, disjoint `runs`.
fn inside(runs: &[Range<usize>], offset: usize) -> bool {
    let idx = runs.partition_point(|r| return r.end <= offset);
    return runs.get(idx).is_some_and(|r| return r.start <= offset);
}

/// Every quoted run on a line, left to right and non-overlapping.
fn quoted_runs(content: &str) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut from = 0_usize;
    while let Some(run) = find_quoted(content, from) {
        from = run.end;
        runs.push(run);
    }
    return runs;
}

/// First quoted run at or after `from`: an opening `"` or `'` with a closing
/// delimiter later on the line. An opener with no closer is skipped and the
/// search continues after it. Returned range covers both delimiters.
///
/// A failed opener means its delimiter does not occur again on the line, so
/// every character is visited by at most one failed search per delimiter.
fn find_quoted(content: &str, from: usize) -> Option<Range<usize>> {
    let rest = content.get(from..)?;
    for (offset, delimiter) in rest.char_indices().filter(|&(_, c)| return matches!(c, '"' | '\'')) {
        let open = from.saturating_add(offset);
        let body_start = open.saturating_add(1);
        if let Some(close) = find_closing(content, body_start, delimiter) {
            return Some(open..close.saturating_add(1));
        }
    }
    return None;
}

/// Offset of the delimiter that closes a run whose body starts at `from`.
///
/// A backslash directly before `delimiter` escapes it. The first unescaped
/// delimiter closes the run; failing that, the last escaped one does, with
/// its backslash read as the final body character.
fn find_closing(content: &str, from: usize, delimiter: char) -> Option<usize> {
    let mut last_escaped = None;
    let mut chars = content.get(from..)?.char_indices().peekable();
    while let Some((offset, c)) = chars.next() {
        if c == delimiter {
            return Some(from.saturating_add(offset));
        }
        if c == '\\'
            && let Some(&(escaped, next)) = chars.peek()
            && next == delimiter
        {
            last_escaped = Some(from.saturating_add(escaped));
            chars.next();
        }
    }
    return last_escaped;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::NeverCancelled;
    use crate::document::LineOffsets;

    fn excluded(text: &str) -> Vec<Range<usize>> {
        return excluded_with(text, StringExclusion::ToLineEnd);
    }

    fn excluded_with(text: &str, mode: StringExclusion) -> Vec<Range<usize>> {
        let doc = Document::new(text, LineOffsets::Exact);
        return scan_exclusions(&doc, mode, &NeverCancelled).unwrap().ranges().to_vec();
    }

    #[test]
    fn plain_code_excludes_nothing() {
        assert!(excluded("HOW IZ I foo\nVISIBLE 1").is_empty());
    }

    #[test]
    fn line_comment_runs_to_end_of_line() {
        let text = "x BTW foo\ny";
        assert_eq!(excluded(text), [2..9]);
    }

    #[test]
    fn obtw_is_not_a_line_comment() {
        let doc = Document::new("OBTW", LineOffsets::Exact);
        let mut out = Vec::new();
        scan_line_comment(&doc.lines()[0], &[], &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn block_comment_spans_lines() {
        let text = "OBTW\nfoo\nTLDR\nfoo";
        // OBTW at 0, TLDR at 9..13
        assert_eq!(excluded(text), [0..13]);
    }

    #[test]
    fn block_comment_on_one_line() {
        let text = "a OBTW b TLDR c\nfoo";
        assert_eq!(excluded(text), [2..13]);
    }

    #[test]
    fn close_then_open_on_the_same_line() {
        let text = "OBTW\nx TLDR y OBTW\nz\nTLDR";
        let doc = Document::new(text, LineOffsets::Exact);
        let set = scan_exclusions(&doc, StringExclusion::ToLineEnd, &NeverCancelled).unwrap();
        assert!(set.contains(0));
        assert!(set.contains(6));
        assert!(!set.contains(12), "`y` sits between the two blocks");
        assert!(set.contains(19));
    }

    #[test]
    fn unterminated_block_runs_to_end_of_document() {
        let text = "foo\nOBTW\nfoo\nfoo";
        assert_eq!(excluded(text), [4..text.len()]);
    }

    #[test]
    fn stray_tldr_excludes_nothing() {
        assert!(excluded("foo\nTLDR\nfoo").is_empty());
    }

    #[test]
    fn obtw_inside_open_block_keeps_first_start() {
        let text = "OBTW\nfoo\nOBTW\nbar\nTLDR\nfoo";
        // TLDR at 18..22
        assert_eq!(excluded(text), [0..22]);
    }

    #[test]
    fn glued_markers_are_not_standalone() {
        assert!(excluded("OBTWX\nfoo").is_empty());
        assert!(excluded("XOBTW\nfoo").is_empty());
    }

    #[test]
    fn string_excludes_to_end_of_line_by_default() {
        let text = "VISIBLE \"calls foo\" foo\nfoo";
        assert_eq!(excluded(text), [8..23]);
    }

    #[test]
    fn string_to_closing_quote_leaves_trailing_code() {
        let text = "VISIBLE \"a\" foo 'b'";
        assert_eq!(excluded_with(text, StringExclusion::ToClosingQuote), [8..11, 16..19]);
    }

    #[test]
    fn escaped_delimiter_stays_inside_string() {
        let text = r#"x "a\"b" y"#;
        assert_eq!(excluded_with(text, StringExclusion::ToClosingQuote), [2..8]);
    }

    #[test]
    fn unbalanced_quote_is_not_excluded() {
        assert!(excluded("VISIBLE \"oops foo").is_empty());
    }

    #[test]
    fn unclosed_quote_skipped_for_later_pair() {
        let text = "it's 'x' y";
        // the apostrophe pairs with the opening quote of 'x'
        assert_eq!(excluded_with(text, StringExclusion::ToClosingQuote), [2..6]);
    }

    #[test]
    fn trailing_escaped_quote_closes_unterminated_string() {
        let text = r#"VISIBLE "calls foo\""#;
        assert_eq!(excluded(text), [8..20]);
        assert_eq!(excluded_with(text, StringExclusion::ToClosingQuote), [8..20]);
    }

    #[test]
    fn unescaped_closer_wins_over_escaped_one() {
        assert_eq!(find_quoted(r#"a "b\"c" d\""#, 0), Some(2..8));
    }

    #[test]
    fn escaped_quote_run_scans_in_linear_time() {
        let line = "\\\"".repeat(200_000);
        let started = std::time::Instant::now();
        let runs = quoted_runs(&line);
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
        assert_eq!(runs, [1..line.len()]);
        assert_eq!(excluded_with(&line, StringExclusion::ToClosingQuote), [1..line.len()]);
    }

    #[test]
    fn comment_markers_inside_quoted_run_are_string_text() {
        let text = "VISIBLE \"a BTW b\" AN I IZ foo MKAY";
        assert_eq!(excluded_with(text, StringExclusion::ToClosingQuote), [8..17]);
        let text = "VISIBLE \"x OBTW y\"\nfoo";
        assert_eq!(excluded_with(text, StringExclusion::ToClosingQuote), [8..18]);
    }

    #[test]
    fn comment_markers_inside_string_still_count_by_default() {
        let text = "VISIBLE \"x OBTW y\"\nfoo";
        assert_eq!(excluded(text), [8..text.len()]);
    }

    #[test]
    fn crlf_offsets_are_exact() {
        let text = "a\r\nBTW foo";
        assert_eq!(excluded(text), [3..10]);
    }

    #[test]
    fn legacy_offsets_drift_on_crlf() {
        let text = "a\r\nBTW foo";
        let doc = Document::new(text, LineOffsets::Legacy);
        let set = scan_exclusions(&doc, StringExclusion::ToLineEnd, &NeverCancelled).unwrap();
        assert_eq!(set.ranges(), [1..8]);
    }

    #[test]
    fn union_merges_overlaps() {
        let raw = [
            Exclusion { kind: ExclusionKind::LineComment, range: 5..9 },
            Exclusion { kind: ExclusionKind::BlockComment, range: 0..6 },
            Exclusion { kind: ExclusionKind::StringLiteral, range: 12..40 },
            Exclusion { kind: ExclusionKind::StringLiteral, range: 3..3 },
        ];
        let set = ExclusionSet::from_exclusions(&raw, 20);
        assert_eq!(set.ranges(), [0..9, 12..20]);
        assert!(set.contains(0));
        assert!(set.contains(8));
        assert!(!set.contains(9));
        assert!(!set.contains(11));
        assert!(set.contains(19));
        assert!(!set.contains(20));
    }

    #[test]
    fn cancelled_between_lines() {
        let cancel = std::sync::atomic::AtomicBool::new(true);
        let doc = Document::new("a\nb", LineOffsets::Exact);
        let result = scan_exclusions(&doc, StringExclusion::ToLineEnd, &cancel);
        assert!(matches!(result, Err(Error::Cancelled)));
    }
}
