/// Core domain types shared by the classification passes.
use std::ops::Range;

use serde::Serialize;

use crate::legend::{TokenModifier, TokenType};

/// Which lexical context produced an exclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionKind {
    /// `OBTW` ... `TLDR`, possibly spanning lines.
    BlockComment,
    /// `BTW` to end of line.
    LineComment,
    /// A quoted run on a single line.
    StringLiteral,
}

/// Text that must not be classified as a reference. Half-open byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusion {
    /// Context the range came from.
    pub kind: ExclusionKind,
    /// Byte offsets into the document text.
    pub range: Range<usize>,
}

/// One unit of output for the rendering host. Byte range is within the
/// classified text by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightSpan {
    /// Exclusive end offset.
    pub end: usize,
    /// Legend bitset of `modifiers`.
    pub modifier_bits: u32,
    /// Modifier names, always `[declaration]`.
    pub modifiers: &'static [TokenModifier],
    /// Inclusive start offset.
    pub start: usize,
    /// Category, always `function`.
    pub token_type: TokenType,
    /// Legend index of `token_type`.
    pub type_index: u32,
}

impl HighlightSpan {
    /// The span as a byte range.
    pub const fn range(&self) -> Range<usize> {
        return self.start..self.end;
    }

    /// The highlighted identifier, or `None` if `text` is not the classified document.
    pub fn text<'a>(&self, text: &'a str) -> Option<&'a str> {
        return text.get(self.range());
    }
}
