//! Merger/emitter: candidates minus exclusions, as highlight spans.

use crate::exclusions::ExclusionSet;
use crate::legend::{Legend, TokenModifier, TokenType};
use crate::references::CandidateReferences;
use crate::types::HighlightSpan;

/// Modifiers attached to every emitted span.
const FUNCTION_MODIFIERS: &[TokenModifier] = &[TokenModifier::Declaration];

/// Remove every candidate whose start offset is excluded. Candidates are
/// dropped whole, never clipped. Returns how many were removed.
pub fn subtract(candidates: &mut CandidateReferences, exclusions: &ExclusionSet) -> usize {
    let excluded: Vec<usize> = candidates
        .iter()
        .map(|(start, _)| return start)
        .filter(|start| return exclusions.contains(*start))
        .collect();
    for start in &excluded {
        candidates.remove(*start);
    }
    return excluded.len();
}

/// Emit the candidates left after [`subtract`] in increasing start order.
/// Candidates that end past `text_len`, are empty, or would overlap the
/// previous span are dropped.
pub fn emit(candidates: &CandidateReferences, text_len: usize, legend: &Legend) -> Vec<HighlightSpan> {
    let type_index = legend.type_index(TokenType::Function).unwrap_or(0);
    let modifier_bits = legend.modifier_bits(FUNCTION_MODIFIERS);

    let mut spans: Vec<HighlightSpan> = Vec::with_capacity(candidates.len());
    for (start, end) in candidates.iter() {
        if end > text_len || start >= end {
            continue;
        }
        if spans.last().is_some_and(|prev| return start < prev.end) {
            continue;
        }
        spans.push(HighlightSpan {
            end,
            modifier_bits,
            modifiers: FUNCTION_MODIFIERS,
            start,
            token_type: TokenType::Function,
            type_index,
        });
    }
    return spans;
}
