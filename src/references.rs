//! Reference finder: declared function names and every whole-word occurrence of them.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::classifier::CancellationToken;
use crate::error::Error;

/// `HOW IZ I <name>` or `HOW DUZ I <name>`.
static DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| return Regex::new(r"(?:HOW IZ I|HOW DUZ I)\s+(\w+)").expect("valid regex"));

/// Candidate references keyed by start offset. A later insert at the same
/// start replaces the earlier end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateReferences {
    /// start -> end, iterated in increasing start order.
    by_start: BTreeMap<usize, usize>,
}

impl CandidateReferences {
    /// Record an occurrence `[start, end)`.
    pub fn insert(&mut self, start: usize, end: usize) {
        self.by_start.insert(start, end);
    }

    /// True if no candidates were found.
    pub fn is_empty(&self) -> bool {
        return self.by_start.is_empty();
    }

    /// `(start, end)` pairs in increasing start order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        return self.by_start.iter().map(|(start, end)| return (*start, *end));
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        return self.by_start.len();
    }

    /// Drop the candidate starting at `start`, returning its end if there was one.
    pub fn remove(&mut self, start: usize) -> Option<usize> {
        return self.by_start.remove(&start);
    }
}

/// Distinct declared function names, in the order first declared.
pub fn declared_names(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for cap in DECLARATION.captures_iter(text) {
        let Some(name) = cap.get(1) else { continue };
        if !names.iter().any(|n| return n == name.as_str()) {
            names.push(name.as_str().to_string());
        }
    }
    return names;
}

/// Every whole-word occurrence of every declared name, declaration sites included.
///
/// # Errors
///
/// Returns `Error::Cancelled` if `cancel` fires between names.
pub fn find_candidates(
    text: &str,
    cancel: &dyn CancellationToken,
) -> Result<CandidateReferences, Error> {
    let names = declared_names(text);
    let mut candidates = CandidateReferences::default();

    for name in &names {
        if cancel.is_cancellation_requested() {
            return Err(Error::Cancelled);
        }
        record_occurrences(text, name, &mut candidates);
    }

    tracing::debug!(names = names.len(), candidates = candidates.len(), "found candidate references");
    return Ok(candidates);
}

/// Insert every word-bounded occurrence of `name` into `candidates`.
fn record_occurrences(text: &str, name: &str, candidates: &mut CandidateReferences) {
    let pattern = format!(r"\b{}\b", regex::escape(name));
    let Ok(occurrence) = Regex::new(&pattern) else {
        tracing::warn!(name, "skipping name that does not compile as a pattern");
        return;
    };
    for m in occurrence.find_iter(text) {
        candidates.insert(m.start(), m.end());
    }
}
