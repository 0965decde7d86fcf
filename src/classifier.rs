//! Span classifier: runs the reference finder and exclusion scanner over one
//! document and merges their output.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::document::{Document, LineOffsets};
use crate::emitter;
use crate::error::Error;
use crate::exclusions::{self, StringExclusion};
use crate::legend::{LEGEND, Legend};
use crate::references;
use crate::types::HighlightSpan;

/// Cooperative cancellation, polled between lines and between names.
pub trait CancellationToken {
    /// True once the caller no longer wants the result.
    fn is_cancellation_requested(&self) -> bool;
}

impl CancellationToken for AtomicBool {
    fn is_cancellation_requested(&self) -> bool {
        return self.load(Ordering::Relaxed);
    }
}

/// A token that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancelled;

impl CancellationToken for NeverCancelled {
    fn is_cancellation_requested(&self) -> bool {
        return false;
    }
}

/// Knobs for the two behaviors hosts disagree on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// How line start offsets are accumulated.
    #[serde(default)]
    pub line_offsets: LineOffsets,
    /// How far a string literal's exclusion reaches.
    #[serde(default)]
    pub string_exclusion: StringExclusion,
}

/// Stateless classifier. Every call re-scans the whole text.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    /// Legend used to resolve category and modifier indices.
    legend: &'static Legend,
    /// Scan options.
    options: Options,
}

impl Default for Classifier {
    fn default() -> Self {
        return Self::new(Options::default());
    }
}

impl Classifier {
    /// Classifier using the standard legend.
    pub const fn new(options: Options) -> Self {
        return Self { legend: &LEGEND, options };
    }

    /// Highlight spans for every function-name reference outside comments and strings.
    pub fn classify(&self, text: &str) -> Vec<HighlightSpan> {
        return match self.classify_with_cancellation(text, &NeverCancelled) {
            Ok(spans) => spans,
            Err(_) => Vec::new(),
        };
    }

    /// Like [`Classifier::classify`], polling `cancel` at coarse granularity.
    /// A cancelled run yields no spans at all, never a partial set.
    ///
    /// # Errors
    ///
    /// Returns `Error::Cancelled` if `cancel` fires before the result is complete.
    pub fn classify_with_cancellation(
        &self,
        text: &str,
        cancel: &dyn CancellationToken,
    ) -> Result<Vec<HighlightSpan>, Error> {
        let mut candidates = references::find_candidates(text, cancel)?;
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let document = Document::new(text, self.options.line_offsets);
        let excluded = exclusions::scan_exclusions(&document, self.options.string_exclusion, cancel)?;

        let dropped = emitter::subtract(&mut candidates, &excluded);
        let spans = emitter::emit(&candidates, document.len(), self.legend);
        tracing::debug!(dropped, emitted = spans.len(), "classified document");
        return Ok(spans);
    }
}
