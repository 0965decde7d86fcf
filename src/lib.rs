//! Function-name highlighting for LOLCODE source.
//!
//! Given a document's text, [`Classifier::classify`] returns the byte spans of
//! every function name declared with `HOW IZ I` / `HOW DUZ I`, minus those that
//! fall inside a `BTW` line comment, an `OBTW` ... `TLDR` block comment, or a
//! quoted string. Each span is tagged `function` + `declaration` against the
//! fixed [`legend::LEGEND`].
//!
//! ```
//! use lolspan::Classifier;
//!
//! let text = "HOW IZ I foo\nIF U SAY SO\nBTW foo\nI IZ foo MKAY";
//! let spans = Classifier::default().classify(text);
//! let names: Vec<&str> = spans.iter().filter_map(|s| s.text(text)).collect();
//! assert_eq!(names, ["foo", "foo"]);
//! ```

pub mod classifier;
pub mod config;
pub mod document;
pub mod emitter;
pub mod error;
pub mod exclusions;
pub mod legend;
pub mod references;
pub mod types;

pub use classifier::{CancellationToken, Classifier, NeverCancelled, Options};
pub use error::Error;
pub use types::HighlightSpan;
