//! Sentence-boundary packing.
//!
//! Splits free text into sentence-like spans and packs them greedily under
//! the token budget, one space between spans.
//!
//! ## The Boundary Heuristic
//!
//! A boundary is any run of whitespace that follows `.` or `;`. The
//! punctuation stays with the span before it; the whitespace is dropped.
//!
//! ```text
//! "(a) placing on the market; (b) putting into service. Deployers shall"
//!                           ^                          ^
//! ["(a) placing on the market;", "(b) putting into service.", "Deployers shall"]
//! ```
//!
//! This is not sentence detection. "Art. 5" splits after "Art.", and a
//! long enumeration without `.` or `;` stays one span. Legal text splits on
//! `;` at least as often as on `.`, which is why `;` counts here. The rule
//! is kept exactly as it is so chunk boundaries stay reproducible against
//! previously built indexes.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::pack::{single_chunk, GreedyPacker, Sizer};
use crate::{Chunk, Chunker, Provision, TokenBudget, TokenCounter};

static BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.;]\s+").expect("boundary pattern is valid"));

/// Split `text` at whitespace runs following `.` or `;`.
///
/// Every input yields at least one span; text ending in a boundary yields a
/// trailing empty span.
///
/// ```rust
/// use lexslab::split_sentences;
///
/// assert_eq!(
///     split_sentences("First. Second;  third"),
///     vec!["First.", "Second;", "third"]
/// );
/// assert_eq!(split_sentences("no boundary"), vec!["no boundary"]);
/// ```
#[must_use]
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut start = 0;
    for m in BOUNDARY.find_iter(text) {
        // `.` and `;` are one byte each
        spans.push(&text[start..=m.start()]);
        start = m.end();
    }
    spans.push(&text[start..]);
    spans
}

/// Sentence-boundary splitter.
///
/// As a [`Chunker`] it keeps a provision whole when `header + text` fits the
/// budget and otherwise packs its sentences. This is the strategy for
/// recitals and annexes.
///
/// ## Example
///
/// ```rust
/// use std::sync::Arc;
/// use lexslab::{Chunker, O200kCounter, Provision, SentenceSplitter, TokenBudget};
///
/// let splitter = SentenceSplitter::new(Arc::new(O200kCounter::new().unwrap()), TokenBudget::default());
/// let recital = Provision::recital("rct_1", "1", "Recital 1", "The purpose of this Regulation is clear.");
/// let chunks = splitter.chunk(&recital);
///
/// assert_eq!(chunks.len(), 1);
/// assert_eq!(chunks[0].id, "rct_1");
/// ```
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    sizer: Sizer,
}

impl SentenceSplitter {
    /// Create a sentence splitter counting with `counter` against `budget`.
    pub fn new(counter: Arc<dyn TokenCounter>, budget: TokenBudget) -> Self {
        Self {
            sizer: Sizer::new(counter, budget),
        }
    }

    pub(crate) fn from_sizer(sizer: Sizer) -> Self {
        Self { sizer }
    }

    /// Pack the sentences of `text` into chunks of `provision`.
    ///
    /// No whole-provision shortcut is taken. A single sentence over budget
    /// is emitted whole as its own chunk.
    #[must_use]
    pub fn split(&self, provision: &Provision, text: &str) -> Vec<Chunk> {
        let mut packer = GreedyPacker::new(&self.sizer, provision, " ");
        for span in split_sentences(text) {
            packer.push(span);
        }
        packer.finish()
    }
}

impl Chunker for SentenceSplitter {
    fn chunk(&self, provision: &Provision) -> Vec<Chunk> {
        match single_chunk(&self.sizer, provision) {
            Some(chunk) => vec![chunk],
            None => self.split(provision, &provision.text),
        }
    }

    fn estimate_chunks(&self, provision: &Provision) -> usize {
        let tokens = self.sizer.count(&provision.text);
        tokens.div_ceil(self.sizer.budget().max()).max(1)
    }
}
