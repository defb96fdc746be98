//! Paragraph-boundary packing for articles.
//!
//! ## Three Levels
//!
//! An article is kept at the largest unit that still fits:
//!
//! ```text
//! 1. whole      header + text <= budget          -> one chunk, bare id
//! 2. paragraph  has numbered paragraphs          -> pack paragraphs, "\n\n" between
//! 3. sentence   long text, no paragraph structure -> SentenceSplitter
//! ```
//!
//! Larger chunks keep more local context for retrieval; smaller ones give
//! finer recall. A numbered paragraph is the natural citation unit of an
//! article ("Article 5(1)"), so packing stops there and never splits a
//! paragraph into sentences, even an oversized one.

use std::sync::Arc;

use crate::pack::{single_chunk, GreedyPacker, Sizer};
use crate::{Chunk, Chunker, Provision, SentenceSplitter, TokenBudget, TokenCounter};

/// Whole-then-paragraph-then-sentence chunker.
///
/// ## Example
///
/// ```rust
/// use std::sync::Arc;
/// use lexslab::{Chunker, O200kCounter, Paragraph, ParagraphPacker, Provision, TokenBudget};
///
/// let packer = ParagraphPacker::new(Arc::new(O200kCounter::new().unwrap()), TokenBudget::default());
/// let article = Provision::article("art_1", "1", "Article 1 — Subject matter", "")
///     .with_paragraphs(vec![
///         Paragraph::new("001.001", "1. The purpose of this Regulation is to improve the functioning of the internal market."),
///         Paragraph::new("001.002", "2. This Regulation lays down harmonised rules."),
///     ]);
///
/// let chunks = packer.chunk(&article);
/// assert_eq!(chunks.len(), 1);
/// assert_eq!(chunks[0].id, "art_1");
/// ```
#[derive(Debug, Clone)]
pub struct ParagraphPacker {
    sizer: Sizer,
    sentences: SentenceSplitter,
}

impl ParagraphPacker {
    /// Create a paragraph packer counting with `counter` against `budget`.
    pub fn new(counter: Arc<dyn TokenCounter>, budget: TokenBudget) -> Self {
        Self::from_sizer(Sizer::new(counter, budget))
    }

    pub(crate) fn from_sizer(sizer: Sizer) -> Self {
        Self {
            sentences: SentenceSplitter::from_sizer(sizer.clone()),
            sizer,
        }
    }

    /// Pack the paragraphs of `provision`, skipping the whole-provision check.
    ///
    /// Falls back to sentence packing over `text` when there are no
    /// paragraphs.
    #[must_use]
    pub fn pack(&self, provision: &Provision) -> Vec<Chunk> {
        if !provision.has_paragraphs() {
            return self.sentences.split(provision, &provision.text);
        }

        let mut packer = GreedyPacker::new(&self.sizer, provision, "\n\n");
        for paragraph in &provision.paragraphs {
            packer.push(&paragraph.text);
        }
        packer.finish()
    }
}

impl Chunker for ParagraphPacker {
    fn chunk(&self, provision: &Provision) -> Vec<Chunk> {
        match single_chunk(&self.sizer, provision) {
            Some(chunk) => vec![chunk],
            None => self.pack(provision),
        }
    }

    fn estimate_chunks(&self, provision: &Provision) -> usize {
        if provision.has_paragraphs() {
            provision.paragraphs.len().min(self.sentences.estimate_chunks(provision))
        } else {
            self.sentences.estimate_chunks(provision)
        }
    }
}
