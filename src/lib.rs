//! # lexslab
//!
//! Document-aware chunking of EU AI Act provisions for retrieval-augmented
//! generation.
//!
//! ## The Problem
//!
//! An agent answering questions about the AI Act retrieves provision text
//! from a vector index and has to cite what it used. Generic chunkers cut
//! the regulation into anonymous windows. That breaks two things:
//!
//! - A citation needs to know which article, recital or annex a passage
//!   came from, and which chapter it sits in
//! - A chunk boundary in the middle of "Article 5(1)(a)" loses the structure
//!   the text is cited by
//!
//! So chunks here follow the legal structure and carry that structure as
//! metadata.
//!
//! ## Provisions In, Chunks Out
//!
//! ```text
//! Provision { id: "art_5", type: article, title: "Article 5 — Prohibited AI practices",
//!             paragraphs: [P1, P2, P3], chapter: "II", ... }
//!                                  |
//!                                  v
//! Chunk { id: "art_5",   text: "Article 5 — ...\n\nP1\n\nP2", metadata: { chunk_idx: 0, ... } }
//! Chunk { id: "art_5#1", text: "Article 5 — ...\n\nP3",       metadata: { chunk_idx: 1, ... } }
//! ```
//!
//! Every chunk starts with the provision title (the header), so each one
//! still says what it is when retrieved alone.
//!
//! ## Strategies
//!
//! Each provision is kept at the largest unit that fits the token budget
//! (800 `o200k_base` tokens by default):
//!
//! | Kind | Whole | Paragraphs | Sentences |
//! |------|-------|------------|-----------|
//! | article | yes | yes | if no paragraphs |
//! | recital | yes | - | yes |
//! | annex | yes | - | yes |
//!
//! Packing is greedy: units are added until the next one would overflow,
//! then the chunk is flushed. Units are never cut, so a single unit larger
//! than the budget becomes one oversized chunk.
//!
//! ## Quick Start
//!
//! ```rust
//! use lexslab::{chunk_provisions, Paragraph, Provision};
//!
//! let provisions = vec![
//!     Provision::article("art_5", "5", "Article 5 — Prohibited AI practices", "")
//!         .with_chapter("II", "PROHIBITED AI PRACTICES")
//!         .with_paragraphs(vec![
//!             Paragraph::new("005.001", "1. The following AI practices shall be prohibited."),
//!             Paragraph::new("005.002", "2. The use of 'real-time' remote biometric identification systems shall be limited."),
//!         ]),
//!     Provision::recital("rct_1", "1", "Recital 1", "The purpose of this Regulation is to improve the functioning of the internal market."),
//! ];
//!
//! let chunks = chunk_provisions(&provisions).unwrap();
//! assert_eq!(chunks.len(), 2);
//! assert_eq!(chunks[0].metadata.chapter.as_deref(), Some("II"));
//! assert!(chunks[1].text.starts_with("Recital 1\n\n"));
//! ```
//!
//! ## Custom Token Counting
//!
//! The count must match the embedding model's tokenizer. For a model other
//! than the `gpt-4o` family, implement [`TokenCounter`]:
//!
//! ```rust
//! use std::sync::Arc;
//! use lexslab::{ProvisionChunker, TokenBudget, TokenCounter};
//!
//! struct Words;
//!
//! impl TokenCounter for Words {
//!     fn count_tokens(&self, text: &str) -> usize {
//!         text.split_whitespace().count()
//!     }
//! }
//!
//! let chunker = ProvisionChunker::with_counter(Arc::new(Words), TokenBudget::new(512).unwrap());
//! assert_eq!(chunker.budget().max(), 512);
//! ```

mod budget;
mod chunk;
mod config;
mod error;
mod index;
mod pack;
mod paragraph;
mod provision;
mod router;
mod sentence;
mod token;

pub use budget::{TokenBudget, MAX_TOKENS};
pub use chunk::{Chunk, ChunkMetadata};
pub use config::{ChunkerConfig, ENV_PREFIX};
pub use error::{Error, Result};
pub use index::{index_chunks, reassemble, ChunkIndex, MemoryIndex, DEFAULT_BATCH_SIZE};
pub use paragraph::ParagraphPacker;
pub use provision::{
    load_provisions, save_provisions, Paragraph, Provision, ProvisionKind, DEFAULT_LANG,
};
pub use router::{chunk_provisions, ProvisionChunker};
pub use sentence::{split_sentences, SentenceSplitter};
pub use token::{O200kCounter, TokenCounter};

/// A provision chunking strategy.
///
/// Strategies are infallible: they assume a provision that passed
/// [`Provision::validate`]. [`ProvisionChunker`] validates and then picks
/// the strategy for each provision's kind.
///
/// ```rust
/// use std::sync::Arc;
/// use lexslab::{Chunker, O200kCounter, ParagraphPacker, Provision, SentenceSplitter, TokenBudget};
///
/// fn chunk_with(chunker: &dyn Chunker, provision: &Provision) -> Vec<lexslab::Chunk> {
///     chunker.chunk(provision)
/// }
///
/// let counter = Arc::new(O200kCounter::new().unwrap());
/// let sentences = SentenceSplitter::new(counter.clone(), TokenBudget::default());
/// let paragraphs = ParagraphPacker::new(counter, TokenBudget::default());
///
/// let annex = Provision::annex("anx_I", "I", "ANNEX I", "List of Union harmonisation legislation.");
/// assert_eq!(chunk_with(&sentences, &annex).len(), 1);
/// assert_eq!(chunk_with(&paragraphs, &annex).len(), 1);
/// ```
pub trait Chunker: Send + Sync {
    /// Split a provision into chunks, in order, with `chunk_idx` from 0.
    fn chunk(&self, provision: &Provision) -> Vec<Chunk>;

    /// Estimate the number of chunks for a provision.
    ///
    /// Useful for pre-allocation. May be approximate.
    fn estimate_chunks(&self, provision: &Provision) -> usize {
        // ~4 bytes per token, default budget
        (provision.text.len() / (MAX_TOKENS * 4)).max(1)
    }
}
