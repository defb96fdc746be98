//! Dispatch of provisions to their chunking strategy.
//!
//! | Kind | Strategy |
//! |------|----------|
//! | article | whole → paragraphs → sentences ([`ParagraphPacker`]) |
//! | recital | whole → sentences ([`SentenceSplitter`]) |
//! | annex | whole → sentences ([`SentenceSplitter`]) |
//! | anything else | skipped, no chunks |
//!
//! Recitals never have paragraph structure. Annexes can be long, but their
//! paragraph boundaries are not reliable in the parsed corpus, so they go
//! straight to sentences.

use std::sync::Arc;

use crate::pack::Sizer;
use crate::{
    Chunk, ChunkerConfig, Chunker, O200kCounter, ParagraphPacker, Provision, ProvisionKind,
    Result, SentenceSplitter, TokenBudget, TokenCounter,
};

/// Chunks whole provision lists, one strategy per provision kind.
///
/// Immutable once built; share it freely between threads.
///
/// ```rust
/// use lexslab::{Provision, ProvisionChunker};
///
/// let chunker = ProvisionChunker::new().unwrap();
/// let chunks = chunker
///     .chunk_provisions(&[
///         Provision::article("art_3", "3", "Article 3 — Definitions", "For the purposes of this Regulation, the following definitions apply."),
///         Provision::recital("rct_1", "1", "Recital 1", "The purpose of this Regulation is to improve the functioning of the internal market."),
///     ])
///     .unwrap();
///
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[0].id, "art_3");
/// assert_eq!(chunks[1].id, "rct_1");
/// ```
#[derive(Debug, Clone)]
pub struct ProvisionChunker {
    sizer: Sizer,
    articles: ParagraphPacker,
    sentences: SentenceSplitter,
}

impl ProvisionChunker {
    /// Chunker counting `o200k_base` tokens against the default 800-token budget.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Tokenizer`] if the encoding fails to load.
    pub fn new() -> Result<Self> {
        Ok(Self::with_counter(
            Arc::new(O200kCounter::new()?),
            TokenBudget::default(),
        ))
    }

    /// Chunker for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured budget is zero or the encoding
    /// fails to load.
    pub fn from_config(config: &ChunkerConfig) -> Result<Self> {
        let budget = config.budget()?;
        Ok(Self::with_counter(Arc::new(O200kCounter::new()?), budget))
    }

    /// Chunker with a custom token counter.
    pub fn with_counter(counter: Arc<dyn TokenCounter>, budget: TokenBudget) -> Self {
        let sizer = Sizer::new(counter, budget);
        Self {
            articles: ParagraphPacker::from_sizer(sizer.clone()),
            sentences: SentenceSplitter::from_sizer(sizer.clone()),
            sizer,
        }
    }

    /// The token budget chunks are packed against.
    #[must_use]
    pub fn budget(&self) -> TokenBudget {
        self.sizer.budget()
    }

    /// Count tokens with this chunker's counter.
    #[must_use]
    pub fn count_tokens(&self, text: &str) -> usize {
        self.sizer.count(text)
    }

    /// The strategy for `kind`, or `None` for kinds that are not chunked.
    #[must_use]
    pub fn strategy(&self, kind: ProvisionKind) -> Option<&dyn Chunker> {
        match kind {
            ProvisionKind::Article => Some(&self.articles),
            ProvisionKind::Recital | ProvisionKind::Annex => Some(&self.sentences),
            ProvisionKind::Unknown => None,
        }
    }

    /// Chunk one provision.
    ///
    /// Provisions of an unknown kind yield no chunks and are not validated.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidProvision`] if the provision breaks the
    /// input contract (see [`Provision::validate`]).
    pub fn chunk_provision(&self, provision: &Provision) -> Result<Vec<Chunk>> {
        let Some(strategy) = self.strategy(provision.kind) else {
            tracing::trace!(id = %provision.id, "skipping provision of unknown type");
            return Ok(Vec::new());
        };
        provision.validate()?;

        let chunks = strategy.chunk(provision);
        tracing::debug!(
            id = %provision.id,
            kind = %provision.kind,
            chunks = chunks.len(),
            "chunked provision"
        );
        Ok(chunks)
    }

    /// Chunk provisions in order and concatenate the results.
    ///
    /// All or nothing: the first invalid provision aborts the call. Callers
    /// that want to continue past bad records can call
    /// [`chunk_provision`](Self::chunk_provision) per item instead.
    ///
    /// # Errors
    ///
    /// Returns the first [`crate::Error::InvalidProvision`] encountered.
    pub fn chunk_provisions(&self, provisions: &[Provision]) -> Result<Vec<Chunk>> {
        let mut chunks = Vec::with_capacity(provisions.len());
        for provision in provisions {
            chunks.extend(self.chunk_provision(provision)?);
        }
        tracing::debug!(
            provisions = provisions.len(),
            chunks = chunks.len(),
            "chunked provisions"
        );
        Ok(chunks)
    }
}

/// Chunk `provisions` with the default `o200k_base` counter and 800-token budget.
///
/// # Errors
///
/// Returns an error if the encoding fails to load or a provision is invalid.
pub fn chunk_provisions(provisions: &[Provision]) -> Result<Vec<Chunk>> {
    ProvisionChunker::new()?.chunk_provisions(provisions)
}
