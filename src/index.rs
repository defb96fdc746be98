//! Handing chunks to an embedding index.
//!
//! The vector store itself lives outside this crate. What it needs from the
//! chunker is small:
//!
//! - `text` is the embedding input
//! - `metadata` becomes filterable index fields
//! - `id` is the upsert key, so it has to be unique
//!
//! [`ChunkIndex`] is that seam. [`index_chunks`] checks id uniqueness before
//! writing anything and feeds the index in batches. [`MemoryIndex`] keeps
//! everything in memory and answers the lookups an agent's retrieval tools
//! make (a provision's full text, the articles of a chapter).

use std::collections::{BTreeMap, HashSet};

use crate::{Chunk, Error, ProvisionKind, Result};

/// Default number of chunks per upsert call.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// A store that embeds and indexes chunks.
pub trait ChunkIndex {
    /// Insert or replace `batch`, keyed by chunk id.
    ///
    /// # Errors
    ///
    /// Implementations report backend failures as [`Error::Index`].
    fn upsert(&mut self, batch: &[Chunk]) -> Result<()>;
}

/// Upsert `chunks` into `index`, `batch_size` at a time.
///
/// Returns the number of chunks written.
///
/// # Errors
///
/// Returns [`Error::InvalidBatchSize`] for a zero batch size and
/// [`Error::DuplicateChunkId`] if two chunks share an id; in both cases
/// nothing is written. Backend errors are passed through and abort the
/// remaining batches.
pub fn index_chunks<I>(index: &mut I, chunks: &[Chunk], batch_size: usize) -> Result<usize>
where
    I: ChunkIndex + ?Sized,
{
    if batch_size == 0 {
        return Err(Error::InvalidBatchSize(batch_size));
    }

    let mut seen = HashSet::with_capacity(chunks.len());
    if let Some(dup) = chunks.iter().find(|c| !seen.insert(c.id.as_str())) {
        return Err(Error::DuplicateChunkId(dup.id.clone()));
    }

    let mut written = 0;
    for batch in chunks.chunks(batch_size) {
        index.upsert(batch)?;
        written += batch.len();
        tracing::info!(written, total = chunks.len(), "indexed chunks");
    }
    Ok(written)
}

/// Re-join the chunks of one provision into its body text.
///
/// Chunks are ordered by `chunk_idx`, stripped of the repeated header and
/// joined with a blank line. Up to whitespace this gives back the text the
/// provision was chunked from.
///
/// ```rust
/// use lexslab::{reassemble, Chunk, Provision};
///
/// let p = Provision::annex("anx_I", "I", "ANNEX I", "unused");
/// let chunks = vec![
///     Chunk::from_provision(&p, "ANNEX I\n\nSecond part.", 1),
///     Chunk::from_provision(&p, "ANNEX I\n\nFirst part.", 0),
/// ];
/// assert_eq!(reassemble(&chunks), "First part.\n\nSecond part.");
/// ```
#[must_use]
pub fn reassemble(chunks: &[Chunk]) -> String {
    let mut ordered: Vec<&Chunk> = chunks.iter().collect();
    ordered.sort_by_key(|c| c.chunk_idx());
    ordered
        .iter()
        .map(|c| c.body())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// In-memory [`ChunkIndex`], keyed and iterated by chunk id.
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex {
    chunks: BTreeMap<String, Chunk>,
}

impl MemoryIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of chunks stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Look up a chunk by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Chunk> {
        self.chunks.get(id)
    }

    /// All chunks of a provision, ordered by `chunk_idx`.
    #[must_use]
    pub fn lookup_provision(&self, provision_id: &str) -> Vec<&Chunk> {
        let mut hits: Vec<&Chunk> = self
            .chunks
            .values()
            .filter(|c| c.provision_id() == provision_id)
            .collect();
        hits.sort_by_key(|c| c.chunk_idx());
        hits
    }

    /// Full body of a provision rebuilt from its chunks, if indexed.
    #[must_use]
    pub fn provision_text(&self, provision_id: &str) -> Option<String> {
        let hits: Vec<Chunk> = self
            .lookup_provision(provision_id)
            .into_iter()
            .cloned()
            .collect();
        (!hits.is_empty()).then(|| reassemble(&hits))
    }

    /// Chunks of the given kind.
    pub fn filter_kind(&self, kind: ProvisionKind) -> impl Iterator<Item = &Chunk> + '_ {
        self.chunks.values().filter(move |c| c.metadata.kind == kind)
    }

    /// `(provision_id, title)` of every article in `chapter`, one entry per
    /// article, in id order.
    #[must_use]
    pub fn articles_in_chapter(&self, chapter: &str) -> Vec<(String, String)> {
        let mut seen = HashSet::new();
        self.filter_kind(ProvisionKind::Article)
            .filter(|c| c.metadata.chapter.as_deref() == Some(chapter))
            .filter(|c| seen.insert(c.provision_id().to_string()))
            .map(|c| (c.provision_id().to_string(), c.metadata.title.clone()))
            .collect()
    }
}

impl ChunkIndex for MemoryIndex {
    fn upsert(&mut self, batch: &[Chunk]) -> Result<()> {
        for chunk in batch {
            self.chunks.insert(chunk.id.clone(), chunk.clone());
        }
        Ok(())
    }
}
