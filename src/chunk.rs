//! The Chunk type: an embeddable slice of a provision with citation metadata.

use serde::{Deserialize, Serialize};

use crate::{Provision, ProvisionKind};

/// Citation metadata carried by every chunk.
///
/// A flat, owned copy of the provision fields a retriever filters on and an
/// answer cites. Nothing in it points back at the source [`Provision`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Id of the source provision.
    pub provision_id: String,
    /// Kind of the source provision.
    #[serde(rename = "type")]
    pub kind: ProvisionKind,
    /// Display number of the source provision.
    pub number: String,
    /// Title of the source provision.
    pub title: String,
    /// Chapter number, articles only.
    pub chapter: Option<String>,
    /// Chapter heading, articles only.
    pub chapter_title: Option<String>,
    /// Zero-based position of this chunk within its provision.
    pub chunk_idx: usize,
}

/// A chunk of provision text ready for embedding.
///
/// ## Ids
///
/// The first chunk of a provision reuses the provision id; later chunks add
/// `#{chunk_idx}`:
///
/// ```text
/// art_5       chunk_idx 0
/// art_5#1     chunk_idx 1
/// art_5#2     chunk_idx 2
/// ```
///
/// Given unique provision ids, chunk ids are unique across a corpus, which
/// is what an upserting vector store needs.
///
/// ```rust
/// use lexslab::{Chunk, Provision};
///
/// let art = Provision::article("art_5", "5", "Article 5", "Text.");
/// assert_eq!(Chunk::from_provision(&art, "Article 5\n\nText.", 0).id, "art_5");
/// assert_eq!(Chunk::from_provision(&art, "Article 5\n\nMore.", 2).id, "art_5#2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Globally unique chunk id.
    pub id: String,
    /// Chunk text, starting with the provision header.
    pub text: String,
    /// Citation metadata.
    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// Build a chunk for `provision` holding `text`.
    ///
    /// `chunk_idx` must be assigned sequentially from 0 within one
    /// provision; the builder does not check it.
    #[must_use]
    pub fn from_provision(provision: &Provision, text: impl Into<String>, chunk_idx: usize) -> Self {
        let id = if chunk_idx > 0 {
            format!("{}#{}", provision.id, chunk_idx)
        } else {
            provision.id.clone()
        };
        Self {
            id,
            text: text.into(),
            metadata: ChunkMetadata {
                provision_id: provision.id.clone(),
                kind: provision.kind,
                number: provision.number.clone(),
                title: provision.title.clone(),
                chapter: provision.chapter.clone(),
                chapter_title: provision.chapter_title.clone(),
                chunk_idx,
            },
        }
    }

    /// Zero-based index of this chunk within its provision.
    #[must_use]
    pub fn chunk_idx(&self) -> usize {
        self.metadata.chunk_idx
    }

    /// Id of the provision this chunk came from.
    #[must_use]
    pub fn provision_id(&self) -> &str {
        &self.metadata.provision_id
    }

    /// The chunk text without the leading provision header.
    ///
    /// Falls back to the full text if the header is not a prefix.
    #[must_use]
    pub fn body(&self) -> &str {
        self.text
            .strip_prefix(self.metadata.title.as_str())
            .map(str::trim_start)
            .unwrap_or(&self.text)
    }

    /// The length of the chunk text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the chunk text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunk {{ id: {}, type: {}, idx: {}, len: {} }}",
            self.id,
            self.metadata.kind,
            self.metadata.chunk_idx,
            self.len()
        )
    }
}
