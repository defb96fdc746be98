//! Token counting.
//!
//! Chunk sizes are measured in tokens of the embedding model, not bytes or
//! characters. The count has to come from the same scheme the embedding API
//! applies to its input limit, otherwise a chunk that "fits" here can still
//! be truncated or rejected downstream.
//!
//! The default is `o200k_base`, the BPE of the `gpt-4o` model family.
//! Deployments embedding with a different model implement [`TokenCounter`]
//! for their own scheme.

use tiktoken_rs::CoreBPE;

use crate::{Error, Result};

/// Maps text to a token count.
///
/// Implementations must be deterministic: the same text always yields the
/// same count.
pub trait TokenCounter: Send + Sync {
    /// Number of tokens in `text`.
    fn count_tokens(&self, text: &str) -> usize;
}

/// `o200k_base` token counter.
///
/// Text is encoded as ordinary text; special-token markers such as
/// `<|endoftext|>` are counted as the plain characters they are.
///
/// ```rust
/// use lexslab::{O200kCounter, TokenCounter};
///
/// let counter = O200kCounter::new().unwrap();
/// assert_eq!(counter.count_tokens(""), 0);
/// assert!(counter.count_tokens("Article 5 — Prohibited AI practices") > 0);
/// ```
pub struct O200kCounter {
    bpe: CoreBPE,
}

impl O200kCounter {
    /// Load the `o200k_base` encoding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Tokenizer`] if the encoding fails to load.
    pub fn new() -> Result<Self> {
        let bpe = tiktoken_rs::o200k_base().map_err(|e| Error::Tokenizer(e.to_string()))?;
        Ok(Self { bpe })
    }
}

impl TokenCounter for O200kCounter {
    fn count_tokens(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }
}

impl std::fmt::Debug for O200kCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("O200kCounter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_has_no_tokens() {
        let counter = O200kCounter::new().unwrap();
        assert_eq!(counter.count_tokens(""), 0);
    }

    #[test]
    fn test_count_is_deterministic() {
        let counter = O200kCounter::new().unwrap();
        let text = "Providers of high-risk AI systems shall ensure compliance.";
        assert_eq!(counter.count_tokens(text), counter.count_tokens(text));
    }

    #[test]
    fn test_longer_text_has_more_tokens() {
        let counter = O200kCounter::new().unwrap();
        let short = "The following AI practices shall be prohibited.";
        let long = short.repeat(10);
        assert!(counter.count_tokens(&long) > counter.count_tokens(short));
    }

    #[test]
    fn test_special_token_text_is_ordinary() {
        let counter = O200kCounter::new().unwrap();
        assert!(counter.count_tokens("<|endoftext|>") > 1);
    }
}
