//! Chunker configuration.
//!
//! Sources are merged in this order, later ones winning:
//!
//! 1. Defaults ([`ChunkerConfig::default`])
//! 2. A TOML file, if given and present
//! 3. `LEXSLAB_`-prefixed environment variables (`LEXSLAB_MAX_TOKENS=512`)
//!
//! ```toml
//! # lexslab.toml
//! max_tokens = 800
//! batch_size = 100
//! ```

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::budget::MAX_TOKENS;
use crate::index::DEFAULT_BATCH_SIZE;
use crate::{Error, Result, TokenBudget};

/// Prefix of environment variables read by [`ChunkerConfig::load`].
pub const ENV_PREFIX: &str = "LEXSLAB_";

/// Tunables for chunking and indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// Token ceiling per chunk. Must match the embedding model's input limit.
    pub max_tokens: usize,
    /// Chunks per upsert call when indexing.
    pub batch_size: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_tokens: MAX_TOKENS,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl ChunkerConfig {
    /// Load configuration from defaults, an optional TOML file, and the
    /// environment.
    ///
    /// A missing file is not an error; the remaining sources still apply.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a source cannot be parsed,
    /// [`Error::InvalidBudget`] if `max_tokens` is zero, or
    /// [`Error::InvalidBatchSize`] if `batch_size` is zero.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading configuration file");
                figment = figment.merge(Toml::file(path));
            } else {
                tracing::debug!(path = %path.display(), "configuration file not found, skipping");
            }
        }

        let config: Self = figment.merge(Env::prefixed(ENV_PREFIX)).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// The configured budget.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBudget`] if `max_tokens` is zero.
    pub fn budget(&self) -> Result<TokenBudget> {
        TokenBudget::new(self.max_tokens)
    }

    fn validate(&self) -> Result<()> {
        self.budget()?;
        if self.batch_size == 0 {
            return Err(Error::InvalidBatchSize(self.batch_size));
        }
        Ok(())
    }
}
