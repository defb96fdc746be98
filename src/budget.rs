//! The token budget a chunk is packed against.
//!
//! ## Soft Ceiling
//!
//! The budget decides when the greedy packers flush, nothing more. A unit
//! (paragraph or sentence) is never cut, so a single unit larger than the
//! budget still becomes one chunk:
//!
//! ```text
//! Budget: 800
//! Units:  [300] [300] [300]     -> [header+300+300] [header+300]
//! Units:  [1700] [300]          -> [header+1700]    [header+300]
//!                                   ^ over budget, emitted whole
//! ```
//!
//! The number must track the input ceiling of whatever embedding model the
//! deployment uses.

use crate::{Error, Result};

/// Default token ceiling per chunk.
pub const MAX_TOKENS: usize = 800;

/// A non-zero token ceiling for one chunk.
///
/// # Examples
///
/// ```rust
/// use lexslab::TokenBudget;
///
/// let budget = TokenBudget::default();
/// assert_eq!(budget.max(), 800);
/// assert!(budget.fits(800));
/// assert!(!budget.fits(801));
///
/// assert!(TokenBudget::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBudget {
    max: usize,
}

impl TokenBudget {
    /// Create a budget of `max` tokens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBudget`] if `max == 0`.
    pub fn new(max: usize) -> Result<Self> {
        if max == 0 {
            Err(Error::InvalidBudget(max))
        } else {
            Ok(Self { max })
        }
    }

    /// The ceiling in tokens.
    #[must_use]
    pub const fn max(&self) -> usize {
        self.max
    }

    /// Whether `tokens` stays within the ceiling (inclusive).
    #[must_use]
    pub const fn fits(&self, tokens: usize) -> bool {
        tokens <= self.max
    }
}

impl Default for TokenBudget {
    fn default() -> Self {
        Self { max: MAX_TOKENS }
    }
}

impl TryFrom<usize> for TokenBudget {
    type Error = Error;

    fn try_from(max: usize) -> Result<Self> {
        Self::new(max)
    }
}
