//! Greedy bin-packing of text units under a token budget.
//!
//! Both the sentence splitter and the paragraph packer run the same loop;
//! they only differ in what a unit is and what separates two units.
//!
//! ```text
//! header = "Article 5\n\n"     sep = "\n\n"     budget = 800
//!
//! acc = header
//! unit P1 (300): candidate = acc + P1 + sep   ~305  fits   -> acc = candidate
//! unit P2 (300): candidate = acc + P2 + sep   ~607  fits   -> acc = candidate
//! unit P3 (300): candidate = acc + P3 + sep   ~909  over   -> flush acc (#0)
//!                                                          -> acc = header + P3 + sep
//! end:                                                        flush acc (#1)
//! ```
//!
//! An accumulator that holds only the header is never flushed, so a unit
//! larger than the whole budget is absorbed and later emitted on its own.

use std::sync::Arc;

use crate::{Chunk, Provision, TokenBudget, TokenCounter};

/// A token counter paired with the budget it is checked against.
#[derive(Clone)]
pub(crate) struct Sizer {
    counter: Arc<dyn TokenCounter>,
    budget: TokenBudget,
}

impl Sizer {
    pub(crate) fn new(counter: Arc<dyn TokenCounter>, budget: TokenBudget) -> Self {
        Self { counter, budget }
    }

    pub(crate) fn budget(&self) -> TokenBudget {
        self.budget
    }

    pub(crate) fn count(&self, text: &str) -> usize {
        self.counter.count_tokens(text)
    }

    pub(crate) fn fits(&self, text: &str) -> bool {
        self.budget.fits(self.count(text))
    }
}

impl std::fmt::Debug for Sizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sizer")
            .field("budget", &self.budget)
            .finish_non_exhaustive()
    }
}

/// The whole provision as one chunk, if `header + text` fits the budget.
pub(crate) fn single_chunk(sizer: &Sizer, provision: &Provision) -> Option<Chunk> {
    let full = provision.header() + &provision.text;
    sizer
        .fits(&full)
        .then(|| Chunk::from_provision(provision, full.trim(), 0))
}

/// Accumulates units of one provision and flushes chunks as the budget fills.
pub(crate) struct GreedyPacker<'a> {
    sizer: &'a Sizer,
    provision: &'a Provision,
    separator: &'static str,
    header: String,
    acc: String,
    chunk_idx: usize,
    chunks: Vec<Chunk>,
}

impl<'a> GreedyPacker<'a> {
    pub(crate) fn new(sizer: &'a Sizer, provision: &'a Provision, separator: &'static str) -> Self {
        let header = provision.header();
        Self {
            sizer,
            provision,
            separator,
            acc: header.clone(),
            header,
            chunk_idx: 0,
            chunks: Vec::new(),
        }
    }

    /// Add the next unit, flushing first if it would overflow a non-bare accumulator.
    pub(crate) fn push(&mut self, unit: &str) {
        let mut candidate =
            String::with_capacity(self.acc.len() + unit.len() + self.separator.len());
        candidate.push_str(&self.acc);
        candidate.push_str(unit);
        candidate.push_str(self.separator);

        // acc always starts with the header, so a longer acc holds content.
        if !self.sizer.fits(&candidate) && self.acc.len() > self.header.len() {
            self.flush();
            self.acc.clear();
            self.acc.push_str(&self.header);
            self.acc.push_str(unit);
            self.acc.push_str(self.separator);
        } else {
            self.acc = candidate;
        }
    }

    /// Flush the trailing accumulator unless it is only the header.
    pub(crate) fn finish(mut self) -> Vec<Chunk> {
        if self.acc.trim() != self.header.trim() {
            self.flush();
        }
        self.chunks
    }

    fn flush(&mut self) {
        let text = self.acc.trim();
        let tokens = self.sizer.count(text);
        if !self.sizer.budget().fits(tokens) {
            tracing::warn!(
                id = %self.provision.id,
                chunk_idx = self.chunk_idx,
                tokens,
                max = self.sizer.budget().max(),
                "emitting oversized chunk for an unsplittable unit"
            );
        }
        self.chunks
            .push(Chunk::from_provision(self.provision, text, self.chunk_idx));
        self.chunk_idx += 1;
    }
}
