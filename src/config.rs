//! Run configuration.
//!
//! Everything that tunes a comparison lives here and is handed to the scorers
//! and the bootstrap engine when they are built.

use crate::error::{Error, Result};

/// Highest n-gram order used by BLEU.
pub const MAX_NGRAM: usize = 4;

pub const DEFAULT_TRIALS: usize = 1000;
pub const DEFAULT_ALPHA: f64 = 0.25;
pub const DEFAULT_BETA: f64 = 0.10;

#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapConfig {
    /// Number of resampling trials.
    pub trials: usize,
    /// Indices drawn per trial; 0 means the corpus size.
    pub sample_size: usize,
    /// Fixed seed for reproducible runs; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            sample_size: 0,
            seed: None,
        }
    }
}

impl BootstrapConfig {
    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(Error::InvalidConfig("trials must be positive".into()));
        }
        Ok(())
    }

    pub fn sample_size_for(&self, corpus_size: usize) -> usize {
        if self.sample_size > 0 {
            self.sample_size
        } else {
            corpus_size
        }
    }
}

/// What BLEU does with an order that has no hypothesis n-grams at all,
/// e.g. 4-grams over a corpus of 3-token sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyOrderPolicy {
    /// Leave the order out of the geometric mean.
    #[default]
    Skip,
    /// Count it as a zero precision, which zeroes the score.
    Zero,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BleuConfig {
    pub empty_order: EmptyOrderPolicy,
}

/// How per-reference RIBES statistics are combined for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultiRefPolicy {
    /// Best pair count and best ascending count, each over all references.
    #[default]
    Independent,
    /// Both counts from the reference with the most ascending pairs.
    BestReference,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RibesConfig {
    /// Exponent of the unigram precision term.
    pub alpha: f64,
    /// Exponent of the brevity term.
    pub beta: f64,
    pub multi_ref: MultiRefPolicy,
}

impl Default for RibesConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            multi_ref: MultiRefPolicy::default(),
        }
    }
}

impl RibesConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(Error::InvalidConfig(format!("alpha = {}", self.alpha)));
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(Error::InvalidConfig(format!("beta = {}", self.beta)));
        }
        Ok(())
    }
}
