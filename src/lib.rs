//! Paired bootstrap significance tests for two machine translation outputs,
//! over BLEU, RIBES and alignment based reordering scores.

pub mod alignment;
pub mod bootstrap;
pub mod config;
pub mod corpus;
pub mod error;
pub mod metrics;
pub mod ngram;
pub mod order;
pub mod rank;
pub mod report;
pub mod stats;

pub use bootstrap::{BootstrapEngine, Comparison, Interval, ScoreDistribution, TrialScores};
pub use config::{BleuConfig, BootstrapConfig, EmptyOrderPolicy, MultiRefPolicy, RibesConfig};
pub use corpus::{ReorderingSet, Sentence, TranslationSet};
pub use error::{Error, Result};
pub use metrics::{Bleu, CorpusScorer, Reordering, ReorderingMeasure, Ribes};
pub use stats::{PairedStats, SentenceStats};
