//! Per-sentence statistics, computed once before resampling.

use log::info;

use crate::config::{RibesConfig, MAX_NGRAM};
use crate::corpus::{Sentence, TranslationSet};
use crate::ngram::{average_length, closest_length, NgramCounts, ReferenceNgrams};
use crate::rank::{best_rank_stats, RankStats};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentenceStats {
    pub hyp_len: usize,
    /// Closest reference length.
    pub ref_len: usize,
    pub avg_ref_len: f64,
    /// Clipped matches per order, index 0 holds unigrams.
    pub correct: [usize; MAX_NGRAM],
    /// Hypothesis n-grams per order.
    pub total: [usize; MAX_NGRAM],
    pub rank: RankStats,
}

impl SentenceStats {
    pub fn compute(
        hyp: &Sentence,
        references: &[&Sentence],
        reference_ngrams: &ReferenceNgrams,
        config: &RibesConfig,
    ) -> Self {
        let mut correct = [0; MAX_NGRAM];
        let mut total = [0; MAX_NGRAM];
        for order in 1..=MAX_NGRAM {
            let counts = NgramCounts::of(hyp, order);
            correct[order - 1] = reference_ngrams.order(order).clipped_matches(&counts);
            total[order - 1] = counts.total();
        }

        Self {
            hyp_len: hyp.len(),
            ref_len: closest_length(references, hyp.len()),
            avg_ref_len: average_length(references),
            correct,
            total,
            rank: best_rank_stats(hyp, references, config.multi_ref),
        }
    }
}

/// Statistics of both systems, line by line.
#[derive(Debug, Clone)]
pub struct PairedStats {
    pub hyp1: Vec<SentenceStats>,
    pub hyp2: Vec<SentenceStats>,
}

impl PairedStats {
    pub fn compute(set: &TranslationSet, config: &RibesConfig) -> Self {
        let reference_ngrams: Vec<ReferenceNgrams> = (0..set.len())
            .map(|line| ReferenceNgrams::new(&set.references_at(line)))
            .collect();

        let evaluate = |hyps: &[Sentence]| -> Vec<SentenceStats> {
            hyps.iter()
                .enumerate()
                .map(|(line, hyp)| {
                    SentenceStats::compute(
                        hyp,
                        &set.references_at(line),
                        &reference_ngrams[line],
                        config,
                    )
                })
                .collect()
        };

        info!("performing preliminary calculations (hypothesis 1)");
        let hyp1 = evaluate(&set.hyp1);
        info!("performing preliminary calculations (hypothesis 2)");
        let hyp2 = evaluate(&set.hyp2);
        Self { hyp1, hyp2 }
    }
}
