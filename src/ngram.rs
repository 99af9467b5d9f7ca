//! N-gram bookkeeping for BLEU.

use std::collections::HashMap;

use crate::config::MAX_NGRAM;
use crate::corpus::Sentence;

/// N-gram tallies; missing n-grams count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NgramCounts(HashMap<String, usize>);

impl NgramCounts {
    pub fn of(words: &[String], order: usize) -> Self {
        let mut counts = HashMap::new();
        if order > 0 {
            for window in words.windows(order) {
                *counts.entry(window.join(" ")).or_insert(0) += 1;
            }
        }
        Self(counts)
    }

    pub fn get(&self, ngram: &str) -> usize {
        self.0.get(ngram).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(ngram, &count)| (ngram.as_str(), count))
    }

    /// Per n-gram maximum of both tallies.
    pub fn max_merge(mut self, other: &NgramCounts) -> Self {
        for (ngram, &count) in &other.0 {
            let slot = self.0.entry(ngram.clone()).or_insert(0);
            *slot = (*slot).max(count);
        }
        self
    }

    /// Hypothesis n-grams matched by these reference counts, clipped.
    pub fn clipped_matches(&self, hypothesis: &NgramCounts) -> usize {
        hypothesis
            .iter()
            .map(|(ngram, count)| count.min(self.get(ngram)))
            .sum()
    }
}

/// Maximum reference counts of every order for one line.
#[derive(Debug, Clone, Default)]
pub struct ReferenceNgrams {
    orders: Vec<NgramCounts>,
}

impl ReferenceNgrams {
    pub fn new(references: &[&Sentence]) -> Self {
        let orders = (1..=MAX_NGRAM)
            .map(|order| {
                references
                    .iter()
                    .fold(NgramCounts::default(), |acc, reference| {
                        acc.max_merge(&NgramCounts::of(reference, order))
                    })
            })
            .collect();
        Self { orders }
    }

    pub fn order(&self, order: usize) -> &NgramCounts {
        &self.orders[order - 1]
    }
}

/// Length of the reference closest to `hyp_len`, the shorter one on ties.
pub fn closest_length(references: &[&Sentence], hyp_len: usize) -> usize {
    references
        .iter()
        .map(|reference| reference.len())
        .min_by_key(|&len| (len.abs_diff(hyp_len), len))
        .unwrap_or(0)
}

pub fn average_length(references: &[&Sentence]) -> f64 {
    if references.is_empty() {
        return 0.0;
    }
    let sum: usize = references.iter().map(|reference| reference.len()).sum();
    sum as f64 / references.len() as f64
}
