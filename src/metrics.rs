//! Corpus-level scores over an arbitrary multiset of line indices.

use std::fmt;

use crate::alignment::Alignment;
use crate::config::{BleuConfig, EmptyOrderPolicy, RibesConfig, MAX_NGRAM};
use crate::stats::SentenceStats;

/// A metric for one system, scored on any subset of its lines.
pub trait CorpusScorer {
    /// Number of lines in the corpus.
    fn len(&self) -> usize;

    /// Score over `indices`. Indices may repeat.
    fn score(&self, indices: &[usize]) -> f64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn score_all(&self) -> f64 {
        let all: Vec<usize> = (0..self.len()).collect();
        self.score(&all)
    }
}

/// Aggregated BLEU figures, printed like multi-bleu.perl does.
#[derive(Debug, Clone, PartialEq)]
pub struct BleuBreakdown {
    pub score: f64,
    pub precisions: [f64; MAX_NGRAM],
    pub brevity_penalty: f64,
    pub hyp_len: usize,
    /// Closest reference lengths, summed.
    pub ref_len: usize,
    /// Average reference lengths, summed.
    pub avg_ref_len: f64,
}

impl BleuBreakdown {
    pub fn ratio(&self) -> f64 {
        if self.ref_len == 0 {
            0.0
        } else {
            self.hyp_len as f64 / self.ref_len as f64
        }
    }
}

impl fmt::Display for BleuBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BLEU = {:.2}, {:.1}/{:.1}/{:.1}/{:.1} (BP={:.3}, ratio={:.3}, hyp_len={}, ref_len={}, avg_ref_len={:.1})",
            100.0 * self.score,
            100.0 * self.precisions[0],
            100.0 * self.precisions[1],
            100.0 * self.precisions[2],
            100.0 * self.precisions[3],
            self.brevity_penalty,
            self.ratio(),
            self.hyp_len,
            self.ref_len,
            self.avg_ref_len
        )
    }
}

pub struct Bleu<'a> {
    stats: &'a [SentenceStats],
    config: BleuConfig,
}

impl<'a> Bleu<'a> {
    pub fn new(stats: &'a [SentenceStats], config: &BleuConfig) -> Self {
        Self {
            stats,
            config: config.clone(),
        }
    }

    pub fn breakdown(&self, indices: &[usize]) -> BleuBreakdown {
        let mut hyp_len = 0;
        let mut ref_len = 0;
        let mut avg_ref_len = 0.0;
        let mut correct = [0usize; MAX_NGRAM];
        let mut total = [0usize; MAX_NGRAM];
        for &i in indices {
            let s = &self.stats[i];
            hyp_len += s.hyp_len;
            ref_len += s.ref_len;
            avg_ref_len += s.avg_ref_len;
            for order in 0..MAX_NGRAM {
                correct[order] += s.correct[order];
                total[order] += s.total[order];
            }
        }

        let mut precisions = [0.0; MAX_NGRAM];
        for order in 0..MAX_NGRAM {
            if total[order] > 0 {
                precisions[order] = correct[order] as f64 / total[order] as f64;
            }
        }

        let brevity_penalty = if hyp_len == 0 {
            0.0
        } else if hyp_len < ref_len {
            (1.0 - ref_len as f64 / hyp_len as f64).exp()
        } else {
            1.0
        };

        let score = geometric_mean(&correct, &total, &precisions, self.config.empty_order)
            .map_or(0.0, |mean| brevity_penalty * mean);

        BleuBreakdown {
            score,
            precisions,
            brevity_penalty,
            hyp_len,
            ref_len,
            avg_ref_len,
        }
    }
}

/// `None` stands for a zero precision somewhere, i.e. a log of -inf.
fn geometric_mean(
    correct: &[usize; MAX_NGRAM],
    total: &[usize; MAX_NGRAM],
    precisions: &[f64; MAX_NGRAM],
    policy: EmptyOrderPolicy,
) -> Option<f64> {
    let mut log_sum = 0.0;
    let mut orders = 0;
    for order in 0..MAX_NGRAM {
        if total[order] == 0 {
            match policy {
                EmptyOrderPolicy::Skip => continue,
                EmptyOrderPolicy::Zero => return None,
            }
        }
        if correct[order] == 0 {
            return None;
        }
        log_sum += precisions[order].ln();
        orders += 1;
    }
    if orders == 0 {
        return None;
    }
    Some((log_sum / orders as f64).exp())
}

impl CorpusScorer for Bleu<'_> {
    fn len(&self) -> usize {
        self.stats.len()
    }

    fn score(&self, indices: &[usize]) -> f64 {
        self.breakdown(indices).score
    }
}

/// Sentence-level RIBES.
pub fn ribes_sentence(stats: &SentenceStats, config: &RibesConfig) -> f64 {
    if stats.hyp_len == 0 {
        return 0.0;
    }
    let pairs = stats.rank.pairs as f64;
    let combinations = pairs * (pairs - 1.0) / 2.0;
    let nkt = if combinations == 0.0 {
        0.0
    } else {
        stats.rank.ascending as f64 / combinations
    };
    let hyp_len = stats.hyp_len as f64;
    let precision = pairs / hyp_len;
    let bp = (1.0 - stats.ref_len as f64 / hyp_len).exp().min(1.0);
    nkt * precision.powf(config.alpha) * bp.powf(config.beta)
}

/// Mean of sentence scores; RIBES is averaged per sentence, not pooled.
pub struct Ribes {
    sentences: Vec<f64>,
}

impl Ribes {
    pub fn new(stats: &[SentenceStats], config: &RibesConfig) -> Self {
        Self {
            sentences: stats.iter().map(|s| ribes_sentence(s, config)).collect(),
        }
    }
}

impl CorpusScorer for Ribes {
    fn len(&self) -> usize {
        self.sentences.len()
    }

    fn score(&self, indices: &[usize]) -> f64 {
        if indices.is_empty() {
            return 0.0;
        }
        indices.iter().map(|&i| self.sentences[i]).sum::<f64>() / indices.len() as f64
    }
}

/// Buckets of the aligned tokens, in the order a candidate visits them.
pub fn bucket_sequence(alignment: &Alignment, order: &[usize]) -> Vec<usize> {
    order.iter().filter_map(|&i| alignment.bucket(i)).collect()
}

/// Normalized Kendall's tau of a bucket sequence.
pub fn kendall_tau(buckets: &[usize]) -> f64 {
    let n = buckets.len();
    if n <= 1 {
        return 1.0;
    }
    let mut errors = 0usize;
    for i in 0..n - 1 {
        errors += buckets[i + 1..].iter().filter(|&&b| buckets[i] > b).count();
    }
    1.0 - errors as f64 / (n * (n - 1) / 2) as f64
}

/// Fuzzy reordering score: share of boundaries, including the two virtual
/// ones at either end, that continue the reference order.
pub fn fuzzy_reordering(buckets: &[usize], end_bucket: usize) -> f64 {
    let n = buckets.len();
    if n <= 1 {
        return 1.0;
    }
    let mut discontinuities = 0;
    for i in 0..=n {
        let prev = if i == 0 { -1 } else { buckets[i - 1] as i64 };
        let cur = if i < n { buckets[i] as i64 } else { end_bucket as i64 };
        if prev != cur && prev + 1 != cur {
            discontinuities += 1;
        }
    }
    1.0 - discontinuities as f64 / (n + 1) as f64
}

pub fn complete_matching(buckets: &[usize]) -> f64 {
    if kendall_tau(buckets) < 1.0 {
        0.0
    } else {
        1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderingMeasure {
    FuzzyReordering,
    KendallTau,
    CompleteMatching,
}

impl ReorderingMeasure {
    pub const ALL: [ReorderingMeasure; 3] = [
        ReorderingMeasure::FuzzyReordering,
        ReorderingMeasure::KendallTau,
        ReorderingMeasure::CompleteMatching,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ReorderingMeasure::FuzzyReordering => "Fuzzy Reordering Scores",
            ReorderingMeasure::KendallTau => "Normalized Kendall's Tau",
            ReorderingMeasure::CompleteMatching => "CMS",
        }
    }

    pub fn sentence_score(self, alignment: &Alignment, order: &[usize]) -> f64 {
        let buckets = bucket_sequence(alignment, order);
        match self {
            ReorderingMeasure::FuzzyReordering => {
                fuzzy_reordering(&buckets, alignment.end_bucket())
            }
            ReorderingMeasure::KendallTau => kendall_tau(&buckets),
            ReorderingMeasure::CompleteMatching => complete_matching(&buckets),
        }
    }
}

/// A reordering measure over lines; lines without a usable alignment are
/// left out of the mean.
pub struct Reordering {
    sentences: Vec<Option<f64>>,
}

impl Reordering {
    pub fn new(
        alignments: &[Option<Alignment>],
        orders: &[Vec<usize>],
        measure: ReorderingMeasure,
    ) -> Self {
        let sentences = alignments
            .iter()
            .zip(orders)
            .map(|(alignment, order)| {
                alignment
                    .as_ref()
                    .map(|alignment| measure.sentence_score(alignment, order))
            })
            .collect();
        Self { sentences }
    }
}

impl CorpusScorer for Reordering {
    fn len(&self) -> usize {
        self.sentences.len()
    }

    fn score(&self, indices: &[usize]) -> f64 {
        let mut sum = 0.0;
        let mut num = 0;
        for &i in indices {
            if let Some(score) = self.sentences[i] {
                sum += score;
                num += 1;
            }
        }
        if num == 0 {
            0.0
        } else {
            sum / num as f64
        }
    }
}
