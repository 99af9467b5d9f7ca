//! Paired bootstrap resampling (Koehn, "Statistical Significance Tests for
//! Machine Translation Evaluation", EMNLP 2004).
//!
//! Both systems are scored on the same resampled line indices in every
//! trial. The spread of the per-trial differences tells how much of the
//! observed difference resampling noise alone would explain.

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::BootstrapConfig;
use crate::error::{Error, Result};
use crate::metrics::CorpusScorer;

/// Scores collected over all trials.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreDistribution(Vec<f64>);

impl ScoreDistribution {
    pub fn new(scores: Vec<f64>) -> Self {
        Self(scores)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn scores(&self) -> &[f64] {
        &self.0
    }

    pub fn mean(&self) -> f64 {
        if self.0.is_empty() {
            return 0.0;
        }
        self.0.iter().sum::<f64>() / self.0.len() as f64
    }

    /// Trimmed interval: the `n/40`-th smallest and largest scores bound it,
    /// about 95% for the usual 1000 trials.
    pub fn interval(&self) -> Interval {
        if self.0.is_empty() {
            return Interval::default();
        }
        let mut sorted = self.0.clone();
        sorted.sort_by(f64::total_cmp);
        let n = sorted.len();
        let lower = sorted[n / 40];
        let upper = sorted[n - n / 40 - 1];
        let half_width = 0.5 * (upper - lower);
        Interval {
            midpoint: lower + half_width,
            half_width,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Interval {
    pub midpoint: f64,
    pub half_width: f64,
}

impl Interval {
    pub fn lower(&self) -> f64 {
        self.midpoint - self.half_width
    }

    pub fn upper(&self) -> f64 {
        self.midpoint + self.half_width
    }
}

/// Raw output of the sampling phase.
#[derive(Debug, Clone, Default)]
pub struct TrialScores {
    /// `|score2 - score1|` of every trial.
    pub differences: ScoreDistribution,
    pub system1: ScoreDistribution,
    pub system2: ScoreDistribution,
}

impl TrialScores {
    /// Share of trials whose centred difference reaches the observed one.
    pub fn p_value(&self, actual1: f64, actual2: f64) -> f64 {
        if self.differences.is_empty() {
            return 1.0;
        }
        let actual_diff = (actual2 - actual1).abs();
        let mean = self.differences.mean();
        let count = self
            .differences
            .scores()
            .iter()
            .filter(|&&diff| diff - mean >= actual_diff)
            .count();
        count as f64 / self.differences.len() as f64
    }

    pub fn summarize(&self, title: &str, actual1: f64, actual2: f64) -> Comparison {
        Comparison {
            title: title.to_string(),
            actual: [actual1, actual2],
            intervals: [self.system1.interval(), self.system2.interval()],
            p_value: self.p_value(actual1, actual2),
            mean_difference: self.differences.mean(),
        }
    }
}

/// Everything reported for one metric.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub title: String,
    /// Full-corpus scores of both systems.
    pub actual: [f64; 2],
    pub intervals: [Interval; 2],
    pub p_value: f64,
    pub mean_difference: f64,
}

pub struct BootstrapEngine {
    config: BootstrapConfig,
    rng: StdRng,
}

impl BootstrapEngine {
    pub fn new(config: BootstrapConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    /// Line indices drawn uniformly with replacement.
    pub fn sample(&mut self, corpus_size: usize) -> Vec<usize> {
        let size = self.config.sample_size_for(corpus_size);
        if corpus_size == 0 {
            return Vec::new();
        }
        (0..size).map(|_| self.rng.gen_range(0..corpus_size)).collect()
    }

    /// Run all trials for one metric.
    pub fn run_trials<A, B>(&mut self, system1: &A, system2: &B) -> Result<TrialScores>
    where
        A: CorpusScorer + ?Sized,
        B: CorpusScorer + ?Sized,
    {
        let size = system1.len();
        if size == 0 {
            return Err(Error::EmptyCorpus("hypothesis 1".into()));
        }
        if system2.len() != size {
            return Err(Error::length_mismatch("hypothesis 2", size, system2.len()));
        }

        let trials = self.config.trials;
        let step = (trials / 10).max(1);
        let mut differences = Vec::with_capacity(trials);
        let mut scores1 = Vec::with_capacity(trials);
        let mut scores2 = Vec::with_capacity(trials);

        for trial in 0..trials {
            let indices = self.sample(size);
            let score1 = system1.score(&indices);
            let score2 = system2.score(&indices);
            differences.push((score2 - score1).abs());
            scores1.push(score1);
            scores2.push(score2);

            if (trial + 1) % step == 0 {
                info!("subsampling: {}/{}", trial + 1, trials);
            }
        }

        Ok(TrialScores {
            differences: ScoreDistribution::new(differences),
            system1: ScoreDistribution::new(scores1),
            system2: ScoreDistribution::new(scores2),
        })
    }

    /// Resample, then set the trials against the full-corpus scores.
    pub fn compare<A, B>(&mut self, title: &str, system1: &A, system2: &B) -> Result<Comparison>
    where
        A: CorpusScorer + ?Sized,
        B: CorpusScorer + ?Sized,
    {
        info!("comparing hypotheses on {}", title);
        let trials = self.run_trials(system1, system2)?;
        Ok(trials.summarize(title, system1.score_all(), system2.score_all()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mean of fixed per-line values.
    struct Fixed(Vec<f64>);

    impl CorpusScorer for Fixed {
        fn len(&self) -> usize {
            self.0.len()
        }

        fn score(&self, indices: &[usize]) -> f64 {
            indices.iter().map(|&i| self.0[i]).sum::<f64>() / indices.len() as f64
        }
    }

    fn engine(trials: usize, seed: u64) -> BootstrapEngine {
        BootstrapEngine::new(BootstrapConfig {
            trials,
            sample_size: 0,
            seed: Some(seed),
        })
        .unwrap()
    }

    #[test]
    fn interval_trims_both_tails() {
        let scores: Vec<f64> = (0..1000).rev().map(f64::from).collect();
        let interval = ScoreDistribution::new(scores).interval();
        assert_eq!(interval.midpoint, 499.5);
        assert_eq!(interval.half_width, 474.5);
        assert_eq!(interval.lower(), 25.0);
        assert_eq!(interval.upper(), 974.0);
    }

    #[test]
    fn interval_of_tiny_distribution() {
        let interval = ScoreDistribution::new(vec![3.0, 1.0]).interval();
        assert_eq!(interval.midpoint, 2.0);
        assert_eq!(interval.half_width, 1.0);
        assert_eq!(ScoreDistribution::default().interval(), Interval::default());
    }

    #[test]
    fn p_value_uses_centred_differences() {
        let trials = TrialScores {
            differences: ScoreDistribution::new(vec![0.0, 0.25, 0.5, 1.25]),
            ..Default::default()
        };
        // mean 0.5; centred: -0.5, -0.25, 0.0, 0.75
        assert_eq!(trials.p_value(0.5, 0.5), 0.5);
        assert_eq!(trials.p_value(0.5, 0.25), 0.25);
        assert_eq!(trials.p_value(0.0, 1.0), 0.0);
    }

    #[test]
    fn samples_have_configured_size() {
        let mut sized = BootstrapEngine::new(BootstrapConfig {
            trials: 1,
            sample_size: 7,
            seed: Some(1),
        })
        .unwrap();
        let sample = sized.sample(3);
        assert_eq!(sample.len(), 7);
        assert!(sample.iter().all(|&i| i < 3));
        assert_eq!(engine(1, 1).sample(5).len(), 5);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let a = Fixed(vec![0.1, 0.5, 0.9, 0.3]);
        let b = Fixed(vec![0.2, 0.4, 0.8, 0.7]);
        let first = engine(50, 42).compare("x", &a, &b).unwrap();
        let second = engine(50, 42).compare("x", &a, &b).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn identical_systems_are_indistinguishable() {
        let a = Fixed((0..20).map(|i| (i % 7) as f64 / 7.0).collect());
        let comparison = engine(1000, 7).compare("same", &a, &a).unwrap();
        assert_eq!(comparison.actual[0], comparison.actual[1]);
        assert_eq!(comparison.mean_difference, 0.0);
        assert_eq!(comparison.p_value, 1.0);
        assert_eq!(comparison.intervals[0], comparison.intervals[1]);
    }

    #[test]
    fn clearly_better_system_is_significant() {
        let a = Fixed(vec![0.1; 50]);
        let b = Fixed((0..50).map(|i| 0.8 + (i % 3) as f64 * 0.05).collect());
        let comparison = engine(1000, 3).compare("better", &a, &b).unwrap();
        assert!(comparison.p_value < 0.05);
        assert!(comparison.intervals[0].upper() < comparison.intervals[1].lower());
    }

    #[test]
    fn mismatched_systems_are_rejected() {
        let a = Fixed(vec![0.1, 0.2]);
        let b = Fixed(vec![0.1]);
        assert!(matches!(
            engine(10, 1).compare("x", &a, &b),
            Err(Error::LengthMismatch { .. })
        ));
        assert!(matches!(
            engine(10, 1).compare("x", &Fixed(vec![]), &Fixed(vec![])),
            Err(Error::EmptyCorpus(_))
        ));
    }

    #[test]
    fn zero_trials_is_a_config_error() {
        assert!(BootstrapEngine::new(BootstrapConfig {
            trials: 0,
            ..Default::default()
        })
        .is_err());
    }
}
