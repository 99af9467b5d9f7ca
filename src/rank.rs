//! Word-order statistics for RIBES.
//!
//! Every hypothesis word is mapped to a position in the reference. Words that
//! occur once on both sides map directly; repeated words are disambiguated by
//! growing a context window around them until the context is unique on both
//! sides. The mapped positions are then scored by counting ascending pairs.

use crate::config::MultiRefPolicy;
use crate::corpus::Sentence;

/// Raw rank statistics of one hypothesis sentence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankStats {
    /// Pairs of mapped words that keep their relative order.
    pub ascending: usize,
    /// Number of hypothesis words mapped into the reference.
    pub pairs: usize,
}

fn matches_at(pattern: &[String], text: &[String], start: usize) -> bool {
    text.get(start..start + pattern.len()) == Some(pattern)
}

/// Number of positions where `pattern` occurs in `text`, overlaps included:
/// `a a` occurs twice in `a a a`.
pub fn overlapping_count(pattern: &[String], text: &[String]) -> usize {
    if pattern.is_empty() || pattern.len() > text.len() {
        return 0;
    }
    let mut count = 0;
    let mut start = 0;
    while let Some(pos) = find_from(pattern, text, start) {
        count += 1;
        start = pos + 1;
    }
    count
}

fn find_from(pattern: &[String], text: &[String], from: usize) -> Option<usize> {
    if pattern.len() > text.len() {
        return None;
    }
    (from..=text.len() - pattern.len()).find(|&start| matches_at(pattern, text, start))
}

/// Character offset of every token in the space-joined text.
fn char_offsets(text: &[String]) -> Vec<usize> {
    text.iter()
        .scan(0, |next, token| {
            let start = *next;
            *next += token.chars().count() + 1;
            Some(start)
        })
        .collect()
}

/// Reference position of every hypothesis word that can be mapped, as a
/// character offset into the space-joined reference. A word found through
/// the context to its left sits at the last character of that context, so
/// it ranks after a match on the start of the same reference word.
pub fn word_positions(hyp: &[String], reference: &[String]) -> Vec<usize> {
    let len = hyp.len();
    let offsets = char_offsets(reference);
    let word_end = |token: usize| offsets[token] + reference[token].chars().count() - 1;
    let mut positions = Vec::new();

    for i in 0..len {
        let word = &hyp[i..=i];
        let in_ref = overlapping_count(word, reference);
        if in_ref == 0 {
            continue;
        }
        if in_ref == 1 && overlapping_count(word, hyp) == 1 {
            if let Some(pos) = find_from(word, reference, 0) {
                positions.push(offsets[pos]);
            }
            continue;
        }

        let unique = |ngram: &[String]| {
            overlapping_count(ngram, reference) == 1 && overlapping_count(ngram, hyp) == 1
        };
        for window in 1..(i + 1).max(len - i + 1) {
            if window <= i {
                let ngram = &hyp[i - window..=i];
                if unique(ngram) {
                    if let Some(pos) = find_from(ngram, reference, 0) {
                        positions.push(word_end(pos + window));
                    }
                    break;
                }
            }
            if i + window < len {
                let ngram = &hyp[i..=i + window];
                if unique(ngram) {
                    if let Some(pos) = find_from(ngram, reference, 0) {
                        positions.push(offsets[pos]);
                    }
                    break;
                }
            }
        }
    }
    positions
}

/// Number of index pairs `p < q` with `positions[p] < positions[q]`.
pub fn ascending_pairs(positions: &[usize]) -> usize {
    let mut ascending = 0;
    for (p, &lhs) in positions.iter().enumerate() {
        ascending += positions[p + 1..].iter().filter(|&&rhs| lhs < rhs).count();
    }
    ascending
}

/// Rank statistics of a hypothesis against one reference.
pub fn rank_stats(hyp: &[String], reference: &[String]) -> RankStats {
    let positions = word_positions(hyp, reference);
    match positions.len() {
        0 => RankStats::default(),
        1 => RankStats {
            ascending: 1,
            pairs: 1,
        },
        pairs => RankStats {
            ascending: ascending_pairs(&positions),
            pairs,
        },
    }
}

/// Rank statistics of a hypothesis against all references of its line.
pub fn best_rank_stats(hyp: &Sentence, references: &[&Sentence], policy: MultiRefPolicy) -> RankStats {
    let stats = references.iter().map(|reference| rank_stats(hyp, reference));
    match policy {
        MultiRefPolicy::Independent => stats.fold(RankStats::default(), |best, cur| RankStats {
            ascending: best.ascending.max(cur.ascending),
            pairs: best.pairs.max(cur.pairs),
        }),
        // max_by_key keeps the last maximum, so walk the references backwards
        MultiRefPolicy::BestReference => stats
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .max_by_key(|s| (s.ascending, s.pairs))
            .unwrap_or_default(),
    }
}
