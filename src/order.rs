//! Candidate reorderings of source sentences.

use crate::alignment::Alignment;
use crate::error::{Error, Result};

/// Parse one order line: whitespace separated source indices.
pub fn parse_order(line: &str, line_no: usize) -> Result<Vec<usize>> {
    line.split_whitespace()
        .map(|item| {
            item.parse().map_err(|_| Error::MalformedOrder {
                line: line_no,
                reason: format!("{:?} is not an index", item),
            })
        })
        .collect()
}

/// Check an order against the alignment of the same line. The order must be
/// a permutation of the source indices.
pub fn check_order(order: &[usize], alignment: &Alignment, line_no: usize) -> Result<()> {
    if order.len() != alignment.source_len() {
        return Err(Error::OrderMismatch {
            line: line_no,
            reason: format!(
                "{} indices for {} source tokens",
                order.len(),
                alignment.source_len()
            ),
        });
    }
    let mut seen = vec![false; order.len()];
    for &i in order {
        let reason = if i >= seen.len() {
            format!("index {} out of range", i)
        } else if seen[i] {
            format!("index {} repeated", i)
        } else {
            seen[i] = true;
            continue;
        };
        return Err(Error::OrderMismatch {
            line: line_no,
            reason,
        });
    }
    Ok(())
}

/// Rearrange `words` following `order`. Fails on an index past the end.
pub fn apply_order<'a>(words: &[&'a str], order: &[usize]) -> Option<Vec<&'a str>> {
    order.iter().map(|&i| words.get(i).copied()).collect()
}
