//! Word alignments turned into a target-side order of source tokens.
//!
//! A line looks like `3-4 ||| 0-1 1-0 2-3`: source and target lengths, then
//! `src-trg` alignment points. Source tokens are grouped into buckets so that
//! the buckets follow the target side left to right. Tokens with the same
//! target span share a bucket, unaligned tokens get none.

use std::collections::BTreeSet;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    buckets: Vec<Option<usize>>,
    bucket_count: usize,
}

impl Alignment {
    pub fn new(buckets: Vec<Option<usize>>, bucket_count: usize) -> Self {
        Self {
            buckets,
            bucket_count,
        }
    }

    /// Bucket of a source token, `None` when the token is unaligned.
    pub fn bucket(&self, src: usize) -> Option<usize> {
        self.buckets.get(src).copied().flatten()
    }

    /// The bucket past the last one, used as the end-of-target marker.
    pub fn end_bucket(&self) -> usize {
        self.bucket_count
    }

    pub fn source_len(&self) -> usize {
        self.buckets.len()
    }

    pub fn buckets(&self) -> &[Option<usize>] {
        &self.buckets
    }
}

/// `lhs <= rhs` for target spans of source tokens.
///
/// Neubig et al., "Inducing a Discriminative Parser to Optimize Machine
/// Translation Reordering".
fn less_or_equal(lhs: &BTreeSet<usize>, rhs: &BTreeSet<usize>) -> bool {
    match (lhs.first(), lhs.last(), rhs.first(), rhs.last()) {
        (Some(lmin), Some(lmax), Some(rmin), Some(rmax)) => lmin <= rmin && lmax <= rmax,
        _ => false,
    }
}

fn parse_pair(field: &str) -> Option<(usize, usize)> {
    let (a, b) = field.split_once('-')?;
    Some((a.parse().ok()?, b.parse().ok()?))
}

/// Parse one alignment line. `line_no` is only used in error messages.
///
/// Returns `Ok(None)` when the alignment cannot be put into a linear order
/// (two crossing spans where neither contains the other's ends).
pub fn parse_alignment(line: &str, line_no: usize) -> Result<Option<Alignment>> {
    let malformed = |reason: &str| Error::MalformedAlignment {
        line: line_no,
        reason: reason.to_string(),
    };

    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return Err(malformed("too few fields"));
    }
    if fields[1] != "|||" {
        return Err(malformed("missing |||"));
    }
    let (src_len, trg_len) =
        parse_pair(fields[0]).ok_or_else(|| malformed("bad length field"))?;

    let mut aligns = vec![BTreeSet::new(); src_len];
    for field in &fields[2..] {
        let (src, trg) =
            parse_pair(field).ok_or_else(|| malformed(&format!("bad point {:?}", field)))?;
        if src >= src_len || trg >= trg_len {
            return Err(Error::AlignmentOutOfRange {
                line: line_no,
                src,
                trg,
                src_len,
                trg_len,
            });
        }
        aligns[src].insert(trg);
    }

    Ok(order_buckets(&aligns))
}

/// Insert every aligned source token into the sorted bucket list.
fn order_buckets(aligns: &[BTreeSet<usize>]) -> Option<Alignment> {
    let mut sorted: Vec<Vec<usize>> = Vec::new();

    for (i, span) in aligns.iter().enumerate() {
        if span.is_empty() {
            continue;
        }
        let mut pos = 0;
        let mut eq = false;
        while pos < sorted.len() {
            let other = &aligns[sorted[pos][0]];
            let le = less_or_equal(span, other);
            let ge = less_or_equal(other, span);
            eq = le && ge;
            if !le && !ge {
                return None;
            }
            if le {
                break;
            }
            pos += 1;
        }
        if eq {
            sorted[pos].push(i);
        } else {
            sorted.insert(pos, vec![i]);
        }
    }

    let mut buckets = vec![None; aligns.len()];
    for (bucket, members) in sorted.iter().enumerate() {
        for &src in members {
            buckets[src] = Some(bucket);
        }
    }
    Some(Alignment::new(buckets, sorted.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Option<Alignment> {
        parse_alignment(line, 1).unwrap()
    }

    #[test]
    fn cross_alignment_orders_by_target() {
        let alignment = parse("2-2 ||| 0-1 1-0").unwrap();
        assert_eq!(alignment.bucket(0), Some(1));
        assert_eq!(alignment.bucket(1), Some(0));
        assert_eq!(alignment.end_bucket(), 2);
    }

    #[test]
    fn monotone_alignment() {
        let alignment = parse("3-3 ||| 0-0 1-1 2-2").unwrap();
        assert_eq!(alignment.buckets(), &[Some(0), Some(1), Some(2)]);
        assert_eq!(alignment.end_bucket(), 3);
    }

    #[test]
    fn equal_spans_share_a_bucket() {
        let alignment = parse("3-2 ||| 0-0 1-1 2-1").unwrap();
        assert_eq!(alignment.buckets(), &[Some(0), Some(1), Some(1)]);
        assert_eq!(alignment.end_bucket(), 2);
    }

    #[test]
    fn unaligned_tokens_have_no_bucket() {
        let alignment = parse("3-2 ||| 0-1 2-0").unwrap();
        assert_eq!(alignment.buckets(), &[Some(1), None, Some(0)]);
        assert_eq!(alignment.source_len(), 3);
        assert_eq!(alignment.bucket(7), None);
    }

    #[test]
    fn incomparable_spans_are_unusable() {
        // token 0 covers 0..2, token 1 sits strictly inside it
        assert_eq!(parse("2-3 ||| 0-0 0-2 1-1"), None);
    }

    #[test]
    fn nested_span_with_shared_end_is_ordered() {
        let alignment = parse("2-3 ||| 0-0 0-2 1-2").unwrap();
        assert_eq!(alignment.buckets(), &[Some(0), Some(1)]);
    }

    #[test]
    fn malformed_lines_are_errors() {
        assert!(matches!(
            parse_alignment("2-2", 3),
            Err(Error::MalformedAlignment { line: 3, .. })
        ));
        assert!(matches!(
            parse_alignment("2-2 ## 0-0", 1),
            Err(Error::MalformedAlignment { .. })
        ));
        assert!(matches!(
            parse_alignment("x-2 ||| 0-0", 1),
            Err(Error::MalformedAlignment { .. })
        ));
        assert!(matches!(
            parse_alignment("2-2 ||| 0:0", 1),
            Err(Error::MalformedAlignment { .. })
        ));
    }

    #[test]
    fn out_of_range_points_are_errors() {
        assert!(matches!(
            parse_alignment("2-2 ||| 0-0 2-1", 5),
            Err(Error::AlignmentOutOfRange { line: 5, src: 2, .. })
        ));
        assert!(matches!(
            parse_alignment("2-2 ||| 0-2", 5),
            Err(Error::AlignmentOutOfRange { trg: 2, .. })
        ));
    }
}
