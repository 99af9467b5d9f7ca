use std::io::{self, Write};

use crate::bootstrap::Comparison;

pub fn write_comparison<W: Write>(out: &mut W, comparison: &Comparison) -> io::Result<()> {
    writeln!(out, "---=== {} score ===---", comparison.title)?;
    for (i, (actual, interval)) in comparison
        .actual
        .iter()
        .zip(&comparison.intervals)
        .enumerate()
    {
        writeln!(out, "actual score of hypothesis {}: {:.6}", i + 1, actual)?;
        writeln!(
            out,
            "95/100 confidence interval for hypothesis {} score: {:.6} +- {:.6}",
            i + 1,
            interval.midpoint,
            interval.half_width
        )?;
        writeln!(out, "-----")?;
    }
    writeln!(
        out,
        "mean absolute score difference over the subsamples: {:.6}",
        comparison.mean_difference
    )?;
    writeln!(
        out,
        "Assuming that essentially the same system generated the two hypothesis translations (null-hypothesis),"
    )?;
    writeln!(
        out,
        "the probability of actually getting them (p-value) is: {:.6}",
        comparison.p_value
    )?;
    writeln!(out)
}
