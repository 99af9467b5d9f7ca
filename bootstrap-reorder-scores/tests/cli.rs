use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn file(content: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f
}

const ALIGNMENTS: &str = "3-3 ||| 0-0 1-1 2-2\n\
                          2-2 ||| 0-1 1-0\n\
                          3-3 ||| 0-2 1-1 2-0\n\
                          2-3 ||| 0-0 0-2 1-1\n";

#[test]
fn perfect_orders_score_one() {
    let reference = file(ALIGNMENTS);
    let perfect = file("0 1 2\n1 0\n2 1 0\n0 1\n");
    let monotone = file("0 1 2\n0 1\n0 1 2\n0 1\n");
    Command::cargo_bin("bootstrap-reorder-scores")
        .unwrap()
        .args(["--trials", "50", "--seed", "9"])
        .arg(reference.path())
        .arg(perfect.path())
        .arg(monotone.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("---=== Fuzzy Reordering Scores score ===---")
                .and(predicate::str::contains("---=== Normalized Kendall's Tau score ===---"))
                .and(predicate::str::contains("---=== CMS score ===---"))
                .and(predicate::str::contains("actual score of hypothesis 1: 1.000000"))
                // tau of the monotone system: 1, 0, 0 over three usable lines
                .and(predicate::str::contains("actual score of hypothesis 2: 0.333333")),
        );
}

#[test]
fn wrong_argument_count_is_a_usage_error() {
    let reference = file(ALIGNMENTS);
    Command::cargo_bin("bootstrap-reorder-scores")
        .unwrap()
        .arg(reference.path())
        .arg(reference.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn malformed_alignment_aborts() {
    let reference = file("3-3 0-0 1-1 2-2\n");
    let order = file("0 1 2\n");
    Command::cargo_bin("bootstrap-reorder-scores")
        .unwrap()
        .arg(reference.path())
        .arg(order.path())
        .arg(order.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("wrong alignment format at line 1"));
}
