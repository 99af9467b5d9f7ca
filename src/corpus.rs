//! Loading the line-aligned input files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

use crate::alignment::{parse_alignment, Alignment};
use crate::error::{Error, Result};
use crate::order::{check_order, parse_order};

/// A whitespace tokenized line.
pub type Sentence = Vec<String>;

pub fn tokenize(line: &str) -> Sentence {
    line.split_whitespace().map(String::from).collect()
}

pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    BufReader::new(file)
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| Error::io(path, e))
}

pub fn read_corpus(path: &Path) -> Result<Vec<Sentence>> {
    Ok(read_lines(path)?.iter().map(|line| tokenize(line)).collect())
}

pub fn read_alignments(path: &Path) -> Result<Vec<Option<Alignment>>> {
    read_lines(path)?
        .iter()
        .enumerate()
        .map(|(i, line)| parse_alignment(line, i + 1))
        .collect()
}

pub fn read_orders(path: &Path) -> Result<Vec<Vec<usize>>> {
    read_lines(path)?
        .iter()
        .enumerate()
        .map(|(i, line)| parse_order(line, i + 1))
        .collect()
}

fn check_len(what: &Path, expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(Error::length_mismatch(what.display().to_string(), expected, got));
    }
    Ok(())
}

/// Two hypothesis corpora and their references, all of the same length.
#[derive(Debug, Clone)]
pub struct TranslationSet {
    pub hyp1: Vec<Sentence>,
    pub hyp2: Vec<Sentence>,
    pub references: Vec<Vec<Sentence>>,
}

impl TranslationSet {
    pub fn new(
        hyp1: Vec<Sentence>,
        hyp2: Vec<Sentence>,
        references: Vec<Vec<Sentence>>,
    ) -> Result<Self> {
        if hyp1.is_empty() {
            return Err(Error::EmptyCorpus("hypothesis 1".into()));
        }
        if references.is_empty() {
            return Err(Error::NoReferences);
        }
        if hyp2.len() != hyp1.len() {
            return Err(Error::length_mismatch("hypothesis 2", hyp1.len(), hyp2.len()));
        }
        for (i, reference) in references.iter().enumerate() {
            if reference.len() != hyp1.len() {
                return Err(Error::length_mismatch(
                    format!("reference {}", i + 1),
                    hyp1.len(),
                    reference.len(),
                ));
            }
        }
        Ok(Self {
            hyp1,
            hyp2,
            references,
        })
    }

    pub fn load<P: AsRef<Path>>(hyp1: P, hyp2: P, references: &[P]) -> Result<Self> {
        let hyp1_path = hyp1.as_ref();
        info!("reading {}", hyp1_path.display());
        let hyp1 = read_corpus(hyp1_path)?;
        let hyp2_path = hyp2.as_ref();
        let hyp2 = read_corpus(hyp2_path)?;
        check_len(hyp2_path, hyp1.len(), hyp2.len())?;

        let mut refs = Vec::with_capacity(references.len());
        for path in references {
            let path = path.as_ref();
            let reference = read_corpus(path)?;
            check_len(path, hyp1.len(), reference.len())?;
            refs.push(reference);
        }
        Self::new(hyp1, hyp2, refs)
    }

    pub fn len(&self) -> usize {
        self.hyp1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hyp1.is_empty()
    }

    /// References of one line.
    pub fn references_at(&self, line: usize) -> Vec<&Sentence> {
        self.references.iter().map(|reference| &reference[line]).collect()
    }
}

/// A reference alignment file and two candidate order files.
#[derive(Debug, Clone)]
pub struct ReorderingSet {
    pub alignments: Vec<Option<Alignment>>,
    pub orders1: Vec<Vec<usize>>,
    pub orders2: Vec<Vec<usize>>,
}

impl ReorderingSet {
    pub fn new(
        alignments: Vec<Option<Alignment>>,
        orders1: Vec<Vec<usize>>,
        orders2: Vec<Vec<usize>>,
    ) -> Result<Self> {
        if orders1.is_empty() {
            return Err(Error::EmptyCorpus("hypothesis 1".into()));
        }
        if orders2.len() != orders1.len() {
            return Err(Error::length_mismatch("hypothesis 2", orders1.len(), orders2.len()));
        }
        if alignments.len() != orders1.len() {
            return Err(Error::length_mismatch(
                "reference alignment",
                orders1.len(),
                alignments.len(),
            ));
        }
        for (i, alignment) in alignments.iter().enumerate() {
            if let Some(alignment) = alignment {
                check_order(&orders1[i], alignment, i + 1)?;
                check_order(&orders2[i], alignment, i + 1)?;
            }
        }
        Ok(Self {
            alignments,
            orders1,
            orders2,
        })
    }

    pub fn load<P: AsRef<Path>>(reference: P, hyp1: P, hyp2: P) -> Result<Self> {
        info!("reading {}", reference.as_ref().display());
        let alignments = read_alignments(reference.as_ref())?;
        let orders1 = read_orders(hyp1.as_ref())?;
        let orders2 = read_orders(hyp2.as_ref())?;
        Self::new(alignments, orders1, orders2)
    }

    pub fn len(&self) -> usize {
        self.orders1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders1.is_empty()
    }

    /// Lines whose alignment cannot be ordered.
    pub fn unusable(&self) -> usize {
        self.alignments.iter().filter(|a| a.is_none()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    fn corpus(lines: &[&str]) -> Vec<Sentence> {
        lines.iter().map(|line| tokenize(line)).collect()
    }

    #[test]
    fn tokenizes_on_whitespace() {
        assert_eq!(tokenize("  a\tb  c \n"), vec!["a", "b", "c"]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn loads_translation_files() {
        let hyp1 = file("a b c\nd e\n");
        let hyp2 = file("a c\nd\n");
        let reference = file("a b c\nd e f\n");
        let set = TranslationSet::load(hyp1.path(), hyp2.path(), &[reference.path()]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.hyp2[1], vec!["d"]);
        assert_eq!(set.references_at(1), vec![&tokenize("d e f")]);
    }

    #[test]
    fn rejects_mismatched_files() {
        let hyp1 = file("a\nb\n");
        let hyp2 = file("a\n");
        let reference = file("a\nb\n");
        let err = TranslationSet::load(hyp1.path(), hyp2.path(), &[reference.path()]).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { expected: 2, got: 1, .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let hyp = file("a\n");
        let err = TranslationSet::load(
            hyp.path(),
            hyp.path(),
            &[Path::new("/nonexistent/reference.txt")],
        )
        .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn translation_set_needs_references() {
        let err = TranslationSet::new(corpus(&["a"]), corpus(&["a"]), vec![]).unwrap_err();
        assert!(matches!(err, Error::NoReferences));
        let err = TranslationSet::new(vec![], vec![], vec![vec![]]).unwrap_err();
        assert!(matches!(err, Error::EmptyCorpus(_)));
        let err =
            TranslationSet::new(corpus(&["a"]), corpus(&["a"]), vec![corpus(&["a", "b"])])
                .unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { .. }));
    }

    #[test]
    fn loads_reordering_files() {
        let reference = file("2-2 ||| 0-1 1-0\n2-3 ||| 0-0 0-2 1-1\n");
        let hyp1 = file("1 0\n0 1\n");
        let hyp2 = file("0 1\n1 0\n");
        let set = ReorderingSet::load(reference.path(), hyp1.path(), hyp2.path()).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.alignments[0].is_some());
        assert!(set.alignments[1].is_none());
        assert_eq!(set.unusable(), 1);
    }

    #[test]
    fn malformed_alignment_aborts_loading() {
        let reference = file("2-2 ||| 0-1 1-0\n2-2 0-0\n");
        let hyp = file("1 0\n0 1\n");
        let err = ReorderingSet::load(reference.path(), hyp.path(), hyp.path()).unwrap_err();
        assert!(matches!(err, Error::MalformedAlignment { line: 2, .. }));
    }

    #[test]
    fn order_must_match_alignment() {
        let reference = file("2-2 ||| 0-1 1-0\n");
        let hyp1 = file("1 0\n");
        let hyp2 = file("1 0 2\n");
        let err = ReorderingSet::load(reference.path(), hyp1.path(), hyp2.path()).unwrap_err();
        assert!(matches!(err, Error::OrderMismatch { line: 1, .. }));
    }

    #[test]
    fn repeated_order_index_aborts_loading() {
        let reference = file("3-3 ||| 0-2 1-1 2-0\n");
        let hyp1 = file("2 1 0\n");
        let hyp2 = file("2 2 2\n");
        let err = ReorderingSet::load(reference.path(), hyp1.path(), hyp2.path()).unwrap_err();
        assert!(matches!(err, Error::OrderMismatch { line: 1, .. }));
    }
}
