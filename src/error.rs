use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{what} has {got} lines, expected {expected}")]
    LengthMismatch {
        what: String,
        expected: usize,
        got: usize,
    },

    #[error("wrong alignment format at line {line}: {reason}")]
    MalformedAlignment { line: usize, reason: String },

    #[error("wrong alignment data at line {line}: {src}-{trg} outside {src_len}-{trg_len}")]
    AlignmentOutOfRange {
        line: usize,
        src: usize,
        trg: usize,
        src_len: usize,
        trg_len: usize,
    },

    #[error("wrong order format at line {line}: {reason}")]
    MalformedOrder { line: usize, reason: String },

    #[error("order at line {line} does not match its alignment: {reason}")]
    OrderMismatch { line: usize, reason: String },

    #[error("{0} is empty")]
    EmptyCorpus(String),

    #[error("at least one reference is required")]
    NoReferences,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn length_mismatch(what: impl Into<String>, expected: usize, got: usize) -> Self {
        Self::LengthMismatch {
            what: what.into(),
            expected,
            got,
        }
    }
}
