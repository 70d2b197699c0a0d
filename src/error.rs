use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TallyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not open input {path}: {source}")]
    InputUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{failed} of {total} inputs failed: {details}")]
    IncompleteRun {
        failed: usize,
        total: usize,
        details: String,
    },
}

pub type Result<T> = std::result::Result<T, TallyError>;
