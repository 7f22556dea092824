use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DumpError {
    #[error("open on {} failed.", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file opened but could not be read in full.
    #[error("read of {} failed: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("memory allocation of {size} bytes failed")]
    Alloc { size: u64 },

    /// A decode failure attributed to one map file.
    #[error("{file}: {source}")]
    Map {
        file: String,
        source: q2parser::Error,
    },

    #[error("bad file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("no files named {pattern} found")]
    NoMatches { pattern: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DumpError {
    pub fn map(file: &str, source: q2parser::Error) -> Self {
        Self::Map {
            file: file.to_string(),
            source,
        }
    }
}
