//! Error taxonomy: fatal load failures versus per-symbol read failures.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The requested packages could not be resolved or parsed. Aborts the whole run.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot find package \"{id}\" in any of: {}", format_candidates(.candidates))]
    NotFound { id: String, candidates: Vec<PathBuf> },

    #[error("no initial packages were loaded")]
    NoPackages,

    #[error("no buildable Go source files in {}", .dir.display())]
    NoGoFiles { dir: PathBuf },

    #[error("build constraints exclude all Go files in {}", .dir.display())]
    ConstraintsExcludeAll { dir: PathBuf },

    #[error("{}: invalid build constraint: {message}", .path.display())]
    BuildConstraint { path: PathBuf, message: String },

    #[error("found packages {first} ({}) and {second} ({}) in {}", .first_file.display(), .second_file.display(), .dir.display())]
    MixedPackages {
        dir: PathBuf,
        first: String,
        first_file: PathBuf,
        second: String,
        second_file: PathBuf,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: syntax error", .path.display())]
    Syntax { path: PathBuf, line: usize },

    #[error("{}: missing package clause", .path.display())]
    MissingPackageClause { path: PathBuf },

    #[error("failed to initialise Go parser: {0}")]
    ParserInit(String),
}

fn format_candidates(candidates: &[PathBuf]) -> String {
    candidates
        .iter()
        .map(|c| c.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A single function's span could not be read. Scoped to that symbol.
#[derive(Debug, Error)]
pub enum SpanError {
    #[error("open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("seek {} to offset {offset}: {source}", .path.display())]
    Seek {
        path: PathBuf,
        offset: usize,
        #[source]
        source: io::Error,
    },

    #[error("read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unexpected EOF: wanted {expected} bytes, read {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("invalid span: start offset {start} is past end offset {end}")]
    InvertedRange { start: usize, end: usize },
}
