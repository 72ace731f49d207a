use std::path::PathBuf;

/// Errors surfaced from state construction, strategy persistence and move
/// queries.
///
/// `UnknownInfoSet` is deliberately not a variant here: a missing
/// fingerprint is a fallback to uniform-random play, not a failure.
#[derive(thiserror::Error, Debug)]
pub enum SolverError {
    #[error("invalid game state: {0}")]
    InvalidState(String),

    #[error("malformed strategy file: {0}")]
    MalformedStrategy(String),

    #[error("io failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SolverError>;
