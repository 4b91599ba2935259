use std::io;

#[derive(Debug, thiserror::Error)]
pub enum GotoError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Path too long ({len} > {limit}): {path}")]
    PathTooLong {
        path: String,
        len: usize,
        limit: usize,
    },

    #[error("Failed to launch index worker: {0}")]
    WorkerLaunch(#[source] io::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GotoError>;

/// Builds the `PathTooLong` error for a path of `len` characters.
pub(crate) fn path_too_long(path: &str, len: usize, limit: usize) -> GotoError {
    GotoError::PathTooLong {
        path: path.to_string(),
        len,
        limit,
    }
}
