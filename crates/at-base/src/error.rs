use std::io;
use std::path::{Path, PathBuf};

/// Result alias used across the annotree crates.
pub type Result<T> = std::result::Result<T, AnnotreeError>;

/// Typed error for tree generation and embedding.
///
/// Per-file annotation failures never reach this type: they are recovered
/// where they happen and simply produce no description.
#[derive(Debug, thiserror::Error)]
pub enum AnnotreeError {
    /// Invalid option, unreadable explicit ignore file, malformed config
    #[error("Configuration error: {0}")]
    Config(String),
    /// Embed target has missing, duplicated or misordered markers
    #[error("Marker error in {}: {problem}", path.display())]
    Marker { path: PathBuf, problem: MarkerProblem },
    /// Root, output or embed target could not be read or written
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why a host document's marker pair was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkerProblem {
    #[error("marker '{0}' not found")]
    Missing(String),
    #[error("marker '{marker}' appears {count} times, expected once")]
    Duplicate { marker: String, count: usize },
    #[error("end marker appears before start marker")]
    Misordered,
}

impl AnnotreeError {
    pub fn config(msg: impl Into<String>) -> Self {
        AnnotreeError::Config(msg.into())
    }

    pub fn io(path: &Path, source: io::Error) -> Self {
        AnnotreeError::Io { path: path.to_path_buf(), source }
    }

    pub fn marker(path: &Path, problem: MarkerProblem) -> Self {
        AnnotreeError::Marker { path: path.to_path_buf(), problem }
    }

    /// Process exit status for this error: 2 for bad configuration, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            AnnotreeError::Config(_) => 2,
            AnnotreeError::Marker { .. } | AnnotreeError::Io { .. } => 1,
        }
    }
}

impl From<serde_yaml::Error> for AnnotreeError {
    fn from(e: serde_yaml::Error) -> Self {
        AnnotreeError::Config(format!("invalid config: {}", e))
    }
}
