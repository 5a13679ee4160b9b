pub mod config;
pub mod error;
pub mod options;

pub use error::{AnnotreeError, MarkerProblem, Result};
pub use options::{EmbedMarkers, TreeOptions};
pub mod constants {
    //! Re-export from config::constants for convenience.
    pub use crate::config::constants::*;
}
