//! Error taxonomy of the catalog.

use std::path::PathBuf;

use thiserror::Error;

use crate::adapters::{ProbeError, ToolError};
use crate::library::{ContentHash, PathError};

/// Errors raised by the catalog and the operations built on it
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("Unable to parse the date from '{0}' (expected YYMMDD-HHMMSS)")]
    DateParse(String),

    #[error("Sound {0} is already in the database")]
    Duplicate(ContentHash),

    #[error("File not in the database: {}", .0.display())]
    FileNotCataloged(PathBuf),

    #[error("Hash not found: {0}")]
    NotFound(String),

    #[error("Too many matches for '{reference}' ({count} sounds share that prefix)")]
    Ambiguous { reference: String, count: usize },

    #[error("Unable to read duration of {}: {source}", .path.display())]
    Probe {
        path: PathBuf,
        #[source]
        source: ProbeError,
    },

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// True for both flavours of "no sound matches this reference"
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::FileNotCataloged(_))
    }
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;
