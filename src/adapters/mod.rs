//! Adapter interfaces for external systems.
//!
//! Adapters wrap everything the catalog does not implement itself: reading
//! audio durations and running the player, editor and analyzer tools.

pub mod probe;
pub mod tools;

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

pub use probe::{DurationProbe, ProbeError, WavProbe};
pub use tools::{SubprocessToolbox, ToolCommand};

/// Errors from running an external tool
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("No command configured for the {tool}")]
    EmptyCommand { tool: &'static str },

    #[error("Failed to run {tool} '{program}': {source}")]
    Spawn {
        tool: &'static str,
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("The {tool} was interrupted")]
    Interrupted { tool: &'static str },
}

/// Trait for the external audio tools
#[async_trait]
pub trait Toolbox: Send + Sync {
    /// Play the file, blocking until the player exits
    async fn play(&self, path: &Path) -> Result<(), ToolError>;

    /// Open the file in a waveform editor
    async fn edit(&self, path: &Path) -> Result<(), ToolError>;

    /// Run the analyzer and return its combined output
    async fn stats(&self, path: &Path) -> Result<String, ToolError>;
}
