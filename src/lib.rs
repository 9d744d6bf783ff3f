//! soundman - catalog of raw and processed sound recordings
//!
//! Keeps track of field recordings and the files derived from them, keyed by
//! the SHA-256 of their content, in a SQLite database next to the library.
//!
//! # Architecture
//!
//! - Every file lives under one library root and is stored by relative path
//! - A sound is either raw (recorded at, location) or processed (origin)
//! - Processed sounds chain back to a raw capture through their origins
//! - Sounds are referenced by hash prefix or by file name
//!
//! # Modules
//!
//! - `library`: Content hashing and the library root
//! - `domain`: Data structures (Sound, Tag)
//! - `catalog`: SQLite schema and repository
//! - `adapters`: Duration probe and external tools
//! - `core`: Catalog service and rendering
//! - `config`: Configuration resolution
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Catalog a raw capture
//! soundman add 180101-123456.wav "Tram" Zurich
//!
//! # Link a processed variant to it
//! soundman link tram-denoised.wav 3b1f "Tram (denoised)"
//!
//! # Tag, search and inspect
//! soundman tag 3b1f street night
//! soundman search street
//! soundman info 3b1f
//! ```

pub mod adapters;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod library;

// Re-export main types at crate root for convenience
pub use catalog::{Catalog, CatalogError};
pub use core::CatalogService;
pub use domain::{Sound, SoundDetails, SoundKind, Tag};
pub use library::{compute_hash, ContentHash, LibraryRoot, PathError};
