//! The sound catalog: schema, repository and reference resolution.
//!
//! # Tables
//!
//! ```text
//! sounds ─┬─ raw_sounds         (recorded_at, location)
//!         ├─ processed_sounds   (origin_hash → sounds, intensity)
//!         └─ sounds_tags ── tags
//! ```

pub mod error;
pub mod pattern;
pub mod repository;
pub mod schema;

pub use error::{CatalogError, Result};
pub use pattern::NamePattern;
pub use repository::Catalog;
