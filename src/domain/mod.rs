//! Domain types for the sound catalog.
//!
//! This module contains the core data structures:
//! - Sound: a raw or processed recording, keyed by content hash
//! - Tag: a free-form label, many-to-many with sounds

pub mod sound;
pub mod tag;

// Re-export commonly used types
pub use sound::{parse_recorded_at, Sound, SoundDetails, SoundKind, RECORDED_AT_FORMAT};
pub use tag::{normalize_tag_names, Tag};
