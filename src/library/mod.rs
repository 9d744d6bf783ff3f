//! Sound library identity: content hashing and the library root.
//!
//! Every sound in the catalog lives under a single library directory and is
//! identified by the SHA-256 of its bytes.
//!
//! # Storage Layout
//!
//! ```text
//! <library>/
//! ├── sounds.sqlite            # Catalog database (default location)
//! └── ...                      # Any directory structure of .wav files
//! ```

pub mod content;
pub mod root;

pub use content::{compute_hash, ContentHash};
pub use root::{LibraryRoot, PathError};
