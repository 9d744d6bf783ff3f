//! The library root: the directory every cataloged file must live under.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Errors from resolving paths against the library root
#[derive(Debug, Error)]
pub enum PathError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("File not in the library folder: {}", .0.display())]
    OutsideLibrary(PathBuf),

    #[error("File name is not valid UTF-8: {}", .0.display())]
    NonUtf8(PathBuf),

    #[error("Library root is not accessible: {}", .0.display())]
    LibraryRoot(PathBuf, #[source] std::io::Error),
}

/// Canonicalized library root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryRoot {
    path: PathBuf,
}

impl LibraryRoot {
    /// Open an existing library directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PathError> {
        let path = path.as_ref();
        let canonical = path
            .canonicalize()
            .map_err(|e| PathError::LibraryRoot(path.to_path_buf(), e))?;
        Ok(Self { path: canonical })
    }

    /// Open a library directory, creating it first if needed
    pub fn ensure(path: impl AsRef<Path>) -> Result<Self, PathError> {
        let path = path.as_ref();
        std::fs::create_dir_all(path)
            .map_err(|e| PathError::LibraryRoot(path.to_path_buf(), e))?;
        Self::open(path)
    }

    /// Absolute, canonical path of the root
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite `file` relative to the library root.
    ///
    /// The file must exist, its canonical path must lie inside the root and
    /// every component below the root must be valid UTF-8.
    /// The result is `./`-prefixed with `/` separators, e.g. `./field/a.wav`.
    pub fn to_library_relative(&self, file: &Path) -> Result<String, PathError> {
        let canonical = file
            .canonicalize()
            .map_err(|_| PathError::NotFound(file.to_path_buf()))?;

        let relative = canonical
            .strip_prefix(&self.path)
            .map_err(|_| PathError::OutsideLibrary(canonical.clone()))?;

        let mut out = String::from(".");
        for component in relative.components() {
            if let Component::Normal(part) = component {
                let part = part
                    .to_str()
                    .ok_or_else(|| PathError::NonUtf8(canonical.clone()))?;
                out.push('/');
                out.push_str(part);
            }
        }

        if out == "." {
            // The root itself is not a cataloguable file
            return Err(PathError::OutsideLibrary(canonical));
        }

        Ok(out)
    }

    /// Join a stored library-relative path back onto the root
    pub fn absolute_path(&self, relative: &str) -> PathBuf {
        let trimmed = relative.strip_prefix("./").unwrap_or(relative);
        self.path.join(trimmed)
    }
}
