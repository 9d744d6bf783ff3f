//! Canonical file names and default locations.
//!
//! Single source of truth - import this instead of hardcoding paths.
//!
//! | Location | Purpose |
//! |----------|---------|
//! | `~/Sounds` | Default library root |
//! | `<library>/sounds.sqlite` | Default catalog database |
//! | `.soundman/config.yaml` | Project config, searched upwards from cwd |
//! | `<config dir>/soundman/config.yaml` | Per-user config fallback |

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Directory holding a project-local config file
pub const CONFIG_DIR_NAME: &str = ".soundman";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Catalog database file name, relative to the library root
pub const DEFAULT_DATABASE_NAME: &str = "sounds.sqlite";

/// Default library root (~/Sounds)
pub fn default_library_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Failed to determine home directory")?;
    Ok(home.join("Sounds"))
}

/// Per-user config file (e.g. ~/.config/soundman/config.yaml)
pub fn user_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("soundman").join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_config_file_name() {
        if let Some(path) = user_config_file() {
            assert!(path.ends_with("soundman/config.yaml"));
        }
    }

    #[test]
    fn test_default_library_dir_is_under_home() {
        let dir = default_library_dir().unwrap();
        assert!(dir.ends_with("Sounds"));
    }
}
