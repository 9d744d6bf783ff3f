//! Configuration for soundman.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line flags (`--library`, `--database`), which clap also fills
//!    from SOUNDMAN_LIBRARY / SOUNDMAN_DATABASE
//! 2. Config file (.soundman/config.yaml, then the per-user config dir)
//! 3. Defaults (~/Sounds, <library>/sounds.sqlite)
//!
//! Config file discovery:
//! - Searches current directory and parents for .soundman/config.yaml
//! - Falls back to <config dir>/soundman/config.yaml
//! - `library` in the file is relative to the directory holding `.soundman/`
//! - `database` is relative to the library root
//!
//! The resolved configuration is a plain value handed to the catalog
//! service; nothing here is cached globally.

pub mod paths;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    /// Library root
    pub library: Option<String>,
    /// Database file (relative to the library root)
    pub database: Option<String>,
    #[serde(default)]
    pub tools: ToolsFileConfig,
}

/// External tool overrides as written in the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolsFileConfig {
    pub player: Option<Vec<String>>,
    pub editor: Option<Vec<String>>,
    pub analyzer: Option<Vec<String>>,
}

/// Argv templates for the external tools (`{path}` is substituted)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolsConfig {
    pub player: Vec<String>,
    pub editor: Vec<String>,
    pub analyzer: Vec<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        let argv = |parts: &[&str]| parts.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            player: argv(&["sox", "{path}", "-d"]),
            editor: argv(&["audacity", "{path}"]),
            analyzer: argv(&["sox", "{path}", "-n", "stats"]),
        }
    }
}

/// Path overrides from the command line (flags or their environment variables)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub library: Option<PathBuf>,
    pub database: Option<PathBuf>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Library root (every cataloged file lives below it)
    pub library: PathBuf,
    /// Catalog database file
    pub database: PathBuf,
    /// External tool command lines
    pub tools: ToolsConfig,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Configuration for a library with default database and tools
    pub fn for_library(library: impl Into<PathBuf>) -> Self {
        let library = library.into();
        Self {
            database: library.join(paths::DEFAULT_DATABASE_NAME),
            library,
            tools: ToolsConfig::default(),
            config_file: None,
        }
    }
}

/// Find config file by searching `start` and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(paths::CONFIG_DIR_NAME).join(paths::CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to `base`
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Make a command-line or environment path absolute against the cwd
fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(&path))
        .unwrap_or(path)
}

/// Merge all sources; `cli` beats the file beats defaults
fn resolve_config(config_file: Option<(PathBuf, ConfigFile)>, cli: &Overrides) -> Result<ResolvedConfig> {
    let (file_path, file) = match config_file {
        Some((path, file)) => (Some(path), Some(file)),
        None => (None, None),
    };

    // Base directory is the parent of .soundman/ (grandparent of config.yaml)
    let base_dir = file_path
        .as_deref()
        .and_then(Path::parent)
        .and_then(Path::parent)
        .unwrap_or(Path::new("."));

    let library = if let Some(ref lib) = cli.library {
        absolutize(lib.clone())
    } else if let Some(lib) = file.as_ref().and_then(|f| f.library.as_deref()) {
        resolve_path(base_dir, lib)
    } else {
        paths::default_library_dir()?
    };

    let database = if let Some(ref db) = cli.database {
        absolutize(db.clone())
    } else if let Some(db) = file.as_ref().and_then(|f| f.database.as_deref()) {
        resolve_path(&library, db)
    } else {
        library.join(paths::DEFAULT_DATABASE_NAME)
    };

    let defaults = ToolsConfig::default();
    let tools = match file {
        Some(f) => ToolsConfig {
            player: f.tools.player.unwrap_or(defaults.player),
            editor: f.tools.editor.unwrap_or(defaults.editor),
            analyzer: f.tools.analyzer.unwrap_or(defaults.analyzer),
        },
        None => defaults,
    };

    Ok(ResolvedConfig {
        library,
        database,
        tools,
        config_file: file_path,
    })
}

/// Load configuration from all sources
pub fn load_config(cli: &Overrides) -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;

    let config_path = find_config_file(&cwd)
        .or_else(|| paths::user_config_file().filter(|p| p.exists()));

    let config_file = match config_path {
        Some(path) => {
            let file = load_config_file(&path)?;
            Some((path, file))
        }
        None => None,
    };

    resolve_config(config_file, cli)
}
