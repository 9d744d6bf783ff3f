//! Catalog operations as exposed to the command line.
//!
//! The service owns the library root, the catalog and the two external
//! seams (duration probe and toolbox). Every operation resolves and
//! validates its inputs before it writes anything.

use std::path::Path;

use tracing::{debug, info, instrument};

use super::render;
use crate::adapters::{DurationProbe, SubprocessToolbox, Toolbox, WavProbe};
use crate::catalog::{Catalog, CatalogError, Result};
use crate::config::ResolvedConfig;
use crate::domain::{normalize_tag_names, parse_recorded_at, Sound, Tag};
use crate::library::{compute_hash, ContentHash, LibraryRoot};

/// Orchestrates ingestion, tagging, queries and the external tools
pub struct CatalogService {
    root: LibraryRoot,
    catalog: Catalog,
    probe: Box<dyn DurationProbe>,
    tools: Box<dyn Toolbox>,
}

impl CatalogService {
    pub fn new(
        root: LibraryRoot,
        catalog: Catalog,
        probe: Box<dyn DurationProbe>,
        tools: Box<dyn Toolbox>,
    ) -> Self {
        Self {
            root,
            catalog,
            probe,
            tools,
        }
    }

    /// Open the configured library with the WAV probe and subprocess tools.
    ///
    /// Creates the library directory and the database if they are missing.
    pub fn open(config: &ResolvedConfig) -> Result<Self> {
        let root = LibraryRoot::ensure(&config.library)?;
        let catalog = Catalog::open(&config.database)?;
        let tools = SubprocessToolbox::from_config(&config.tools)?;
        debug!("Library root {}", root.path().display());

        Ok(Self::new(root, catalog, Box::new(WavProbe), Box::new(tools)))
    }

    pub fn root(&self) -> &LibraryRoot {
        &self.root
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolve a hash prefix or file name to one sound
    pub fn resolve(&self, reference: &str) -> Result<Sound> {
        self.catalog.find_by_prefix_or_path(reference)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Catalog a raw capture named `YYMMDD-HHMMSS.<ext>`
    #[instrument(skip(self, file), fields(file = %file.display()))]
    pub fn ingest_raw(&mut self, file: &Path, name: &str, location: &str) -> Result<Sound> {
        let relative = self.root.to_library_relative(file)?;

        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let recorded_at = parse_recorded_at(&file_name).ok_or_else(|| {
            let stem = Path::new(&file_name)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            CatalogError::DateParse(stem)
        })?;

        let hash = self.unique_hash(file)?;
        let duration = self.duration_of(file)?;

        let sound = Sound::raw(hash, name, relative, duration, recorded_at, location);
        self.catalog.create(&sound)?;
        info!("Added raw sound {} ({})", sound.hash.short(), sound.name);
        Ok(sound)
    }

    /// Catalog a processed file derived from the sound `origin_ref` resolves to
    #[instrument(skip(self, file), fields(file = %file.display()))]
    pub fn link_processed(&mut self, file: &Path, origin_ref: &str, name: &str) -> Result<Sound> {
        let origin = self.catalog.find_by_prefix_or_path(origin_ref)?;
        let relative = self.root.to_library_relative(file)?;
        let hash = self.unique_hash(file)?;
        let duration = self.duration_of(file)?;

        let sound = Sound::processed(hash, name, relative, duration, origin.hash.clone());
        self.catalog.create(&sound)?;
        info!(
            "Linked {} ({}) to origin {}",
            sound.hash.short(),
            sound.name,
            origin.hash.short()
        );
        Ok(sound)
    }

    /// Add tags to a sound; existing tags are kept
    pub fn tag<S: AsRef<str>>(&mut self, reference: &str, names: &[S]) -> Result<Vec<Tag>> {
        let sound = self.resolve(reference)?;
        let names = normalize_tag_names(names);
        let tags = self.catalog.tag_sound(&sound.hash, &names)?;
        info!("Tagged {} with {}", sound.hash.short(), names.join(", "));
        Ok(tags)
    }

    pub fn rename(&mut self, reference: &str, new_name: &str) -> Result<Sound> {
        let mut sound = self.resolve(reference)?;
        self.catalog.rename(&sound.hash, new_name)?;
        info!("Renamed {} from '{}' to '{}'", sound.hash.short(), sound.name, new_name);
        sound.name = new_name.to_string();
        Ok(sound)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Listing lines, optionally filtered by a name pattern
    pub fn list(&self, pattern: Option<&str>) -> Result<Vec<String>> {
        let sounds = self.catalog.list(pattern)?;
        Ok(sounds.iter().map(render::list_line).collect())
    }

    /// Listing lines of sounds matching a keyword
    pub fn search(&self, keyword: &str) -> Result<Vec<String>> {
        let sounds = self.catalog.search(keyword)?;
        Ok(sounds.iter().map(render::list_line).collect())
    }

    pub fn info(&self, reference: &str) -> Result<String> {
        let sound = self.resolve(reference)?;
        let derived = self.catalog.derived_from(&sound.hash)?;
        Ok(render::info(&sound, &derived))
    }

    /// Listing lines from the sound back to its first raw origin
    pub fn lineage(&self, reference: &str) -> Result<Vec<String>> {
        let sound = self.resolve(reference)?;
        let chain = self.catalog.lineage(&sound.hash)?;
        Ok(chain.iter().map(render::list_line).collect())
    }

    // ========================================================================
    // External tools
    // ========================================================================

    pub async fn play(&self, reference: &str) -> Result<()> {
        let path = self.resolve_file(reference)?;
        self.tools.play(&path).await?;
        Ok(())
    }

    pub async fn edit(&self, reference: &str) -> Result<()> {
        let path = self.resolve_file(reference)?;
        self.tools.edit(&path).await?;
        Ok(())
    }

    /// Analyzer output (stdout followed by stderr)
    pub async fn stats(&self, reference: &str) -> Result<String> {
        let path = self.resolve_file(reference)?;
        Ok(self.tools.stats(&path).await?)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn resolve_file(&self, reference: &str) -> Result<std::path::PathBuf> {
        let sound = self.resolve(reference)?;
        Ok(self.root.absolute_path(&sound.path))
    }

    /// Hash `file`, failing early if that content is already cataloged
    fn unique_hash(&self, file: &Path) -> Result<ContentHash> {
        let hash = compute_hash(file)?;
        if self.catalog.find_by_hash(&hash)?.is_some() {
            return Err(CatalogError::Duplicate(hash));
        }
        Ok(hash)
    }

    fn duration_of(&self, file: &Path) -> Result<f64> {
        self.probe
            .probe_duration(file)
            .map_err(|source| CatalogError::Probe {
                path: file.to_path_buf(),
                source,
            })
    }
}
