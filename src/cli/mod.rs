//! Command-line interface for soundman.
//!
//! Global options are parsed by clap; the command itself is positional
//! (`soundman add <raw.wav> <name> <location>`) and validated by
//! [`Command::parse`] before the catalog is opened.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::adapters::ToolError;
use crate::catalog::CatalogError;
use crate::config::{self, Overrides, ResolvedConfig};
use crate::core::{render, CatalogService};

pub mod command;

pub use command::{Command, UsageError};

/// soundman - catalog of raw and processed sound recordings
#[derive(Parser, Debug)]
#[command(name = "soundman")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Library root (every cataloged file lives below it)
    #[arg(long, env = "SOUNDMAN_LIBRARY")]
    pub library: Option<PathBuf>,

    /// Catalog database file
    #[arg(long, env = "SOUNDMAN_DATABASE")]
    pub database: Option<PathBuf>,

    /// Command: add, edit, info, link, ls, play, rename, search, stats, tag, lineage, config
    pub command: Option<String>,

    /// Command arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let command = match Command::parse(self.command.as_deref(), &self.args) {
            Ok(command) => command,
            Err(usage) => {
                println!("{}", usage);
                return Ok(());
            }
        };

        let overrides = Overrides {
            library: self.library,
            database: self.database,
        };
        let config = config::load_config(&overrides)?;

        let mut service = CatalogService::open(&config)
            .with_context(|| format!("Failed to open catalog: {}", config.database.display()))?;

        run_command(&mut service, &config, command).await
    }
}

/// Run a validated command against an open catalog
pub async fn run_command(
    service: &mut CatalogService,
    config: &ResolvedConfig,
    command: Command,
) -> Result<()> {
    match command {
        Command::Add {
            file,
            name,
            location,
        } => match service.ingest_raw(&file, &name, &location) {
            Ok(sound) => println!("Added {}", render::list_line(&sound)),
            Err(CatalogError::Duplicate(_)) => println!("This sound is already in the database!"),
            Err(e) => return Err(e.into()),
        },
        Command::Link { file, origin, name } => {
            let sound = service.link_processed(&file, &origin, &name)?;
            println!("Linked {}", render::list_line(&sound));
        }
        Command::Tag { reference, tags } => {
            let tags = service.tag(&reference, tags.as_slice())?;
            let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
            println!("Tagged with {}", names.join(", "));
        }
        Command::Rename {
            reference,
            new_name,
        } => {
            let sound = service.rename(&reference, &new_name)?;
            println!("Renamed {} to {}", sound.hash.short(), sound.name);
        }
        Command::List { pattern } => {
            for line in service.list(pattern.as_deref())? {
                println!("{}", line);
            }
        }
        Command::Search { keyword } => {
            let lines = service.search(&keyword)?;
            if lines.is_empty() {
                println!("No sounds found for: {}", keyword);
            }
            for line in lines {
                println!("{}", line);
            }
        }
        Command::Info { reference } => {
            println!("{}", service.info(&reference)?);
        }
        Command::Lineage { reference } => {
            for line in service.lineage(&reference)? {
                println!("{}", line);
            }
        }
        Command::Play { reference } => match service.play(&reference).await {
            Ok(()) => {}
            Err(CatalogError::Tool(ToolError::Interrupted { .. })) => {
                eprintln!("Playback interrupted");
            }
            Err(e) => return Err(e.into()),
        },
        Command::Edit { reference } => {
            service.edit(&reference).await?;
        }
        Command::Stats { reference } => {
            print!("{}", service.stats(&reference).await?);
        }
        Command::Config => show_config(service, config)?,
    }

    Ok(())
}

/// Print the resolved configuration
fn show_config(service: &CatalogService, config: &ResolvedConfig) -> Result<()> {
    let config_file = config
        .config_file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none - using defaults)".to_string());

    println!("Config file: {}", config_file);
    println!();
    println!("Paths:");
    println!("  Library:  {}", service.root().path().display());
    println!("  Database: {}", config.database.display());
    println!();
    println!("Tools:");
    println!("  Player:   {}", config.tools.player.join(" "));
    println!("  Editor:   {}", config.tools.editor.join(" "));
    println!("  Analyzer: {}", config.tools.analyzer.join(" "));
    println!();
    println!("Sounds: {}", service.catalog().count()?);

    Ok(())
}
