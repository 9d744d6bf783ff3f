//! Positional command parsing with per-command arity checks.

use std::path::PathBuf;

use thiserror::Error;

/// Usage lines, one per command
const USAGES: &[(&str, &str)] = &[
    ("add", "add <raw.wav> <name> <location>"),
    ("edit", "edit <hash|filename>"),
    ("info", "info <hash|filename>"),
    ("link", "link <processed.wav> <hash|filename> <name>"),
    ("ls", "ls [pattern]"),
    ("play", "play <hash|filename>"),
    ("rename", "rename <hash|filename> <new name>"),
    ("search", "search <keyword>"),
    ("stats", "stats <hash|filename>"),
    ("tag", "tag <hash|filename> <tag1> [<tag2>...]"),
    ("lineage", "lineage <hash|filename>"),
    ("config", "config"),
];

/// Wrong command name or argument count; displays the usage line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("usage: soundman {usage}")]
pub struct UsageError {
    usage: String,
}

impl UsageError {
    fn for_command(name: &str) -> Self {
        let usage = USAGES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, usage)| usage.to_string())
            .unwrap_or_else(|| name.to_string());
        Self { usage }
    }

    fn unknown() -> Self {
        let names: Vec<&str> = USAGES.iter().map(|(n, _)| *n).collect();
        Self {
            usage: format!("<{}> ...", names.join("|")),
        }
    }
}

/// A validated command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        file: PathBuf,
        name: String,
        location: String,
    },
    Edit {
        reference: String,
    },
    Info {
        reference: String,
    },
    Link {
        file: PathBuf,
        origin: String,
        name: String,
    },
    List {
        pattern: Option<String>,
    },
    Play {
        reference: String,
    },
    Rename {
        reference: String,
        new_name: String,
    },
    Search {
        keyword: String,
    },
    Stats {
        reference: String,
    },
    Tag {
        reference: String,
        tags: Vec<String>,
    },
    Lineage {
        reference: String,
    },
    Config,
}

impl Command {
    /// Map a command name and its arguments to a command.
    ///
    /// Nothing is opened or touched here; a bad invocation is rejected
    /// before the catalog exists.
    pub fn parse(name: Option<&str>, args: &[String]) -> Result<Self, UsageError> {
        let name = name.ok_or_else(UsageError::unknown)?;
        let canonical = match name {
            "show" => "info",
            "list" => "ls",
            other => other,
        };

        let command = match (canonical, args) {
            ("add", [file, name, location]) => Command::Add {
                file: PathBuf::from(file),
                name: name.clone(),
                location: location.clone(),
            },
            ("edit", [reference]) => Command::Edit {
                reference: reference.clone(),
            },
            ("info", [reference]) => Command::Info {
                reference: reference.clone(),
            },
            ("link", [file, origin, name]) => Command::Link {
                file: PathBuf::from(file),
                origin: origin.clone(),
                name: name.clone(),
            },
            ("ls", []) => Command::List { pattern: None },
            ("ls", [pattern]) => Command::List {
                pattern: Some(pattern.clone()),
            },
            ("play", [reference]) => Command::Play {
                reference: reference.clone(),
            },
            ("rename", [reference, new_name]) => Command::Rename {
                reference: reference.clone(),
                new_name: new_name.clone(),
            },
            ("search", [keyword]) => Command::Search {
                keyword: keyword.clone(),
            },
            ("stats", [reference]) => Command::Stats {
                reference: reference.clone(),
            },
            ("tag", [reference, tags @ ..]) if !tags.is_empty() => Command::Tag {
                reference: reference.clone(),
                tags: tags.to_vec(),
            },
            ("lineage", [reference]) => Command::Lineage {
                reference: reference.clone(),
            },
            ("config", []) => Command::Config,
            (known, _) if USAGES.iter().any(|(n, _)| *n == known) => return Err(UsageError::for_command(known)),
            _ => return Err(UsageError::unknown()),
        };

        Ok(command)
    }
}
