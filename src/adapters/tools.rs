//! External audio tools run as subprocesses.
//!
//! Each tool is an argv template. `{path}` in any argument is replaced by
//! the absolute path of the sound; when no argument carries the placeholder
//! the path is appended.

use std::ffi::OsString;
use std::path::Path;
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use super::{ToolError, Toolbox};
use crate::config::ToolsConfig;

/// A configured external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
}

impl ToolCommand {
    /// Placeholder substituted with the sound's absolute path
    pub const PATH_PLACEHOLDER: &'static str = "{path}";

    /// Build from an argv template (`["sox", "{path}", "-d"]`)
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        if program.trim().is_empty() {
            return None;
        }
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments with the path substituted in
    pub fn args_for(&self, path: &Path) -> Vec<OsString> {
        let path_str = path.to_string_lossy();
        let mut substituted = false;

        let mut args: Vec<OsString> = self
            .args
            .iter()
            .map(|arg| {
                if arg == Self::PATH_PLACEHOLDER {
                    substituted = true;
                    path.as_os_str().to_os_string()
                } else if arg.contains(Self::PATH_PLACEHOLDER) {
                    substituted = true;
                    OsString::from(arg.replace(Self::PATH_PLACEHOLDER, &path_str))
                } else {
                    OsString::from(arg)
                }
            })
            .collect();

        if !substituted {
            args.push(path.as_os_str().to_os_string());
        }
        args
    }

    fn command(&self, path: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command.args(self.args_for(path)).stdin(Stdio::null());
        command
    }
}

/// Toolbox that shells out to player, editor and analyzer commands
#[derive(Debug, Clone)]
pub struct SubprocessToolbox {
    player: ToolCommand,
    editor: ToolCommand,
    analyzer: ToolCommand,
}

/// How a blocking `play` ended
enum PlayOutcome {
    Exited(std::io::Result<ExitStatus>),
    Interrupted,
    NoSignalHandler(std::io::Error),
}

impl SubprocessToolbox {
    pub fn new(player: ToolCommand, editor: ToolCommand, analyzer: ToolCommand) -> Self {
        Self {
            player,
            editor,
            analyzer,
        }
    }

    /// Build the toolbox from the configured argv templates
    pub fn from_config(config: &ToolsConfig) -> Result<Self, ToolError> {
        let player = ToolCommand::from_argv(&config.player)
            .ok_or(ToolError::EmptyCommand { tool: "player" })?;
        let editor = ToolCommand::from_argv(&config.editor)
            .ok_or(ToolError::EmptyCommand { tool: "editor" })?;
        let analyzer = ToolCommand::from_argv(&config.analyzer)
            .ok_or(ToolError::EmptyCommand { tool: "analyzer" })?;
        Ok(Self::new(player, editor, analyzer))
    }

    fn spawn_error<'a>(
        tool: &'static str,
        cmd: &'a ToolCommand,
    ) -> impl FnOnce(std::io::Error) -> ToolError + 'a {
        move |source| ToolError::Spawn {
            tool,
            program: cmd.program.clone(),
            source,
        }
    }
}

fn report_status(tool: &str, status: ExitStatus) {
    if status.success() {
        debug!("{} exited cleanly", tool);
    } else {
        warn!("{} exited with {}", tool, status);
    }
}

#[async_trait]
impl Toolbox for SubprocessToolbox {
    async fn play(&self, path: &Path) -> Result<(), ToolError> {
        debug!("Playing {} with {}", path.display(), self.player.program);

        let mut child = self
            .player
            .command(path)
            .spawn()
            .map_err(Self::spawn_error("player", &self.player))?;

        let outcome = tokio::select! {
            status = child.wait() => PlayOutcome::Exited(status),
            signal = tokio::signal::ctrl_c() => match signal {
                Ok(()) => PlayOutcome::Interrupted,
                Err(e) => PlayOutcome::NoSignalHandler(e),
            },
        };

        match outcome {
            PlayOutcome::Exited(status) => {
                let status = status.map_err(Self::spawn_error("player", &self.player))?;
                report_status("player", status);
                Ok(())
            }
            PlayOutcome::Interrupted => {
                // The player received the same SIGINT; let it restore the
                // terminal before handing control back.
                let _ = child.wait().await;
                Err(ToolError::Interrupted { tool: "player" })
            }
            PlayOutcome::NoSignalHandler(e) => {
                debug!("Ctrl-C handler unavailable: {}", e);
                let status = child
                    .wait()
                    .await
                    .map_err(Self::spawn_error("player", &self.player))?;
                report_status("player", status);
                Ok(())
            }
        }
    }

    async fn edit(&self, path: &Path) -> Result<(), ToolError> {
        debug!("Editing {} with {}", path.display(), self.editor.program);

        let status = self
            .editor
            .command(path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(Self::spawn_error("editor", &self.editor))?;

        report_status("editor", status);
        Ok(())
    }

    async fn stats(&self, path: &Path) -> Result<String, ToolError> {
        debug!("Analyzing {} with {}", path.display(), self.analyzer.program);

        let output = self
            .analyzer
            .command(path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(Self::spawn_error("analyzer", &self.analyzer))?;

        report_status("analyzer", output.status);

        // sox prints its stats on stderr, so both streams are the report
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }
}
