//! List command implementation.
//!
//! The `commando list` command lists registered commands with their usage,
//! description and required permission.

use serde::Serialize;

use crate::cli::args::ListArgs;
use crate::command::CommandDefinition;
use crate::config::Manifest;
use crate::error::{CommandError, Result};
use crate::ui::{MessageTheme, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::run::open_host;

/// One command as shown by `list --json`.
#[derive(Debug, Serialize)]
pub struct CommandSummary {
    /// Primary name.
    pub name: String,
    /// Aliases.
    pub aliases: Vec<String>,
    /// Usage line with prefix.
    pub usage: String,
    /// Description, possibly empty.
    pub description: String,
    /// Required permission, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
}

impl CommandSummary {
    /// Summarize a registered command.
    pub fn new(command: &CommandDefinition, prefix: &str) -> Self {
        Self {
            name: command.name().to_string(),
            aliases: command.aliases().to_vec(),
            usage: command.usage(prefix, command.name()),
            description: command.description().to_string(),
            permission: command.permission().map(String::from),
        }
    }
}

/// The list command implementation.
pub struct ListCommand {
    manifest: Manifest,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(manifest: Manifest, args: ListArgs) -> Self {
        Self { manifest, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let host = open_host(&self.manifest, ui);
        let summaries: Vec<CommandSummary> = host
            .registry()
            .commands()
            .iter()
            .map(|command| CommandSummary::new(command, host.prefix()))
            .collect();

        if self.args.json {
            let json = serde_json::to_string_pretty(&summaries)
                .map_err(|e| CommandError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        let theme = MessageTheme::for_colors(ui.is_colored());
        let [usage, description, permission] = &theme.help;
        for summary in &summaries {
            let mut line = format!("{}", usage.apply_to(&summary.usage));
            if !summary.description.is_empty() {
                line.push_str(&format!(" {}", description.apply_to(format!("- {}", summary.description))));
            }
            if let Some(perm) = &summary.permission {
                line.push_str(&format!(" {}", permission.apply_to(format!("({})", perm))));
            }
            ui.message(&line);
        }
        if !summaries.is_empty() {
            ui.success(&format!("{} commands", summaries.len()));
        }
        Ok(CommandResult::success())
    }
}
