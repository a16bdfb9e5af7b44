//! Run command implementation.
//!
//! The `commando run` command reads command lines from stdin until end of
//! input. It is the default when no subcommand is given.

use std::io::{self, Stdout};

use crate::cli::args::{IdentityArgs, RunArgs};
use crate::config::Manifest;
use crate::console::{ConsoleHost, ConsoleIssuer};
use crate::error::Result;
use crate::ui::{MessageTheme, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    manifest: Manifest,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(manifest: Manifest, args: RunArgs) -> Self {
        Self { manifest, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let host = open_host(&self.manifest, ui);
        let mut issuer = console_issuer(&self.manifest, &self.args.identity, ui.is_colored());

        if ui.is_interactive() {
            ui.success(&format!(
                "{} commands loaded, type {}help for help",
                host.registry().len(),
                host.prefix()
            ));
        }

        let summary = host.run(io::stdin().lock(), &mut issuer)?;
        if summary.is_success() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

/// Build a host from the manifest, warning about rejected declarations.
pub(crate) fn open_host(manifest: &Manifest, ui: &mut dyn UserInterface) -> ConsoleHost {
    let (host, report) = ConsoleHost::from_manifest(manifest);
    for (name, err) in &report.rejected {
        ui.warning(&format!("Skipped command '{}': {}", name, err));
    }
    host
}

/// The stdout issuer for the manifest identity plus CLI overrides.
pub(crate) fn console_issuer(
    manifest: &Manifest,
    identity: &IdentityArgs,
    colored: bool,
) -> ConsoleIssuer<Stdout> {
    let name = identity
        .name
        .clone()
        .unwrap_or_else(|| manifest.identity.name.clone());
    ConsoleIssuer::new(name, io::stdout())
        .with_theme(MessageTheme::for_colors(colored))
        .with_grants(manifest.identity.permissions.iter().cloned())
        .with_grants(identity.grants.iter().cloned())
}
