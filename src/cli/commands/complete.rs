//! Complete command implementation.
//!
//! The `commando complete` command prints one suggestion per line for a
//! partial command line, as a shell or editor integration would request.

use crate::cli::args::CompleteArgs;
use crate::config::Manifest;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::run::{console_issuer, open_host};

pub struct CompleteCommand {
    manifest: Manifest,
    args: CompleteArgs,
}

impl CompleteCommand {
    pub fn new(manifest: Manifest, args: CompleteArgs) -> Self {
        Self { manifest, args }
    }
}

impl Command for CompleteCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let host = open_host(&self.manifest, ui);
        let issuer = console_issuer(&self.manifest, &self.args.identity, false);
        for suggestion in host.complete(&self.args.line, &issuer) {
            ui.message(&suggestion);
        }
        Ok(CommandResult::success())
    }
}
