//! Exec command implementation.
//!
//! The `commando exec <LINE>` command runs one command line and exits with
//! status 1 if it fails.

use crate::cli::args::ExecArgs;
use crate::config::Manifest;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::run::{console_issuer, open_host};

/// The exec command implementation.
pub struct ExecCommand {
    manifest: Manifest,
    args: ExecArgs,
}

impl ExecCommand {
    /// Create a new exec command.
    pub fn new(manifest: Manifest, args: ExecArgs) -> Self {
        Self { manifest, args }
    }

    /// The command line as typed.
    pub fn line(&self) -> String {
        self.args.line.join(" ")
    }
}

impl Command for ExecCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let host = open_host(&self.manifest, ui);
        let mut issuer = console_issuer(&self.manifest, &self.args.identity, ui.is_colored());

        match host.execute_line(&self.line(), &mut issuer) {
            Some(outcome) if outcome.is_success() => Ok(CommandResult::success()),
            Some(_) => Ok(CommandResult::failure(1)),
            None => {
                ui.error("No command given");
                Ok(CommandResult::failure(2))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::IdentityArgs;
    use crate::ui::MockUI;

    fn exec(line: &[&str]) -> ExecCommand {
        ExecCommand::new(
            Manifest::default(),
            ExecArgs {
                identity: IdentityArgs::default(),
                line: line.iter().map(|s| s.to_string()).collect(),
            },
        )
    }

    #[test]
    fn line_joins_arguments() {
        assert_eq!(exec(&["heal", "50"]).line(), "heal 50");
    }

    #[test]
    fn blank_line_is_usage_error() {
        let mut ui = MockUI::new();
        let result = exec(&["  "]).execute(&mut ui).unwrap();
        assert_eq!(result.exit_code, 2);
        assert!(ui.has_error("No command given"));
    }
}
