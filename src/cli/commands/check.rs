//! Check command implementation.
//!
//! The `commando check` command registers every manifest command and
//! reports the ones that were rejected.

use crate::config::Manifest;
use crate::console::ConsoleHost;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    manifest: Manifest,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(manifest: Manifest) -> Self {
        Self { manifest }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (_, report) = ConsoleHost::from_manifest(&self.manifest);
        for (name, err) in &report.rejected {
            ui.error(&format!("{}: {}", name, err));
        }
        if report.is_clean() {
            ui.success(&format!(
                "Manifest is valid ({} commands)",
                report.registered.len()
            ));
            Ok(CommandResult::success())
        } else {
            ui.error(&format!(
                "{} of {} commands rejected",
                report.rejected.len(),
                report.rejected.len() + report.registered.len()
            ));
            Ok(CommandResult::failure(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    #[test]
    fn valid_manifest_passes() {
        let manifest: Manifest = serde_yaml::from_str("commands:\n  - name: ping\n").unwrap();
        let mut ui = MockUI::new();
        let result = CheckCommand::new(manifest).execute(&mut ui).unwrap();
        assert!(result.success);
        assert_eq!(ui.successes(), ["Manifest is valid (2 commands)"]);
    }

    #[test]
    fn rejected_declarations_fail() {
        let manifest: Manifest = serde_yaml::from_str(
            "commands:\n  - name: tp\n    params:\n      - { name: x, optional: true }\n      - { name: y }\n",
        )
        .unwrap();
        let mut ui = MockUI::new();
        let result = CheckCommand::new(manifest).execute(&mut ui).unwrap();
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("tp: Invalid declaration for 'tp'"));
        assert!(ui.has_error("1 of 2 commands rejected"));
    }
}
