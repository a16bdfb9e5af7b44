//! Turning manifest entries into command declarations.

use crate::config::schema::{CommandConfig, Manifest};
use crate::declare::{CommandDeclaration, Replacements};
use crate::dispatch::CommandContext;
use crate::error::HandlerError;
use crate::help::HelpFormatter;
use crate::message::render;

impl CommandConfig {
    /// Build a declaration whose handler sends the configured reply.
    pub fn to_declaration(&self) -> CommandDeclaration {
        let mut decl = CommandDeclaration::new(&self.name);
        for alias in &self.aliases {
            decl = decl.alias(alias);
        }
        for param in &self.params {
            decl = decl.param(param.to_spec());
        }
        if let Some(permission) = &self.permission {
            decl = decl.permission(permission);
        }
        if let Some(description) = &self.description {
            decl = decl.description(description);
        }
        if let Some(syntax) = &self.syntax {
            decl = decl.syntax(syntax);
        }

        let reply = self.reply.clone();
        let error = self.error.clone();
        decl.handler(move |ctx| {
            if let Some(error) = &error {
                return Err(HandlerError::invalid(fill(error, ctx)));
            }
            if let Some(reply) = &reply {
                let text = fill(reply, ctx);
                for line in text.lines() {
                    ctx.reply(line);
                }
            }
            Ok(())
        })
    }
}

/// Substitute `{issuer}`, `{label}` and every parameter into a template.
///
/// Parameters without a value become empty.
fn fill(template: &str, ctx: &CommandContext<'_>) -> String {
    let mut pairs: Vec<(&str, String)> = vec![
        ("issuer", ctx.issuer.name().to_string()),
        ("label", ctx.label.to_string()),
    ];
    for param in ctx.command.params() {
        let value = ctx
            .args
            .get(&param.name)
            .map(ToString::to_string)
            .unwrap_or_default();
        pairs.push((param.name.as_str(), value));
    }
    let pairs: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (*k, v.as_str())).collect();
    render(template, &pairs)
}

impl Manifest {
    /// Declarations for every manifest command, followed by `help` when
    /// enabled.
    pub fn declarations(&self) -> Vec<CommandDeclaration> {
        let mut decls: Vec<CommandDeclaration> =
            self.commands.iter().map(CommandConfig::to_declaration).collect();
        if self.settings.help_command {
            decls.push(self.help_formatter().declaration());
        }
        decls
    }

    /// The `%key` replacement table.
    pub fn replacement_table(&self) -> Replacements {
        let mut replacements = Replacements::new();
        replacements.add_all(self.replacements.iter());
        replacements
    }

    /// A help formatter using the manifest's prefix, page size and messages.
    pub fn help_formatter(&self) -> HelpFormatter {
        HelpFormatter::new(&self.settings.command_prefix, self.messages.clone())
            .with_per_page(self.settings.help_per_page)
    }
}
