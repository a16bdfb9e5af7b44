//! A line-oriented host for the command core.
//!
//! [`ConsoleHost`] owns a registry and resolver table, reads lines, strips
//! the command prefix, tokenizes and dispatches. Every failure is reported
//! to the issuer; only I/O errors on the input stream end a session.

use std::io::BufRead;
use std::sync::Arc;

use super::tokenizer::tokenize;
use crate::command::{CommandDefinition, CommandRegistry};
use crate::config::Manifest;
use crate::declare::{CommandDeclaration, DeclarationResolver, RegistrationReport, Replacements};
use crate::dispatch::{DispatchOutcome, Dispatcher};
use crate::error::{ArgumentParseError, CommandError, Result};
use crate::issuer::CommandIssuer;
use crate::message::{render, Message, Messages};
use crate::resolve::ResolverTable;

/// Counts for one console session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Non-blank lines read.
    pub lines: usize,
    /// Lines whose command completed.
    pub succeeded: usize,
    /// Lines that failed.
    pub failed: usize,
}

impl SessionSummary {
    /// Whether no line failed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Hosts commands behind a text console.
pub struct ConsoleHost {
    registry: CommandRegistry,
    resolvers: ResolverTable,
    replacements: Replacements,
    messages: Messages,
    prefix: String,
}

impl Default for ConsoleHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleHost {
    /// Create a host with the built-in resolvers and `/` prefix.
    pub fn new() -> Self {
        Self {
            registry: CommandRegistry::new(),
            resolvers: ResolverTable::with_builtins(),
            replacements: Replacements::new(),
            messages: Messages::default(),
            prefix: "/".to_string(),
        }
    }

    /// Set the command prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Use custom message templates.
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Substitute `%key` values in declarations registered afterwards.
    pub fn with_replacements(mut self, replacements: Replacements) -> Self {
        self.replacements = replacements;
        self
    }

    /// Build a host and register every command a manifest declares.
    pub fn from_manifest(manifest: &Manifest) -> (Self, RegistrationReport) {
        let host = Self::new()
            .with_prefix(&manifest.settings.command_prefix)
            .with_messages(manifest.messages.clone())
            .with_replacements(manifest.replacement_table());
        let report = host.register_all(manifest.declarations());
        (host, report)
    }

    /// The command registry.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// The resolver table, for registering custom types before commands.
    pub fn resolvers_mut(&mut self) -> &mut ResolverTable {
        &mut self.resolvers
    }

    /// The command prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn declarer(&self) -> DeclarationResolver<'_> {
        DeclarationResolver::new(&self.registry, &self.resolvers)
            .with_replacements(self.replacements.clone())
    }

    /// Validate and register one declaration.
    pub fn register(&self, decl: CommandDeclaration) -> Result<Arc<CommandDefinition>> {
        self.declarer().register(decl)
    }

    /// Register declarations independently of each other.
    pub fn register_all(
        &self,
        decls: impl IntoIterator<Item = CommandDeclaration>,
    ) -> RegistrationReport {
        self.declarer().register_all(decls)
    }

    /// A dispatcher over this host's registry.
    pub fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(&self.registry, &self.resolvers)
            .with_messages(self.messages.clone())
            .with_prefix(&self.prefix)
    }

    /// Run one line. Blank lines return `None`.
    pub fn execute_line(
        &self,
        line: &str,
        issuer: &mut dyn CommandIssuer,
    ) -> Option<DispatchOutcome> {
        self.line(&self.dispatcher(), line, issuer)
    }

    /// Completions for a partially typed line.
    ///
    /// A line ending in whitespace completes a new word. A line that does
    /// not tokenize completes to nothing.
    pub fn complete(&self, line: &str, issuer: &dyn CommandIssuer) -> Vec<String> {
        let line = line.trim_start();
        let line = line.strip_prefix(self.prefix.as_str()).unwrap_or(line);
        let Ok(mut tokens) = tokenize(line) else {
            return Vec::new();
        };
        if tokens.is_empty() || line.ends_with(char::is_whitespace) {
            tokens.push(String::new());
        }
        self.dispatcher().complete(&tokens, issuer)
    }

    /// Run every line of `input`.
    pub fn run<R: BufRead>(
        &self,
        input: R,
        issuer: &mut dyn CommandIssuer,
    ) -> Result<SessionSummary> {
        let dispatcher = self.dispatcher();
        let mut summary = SessionSummary::default();
        for line in input.lines() {
            let line = line?;
            let Some(outcome) = self.line(&dispatcher, &line, issuer) else {
                continue;
            };
            summary.lines += 1;
            if outcome.is_success() {
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
            }
        }
        tracing::debug!(
            lines = summary.lines,
            failed = summary.failed,
            "console session ended"
        );
        Ok(summary)
    }

    fn line(
        &self,
        dispatcher: &Dispatcher<'_>,
        line: &str,
        issuer: &mut dyn CommandIssuer,
    ) -> Option<DispatchOutcome> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let line = line.strip_prefix(self.prefix.as_str()).unwrap_or(line);
        tracing::debug!(issuer = issuer.name(), %line, "console input");

        match tokenize(line) {
            Ok(tokens) => Some(dispatcher.dispatch(&tokens, issuer)),
            Err(err) => {
                issuer.send_message(Message::error(render(
                    &self.messages.input_error,
                    &[("error", &err.to_string())],
                )));
                Some(DispatchOutcome::Failure(CommandError::ArgumentParse(
                    ArgumentParseError::from(err),
                )))
            }
        }
    }
}
