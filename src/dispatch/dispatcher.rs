//! Command dispatching.
//!
//! Dispatch runs as a small state machine:
//!
//! 1. **Matching** - split the input into a command token and the rest, look
//!    the command up, and check permissions
//! 2. **Binding** - resolve each declared parameter from the remaining
//!    tokens, left to right, stopping at the first failure
//! 3. **Checking** - run the command's conditions against the bound
//!    arguments
//! 4. **Invoking** - call the handler with the resolved arguments
//!
//! [`Dispatcher::execute`] returns the typed result. [`Dispatcher::dispatch`]
//! additionally turns every failure into a message for the issuer, so no
//! error escapes to the host. [`Dispatcher::complete`] suggests the next
//! token of partial input.

use std::sync::Arc;

use super::context::{CommandArgs, CommandContext};
use crate::command::{CommandDefinition, CommandRegistry, ParameterSpec};
use crate::error::{ArgumentParseError, CommandError, HandlerError, Result};
use crate::issuer::{permits, CommandIssuer};
use crate::message::{render, Message, Messages};
use crate::resolve::{starting_with, ResolverTable, Value};

/// A successful invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// Primary name of the command that ran.
    pub command: String,
    /// The name or alias that was typed, lowercase.
    pub label: String,
    /// Arguments the handler received.
    pub args: CommandArgs,
}

/// Final state of a dispatch.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The handler ran to completion.
    Success(Invocation),
    /// Dispatch stopped with an error, already reported to the issuer.
    Failure(CommandError),
}

impl DispatchOutcome {
    /// Whether the handler ran to completion.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The error, if dispatch failed.
    pub fn error(&self) -> Option<&CommandError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(err) => Some(err),
        }
    }
}

enum State<'t> {
    Matching {
        tokens: &'t [String],
    },
    Binding {
        command: Arc<CommandDefinition>,
        label: String,
        rest: &'t [String],
    },
    Checking {
        command: Arc<CommandDefinition>,
        label: String,
        args: CommandArgs,
    },
    Invoking {
        command: Arc<CommandDefinition>,
        label: String,
        args: CommandArgs,
    },
}

/// Routes tokenized input to registered commands.
pub struct Dispatcher<'r> {
    registry: &'r CommandRegistry,
    resolvers: &'r ResolverTable,
    messages: Messages,
    prefix: String,
}

impl<'r> Dispatcher<'r> {
    /// Create a dispatcher over a registry and resolver table.
    pub fn new(registry: &'r CommandRegistry, resolvers: &'r ResolverTable) -> Self {
        Self {
            registry,
            resolvers,
            messages: Messages::default(),
            prefix: "/".to_string(),
        }
    }

    /// Use custom message templates.
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Set the command prefix shown in usage lines.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// The command prefix shown in usage lines.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The message templates in use.
    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Dispatch input and report any failure to the issuer.
    pub fn dispatch(&self, tokens: &[String], issuer: &mut dyn CommandIssuer) -> DispatchOutcome {
        match self.execute(tokens, issuer) {
            Ok(invocation) => {
                tracing::debug!(command = %invocation.command, "command completed");
                DispatchOutcome::Success(invocation)
            }
            Err(err) => {
                tracing::debug!(error = %err, "command failed");
                self.report(&err, tokens, issuer);
                DispatchOutcome::Failure(err)
            }
        }
    }

    /// Dispatch input, returning the typed result without reporting it.
    pub fn execute(&self, tokens: &[String], issuer: &mut dyn CommandIssuer) -> Result<Invocation> {
        let mut state = State::Matching { tokens };
        loop {
            state = match state {
                State::Matching { tokens } => {
                    let (head, rest) =
                        tokens
                            .split_first()
                            .ok_or_else(|| CommandError::UnknownCommand {
                                name: String::new(),
                            })?;
                    let label = head.to_lowercase();
                    let command = self.registry.lookup(&label).ok_or_else(|| {
                        CommandError::UnknownCommand {
                            name: head.clone(),
                        }
                    })?;
                    if let Err(permission) = permits(&*issuer, command.permission()) {
                        return Err(CommandError::PermissionDenied {
                            command: command.name().to_string(),
                            permission,
                        });
                    }
                    tracing::trace!(command = command.name(), %label, "matched");
                    State::Binding {
                        command,
                        label,
                        rest,
                    }
                }
                State::Binding {
                    command,
                    label,
                    rest,
                } => {
                    let args = self.bind(&command, rest)?;
                    tracing::trace!(command = command.name(), args = args.len(), "bound");
                    State::Checking {
                        command,
                        label,
                        args,
                    }
                }
                State::Checking {
                    command,
                    label,
                    args,
                } => {
                    for condition in command.conditions() {
                        condition(&*issuer, &args).map_err(|message| {
                            CommandError::ConditionFailed {
                                command: command.name().to_string(),
                                message,
                            }
                        })?;
                    }
                    State::Invoking {
                        command,
                        label,
                        args,
                    }
                }
                State::Invoking {
                    command,
                    label,
                    args,
                } => return self.invoke(&command, label, args, issuer),
            };
        }
    }

    /// Suggest completions for the last token of `tokens`.
    ///
    /// The last token is the partial word being typed; pass an empty string
    /// after a trailing space. The first word completes to command names and
    /// aliases the issuer may run. Later words complete flag names after
    /// `--`, or values for the parameter the word would bind to, taken from
    /// the parameter's fixed completions or else its resolver. Each
    /// positional parameter is assumed to take one token.
    pub fn complete(&self, tokens: &[String], issuer: &dyn CommandIssuer) -> Vec<String> {
        let Some((partial, before)) = tokens.split_last() else {
            return self.complete_command("", issuer);
        };
        let Some((head, args)) = before.split_first() else {
            return self.complete_command(partial, issuer);
        };
        let Some(command) = self.registry.lookup(head) else {
            return Vec::new();
        };
        if permits(issuer, command.permission()).is_err() {
            return Vec::new();
        }

        let flags: Vec<&ParameterSpec> = command.params().iter().filter(|p| p.flags.flag).collect();
        let mut flags_done = false;
        let mut positional = 0;
        let mut pending: Option<&ParameterSpec> = None;
        let mut used: Vec<&str> = Vec::new();
        for token in args {
            if pending.take().is_some() {
                continue;
            }
            if !flags_done && token == "--" {
                flags_done = true;
                continue;
            }
            match flag_for(&flags, token).filter(|_| !flags_done) {
                Some(spec) => {
                    used.push(spec.name.as_str());
                    if !spec.is_switch() {
                        pending = Some(spec);
                    }
                }
                None => positional += 1,
            }
        }

        if let Some(spec) = pending {
            return self.complete_param(spec, partial);
        }
        if !flags_done {
            if let Some(name) = partial.strip_prefix("--") {
                let unused = flags
                    .iter()
                    .filter(|spec| !used.iter().any(|u| u.eq_ignore_ascii_case(&spec.name)))
                    .map(|spec| spec.name.as_str());
                return starting_with(unused, name)
                    .into_iter()
                    .map(|name| format!("--{}", name))
                    .collect();
            }
        }

        let params: Vec<&ParameterSpec> =
            command.params().iter().filter(|p| !p.flags.flag).collect();
        let spec = match params.get(positional) {
            Some(spec) => Some(*spec),
            None => params.last().copied().filter(|spec| spec.flags.greedy),
        };
        spec.map(|spec| self.complete_param(spec, partial))
            .unwrap_or_default()
    }

    fn complete_command(&self, partial: &str, issuer: &dyn CommandIssuer) -> Vec<String> {
        let mut keys: Vec<String> = self
            .registry
            .commands()
            .iter()
            .filter(|command| permits(issuer, command.permission()).is_ok())
            .flat_map(|command| starting_with(command.keys(), partial))
            .collect();
        keys.sort();
        keys
    }

    fn complete_param(&self, spec: &ParameterSpec, partial: &str) -> Vec<String> {
        if !spec.completions.is_empty() {
            return starting_with(&spec.completions, partial);
        }
        self.resolvers
            .get(&spec.type_id)
            .map(|resolver| resolver.complete(partial))
            .unwrap_or_default()
    }

    fn bind(&self, command: &CommandDefinition, tokens: &[String]) -> Result<CommandArgs> {
        if let Some(spec) = command
            .params()
            .iter()
            .find(|spec| !self.resolvers.contains(&spec.type_id))
        {
            return Err(configuration(command, spec));
        }

        let mut args = CommandArgs::new();
        let flags: Vec<&ParameterSpec> = command.params().iter().filter(|p| p.flags.flag).collect();

        // Flags first, wherever they appear. A bare `--` ends flag parsing.
        let mut positional: Vec<String> = Vec::with_capacity(tokens.len());
        let mut index = 0;
        while index < tokens.len() {
            let token = &tokens[index];
            index += 1;
            if token == "--" {
                positional.extend(tokens[index..].iter().cloned());
                break;
            }
            let Some(spec) = flag_for(&flags, token) else {
                positional.push(token.clone());
                continue;
            };
            if spec.is_switch() {
                args.insert(&spec.name, Value::Boolean(true));
                continue;
            }
            let (value, rest) = self.resolve_param(command, spec, &tokens[index..])?;
            index = tokens.len() - rest.len();
            args.insert(&spec.name, value);
        }
        for spec in &flags {
            if args.contains(&spec.name) {
                continue;
            }
            if let Some(value) = self.resolve_default(command, spec)? {
                args.insert(&spec.name, value);
            } else if spec.is_switch() {
                args.insert(&spec.name, Value::Boolean(false));
            }
        }

        let mut rest: &[String] = &positional;
        for spec in command.params().iter().filter(|p| !p.flags.flag) {
            if rest.is_empty() {
                if !spec.is_optional() {
                    let expected = self
                        .resolvers
                        .get(&spec.type_id)
                        .map(|r| r.describe().to_string())
                        .unwrap_or_else(|| spec.type_id.to_string());
                    return Err(ArgumentParseError::missing(expected)
                        .for_parameter(&spec.name)
                        .into());
                }
                if let Some(value) = self.resolve_default(command, spec)? {
                    args.insert(&spec.name, value);
                }
                continue;
            }
            if spec.flags.greedy {
                let joined = [rest.join(" ")];
                let (value, _) = self.resolve_param(command, spec, &joined)?;
                args.insert(&spec.name, value);
                rest = &[];
                continue;
            }
            let (value, remaining) = self.resolve_param(command, spec, rest)?;
            args.insert(&spec.name, value);
            rest = remaining;
        }

        if let Some(extra) = rest.first() {
            return Err(ArgumentParseError::new("end of input", extra.as_str()).into());
        }
        Ok(args)
    }

    fn resolve_param<'t>(
        &self,
        command: &CommandDefinition,
        spec: &ParameterSpec,
        tokens: &'t [String],
    ) -> Result<(Value, &'t [String])> {
        self.resolvers
            .resolve(&spec.type_id, tokens)
            .ok_or_else(|| configuration(command, spec))?
            .map_err(|err| err.for_parameter(&spec.name).into())
    }

    fn resolve_default(
        &self,
        command: &CommandDefinition,
        spec: &ParameterSpec,
    ) -> Result<Option<Value>> {
        let Some(default) = &spec.default else {
            return Ok(None);
        };
        let tokens = [default.clone()];
        let (value, _) = self.resolve_param(command, spec, &tokens)?;
        Ok(Some(value))
    }

    fn invoke(
        &self,
        command: &CommandDefinition,
        label: String,
        args: CommandArgs,
        issuer: &mut dyn CommandIssuer,
    ) -> Result<Invocation> {
        let mut ctx = CommandContext {
            issuer,
            args,
            label: &label,
            command,
            registry: self.registry,
        };
        let result = (command.handler())(&mut ctx);
        let args = ctx.args;
        result.map_err(|source| CommandError::Handler {
            command: command.name().to_string(),
            source,
        })?;
        Ok(Invocation {
            command: command.name().to_string(),
            label,
            args,
        })
    }

    fn report(&self, err: &CommandError, tokens: &[String], issuer: &mut dyn CommandIssuer) {
        let messages = &self.messages;
        let prefix = self.prefix.as_str();
        match err {
            CommandError::UnknownCommand { name } => {
                issuer.send_message(Message::error(render(
                    &messages.unknown_command,
                    &[("command", name), ("prefix", prefix)],
                )));
            }
            CommandError::PermissionDenied {
                command,
                permission,
            } => {
                issuer.send_message(Message::error(render(
                    &messages.permission_denied,
                    &[("command", command), ("permission", permission)],
                )));
            }
            CommandError::ArgumentParse(parse) => {
                issuer.send_message(Message::error(render(
                    &messages.invalid_argument,
                    &[("error", &parse.to_string())],
                )));
                let label = tokens.first().map(|t| t.to_lowercase()).unwrap_or_default();
                if let Some(command) = self.registry.lookup(&label) {
                    issuer.send_message(Message::syntax(render(
                        &messages.usage,
                        &[("usage", &command.usage(prefix, &label))],
                    )));
                }
            }
            CommandError::Configuration { command, type_id } => {
                tracing::error!(%command, %type_id, "no resolver registered for parameter type");
                issuer.send_message(Message::error(render(
                    &messages.configuration_error,
                    &[("command", command), ("type", type_id)],
                )));
            }
            CommandError::ConditionFailed { command, message } => {
                issuer.send_message(Message::error(render(
                    &messages.condition_failed,
                    &[("command", command), ("error", message)],
                )));
            }
            CommandError::Handler {
                source: HandlerError::Invalid(message),
                ..
            } => {
                issuer.send_message(Message::error(render(
                    &messages.input_error,
                    &[("error", message)],
                )));
            }
            CommandError::Handler {
                command,
                source: HandlerError::Failed(source),
            } => {
                tracing::error!(%command, issuer = issuer.name(), error = ?source, "command handler failed");
                issuer.send_message(Message::error(render(
                    &messages.command_failed,
                    &[("command", command)],
                )));
            }
            other => {
                tracing::error!(error = %other, "unexpected dispatch error");
                issuer.send_message(Message::error(render(
                    &messages.command_failed,
                    &[("command", "")],
                )));
            }
        }
    }
}

fn configuration(command: &CommandDefinition, spec: &ParameterSpec) -> CommandError {
    CommandError::Configuration {
        command: command.name().to_string(),
        type_id: spec.type_id.to_string(),
    }
}

fn flag_for<'p>(flags: &[&'p ParameterSpec], token: &str) -> Option<&'p ParameterSpec> {
    let name = token.strip_prefix("--").filter(|name| !name.is_empty())?;
    flags
        .iter()
        .copied()
        .find(|spec| spec.name.eq_ignore_ascii_case(name))
}
