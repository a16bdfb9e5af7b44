//! Validation of declarations into registered commands.

use std::collections::HashSet;
use std::sync::Arc;

use super::declaration::CommandDeclaration;
use super::replacements::Replacements;
use crate::command::{CommandDefinition, CommandRegistry, ParameterSpec};
use crate::error::{CommandError, Result};
use crate::resolve::ResolverTable;

/// Outcome of [`DeclarationResolver::register_all`].
#[derive(Debug, Default)]
pub struct RegistrationReport {
    /// Primary names of commands that were registered.
    pub registered: Vec<String>,
    /// Declared names and the error that rejected them.
    pub rejected: Vec<(String, CommandError)>,
}

impl RegistrationReport {
    /// Whether every declaration was registered.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Turns [`CommandDeclaration`]s into registered commands.
pub struct DeclarationResolver<'a> {
    registry: &'a CommandRegistry,
    resolvers: &'a ResolverTable,
    replacements: Replacements,
}

impl<'a> DeclarationResolver<'a> {
    /// Create a resolver that registers into `registry`.
    pub fn new(registry: &'a CommandRegistry, resolvers: &'a ResolverTable) -> Self {
        Self {
            registry,
            resolvers,
            replacements: Replacements::new(),
        }
    }

    /// Substitute `%key` values before validating.
    pub fn with_replacements(mut self, replacements: Replacements) -> Self {
        self.replacements = replacements;
        self
    }

    /// Validate a declaration without registering it.
    pub fn resolve(&self, decl: CommandDeclaration) -> Result<CommandDefinition> {
        let r = &self.replacements;
        let raw = r.apply(&decl.names);
        let mut keys = raw.split('|').map(|k| k.trim().to_lowercase());
        let name = keys.next().unwrap_or_default();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(CommandError::invalid(&raw, "command name must be a single word"));
        }

        let mut aliases: Vec<String> = Vec::new();
        let extra = decl.aliases.iter().map(|a| r.apply(a).trim().to_lowercase());
        for alias in keys.chain(extra) {
            if alias.is_empty() || alias.contains(char::is_whitespace) {
                return Err(CommandError::invalid(
                    &name,
                    format!("alias '{}' must be a single word", alias),
                ));
            }
            if alias == name || aliases.contains(&alias) {
                return Err(CommandError::invalid(
                    &name,
                    format!("alias '{}' is repeated", alias),
                ));
            }
            aliases.push(alias);
        }

        let params = decl
            .params
            .into_iter()
            .map(|mut p| {
                p.description = p.description.map(|d| r.apply(&d));
                p.syntax = p.syntax.map(|s| r.apply(&s));
                p
            })
            .collect::<Vec<_>>();
        self.check_params(&name, &params)?;

        let handler = decl
            .handler
            .ok_or_else(|| CommandError::invalid(&name, "no handler"))?;

        let permission = decl
            .permission
            .map(|p| r.apply(&p).trim().to_string())
            .filter(|p| !p.is_empty());

        Ok(CommandDefinition::new(
            name,
            aliases,
            params,
            permission,
            decl.description.map(|d| r.apply(&d)).unwrap_or_default(),
            decl.syntax.map(|s| r.apply(&s)),
            handler,
        )
        .with_conditions(decl.conditions))
    }

    fn check_params(&self, command: &str, params: &[ParameterSpec]) -> Result<()> {
        let mut seen = HashSet::new();
        for param in params {
            let name = param.name.as_str();
            if name.is_empty() || name.contains(char::is_whitespace) {
                return Err(CommandError::invalid(
                    command,
                    format!("parameter name '{}' must be a single word", param.name),
                ));
            }
            if !seen.insert(name.to_lowercase()) {
                return Err(CommandError::invalid(
                    command,
                    format!("parameter '{}' is declared twice", name),
                ));
            }
            if param.flags.flag && param.flags.greedy {
                return Err(CommandError::invalid(
                    command,
                    format!("flag '--{}' cannot be greedy", name),
                ));
            }
        }

        let positional: Vec<&ParameterSpec> = params.iter().filter(|p| !p.flags.flag).collect();
        let mut optional_seen: Option<&str> = None;
        for (index, param) in positional.iter().copied().enumerate() {
            if param.flags.greedy && index + 1 != positional.len() {
                return Err(CommandError::invalid(
                    command,
                    format!("greedy parameter <{}> must be last", param.name),
                ));
            }
            match optional_seen {
                Some(previous) if !param.is_optional() => {
                    return Err(CommandError::invalid(
                        command,
                        format!(
                            "required parameter <{}> follows optional [{}]",
                            param.name, previous
                        ),
                    ));
                }
                _ if param.is_optional() => optional_seen = Some(param.name.as_str()),
                _ => {}
            }
        }

        for param in params {
            let Some(resolver) = self.resolvers.get(&param.type_id) else {
                return Err(CommandError::Configuration {
                    command: command.to_string(),
                    type_id: param.type_id.to_string(),
                });
            };
            if let Some(default) = &param.default {
                resolver.resolve(std::slice::from_ref(default)).map_err(|err| {
                    CommandError::invalid(
                        command,
                        format!("default for <{}>: {}", param.name, err),
                    )
                })?;
            }
        }
        Ok(())
    }

    /// Validate and register a declaration.
    pub fn register(&self, decl: CommandDeclaration) -> Result<Arc<CommandDefinition>> {
        let definition = self.resolve(decl)?;
        self.registry.register(definition)
    }

    /// Register every declaration independently.
    ///
    /// A rejected declaration is logged and reported, and never prevents the
    /// others from registering.
    pub fn register_all(
        &self,
        decls: impl IntoIterator<Item = CommandDeclaration>,
    ) -> RegistrationReport {
        let mut report = RegistrationReport::default();
        for decl in decls {
            let declared = decl.names().to_string();
            match self.register(decl) {
                Ok(definition) => report.registered.push(definition.name().to_string()),
                Err(err) => {
                    tracing::warn!(command = %declared, error = %err, "rejected command declaration");
                    report.rejected.push((declared, err));
                }
            }
        }
        tracing::info!(
            registered = report.registered.len(),
            rejected = report.rejected.len(),
            "registered commands"
        );
        report
    }
}
