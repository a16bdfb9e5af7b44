//! Command and parameter definitions.
//!
//! A [`CommandDefinition`] is produced by the declaration resolver and is
//! immutable once registered. Parameters are described by [`ParameterSpec`].

use std::fmt;

use crate::dispatch::{Condition, Handler};
use crate::resolve::builtins::BOOLEAN;
use crate::resolve::TypeId;

/// Flags that change how a parameter binds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamFlags {
    /// May be omitted.
    pub optional: bool,
    /// Receives every remaining token, joined by spaces.
    pub greedy: bool,
    /// Given as `--name` anywhere in the input instead of by position.
    pub flag: bool,
}

/// Declared parameter of a command.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    /// Parameter name, used as the key in resolved arguments.
    pub name: String,
    /// Type identifier resolved through the resolver table.
    pub type_id: TypeId,
    /// Raw default used when the parameter is omitted.
    pub default: Option<String>,
    /// Binding flags.
    pub flags: ParamFlags,
    /// Description shown in detailed help.
    pub description: Option<String>,
    /// Syntax override shown in usage lines.
    pub syntax: Option<String>,
    /// Fixed completion values; when empty the resolver's are used.
    pub completions: Vec<String>,
}

impl ParameterSpec {
    fn with_flags(name: impl Into<String>, type_id: impl Into<TypeId>, flags: ParamFlags) -> Self {
        Self {
            name: name.into(),
            type_id: type_id.into(),
            default: None,
            flags,
            description: None,
            syntax: None,
            completions: Vec::new(),
        }
    }

    /// A parameter that must be supplied.
    pub fn required(name: impl Into<String>, type_id: impl Into<TypeId>) -> Self {
        Self::with_flags(name, type_id, ParamFlags::default())
    }

    /// A parameter that may be omitted.
    pub fn optional(name: impl Into<String>, type_id: impl Into<TypeId>) -> Self {
        Self::with_flags(
            name,
            type_id,
            ParamFlags {
                optional: true,
                ..Default::default()
            },
        )
    }

    /// A `--name` parameter. Boolean flags are switches.
    pub fn flag(name: impl Into<String>, type_id: impl Into<TypeId>) -> Self {
        Self::with_flags(
            name,
            type_id,
            ParamFlags {
                optional: true,
                flag: true,
                ..Default::default()
            },
        )
    }

    /// Make this parameter consume the rest of the input.
    pub fn greedy(mut self) -> Self {
        self.flags.greedy = true;
        self
    }

    /// Set a default value. Implies optional.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self.flags.optional = true;
        self
    }

    /// Add a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Override the generated syntax.
    pub fn with_syntax(mut self, syntax: impl Into<String>) -> Self {
        self.syntax = Some(syntax.into());
        self
    }

    /// Offer these values when completing the parameter.
    pub fn with_completions<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.completions = values.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the parameter can be left out of the input.
    pub fn is_optional(&self) -> bool {
        self.flags.optional || self.flags.flag || self.default.is_some()
    }

    /// Whether this is a boolean switch.
    pub fn is_switch(&self) -> bool {
        self.flags.flag && self.type_id.as_str() == BOOLEAN
    }

    /// Usage syntax, e.g. `<amount>` or `[reason...]`.
    pub fn syntax(&self) -> String {
        if let Some(syntax) = &self.syntax {
            return syntax.clone();
        }
        let body = if self.flags.flag {
            if self.is_switch() {
                format!("--{}", self.name)
            } else {
                format!("--{} <{}>", self.name, self.type_id)
            }
        } else if self.flags.greedy {
            format!("{}...", self.name)
        } else {
            self.name.clone()
        };
        if self.is_optional() {
            format!("[{}]", body)
        } else {
            format!("<{}>", body)
        }
    }
}

/// A registered command.
pub struct CommandDefinition {
    name: String,
    aliases: Vec<String>,
    params: Vec<ParameterSpec>,
    permission: Option<String>,
    description: String,
    syntax: Option<String>,
    handler: Handler,
    conditions: Vec<Condition>,
}

impl CommandDefinition {
    pub(crate) fn new(
        name: String,
        aliases: Vec<String>,
        params: Vec<ParameterSpec>,
        permission: Option<String>,
        description: String,
        syntax: Option<String>,
        handler: Handler,
    ) -> Self {
        Self {
            name,
            aliases,
            params,
            permission,
            description,
            syntax,
            handler,
            conditions: Vec::new(),
        }
    }

    pub(crate) fn with_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = conditions;
        self
    }

    /// Primary name, lowercase.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Aliases, lowercase, in declaration order.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The name followed by every alias.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Declared parameters in order.
    pub fn params(&self) -> &[ParameterSpec] {
        &self.params
    }

    /// Required permission, possibly a comma-separated list.
    pub fn permission(&self) -> Option<&str> {
        self.permission.as_deref()
    }

    /// One-line description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Parameter syntax, the declared override or one generated from the
    /// parameters.
    pub fn syntax(&self) -> String {
        if let Some(syntax) = &self.syntax {
            return syntax.clone();
        }
        let positional = self.params.iter().filter(|p| !p.flags.flag);
        let flags = self.params.iter().filter(|p| p.flags.flag);
        positional
            .chain(flags)
            .map(ParameterSpec::syntax)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Full usage line, e.g. `/heal <amount>`.
    pub fn usage(&self, prefix: &str, label: &str) -> String {
        let syntax = self.syntax();
        if syntax.is_empty() {
            format!("{}{}", prefix, label)
        } else {
            format!("{}{} {}", prefix, label, syntax)
        }
    }

    pub(crate) fn handler(&self) -> &Handler {
        &self.handler
    }

    pub(crate) fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
}

impl fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("params", &self.params)
            .field("permission", &self.permission)
            .field("description", &self.description)
            .field("conditions", &self.conditions.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::handler;

    fn definition(params: Vec<ParameterSpec>, syntax: Option<&str>) -> CommandDefinition {
        CommandDefinition::new(
            "kick".into(),
            vec!["k".into()],
            params,
            Some("perm.kick".into()),
            "Kick a player".into(),
            syntax.map(String::from),
            handler(|_| Ok(())),
        )
    }

    #[test]
    fn required_parameter_syntax() {
        assert_eq!(ParameterSpec::required("target", "string").syntax(), "<target>");
    }

    #[test]
    fn optional_and_default_parameter_syntax() {
        assert_eq!(ParameterSpec::optional("page", "integer").syntax(), "[page]");
        let spec = ParameterSpec::required("amount", "integer").with_default("20");
        assert!(spec.is_optional());
        assert_eq!(spec.syntax(), "[amount]");
    }

    #[test]
    fn greedy_parameter_syntax() {
        assert_eq!(
            ParameterSpec::required("reason", "string").greedy().syntax(),
            "<reason...>"
        );
    }

    #[test]
    fn flag_parameter_syntax() {
        assert_eq!(ParameterSpec::flag("silent", "boolean").syntax(), "[--silent]");
        assert_eq!(
            ParameterSpec::flag("count", "integer").syntax(),
            "[--count <integer>]"
        );
        assert!(ParameterSpec::flag("silent", "boolean").is_switch());
        assert!(!ParameterSpec::flag("count", "integer").is_switch());
    }

    #[test]
    fn syntax_override_wins() {
        let spec = ParameterSpec::required("target", "string").with_syntax("<player>");
        assert_eq!(spec.syntax(), "<player>");
    }

    #[test]
    fn command_syntax_lists_flags_last() {
        let def = definition(
            vec![
                ParameterSpec::flag("silent", "boolean"),
                ParameterSpec::required("target", "string"),
                ParameterSpec::optional("reason", "string").greedy(),
            ],
            None,
        );
        assert_eq!(def.syntax(), "<target> [reason...] [--silent]");
        assert_eq!(def.usage("/", "k"), "/k <target> [reason...] [--silent]");
    }

    #[test]
    fn command_usage_without_params() {
        let def = definition(vec![], None);
        assert_eq!(def.usage("/", "kick"), "/kick");
    }

    #[test]
    fn command_keys_include_aliases() {
        let def = definition(vec![], Some("<who>"));
        assert_eq!(def.keys().collect::<Vec<_>>(), vec!["kick", "k"]);
        assert_eq!(def.syntax(), "<who>");
    }

    #[test]
    fn debug_omits_handler() {
        let def = definition(vec![], None);
        let debug = format!("{:?}", def);
        assert!(debug.contains("kick"));
        assert!(!debug.contains("handler"));
    }
}
