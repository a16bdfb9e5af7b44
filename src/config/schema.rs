//! Manifest schema definitions.
//!
//! This module contains the struct definitions that map to the
//! `commando.yml` file format.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::command::ParameterSpec;
use crate::help::DEFAULT_PER_PAGE;
use crate::message::Messages;
use crate::resolve::builtins::STRING;
use crate::resolve::TypeId;

/// Root structure of `commando.yml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Global settings
    pub settings: Settings,

    /// Who runs commands at the console
    pub identity: IdentityConfig,

    /// `%key` replacements applied to declarations
    pub replacements: BTreeMap<String, String>,

    /// Message template overrides
    pub messages: Messages,

    /// Command declarations, in registration order
    pub commands: Vec<CommandConfig>,
}

/// Global settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Prefix stripped from input lines and shown in usage
    pub command_prefix: String,

    /// Entries per help page
    pub help_per_page: usize,

    /// Register the built-in `help` command
    pub help_command: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            command_prefix: "/".to_string(),
            help_per_page: DEFAULT_PER_PAGE,
            help_command: true,
        }
    }
}

/// The console identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Display name
    pub name: String,

    /// Granted permission nodes (`*` and `prefix.*` allowed)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            name: "console".to_string(),
            permissions: Vec::new(),
        }
    }
}

/// A command declared in the manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    /// `name|alias|alias`
    pub name: String,

    /// Additional aliases
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// One-line description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Required permission, or a comma-separated list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,

    /// Usage override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syntax: Option<String>,

    /// Parameters in order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamConfig>,

    /// Reply sent on success; `{param}`, `{issuer}` and `{label}` are
    /// substituted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,

    /// Rejection sent instead of a reply, as an invalid-input error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A parameter declared in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamConfig {
    /// Parameter name
    pub name: String,

    /// Type identifier, `string` when omitted
    #[serde(rename = "type", default = "default_type")]
    pub type_id: TypeId,

    /// May be omitted
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,

    /// Takes the rest of the input
    #[serde(default, skip_serializing_if = "is_false")]
    pub greedy: bool,

    /// Given as `--name`
    #[serde(default, skip_serializing_if = "is_false")]
    pub flag: bool,

    /// Default value; any YAML scalar
    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<String>,

    /// Shown in detailed help
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Usage override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syntax: Option<String>,

    /// Values offered by tab completion
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub completions: Vec<String>,
}

impl ParamConfig {
    /// Convert to a parameter spec.
    pub fn to_spec(&self) -> ParameterSpec {
        let mut spec = if self.flag {
            ParameterSpec::flag(&self.name, self.type_id.clone())
        } else if self.optional {
            ParameterSpec::optional(&self.name, self.type_id.clone())
        } else {
            ParameterSpec::required(&self.name, self.type_id.clone())
        };
        if self.greedy {
            spec = spec.greedy();
        }
        if let Some(default) = &self.default {
            spec = spec.with_default(default);
        }
        if let Some(description) = &self.description {
            spec = spec.with_description(description);
        }
        if let Some(syntax) = &self.syntax {
            spec = spec.with_syntax(syntax);
        }
        if !self.completions.is_empty() {
            spec = spec.with_completions(self.completions.iter().cloned());
        }
        spec
    }
}

fn default_type() -> TypeId {
    TypeId::new(STRING)
}

fn is_false(v: &bool) -> bool {
    !*v
}

fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<serde_yaml::Value>::deserialize(deserializer)? {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(serde_yaml::Value::String(s)) => Ok(Some(s)),
        Some(serde_yaml::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(serde_yaml::Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "default must be a scalar, got {:?}",
            other
        ))),
    }
}
