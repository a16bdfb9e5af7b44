//! Command declarations.

use std::fmt;
use std::sync::Arc;

use crate::command::ParameterSpec;
use crate::dispatch::{CommandArgs, CommandContext, Condition, Handler, HandlerResult};
use crate::issuer::CommandIssuer;

/// An unvalidated description of a command.
///
/// Built with chained calls and turned into a
/// [`CommandDefinition`](crate::command::CommandDefinition) by the
/// [`DeclarationResolver`](super::DeclarationResolver).
///
/// # Example
///
/// ```
/// use commando::command::ParameterSpec;
/// use commando::declare::CommandDeclaration;
///
/// let decl = CommandDeclaration::new("heal|h")
///     .permission("perm.heal")
///     .description("Heal yourself")
///     .param(ParameterSpec::required("amount", "integer"))
///     .handler(|ctx| {
///         let amount = ctx.args.get_i64("amount").unwrap_or_default();
///         ctx.reply(format!("Healed for {}", amount));
///         Ok(())
///     });
/// assert_eq!(decl.names(), "heal|h");
/// ```
#[derive(Clone, Default)]
pub struct CommandDeclaration {
    pub(crate) names: String,
    pub(crate) aliases: Vec<String>,
    pub(crate) params: Vec<ParameterSpec>,
    pub(crate) permission: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) syntax: Option<String>,
    pub(crate) handler: Option<Handler>,
    pub(crate) conditions: Vec<Condition>,
}

impl CommandDeclaration {
    /// Start a declaration from a `name|alias|alias` string.
    pub fn new(names: impl Into<String>) -> Self {
        Self {
            names: names.into(),
            ..Default::default()
        }
    }

    /// The raw name string as declared.
    pub fn names(&self) -> &str {
        &self.names
    }

    /// Add an alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Append a parameter.
    pub fn param(mut self, param: ParameterSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Require a permission (or comma-separated list of permissions).
    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    /// Set the one-line description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Override the generated parameter syntax.
    pub fn syntax(mut self, syntax: impl Into<String>) -> Self {
        self.syntax = Some(syntax.into());
        self
    }

    /// Set the handler from a closure.
    pub fn handler<F>(self, f: F) -> Self
    where
        F: Fn(&mut CommandContext<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        self.with_handler(crate::dispatch::handler(f))
    }

    /// Add a condition checked after the arguments bind.
    ///
    /// Conditions run in the order added; the first `Err` stops the
    /// invocation before the handler runs.
    ///
    /// ```
    /// use commando::declare::CommandDeclaration;
    ///
    /// let decl = CommandDeclaration::new("fly")
    ///     .condition(|issuer, _args| {
    ///         if issuer.name() == "console" {
    ///             Err("The console cannot fly".to_string())
    ///         } else {
    ///             Ok(())
    ///         }
    ///     })
    ///     .handler(|_| Ok(()));
    /// # let _ = decl;
    /// ```
    pub fn condition<F>(mut self, f: F) -> Self
    where
        F: Fn(&dyn CommandIssuer, &CommandArgs) -> Result<(), String> + Send + Sync + 'static,
    {
        self.conditions.push(Arc::new(f));
        self
    }

    /// Set an already-wrapped handler, e.g. one shared between commands.
    pub fn with_handler(mut self, handler: Handler) -> Self {
        self.handler = Some(handler);
        self
    }
}

impl fmt::Debug for CommandDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDeclaration")
            .field("names", &self.names)
            .field("aliases", &self.aliases)
            .field("params", &self.params)
            .field("permission", &self.permission)
            .field("has_handler", &self.handler.is_some())
            .field("conditions", &self.conditions.len())
            .finish()
    }
}
