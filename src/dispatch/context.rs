//! What a handler sees when it runs.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::command::{CommandDefinition, CommandRegistry};
use crate::error::HandlerError;
use crate::issuer::CommandIssuer;
use crate::message::{Message, MessageType};
use crate::resolve::Value;

/// Result returned by handlers.
pub type HandlerResult = std::result::Result<(), HandlerError>;

/// The function invoked when a command matches and its arguments resolve.
pub type Handler = Arc<dyn Fn(&mut CommandContext<'_>) -> HandlerResult + Send + Sync>;

/// A check run after arguments bind and before the handler.
///
/// Returning `Err` stops the invocation; the message is shown to the issuer.
pub type Condition =
    Arc<dyn Fn(&dyn CommandIssuer, &CommandArgs) -> std::result::Result<(), String> + Send + Sync>;

/// Wrap a closure as a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&mut CommandContext<'_>) -> HandlerResult + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Resolved arguments of one invocation, keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandArgs {
    values: BTreeMap<String, Value>,
}

impl CommandArgs {
    /// Create an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Get a value by parameter name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Get a string argument.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Get an integer argument.
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    /// Get a float argument.
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    /// Get a boolean argument.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Whether a parameter has a value.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of bound arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no argument was bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Invocation context passed to a handler.
pub struct CommandContext<'a> {
    /// Who is running the command.
    pub issuer: &'a mut dyn CommandIssuer,
    /// Resolved arguments.
    pub args: CommandArgs,
    /// The name or alias that was typed, lowercase.
    pub label: &'a str,
    /// The matched command.
    pub command: &'a CommandDefinition,
    /// The registry the command was found in.
    pub registry: &'a CommandRegistry,
}

impl CommandContext<'_> {
    /// Send an info message to the issuer.
    pub fn reply(&mut self, text: impl Into<String>) {
        self.send(MessageType::Info, text);
    }

    /// Send a message of the given kind to the issuer.
    pub fn send(&mut self, kind: MessageType, text: impl Into<String>) {
        self.issuer.send_message(Message::new(kind, text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_typed_accessors() {
        let mut args = CommandArgs::new();
        args.insert("amount", Value::Integer(50));
        args.insert("target", Value::String("steve".into()));
        args.insert("silent", Value::Boolean(true));

        assert_eq!(args.get_i64("amount"), Some(50));
        assert_eq!(args.get_f64("amount"), Some(50.0));
        assert_eq!(args.get_str("target"), Some("steve"));
        assert_eq!(args.get_bool("silent"), Some(true));
        assert_eq!(args.get_str("amount"), None);
        assert!(!args.contains("reason"));
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn args_iterate_in_name_order() {
        let mut args = CommandArgs::new();
        args.insert("b", Value::Integer(2));
        args.insert("a", Value::Integer(1));
        let names: Vec<_> = args.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
