//! The invoking identity.
//!
//! Adapters implement [`CommandIssuer`] to tell the core who is running a
//! command, what they may do, and where replies go. [`MockIssuer`] records
//! everything for tests.
//!
//! # Example
//!
//! ```
//! use commando::issuer::{permits, MockIssuer};
//!
//! let issuer = MockIssuer::new("steve").with_permission("perm.fly");
//! assert!(permits(&issuer, Some("perm.fly")).is_ok());
//! assert_eq!(permits(&issuer, Some("perm.fly,perm.god")), Err("perm.god".to_string()));
//! assert!(permits(&issuer, None).is_ok());
//! ```

use std::collections::HashSet;

use crate::message::{Message, MessageType};

/// The identity invoking a command.
pub trait CommandIssuer {
    /// Display name of the issuer.
    fn name(&self) -> &str;

    /// Whether the issuer holds a single permission node.
    fn has_permission(&self, node: &str) -> bool;

    /// Deliver a message to the issuer.
    fn send_message(&mut self, message: Message);
}

/// Check a permission requirement against an issuer.
///
/// `permission` may be a comma-separated list; every non-empty entry must be
/// granted. An absent or empty requirement always passes. On failure the
/// first missing node is returned.
pub fn permits(issuer: &dyn CommandIssuer, permission: Option<&str>) -> Result<(), String> {
    let Some(permission) = permission else {
        return Ok(());
    };
    match permission
        .split(',')
        .map(str::trim)
        .filter(|node| !node.is_empty())
        .find(|node| !issuer.has_permission(node))
    {
        Some(missing) => Err(missing.to_string()),
        None => Ok(()),
    }
}

/// Match a node against a set of grants.
///
/// A grant of `*` allows everything and `prefix.*` allows every node under
/// `prefix.`.
pub fn grant_matches(grants: &HashSet<String>, node: &str) -> bool {
    if grants.contains(node) || grants.contains("*") {
        return true;
    }
    grants.iter().any(|grant| {
        grant.strip_suffix(".*").is_some_and(|prefix| {
            node.strip_prefix(prefix)
                .is_some_and(|rest| rest.len() > 1 && rest.starts_with('.'))
        })
    })
}

/// Recording issuer for tests.
///
/// Captures every message and answers permission checks from a fixed set of
/// grants.
#[derive(Debug, Default)]
pub struct MockIssuer {
    name: String,
    grants: HashSet<String>,
    messages: Vec<Message>,
}

impl MockIssuer {
    /// Create an issuer with no permissions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Grant a permission node (supports `*` and `prefix.*`).
    pub fn with_permission(mut self, node: impl Into<String>) -> Self {
        self.grants.insert(node.into());
        self
    }

    /// All messages received.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Plain text of messages of one kind.
    pub fn texts(&self, kind: MessageType) -> Vec<String> {
        self.messages
            .iter()
            .filter(|m| m.kind == kind)
            .map(Message::plain)
            .collect()
    }

    /// Plain text of every message.
    pub fn all_texts(&self) -> Vec<String> {
        self.messages.iter().map(Message::plain).collect()
    }

    /// Forget captured messages.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl CommandIssuer for MockIssuer {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_permission(&self, node: &str) -> bool {
        grant_matches(&self.grants, node)
    }

    fn send_message(&mut self, message: Message) {
        self.messages.push(message);
    }
}
