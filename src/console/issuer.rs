//! The console user.

use std::collections::HashSet;
use std::io::Write;

use crate::issuer::{grant_matches, CommandIssuer};
use crate::message::Message;
use crate::ui::MessageTheme;

/// An issuer that writes formatted messages to a stream.
///
/// Permissions come from a fixed set of grants, with `*` and `prefix.*`
/// wildcards.
pub struct ConsoleIssuer<W: Write> {
    name: String,
    grants: HashSet<String>,
    theme: MessageTheme,
    out: W,
}

impl<W: Write> ConsoleIssuer<W> {
    /// Create an issuer writing plain text to `out`.
    pub fn new(name: impl Into<String>, out: W) -> Self {
        Self {
            name: name.into(),
            grants: HashSet::new(),
            theme: MessageTheme::plain(),
            out,
        }
    }

    /// Use a colour theme.
    pub fn with_theme(mut self, theme: MessageTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Grant permission nodes.
    pub fn with_grants<I, S>(mut self, grants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.grants.extend(grants.into_iter().map(Into::into));
        self
    }

    /// The granted nodes.
    pub fn grants(&self) -> &HashSet<String> {
        &self.grants
    }

    /// Consume the issuer and return its stream.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CommandIssuer for ConsoleIssuer<W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_permission(&self, node: &str) -> bool {
        grant_matches(&self.grants, node)
    }

    fn send_message(&mut self, message: Message) {
        let line = self.theme.format(&message);
        if let Err(err) = writeln!(self.out, "{}", line).and_then(|_| self.out.flush()) {
            tracing::warn!(issuer = %self.name, error = %err, "failed to write message");
        }
    }
}
