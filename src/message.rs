//! Messages sent to command issuers.
//!
//! A [`Message`] is a line of text with a [`MessageType`]. Text may contain
//! colour tags `<c1>`, `<c2>` and `<c3>` (and their closing forms), which an
//! adapter maps onto the palette of the message type or strips.
//!
//! [`Messages`] holds the templates used for dispatch errors and help
//! output. Templates use `{placeholder}` substitution via [`render`].

use regex::{Captures, Regex};
use serde::Deserialize;
use std::fmt;
use std::sync::LazyLock;

static COLOR_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?c[1-3]>").expect("valid colour tag pattern"));

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}\s]+)\}").expect("valid placeholder pattern"));

/// Category of a message, which selects its colour palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MessageType {
    /// Regular output.
    #[default]
    Info,
    /// Something went wrong.
    Error,
    /// Usage lines.
    Syntax,
    /// Help listings.
    Help,
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageType::Info => write!(f, "info"),
            MessageType::Error => write!(f, "error"),
            MessageType::Syntax => write!(f, "syntax"),
            MessageType::Help => write!(f, "help"),
        }
    }
}

/// A line of output for an issuer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Category of the message.
    pub kind: MessageType,
    /// Text, possibly with colour tags.
    pub text: String,
}

impl Message {
    /// Create a new message.
    pub fn new(kind: MessageType, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Create an info message.
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(MessageType::Info, text)
    }

    /// Create an error message.
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(MessageType::Error, text)
    }

    /// Create a syntax message.
    pub fn syntax(text: impl Into<String>) -> Self {
        Self::new(MessageType::Syntax, text)
    }

    /// Create a help message.
    pub fn help(text: impl Into<String>) -> Self {
        Self::new(MessageType::Help, text)
    }

    /// The text with colour tags removed.
    pub fn plain(&self) -> String {
        strip_tags(&self.text)
    }
}

/// Remove colour tags from `text`.
pub fn strip_tags(text: &str) -> String {
    COLOR_TAG.replace_all(text, "").into_owned()
}

/// Split `text` into `(palette slot, segment)` pairs.
///
/// Slot 1 is the base colour. An opening tag switches slot until its closing
/// tag, which restores the enclosing slot.
pub fn color_segments(text: &str) -> Vec<(u8, &str)> {
    let mut segments = Vec::new();
    let mut stack: Vec<u8> = vec![1];
    let mut last = 0;

    for tag in COLOR_TAG.find_iter(text) {
        if tag.start() > last {
            segments.push((current(&stack), &text[last..tag.start()]));
        }
        let tag_text = tag.as_str();
        let slot = tag_text.as_bytes()[tag_text.len() - 2] - b'0';
        if tag_text.starts_with("</") {
            if stack.len() > 1 {
                stack.pop();
            }
        } else {
            stack.push(slot);
        }
        last = tag.end();
    }
    if last < text.len() {
        segments.push((current(&stack), &text[last..]));
    }
    segments
}

fn current(stack: &[u8]) -> u8 {
    stack.last().copied().unwrap_or(1)
}

/// Substitute `{key}` placeholders in `template`.
///
/// Substitution is a single pass over the template, so placeholders inside
/// substituted values are never expanded. Unknown placeholders are left
/// untouched.
pub fn render(template: &str, replacements: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            match replacements.iter().find(|(key, _)| *key == &caps[1]) {
                Some((_, value)) => value.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Templates for framework messages.
///
/// Every field can be overridden from the manifest's `messages:` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// `{command}`, `{prefix}`
    pub unknown_command: String,
    /// `{command}`, `{permission}`
    pub permission_denied: String,
    /// `{error}`
    pub invalid_argument: String,
    /// `{usage}`
    pub usage: String,
    /// `{command}`
    pub command_failed: String,
    /// `{command}`, `{type}`
    pub configuration_error: String,
    /// `{error}`
    pub input_error: String,
    /// `{command}`, `{error}`
    pub condition_failed: String,
    /// `{prefix}`, `{page}`, `{pages}`, `{results}`
    pub help_header: String,
    /// `{search}`, `{page}`, `{pages}`, `{results}`
    pub help_search_header: String,
    /// `{prefix}`, `{command}`, `{parameters}`, `{separator}`, `{description}`
    pub help_entry: String,
    /// `{name}`, `{syntax}`, `{description}`
    pub help_parameter: String,
    /// `{prefix}`, `{page}`, `{pages}`, `{next}`
    pub help_footer: String,
    /// `{search}`
    pub help_no_results: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            unknown_command: "Unknown command <c2>{command}</c2>, type <c2>{prefix}help</c2> for help."
                .into(),
            permission_denied:
                "I'm sorry, but you do not have permission to perform this command.".into(),
            invalid_argument: "Error: {error}".into(),
            usage: "Usage: <c2>{usage}</c2>".into(),
            command_failed:
                "I'm sorry, but there was an error performing this command.".into(),
            configuration_error: "Command <c2>{command}</c2> is misconfigured.".into(),
            input_error: "Error: {error}".into(),
            condition_failed: "Error: {error}".into(),
            help_header:
                "<c3>=== </c3>Showing help for <c2>{prefix}</c2> <c3>({page}/{pages}, {results} results) ===</c3>"
                    .into(),
            help_search_header:
                "<c3>=== </c3>Search results for <c2>{search}</c2> <c3>({page}/{pages}, {results} results) ===</c3>"
                    .into(),
            help_entry: "<c1>{prefix}{command}</c1> <c2>{parameters}</c2> <c3>{separator} {description}</c3>"
                .into(),
            help_parameter: "<c2>{syntax}</c2>: <c3>{description}</c3>".into(),
            help_footer:
                "<c3>=== </c3>Page {page} of {pages}, type <c2>{prefix}help {next}</c2> for more <c3>===</c3>"
                    .into(),
            help_no_results: "No commands found matching <c2>{search}</c2>.".into(),
        }
    }
}
