//! Error types for commando operations.
//!
//! This module defines [`CommandError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Registration-time errors ([`CommandError::DuplicateCommand`],
//!   [`CommandError::InvalidDeclaration`], [`CommandError::Configuration`])
//!   reject a single command and never the whole registry
//! - Dispatch-time errors are recovered by the dispatcher and turned into a
//!   message for the invoker
//! - Use `anyhow::Error` (via `CommandError::Other`) for unexpected errors

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for commando operations.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A command name or alias is already registered.
    #[error("Command '{key}' is already registered by '{existing}'")]
    DuplicateCommand { key: String, existing: String },

    /// A declaration is structurally inconsistent.
    #[error("Invalid declaration for '{command}': {message}")]
    InvalidDeclaration { command: String, message: String },

    /// No command matches the invoked name or alias.
    #[error("Unknown command: {name}")]
    UnknownCommand { name: String },

    /// The invoker lacks a permission the command requires.
    #[error("Permission '{permission}' denied for /{command}")]
    PermissionDenied { command: String, permission: String },

    /// A token could not be converted into a parameter value.
    #[error(transparent)]
    ArgumentParse(#[from] ArgumentParseError),

    /// A declared type has no registered resolver.
    #[error("No resolver registered for type '{type_id}' (command '{command}')")]
    Configuration { command: String, type_id: String },

    /// A declared condition rejected the invocation.
    #[error("Condition failed for '{command}': {message}")]
    ConditionFailed { command: String, message: String },

    /// The handler rejected or failed the invocation.
    #[error("Command '{command}' failed: {source}")]
    Handler {
        command: String,
        #[source]
        source: HandlerError,
    },

    /// Manifest file not found at expected location.
    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Failed to parse the manifest file.
    #[error("Failed to parse manifest at {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CommandError {
    /// Whether this error is reported to the invoker rather than the host.
    pub fn is_dispatch_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownCommand { .. }
                | Self::PermissionDenied { .. }
                | Self::ArgumentParse(_)
                | Self::Configuration { .. }
                | Self::ConditionFailed { .. }
                | Self::Handler { .. }
        )
    }

    pub(crate) fn invalid(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDeclaration {
            command: command.into(),
            message: message.into(),
        }
    }
}

/// A token sequence that did not match the expected parameter type.
///
/// `got` is `None` when the input ran out before a required parameter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ArgumentParseError {
    /// Parameter being bound, if any (trailing input has none).
    pub parameter: Option<String>,
    /// Description of the expected type, e.g. `integer`.
    pub expected: String,
    /// The offending token.
    pub got: Option<String>,
}

impl ArgumentParseError {
    /// Create an error for an offending token.
    pub fn new(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Self {
            parameter: None,
            expected: expected.into(),
            got: Some(got.into()),
        }
    }

    /// Create an error for input that ended too early.
    pub fn missing(expected: impl Into<String>) -> Self {
        Self {
            parameter: None,
            expected: expected.into(),
            got: None,
        }
    }

    /// Attach the parameter name being bound.
    pub fn for_parameter(mut self, name: impl Into<String>) -> Self {
        self.parameter = Some(name.into());
        self
    }
}

impl fmt::Display for ArgumentParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.parameter, &self.got) {
            (Some(param), Some(got)) => {
                write!(f, "Expected {} for <{}>, got '{}'", self.expected, param, got)
            }
            (Some(param), None) => write!(f, "Missing <{}> ({})", param, self.expected),
            (None, Some(got)) => write!(f, "Expected {}, got '{}'", self.expected, got),
            (None, None) => write!(f, "Expected {}", self.expected),
        }
    }
}

/// Error returned by a command handler.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The invocation was rejected with a message meant for the invoker.
    #[error("{0}")]
    Invalid(String),

    /// The handler failed unexpectedly.
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

impl HandlerError {
    /// Reject the invocation with a message shown to the invoker.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

/// Result type alias for commando operations.
pub type Result<T> = std::result::Result<T, CommandError>;
