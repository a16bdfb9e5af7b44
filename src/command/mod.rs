//! Command definitions and the command registry.
//!
//! - [`CommandDefinition`] - An immutable, registered command
//! - [`ParameterSpec`] - A declared parameter and its [`ParamFlags`]
//! - [`CommandRegistry`] - Name/alias lookup with single-writer access

pub mod definition;
pub mod registry;

pub use definition::{CommandDefinition, ParamFlags, ParameterSpec};
pub use registry::CommandRegistry;
