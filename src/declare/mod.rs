//! Command declarations and their validation.
//!
//! - [`CommandDeclaration`] - Builder describing a command before validation
//! - [`DeclarationResolver`] - Validates declarations and registers them
//! - [`Replacements`] - `%key` substitution applied before validation

pub mod declaration;
pub mod replacements;
pub mod resolver;

pub use declaration::CommandDeclaration;
pub use replacements::Replacements;
pub use resolver::{DeclarationResolver, RegistrationReport};
