//! Commando - A command dispatch core with a console host.
//!
//! Commands are declared once, validated into immutable definitions and
//! kept in a registry. Input tokens are matched to a command, checked
//! against the issuer's permissions, bound to typed arguments and handed to
//! the command's handler.
//!
//! # Modules
//!
//! - [`command`] - Command definitions and the registry
//! - [`declare`] - Declarations and their validation
//! - [`resolve`] - Typed argument resolvers
//! - [`dispatch`] - Matching, binding and invoking
//! - [`issuer`] - The invoking identity
//! - [`message`] - Messages and templates
//! - [`help`] - Help listings
//! - [`console`] - Line-oriented host and tokenizer
//! - [`config`] - `commando.yml` manifest
//! - [`cli`] - Command-line interface
//! - [`ui`] - Terminal output
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use commando::command::{CommandRegistry, ParameterSpec};
//! use commando::declare::{CommandDeclaration, DeclarationResolver};
//! use commando::dispatch::Dispatcher;
//! use commando::issuer::MockIssuer;
//! use commando::resolve::ResolverTable;
//!
//! let registry = CommandRegistry::new();
//! let resolvers = ResolverTable::with_builtins();
//! DeclarationResolver::new(&registry, &resolvers)
//!     .register(
//!         CommandDeclaration::new("heal|h")
//!             .param(ParameterSpec::required("amount", "integer"))
//!             .handler(|ctx| {
//!                 let amount = ctx.args.get_i64("amount").unwrap_or_default();
//!                 ctx.reply(format!("Healed for {}", amount));
//!                 Ok(())
//!             }),
//!     )
//!     .unwrap();
//!
//! let dispatcher = Dispatcher::new(&registry, &resolvers);
//! let mut issuer = MockIssuer::new("steve");
//! let tokens = vec!["h".to_string(), "50".to_string()];
//! assert!(dispatcher.dispatch(&tokens, &mut issuer).is_success());
//! assert_eq!(issuer.all_texts(), vec!["Healed for 50"]);
//! ```

pub mod cli;
pub mod command;
pub mod config;
pub mod console;
pub mod declare;
pub mod dispatch;
pub mod error;
pub mod help;
pub mod issuer;
pub mod message;
pub mod resolve;
pub mod ui;

pub use error::{CommandError, Result};
