//! Argument resolution.
//!
//! Maps raw token sequences to typed parameter values:
//!
//! - **Resolvers** - Per-type conversion ([`ArgumentResolver`] trait)
//! - **Table** - Lookup from [`TypeId`] to resolver ([`ResolverTable`])
//! - **Values** - The typed results ([`Value`])
//!
//! # Example
//!
//! ```
//! use commando::resolve::{ResolverTable, TypeId, Value};
//!
//! let table = ResolverTable::with_builtins();
//! let tokens = vec!["50".to_string(), "rest".to_string()];
//!
//! let (value, rest) = table
//!     .resolve(&TypeId::new("integer"), &tokens)
//!     .expect("integer is built in")
//!     .unwrap();
//! assert_eq!(value, Value::Integer(50));
//! assert_eq!(rest.len(), 1);
//! ```

pub mod builtins;
pub mod resolver;
pub mod table;
pub mod value;

pub use builtins::{BooleanResolver, FloatResolver, IntegerResolver, StringResolver};
pub use resolver::{starting_with, ArgumentResolver, FnResolver, ResolveFn, Resolved};
pub use table::ResolverTable;
pub use value::{TypeId, Value};
