//! Console adapter.
//!
//! - [`ConsoleHost`] - Reads lines and dispatches them
//! - [`ConsoleIssuer`] - An issuer writing to any stream
//! - [`tokenize`] - Quote-aware line splitting

pub mod host;
pub mod issuer;
pub mod tokenizer;

pub use host::{ConsoleHost, SessionSummary};
pub use issuer::ConsoleIssuer;
pub use tokenizer::{tokenize, TokenizeError};
