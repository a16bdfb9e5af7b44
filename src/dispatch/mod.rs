//! Dispatching input to commands.
//!
//! - [`Dispatcher`] - Matches, binds and invokes commands
//! - [`CommandContext`] - What a handler receives
//! - [`Handler`] - The function type handlers are stored as
//! - [`Condition`] - Checks run before a handler

pub mod context;
pub mod dispatcher;

pub use context::{handler, CommandArgs, CommandContext, Condition, Handler, HandlerResult};
pub use dispatcher::{DispatchOutcome, Dispatcher, Invocation};
