//! Argument resolver definitions.
//!
//! - [`ArgumentResolver`] - The trait every parameter type implements
//! - [`FnResolver`] - Adapts a plain function into a resolver
//! - [`Resolved`] - A value plus the number of tokens it consumed

use super::value::{TypeId, Value};
use crate::error::ArgumentParseError;

/// A value produced from the leading tokens of an input.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// The typed value.
    pub value: Value,
    /// How many leading tokens were consumed (at least one).
    pub consumed: usize,
}

impl Resolved {
    /// A value that consumed exactly one token.
    pub fn single(value: Value) -> Self {
        Self { value, consumed: 1 }
    }
}

/// Converts leading raw tokens into a typed value.
///
/// Resolvers are pure: the same tokens always produce the same result and
/// no state is shared between calls. `tokens` is never empty.
pub trait ArgumentResolver: Send + Sync {
    /// The type this resolver handles.
    fn type_id(&self) -> TypeId;

    /// Human-readable name of the expected input, used in error messages.
    fn describe(&self) -> &str;

    /// Resolve a value from the leading tokens.
    fn resolve(&self, tokens: &[String]) -> Result<Resolved, ArgumentParseError>;

    /// Suggestions for a partially typed token. None by default.
    fn complete(&self, partial: &str) -> Vec<String> {
        let _ = partial;
        Vec::new()
    }
}

/// Candidates that start with `partial`, ignoring case, in their given order.
pub fn starting_with<I, S>(candidates: I, partial: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let partial = partial.to_lowercase();
    candidates
        .into_iter()
        .filter(|c| c.as_ref().to_lowercase().starts_with(&partial))
        .map(|c| c.as_ref().to_string())
        .collect()
}

/// Signature accepted by [`FnResolver`].
pub type ResolveFn = fn(&str) -> Option<Value>;

/// A single-token resolver backed by a function.
///
/// ```
/// use commando::resolve::{ArgumentResolver, FnResolver, Value};
///
/// let even = FnResolver::new("even", "even number", |token| {
///     token.parse::<i64>().ok().filter(|n| n % 2 == 0).map(Value::Integer)
/// });
/// assert!(even.resolve(&["4".to_string()]).is_ok());
/// assert!(even.resolve(&["3".to_string()]).is_err());
/// ```
pub struct FnResolver {
    type_id: TypeId,
    description: String,
    parse: ResolveFn,
    suggestions: Vec<String>,
}

impl FnResolver {
    /// Create a resolver for `type_id` from a parse function.
    pub fn new(type_id: impl Into<TypeId>, description: impl Into<String>, parse: ResolveFn) -> Self {
        Self {
            type_id: type_id.into(),
            description: description.into(),
            parse,
            suggestions: Vec::new(),
        }
    }

    /// Values offered when completing this type.
    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = suggestions.into_iter().map(Into::into).collect();
        self
    }
}

impl ArgumentResolver for FnResolver {
    fn type_id(&self) -> TypeId {
        self.type_id.clone()
    }

    fn describe(&self) -> &str {
        &self.description
    }

    fn resolve(&self, tokens: &[String]) -> Result<Resolved, ArgumentParseError> {
        let token = tokens
            .first()
            .ok_or_else(|| ArgumentParseError::missing(&self.description))?;
        (self.parse)(token)
            .map(Resolved::single)
            .ok_or_else(|| ArgumentParseError::new(&self.description, token))
    }

    fn complete(&self, partial: &str) -> Vec<String> {
        starting_with(&self.suggestions, partial)
    }
}
