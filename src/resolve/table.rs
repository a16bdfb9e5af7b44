//! Resolver table mapping type identifiers to resolvers.
//!
//! The [`ResolverTable`] is populated at startup and only read during
//! dispatch.

use std::collections::HashMap;

use super::builtins::{BooleanResolver, FloatResolver, IntegerResolver, StringResolver};
use super::resolver::{ArgumentResolver, Resolved};
use super::value::{TypeId, Value};
use crate::error::ArgumentParseError;

/// Registry of parameter types.
pub struct ResolverTable {
    resolvers: HashMap<TypeId, Box<dyn ArgumentResolver>>,
}

impl ResolverTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            resolvers: HashMap::new(),
        }
    }

    /// Create a table with the built-in `string`, `integer`, `float` and
    /// `boolean` types.
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        table.register(Box::new(StringResolver));
        table.register(Box::new(IntegerResolver));
        table.register(Box::new(FloatResolver));
        table.register(Box::new(BooleanResolver));
        table
    }

    /// Register a resolver, replacing any previous one for the same type.
    pub fn register(&mut self, resolver: Box<dyn ArgumentResolver>) {
        self.resolvers.insert(resolver.type_id(), resolver);
    }

    /// Get the resolver for a type.
    pub fn get(&self, id: &TypeId) -> Option<&dyn ArgumentResolver> {
        self.resolvers.get(id).map(|r| r.as_ref())
    }

    /// Check whether a type has a resolver.
    pub fn contains(&self, id: &TypeId) -> bool {
        self.resolvers.contains_key(id)
    }

    /// Resolve a value of type `id` from the leading tokens.
    ///
    /// Returns the value and the tokens left over. `None` means the type has
    /// no resolver.
    pub fn resolve<'t>(
        &self,
        id: &TypeId,
        tokens: &'t [String],
    ) -> Option<Result<(Value, &'t [String]), ArgumentParseError>> {
        let resolver = self.get(id)?;
        if tokens.is_empty() {
            return Some(Err(ArgumentParseError::missing(resolver.describe())));
        }
        Some(resolver.resolve(tokens).map(|Resolved { value, consumed }| {
            let consumed = consumed.clamp(1, tokens.len());
            (value, &tokens[consumed..])
        }))
    }

    /// Iterate over the registered type identifiers.
    pub fn type_ids(&self) -> impl Iterator<Item = &TypeId> {
        self.resolvers.keys()
    }

    /// Get the number of registered types.
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl Default for ResolverTable {
    fn default() -> Self {
        Self::new()
    }
}
