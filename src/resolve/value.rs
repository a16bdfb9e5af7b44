//! Type identifiers and resolved argument values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a parameter type, e.g. `integer`.
///
/// Identifiers are case-insensitive and stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TypeId(String);

impl TypeId {
    /// Create a new type identifier.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_lowercase())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TypeId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<&str> for TypeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<TypeId> for String {
    fn from(id: TypeId) -> Self {
        id.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A typed argument value produced by a resolver.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl Value {
    /// The value as a string slice, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The value as an integer, if it is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as a float. Integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            Value::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// The value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_id_is_case_insensitive() {
        assert_eq!(TypeId::new("Integer"), TypeId::new("integer"));
        assert_eq!(TypeId::new(" string ").as_str(), "string");
    }

    #[test]
    fn type_id_deserializes_from_string() {
        let id: TypeId = serde_yaml::from_str("Boolean").unwrap();
        assert_eq!(id, TypeId::new("boolean"));
    }

    #[test]
    fn float_accessor_widens_integers() {
        assert_eq!(Value::Integer(3).as_f64(), Some(3.0));
        assert_eq!(Value::Boolean(true).as_f64(), None);
    }

    #[test]
    fn value_display() {
        assert_eq!(Value::String("steve".into()).to_string(), "steve");
        assert_eq!(Value::Integer(-4).to_string(), "-4");
        assert_eq!(Value::Boolean(false).to_string(), "false");
    }

    #[test]
    fn value_serializes_untagged() {
        let json = serde_json::to_string(&Value::Integer(50)).unwrap();
        assert_eq!(json, "50");
    }
}
