//! Built-in parameter types.

use super::resolver::{starting_with, ArgumentResolver, Resolved};
use super::value::{TypeId, Value};
use crate::error::ArgumentParseError;

/// Identifier of the built-in string type.
pub const STRING: &str = "string";
/// Identifier of the built-in integer type.
pub const INTEGER: &str = "integer";
/// Identifier of the built-in float type.
pub const FLOAT: &str = "float";
/// Identifier of the built-in boolean type.
pub const BOOLEAN: &str = "boolean";

fn first<'a>(tokens: &'a [String], expected: &str) -> Result<&'a str, ArgumentParseError> {
    tokens
        .first()
        .map(String::as_str)
        .ok_or_else(|| ArgumentParseError::missing(expected))
}

/// Any single token.
pub struct StringResolver;

impl ArgumentResolver for StringResolver {
    fn type_id(&self) -> TypeId {
        TypeId::new(STRING)
    }

    fn describe(&self) -> &str {
        "text"
    }

    fn resolve(&self, tokens: &[String]) -> Result<Resolved, ArgumentParseError> {
        let token = first(tokens, self.describe())?;
        Ok(Resolved::single(Value::String(token.to_string())))
    }
}

/// A signed 64-bit integer.
pub struct IntegerResolver;

impl ArgumentResolver for IntegerResolver {
    fn type_id(&self) -> TypeId {
        TypeId::new(INTEGER)
    }

    fn describe(&self) -> &str {
        INTEGER
    }

    fn resolve(&self, tokens: &[String]) -> Result<Resolved, ArgumentParseError> {
        let token = first(tokens, self.describe())?;
        token
            .parse::<i64>()
            .map(|n| Resolved::single(Value::Integer(n)))
            .map_err(|_| ArgumentParseError::new(self.describe(), token))
    }
}

/// A finite floating point number.
pub struct FloatResolver;

impl ArgumentResolver for FloatResolver {
    fn type_id(&self) -> TypeId {
        TypeId::new(FLOAT)
    }

    fn describe(&self) -> &str {
        "number"
    }

    fn resolve(&self, tokens: &[String]) -> Result<Resolved, ArgumentParseError> {
        let token = first(tokens, self.describe())?;
        match token.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Resolved::single(Value::Float(n))),
            _ => Err(ArgumentParseError::new(self.describe(), token)),
        }
    }
}

/// `true/false`, `yes/no`, `on/off` or `1/0`, case-insensitive.
pub struct BooleanResolver;

impl ArgumentResolver for BooleanResolver {
    fn type_id(&self) -> TypeId {
        TypeId::new(BOOLEAN)
    }

    fn describe(&self) -> &str {
        "true or false"
    }

    fn resolve(&self, tokens: &[String]) -> Result<Resolved, ArgumentParseError> {
        let token = first(tokens, self.describe())?;
        let value = match token.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => true,
            "false" | "no" | "off" | "0" => false,
            _ => return Err(ArgumentParseError::new(self.describe(), token)),
        };
        Ok(Resolved::single(Value::Boolean(value)))
    }

    fn complete(&self, partial: &str) -> Vec<String> {
        starting_with(["true", "false"], partial)
    }
}
