//! Conversion of an AST into a generic value tree.

use indexmap::IndexMap;

use crate::ast::{Node, NumberLiteral};

/// Generic value produced from an AST.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    /// Keyed by raw key text. Duplicate keys keep the last value.
    Object(IndexMap<String, Value>),
}

/// Error produced while converting an AST into a `Value`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// The node has no generic-value counterpart.
    #[error("unhandled node type: {0}")]
    UnhandledNodeType(&'static str),
    /// Integer text that does not fit an `i64`, or fraction text whose
    /// magnitude overflows an `f64`.
    #[error("number out of range: {0}")]
    NumberOutOfRange(String),
}

/// Convert `node` into a generic value.
///
/// # Errors
///
/// Returns `UnhandledNodeType` for bare placeholder expressions and
/// `NumberOutOfRange` for integers beyond `i64`.
pub fn to_value(node: &Node) -> Result<Value, ValueError> {
    Ok(match node {
        Node::String(literal) => Value::String(literal.value().to_string()),
        Node::Number(number) => number_value(number)?,
        Node::Boolean(value) => Value::Bool(*value),
        Node::Null => Value::Null,
        Node::Array(array) => Value::Array(
            array
                .elements
                .iter()
                .map(to_value)
                .collect::<Result<_, _>>()?,
        ),
        Node::Object(object) => {
            let mut map = IndexMap::with_capacity(object.members.len());
            for member in &object.members {
                map.insert(member.key.value().to_string(), to_value(&member.value)?);
            }
            Value::Object(map)
        }
        Node::Placeholder(_) => return Err(ValueError::UnhandledNodeType(node.type_name())),
    })
}

fn number_value(number: &NumberLiteral) -> Result<Value, ValueError> {
    let text = number.text();
    if number.is_fractional() {
        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Value::Float(n)),
            _ => Err(ValueError::NumberOutOfRange(text.to_string())),
        }
    } else {
        text.parse()
            .map(Value::Integer)
            .map_err(|_| ValueError::NumberOutOfRange(text.to_string()))
    }
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value as a float; integers are widened.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_array(&self) -> Option<&Vec<Self>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&IndexMap<String, Self>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Member of an object value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_object().and_then(|map| map.get(key))
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Integer(n) => Self::Number(n.into()),
            Value::Float(n) => serde_json::Number::from_f64(n).map_or(Self::Null, Self::Number),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}
