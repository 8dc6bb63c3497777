use crate::ast::{JsonArray, JsonObject, KeyValue, Node, NumberLiteral, StringLiteral};
use crate::identifier::{Identifier, IdentifierError};
use crate::placeholder::PlaceholderError;

impl JsonObject {
    /// Create a new empty object.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Add a member whose key is escaped from plain text.
    ///
    /// Neither the key nor a `&str` value is checked for placeholder
    /// syntax; text with a `$` that does not start a `${name}` makes the
    /// document fail to print. Use [`StringLiteral::checked`] for text
    /// that is not known to be well formed.
    #[must_use]
    pub fn member(mut self, key: &str, value: impl Into<Node>) -> Self {
        self.members
            .push(KeyValue::new(StringLiteral::escaped(key), value.into()));
        self
    }

    /// Add a member with an already-built key.
    #[must_use]
    pub fn raw_member(mut self, key: StringLiteral, value: impl Into<Node>) -> Self {
        self.members.push(KeyValue::new(key, value.into()));
        self
    }
}

impl JsonArray {
    /// Create a new empty array.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Append an element.
    #[must_use]
    pub fn element(mut self, value: impl Into<Node>) -> Self {
        self.elements.push(value.into());
        self
    }
}

impl StringLiteral {
    /// Build a literal from plain text, escaping it so that printing and
    /// re-parsing yields the same raw value. `$` is left alone, so
    /// `${name}` in the text stays a placeholder.
    #[must_use]
    pub fn escaped(text: &str) -> Self {
        use std::fmt::Write as _;

        let mut raw = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '"' => raw.push_str("\\\""),
                '\\' => raw.push_str("\\\\"),
                '\n' => raw.push_str("\\n"),
                '\r' => raw.push_str("\\r"),
                '\t' => raw.push_str("\\t"),
                '\u{8}' => raw.push_str("\\b"),
                '\u{c}' => raw.push_str("\\f"),
                c if c.is_control() => {
                    let _ = write!(raw, "\\u{:04x}", u32::from(c));
                }
                c => raw.push(c),
            }
        }
        Self::new(raw)
    }

    /// Like [`StringLiteral::escaped`], but rejects text whose `$`
    /// characters do not all start well-formed `${name}` placeholders.
    ///
    /// # Errors
    ///
    /// Returns `PlaceholderError` indexed into the escaped value.
    pub fn checked(text: &str) -> Result<Self, PlaceholderError> {
        let literal = Self::escaped(text);
        literal.placeholder_names()?;
        Ok(literal)
    }
}

impl Node {
    /// Placeholder expression node for `name`.
    ///
    /// # Errors
    ///
    /// Returns `IdentifierError` if `name` is not a valid identifier.
    pub fn placeholder(name: &str) -> Result<Self, IdentifierError> {
        Identifier::new(name).map(Self::Placeholder)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Self::Number(NumberLiteral::from(value))
    }
}

impl From<u64> for Node {
    fn from(value: u64) -> Self {
        Self::Number(NumberLiteral::from(value))
    }
}

impl From<i64> for NumberLiteral {
    fn from(value: i64) -> Self {
        Self::from_parts(value.to_string())
    }
}

impl From<u64> for NumberLiteral {
    fn from(value: u64) -> Self {
        Self::from_parts(value.to_string())
    }
}

/// Escapes `text` without checking its placeholders, see
/// [`JsonObject::member`].
impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::String(StringLiteral::escaped(text))
    }
}

impl From<StringLiteral> for Node {
    fn from(literal: StringLiteral) -> Self {
        Self::String(literal)
    }
}

impl From<NumberLiteral> for Node {
    fn from(number: NumberLiteral) -> Self {
        Self::Number(number)
    }
}

impl From<Identifier> for Node {
    fn from(name: Identifier) -> Self {
        Self::Placeholder(name)
    }
}

impl From<JsonArray> for Node {
    fn from(array: JsonArray) -> Self {
        Self::Array(array)
    }
}

impl From<JsonObject> for Node {
    fn from(object: JsonObject) -> Self {
        Self::Object(object)
    }
}

impl<T: Into<Self>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
