use std::collections::BTreeSet;

use crate::identifier::Identifier;
use crate::placeholder::{self, PlaceholderError};

/// A parsed value. The variant set is closed; every consumer matches
/// on it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    String(StringLiteral),
    Number(NumberLiteral),
    Boolean(bool),
    Null,
    Array(JsonArray),
    Object(JsonObject),
    /// Bare `${name}` in value position.
    Placeholder(Identifier),
}

/// String literal holding the raw text between the quotes.
///
/// Escape sequences are kept in their escaped form (`\n` stays two
/// characters, `\u00e9` stays six), except `\$` which is stored as `$`.
/// Embedded `${name}` placeholders are not parsed up front; see
/// [`StringLiteral::placeholder_names`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StringLiteral {
    value: String,
}

/// Number literal holding its decimal text exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumberLiteral {
    text: String,
}

/// Object member: `"key": value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: StringLiteral,
    pub value: Node,
}

/// Array: `[value, ...]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonArray {
    pub elements: Vec<Node>,
}

/// Object: `{"key": value, ...}`. Members keep input order and
/// duplicate keys are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonObject {
    pub members: Vec<KeyValue>,
}

/// Indexed access to the children of a composite node.
pub trait Composite {
    type Child;

    fn children(&self) -> &[Self::Child];

    fn child_count(&self) -> usize {
        self.children().len()
    }

    fn child(&self, index: usize) -> Option<&Self::Child> {
        self.children().get(index)
    }

    fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    fn is_last_child(&self, index: usize) -> bool {
        index + 1 == self.child_count()
    }
}

impl Composite for JsonArray {
    type Child = Node;

    fn children(&self) -> &[Node] {
        &self.elements
    }
}

impl Composite for JsonObject {
    type Child = KeyValue;

    fn children(&self) -> &[KeyValue] {
        &self.members
    }
}

impl StringLiteral {
    /// Wrap an already-escaped raw value.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self { value: raw.into() }
    }

    /// The raw text between the quotes.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Distinct names of the `${name}` placeholders embedded in the value.
    ///
    /// # Errors
    ///
    /// Returns `PlaceholderError` if the value contains malformed
    /// placeholder syntax such as `$x` or `${a-b}`.
    pub fn placeholder_names(&self) -> Result<BTreeSet<Identifier>, PlaceholderError> {
        placeholder::names(&self.value)
    }

    /// The value with every resolvable placeholder replaced. Names the
    /// resolver returns `None` for are left as `${name}`.
    ///
    /// # Errors
    ///
    /// Returns `PlaceholderError` on malformed placeholder syntax.
    pub fn substitute<F>(&self, resolver: F) -> Result<String, PlaceholderError>
    where
        F: Fn(&Identifier) -> Option<String>,
    {
        placeholder::substitute(&self.value, resolver)
    }
}

impl NumberLiteral {
    /// Validate `-?DIGITS(.DIGITS)?` text.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        let unsigned = text.strip_prefix('-').unwrap_or(&text);
        let (int, frac) = match unsigned.split_once('.') {
            Some((int, frac)) => (int, Some(frac)),
            None => (unsigned, None),
        };
        let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
        if digits(int) && frac.is_none_or(digits) {
            Some(Self { text })
        } else {
            None
        }
    }

    pub(crate) const fn from_parts(text: String) -> Self {
        Self { text }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_fractional(&self) -> bool {
        self.text.contains('.')
    }
}

impl KeyValue {
    #[must_use]
    pub const fn new(key: StringLiteral, value: Node) -> Self {
        Self { key, value }
    }
}

impl Node {
    /// Number of direct children; zero for leaves.
    #[must_use]
    pub fn child_count(&self) -> usize {
        match self {
            Self::Array(array) => array.child_count(),
            Self::Object(object) => object.child_count(),
            Self::String(_)
            | Self::Number(_)
            | Self::Boolean(_)
            | Self::Null
            | Self::Placeholder(_) => 0,
        }
    }

    /// Short name of the variant, used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Boolean(_) => "boolean",
            Self::Null => "null",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Placeholder(_) => "placeholder expression",
        }
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&JsonObject> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_array(&self) -> Option<&JsonArray> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Every placeholder name referenced anywhere in the tree, both bare
    /// placeholder expressions and names embedded in strings and keys.
    ///
    /// # Errors
    ///
    /// Returns the first `PlaceholderError` found in a string literal.
    pub fn placeholder_names(&self) -> Result<BTreeSet<Identifier>, PlaceholderError> {
        let mut names = BTreeSet::new();
        self.collect_placeholder_names(&mut names)?;
        Ok(names)
    }

    fn collect_placeholder_names(
        &self,
        names: &mut BTreeSet<Identifier>,
    ) -> Result<(), PlaceholderError> {
        match self {
            Self::String(literal) => names.extend(literal.placeholder_names()?),
            Self::Placeholder(name) => {
                names.insert(name.clone());
            }
            Self::Array(array) => {
                for element in &array.elements {
                    element.collect_placeholder_names(names)?;
                }
            }
            Self::Object(object) => {
                for member in &object.members {
                    names.extend(member.key.placeholder_names()?);
                    member.value.collect_placeholder_names(names)?;
                }
            }
            Self::Number(_) | Self::Boolean(_) | Self::Null => {}
        }
        Ok(())
    }
}

impl JsonObject {
    /// First member with the given raw key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.members
            .iter()
            .find(|m| m.key.value() == key)
            .map(|m| &m.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_text_validation() {
        assert!(NumberLiteral::from_text("0").is_some());
        assert!(NumberLiteral::from_text("12.34").is_some());
        assert!(NumberLiteral::from_text("-7").is_some());
        assert!(NumberLiteral::from_text("-1.5").is_some());
        assert!(NumberLiteral::from_text("").is_none());
        assert!(NumberLiteral::from_text("1.").is_none());
        assert!(NumberLiteral::from_text(".5").is_none());
        assert!(NumberLiteral::from_text("1e5").is_none());
        assert!(NumberLiteral::from_text("+1").is_none());
        assert!(NumberLiteral::from_text("--1").is_none());
    }

    #[test]
    fn fractional_detection() {
        let n = NumberLiteral::from_text("1.0").expect("valid");
        assert!(n.is_fractional());
        let n = NumberLiteral::from_text("10").expect("valid");
        assert!(!n.is_fractional());
    }

    #[test]
    fn composite_access() {
        let array = JsonArray {
            elements: vec![Node::Null, Node::Boolean(true)],
        };
        assert_eq!(array.child_count(), 2);
        assert_eq!(array.child(1), Some(&Node::Boolean(true)));
        assert!(array.child(2).is_none());
        assert!(array.is_last_child(1));
        assert!(!array.is_last_child(0));
        assert!(!JsonArray::default().has_children());
    }

    #[test]
    fn tree_placeholder_names() {
        let object = JsonObject {
            members: vec![
                KeyValue::new(
                    StringLiteral::new("${k}"),
                    Node::Placeholder(Identifier::new("v").expect("valid")),
                ),
                KeyValue::new(
                    StringLiteral::new("s"),
                    Node::Array(JsonArray {
                        elements: vec![Node::String(StringLiteral::new("a ${k} ${z}"))],
                    }),
                ),
            ],
        };
        let names: Vec<String> = Node::Object(object)
            .placeholder_names()
            .expect("valid placeholders")
            .into_iter()
            .map(Identifier::into_string)
            .collect();
        assert_eq!(names, vec!["k", "v", "z"]);
    }

    #[test]
    fn object_get_returns_first_match() {
        let object = JsonObject {
            members: vec![
                KeyValue::new(StringLiteral::new("a"), Node::Null),
                KeyValue::new(StringLiteral::new("a"), Node::Boolean(false)),
            ],
        };
        assert_eq!(object.get("a"), Some(&Node::Null));
        assert_eq!(object.get("b"), None);
    }
}
