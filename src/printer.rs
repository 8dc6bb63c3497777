//! Printer that serializes an AST back into its surface syntax.
//!
//! Compact output inserts no whitespace at all, so printing a parsed
//! document reproduces whitespace-free input byte for byte. Pretty
//! output indents two spaces per nesting level.

use std::fmt::Write as _;

use crate::ast::{JsonArray, JsonObject, Node, StringLiteral};
use crate::identifier::Identifier;
use crate::placeholder::PlaceholderError;

/// Output layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Style {
    /// No inserted whitespace.
    #[default]
    Compact,
    /// Newline after each element, two-space indent, space after `:`.
    Pretty,
}

impl Style {
    #[must_use]
    pub const fn from_pretty(pretty: bool) -> Self {
        if pretty { Self::Pretty } else { Self::Compact }
    }
}

/// Print `node`, resolving placeholders through `resolver`. Names the
/// resolver returns `None` for are printed as `${name}`.
///
/// # Errors
///
/// Returns `PlaceholderError` if a string literal holds malformed
/// placeholder syntax.
pub fn print<F>(node: &Node, pretty: bool, resolver: F) -> Result<String, PlaceholderError>
where
    F: Fn(&Identifier) -> Option<String>,
{
    Printer::new(Style::from_pretty(pretty), &resolver).print(node)
}

/// Print `node` compactly, leaving every placeholder unresolved.
///
/// # Errors
///
/// Returns `PlaceholderError` if a string literal holds malformed
/// placeholder syntax.
pub fn print_compact(node: &Node) -> Result<String, PlaceholderError> {
    print(node, false, |_| None)
}

/// Print `node` with pretty layout, leaving every placeholder unresolved.
///
/// # Errors
///
/// Returns `PlaceholderError` if a string literal holds malformed
/// placeholder syntax.
pub fn print_pretty(node: &Node) -> Result<String, PlaceholderError> {
    print(node, true, |_| None)
}

/// AST visitor accumulating output text.
pub struct Printer<'r> {
    style: Style,
    resolver: &'r dyn Fn(&Identifier) -> Option<String>,
    out: String,
}

impl<'r> Printer<'r> {
    #[must_use]
    pub fn new(style: Style, resolver: &'r dyn Fn(&Identifier) -> Option<String>) -> Self {
        Self {
            style,
            resolver,
            out: String::new(),
        }
    }

    /// Print a whole tree, consuming the printer.
    ///
    /// # Errors
    ///
    /// Returns `PlaceholderError` on malformed placeholder syntax in a
    /// string literal.
    pub fn print(mut self, node: &Node) -> Result<String, PlaceholderError> {
        self.node(node, 0)?;
        Ok(self.out)
    }

    fn node(&mut self, node: &Node, depth: usize) -> Result<(), PlaceholderError> {
        match node {
            Node::String(literal) => self.string(literal)?,
            Node::Number(number) => self.out.push_str(number.text()),
            Node::Boolean(value) => {
                let _ = write!(self.out, "{value}");
            }
            Node::Null => self.out.push_str("null"),
            Node::Array(array) => self.array(array, depth)?,
            Node::Object(object) => self.object(object, depth)?,
            Node::Placeholder(name) => match (self.resolver)(name) {
                Some(resolved) => self.out.push_str(&resolved),
                None => {
                    let _ = write!(self.out, "${{{name}}}");
                }
            },
        }
        Ok(())
    }

    fn string(&mut self, literal: &StringLiteral) -> Result<(), PlaceholderError> {
        let value = literal.substitute(self.resolver)?;
        self.out.push('"');
        self.out.push_str(&value);
        self.out.push('"');
        Ok(())
    }

    fn array(&mut self, array: &JsonArray, depth: usize) -> Result<(), PlaceholderError> {
        self.out.push('[');
        for (i, element) in array.elements.iter().enumerate() {
            self.separator(i, depth + 1);
            self.node(element, depth + 1)?;
        }
        self.close(!array.elements.is_empty(), depth);
        self.out.push(']');
        Ok(())
    }

    fn object(&mut self, object: &JsonObject, depth: usize) -> Result<(), PlaceholderError> {
        self.out.push('{');
        for (i, member) in object.members.iter().enumerate() {
            self.separator(i, depth + 1);
            self.string(&member.key)?;
            self.out.push(':');
            if self.style == Style::Pretty {
                self.out.push(' ');
            }
            self.node(&member.value, depth + 1)?;
        }
        self.close(!object.members.is_empty(), depth);
        self.out.push('}');
        Ok(())
    }

    /// Emit what goes before the `index`-th child.
    fn separator(&mut self, index: usize, depth: usize) {
        if index > 0 {
            self.out.push(',');
        }
        self.newline(depth);
    }

    /// Emit what goes before a closing bracket.
    fn close(&mut self, had_children: bool, depth: usize) {
        if had_children {
            self.newline(depth);
        }
    }

    fn newline(&mut self, depth: usize) {
        if self.style == Style::Pretty {
            self.out.push('\n');
            self.out.push_str(&"  ".repeat(depth));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{KeyValue, NumberLiteral};

    fn sample() -> Node {
        Node::Object(JsonObject {
            members: vec![
                KeyValue::new(
                    StringLiteral::new("a"),
                    Node::Number(NumberLiteral::from_text("1").expect("valid")),
                ),
                KeyValue::new(
                    StringLiteral::new("b"),
                    Node::Array(JsonArray {
                        elements: vec![Node::Boolean(true), Node::Null],
                    }),
                ),
                KeyValue::new(StringLiteral::new("c"), Node::Object(JsonObject::default())),
            ],
        })
    }

    #[test]
    fn compact() {
        let result = print_compact(&sample()).expect("print");
        assert_eq!(result, r#"{"a":1,"b":[true,null],"c":{}}"#);
    }

    #[test]
    fn pretty() {
        let result = print_pretty(&sample()).expect("print");
        let expected = "\
{
  \"a\": 1,
  \"b\": [
    true,
    null
  ],
  \"c\": {}
}";
        assert_eq!(result, expected);
    }

    #[test]
    fn pretty_empty_containers() {
        assert_eq!(
            print_pretty(&Node::Object(JsonObject::default())).expect("print"),
            "{}"
        );
        assert_eq!(
            print_pretty(&Node::Array(JsonArray::default())).expect("print"),
            "[]"
        );
    }

    #[test]
    fn placeholder_expression_resolution() {
        let node = Node::Placeholder(Identifier::new("port").expect("valid"));
        let resolved = print(&node, false, |_| Some("8080".to_string())).expect("print");
        assert_eq!(resolved, "8080");
        let unresolved = print_compact(&node).expect("print");
        assert_eq!(unresolved, "${port}");
    }

    #[test]
    fn string_placeholder_resolution() {
        let node = Node::String(StringLiteral::new("host=${host}"));
        let result = print(&node, false, |id| {
            (id.as_str() == "host").then(|| "example.com".to_string())
        })
        .expect("print");
        assert_eq!(result, "\"host=example.com\"");
    }

    #[test]
    fn malformed_placeholder_fails() {
        let node = Node::String(StringLiteral::new("cost: $5"));
        assert!(print_compact(&node).is_err());
    }
}
