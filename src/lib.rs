//! JSON with `${name}` placeholders: lexer, parser, printer, and
//! value conversion.
//!
//! Documents are JSON objects in which any value position may hold a
//! bare `${name}` placeholder expression, and string literals may embed
//! `${name}` references. Parsing keeps escape sequences in their written
//! form, so printing a whitespace-free document reproduces it exactly.
//!
//! # Quick start
//!
//! ## Parse and print back
//!
//! ```
//! use placeholder_json::{parse, print_compact};
//!
//! let input = r#"{"host":"${host}","port":${port},"tags":["a","b"]}"#;
//! let node = parse(input).unwrap();
//! assert_eq!(print_compact(&node).unwrap(), input);
//! ```
//!
//! ## Resolve placeholders while printing
//!
//! ```
//! use placeholder_json::{parse, print};
//!
//! let node = parse(r#"{"url":"http://${host}/","port":${port}}"#).unwrap();
//! let output = print(&node, false, |name| match name.as_str() {
//!     "host" => Some("example.com".to_string()),
//!     "port" => Some("8080".to_string()),
//!     _ => None,
//! })
//! .unwrap();
//! assert_eq!(output, r#"{"url":"http://example.com/","port":8080}"#);
//! ```
//!
//! ## Build a document programmatically
//!
//! ```
//! use placeholder_json::{JsonArray, JsonObject, Node, print_compact};
//!
//! let doc = JsonObject::new()
//!     .member("name", "demo")
//!     .member("port", Node::placeholder("port").unwrap())
//!     .member("tags", JsonArray::new().element("a").element(1_i64));
//!
//! let output = print_compact(&Node::from(doc)).unwrap();
//! assert_eq!(output, r#"{"name":"demo","port":${port},"tags":["a",1]}"#);
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod builder;
pub mod identifier;
pub mod lexer;
pub mod parser;
pub mod placeholder;
pub mod printer;
pub mod scanner;
pub mod token;
pub mod value;

pub use ast::{Composite, JsonArray, JsonObject, KeyValue, Node, NumberLiteral, StringLiteral};
pub use identifier::{Identifier, IdentifierError};
pub use lexer::{Lexer, tokenize};
pub use parser::{ParseError, ParseErrorKind, Parser, parse, parse_with};
pub use placeholder::{PlaceholderError, PlaceholderErrorKind};
pub use printer::{Printer, Style, print, print_compact, print_pretty};
pub use token::{Token, TokenKind};
pub use value::{Value, ValueError, to_value};

/// Unified error type covering every stage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A syntax error in the document.
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// Malformed placeholder syntax inside a string literal.
    #[error("{0}")]
    Placeholder(#[from] PlaceholderError),
    /// An invalid placeholder name.
    #[error("{0}")]
    Identifier(#[from] IdentifierError),
    /// A node that has no generic-value counterpart.
    #[error("{0}")]
    Value(#[from] ValueError),
}

/// Parse a document and convert it to a generic value in one step.
pub fn parse_to_value(input: &str) -> Result<Value, Error> {
    let node = parse(input)?;
    Ok(to_value(&node)?)
}

/// Parse a document and print it back, resolving placeholders through
/// `resolver`.
pub fn render<F>(input: &str, pretty: bool, resolver: F) -> Result<String, Error>
where
    F: Fn(&Identifier) -> Option<String>,
{
    let node = parse(input)?;
    Ok(print(&node, pretty, resolver)?)
}
