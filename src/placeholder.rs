//! Discovery and substitution of `${name}` placeholders embedded in the
//! raw value of a string literal.
//!
//! Placeholders inside strings are not materialized when parsing; the
//! stored value is rescanned whenever names are needed.

use std::collections::BTreeSet;
use std::fmt;

use crate::identifier::{self, Identifier};

/// Classifies a placeholder syntax error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderErrorKind {
    /// `$` not followed by `{`.
    ExpectedOpenBrace,
    /// `${}` with nothing between the braces.
    PlaceholderNameRequired,
    /// Character outside `[0-9A-Za-z_]` inside `${...}`.
    InvalidIdentifierCharacter(char),
    /// String ended inside `${...`.
    UnterminatedPlaceholder,
}

impl fmt::Display for PlaceholderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpectedOpenBrace => write!(f, "expected '{{' after '$'"),
            Self::PlaceholderNameRequired => write!(f, "placeholder name required"),
            Self::InvalidIdentifierCharacter(c) => {
                write!(f, "character '{c}' not allowed in placeholder name")
            }
            Self::UnterminatedPlaceholder => {
                write!(f, "unterminated placeholder expression")
            }
        }
    }
}

/// Error produced while scanning a string value for placeholders. The
/// index is a character index into the string's raw value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at index {index}")]
pub struct PlaceholderError {
    pub kind: PlaceholderErrorKind,
    pub index: usize,
}

/// Distinct placeholder names referenced by `value`.
///
/// # Errors
///
/// Returns `PlaceholderError` on malformed placeholder syntax.
pub fn names(value: &str) -> Result<BTreeSet<Identifier>, PlaceholderError> {
    let mut names = BTreeSet::new();
    let mut name = String::new();
    let mut name_start = 0;
    let mut escaped = false;
    let mut in_placeholder = false;
    let mut awaiting_brace = false;

    for (i, c) in value.chars().enumerate() {
        if !in_placeholder {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '$' {
                in_placeholder = true;
                awaiting_brace = true;
            }
            continue;
        }

        if awaiting_brace {
            if c != '{' {
                return Err(PlaceholderError {
                    kind: PlaceholderErrorKind::ExpectedOpenBrace,
                    index: i,
                });
            }
            awaiting_brace = false;
            name_start = i + 1;
            continue;
        }

        if c == '}' {
            in_placeholder = false;
            if name.is_empty() {
                return Err(PlaceholderError {
                    kind: PlaceholderErrorKind::PlaceholderNameRequired,
                    index: i,
                });
            }
            let id = Identifier::new(std::mem::take(&mut name)).map_err(|e| PlaceholderError {
                kind: PlaceholderErrorKind::InvalidIdentifierCharacter(
                    e.name.chars().nth(e.index).unwrap_or(c),
                ),
                index: name_start + e.index,
            })?;
            names.insert(id);
            continue;
        }

        if !identifier::is_valid_char(c) {
            return Err(PlaceholderError {
                kind: PlaceholderErrorKind::InvalidIdentifierCharacter(c),
                index: i,
            });
        }
        name.push(c);
    }

    if in_placeholder {
        return Err(PlaceholderError {
            kind: PlaceholderErrorKind::UnterminatedPlaceholder,
            index: value.chars().count(),
        });
    }
    Ok(names)
}

/// Replace every `${name}` the resolver knows with its resolved text.
/// Unresolved names keep their `${name}` form.
///
/// # Errors
///
/// Returns `PlaceholderError` on malformed placeholder syntax.
pub fn substitute<F>(value: &str, resolver: F) -> Result<String, PlaceholderError>
where
    F: Fn(&Identifier) -> Option<String>,
{
    let mut out = value.to_string();
    for name in names(value)? {
        if let Some(resolved) = resolver(&name) {
            out = out.replace(&format!("${{{name}}}"), &resolved);
        }
    }
    Ok(out)
}
