use std::fmt;

/// Error produced when constructing an `Identifier` from an invalid name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier '{name}' (first invalid character at index {index})")]
pub struct IdentifierError {
    pub name: String,
    pub index: usize,
}

/// A placeholder name made of ASCII letters, digits and underscores.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Validate and wrap a name.
    ///
    /// # Errors
    ///
    /// Returns `IdentifierError` if the name is empty or contains a
    /// character outside `[0-9A-Za-z_]`.
    pub fn new(name: impl Into<String>) -> Result<Self, IdentifierError> {
        let name = name.into();
        match first_invalid_index(&name) {
            None => Ok(Self(name)),
            Some(index) => Err(IdentifierError { name, index }),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Whether `c` may appear in an identifier.
#[must_use]
pub const fn is_valid_char(c: char) -> bool {
    let c = c.to_ascii_lowercase();
    c == '_' || c.is_ascii_digit() || matches!(c, 'a'..='z')
}

/// Character index of the first invalid character in `name`, or `None`
/// if the whole name is a valid identifier. An empty name is invalid at
/// index 0.
#[must_use]
pub fn first_invalid_index(name: &str) -> Option<usize> {
    if name.is_empty() {
        return Some(0);
    }
    name.chars().position(|c| !is_valid_char(c))
}

#[must_use]
pub fn is_valid(name: &str) -> bool {
    first_invalid_index(name).is_none()
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Identifier {
    type Error = IdentifierError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_letters_digits_underscore() {
        assert!(is_valid("name"));
        assert!(is_valid("Name_2"));
        assert!(is_valid("_"));
        assert!(is_valid("123"));
    }

    #[test]
    fn rejects_other_characters() {
        assert_eq!(first_invalid_index("ab-c"), Some(2));
        assert_eq!(first_invalid_index("a b"), Some(1));
        assert_eq!(first_invalid_index("ä"), Some(0));
        assert_eq!(first_invalid_index("x@"), Some(1));
        // characters between the ASCII ranges
        assert_eq!(first_invalid_index("["), Some(0));
        assert_eq!(first_invalid_index(":"), Some(0));
    }

    #[test]
    fn empty_name_is_invalid() {
        assert_eq!(first_invalid_index(""), Some(0));
        assert!(Identifier::new("").is_err());
    }

    #[test]
    fn construction_reports_index() {
        let err = Identifier::new("ok$").unwrap_err();
        assert_eq!(err.index, 2);
        assert_eq!(err.name, "ok$");
    }

    #[test]
    fn displays_bare_name() {
        let id = Identifier::new("user_id").expect("valid");
        assert_eq!(id.to_string(), "user_id");
        assert_eq!(id.as_str(), "user_id");
    }
}
