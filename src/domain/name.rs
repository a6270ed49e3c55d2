use std::{fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;

/// The reserved name marker for a root node.
///
/// No child may carry this name. An unnamed root is displayed as this marker,
/// and renaming a node to it is the same as clearing its name.
pub const ROOT_MARKER: &str = "/";

/// A validated child name.
///
/// Child names are non-empty and never equal to [`ROOT_MARKER`]. Only roots
/// may be unnamed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(NonEmptyString);

impl Name {
    /// Creates a new `Name` from a string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidNameError` if the string is empty or is the root marker.
    pub fn new(s: String) -> Result<Self, InvalidNameError> {
        if s == ROOT_MARKER {
            return Err(InvalidNameError(s));
        }
        let non_empty = NonEmptyString::new(s).map_err(InvalidNameError)?;
        Ok(Self(non_empty))
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for Name {
    type Error = InvalidNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Name {
    type Error = InvalidNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for Name {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Name {
    type Err = InvalidNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

/// Error returned when a string cannot be used as a child name.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("invalid name '{0}': must be non-empty and not the root marker '/'")]
pub struct InvalidNameError(String);

impl InvalidNameError {
    /// The rejected name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("A"; "single letter")]
    #[test_case("Ay-1"; "with dash and digit")]
    #[test_case("."; "dot")]
    #[test_case("a/b"; "contains marker")]
    #[test_case(" "; "whitespace")]
    fn accepts(input: &str) {
        let name = Name::from_str(input).unwrap();
        assert_eq!(name.as_str(), input);
        assert_eq!(name.to_string(), input);
    }

    #[test_case(""; "empty")]
    #[test_case("/"; "root marker")]
    fn rejects(input: &str) {
        let err = Name::try_from(input).unwrap_err();
        assert_eq!(err.name(), input);
    }

    #[test]
    fn derefs_to_str() {
        let name = Name::try_from("docs".to_string()).unwrap();
        assert!(name.starts_with("do"));
        assert_eq!(name.as_ref(), "docs");
    }
}
