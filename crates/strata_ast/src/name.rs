//! Normalized type names.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Namespace separator stripped from the front of fully-qualified names.
const NAMESPACE_SEPARATOR: char = '\\';

/// A fully-qualified class-like name (class, interface, trait, enum).
///
/// The name is normalized on construction so that `\App\Foo` and `App\Foo`
/// compare equal. It is immutable; the only capability beyond reading it
/// back is matching against a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ClassLikeName(String);

impl ClassLikeName {
    /// Creates a name from a fully-qualified identifier.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(
            name.as_ref()
                .trim_start_matches(NAMESPACE_SEPARATOR)
                .to_string(),
        )
    }

    /// Returns the normalized identifier.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the pattern matches anywhere in the name.
    pub fn matches(&self, pattern: &Regex) -> bool {
        pattern.is_match(&self.0)
    }
}

impl fmt::Display for ClassLikeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ClassLikeName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&str> for ClassLikeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<ClassLikeName> for String {
    fn from(name: ClassLikeName) -> Self {
        name.0
    }
}
