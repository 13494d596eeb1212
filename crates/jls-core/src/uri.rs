//! Absolute-URI keys used to identify source files.

use std::fmt;

/// An absolute URI identifying a source file, used as the key of every
/// per-file cache in this workspace.
///
/// This is intentionally a thin wrapper around an interned-ish `String`
/// rather than a parsed `url::Url`: the analysis core never needs to
/// manipulate URI components, only compare and hash them.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Uri(String);

impl Uri {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` for URIs whose path component ends in `.java`.
    pub fn is_java_file(&self) -> bool {
        self.0.ends_with(".java")
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Uri {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Uri {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
