//! Immutable dotted key paths.

use std::fmt;

/// A dotted/indexed parameter path such as `Foo.Items.member.3.Name`.
///
/// Appending returns a new path, so sibling fields never share a mutable
/// prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath {
    rendered: String,
}

impl KeyPath {
    /// The empty path.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// A path from a caller-supplied prefix such as `"Foo."` or `"Foo"`.
    ///
    /// A single trailing `.` is accepted and dropped.
    #[must_use]
    pub fn from_prefix(prefix: &str) -> Self {
        Self {
            rendered: prefix.strip_suffix('.').unwrap_or(prefix).to_owned(),
        }
    }

    /// Append a named segment.
    #[must_use]
    pub fn field(&self, name: &str) -> Self {
        if self.rendered.is_empty() {
            return Self {
                rendered: name.to_owned(),
            };
        }
        let mut rendered = String::with_capacity(self.rendered.len() + name.len() + 1);
        rendered.push_str(&self.rendered);
        rendered.push('.');
        rendered.push_str(name);
        Self { rendered }
    }

    /// Append a 1-based index, preceded by `token` when the convention has one.
    #[must_use]
    pub fn index(&self, token: Option<&str>, index: usize) -> Self {
        let base = match token {
            Some(token) => self.field(token),
            None => self.clone(),
        };
        base.field(&index.to_string())
    }

    /// Whether this is the empty path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.rendered.is_empty()
    }

    /// The rendered path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.rendered
    }

    /// Consume into the rendered path.
    #[must_use]
    pub fn into_string(self) -> String {
        self.rendered
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}
