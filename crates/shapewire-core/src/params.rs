//! Ordered parameter sets.

use std::collections::HashMap;

/// Ordered `path -> value` pairs produced by encoding.
///
/// Insertion order is preserved; inserting an existing path replaces its
/// value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    entries: Vec<(String, String)>,
    positions: HashMap<String, usize>,
}

impl ParameterSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair, returning the previous value for the path.
    pub fn insert(&mut self, path: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let path = path.into();
        let value = value.into();
        if let Some(&pos) = self.positions.get(&path) {
            return Some(std::mem::replace(&mut self.entries[pos].1, value));
        }
        self.positions.insert(path.clone(), self.entries.len());
        self.entries.push((path, value));
        None
    }

    /// Look up a value.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.positions
            .get(path)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    /// Whether the path is present.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.positions.contains_key(path)
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate paths in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Consume into the ordered pairs.
    #[must_use]
    pub fn into_vec(self) -> Vec<(String, String)> {
        self.entries
    }

    /// Render as an `application/x-www-form-urlencoded` body.
    #[must_use]
    pub fn to_form_body(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }

    /// Parse an `application/x-www-form-urlencoded` body.
    #[must_use]
    pub fn from_form_body(body: &str) -> Self {
        form_urlencoded::parse(body.as_bytes())
            .into_owned()
            .collect()
    }
}

impl Extend<(String, String)> for ParameterSet {
    fn extend<I: IntoIterator<Item = (String, String)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl FromIterator<(String, String)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for ParameterSet {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
