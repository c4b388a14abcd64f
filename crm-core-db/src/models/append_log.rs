use serde::{Deserialize, Serialize};

/// Append-only sequence for audit and engagement histories.
///
/// The API is the invariant: entries can be appended and read, never
/// replaced, reordered or removed. Storage order is append order; display
/// order (reverse chronological) is a presentation concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppendOnlyLog<T> {
    entries: Vec<T>,
}

impl<T> AppendOnlyLog<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Appends one entry and returns a reference to it in place.
    pub fn append(&mut self, entry: T) -> &T {
        self.entries.push(entry);
        self.entries.last().unwrap_or_else(|| unreachable!())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&T> {
        self.entries.last()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }
}

impl<T> Default for AppendOnlyLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a AppendOnlyLog<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
