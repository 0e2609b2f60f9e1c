use std::collections::BTreeSet;
use std::collections::btree_set::{IntoIter, Iter};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A deduplicated set of lowercase tag tokens.
///
/// Tokens are trimmed and lowercased on the way in, and empty tokens are
/// dropped, so `"Canon "` and `"canon"` are the same tag. Iteration order is
/// alphabetical, which keeps output stable; the order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag, returning `true` if it was not already present.
    pub fn insert(&mut self, tag: impl AsRef<str>) -> bool {
        let tag = tag.as_ref().trim().to_lowercase();
        !tag.is_empty() && self.0.insert(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String> {
        self.0.iter()
    }

    /// Merge another set in; the single point where tags from independent
    /// sources are combined.
    pub fn merge(&mut self, other: TagSet) {
        self.0.extend(other.0);
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0.into_iter().collect()
    }
}

impl<S: AsRef<str>> Extend<S> for TagSet {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        for tag in iter {
            self.insert(tag);
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut tags = TagSet::new();
        tags.extend(iter);
        tags
    }
}

impl IntoIterator for TagSet {
    type Item = String;
    type IntoIter = IntoIter<String>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a String;
    type IntoIter = Iter<'a, String>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for TagSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (index, tag) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(tag)?;
        }
        Ok(())
    }
}
