//! Tutorials the player has already been shown

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct SeenTutorials {
    ids: BTreeSet<String>,
}

impl SeenTutorials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a tutorial seen; returns true the first time
    pub fn mark_seen(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn extend<I: IntoIterator<Item = String>>(&mut self, ids: I) {
        self.ids.extend(ids);
    }

    pub fn has_seen(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &BTreeSet<String> {
        &self.ids
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
