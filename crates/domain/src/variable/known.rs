//! The set of variable names discovered so far.

use indexmap::IndexSet;

/// Ordered, append-only set of discovered variable names.
///
/// Names found by the latest discovery come first. Names already known are
/// never removed and never reordered relative to each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownVariables {
    names: IndexSet<String>,
}

impl KnownVariables {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the names that are not yet known, ahead of the existing ones.
    ///
    /// New names keep the order in which they were given; repeated names
    /// are collapsed. Returns the genuinely new names, in that order.
    pub fn absorb<I, S>(&mut self, candidates: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fresh = IndexSet::new();
        for name in candidates {
            let name = name.into();
            if !self.names.contains(&name) {
                fresh.insert(name);
            }
        }

        if fresh.is_empty() {
            return Vec::new();
        }

        let discovered: Vec<String> = fresh.iter().cloned().collect();
        fresh.extend(std::mem::take(&mut self.names));
        self.names = fresh;
        discovered
    }

    /// Returns true if the name has been discovered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Iterates over the names, newest discoveries first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Returns the names as an owned list, newest discoveries first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }

    /// Returns the number of known names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if nothing has been discovered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
