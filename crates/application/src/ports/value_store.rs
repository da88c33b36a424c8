//! Value store port

/// Single source of truth for resolved variable values.
///
/// Conceptually the computed style of the document root: one flat scope,
/// last write wins.
pub trait ValueStore: Send + Sync {
    /// Writes the resolved value of a variable.
    fn set(&self, name: &str, value: &str);

    /// Reads the most recently written value, if any.
    fn get(&self, name: &str) -> Option<String>;

    /// Returns every stored `(name, value)` pair.
    fn snapshot(&self) -> Vec<(String, String)>;
}
