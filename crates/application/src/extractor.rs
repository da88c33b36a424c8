//! Variable reference extraction
//!
//! Locates `var(--name)` references in raw style-rule text. Nothing else
//! about the CSS is interpreted.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static VAR_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"var\( *(--.+?) *[,)]").expect("valid regex"));

/// A batch of raw style-rule texts delivered by a host in one go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleBatch {
    rules: Vec<String>,
}

impl StyleBatch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one rule text.
    pub fn push(&mut self, rule: impl Into<String>) {
        self.rules.push(rule.into());
    }

    /// Returns the rule texts in delivery order.
    #[must_use]
    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    /// Returns the number of rule texts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the batch holds no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Joins the rules into one blob, one rule per line.
    ///
    /// A reference can therefore never span two rules.
    #[must_use]
    pub fn joined(&self) -> String {
        self.rules.join("\n")
    }
}

impl From<&str> for StyleBatch {
    fn from(rule: &str) -> Self {
        Self {
            rules: vec![rule.to_string()],
        }
    }
}

impl From<String> for StyleBatch {
    fn from(rule: String) -> Self {
        Self { rules: vec![rule] }
    }
}

impl From<Vec<String>> for StyleBatch {
    fn from(rules: Vec<String>) -> Self {
        Self { rules }
    }
}

impl From<Vec<&str>> for StyleBatch {
    fn from(rules: Vec<&str>) -> Self {
        rules.into_iter().collect()
    }
}

impl From<&[&str]> for StyleBatch {
    fn from(rules: &[&str]) -> Self {
        rules.iter().copied().collect()
    }
}

impl<const N: usize> From<[&str; N]> for StyleBatch {
    fn from(rules: [&str; N]) -> Self {
        rules.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for StyleBatch {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for StyleBatch {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.rules.extend(iter.into_iter().map(Into::into));
    }
}

/// Returns every variable referenced through `var(...)`, in order of appearance.
///
/// A reference is `var(`, optional spaces, a name starting with `--`,
/// optional spaces, then `,` or `)`. Unterminated references are ignored.
/// Repeats are kept; deduplication is the caller's business.
///
/// # Examples
///
/// ```
/// use dynamo_application::extractor::scan_variable_references;
///
/// let names = scan_variable_references("color: var(--foo, red); margin: var( --bar )");
/// assert_eq!(names, vec!["--foo", "--bar"]);
/// ```
#[must_use]
pub fn scan_variable_references(text: &str) -> Vec<String> {
    VAR_REFERENCE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fallback_and_padded_references() {
        let names = scan_variable_references("a { color: var(--foo, red); margin: var( --bar ) }");
        assert_eq!(names, vec!["--foo", "--bar"]);
    }

    #[test]
    fn test_no_references() {
        assert!(scan_variable_references("a { color: red }").is_empty());
        assert!(scan_variable_references("").is_empty());
    }

    #[test]
    fn test_unterminated_reference_is_ignored() {
        assert!(scan_variable_references("color: var(--broken").is_empty());
    }

    #[test]
    fn test_repeats_are_kept() {
        let names = scan_variable_references("var(--a) var(--b) var(--a)");
        assert_eq!(names, vec!["--a", "--b", "--a"]);
    }

    #[test]
    fn test_structured_names() {
        let names = scan_variable_references("background: var(--color_hex--7289DA);");
        assert_eq!(names, vec!["--color_hex--7289DA"]);
    }

    #[test]
    fn test_nested_fallback() {
        let names = scan_variable_references("width: var(--w, var(--fallback))");
        assert_eq!(names, vec!["--w", "--fallback"]);
    }

    #[test]
    fn test_non_variable_argument_is_ignored() {
        assert!(scan_variable_references("var(color)").is_empty());
    }

    #[test]
    fn test_batch_does_not_join_across_rules() {
        let batch = StyleBatch::from(["a { color: var(--x", ", red) }"]);
        assert_eq!(batch.len(), 2);
        assert!(scan_variable_references(&batch.joined()).is_empty());
    }

    #[test]
    fn test_batch_conversions() {
        assert_eq!(StyleBatch::from("a").rules(), ["a".to_string()]);
        assert_eq!(StyleBatch::from(String::from("b")).len(), 1);
        assert_eq!(StyleBatch::from(vec!["a", "b"]).len(), 2);

        let mut batch: StyleBatch = ["x"].into_iter().collect();
        batch.extend(["y"]);
        batch.push("z");
        assert_eq!(batch.joined(), "x\ny\nz");
        assert!(StyleBatch::new().is_empty());
    }
}
