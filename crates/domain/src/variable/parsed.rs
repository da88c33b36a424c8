//! Structured variable names.
//!
//! A structured name packs a base identifier and key/value properties into
//! a single custom property: `--<base>(_<key>--<value>)*`.
//!
//! Each segment is one or more ASCII letters or digits, optionally joined by
//! single hyphens. Underscores separate properties and `--` separates a key
//! from its value, so neither may appear inside a segment.

use indexmap::IndexMap;

/// A custom property name decomposed into base name and properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVariable {
    /// The complete input that matched.
    pub full_match: String,

    /// The base name (between the leading `--` and the first `_`).
    pub name: String,

    /// Properties in order of first appearance. Repeated keys keep the last value.
    pub properties: IndexMap<String, String>,
}

impl ParsedVariable {
    /// Returns the value of a property, if present.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Returns true if the base name equals `name`.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }
}

/// Parses a variable name against the structured-name grammar.
///
/// Returns `None` when the name is not a structured variable. That is an
/// ordinary outcome, not an error.
///
/// # Examples
///
/// ```
/// use dynamo_domain::variable::parse_variable;
///
/// let parsed = parse_variable("--color_hex--7289DA").unwrap();
/// assert_eq!(parsed.name, "color");
/// assert_eq!(parsed.property("hex"), Some("7289DA"));
///
/// assert!(parse_variable("not-a-variable").is_none());
/// ```
#[must_use]
pub fn parse_variable(input: &str) -> Option<ParsedVariable> {
    let rest = input.strip_prefix("--")?;
    let mut parts = rest.split('_');

    let name = parts.next().filter(|base| is_segment(base))?;

    let mut properties = IndexMap::new();
    for part in parts {
        let (key, value) = part.split_once("--")?;
        if !is_segment(key) || !is_segment(value) {
            return None;
        }
        properties.insert(key.to_string(), value.to_string());
    }

    Some(ParsedVariable {
        full_match: input.to_string(),
        name: name.to_string(),
        properties,
    })
}

/// One or more alphanumeric runs joined by single hyphens.
fn is_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .split('-')
            .all(|run| !run.is_empty() && run.chars().all(|c| c.is_ascii_alphanumeric()))
}
