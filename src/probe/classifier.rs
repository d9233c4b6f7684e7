use std::collections::HashMap;
use std::hash::Hash;

use serde::Deserialize;

/// Externally supplied `(name, creator) → label` mapping.
///
/// A missing creator is stored as the empty string, matching how records
/// with no creator decode.
#[derive(Debug, Clone)]
pub struct Classifier<L> {
    entries: HashMap<(String, String), L>,
}

impl<L> Default for Classifier<L> {
    fn default() -> Self {
        Self { entries: HashMap::new() }
    }
}

impl<L> Classifier<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the label for a Mii.
    pub fn insert(&mut self, name: &str, creator: Option<&str>, label: L) {
        let key = (name.to_owned(), creator.unwrap_or_default().to_owned());
        self.entries.insert(key, label);
    }

    pub fn label_of(&self, name: &str, creator: &str) -> Option<&L> {
        // Tuple keys cannot be borrowed as (&str, &str); build the owned key.
        self.entries.get(&(name.to_owned(), creator.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, L> FromIterator<((&'a str, Option<&'a str>), L)> for Classifier<L> {
    fn from_iter<I: IntoIterator<Item = ((&'a str, Option<&'a str>), L)>>(iter: I) -> Self {
        let mut c = Classifier::new();
        for ((name, creator), label) in iter {
            c.insert(name, creator, label);
        }
        c
    }
}

#[derive(Deserialize)]
struct ClassifierRow {
    name:    String,
    #[serde(default)]
    creator: Option<String>,
    label:   serde_json::Value,
}

impl Classifier<String> {
    /// Load from a JSON array of `{"name", "creator"?, "label"}` objects.
    /// Non-string labels are kept in their JSON text form.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let rows: Vec<ClassifierRow> = serde_json::from_slice(bytes)?;
        let mut c = Classifier::new();
        for row in rows {
            let label = match row.label {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            c.insert(&row.name, row.creator.as_deref(), label);
        }
        Ok(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_creator_joins_as_empty() {
        let mut c = Classifier::new();
        c.insert("Ann", None, 1);
        c.insert("Bob", Some(""), 2);
        c.insert("Cy", Some("Dee"), 3);
        assert_eq!(c.label_of("Ann", ""), Some(&1));
        assert_eq!(c.label_of("Bob", ""), Some(&2));
        assert_eq!(c.label_of("Cy", "Dee"), Some(&3));
        assert_eq!(c.label_of("Cy", ""), None);
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn from_json_rows() {
        let json = br#"[
            {"name": "Ann", "label": "glasses"},
            {"name": "Bob", "creator": null, "label": 2},
            {"name": "Cy", "creator": "Dee", "label": true}
        ]"#;
        let c = Classifier::from_json(json).unwrap();
        assert_eq!(c.label_of("Ann", "").map(String::as_str), Some("glasses"));
        assert_eq!(c.label_of("Bob", "").map(String::as_str), Some("2"));
        assert_eq!(c.label_of("Cy", "Dee").map(String::as_str), Some("true"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Classifier::from_json(b"{\"name\": 1}").is_err());
    }
}
