//! Source fields: ordered name/value mapping and field definitions

use crate::error::{Error, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// An ordered mapping of source field names to string values.
///
/// Iteration order is first-insertion order. Inserting a name that already
/// exists overwrites the earlier value in place; this is the precedence rule
/// used when merging two sources (later source wins).
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
    index: AHashMap<String, usize>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, overwriting any earlier value for the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.index.get(&name) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, value));
            }
        }
    }

    /// Look up a field value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.index.get(name).map(|&i| self.entries[i].1.as_str())
    }

    /// Merge another map into this one; the other map's values win on
    /// name collisions.
    pub fn merge(&mut self, other: &FieldMap) {
        for (name, value) in other.iter() {
            self.insert(name, value);
        }
    }

    /// Iterate over (name, value) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for FieldMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut map = FieldMap::new();
        for (n, v) in iter {
            map.insert(n, v);
        }
        map
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for FieldMap {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        let mut map = FieldMap::new();
        for (n, v) in iter {
            map.insert(n, v);
        }
        map
    }
}

/// What kind of value a defined field accepts.
///
/// One variant per field kind, each carrying only the data its kind needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Free text, no constraints beyond being non-empty.
    PlainText,
    /// Text with a maximum length.
    ValidatedText { max_length: usize },
    /// A date in DD/MM/YY form (separators `/`, `-`, `.` accepted), with a
    /// default applied when the value is empty.
    DefaultedDate { default: String },
    /// An integer within an inclusive range.
    BoundedInteger { min: i64, max: i64 },
}

/// Definition of a single collectable field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self { name: name.into(), kind }
    }

    /// Validate a supplied value against this definition.
    ///
    /// Returns the value to store: for a `DefaultedDate` with an empty input
    /// this is the default, otherwise the trimmed input.
    pub fn validate(&self, value: &str) -> Result<String> {
        let value = value.trim();
        match &self.kind {
            FieldKind::PlainText => {
                if value.is_empty() {
                    return Err(self.invalid("value cannot be empty"));
                }
                Ok(value.to_string())
            }
            FieldKind::ValidatedText { max_length } => {
                if value.is_empty() {
                    return Err(self.invalid("value cannot be empty"));
                }
                if value.chars().count() > *max_length {
                    return Err(self.invalid(&format!("value exceeds {max_length} characters")));
                }
                Ok(value.to_string())
            }
            FieldKind::DefaultedDate { default } => {
                if value.is_empty() {
                    return Ok(default.clone());
                }
                if is_short_date(value) {
                    Ok(value.to_string())
                } else {
                    Err(self.invalid("expected DD/MM/YY date"))
                }
            }
            FieldKind::BoundedInteger { min, max } => {
                let n: i64 = value
                    .parse()
                    .map_err(|_| self.invalid("expected an integer"))?;
                if n < *min || n > *max {
                    return Err(self.invalid(&format!("must be between {min} and {max}")));
                }
                Ok(n.to_string())
            }
        }
    }

    fn invalid(&self, reason: &str) -> Error {
        Error::FieldValidation {
            field: self.name.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Check for a DD/MM/YY date with `/`, `-` or `.` separators.
fn is_short_date(s: &str) -> bool {
    let sep = match s.chars().find(|c| ['/', '-', '.'].contains(c)) {
        Some(c) => c,
        None => return false,
    };
    let parts: Vec<&str> = s.split(sep).collect();
    if parts.len() != 3 {
        return false;
    }
    let nums: Option<Vec<u32>> = parts.iter().map(|p| p.parse().ok()).collect();
    match nums {
        Some(n) => (1..=31).contains(&n[0]) && (1..=12).contains(&n[1]) && n[2] <= 99,
        None => false,
    }
}
