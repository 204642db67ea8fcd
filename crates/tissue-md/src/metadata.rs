//! Tagged front-matter values.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde_yaml::Value;

/// A single front-matter value.
///
/// YAML is loosely typed, so every value is sorted into one of a few shapes
/// up front and the indexer coerces from there.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    /// A string scalar
    Text(String),
    /// A boolean scalar
    Bool(bool),
    /// A numeric scalar, kept in its written form
    Number(String),
    /// A sequence made only of strings
    List(Vec<String>),
    /// An explicit `null` or an empty value
    Null,
    /// Anything else: mappings, mixed sequences
    Other(Value),
}

impl MetaValue {
    /// Text form of a scalar value. Lists, mappings and nulls have none.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(s) => Some(Cow::Borrowed(s.as_str())),
            Self::Bool(b) => Some(Cow::Owned(b.to_string())),
            Self::Number(n) => Some(Cow::Borrowed(n.as_str())),
            _ => None,
        }
    }

    /// Like [`MetaValue::as_text`], falling back to an empty string.
    pub fn to_text(&self) -> String {
        self.as_text().map(Cow::into_owned).unwrap_or_default()
    }

    /// Boolean form of the value. `null` reads as `false`; other shapes have
    /// no boolean form.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Null => Some(false),
            _ => None,
        }
    }

    /// Normalize into a list of strings.
    ///
    /// A single string becomes a one-element list. Anything that is neither
    /// a string nor a list of strings yields an empty list.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Self::Text(s) => vec![s.clone()],
            Self::List(items) => items.clone(),
            _ => Vec::new(),
        }
    }
}

impl From<Value> for MetaValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s),
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n.to_string()),
            Value::Null => Self::Null,
            Value::Sequence(items) => {
                let strings: Option<Vec<String>> =
                    items.iter().map(|i| i.as_str().map(str::to_owned)).collect();
                match strings {
                    Some(strings) => Self::List(strings),
                    None => Self::Other(Value::Sequence(items)),
                }
            }
            Value::Tagged(tagged) => Self::from(tagged.value),
            other => Self::Other(other),
        }
    }
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<bool> for MetaValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Front-matter of one document, keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    values: BTreeMap<String, MetaValue>,
}

impl Metadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.values.get(key)
    }

    /// Whether the key was declared at all, even with a `null` value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Declared keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetaValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<MetaValue>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Metadata::new();
        for (key, value) in iter {
            metadata.insert(key, value);
        }
        metadata
    }
}
