//! Native values lowered from C initializer literals.
//!
//! A [`Value`] is a string, an ordered sequence, or an ordered mapping. Keys
//! of a [`Record`] are the dotted field paths of the initializer
//! (`.name`, `.features[FEAT_1_EDX]`, `.versions`, ...).

use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A native value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Space-joined identifiers and string fragments.
    Str(String),
    /// Ordered sequence.
    List(Vec<Value>),
    /// Ordered mapping.
    Map(Record),
}

impl Value {
    /// Short name of the value kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Record> {
        match self {
            Value::Map(record) => Some(record),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(record) => {
                write!(f, "{{")?;
                for (i, (key, value)) in record.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(items) => items.serialize(serializer),
            Value::Map(record) => record.serialize(serializer),
        }
    }
}

/// An insertion-ordered mapping from field path to value.
///
/// Inserting an existing key replaces its value in place, keeping the
/// position of the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Remove every entry whose key starts with `prefix`, in order.
    pub fn remove_prefixed(&mut self, prefix: &str) -> Vec<(String, Value)> {
        let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|(k, _)| k.starts_with(prefix));
        self.entries = kept;
        taken
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_insert_replaces_in_place() {
        let mut record = Record::new();
        record.insert(".a", "1".into());
        record.insert(".b", "2".into());
        let old = record.insert(".a", "3".into());

        assert_eq!(old, Some(Value::from("1")));
        let keys: Vec<_> = record.keys().collect();
        assert_eq!(keys, vec![".a", ".b"]);
        assert_eq!(record.get(".a"), Some(&Value::from("3")));
    }

    #[test]
    fn remove_prefixed_keeps_order() {
        let mut record: Record = [
            (".name", Value::from("x")),
            (".features[FEAT_1_EDX]", Value::from("CPUID_FP87")),
            (".level", Value::from("0xd")),
            (".features[FEAT_1_ECX]", Value::from("CPUID_EXT_SSE3")),
        ]
        .into_iter()
        .collect();

        let taken = record.remove_prefixed(".features");
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[0].0, ".features[FEAT_1_EDX]");
        assert_eq!(taken[1].0, ".features[FEAT_1_ECX]");
        let keys: Vec<_> = record.keys().collect();
        assert_eq!(keys, vec![".name", ".level"]);
    }

    #[test]
    fn display_nests() {
        let mut inner = Record::new();
        inner.insert(".version", "2".into());
        let value = Value::List(vec![Value::from("a"), Value::Map(inner)]);
        assert_eq!(value.to_string(), "[a, {.version: 2}]");
    }

    #[test]
    fn serializes_in_insertion_order() {
        let record: Record = [(".z", Value::from("1")), (".a", Value::from("2"))]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&Value::Map(record)).unwrap();
        assert_eq!(json, r#"{".z":"1",".a":"2"}"#);
    }
}
