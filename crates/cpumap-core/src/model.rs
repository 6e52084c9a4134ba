//! Normalized CPU model entries.
//!
//! A [`CpuModel`] is either concrete (vendor, signature, feature set) or an
//! alias stub pointing at another model by name. Fields the expansion step
//! does not interpret are carried in [`Extra`] for operator inspection.

use std::collections::BTreeSet;
use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::value::Value;

/// A hardware identification triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signature {
    pub family: String,
    pub model: String,
    pub stepping: Option<String>,
}

impl Signature {
    /// A signature matching any stepping.
    pub fn new(family: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            model: model.into(),
            stepping: None,
        }
    }

    pub fn with_stepping(mut self, stepping: impl Into<String>) -> Self {
        self.stepping = Some(stepping.into());
        self
    }
}

/// Where an extra field came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExtraScope {
    /// A field of the base model definition.
    Model,
    /// A field of a version delta.
    Version,
    /// A version property whose value is neither `on` nor `off`.
    Property,
}

/// Key of an [`Extra`] entry.
///
/// Model and version fields keep their dotted path, so `.level` renders as
/// `model.level`. Properties render as `property.<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtraKey {
    pub scope: ExtraScope,
    pub field: String,
}

impl ExtraKey {
    pub fn model(field: impl Into<String>) -> Self {
        Self {
            scope: ExtraScope::Model,
            field: field.into(),
        }
    }

    pub fn version(field: impl Into<String>) -> Self {
        Self {
            scope: ExtraScope::Version,
            field: field.into(),
        }
    }

    pub fn property(name: impl Into<String>) -> Self {
        Self {
            scope: ExtraScope::Property,
            field: name.into(),
        }
    }
}

impl fmt::Display for ExtraKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope {
            ExtraScope::Model => write!(f, "model{}", self.field),
            ExtraScope::Version => write!(f, "version{}", self.field),
            ExtraScope::Property => write!(f, "property.{}", self.field),
        }
    }
}

/// Insertion-ordered bag of uninterpreted fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extra {
    entries: Vec<(ExtraKey, Value)>,
}

impl Extra {
    /// Insert a field; an existing key is overwritten in place.
    pub fn insert(&mut self, key: ExtraKey, value: Value) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &ExtraKey) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ExtraKey, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Extra {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(&key.to_string(), value)?;
        }
        map.end()
    }
}

/// A normalized CPU model entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CpuModel {
    /// Unique model name; also the published file identity.
    pub name: String,
    pub vendor: Option<String>,
    /// Capability tokens, kept sorted.
    pub features: BTreeSet<String>,
    /// Matching hardware signatures. Empty for alias entries.
    pub signature: Vec<Signature>,
    /// Name of the base model this entry was derived from.
    pub base: Option<String>,
    /// Name of the model this entry is equivalent to.
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Extra::is_empty")]
    pub extra: Extra,
}

impl CpuModel {
    /// An empty concrete entry.
    pub fn new(name: impl Into<String>, vendor: Option<String>) -> Self {
        Self {
            name: name.into(),
            vendor,
            features: BTreeSet::new(),
            signature: Vec::new(),
            base: None,
            alias: None,
            extra: Extra::default(),
        }
    }

    /// An alias stub carrying this entry's name, vendor, and base.
    pub fn alias_stub(&self, target: impl Into<String>) -> Self {
        Self {
            name: self.name.clone(),
            vendor: self.vendor.clone(),
            features: BTreeSet::new(),
            signature: Vec::new(),
            base: self.base.clone(),
            alias: Some(target.into()),
            extra: Extra::default(),
        }
    }

    pub fn is_alias(&self) -> bool {
        self.alias.is_some()
    }

    /// Whether this entry came from a version delta.
    pub fn is_derived(&self) -> bool {
        self.base.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_key_rendering() {
        assert_eq!(ExtraKey::model(".level").to_string(), "model.level");
        assert_eq!(ExtraKey::version(".note").to_string(), "version.note");
        assert_eq!(
            ExtraKey::property("model-id").to_string(),
            "property.model-id"
        );
    }

    #[test]
    fn extra_overwrites_in_place() {
        let mut extra = Extra::default();
        extra.insert(ExtraKey::model(".level"), "0xd".into());
        extra.insert(ExtraKey::property("stepping"), "1".into());
        extra.insert(ExtraKey::model(".level"), "0x14".into());

        assert_eq!(extra.len(), 2);
        let keys: Vec<String> = extra.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["model.level", "property.stepping"]);
        assert_eq!(
            extra.get(&ExtraKey::model(".level")),
            Some(&Value::from("0x14"))
        );
    }

    #[test]
    fn alias_stub_drops_payload() {
        let mut model = CpuModel::new("Skylake-Client-v2", Some("Intel".into()));
        model.base = Some("Skylake-Client".into());
        model.features.insert("avx2".into());
        model.signature.push(Signature::new("6", "94"));
        model.extra.insert(ExtraKey::version(".note"), "IBRS".into());

        let stub = model.alias_stub("Skylake-Client-IBRS");
        assert_eq!(stub.name, "Skylake-Client-v2");
        assert_eq!(stub.vendor.as_deref(), Some("Intel"));
        assert_eq!(stub.base.as_deref(), Some("Skylake-Client"));
        assert_eq!(stub.alias.as_deref(), Some("Skylake-Client-IBRS"));
        assert!(stub.features.is_empty());
        assert!(stub.signature.is_empty());
        assert!(stub.extra.is_empty());
        assert!(stub.is_alias());
        assert!(stub.is_derived());
    }

    #[test]
    fn extra_serializes_with_scoped_keys() {
        let mut model = CpuModel::new("qemu64", Some("AMD".into()));
        model.extra.insert(ExtraKey::model(".level"), "0xd".into());
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["extra"]["model.level"], "0xd");
    }
}
