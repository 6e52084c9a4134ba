//! Expansion of one model record into its published entries.
//!
//! A record describes a base model plus an ordered list of version deltas.
//! The base entry is yielded first. Each delta is then applied to a copy of
//! the entry produced by the previous delta and yields either a concrete
//! entry named `<base>-v<N>`, or an alias stub of that name followed, for
//! N > 1, by the concrete entry renamed to the alias target.
//!
//! A version 1 delta without an alias is folded into the base entry: it
//! yields nothing of its own, and the signature published for the base
//! model, if any, replaces the one derived from the record.

use std::collections::{BTreeSet, VecDeque};
use std::vec;

use cpumap_core::{
    CpuModel, Diagnostics, ExtraKey, NameTranslator, Record, Signature, SignatureLookup, Value,
};
use tracing::debug;

use crate::error::{ExpandError, Result};

/// Property names that are carried as-is instead of being translated.
const PLAIN_PROPERTIES: &[&str] = &["model-id", "stepping", "model"];

/// Lazily expands one model record.
///
/// Yields `Ok` entries in order. After the first `Err` the iterator is
/// exhausted.
pub struct ModelExpander<'a> {
    names: &'a dyn NameTranslator,
    diagnostics: &'a mut Diagnostics,
    base_name: String,
    /// The entry the next version delta is applied to.
    current: CpuModel,
    versions: vec::IntoIter<Record>,
    seen: BTreeSet<u64>,
    pending: VecDeque<CpuModel>,
    failed: bool,
}

impl<'a> ModelExpander<'a> {
    /// Build the base entry of `record`.
    ///
    /// `lookup` is consulted only when a version 1 delta without an alias is
    /// present.
    pub fn new(
        mut record: Record,
        names: &'a dyn NameTranslator,
        lookup: &dyn SignatureLookup,
        diagnostics: &'a mut Diagnostics,
    ) -> Result<Self> {
        let name = take_string(&mut record, ".name", None)?;
        let raw_vendor = take_string(&mut record, ".vendor", Some(&name))?;
        let vendor = names.vendor(&raw_vendor, diagnostics);
        let mut base = CpuModel::new(name.clone(), Some(vendor));

        if record.contains_key(".family") && record.contains_key(".model") {
            let family = take_string(&mut record, ".family", Some(&name))?;
            let model = take_string(&mut record, ".model", Some(&name))?;
            base.signature.push(Signature::new(family, model));
        }

        for (field, value) in record.remove_prefixed(".features") {
            let Value::Str(tokens) = value else {
                return Err(shape(&name, &field, "string", &value));
            };
            for token in tokens.split_whitespace() {
                if let Some(feature) = names.feature(token, diagnostics) {
                    base.features.insert(feature);
                }
            }
        }

        let versions = match record.remove(".versions") {
            Some(Value::List(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::Map(version) => Ok(version),
                    other => Err(shape(&name, ".versions", "map", &other)),
                })
                .collect::<Result<Vec<_>>>()?,
            Some(other) => return Err(shape(&name, ".versions", "list", &other)),
            None => Vec::new(),
        };

        for (field, value) in record {
            base.extra.insert(ExtraKey::model(field), value);
        }

        if versions.iter().any(folds_into_base) {
            if let Some(signature) = lookup.signature(&name)? {
                if !signature.is_empty() {
                    debug!(model = %name, "using published signature");
                    base.signature = signature;
                }
            }
        }

        debug!(
            model = %name,
            features = base.features.len(),
            versions = versions.len(),
            "expanded base model"
        );

        Ok(Self {
            names,
            diagnostics,
            base_name: name,
            pending: VecDeque::from([base.clone()]),
            current: base,
            versions: versions.into_iter(),
            seen: BTreeSet::new(),
            failed: false,
        })
    }

    fn expand_version(&mut self, mut version: Record) -> Result<()> {
        let number = self.version_number(&mut version)?;

        let mut entry = self.current.clone();
        entry.name = format!("{}-v{number}", self.base_name);
        entry.base = Some(self.base_name.clone());

        let alias = match version.remove(".alias") {
            Some(Value::Str(alias)) => Some(alias),
            Some(other) => return Err(shape(&self.base_name, ".alias", "string", &other)),
            None => None,
        };

        match version.remove(".props") {
            Some(Value::List(props)) => self.apply_properties(&mut entry, number, props)?,
            Some(other) => return Err(shape(&self.base_name, ".props", "list", &other)),
            None => {}
        }

        for (field, value) in version {
            entry.extra.insert(ExtraKey::version(field), value);
        }

        match alias {
            Some(target) => {
                debug!(model = %entry.name, alias = %target, "expanded alias version");
                self.pending.push_back(entry.alias_stub(target.clone()));
                if number != 1 {
                    entry.name = target;
                    self.pending.push_back(entry.clone());
                }
            }
            None if number == 1 => {
                debug!(model = %self.base_name, "version 1 folded into base model");
            }
            None => {
                debug!(
                    model = %entry.name,
                    features = entry.features.len(),
                    "expanded version"
                );
                self.pending.push_back(entry.clone());
            }
        }

        self.current = entry;
        Ok(())
    }

    fn version_number(&mut self, version: &mut Record) -> Result<u64> {
        let raw = match version.remove(".version") {
            Some(Value::Str(raw)) => raw,
            Some(other) => return Err(shape(&self.base_name, ".version", "string", &other)),
            None => {
                return Err(ExpandError::MissingField {
                    field: ".version",
                    model: Some(self.base_name.clone()),
                })
            }
        };
        let number: u64 = raw.trim().parse().map_err(|_| ExpandError::InvalidVersion {
            model: self.base_name.clone(),
            value: raw.clone(),
        })?;
        if !self.seen.insert(number) {
            return Err(ExpandError::DuplicateVersion {
                model: self.base_name.clone(),
                version: number,
            });
        }
        Ok(number)
    }

    /// Apply `{ "name", "value" }` properties in declaration order.
    fn apply_properties(
        &mut self,
        entry: &mut CpuModel,
        version: u64,
        props: Vec<Value>,
    ) -> Result<()> {
        for (index, prop) in props.into_iter().enumerate() {
            let malformed = || ExpandError::MalformedProperty {
                model: self.base_name.clone(),
                version,
                index,
            };
            let Value::List(pair) = prop else {
                return Err(malformed());
            };
            let Ok([Value::Str(key), Value::Str(value)]) = <[Value; 2]>::try_from(pair) else {
                return Err(malformed());
            };

            let feature = if PLAIN_PROPERTIES.contains(&key.as_str()) {
                key
            } else {
                match self.names.feature(&key, self.diagnostics) {
                    Some(feature) => feature,
                    None => continue,
                }
            };

            match value.as_str() {
                "on" => {
                    entry.features.insert(feature);
                }
                "off" => {
                    entry.features.remove(&feature);
                }
                _ => entry
                    .extra
                    .insert(ExtraKey::property(feature), Value::Str(value)),
            }
        }
        Ok(())
    }
}

impl Iterator for ModelExpander<'_> {
    type Item = Result<CpuModel>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(model) = self.pending.pop_front() {
                return Some(Ok(model));
            }
            let version = self.versions.next()?;
            if let Err(e) = self.expand_version(version) {
                self.failed = true;
                return Some(Err(e));
            }
        }
    }
}

/// Expand every record, rejecting entries whose names collide.
pub fn expand_all(
    records: Vec<Record>,
    names: &dyn NameTranslator,
    lookup: &dyn SignatureLookup,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<CpuModel>> {
    let mut models = Vec::new();
    let mut seen = BTreeSet::new();

    for record in records {
        for model in ModelExpander::new(record, names, lookup, diagnostics)? {
            let model = model?;
            if !seen.insert(model.name.clone()) {
                return Err(ExpandError::DuplicateModel { name: model.name });
            }
            models.push(model);
        }
    }
    Ok(models)
}

/// Whether a version delta is version 1 without an alias.
fn folds_into_base(version: &Record) -> bool {
    !version.contains_key(".alias")
        && version
            .get(".version")
            .and_then(Value::as_str)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            == Some(1)
}

fn take_string(record: &mut Record, field: &'static str, model: Option<&str>) -> Result<String> {
    match record.remove(field) {
        Some(Value::Str(value)) => Ok(value),
        Some(other) => Err(shape(model.unwrap_or("<unnamed>"), field, "string", &other)),
        None => Err(ExpandError::MissingField {
            field,
            model: model.map(str::to_string),
        }),
    }
}

fn shape(model: &str, field: &str, expected: &'static str, found: &Value) -> ExpandError {
    ExpandError::UnexpectedShape {
        model: model.to_string(),
        field: field.to_string(),
        expected,
        found: found.kind(),
    }
}
