//! Corpus backend trait and local filesystem implementation.
//!
//! The `Corpus` trait abstracts over where published model files live. The
//! `LocalCorpus` works on a libvirt-style `cpu_map` directory.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use cpumap_core::{CpuModel, LookupError, Signature, SignatureLookup};
use tracing::{debug, info};

use crate::error::{PublishError, Result};
use crate::index::{update_index, IndexAdditions};
use crate::xml::{read_feature_names, read_signatures, render_extra, render_model};

/// File naming within a corpus directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusLayout {
    /// Architecture selected in the index (`<arch name='..'>`).
    pub arch: String,
    /// Prefix of every model file name.
    pub file_prefix: String,
    /// Index file name.
    pub index_file: String,
    /// Known-feature registry file name.
    pub features_file: String,
}

impl Default for CorpusLayout {
    fn default() -> Self {
        Self {
            arch: "x86".into(),
            file_prefix: "x86_".into(),
            index_file: "index.xml".into(),
            features_file: "x86_features.xml".into(),
        }
    }
}

/// Abstract published corpus.
pub trait Corpus {
    /// File name under which a model is published.
    fn file_name(&self, model: &str) -> String;

    /// Check whether a model has already been published.
    fn exists(&self, model: &CpuModel) -> Result<bool>;

    /// Publish a model.
    fn write(&self, model: &CpuModel) -> Result<()>;

    /// Add newly published files to the index.
    fn update_index(&self, additions: &IndexAdditions) -> Result<()>;

    /// Names of every feature the corpus knows about.
    fn known_features(&self) -> Result<BTreeSet<String>>;
}

/// A corpus directory on the local filesystem.
///
/// Layout:
/// ```text
/// <root>/
///   index.xml
///   x86_features.xml
///   x86_<model>.xml
///   x86_<model>.extra      (operator notes, never committed)
/// ```
#[derive(Debug, Clone)]
pub struct LocalCorpus {
    root: PathBuf,
    layout: CorpusLayout,
}

impl LocalCorpus {
    pub fn new(root: PathBuf, layout: CorpusLayout) -> Self {
        LocalCorpus { root, layout }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layout(&self) -> &CorpusLayout {
        &self.layout
    }

    fn model_path(&self, model: &str) -> PathBuf {
        self.root.join(self.file_name(model))
    }

    fn extra_path(&self, model: &str) -> PathBuf {
        self.root
            .join(format!("{}{model}.extra", self.layout.file_prefix))
    }

    fn read(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| PublishError::io(path, e))
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        std::fs::write(path, contents).map_err(|e| PublishError::io(path, e))
    }
}

impl Corpus for LocalCorpus {
    fn file_name(&self, model: &str) -> String {
        format!("{}{model}.xml", self.layout.file_prefix)
    }

    fn exists(&self, model: &CpuModel) -> Result<bool> {
        let path = self.model_path(&model.name);
        path.try_exists().map_err(|e| PublishError::io(&path, e))
    }

    fn write(&self, model: &CpuModel) -> Result<()> {
        if let Some(extra) = render_extra(model) {
            self.write_file(&self.extra_path(&model.name), &extra)?;
        }
        let path = self.model_path(&model.name);
        self.write_file(&path, &render_model(model))?;
        info!(file = %path.display(), "wrote model");
        Ok(())
    }

    fn update_index(&self, additions: &IndexAdditions) -> Result<()> {
        let path = self.root.join(&self.layout.index_file);
        let current = self.read(&path)?;
        let updated = update_index(&current, &self.layout.arch, additions)?;
        if updated != current {
            self.write_file(&path, &updated)?;
            info!(file = %path.display(), "updated index");
        }
        Ok(())
    }

    fn known_features(&self) -> Result<BTreeSet<String>> {
        let path = self.root.join(&self.layout.features_file);
        read_feature_names(&self.read(&path)?)
    }
}

impl SignatureLookup for LocalCorpus {
    fn signature(&self, model: &str) -> std::result::Result<Option<Vec<Signature>>, LookupError> {
        let path = self.model_path(model);
        if !path.is_file() {
            debug!(model, "no published model file");
            return Ok(None);
        }

        let lookup_error = |e: PublishError| LookupError {
            model: model.to_string(),
            detail: e.to_string(),
        };
        let xml = self.read(&path).map_err(lookup_error)?;
        let signatures = read_signatures(&xml).map_err(lookup_error)?;
        Ok((!signatures.is_empty()).then_some(signatures))
    }
}
