//! `cpumap.toml` configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cpumap_extract::ExtractOptions;
use cpumap_publish::CorpusLayout;
use serde::{Deserialize, Serialize};

/// Configuration file name searched for when `--config` is not given.
pub const CONFIG_FILE: &str = "cpumap.toml";

/// The top-level configuration. Every section and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Where the CPU definitions live in the QEMU tree.
    #[serde(default)]
    pub source: SourceConfig,
    /// Naming of the published corpus.
    #[serde(default)]
    pub corpus: CorpusConfig,
}

/// Source section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SourceConfig {
    /// CPU definition file, relative to the QEMU source root.
    pub path: PathBuf,
    /// Element type of the definition array.
    pub struct_type: String,
    /// Name of the definition array.
    pub array: String,
    /// Prefix of shorthand macros that are never expanded.
    pub excluded_prefix: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        let options = ExtractOptions::default();
        Self {
            path: PathBuf::from("target/i386/cpu.c"),
            struct_type: options.struct_type,
            array: options.array_name,
            excluded_prefix: options.excluded_prefix,
        }
    }
}

/// Corpus section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CorpusConfig {
    pub arch: String,
    pub file_prefix: String,
    pub index: String,
    /// Known-feature registry.
    pub features: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        let layout = CorpusLayout::default();
        Self {
            arch: layout.arch,
            file_prefix: layout.file_prefix,
            index: layout.index_file,
            features: layout.features_file,
        }
    }
}

impl SyncConfig {
    /// Search upward from `start_dir` for a `cpumap.toml` file, parse and
    /// return it along with its path.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let config = Self::load(&candidate)?;
                return Ok(Some((config, candidate)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse a configuration from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing cpumap.toml")
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            struct_type: self.source.struct_type.clone(),
            array_name: self.source.array.clone(),
            excluded_prefix: self.source.excluded_prefix.clone(),
        }
    }

    pub fn corpus_layout(&self) -> CorpusLayout {
        CorpusLayout {
            arch: self.corpus.arch.clone(),
            file_prefix: self.corpus.file_prefix.clone(),
            index_file: self.corpus.index.clone(),
            features_file: self.corpus.features.clone(),
        }
    }
}
