//! `cpumap parse` and `cpumap expand`: show intermediate pipeline stages.

use std::path::Path;

use anyhow::{Context, Result};
use cpumap_core::{CpuModel, Diagnostics, NoSignatures, QemuNames};
use cpumap_expand::expand_all;
use cpumap_publish::LocalCorpus;

use crate::config::SyncConfig;

/// Print the extracted model records as JSON.
pub fn parse(qemu_dir: &Path, config: &SyncConfig) -> Result<()> {
    let records = super::load_records(qemu_dir, config)?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

/// Print the expanded models, one line each or as JSON.
///
/// Published signatures are looked up only when `out_dir` is given.
pub fn expand(
    qemu_dir: &Path,
    out_dir: Option<&Path>,
    config: &SyncConfig,
    json: bool,
) -> Result<()> {
    let models = expand_models(qemu_dir, out_dir, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&models)?);
    } else {
        for model in &models {
            println!("{}", describe(model));
        }
    }
    Ok(())
}

fn expand_models(
    qemu_dir: &Path,
    out_dir: Option<&Path>,
    config: &SyncConfig,
) -> Result<Vec<CpuModel>> {
    let records = super::load_records(qemu_dir, config)?;
    let mut diagnostics = Diagnostics::new();

    let models = match out_dir {
        Some(dir) => {
            let corpus = LocalCorpus::new(dir.to_path_buf(), config.corpus_layout());
            expand_all(records, &QemuNames, &corpus, &mut diagnostics)
        }
        None => expand_all(records, &QemuNames, &NoSignatures, &mut diagnostics),
    }
    .context("expanding CPU models")?;

    super::report(&diagnostics);
    Ok(models)
}

fn describe(model: &CpuModel) -> String {
    match &model.alias {
        Some(alias) => format!("{} => {alias}", model.name),
        None => format!(
            "{} ({}, {} features)",
            model.name,
            model.vendor.as_deref().unwrap_or("unknown vendor"),
            model.features.len()
        ),
    }
}
