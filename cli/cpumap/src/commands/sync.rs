//! `cpumap sync`: publish the CPU models that are new in QEMU.

use std::path::Path;

use anyhow::{Context, Result};
use cpumap_core::{Diagnostics, QemuNames};
use cpumap_expand::expand_all;
use cpumap_publish::{check_published_features, reconcile, LocalCorpus, ReconcileOptions};

use crate::config::SyncConfig;

/// Extract, expand and reconcile the models of `qemu_dir` against `out_dir`.
pub fn run(qemu_dir: &Path, out_dir: &Path, config: &SyncConfig, dry_run: bool) -> Result<()> {
    let out_dir = out_dir
        .canonicalize()
        .with_context(|| format!("output directory not found: {}", out_dir.display()))?;
    let records = super::load_records(qemu_dir, config)?;

    let corpus = LocalCorpus::new(out_dir, config.corpus_layout());
    let mut diagnostics = Diagnostics::new();
    let models =
        expand_all(records, &QemuNames, &corpus, &mut diagnostics).context("expanding CPU models")?;

    let report = reconcile(&models, &corpus, &ReconcileOptions { dry_run })
        .with_context(|| format!("publishing into {}", corpus.root().display()))?;
    check_published_features(&models, &corpus, &mut diagnostics);

    if dry_run {
        for file in &report.written {
            println!("would write {file}");
        }
    }
    println!(
        "{} new model(s), {} already published",
        report.written.len(),
        report.skipped.len()
    );

    super::report(&diagnostics);
    Ok(())
}
