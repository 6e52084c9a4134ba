//! Reconciliation of expanded models against the published corpus.
//!
//! Published model files are append-only: a model whose file already exists
//! is skipped without being compared or rewritten.

use std::collections::BTreeSet;

use cpumap_core::{CpuModel, DiagnosticKind, Diagnostics};
use tracing::debug;

use crate::corpus::Corpus;
use crate::error::Result;
use crate::index::IndexAdditions;

/// Options for [`reconcile`].
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    /// Compute the outcome without writing anything.
    pub dry_run: bool,
}

/// Outcome of a reconciliation run.
#[derive(Debug, Clone, Default)]
pub struct ReconcileReport {
    /// Files written, or that would be written in a dry run.
    pub written: Vec<String>,
    /// Files that already existed.
    pub skipped: Vec<String>,
    /// New files per vendor, as handed to the index update.
    pub additions: IndexAdditions,
}

/// Publish every model that is not in the corpus yet, then update the index.
pub fn reconcile(
    models: &[CpuModel],
    corpus: &dyn Corpus,
    options: &ReconcileOptions,
) -> Result<ReconcileReport> {
    let mut report = ReconcileReport::default();

    for model in models {
        let file = corpus.file_name(&model.name);
        if corpus.exists(model)? {
            debug!(file = %file, "already published, skipping");
            report.skipped.push(file);
            continue;
        }

        if !options.dry_run {
            corpus.write(model)?;
        }
        if let Some(vendor) = &model.vendor {
            report
                .additions
                .entry(vendor.clone())
                .or_default()
                .push(file.clone());
        }
        report.written.push(file);
    }

    if !options.dry_run && !report.additions.is_empty() {
        corpus.update_index(&report.additions)?;
    }
    Ok(report)
}

/// Report features of `models` that the corpus' feature registry lacks.
///
/// An unreadable registry is reported as a diagnostic, not an error.
pub fn check_published_features(
    models: &[CpuModel],
    corpus: &dyn Corpus,
    diagnostics: &mut Diagnostics,
) {
    let features: BTreeSet<&str> = models
        .iter()
        .flat_map(|m| m.features.iter().map(String::as_str))
        .collect();

    match corpus.known_features() {
        Ok(known) => {
            for feature in features {
                if !known.contains(feature) {
                    diagnostics.push(DiagnosticKind::UnknownPublishedFeature, feature);
                }
            }
        }
        Err(e) => diagnostics.push(DiagnosticKind::FeatureRegistryUnavailable, e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::corpus::{CorpusLayout, LocalCorpus};

    const INDEX: &str = "\
<cpus>
  <arch name='x86'>
    <group name='Intel CPU models'>
      <include filename='x86_486.xml'/>
    </group>
    <group name='AMD CPU models'>
      <include filename='x86_Opteron_G1.xml'/>
    </group>
  </arch>
</cpus>
";

    const FEATURES: &str = "\
<cpus>
  <feature name='fpu'/>
  <feature name='sse2'/>
</cpus>
";

    fn model(name: &str, vendor: &str, features: &[&str]) -> CpuModel {
        let mut model = CpuModel::new(name, Some(vendor.to_string()));
        model.features = features.iter().map(|f| f.to_string()).collect();
        model
    }

    fn corpus(root: &Path) -> LocalCorpus {
        std::fs::write(root.join("index.xml"), INDEX).unwrap();
        std::fs::write(root.join("x86_features.xml"), FEATURES).unwrap();
        LocalCorpus::new(root.to_path_buf(), CorpusLayout::default())
    }

    fn models() -> Vec<CpuModel> {
        vec![
            model("Nehalem", "Intel", &["fpu", "sse2"]),
            model("EPYC", "AMD", &["fpu", "sse4a"]),
            model("Nehalem-IBRS", "Intel", &["fpu", "spec-ctrl"]),
        ]
    }

    #[test]
    fn writes_new_models_and_indexes_them() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = corpus(dir.path());

        let report = reconcile(&models(), &corpus, &ReconcileOptions::default()).unwrap();
        assert_eq!(
            report.written,
            vec!["x86_Nehalem.xml", "x86_EPYC.xml", "x86_Nehalem-IBRS.xml"]
        );
        assert!(report.skipped.is_empty());
        assert_eq!(
            report.additions["Intel"],
            vec!["x86_Nehalem.xml", "x86_Nehalem-IBRS.xml"]
        );

        let index = std::fs::read_to_string(dir.path().join("index.xml")).unwrap();
        assert!(index.contains(
            "<include filename='x86_486.xml'/>\n      <include filename='x86_Nehalem.xml'/>\n      <include filename='x86_Nehalem-IBRS.xml'/>\n    </group>"
        ));
        assert!(index.contains(
            "<include filename='x86_Opteron_G1.xml'/>\n      <include filename='x86_EPYC.xml'/>\n    </group>"
        ));
    }

    #[test]
    fn existing_files_are_never_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = corpus(dir.path());
        let published = "<cpus>\n  <model name='Nehalem'/>\n</cpus>\n";
        std::fs::write(dir.path().join("x86_Nehalem.xml"), published).unwrap();

        let report = reconcile(&models(), &corpus, &ReconcileOptions::default()).unwrap();
        assert_eq!(report.skipped, vec!["x86_Nehalem.xml"]);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("x86_Nehalem.xml")).unwrap(),
            published
        );
        let index = std::fs::read_to_string(dir.path().join("index.xml")).unwrap();
        assert!(!index.contains("x86_Nehalem.xml"));
    }

    #[test]
    fn second_run_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = corpus(dir.path());
        reconcile(&models(), &corpus, &ReconcileOptions::default()).unwrap();
        let index = std::fs::read_to_string(dir.path().join("index.xml")).unwrap();

        let report = reconcile(&models(), &corpus, &ReconcileOptions::default()).unwrap();
        assert!(report.written.is_empty());
        assert_eq!(report.skipped.len(), 3);
        assert!(report.additions.is_empty());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("index.xml")).unwrap(),
            index
        );
    }

    #[test]
    fn dry_run_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = corpus(dir.path());

        let options = ReconcileOptions { dry_run: true };
        let report = reconcile(&models(), &corpus, &options).unwrap();
        assert_eq!(report.written.len(), 3);
        assert!(!dir.path().join("x86_Nehalem.xml").exists());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("index.xml")).unwrap(),
            INDEX
        );
    }

    #[test]
    fn reports_unknown_features_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = corpus(dir.path());
        let mut diagnostics = Diagnostics::new();

        check_published_features(&models(), &corpus, &mut diagnostics);
        let unknown: Vec<_> = diagnostics
            .of_kind(DiagnosticKind::UnknownPublishedFeature)
            .map(|d| d.subject.as_str())
            .collect();
        assert_eq!(unknown, vec!["spec-ctrl", "sse4a"]);
    }

    #[test]
    fn unreadable_registry_is_advisory() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = LocalCorpus::new(dir.path().to_path_buf(), CorpusLayout::default());
        let mut diagnostics = Diagnostics::new();

        check_published_features(&models(), &corpus, &mut diagnostics);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.iter().next().unwrap().kind,
            DiagnosticKind::FeatureRegistryUnavailable
        );
    }
}
