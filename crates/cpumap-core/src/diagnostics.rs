//! Advisory findings collected during a run.
//!
//! Fatal problems are returned as errors by each stage. Everything that
//! should be reported without stopping the run is pushed into a
//! [`Diagnostics`] collector instead; the caller picks the sink.

use std::fmt;

/// Category of an advisory finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A vendor identifier with no known translation.
    UnknownVendor,
    /// A feature token with no known translation; passed through verbatim.
    UnknownFeature,
    /// An output feature missing from the corpus' known-feature registry.
    UnknownPublishedFeature,
    /// The known-feature registry could not be read.
    FeatureRegistryUnavailable,
}

/// A single advisory finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// The offending name, or an error description for registry failures.
    pub subject: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::UnknownVendor => write!(f, "unknown vendor '{}'", self.subject),
            DiagnosticKind::UnknownFeature => write!(f, "unknown feature '{}'", self.subject),
            DiagnosticKind::UnknownPublishedFeature => {
                write!(f, "feature unknown to the corpus: {}", self.subject)
            }
            DiagnosticKind::FeatureRegistryUnavailable => {
                write!(f, "unable to read the known-feature registry: {}", self.subject)
            }
        }
    }
}

/// Ordered collection of [`Diagnostic`]s.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: DiagnosticKind, subject: impl Into<String>) {
        self.items.push(Diagnostic {
            kind,
            subject: subject.into(),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Diagnostics of one kind, in the order they were recorded.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(move |d| d.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_by_kind() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(DiagnosticKind::UnknownFeature, "CPUID_NEW");
        diagnostics.push(DiagnosticKind::UnknownVendor, "CPUID_VENDOR_ZHAOXIN");
        diagnostics.push(DiagnosticKind::UnknownFeature, "CPUID_NEWER");

        assert_eq!(diagnostics.len(), 3);
        let features: Vec<_> = diagnostics
            .of_kind(DiagnosticKind::UnknownFeature)
            .map(|d| d.subject.as_str())
            .collect();
        assert_eq!(features, vec!["CPUID_NEW", "CPUID_NEWER"]);
    }

    #[test]
    fn display_names_the_subject() {
        let diagnostic = Diagnostic {
            kind: DiagnosticKind::UnknownPublishedFeature,
            subject: "amx-complex".into(),
        };
        assert_eq!(
            diagnostic.to_string(),
            "feature unknown to the corpus: amx-complex"
        );
    }
}
