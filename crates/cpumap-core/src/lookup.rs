//! Discovery of previously published signatures.

use crate::model::Signature;

/// Failure to read a published signature.
#[derive(Debug, thiserror::Error)]
#[error("signature lookup for '{model}' failed: {detail}")]
pub struct LookupError {
    /// Model whose signature was requested.
    pub model: String,
    pub detail: String,
}

/// Source of signatures already published for a model.
pub trait SignatureLookup {
    /// Signatures published for `model`, or `None` when nothing is known.
    fn signature(&self, model: &str) -> Result<Option<Vec<Signature>>, LookupError>;
}

/// A lookup that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSignatures;

impl SignatureLookup for NoSignatures {
    fn signature(&self, _model: &str) -> Result<Option<Vec<Signature>>, LookupError> {
        Ok(None)
    }
}
