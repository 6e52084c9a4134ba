//! Publication of expanded CPU models into a libvirt-style `cpu_map` corpus.
//!
//! Handles existence checks, model file and operator note rendering, index
//! patching, signature lookup, and the known-feature check against the
//! corpus' feature registry.
//!
//! Published model files are never rewritten: the corpus is append-only.

pub mod corpus;
pub mod error;
pub mod index;
pub mod reconcile;
pub mod xml;

pub use corpus::{Corpus, CorpusLayout, LocalCorpus};
pub use error::{PublishError, Result};
pub use index::{group_name, update_index, IndexAdditions};
pub use reconcile::{check_published_features, reconcile, ReconcileOptions, ReconcileReport};
pub use xml::{read_feature_names, read_signatures, render_extra, render_model};
