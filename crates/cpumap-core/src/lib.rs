//! Core data model for synchronizing CPU model definitions.
//!
//! The pipeline moves data through three shapes:
//! - **Native records** ([`Value`], [`Record`]) lowered from the C initializer
//!   literals of the external project
//! - **CPU models** ([`CpuModel`]) produced by version expansion
//! - **Diagnostics** ([`Diagnostics`]) collected along the way for the caller
//!   to report
//!
//! Name translation ([`NameTranslator`]) and signature discovery
//! ([`SignatureLookup`]) are traits so the expansion step can be driven by
//! tables, fixtures, or an on-disk corpus.

pub mod diagnostics;
pub mod lookup;
pub mod model;
pub mod names;
pub mod value;

pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use lookup::{LookupError, NoSignatures, SignatureLookup};
pub use model::{CpuModel, Extra, ExtraKey, ExtraScope, Signature};
pub use names::{NameTranslator, QemuNames};
pub use value::{Record, Value};
