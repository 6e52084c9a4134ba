//! Expansion of QEMU CPU model records into libvirt-style model entries.
//!
//! Each record yields its base model followed by one entry per version
//! delta. See [`ModelExpander`] for the versioning and alias rules.

pub mod error;
pub mod expander;

pub use error::{ExpandError, Result};
pub use expander::{expand_all, ModelExpander};
