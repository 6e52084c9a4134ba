//! Extraction of CPU model records from QEMU's C source.
//!
//! Extraction runs in three steps:
//! - **Preprocessing** ([`preprocess`]) cuts the definition array out of the
//!   source file and expands feature shorthand macros
//! - **Parsing** ([`grammar`]) turns the array body into a generic tree
//! - **Lowering** ([`lower`]) converts the tree into native [`Record`]s

pub mod error;
pub mod grammar;
pub mod lower;
pub mod preprocess;

use std::path::Path;

use cpumap_core::{Record, Value};
use tracing::debug;

pub use error::{ExtractError, Result};
pub use grammar::{Entry, Node};
pub use preprocess::{logical_lines, read_definitions, ExtractOptions, Shorthand};

/// Extract one record per element of the definition array in `source`.
pub fn extract_records(source: &str, options: &ExtractOptions) -> Result<Vec<Record>> {
    let body = read_definitions(source, options)?;
    let tree = grammar::parse(&body)?;

    let mut records = Vec::new();
    for (index, value) in lower::lower_top(&tree)?.into_iter().enumerate() {
        match value {
            Value::Map(record) => records.push(record),
            other => {
                return Err(ExtractError::UnexpectedShape {
                    index,
                    found: other.kind(),
                })
            }
        }
    }
    debug!(count = records.len(), "extracted model records");
    Ok(records)
}

/// Read `path` and extract its records.
pub fn load_records(path: &Path, options: &ExtractOptions) -> Result<Vec<Record>> {
    let source = std::fs::read_to_string(path)?;
    extract_records(&source, options)
}
