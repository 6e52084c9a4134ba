//! Model file rendering and corpus file readers.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use cpumap_core::{CpuModel, Signature};
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{PublishError, Result};

/// First line of every operator notes file.
pub const EXTRA_HEADER: &str = "# THIS FILE SHOULD NEVER BE ADDED TO A COMMIT";

/// Render a model file.
///
/// Derived entries are not guest-decodable. Alias entries carry only the
/// alias target; concrete entries carry their signatures and vendor.
pub fn render_model(model: &CpuModel) -> String {
    let decode = if model.is_derived() { "off" } else { "on" };

    let mut out = String::new();
    out.push_str("<cpus>\n");
    let _ = writeln!(out, "  <model name='{}'>", escape(model.name.as_str()));
    let _ = writeln!(out, "    <decode host='on' guest='{decode}'/>");

    match &model.alias {
        Some(alias) => {
            let _ = writeln!(out, "    <model name='{}'/>", escape(alias.as_str()));
        }
        None => {
            for signature in &model.signature {
                let _ = write!(
                    out,
                    "    <signature family='{}' model='{}'",
                    escape(signature.family.as_str()),
                    escape(signature.model.as_str())
                );
                if let Some(stepping) = &signature.stepping {
                    let _ = write!(out, " stepping='{}'", escape(stepping.as_str()));
                }
                out.push_str("/>\n");
            }
            if let Some(vendor) = &model.vendor {
                let _ = writeln!(out, "    <vendor name='{}'/>", escape(vendor.as_str()));
            }
        }
    }

    for feature in &model.features {
        let _ = writeln!(out, "    <feature name='{}'/>", escape(feature.as_str()));
    }
    out.push_str("  </model>\n");
    out.push_str("</cpus>\n");
    out
}

/// Render the operator notes for a model, if it has any extra fields.
pub fn render_extra(model: &CpuModel) -> Option<String> {
    if model.extra.is_empty() {
        return None;
    }
    let mut out = format!("{EXTRA_HEADER}\nextra info from qemu:\n");
    for (key, value) in model.extra.iter() {
        let _ = writeln!(out, "  {key}: {value}");
    }
    Some(out)
}

/// Read every `<signature>` element of a model file, in document order.
pub fn read_signatures(xml: &str) -> Result<Vec<Signature>> {
    let mut reader = Reader::from_str(xml);
    let mut signatures = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"signature" => {
                let family = required(&e, "signature", "family")?;
                let model = required(&e, "signature", "model")?;
                let mut signature = Signature::new(family, model);
                signature.stepping = attribute(&e, "stepping")?;
                signatures.push(signature);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(signatures)
}

/// Collect the `name` of every `<feature>` element of a feature registry.
pub fn read_feature_names(xml: &str) -> Result<BTreeSet<String>> {
    let mut reader = Reader::from_str(xml);
    let mut names = BTreeSet::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"feature" => {
                names.insert(required(&e, "feature", "name")?);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(names)
}

/// Value of an attribute, unescaped.
pub(crate) fn attribute(element: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    match element.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn required(
    element: &BytesStart<'_>,
    element_name: &'static str,
    name: &'static str,
) -> Result<String> {
    attribute(element, name)?.ok_or(PublishError::MissingAttribute {
        element: element_name,
        attribute: name,
    })
}
