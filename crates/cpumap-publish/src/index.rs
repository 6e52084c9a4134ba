//! Index file patching.
//!
//! The index lists model files per vendor group:
//!
//! ```text
//! <cpus>
//!   <arch name='x86'>
//!     <group name='Intel CPU models'>
//!       <include filename='x86_Nehalem.xml'/>
//!     </group>
//!   </arch>
//! </cpus>
//! ```
//!
//! New files are spliced in as text so the rest of the file is left exactly
//! as it was.

use std::collections::BTreeMap;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

use crate::error::Result;
use crate::xml::attribute;

/// New file names per vendor, in the order they were written.
pub type IndexAdditions = BTreeMap<String, Vec<String>>;

/// Name of the index group holding a vendor's models.
pub fn group_name(vendor: &str) -> String {
    format!("{vendor} CPU models")
}

/// A vendor group directly under the selected `<arch>`.
struct GroupSlot {
    name: String,
    /// Byte offset just after the group's last child.
    insert_at: usize,
    /// Whitespace between the last child and `</group>`.
    closing_indent: String,
}

#[derive(Default)]
struct Frame {
    is_arch: bool,
    group: Option<String>,
    /// Offset and text of the whitespace run ending the content so far.
    trailing: Option<(usize, String)>,
}

fn find_groups(xml: &str, arch: &str) -> Result<Vec<GroupSlot>> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Frame> = Vec::new();
    let mut groups = Vec::new();

    loop {
        let offset = reader.buffer_position() as usize;
        let event = reader.read_event()?;
        let end = reader.buffer_position() as usize;

        match event {
            Event::Start(e) => {
                let parent_is_arch = stack.last().is_some_and(|f| f.is_arch);
                let mut frame = Frame::default();
                match e.name().as_ref() {
                    b"arch" => frame.is_arch = attribute(&e, "name")?.as_deref() == Some(arch),
                    b"group" if parent_is_arch => frame.group = attribute(&e, "name")?,
                    _ => {}
                }
                if let Some(parent) = stack.last_mut() {
                    parent.trailing = None;
                }
                stack.push(frame);
            }
            Event::End(_) => {
                if let Some(Frame {
                    group: Some(name),
                    trailing,
                    ..
                }) = stack.pop()
                {
                    let (insert_at, closing_indent) = trailing.unwrap_or((offset, String::new()));
                    groups.push(GroupSlot {
                        name,
                        insert_at,
                        closing_indent,
                    });
                }
                if let Some(parent) = stack.last_mut() {
                    parent.trailing = None;
                }
            }
            Event::Text(_) => {
                let raw = &xml[offset..end];
                if let Some(frame) = stack.last_mut() {
                    frame.trailing = raw
                        .chars()
                        .all(char::is_whitespace)
                        .then(|| (offset, raw.to_string()));
                }
            }
            Event::Eof => break,
            _ => {
                if let Some(frame) = stack.last_mut() {
                    frame.trailing = None;
                }
            }
        }
    }
    Ok(groups)
}

/// Append `<include>` entries for new files to the vendor groups of `arch`.
///
/// Each vendor's files go to the last group named `<vendor> CPU models`
/// directly under `<arch name='<arch>'>`, indented two spaces deeper than the
/// group's closing tag. Vendors without such a group are skipped.
pub fn update_index(xml: &str, arch: &str, additions: &IndexAdditions) -> Result<String> {
    let groups = find_groups(xml, arch)?;

    let mut splices: Vec<(usize, String)> = Vec::new();
    for (vendor, files) in additions {
        if files.is_empty() {
            continue;
        }
        let wanted = group_name(vendor);
        let Some(slot) = groups.iter().rev().find(|g| g.name == wanted) else {
            debug!(vendor = %vendor, "no index group for vendor");
            continue;
        };

        let indent = format!("{}  ", slot.closing_indent);
        let mut text = String::new();
        for file in files {
            text.push_str(&indent);
            text.push_str(&format!(
                "<include filename='{}'/>",
                quick_xml::escape::escape(file.as_str())
            ));
        }
        splices.push((slot.insert_at, text));
    }

    splices.sort_by(|a, b| b.0.cmp(&a.0));
    let mut out = xml.to_string();
    for (at, text) in splices {
        out.insert_str(at, &text);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = "\
<cpus>
  <arch name='x86'>
    <!-- vendor groups -->
    <group name='Intel CPU models'>
      <include filename='x86_486.xml'/>
    </group>
    <group name='AMD CPU models'>
      <include filename='x86_Opteron_G1.xml'/>
    </group>

    <group name='Intel CPU models'>
      <include filename=\"x86_Nehalem.xml\"/>
      <include filename='x86_Skylake-Client.xml'/>
    </group>
  </arch>
  <arch name='ppc64'>
    <group name='Intel CPU models'>
      <include filename='ppc64_POWER8.xml'/>
    </group>
  </arch>
</cpus>
";

    fn additions(entries: &[(&str, &[&str])]) -> IndexAdditions {
        entries
            .iter()
            .map(|(vendor, files)| {
                (
                    vendor.to_string(),
                    files.iter().map(|f| f.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn appends_to_last_matching_group() {
        let out = update_index(
            INDEX,
            "x86",
            &additions(&[("Intel", &["x86_Icelake-v2.xml", "x86_Icelake-v3.xml"])]),
        )
        .unwrap();

        let expected = INDEX.replace(
            "      <include filename='x86_Skylake-Client.xml'/>\n",
            "      <include filename='x86_Skylake-Client.xml'/>\n      \
<include filename='x86_Icelake-v2.xml'/>\n      \
<include filename='x86_Icelake-v3.xml'/>\n",
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn updates_each_vendor() {
        let out = update_index(
            INDEX,
            "x86",
            &additions(&[
                ("AMD", &["x86_EPYC-v4.xml"]),
                ("Intel", &["x86_Icelake-v2.xml"]),
            ]),
        )
        .unwrap();

        assert!(out.contains(
            "<include filename='x86_Opteron_G1.xml'/>\n      <include filename='x86_EPYC-v4.xml'/>\n    </group>"
        ));
        assert!(out.contains(
            "<include filename='x86_Skylake-Client.xml'/>\n      <include filename='x86_Icelake-v2.xml'/>\n    </group>"
        ));
        assert_eq!(out.matches("x86_Icelake-v2.xml").count(), 1);
    }

    #[test]
    fn other_arches_are_untouched() {
        let out = update_index(INDEX, "ppc64", &additions(&[("Intel", &["ppc64_POWER10.xml"])]))
            .unwrap();
        assert!(out.contains(
            "<include filename='ppc64_POWER8.xml'/>\n      <include filename='ppc64_POWER10.xml'/>\n    </group>\n  </arch>\n</cpus>"
        ));
        assert!(!out.contains("x86_Skylake-Client.xml'/>\n      <include filename='ppc64"));
    }

    #[test]
    fn unknown_vendor_is_skipped() {
        let out = update_index(INDEX, "x86", &additions(&[("Hygon", &["x86_Dhyana-v3.xml"])]))
            .unwrap();
        assert_eq!(out, INDEX);
    }

    #[test]
    fn nested_groups_do_not_count() {
        let xml = "\
<cpus>
  <arch name='x86'>
    <group name='Intel CPU models'>
      <include filename='x86_a.xml'/>
    </group>
    <extra>
      <group name='Intel CPU models'>
      </group>
    </extra>
  </arch>
</cpus>
";
        let out = update_index(xml, "x86", &additions(&[("Intel", &["x86_b.xml"])])).unwrap();
        assert!(out.contains(
            "<include filename='x86_a.xml'/>\n      <include filename='x86_b.xml'/>\n    </group>"
        ));
    }

    #[test]
    fn rejects_malformed_index() {
        assert!(update_index("<cpus><arch name='x86'></cpus>", "x86", &IndexAdditions::new()).is_err());
    }
}
