//! Lowering of the syntax tree into native [`Value`]s.
//!
//! Empty initializers (`{}`, `""`) lower to nothing. Nothing is dropped
//! from lists and map entries whose value is nothing are omitted, so
//! `{ /* end of list */ }` sentinels disappear.

use cpumap_core::{Record, Value};

use crate::error::{ExtractError, Result};
use crate::grammar::Node;

/// Lower a single node. `None` means the node carries no value.
pub fn lower(node: &Node) -> Result<Option<Value>> {
    match node {
        Node::Empty => Ok(None),
        Node::Text(parts) if parts.is_empty() => Ok(None),
        Node::Text(parts) => Ok(Some(Value::Str(parts.join(" ")))),
        Node::List(items) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                if let Some(value) = lower(item)? {
                    values.push(value);
                }
            }
            Ok(Some(Value::List(values)))
        }
        Node::Map(entries) => {
            let mut record = Record::new();
            for entry in entries {
                let key = match lower(&entry.key)? {
                    Some(Value::Str(key)) => key,
                    Some(other) => {
                        return Err(ExtractError::MalformedEntry {
                            found: other.kind(),
                        })
                    }
                    None => return Err(ExtractError::EmptyKey),
                };
                if let Some(value) = lower(&entry.value)? {
                    record.insert(key, value);
                }
            }
            Ok(Some(Value::Map(record)))
        }
    }
}

/// Lower the top-level array body into its element values.
pub fn lower_top(node: &Node) -> Result<Vec<Value>> {
    match lower(node)? {
        Some(Value::List(items)) => Ok(items),
        Some(other) => Ok(vec![other]),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{parse, Entry};

    fn text(parts: &[&str]) -> Node {
        Node::Text(parts.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn joins_text_with_spaces() {
        let value = lower(&text(&["CPUID_FP87", "CPUID_DE"])).unwrap();
        assert_eq!(value, Some(Value::from("CPUID_FP87 CPUID_DE")));
    }

    #[test]
    fn empty_nodes_lower_to_nothing() {
        assert_eq!(lower(&Node::Empty).unwrap(), None);
        assert_eq!(lower(&Node::Text(vec![])).unwrap(), None);
    }

    #[test]
    fn drops_sentinels_from_lists() {
        let node = Node::List(vec![text(&["a"]), Node::Empty, text(&["b"]), Node::Empty]);
        assert_eq!(
            lower(&node).unwrap(),
            Some(Value::List(vec![Value::from("a"), Value::from("b")]))
        );
    }

    #[test]
    fn omits_entries_without_value() {
        let tree = parse(r#"{ .name = "a", .model_id = "", .cache_info = {} }"#).unwrap();
        let values = lower_top(&tree).unwrap();
        let record = values[0].as_map().unwrap();
        let keys: Vec<_> = record.keys().collect();
        assert_eq!(keys, vec![".name"]);
    }

    #[test]
    fn later_duplicate_key_wins() {
        let values = lower_top(&parse("{ .level = 1, .name = x, .level = 2 }").unwrap()).unwrap();
        let record = values[0].as_map().unwrap();
        let keys: Vec<_> = record.keys().collect();
        assert_eq!(keys, vec![".level", ".name"]);
        assert_eq!(record.get(".level"), Some(&Value::from("2")));
    }

    #[test]
    fn rejects_non_string_key() {
        let node = Node::Map(vec![Entry {
            key: Node::List(vec![text(&["a"])]),
            value: text(&["b"]),
        }]);
        let err = lower(&node).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedEntry { found: "list" }));
    }

    #[test]
    fn rejects_empty_key() {
        let node = Node::Map(vec![Entry {
            key: Node::Empty,
            value: text(&["b"]),
        }]);
        assert!(matches!(lower(&node).unwrap_err(), ExtractError::EmptyKey));
    }
}
