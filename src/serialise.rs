//! JSON encoding and decoding, and the text dump format.
//!
//! A node with children serialises as an array when it is flagged `FORCE_ARRAY`, or
//! when every child key is numeric and it is not flagged `FORCE_MAP`. Otherwise it
//! becomes an object. Children are emitted in child order either way.

use crate::error::TreeError;
use crate::keys::KeySpec;
use crate::tree::{NodeFlags, NodeId, Tree};
use crate::value::Value;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Duration(d) => {
                serializer.serialize_u64(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
            }
            Value::Time(t) => serializer.serialize_str(&t.to_rfc3339()),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// A node and its descendants, borrowed for serialisation
#[derive(Clone, Copy)]
pub struct NodeView<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(node) = self.tree.node(self.id) else {
            return serializer.serialize_none();
        };

        let flags = node.flags();
        let force_array = flags.contains(NodeFlags::FORCE_ARRAY);
        let force_map = flags.contains(NodeFlags::FORCE_MAP);
        if node.is_leaf() && !force_array && !force_map {
            return match node.value() {
                Some(value) => value.serialize(serializer),
                None => serializer.serialize_none(),
            };
        }

        let children = node
            .child_keys()
            .iter()
            .filter_map(|key| node.child(key).map(|id| (key, self.tree.view(id))));

        if force_array || (!force_map && node.has_only_numeric_keys()) {
            let mut seq = serializer.serialize_seq(Some(node.child_keys().len()))?;
            for (_, child) in children {
                seq.serialize_element(&child)?;
            }
            seq.end()
        } else {
            let mut map = serializer.serialize_map(Some(node.child_keys().len()))?;
            for (key, child) in children {
                map.serialize_entry(key, &child)?;
            }
            map.end()
        }
    }
}

/// Short dump of a node, as produced by [`Tree::dump`]
pub struct Dump<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        self.write_children(f, self.id)?;
        f.write_str("}")
    }
}

impl Dump<'_> {
    fn write_children(&self, f: &mut fmt::Formatter<'_>, id: NodeId) -> fmt::Result {
        for (i, child) in self.tree.children(id).into_iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}=", self.tree.key(child).unwrap_or_default())?;
            if let Some(value) = self.tree.value(child) {
                write!(f, "{value}")?;
            }
            if !self.tree.is_leaf(child) {
                f.write_str("{")?;
                self.write_children(f, child)?;
                f.write_str("}")?;
            }
        }
        Ok(())
    }
}

impl Tree {
    /// Borrow `id` for serialisation with serde.
    pub fn view(&self, id: NodeId) -> NodeView<'_> {
        NodeView { tree: self, id }
    }

    /// Displayable short dump of `id`.
    pub fn display(&self, id: NodeId) -> Dump<'_> {
        Dump { tree: self, id }
    }

    /// JSON representation of `id` and its descendants.
    pub fn to_json(&self, id: NodeId) -> serde_json::Value {
        serde_json::to_value(self.view(id)).unwrap_or(serde_json::Value::Null)
    }

    pub fn to_json_string(&self, id: NodeId, pretty: bool) -> Result<String, TreeError> {
        let view = self.view(id);
        let text = if pretty {
            serde_json::to_string_pretty(&view)?
        } else {
            serde_json::to_string(&view)?
        };
        Ok(text)
    }

    /// Decode a JSON object and set its entries below `node`.
    ///
    /// Arrays become children keyed from `1`. Integral numbers become
    /// [`Value::Int`], other numbers [`Value::Float`], and `null` creates a node
    /// without a value.
    pub fn merge_json(&mut self, node: NodeId, text: &str) -> Result<(), TreeError> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)?;
        for (key, value) in object {
            self.merge_json_value(node, vec![key], value);
        }
        Ok(())
    }

    fn merge_json_value(&mut self, node: NodeId, path: Vec<String>, value: serde_json::Value) {
        use serde_json::Value as Json;

        let scalar = match value {
            Json::Object(object) => {
                for (key, child) in object {
                    let mut child_path = path.clone();
                    child_path.push(key);
                    self.merge_json_value(node, child_path, child);
                }
                return;
            }
            Json::Array(items) => {
                for (index, child) in items.into_iter().enumerate() {
                    let mut child_path = path.clone();
                    child_path.push((index + 1).to_string());
                    self.merge_json_value(node, child_path, child);
                }
                return;
            }
            Json::Null => None,
            Json::Bool(b) => Some(Value::Bool(b)),
            Json::String(s) => Some(Value::String(s)),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Some(Value::Int(i)),
                None => n.as_f64().map(Value::Float),
            },
        };
        self.set_by_path(node, &KeySpec::parse(path), scalar);
    }

    /// Render `id` as text.
    ///
    /// The short form nests braces, `{a=1,b={c=2}}`. The long form writes one
    /// `dotted.path=value` line per leaf.
    pub fn dump(&self, id: NodeId, short: bool) -> String {
        if short {
            return self.display(id).to_string();
        }

        let mut out = String::new();
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if self.is_leaf(current) {
                out.push_str(&self.path(current).join("."));
                out.push('=');
                out.push_str(&self.string_value(current));
                out.push('\n');
            } else {
                pending.extend(self.children(current).into_iter().rev());
            }
        }
        out
    }
}
