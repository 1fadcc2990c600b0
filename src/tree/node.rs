//! Node records stored in a [`Tree`](super::Tree).

use crate::value::Value;
use bitflags::bitflags;
use std::collections::HashMap;

/// Opaque handle to a node in a [`Tree`](super::Tree).
///
/// Ids are never reused, so a handle to a discarded node simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u64);

bitflags! {
    /// Serialisation hints carried by a node
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        /// Serialise children as an object even if every key is numeric
        const FORCE_MAP = 1 << 0;
        /// Serialise children as an array even if some keys are not numeric
        const FORCE_ARRAY = 1 << 1;
    }
}

/// What a node's upward reference means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    /// A free node: no parent, not a scope.
    Detached,
    /// Top of a scope with no ancestor scope.
    Root,
    /// Structural parent within the same scope.
    Child(NodeId),
    /// Top of a scope; lookups that miss continue in the given ancestor scope root.
    Scope(NodeId),
}

impl Link {
    /// Whether the node is the top of a scope.
    pub fn is_scope_root(&self) -> bool {
        matches!(self, Link::Root | Link::Scope(_))
    }

    pub fn parent(&self) -> Option<NodeId> {
        match self {
            Link::Child(parent) => Some(*parent),
            _ => None,
        }
    }
}

/// A tree vertex: key, optional value, and ordered children
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) key: String,
    pub(crate) value: Option<Value>,
    pub(crate) children: HashMap<String, NodeId>,
    pub(crate) child_keys: Vec<String>,
    pub(crate) link: Link,
    pub(crate) flags: NodeFlags,
}

impl Node {
    pub(crate) fn new(key: impl Into<String>, link: Link) -> Self {
        Self {
            key: key.into(),
            value: None,
            children: HashMap::new(),
            child_keys: Vec::new(),
            link,
            flags: NodeFlags::empty(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn link(&self) -> Link {
        self.link
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// Child keys in iteration order.
    pub fn child_keys(&self) -> &[String] {
        &self.child_keys
    }

    pub fn child(&self, key: &str) -> Option<NodeId> {
        self.children.get(key).copied()
    }

    pub fn is_leaf(&self) -> bool {
        self.child_keys.is_empty()
    }

    /// Whether every child key parses as an integer.
    pub fn has_only_numeric_keys(&self) -> bool {
        self.child_keys.iter().all(|key| key.parse::<i64>().is_ok())
    }

    pub(crate) fn insert_child(&mut self, key: String, id: NodeId) {
        self.child_keys.push(key.clone());
        self.children.insert(key, id);
    }

    pub(crate) fn remove_child(&mut self, key: &str) -> Option<NodeId> {
        let id = self.children.remove(key)?;
        if let Some(index) = self.child_keys.iter().position(|k| k == key) {
            self.child_keys.remove(index);
        }
        Some(id)
    }
}
