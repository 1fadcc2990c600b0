//! Stackable configuration tree
//!
//! All nodes live in one [`Tree`] arena and are addressed by [`NodeId`]. A tree can
//! hold many scopes: each scope has its own root, and a scope root may point at an
//! ancestor scope root so that lookups missing in the scope continue there.

mod node;
pub mod path;
mod scope;
pub mod sort;
mod structure;

pub use node::{Link, Node, NodeFlags, NodeId};

use crate::value::Value;
use std::collections::HashMap;

/// Arena holding every node of every scope
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: HashMap<NodeId, Node>,
    next_id: u64,
}

impl Tree {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new, empty scope root with no ancestor scope.
    pub fn new_root(&mut self) -> NodeId {
        self.alloc(Node::new("", Link::Root))
    }

    /// Create a new, empty, detached node.
    pub fn new_node(&mut self, key: impl Into<String>) -> NodeId {
        self.alloc(Node::new(key, Link::Detached))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Number of live nodes across all scopes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn key(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(Node::key)
    }

    pub fn value(&self, id: NodeId) -> Option<&Value> {
        self.node(id).and_then(Node::value)
    }

    /// Replace a node's value, returning the previous one.
    pub fn set_value(&mut self, id: NodeId, value: Option<Value>) -> Option<Value> {
        let node = self.nodes.get_mut(&id)?;
        std::mem::replace(&mut node.value, value)
    }

    pub fn flags(&self, id: NodeId) -> NodeFlags {
        self.node(id).map(Node::flags).unwrap_or_default()
    }

    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.flags = flags;
        }
    }

    /// Structural parent, if any.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.link.parent())
    }

    pub fn child(&self, id: NodeId, key: &str) -> Option<NodeId> {
        self.node(id).and_then(|node| node.child(key))
    }

    /// Children in iteration order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        match self.node(id) {
            Some(node) => node
                .child_keys
                .iter()
                .filter_map(|key| node.children.get(key).copied())
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node(id).map_or(true, Node::is_leaf)
    }

    /// Value rendered as text; a missing node or value yields an empty string.
    pub fn string_value(&self, id: NodeId) -> String {
        self.value(id).map(Value::to_text).unwrap_or_default()
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }
}
