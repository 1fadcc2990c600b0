//! Structural mutation: adopt, unset, rename, merge and path-based set.

use super::{Link, Node, NodeId, Tree};
use crate::args::Args;
use crate::error::TreeError;
use crate::keys::{IntoKeySpec, KeySpec};
use crate::value::Value;
use tracing::trace;

/// Owned copy of a subtree, used to merge across (or within) trees
struct Snapshot {
    key: String,
    value: Option<Value>,
    children: Vec<Snapshot>,
}

impl Tree {
    /// Move `child` under `parent`, keyed by the child's own key.
    ///
    /// The child is first released from its previous parent. A sibling already
    /// stored under the same key is unset and discarded.
    pub fn adopt(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, TreeError> {
        if !self.contains(parent) || !self.contains(child) {
            return Err(TreeError::UnknownNode);
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(TreeError::InvalidAdoption);
        }
        self.attach(parent, child);
        Ok(child)
    }

    /// Remove the node at `keys` below `node` and return it, detached but intact.
    ///
    /// Returns `None` when any segment is missing.
    pub fn unset(&mut self, node: NodeId, keys: impl IntoKeySpec) -> Option<NodeId> {
        let spec = keys.into_key_spec();
        let (last, interior) = spec.segments().split_last()?;
        let mut current = node;
        for key in interior {
            current = self.child(current, key)?;
        }
        let child = self.child(current, last)?;
        self.detach(child);
        Some(child)
    }

    /// Unset `id` and free it together with its whole subtree.
    pub fn discard(&mut self, id: NodeId) {
        self.detach(id);
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                pending.extend(node.children.into_values());
            }
        }
    }

    /// Change a node's key, keeping its children and its parent.
    ///
    /// The node is re-adopted under the new key, so it moves to the end of its
    /// parent's child order and replaces any sibling already using that key.
    pub fn rename(&mut self, id: NodeId, new_key: impl Into<String>) -> Option<NodeId> {
        let new_key = new_key.into();
        let parent = self.parent(id);
        if parent.is_some() {
            self.detach(id);
        }
        self.node_mut(id)?.key = new_key;
        if let Some(parent) = parent {
            self.attach(parent, id);
        }
        Some(id)
    }

    /// Clone `src` (and its subtree) under `dst`, merging with existing nodes.
    ///
    /// The merged node's value is always overwritten by the source's, even when the
    /// source has none. Children of the destination that the source does not name
    /// are left alone. Children created by the merge are appended in the source's
    /// order and the destination is not re-sorted; call [`Tree::sort`] afterwards if
    /// needed. Returns the destination node matching `src`.
    pub fn merge(&mut self, dst: NodeId, src: NodeId) -> Option<NodeId> {
        let snapshot = self.snapshot(src)?;
        self.apply_snapshot(dst, snapshot)
    }

    /// Like [`Tree::merge`], but reading the source subtree from another tree.
    pub fn merge_from(&mut self, dst: NodeId, source: &Tree, src: NodeId) -> Option<NodeId> {
        let snapshot = source.snapshot(src)?;
        self.apply_snapshot(dst, snapshot)
    }

    /// Create or update the node at `spec` below `node`, creating intermediate
    /// nodes as needed. A `None` value leaves an existing value untouched.
    pub fn set_by_path(
        &mut self,
        node: NodeId,
        spec: &KeySpec,
        value: Option<Value>,
    ) -> Option<NodeId> {
        if spec.is_empty() || !self.contains(node) {
            return None;
        }

        let mut current = node;
        for key in spec.segments() {
            current = match self.child(current, key) {
                Some(child) => child,
                None => {
                    let child = self.new_node(key.clone());
                    self.attach(current, child);
                    child
                }
            };
        }

        if value.is_some() {
            self.set_value(current, value);
        }
        Some(current)
    }

    /// Set the value at `keys` below `node`.
    pub fn set(
        &mut self,
        node: NodeId,
        keys: impl IntoKeySpec,
        value: impl Into<Value>,
    ) -> Option<NodeId> {
        self.set_by_path(node, &keys.into_key_spec(), Some(value.into()))
    }

    /// Get or create the node at `keys` below `node`, without touching its value.
    pub fn add_node(&mut self, node: NodeId, keys: impl IntoKeySpec) -> Option<NodeId> {
        self.set_by_path(node, &keys.into_key_spec(), None)
    }

    /// Add a child keyed by the next unused integer, counting from the number of
    /// children plus one.
    pub fn push(&mut self, node: NodeId) -> Option<NodeId> {
        let mut index = self.node(node)?.child_keys.len();
        loop {
            index += 1;
            let key = index.to_string();
            if self.child(node, &key).is_none() {
                return self.set_by_path(node, &KeySpec::from_segments(vec![key]), None);
            }
        }
    }

    /// Push one child per value.
    pub fn push_values<I, V>(&mut self, node: NodeId, values: I) -> NodeId
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        for value in values {
            if let Some(child) = self.push(node) {
                self.set_value(child, Some(value.into()));
            }
        }
        node
    }

    /// Set the value at `keys`; on later calls turn the node into a numbered list.
    ///
    /// The first call behaves like [`Tree::set`]. Once the node holds a value, that
    /// value is moved to a first numbered child and each new value is pushed.
    pub fn fill_key(
        &mut self,
        node: NodeId,
        keys: impl IntoKeySpec,
        value: impl Into<Value>,
    ) -> Option<NodeId> {
        let target = self.add_node(node, keys)?;
        let value = value.into();

        if self.is_leaf(target) {
            match self.set_value(target, None) {
                None => {
                    self.set_value(target, Some(value));
                    return Some(target);
                }
                Some(previous) => {
                    let first = self.push(target)?;
                    self.set_value(first, Some(previous));
                }
            }
        }

        let pushed = self.push(target)?;
        self.set_value(pushed, Some(value));
        Some(pushed)
    }

    /// Set every argument below `node`.
    pub fn merge_args(&mut self, node: NodeId, args: &Args) -> NodeId {
        for (key, value) in args.iter() {
            self.set(node, key, value.clone());
        }
        node
    }

    /// Link `child` under `parent` without validation.
    pub(crate) fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);

        let key = match self.node(child) {
            Some(node) => node.key.clone(),
            None => return,
        };
        if let Some(existing) = self.child(parent, &key) {
            trace!(key = %key, "Replacing existing child");
            self.discard(existing);
        }

        if let Some(node) = self.node_mut(parent) {
            node.insert_child(key, child);
        }
        if let Some(node) = self.node_mut(child) {
            node.link = Link::Child(parent);
        }
    }

    /// Release `id` from its structural parent, if it has one.
    fn detach(&mut self, id: NodeId) {
        let Some(Node { key, link: Link::Child(parent), .. }) = self.node(id) else {
            return;
        };
        let (key, parent) = (key.clone(), *parent);
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.remove_child(&key);
        }
        if let Some(node) = self.node_mut(id) {
            node.link = Link::Detached;
        }
    }

    /// Whether `candidate` is `id`, one of its parents, or anything lookups from
    /// `id` fall back to: the chain continues from each scope root to its ancestor.
    fn is_ancestor_or_self(&self, candidate: NodeId, id: NodeId) -> bool {
        let mut current = id;
        for _ in 0..=self.len() {
            if current == candidate {
                return true;
            }
            current = match self.node(current).map(Node::link) {
                Some(Link::Child(parent)) | Some(Link::Scope(parent)) => parent,
                _ => return false,
            };
        }
        false
    }

    fn snapshot(&self, id: NodeId) -> Option<Snapshot> {
        let node = self.node(id)?;
        Some(Snapshot {
            key: node.key.clone(),
            value: node.value.clone(),
            children: self
                .children(id)
                .into_iter()
                .filter_map(|child| self.snapshot(child))
                .collect(),
        })
    }

    fn apply_snapshot(&mut self, dst: NodeId, snapshot: Snapshot) -> Option<NodeId> {
        if !self.contains(dst) {
            return None;
        }
        let target = match self.child(dst, &snapshot.key) {
            Some(existing) => existing,
            None => {
                let created = self.new_node(snapshot.key.clone());
                self.attach(dst, created);
                created
            }
        };

        self.set_value(target, snapshot.value);
        for child in snapshot.children {
            self.apply_snapshot(target, child);
        }
        Some(target)
    }
}
