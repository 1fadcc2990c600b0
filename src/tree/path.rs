//! Root, depth and path computation
//!
//! Structural climbing stops at the first scope root: a scope's own root always has
//! depth 0, however many scopes are stacked beneath it.

use super::{Link, NodeId, Tree};

impl Tree {
    /// The top of the structure containing `id`: its scope root, or the top of a
    /// detached subtree.
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// The ancestor scope that lookups from `id` fall back to, if any.
    pub fn scope_parent(&self, id: NodeId) -> Option<NodeId> {
        match self.node(self.root_of(id))?.link {
            Link::Scope(ancestor) => Some(ancestor),
            _ => None,
        }
    }

    /// Number of structural parent hops up to the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Keys from the root (excluded) down to `id` (included).
    pub fn path(&self, id: NodeId) -> Vec<String> {
        let mut path = Vec::with_capacity(self.depth(id));
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            if let Some(key) = self.key(current) {
                path.push(key.to_string());
            }
            current = parent;
        }
        path.reverse();
        path
    }
}
