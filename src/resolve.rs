//! Path resolution
//!
//! Walks a [`KeySpec`] from a starting node. A `*` segment expands over every child
//! in child order. A literal segment takes the exact child and then, if present, a
//! child literally keyed `*`, so `server.*` entries act as catch-alls for any
//! `server.<name>` lookup.
//!
//! When the starting scope yields too few results the walk is repeated from the
//! ancestor scope root. A non-root starting node is re-based first: its own path is
//! prefixed to the spec so the same absolute location is probed in the ancestor.
//! Results from nearer scopes come first.

use crate::error::TreeError;
use crate::keys::{IntoKeySpec, KeySpec, WILDCARD};
use crate::node_list::NodeList;
use crate::tree::{NodeId, Tree};
use tracing::{debug, trace};

impl Tree {
    /// Collect the nodes matching `spec` from `start`, stopping once `limit`
    /// results are found. An empty spec yields the starting node itself.
    pub fn resolve(&self, start: NodeId, spec: &KeySpec, limit: Option<usize>) -> NodeList {
        let mut found = Vec::new();
        if !self.contains(start) {
            return NodeList::default();
        }
        if spec.is_empty() {
            return NodeList::from(vec![start]);
        }

        let mut current = start;
        let mut spec = spec.clone();
        loop {
            let before = found.len();
            self.walk(current, spec.segments(), limit, &mut found);
            trace!(
                scope = ?self.root_of(current),
                spec = %spec,
                matched = found.len() - before,
                "Resolved in scope"
            );
            if is_full(&found, limit) {
                break;
            }

            let Some(ancestor) = self.scope_parent(current) else {
                break;
            };
            if !self.node(current).is_some_and(|node| node.link().is_scope_root()) {
                spec = spec.prefixed(&self.path(current));
            }
            debug!(from = ?current, to = ?ancestor, spec = %spec, "Falling back to ancestor scope");
            current = ancestor;
        }

        NodeList::from(found)
    }

    /// All nodes matching `keys` below `node`, across stacked scopes.
    pub fn get_nodes(&self, node: NodeId, keys: impl IntoKeySpec) -> NodeList {
        self.resolve(node, &keys.into_key_spec(), None)
    }

    /// The first node matching `spec`, searching ancestor scopes as needed.
    pub fn find_first(&self, node: NodeId, spec: &KeySpec) -> Result<NodeId, TreeError> {
        self.resolve(node, spec, Some(1))
            .first()
            .ok_or_else(|| TreeError::NotFound {
                key: spec.to_string(),
            })
    }

    /// Depth-first match of `spec` below `node`. Returns true once the limit is hit.
    fn walk(
        &self,
        node: NodeId,
        spec: &[String],
        limit: Option<usize>,
        found: &mut Vec<NodeId>,
    ) -> bool {
        let Some((segment, rest)) = spec.split_first() else {
            return is_full(found, limit);
        };

        let candidates: Vec<NodeId> = if segment == WILDCARD {
            self.children(node)
        } else {
            [self.child(node, segment), self.child(node, WILDCARD)]
                .into_iter()
                .flatten()
                .collect()
        };

        for child in candidates {
            if rest.is_empty() {
                found.push(child);
                if is_full(found, limit) {
                    return true;
                }
            } else if self.walk(child, rest, limit, found) {
                return true;
            }
        }
        false
    }
}

fn is_full(found: &[NodeId], limit: Option<usize>) -> bool {
    limit.is_some_and(|limit| limit > 0 && found.len() >= limit)
}
