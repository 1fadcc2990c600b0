//! Scope stacking

use super::{Link, Node, NodeId, Tree};
use crate::args::Args;
use crate::keys::KeySpec;
use tracing::trace;

impl Tree {
    /// Create a scope stacked on the scope containing `node`, and fill it with `args`.
    ///
    /// When `node` is not itself a root, the arguments are placed under the node's
    /// path inside the new scope. The new scope's root is returned; lookups from it
    /// that miss fall back to the original scope.
    pub fn with(&mut self, node: NodeId, args: &Args) -> NodeId {
        let ancestor = self.root_of(node);
        let scope = self.alloc(Node::new("", Link::Scope(ancestor)));
        trace!(?ancestor, ?scope, "Stacked new scope");

        let target = if ancestor == node {
            scope
        } else {
            let path = KeySpec::from_segments(self.path(node));
            self.set_by_path(scope, &path, None).unwrap_or(scope)
        };
        self.merge_args(target, args);
        scope
    }

    /// Create a new root holding every argument.
    pub fn from_args(&mut self, args: &Args) -> NodeId {
        let root = self.new_root();
        self.merge_args(root, args)
    }
}
