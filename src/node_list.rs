//! Ordered results of a resolution.

use crate::tree::{NodeId, Tree};
use crate::value::Value;

/// Nodes matched by a key spec, in resolution order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeList(Vec<NodeId>);

impl NodeList {
    pub fn first(&self) -> Option<NodeId> {
        self.0.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.0
    }

    /// Map every node through `f`.
    pub fn for_each<T, F>(&self, tree: &Tree, mut f: F) -> Vec<T>
    where
        F: FnMut(&Tree, NodeId) -> T,
    {
        self.0.iter().map(|&id| f(tree, id)).collect()
    }

    /// Keep the nodes for which `predicate` holds.
    pub fn filter<F>(&self, tree: &Tree, mut predicate: F) -> NodeList
    where
        F: FnMut(&Tree, NodeId) -> bool,
    {
        NodeList(
            self.0
                .iter()
                .copied()
                .filter(|&id| predicate(tree, id))
                .collect(),
        )
    }

    /// Keep the nodes whose value equals `value`.
    pub fn filter_by_value(&self, tree: &Tree, value: &Value) -> NodeList {
        self.filter(tree, |tree, id| tree.value(id) == Some(value))
    }

    /// Replace the value of every node keyed by one of `keys` (all nodes when
    /// `keys` is empty) with the result of `conv`.
    pub fn convert_values<F>(&self, tree: &mut Tree, keys: &[&str], mut conv: F) -> &Self
    where
        F: FnMut(&Tree, NodeId) -> Value,
    {
        for &id in &self.0 {
            let matches = keys.is_empty() || tree.key(id).is_some_and(|key| keys.contains(&key));
            if matches && tree.contains(id) {
                let converted = conv(tree, id);
                tree.set_value(id, Some(converted));
            }
        }
        self
    }

    pub fn values_to_string(&self, tree: &mut Tree, keys: &[&str]) -> &Self {
        self.convert_values(tree, keys, |tree, id| Value::String(tree.get_string(id, "")))
    }

    pub fn values_to_int(&self, tree: &mut Tree, keys: &[&str]) -> &Self {
        self.convert_values(tree, keys, |tree, id| Value::Int(tree.get_int(id, "")))
    }

    pub fn values_to_float(&self, tree: &mut Tree, keys: &[&str]) -> &Self {
        self.convert_values(tree, keys, |tree, id| Value::Float(tree.get_float(id, "")))
    }

    pub fn values_to_bool(&self, tree: &mut Tree, keys: &[&str]) -> &Self {
        self.convert_values(tree, keys, |tree, id| Value::Bool(tree.get_bool(id, "")))
    }

    pub fn values_to_duration(&self, tree: &mut Tree, keys: &[&str]) -> &Self {
        self.convert_values(tree, keys, |tree, id| {
            Value::Duration(tree.get_duration(id, ""))
        })
    }
}

impl From<Vec<NodeId>> for NodeList {
    fn from(ids: Vec<NodeId>) -> Self {
        Self(ids)
    }
}

impl IntoIterator for NodeList {
    type Item = NodeId;
    type IntoIter = std::vec::IntoIter<NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a NodeList {
    type Item = NodeId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}
