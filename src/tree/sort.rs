//! Child ordering
//!
//! Children keep insertion order until sorted. Sorting is numeric when every key of
//! the node parses as an integer (stable, so `1` and `01` keep their relative order)
//! and byte-wise otherwise.

use super::{NodeId, Tree};
use std::cmp::Ordering;

impl Tree {
    /// Sort the direct children of `id`.
    pub fn sort(&mut self, id: NodeId) {
        if let Some(node) = self.node_mut(id) {
            sort_keys(&mut node.child_keys);
        }
    }

    /// Sort the children of `id` and of every descendant.
    pub fn sort_recursively(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            self.sort(current);
            pending.extend(self.children(current));
        }
    }
}

fn sort_keys(keys: &mut [String]) {
    let numeric: Option<Vec<i64>> = keys.iter().map(|key| key.parse().ok()).collect();
    match numeric {
        Some(numbers) => {
            let mut paired: Vec<(i64, String)> =
                numbers.into_iter().zip(keys.iter().cloned()).collect();
            paired.sort_by_key(|(number, _)| *number);
            for (slot, (_, key)) in keys.iter_mut().zip(paired) {
                *slot = key;
            }
        }
        None => keys.sort(),
    }
}

/// Stable numeric sort; strings that do not parse as integers count as zero.
pub fn sort_numeric(keys: &mut [String]) {
    keys.sort_by(|a, b| compare_numeric(a, b));
}

fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a: i64 = a.parse().unwrap_or(0);
    let b: i64 = b.parse().unwrap_or(0);
    a.cmp(&b)
}
