//! Property-based tests for lookup and stacking guarantees

use layertree::{Args, KeySpec, Tree, Value};
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,4}"
}

fn path() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(segment(), 1..4)
}

proptest! {
    /// Whatever was set last at a path is what a lookup returns
    #[test]
    fn prop_set_then_get(entries in prop::collection::vec((path(), any::<i64>()), 1..20)) {
        let mut tree = Tree::new();
        let root = tree.new_root();
        let mut expected = std::collections::HashMap::new();
        for (path, value) in &entries {
            let spec = KeySpec::from_segments(path.clone());
            tree.set(root, &spec, *value);
            expected.insert(path.clone(), *value);
        }
        for (path, value) in expected {
            let spec = KeySpec::from_segments(path);
            prop_assert_eq!(tree.get(root, &spec), Some(&Value::Int(value)));
        }
    }

    /// Building the same entries twice gives identical output
    #[test]
    fn prop_dump_is_deterministic(entries in prop::collection::vec((path(), "[a-z]{0,6}"), 0..20)) {
        let build = || {
            let mut tree = Tree::new();
            let root = tree.new_root();
            for (path, value) in &entries {
                tree.set(root, KeySpec::from_segments(path.clone()), value.as_str());
            }
            tree.sort_recursively(root);
            (tree.dump(root, false), tree.to_json_string(root, false).unwrap())
        };
        prop_assert_eq!(build(), build());
    }

    /// A stacked scope shadows exactly the keys it sets
    #[test]
    fn prop_scope_shadows_only_its_keys(
        base in prop::collection::btree_map(segment(), any::<i64>(), 1..10),
        top in prop::collection::btree_map(segment(), any::<i64>(), 0..10),
    ) {
        let mut tree = Tree::new();
        let root = tree.new_root();
        for (key, value) in &base {
            tree.set(root, ["k", key.as_str()], *value);
        }
        let args: Args = top.iter().map(|(k, v)| (format!("k.{k}"), *v)).collect();
        let scope = tree.with(root, &args);

        for (key, value) in &base {
            let want = top.get(key).unwrap_or(value);
            prop_assert_eq!(tree.get_int(scope, ["k", key.as_str()]), *want);
            prop_assert_eq!(tree.get_int(root, ["k", key.as_str()]), *value);
        }
    }

    /// The limit caps wildcard results without changing their order
    #[test]
    fn prop_limit_is_a_prefix(count in 0usize..30, limit in 1usize..10) {
        let mut tree = Tree::new();
        let root = tree.new_root();
        for i in 0..count {
            tree.set(root, ["x", i.to_string().as_str()], i as i64);
        }
        let spec = KeySpec::from_segments(vec!["x".into(), "*".into()]);
        let all = tree.resolve(root, &spec, None);
        let some = tree.resolve(root, &spec, Some(limit));
        prop_assert_eq!(some.len(), count.min(limit));
        prop_assert_eq!(some.as_slice(), &all.as_slice()[..some.len()]);
    }
}
