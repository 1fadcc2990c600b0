//! Integration tests for tree structure operations

use layertree::{Args, Link, Tree, TreeError};

/// Adopting under a descendant is refused and leaves the tree untouched
#[test]
fn test_adopt_rejects_cycles() {
    let mut tree = Tree::new();
    let root = tree.new_root();
    let leaf = tree.set(root, "a.b.c", 1).unwrap();
    let a = tree.get_node(root, "a").unwrap();

    assert!(matches!(tree.adopt(leaf, a), Err(TreeError::InvalidAdoption)));
    assert!(matches!(tree.adopt(a, a), Err(TreeError::InvalidAdoption)));
    assert_eq!(tree.dump(root, true), "{a={b={c=1}}}");
}

/// A scope root cannot be moved under a node that falls back to it
#[test]
fn test_adopt_rejects_scope_ancestor() {
    let mut tree = Tree::new();
    let base = tree.new_root();
    tree.set(base, "a", 1);
    let scope = tree.with(base, &Args::new());
    let inner = tree.add_node(scope, "inner").unwrap();

    assert!(matches!(tree.adopt(inner, base), Err(TreeError::InvalidAdoption)));
    assert_eq!(tree.scope_parent(scope), Some(base));
    assert!(tree.get_nodes(scope, "missing").is_empty());
    assert_eq!(tree.get_int(scope, "a"), 1);
}

/// Moving a subtree between roots keeps its descendants
#[test]
fn test_adopt_moves_subtree_between_roots() {
    let mut tree = Tree::new();
    let first = tree.new_root();
    let second = tree.new_root();
    tree.set(first, "db.host", "h");
    tree.set(first, "db.port", 1);
    let db = tree.get_node(first, "db").unwrap();

    tree.adopt(second, db).unwrap();
    assert_eq!(tree.dump(first, true), "{}");
    assert_eq!(tree.dump(second, true), "{db={host=h,port=1}}");
    assert_eq!(tree.root_of(db), second);
    assert_eq!(tree.path(tree.get_node(second, "db.port").unwrap()), vec!["db", "port"]);
}

/// Discarded ids behave like missing nodes
#[test]
fn test_discarded_node_is_inert() {
    let mut tree = Tree::new();
    let root = tree.new_root();
    let b = tree.set(root, "a.b", "x").unwrap();
    let a = tree.get_node(root, "a").unwrap();
    tree.discard(a);

    assert!(!tree.contains(a));
    assert!(!tree.contains(b));
    assert!(tree.get(b, "").is_none());
    assert!(tree.get_nodes(b, "*").is_empty());
    assert!(tree.set(b, "c", 1).is_none());
    assert_eq!(tree.dump(root, true), "{}");
}

/// New scope roots link back to the scope they were stacked on
#[test]
fn test_scope_links() {
    let mut tree = Tree::new();
    let base = tree.new_root();
    let scope = tree.with(base, &Default::default());

    assert_eq!(tree.node(base).unwrap().link(), Link::Root);
    assert_eq!(tree.node(scope).unwrap().link(), Link::Scope(base));
    assert!(tree.parent(scope).is_none());
}

/// Numeric sort orders by value, mixed keys fall back to byte order
#[test]
fn test_sorting() {
    let mut tree = Tree::new();
    let root = tree.new_root();
    for key in ["10", "9", "100", "1"] {
        tree.set(root, ["n", key], key);
    }
    for key in ["b", "10", "a"] {
        tree.set(root, ["m", key], key);
    }
    tree.sort_recursively(root);

    assert_eq!(tree.get_string_values(root, "n.*"), vec!["1", "9", "10", "100"]);
    assert_eq!(tree.get_string_values(root, "m.*"), vec!["10", "a", "b"]);
}

/// Renaming keeps the subtree but moves it to the end
#[test]
fn test_rename_and_unset() {
    let mut tree = Tree::new();
    let root = tree.new_root();
    tree.set(root, "old.x", 1);
    tree.set(root, "other", 2);
    let old = tree.get_node(root, "old").unwrap();

    tree.rename(old, "new");
    assert_eq!(tree.dump(root, true), "{other=2,new={x=1}}");

    let removed = tree.unset(root, "new.x").unwrap();
    assert_eq!(tree.node(removed).unwrap().link(), Link::Detached);
    assert_eq!(tree.dump(root, true), "{other=2,new=}");
}
