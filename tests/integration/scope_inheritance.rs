//! Integration tests for stacked scopes and wildcard lookups across them

use layertree::{keys, Args, Tree, Value};

#[test]
fn test_values_inherit_from_ancestor_scope() {
    let mut tree = Tree::new();
    let first = tree.new_root();
    tree.set(first, "main.string.one", "1");
    tree.set(first, "main.1.one", 1);
    tree.set(first, "main.bool.one", true);

    assert_eq!(
        tree.get_values(first, "main.*.one"),
        vec![Value::from("1"), Value::Int(1), Value::Bool(true)]
    );

    let second = tree.with(
        first,
        &Args::from([("main.string.one", "one"), ("main.string.two", "two")]),
    );
    assert_eq!(tree.get(second, "main.bool.one"), Some(&Value::Bool(true)));
    assert_eq!(tree.get(second, "main.string.one"), Some(&Value::from("one")));
    assert_eq!(tree.get(second, keys!["main", 1, "one"]), Some(&Value::Int(1)));

    // the ancestor is untouched
    assert_eq!(tree.get_string(first, "main.string.one"), "1");
    assert!(tree.get(first, "main.string.two").is_none());
}

#[test]
fn test_wildcard_collects_nearest_scope_first() {
    let mut tree = Tree::new();
    let base = tree.new_root();
    tree.set(base, "hosts.a", "base-a");
    tree.set(base, "hosts.b", "base-b");
    let top = tree.with(base, &Args::from([("hosts.c", "top-c")]));

    assert_eq!(
        tree.get_string_values(top, "hosts.*"),
        vec!["top-c", "base-a", "base-b"]
    );
    assert_eq!(tree.get_string(top, "hosts.*"), "top-c");
}

#[test]
fn test_three_scopes_later_wins() {
    let mut tree = Tree::new();
    let base = tree.new_root();
    tree.set(base, "log.level", "warn");
    tree.set(base, "log.file", "/var/log/app.log");
    let site = tree.with(base, &Args::from([("log.level", "info")]));
    let local = tree.with(site, &Args::from([("log.level", "debug")]));

    assert_eq!(tree.get_string(local, "log.level"), "debug");
    assert_eq!(tree.get_string(site, "log.level"), "info");
    assert_eq!(tree.get_string(local, "log.file"), "/var/log/app.log");
    assert_eq!(tree.scope_parent(local), Some(site));
    assert_eq!(tree.scope_parent(site), Some(base));
    assert_eq!(tree.scope_parent(base), None);
}

#[test]
fn test_with_below_a_node_rebases_arguments() {
    let mut tree = Tree::new();
    let root = tree.new_root();
    tree.set(root, "app.db.host", "localhost");
    tree.set(root, "app.db.port", 5432);
    let db = tree.get_node(root, "app.db").unwrap();

    let scope = tree.with(db, &Args::from([("host", "db.internal")]));
    assert_eq!(tree.get_string(scope, "app.db.host"), "db.internal");
    assert_eq!(tree.get_int(scope, "app.db.port"), 5432);
}

#[test]
fn test_lookup_from_inner_node_falls_back_through_scopes() {
    let mut tree = Tree::new();
    let base = tree.new_root();
    tree.set(base, "app.name", "demo");
    let top = tree.with(base, &Args::from([("app.debug", true)]));
    let app = tree.get_node(top, "app").unwrap();

    assert!(tree.get_bool(app, "debug"));
    assert_eq!(tree.get_string(app, "name"), "demo");
}

#[test]
fn test_literal_star_key_matches_any_lookup() {
    let mut tree = Tree::new();
    let root = tree.new_root();
    tree.set(root, "limits.*.max", 10);
    tree.set(root, "limits.admin.max", 100);

    assert_eq!(tree.get_int(root, "limits.admin.max"), 100);
    assert_eq!(tree.get_int(root, "limits.guest.max"), 10);
}

#[test]
fn test_from_args() {
    let mut tree = Tree::new();
    let root = tree.from_args(&Args::from([("m.int", 1)]));

    assert_eq!(tree.get(root, "m.int"), Some(&Value::Int(1)));
    assert_eq!(tree.dump(tree.get_node(root, "m").unwrap(), true), "{int=1}");
    assert_eq!(tree.get_float(root, "m.int"), 1.0);
    assert_eq!(tree.get_string(root, "m.int"), "1");
    assert!(tree.get_bool(root, "m.int"));
    assert_eq!(tree.get_duration(root, "m.int"), std::time::Duration::ZERO);
    assert!(tree.try_get_duration(root, "m.int").is_err());
    assert!(tree.try_get_node(root, "missing.node").unwrap_err().is_not_found());
}
