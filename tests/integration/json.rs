//! Integration tests for the JSON adapter

use layertree::{NodeFlags, Tree, Value};

#[test]
fn test_loaded_text_exports_as_nested_json() {
    let mut tree = Tree::new();
    let root = tree.new_root();
    tree.merge_reader(
        root,
        "server.name=example\nserver.port:int=8080\nserver.hosts.1=a\nserver.hosts.2=b\n"
            .as_bytes(),
        true,
    )
    .unwrap();

    assert_eq!(
        tree.to_json(root),
        serde_json::json!({
            "server": {"name": "example", "port": 8080, "hosts": ["a", "b"]}
        })
    );
}

#[test]
fn test_json_import_then_export() {
    let mut tree = Tree::new();
    let root = tree.new_root();
    let input = r#"{"service":{"name":"api","replicas":3,"ratio":0.75,"tags":["blue","green"],"tls":false}}"#;
    tree.merge_json(root, input).unwrap();

    assert_eq!(tree.get_int(root, "service.replicas"), 3);
    assert_eq!(tree.get(root, "service.ratio"), Some(&Value::Float(0.75)));
    assert_eq!(tree.get_string_values(root, "service.tags.*"), vec!["blue", "green"]);
    assert_eq!(tree.to_json_string(root, false).unwrap(), input);
}

#[test]
fn test_merge_json_overrides_existing_entries() {
    let mut tree = Tree::new();
    let root = tree.new_root();
    tree.set(root, "a.b", "old");
    tree.set(root, "a.c", "kept");
    tree.merge_json(root, r#"{"a":{"b":"new"}}"#).unwrap();

    assert_eq!(tree.dump(root, true), "{a={b=new,c=kept}}");
}

#[test]
fn test_flags_survive_pretty_output() {
    let mut tree = Tree::new();
    let root = tree.new_root();
    let list = tree.add_node(root, "list").unwrap();
    tree.set_flags(list, NodeFlags::FORCE_ARRAY);

    let pretty = tree.to_json_string(root, true).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&pretty).unwrap();
    assert_eq!(parsed, serde_json::json!({"list": []}));
}
