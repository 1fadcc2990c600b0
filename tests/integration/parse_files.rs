//! Integration tests for loading the text format from disk

use layertree::{Tree, TreeError, Value};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_load_typed_entries() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("app.conf");
    fs::write(
        &path,
        r"# application defaults
server.name = example
server.port:int = 8080
server.ratio:float=0.5
server.debug:bool=off
server.timeout:duration=1m30s
server.aliases:[]string=www,web\,site

server.ports:[]int=80,443
",
    )
    .unwrap();

    let (tree, root) = Tree::load(&path).unwrap();
    assert_eq!(tree.get(root, "server.name"), Some(&Value::from("example")));
    assert_eq!(tree.get(root, "server.port"), Some(&Value::Int(8080)));
    assert_eq!(tree.get_float(root, "server.ratio"), 0.5);
    assert!(!tree.get_bool(root, "server.debug"));
    assert_eq!(tree.get_duration(root, "server.timeout"), Duration::from_secs(90));
    assert_eq!(
        tree.get(root, "server.aliases"),
        Some(&Value::List(vec![Value::from("www"), Value::from("web,site")]))
    );
    assert_eq!(
        tree.get(root, "server.ports"),
        Some(&Value::List(vec![Value::Int(80), Value::Int(443)]))
    );
}

#[test]
fn test_include_relative_to_including_file() {
    let temp_dir = TempDir::new().unwrap();
    let conf_dir = temp_dir.path().join("conf.d");
    fs::create_dir(&conf_dir).unwrap();
    fs::write(conf_dir.join("db.conf"), "db.host=localhost\ndb.port:int=5432\n").unwrap();
    fs::write(
        temp_dir.path().join("main.conf"),
        "app.name=demo\ninclude conf.d/db.conf\ndb.host=db.internal\n",
    )
    .unwrap();

    let (tree, root) = Tree::load(temp_dir.path().join("main.conf")).unwrap();
    assert_eq!(tree.get_string(root, "app.name"), "demo");
    // later lines override included ones
    assert_eq!(tree.get_string(root, "db.host"), "db.internal");
    assert_eq!(tree.get_int(root, "db.port"), 5432);
}

#[test]
fn test_include_cycle_reads_each_file_once() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.conf"), "include b.conf\na=1\n").unwrap();
    fs::write(temp_dir.path().join("b.conf"), "include a.conf\nb=2\n").unwrap();

    let (tree, root) = Tree::load(temp_dir.path().join("a.conf")).unwrap();
    assert_eq!(tree.dump(root, true), "{b=2,a=1}");
}

#[test]
fn test_bad_line_reports_file_and_line() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.conf");
    fs::write(&path, "ok=1\nthis is not an entry\n").unwrap();

    let err = Tree::load(&path).unwrap_err();
    match &err {
        TreeError::Parse { file, line, .. } => {
            assert_eq!(file, &path);
            assert_eq!(*line, 2);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_bad_typed_value_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.conf");
    fs::write(&path, "port:int=eighty\n").unwrap();

    let err = Tree::load(&path).unwrap_err();
    assert!(matches!(err, TreeError::Parse { line: 1, .. }));
    assert!(err.to_string().contains("eighty"));
}

#[test]
fn test_error_in_include_names_both_files() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("main.conf"), "a=1\n\ninclude missing.conf\n").unwrap();

    let err = Tree::load(temp_dir.path().join("main.conf")).unwrap_err();
    match &err {
        TreeError::Include {
            line,
            include,
            source,
            ..
        } => {
            assert_eq!(*line, 3);
            assert!(include.ends_with("missing.conf"));
            assert!(matches!(**source, TreeError::Io(_)));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = Tree::load(temp_dir.path().join("nope.conf")).unwrap_err();
    assert!(matches!(err, TreeError::Io(_)));
}

#[test]
fn test_merge_file_into_stacked_scope() {
    let temp_dir = TempDir::new().unwrap();
    let base_path = temp_dir.path().join("base.conf");
    let site_path = temp_dir.path().join("site.conf");
    fs::write(&base_path, "log.level=warn\nlog.file=/var/log/app.log\n").unwrap();
    fs::write(&site_path, "log.level=debug\n").unwrap();

    let (mut tree, base) = Tree::load(&base_path).unwrap();
    let site = tree.with(base, &Default::default());
    tree.merge_file(site, &site_path).unwrap();

    assert_eq!(tree.get_string(site, "log.level"), "debug");
    assert_eq!(tree.get_string(site, "log.file"), "/var/log/app.log");
    assert_eq!(tree.get_string(base, "log.level"), "warn");
}
