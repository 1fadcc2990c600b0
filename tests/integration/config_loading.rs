//! Integration tests for loading the tool's own configuration

use layertree::config::{global_config_path, ConfigLoader};
use layertree::TreeError;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::integration::with_config_env;

#[test]
fn test_defaults_without_any_file() {
    let test_dir = TempDir::new().unwrap();
    with_config_env(&test_dir, || {
        let config = ConfigLoader::load(None).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.output, "stderr");
        assert!(config.layers.is_empty());
    });
}

#[test]
fn test_global_file_under_xdg_config_home() {
    let test_dir = TempDir::new().unwrap();
    with_config_env(&test_dir, || {
        let path = global_config_path().unwrap();
        assert_eq!(path, test_dir.path().join("layertree").join("config.toml"));

        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "layers = [\"/etc/app/base.conf\"]\n[logging]\nlevel = \"info\"\n")
            .unwrap();

        let config = ConfigLoader::load(None).unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.layers, vec![PathBuf::from("/etc/app/base.conf")]);
    });
}

#[test]
fn test_explicit_file_overrides_global() {
    let test_dir = TempDir::new().unwrap();
    with_config_env(&test_dir, || {
        let global = global_config_path().unwrap();
        fs::create_dir_all(global.parent().unwrap()).unwrap();
        fs::write(&global, "[logging]\nlevel = \"info\"\nformat = \"json\"\n").unwrap();

        let explicit = test_dir.path().join("explicit.toml");
        fs::write(&explicit, "[logging]\nlevel = \"trace\"\n").unwrap();

        let config = ConfigLoader::load(Some(&explicit)).unwrap();
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.logging.format, "json");
    });
}

#[test]
fn test_environment_overrides_files() {
    let test_dir = TempDir::new().unwrap();
    with_config_env(&test_dir, || {
        let explicit = test_dir.path().join("explicit.toml");
        fs::write(&explicit, "[logging]\nlevel = \"trace\"\n").unwrap();

        std::env::set_var("LAYERTREE__LOGGING__LEVEL", "error");
        std::env::set_var("LAYERTREE__LAYERS", "a.conf,b.conf");
        let config = ConfigLoader::load(Some(&explicit)).unwrap();

        assert_eq!(config.logging.level, "error");
        assert_eq!(
            config.layers,
            vec![PathBuf::from("a.conf"), PathBuf::from("b.conf")]
        );
    });
}

#[test]
fn test_missing_explicit_file() {
    let test_dir = TempDir::new().unwrap();
    with_config_env(&test_dir, || {
        let err = ConfigLoader::load(Some(&test_dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, TreeError::Config(_)));
    });
}

#[test]
fn test_malformed_file() {
    let test_dir = TempDir::new().unwrap();
    with_config_env(&test_dir, || {
        let explicit = test_dir.path().join("broken.toml");
        fs::write(&explicit, "[logging\nlevel = ").unwrap();
        assert!(matches!(
            ConfigLoader::load(Some(&explicit)),
            Err(TreeError::Config(_))
        ));
    });
}
