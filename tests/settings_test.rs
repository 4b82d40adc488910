use frender::error::Error;
use frender::settings::{resolve, Settings};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_resolve_precedence() {
    assert_eq!(resolve(Some(1), Some(2), Some(3)), Some(1));
    assert_eq!(resolve(None, Some(2), Some(3)), Some(2));
    assert_eq!(resolve(None::<i32>, None, Some(3)), Some(3));
    assert_eq!(resolve(None::<i32>, None, None), None);
}

#[test]
fn test_load_missing_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let settings = Settings::load(temp_dir.path().join("config"));
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_load_parses_known_keys() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config");
    fs::write(&path, "ENV_FILE=env.yaml\nMACROS_DIR=macros\nFILTERS_DIR=\nUNKNOWN=x\n")
        .unwrap();

    let settings = Settings::load(&path);
    assert_eq!(settings.env_file, Some(PathBuf::from("env.yaml")));
    assert_eq!(settings.macros_dir, Some(PathBuf::from("macros")));
    assert_eq!(settings.filters_dir, None);
}

#[test]
fn test_save_and_reload_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".frender").join("config");

    let settings = Settings {
        env_file: Some(PathBuf::from("ctx.toml")),
        macros_dir: None,
        filters_dir: Some(PathBuf::from("filters")),
    };
    settings.save(&path).unwrap();

    let reloaded = Settings::load(&path);
    assert_eq!(reloaded, settings);
}

#[test]
fn test_save_failure_is_a_write_error() {
    let temp_dir = TempDir::new().unwrap();
    // A config path whose parent is a regular file cannot be created.
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    match Settings::default().save(blocker.join("config")) {
        Err(Error::Write { path, .. }) => {
            assert!(path.contains("config"));
        }
        other => panic!("Expected Write error, got {:?}", other),
    }
}
