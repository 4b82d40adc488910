use frender::context::load_context;
use frender::error::Error;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_env_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".env");
    fs::write(&path, "FOO=bar\nBAR=baz\n").unwrap();

    let ctx = load_context(&path).unwrap();
    assert_eq!(ctx["FOO"], json!("bar"));
    assert_eq!(ctx["BAR"], json!("baz"));
}

#[test]
fn test_load_env_file_ignores_comments_and_quotes() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".env");
    fs::write(&path, "# comment\n\nexport KEY=\"quoted value\"\nPLAIN='single'\nnoequals\n")
        .unwrap();

    let ctx = load_context(&path).unwrap();
    assert_eq!(ctx["KEY"], json!("quoted value"));
    assert_eq!(ctx["PLAIN"], json!("single"));
    assert_eq!(ctx.len(), 2);
}

#[test]
fn test_load_json_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.json");
    fs::write(&path, r#"{"key": "val", "nested": {"inner": 1}}"#).unwrap();

    let ctx = load_context(&path).unwrap();
    assert_eq!(ctx["key"], json!("val"));
    assert_eq!(ctx["nested"]["inner"], json!(1));
}

#[test]
fn test_load_yaml_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.yaml");
    fs::write(&path, "foo: bar\n").unwrap();

    let ctx = load_context(&path).unwrap();
    assert_eq!(ctx["foo"], json!("bar"));
}

#[test]
fn test_load_toml_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.toml");
    fs::write(&path, "[section]\nkey = 'value'\n").unwrap();

    let ctx = load_context(&path).unwrap();
    assert_eq!(ctx["section"]["key"], json!("value"));
}

#[test]
fn test_load_ini_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.ini");
    fs::write(&path, "top=level\n[section]\n; comment\nkey=value\n").unwrap();

    let ctx = load_context(&path).unwrap();
    assert_eq!(ctx["top"], json!("level"));
    assert_eq!(ctx["section"]["key"], json!("value"));
}

#[test]
fn test_equivalent_documents_load_equal_mappings() {
    let temp_dir = TempDir::new().unwrap();

    let json_path = temp_dir.path().join("ctx.json");
    fs::write(&json_path, r#"{"key1": "foo", "key2": "bar", "key3": {"test": "baz"}}"#)
        .unwrap();

    let yaml_path = temp_dir.path().join("ctx.yaml");
    fs::write(&yaml_path, "key1: foo\nkey2: bar\nkey3:\n  test: baz\n").unwrap();

    let toml_path = temp_dir.path().join("ctx.toml");
    fs::write(&toml_path, "key1 = \"foo\"\nkey2 = \"bar\"\n\n[key3]\ntest = \"baz\"\n")
        .unwrap();

    let ini_path = temp_dir.path().join("ctx.ini");
    fs::write(&ini_path, "key1=foo\nkey2=bar\n[key3]\ntest=baz\n").unwrap();

    let from_json = load_context(&json_path).unwrap();
    let from_yaml = load_context(&yaml_path).unwrap();
    let from_toml = load_context(&toml_path).unwrap();
    let from_ini = load_context(&ini_path).unwrap();

    assert_eq!(Value::Object(from_json.clone()), Value::Object(from_yaml));
    assert_eq!(Value::Object(from_json.clone()), Value::Object(from_toml));
    assert_eq!(Value::Object(from_json), Value::Object(from_ini));

    // Env-style cannot express nesting but agrees on the flat keys.
    let env_path = temp_dir.path().join("ctx");
    fs::write(&env_path, "key1=foo\nkey2=bar\n").unwrap();
    let from_env = load_context(&env_path).unwrap();
    assert_eq!(from_env["key1"], json!("foo"));
    assert_eq!(from_env["key2"], json!("bar"));
}

#[test]
fn test_nonexistent_path_yields_empty_mapping() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = load_context(temp_dir.path().join("missing.yaml")).unwrap();
    assert!(ctx.is_empty());
}

#[test]
fn test_parse_failure_names_the_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "{not json").unwrap();

    match load_context(&path) {
        Err(Error::ContextParse { path: p, .. }) => assert!(p.contains("broken.json")),
        other => panic!("Expected ContextParse error, got {:?}", other),
    }
}
