use hero_roster::{Config, RosterError};
use std::io::Write;

#[test]
fn loads_toml_file_with_partial_fields() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "items_per_page = 20").unwrap();
    writeln!(file, "seed = false").unwrap();
    writeln!(file, "trace_file = \"/tmp/spans.jsonl\"").unwrap();

    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.items_per_page, 20);
    assert_eq!(config.debounce_ms, 300);
    assert!(!config.seed);
    assert_eq!(config.trace_file.as_deref(), Some(std::path::Path::new("/tmp/spans.jsonl")));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(RosterError::Io(_))));
}

#[test]
fn zero_page_size_in_file_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "items_per_page = 0").unwrap();

    let err = Config::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("items_per_page"));
}
