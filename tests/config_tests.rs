//! Tests for loading patch options from disk.

use std::io::Write;

use dcf::{PatchOptions, load_options};

#[test]
fn test_load_options_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, r#"{{ "looseIncludes": "true", "bare": false }}"#).expect("write options");

    let options = load_options(file.path()).expect("options should load");
    assert_eq!(options, PatchOptions::default().with_loose_includes(true));
}

#[test]
fn test_load_options_missing_file_names_the_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("missing.json");

    let err = load_options(&path).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("failed to read options file"), "{message}");
    assert!(message.contains("missing.json"), "{message}");
}

#[test]
fn test_load_options_rejects_malformed_json() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, r#"{{ "looseIncludes": "maybe" }}"#).expect("write options");

    let err = load_options(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("failed to parse options file"));
}
