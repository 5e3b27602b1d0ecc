//! Unit tests for the domain error types.

use std::path::PathBuf;

use super::*;

#[test]
fn duplicate_index_names_the_index() {
    let err = RegistryError::DuplicateIndex { index: 3 };
    assert!(err.to_string().contains("index 3"));
}

#[test]
fn open_error_names_the_path() {
    let err = SourceError::Open {
        path: PathBuf::from("/music/missing.mp3"),
        message: String::from("no such file"),
    };
    assert!(err.to_string().contains("missing.mp3"));
    assert!(err.to_string().contains("no such file"));
}

#[test]
fn value_error_wraps_source_error() {
    let source = SourceError::Open {
        path: PathBuf::from("/music/a.flac"),
        message: String::from("truncated header"),
    };
    let err = ValueError::from(source);
    assert!(matches!(err, ValueError::Source { .. }));
    assert!(err.to_string().contains("truncated header"));
}

#[test]
fn set_error_wraps_source_error() {
    let source = SourceError::Save {
        path: PathBuf::from("/music/a.flac"),
        message: String::from("read-only filesystem"),
    };
    let err = SetError::from(source);
    assert!(matches!(err, SetError::Source { .. }));
}

#[test]
fn read_only_names_the_field() {
    let err = SetError::ReadOnly {
        name: String::from("Bitrate"),
    };
    assert_eq!(err.to_string(), "field 'Bitrate' is not editable");
}
