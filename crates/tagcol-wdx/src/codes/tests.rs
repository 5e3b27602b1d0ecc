//! Unit tests for the wire-code mapping.

use std::path::PathBuf;

use rstest::rstest;

use tagcol_core::SourceError;

use super::*;

fn source_error() -> SourceError {
    SourceError::Open {
        path: PathBuf::from("/music/a.mp3"),
        message: String::from("unrecognised format"),
    }
}

// ---------------------------------------------------------------------------
// Field kinds
// ---------------------------------------------------------------------------

#[rstest]
#[case(FieldKind::Text, FT_STRING)]
#[case(FieldKind::WideText, FT_STRINGW)]
#[case(FieldKind::Numeric32, FT_NUMERIC_32)]
#[case(FieldKind::Date, FT_DATE)]
#[case(FieldKind::MultipleChoice, FT_MULTIPLECHOICE)]
fn every_kind_has_a_distinct_code(#[case] kind: FieldKind, #[case] code: c_int) {
    assert_eq!(field_kind_code(kind), code);
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

#[test]
fn retrieval_failures_map_exhaustively() {
    assert_eq!(
        value_error_code(&ValueError::NoSuchField { index: 42 }),
        FT_NOSUCHFIELD
    );
    assert_eq!(
        value_error_code(&ValueError::Source {
            source: source_error()
        }),
        FT_FILEERROR
    );
    assert_eq!(value_error_code(&ValueError::Empty), FT_FIELDEMPTY);
}

#[test]
fn assignment_failures_map_exhaustively() {
    assert_eq!(
        set_error_code(&SetError::NoSuchField { index: 42 }),
        FT_NOSUCHFIELD
    );
    assert_eq!(
        set_error_code(&SetError::ReadOnly {
            name: String::from("Bitrate")
        }),
        FT_NOSUCHFIELD
    );
    assert_eq!(
        set_error_code(&SetError::InvalidValue {
            name: String::from("Year"),
            message: String::from("negative")
        }),
        FT_FILEERROR
    );
    assert_eq!(
        set_error_code(&SetError::Source {
            source: source_error()
        }),
        FT_FILEERROR
    );
}

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

#[test]
fn flag_bits_pass_through() {
    assert_eq!(flags_code(FieldFlags::NONE), 0);
    assert_eq!(flags_code(FieldFlags::EDIT), CONTFLAGS_EDIT);
}
