//! Unit tests for the field accessor record.

use rstest::rstest;

use super::*;
use crate::error::SetError;
use crate::source::MockTagRecord;

fn title_field() -> Field {
    Field::new("Title", FieldKind::WideText, |record| {
        record.title().map(FieldValue::Text)
    })
}

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

#[test]
fn flags_combine_with_bitor() {
    let flags = FieldFlags::NONE | FieldFlags::EDIT;
    assert!(flags.contains(FieldFlags::EDIT));
    assert_eq!(flags.bits(), FieldFlags::EDIT.bits());
}

#[test]
fn none_contains_none_but_not_edit() {
    assert!(FieldFlags::NONE.contains(FieldFlags::NONE));
    assert!(!FieldFlags::NONE.contains(FieldFlags::EDIT));
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn new_field_is_read_only() {
    let field = title_field();
    assert_eq!(field.name(), "Title");
    assert_eq!(field.kind(), FieldKind::WideText);
    assert_eq!(field.unit(), "");
    assert!(field.choices().is_empty());
    assert!(!field.is_editable());
    assert_eq!(field.flags(), FieldFlags::NONE);
}

#[test]
fn editable_raises_the_edit_flag() {
    let field = title_field().editable(|record, value| {
        let text = value.as_text().ok_or_else(|| SetError::InvalidValue {
            name: String::from("Title"),
            message: String::from("expected text"),
        })?;
        record.set_title(text);
        Ok(())
    });
    assert!(field.is_editable());
    assert!(field.flags().contains(FieldFlags::EDIT));
}

// ---------------------------------------------------------------------------
// Units text
// ---------------------------------------------------------------------------

#[rstest]
#[case::plain_unit(FieldKind::Numeric32, "kbps", &[], "kbps")]
#[case::no_unit(FieldKind::WideText, "", &[], "")]
#[case::choices(FieldKind::MultipleChoice, "", &["mono", "stereo"], "mono|stereo")]
fn units_text_prefers_choices_for_multiple_choice(
    #[case] kind: FieldKind,
    #[case] unit: &'static str,
    #[case] choices: &'static [&'static str],
    #[case] expected: &str,
) {
    let field = Field::new("Channels", kind, |_| None)
        .with_unit(unit)
        .with_choices(choices);
    assert_eq!(field.units_text(), expected);
}

// ---------------------------------------------------------------------------
// Accessor dispatch
// ---------------------------------------------------------------------------

#[test]
fn read_delegates_to_the_accessor() {
    let mut record = MockTagRecord::new();
    record
        .expect_title()
        .returning(|| Some(String::from("Blue Train")));

    let value = title_field().read(&record);
    assert_eq!(value, Some(FieldValue::Text(String::from("Blue Train"))));
}

#[test]
fn read_reports_missing_data_as_none() {
    let mut record = MockTagRecord::new();
    record.expect_title().returning(|| None);

    assert_eq!(title_field().read(&record), None);
}

#[test]
fn write_on_read_only_field_fails() {
    let mut record = MockTagRecord::new();
    let err = title_field()
        .write(&mut record, &FieldValue::Text(String::from("x")))
        .expect_err("read-only field must reject writes");
    assert!(matches!(err, SetError::ReadOnly { .. }));
}

#[test]
fn write_delegates_to_the_accessor() {
    let mut record = MockTagRecord::new();
    record
        .expect_set_title()
        .withf(|value| value == "Giant Steps")
        .times(1)
        .return_const(());

    let field = title_field().editable(|rec, value| {
        let text = value.as_text().ok_or_else(|| SetError::InvalidValue {
            name: String::from("Title"),
            message: String::from("expected text"),
        })?;
        rec.set_title(text);
        Ok(())
    });

    field
        .write(&mut record, &FieldValue::Text(String::from("Giant Steps")))
        .expect("write succeeds");
}

#[test]
fn kind_display_matches_as_str() {
    assert_eq!(FieldKind::MultipleChoice.to_string(), "multiple-choice");
    assert_eq!(FieldKind::Numeric32.to_string(), "numeric-32");
}

#[test]
fn value_accessors_discriminate() {
    let text = FieldValue::Text(String::from("x"));
    assert_eq!(text.as_text(), Some("x"));
    assert_eq!(text.as_numeric(), None);

    let num = FieldValue::Numeric(7);
    assert_eq!(num.as_numeric(), Some(7));
    assert_eq!(num.as_text(), None);
}
