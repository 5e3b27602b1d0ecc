//! WDX integer codes and the mapping from crate types onto them.
//!
//! The content-plugin interface speaks in small integers: non-negative
//! codes name field types, negative codes name failures, and the flag
//! query returns a bitmask. Every error the core layers can produce maps
//! onto exactly one code here, so nothing richer than an integer ever
//! crosses the boundary.

use libc::c_int;

use tagcol_core::{FieldFlags, FieldKind, SetError, ValueError};

/// Field enumeration has run past the last registered index.
pub const FT_NOMOREFIELDS: c_int = 0;
/// 32-bit signed integer field type.
pub const FT_NUMERIC_32: c_int = 1;
/// 64-bit signed integer field type.
pub const FT_NUMERIC_64: c_int = 2;
/// Floating-point field type.
pub const FT_NUMERIC_FLOATING: c_int = 3;
/// Calendar date field type.
pub const FT_DATE: c_int = 4;
/// Wall-clock time field type.
pub const FT_TIME: c_int = 5;
/// Boolean field type.
pub const FT_BOOLEAN: c_int = 6;
/// One value out of a fixed choice list.
pub const FT_MULTIPLECHOICE: c_int = 7;
/// Narrow string field type.
pub const FT_STRING: c_int = 8;
/// Full-text (chunked narrow string) field type.
pub const FT_FULLTEXT: c_int = 9;
/// Combined date and time field type.
pub const FT_DATETIME: c_int = 10;
/// Wide (UTF-16) string field type.
pub const FT_STRINGW: c_int = 11;

/// The requested field index is not registered.
pub const FT_NOSUCHFIELD: c_int = -1;
/// The file could not be opened, read, or saved.
pub const FT_FILEERROR: c_int = -2;
/// The file opened but carries no value for the field.
pub const FT_FIELDEMPTY: c_int = -3;
/// The value is expensive and was deferred (unused by this plugin).
pub const FT_ONDEMAND: c_int = -4;
/// The operation is not supported for this field.
pub const FT_NOTSUPPORTED: c_int = -5;
/// The host cancelled a value assignment (unused by this plugin).
pub const FT_SETCANCEL: c_int = -6;
/// A value assignment completed.
pub const FT_SETSUCCESS: c_int = 0;

/// Bit in the flags answer marking a field as editable.
pub const CONTFLAGS_EDIT: c_int = 1;

/// Maps a field's declared kind onto its wire type code.
#[must_use]
pub const fn field_kind_code(kind: FieldKind) -> c_int {
    match kind {
        FieldKind::Text => FT_STRING,
        FieldKind::WideText => FT_STRINGW,
        FieldKind::Numeric32 => FT_NUMERIC_32,
        FieldKind::Date => FT_DATE,
        FieldKind::MultipleChoice => FT_MULTIPLECHOICE,
    }
}

/// Maps a retrieval failure onto its wire code.
#[must_use]
pub const fn value_error_code(err: &ValueError) -> c_int {
    match err {
        ValueError::NoSuchField { .. } => FT_NOSUCHFIELD,
        ValueError::Source { .. } => FT_FILEERROR,
        ValueError::Empty => FT_FIELDEMPTY,
    }
}

/// Maps an assignment failure onto its wire code.
///
/// A write to a read-only field answers "no such field": the host asked
/// for an operation the field does not exist for, and that is the code
/// hosts expect for fields they were never told are editable.
#[must_use]
pub const fn set_error_code(err: &SetError) -> c_int {
    match err {
        SetError::NoSuchField { .. } | SetError::ReadOnly { .. } => FT_NOSUCHFIELD,
        SetError::InvalidValue { .. } | SetError::Source { .. } => FT_FILEERROR,
    }
}

/// Renders a flag set as the wire bitmask.
#[must_use]
pub fn flags_code(flags: FieldFlags) -> c_int {
    c_int::try_from(flags.bits()).unwrap_or(c_int::MAX)
}

#[cfg(test)]
mod tests;
