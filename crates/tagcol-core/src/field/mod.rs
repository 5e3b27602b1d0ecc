//! The field accessor record: one named, typed, flagged metadata slot.
//!
//! A [`Field`] replaces the original inheritance-based field subclasses with
//! a plain record holding function references: a read accessor and an
//! optional write accessor over the [`TagRecord`] collaborator. Many field
//! kinds share one dispatch point without virtual dispatch.
//!
//! Fields are constructed once at session initialization, are immutable
//! afterwards, and are owned exclusively by the
//! [`FieldRegistry`](crate::FieldRegistry).

use std::ops::{BitOr, BitOrAssign};

use crate::error::SetError;
use crate::source::TagRecord;

/// Semantic type of a field's value.
///
/// # Example
///
/// ```
/// use tagcol_core::FieldKind;
///
/// let kind = FieldKind::WideText;
/// assert_eq!(kind.as_str(), "wide-text");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Narrow text.
    Text,
    /// Wide (UTF-16 at the boundary) text.
    WideText,
    /// 32-bit signed integer.
    Numeric32,
    /// Calendar date.
    Date,
    /// One value out of a fixed choice list.
    MultipleChoice,
}

impl FieldKind {
    /// Returns the canonical kebab-case string for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::WideText => "wide-text",
            Self::Numeric32 => "numeric-32",
            Self::Date => "date",
            Self::MultipleChoice => "multiple-choice",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability flag bitset for a field.
///
/// Currently only the editable bit is defined; the type exists so that the
/// aggregate-flags query stays well-typed as bits are added.
///
/// # Example
///
/// ```
/// use tagcol_core::FieldFlags;
///
/// let flags = FieldFlags::NONE | FieldFlags::EDIT;
/// assert!(flags.contains(FieldFlags::EDIT));
/// assert_eq!(flags.bits(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FieldFlags(u32);

impl FieldFlags {
    /// No capabilities.
    pub const NONE: Self = Self(0);
    /// The field accepts value assignment.
    pub const EDIT: Self = Self(1);

    /// Returns the raw bit representation.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` when every bit in `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for FieldFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FieldFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// A single value read from or written to a tag record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Textual value, shared by narrow, wide, and choice fields.
    Text(String),
    /// 32-bit numeric value.
    Numeric(i32),
}

impl FieldValue {
    /// Returns the text payload, if this is a textual value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Numeric(_) => None,
        }
    }

    /// Returns the numeric payload, if this is a numeric value.
    #[must_use]
    pub const fn as_numeric(&self) -> Option<i32> {
        match self {
            Self::Text(_) => None,
            Self::Numeric(value) => Some(*value),
        }
    }
}

/// Read accessor: extracts this field's value from an open record.
pub type ReadFn = fn(&dyn TagRecord) -> Option<FieldValue>;

/// Write accessor: applies a value to an open record's in-memory tag.
pub type WriteFn = fn(&mut dyn TagRecord, &FieldValue) -> Result<(), SetError>;

/// A named, typed, flagged metadata accessor.
///
/// # Example
///
/// ```
/// use tagcol_core::{Field, FieldFlags, FieldKind, FieldValue};
///
/// let field = Field::new("Title", FieldKind::WideText, |record| {
///     record.title().map(FieldValue::Text)
/// });
/// assert_eq!(field.name(), "Title");
/// assert!(!field.flags().contains(FieldFlags::EDIT));
/// ```
#[derive(Debug, Clone)]
pub struct Field {
    name: &'static str,
    kind: FieldKind,
    unit: &'static str,
    choices: &'static [&'static str],
    flags: FieldFlags,
    read: ReadFn,
    write: Option<WriteFn>,
}

impl Field {
    /// Creates a read-only field with no unit and no choice list.
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind, read: ReadFn) -> Self {
        Self {
            name,
            kind,
            unit: "",
            choices: &[],
            flags: FieldFlags::NONE,
            read,
            write: None,
        }
    }

    /// Sets the display unit.
    #[must_use]
    pub const fn with_unit(mut self, unit: &'static str) -> Self {
        self.unit = unit;
        self
    }

    /// Sets the ordered list of valid discrete values.
    #[must_use]
    pub const fn with_choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = choices;
        self
    }

    /// Attaches a write accessor and raises the editable flag.
    #[must_use]
    pub const fn editable(mut self, write: WriteFn) -> Self {
        self.write = Some(write);
        self.flags = FieldFlags::EDIT;
        self
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the semantic type.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns the display unit, empty when not applicable.
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        self.unit
    }

    /// Returns the valid discrete values, empty for free-form fields.
    #[must_use]
    pub const fn choices(&self) -> &'static [&'static str] {
        self.choices
    }

    /// Returns the capability flags.
    #[must_use]
    pub const fn flags(&self) -> FieldFlags {
        self.flags
    }

    /// Returns `true` when a write accessor is attached.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        self.write.is_some()
    }

    /// Returns the text the host displays in the units column: the choice
    /// list (`|`-separated) for multiple-choice fields, the unit otherwise.
    #[must_use]
    pub fn units_text(&self) -> String {
        match self.kind {
            FieldKind::MultipleChoice => self.choices.join("|"),
            _ => self.unit.to_owned(),
        }
    }

    /// Reads this field's value from an open record.
    #[must_use]
    pub fn read(&self, record: &dyn TagRecord) -> Option<FieldValue> {
        (self.read)(record)
    }

    /// Writes a value to an open record's in-memory tag.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::ReadOnly`] when no write accessor is attached,
    /// or whatever the accessor itself reports.
    pub fn write(&self, record: &mut dyn TagRecord, value: &FieldValue) -> Result<(), SetError> {
        match self.write {
            Some(write) => write(record, value),
            None => Err(SetError::ReadOnly {
                name: self.name.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests;
