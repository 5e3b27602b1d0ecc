//! Ordered field registry with index-based lookup.
//!
//! The host enumerates fields by incrementing an integer index until the
//! registry reports no more entries, so index order is host-visible and
//! lookup misses are a defined "no more fields" condition rather than an
//! error. Registration is append-only at startup and duplicate indices are
//! a fatal initialization error.

use std::collections::BTreeMap;

use crate::error::RegistryError;
use crate::field::{Field, FieldFlags};

/// Ordered collection of [`Field`]s keyed by stable integer index.
///
/// # Example
///
/// ```
/// use tagcol_core::{Field, FieldKind, FieldRegistry, FieldValue};
///
/// let mut registry = FieldRegistry::new();
/// registry
///     .register(0, Field::new("Title", FieldKind::WideText, |record| {
///         record.title().map(FieldValue::Text)
///     }))
///     .expect("registration succeeds");
/// assert_eq!(registry.count(), 1);
/// assert!(registry.get(1).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: BTreeMap<i32, Field>,
}

impl FieldRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a field at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NegativeIndex`] for indices the host
    /// reserves as sentinels, and [`RegistryError::DuplicateIndex`] when
    /// the index is already occupied.
    pub fn register(&mut self, index: i32, field: Field) -> Result<(), RegistryError> {
        if index < 0 {
            return Err(RegistryError::NegativeIndex { index });
        }
        if self.fields.contains_key(&index) {
            return Err(RegistryError::DuplicateIndex { index });
        }
        self.fields.insert(index, field);
        Ok(())
    }

    /// Returns the number of registered fields.
    #[must_use]
    pub fn count(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` when no fields are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Looks up the field at `index`.
    ///
    /// `None` is the "no more fields" condition the host's enumeration
    /// loop terminates on; callers must never treat it as a hard error.
    #[must_use]
    pub fn get(&self, index: i32) -> Option<&Field> {
        self.fields.get(&index)
    }

    /// Returns the bitwise OR of every registered field's flags.
    ///
    /// Answers the host's capability query for the sentinel "all fields
    /// combined" index. Zero when the registry is empty.
    #[must_use]
    pub fn aggregate_flags(&self) -> FieldFlags {
        self.fields
            .values()
            .fold(FieldFlags::NONE, |acc, field| acc | field.flags())
    }
}
