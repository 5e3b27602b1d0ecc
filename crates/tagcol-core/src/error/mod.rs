//! Domain errors raised by field registry and value operations.
//!
//! All errors use `thiserror`-derived enums with structured context so the
//! boundary layer can map every variant exhaustively onto the host's integer
//! result codes. Expected protocol-level conditions (index out of range, file
//! unopenable, no tag data) are ordinary variants here and are never logged
//! as exceptional.

use std::path::PathBuf;

use thiserror::Error;

/// Errors arising while populating a [`FieldRegistry`](crate::FieldRegistry).
///
/// Registration happens once at session initialization; any error here is a
/// fatal initialization defect, not a runtime condition.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two fields were registered at the same index.
    #[error("field index {index} is already registered")]
    DuplicateIndex {
        /// Index that collided.
        index: i32,
    },

    /// A field was registered at a negative index, which the host reserves
    /// for sentinel values.
    #[error("field index {index} is negative")]
    NegativeIndex {
        /// Index that was rejected.
        index: i32,
    },
}

/// Errors reported by a [`TagSource`](crate::TagSource) collaborator.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file could not be opened or contains no recognisable audio data.
    #[error("failed to open '{path}': {message}")]
    Open {
        /// Path that was passed to the source.
        path: PathBuf,
        /// Description from the underlying tagging library.
        message: String,
    },

    /// The tag data could not be written back to the file.
    #[error("failed to save '{path}': {message}")]
    Save {
        /// Path that was being saved.
        path: PathBuf,
        /// Description from the underlying tagging library.
        message: String,
    },
}

/// Errors arising from a value-retrieval request.
#[derive(Debug, Error)]
pub enum ValueError {
    /// The requested index names no registered field.
    #[error("no field at index {index}")]
    NoSuchField {
        /// Index the host supplied.
        index: i32,
    },

    /// The underlying source could not be opened.
    #[error("could not read tags: {source}")]
    Source {
        /// Failure reported by the tag source.
        #[from]
        source: SourceError,
    },

    /// The source opened but the requested field carries no data.
    #[error("field has no data for this file")]
    Empty,
}

/// Errors arising from a value-assignment request.
#[derive(Debug, Error)]
pub enum SetError {
    /// The requested index names no registered field.
    #[error("no field at index {index}")]
    NoSuchField {
        /// Index the host supplied.
        index: i32,
    },

    /// The field declares no write accessor.
    #[error("field '{name}' is not editable")]
    ReadOnly {
        /// Display name of the field.
        name: String,
    },

    /// The supplied value does not match the field's declared type.
    #[error("invalid value for field '{name}': {message}")]
    InvalidValue {
        /// Display name of the field.
        name: String,
        /// Description of the mismatch.
        message: String,
    },

    /// The underlying source could not be opened or saved.
    #[error("could not write tags: {source}")]
    Source {
        /// Failure reported by the tag source.
        #[from]
        source: SourceError,
    },
}

#[cfg(test)]
mod tests;
