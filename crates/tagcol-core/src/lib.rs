//! Core of the tagcol content plugin: field registry and dispatch protocol.
//!
//! The `tagcol-core` crate implements the contract between a file-manager
//! host that drives metadata columns through stateless, index-based calls
//! and an arbitrary set of pluggable field definitions. The host enumerates
//! fields by incrementing an integer index until a "no more fields" answer,
//! retrieves and assigns values per (file, field index), and signals
//! session-level events — cancel of a long retrieval, end of an edit batch,
//! impending unload — through sentinel call shapes rather than dedicated
//! state.
//!
//! Actual tag parsing and writing is delegated to a [`TagSource`]
//! collaborator (the production backend lives in `tagcol-lofty`); the ABI
//! marshalling lives in `tagcol-wdx`. This crate holds only the model:
//!
//! * [`Field`] — one named, typed, flagged accessor record over a
//!   [`TagRecord`];
//! * [`FieldRegistry`] — ordered index-to-field map with aggregate
//!   capability flags;
//! * [`AbortState`] — the advisory cancel flag and its filename;
//! * [`PluginSession`] — the façade dispatching the full request/response
//!   protocol.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tagcol_core::{PluginSession, standard_registry};
//! # use tagcol_core::{SourceError, TagRecord, TagSource};
//! # struct Backend;
//! # impl TagSource for Backend {
//! #     fn open(&self, path: &Path) -> Result<Box<dyn TagRecord>, SourceError> {
//! #         Err(SourceError::Open { path: path.into(), message: String::new() })
//! #     }
//! #     fn detect_string(&self) -> String { String::new() }
//! # }
//!
//! let registry = standard_registry().expect("catalog is consistent");
//! let mut session = PluginSession::new(registry, Backend);
//! for index in 0.. {
//!     let Some(field) = session.supported_field(index) else { break };
//!     println!("{index}: {} ({})", field.name(), field.kind());
//! }
//! ```

pub mod abort;
pub mod catalog;
pub mod error;
pub mod field;
pub mod registry;
pub mod session;
pub mod source;

#[cfg(test)]
mod tests;

pub use self::abort::AbortState;
pub use self::catalog::standard_registry;
pub use self::error::{RegistryError, SetError, SourceError, ValueError};
pub use self::field::{Field, FieldFlags, FieldKind, FieldValue, ReadFn, WriteFn};
pub use self::registry::FieldRegistry;
pub use self::session::{
    InterfaceVersion, PluginSession, Reading, SENTINEL_INDEX, SetOutcome,
};
pub use self::source::{AudioProperties, TagRecord, TagSource};
