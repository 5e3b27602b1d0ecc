//! Production tag source backed by the `lofty` tagging library.
//!
//! `tagcol-lofty` adapts lofty's multi-format tag model to the
//! [`TagSource`](tagcol_core::TagSource)/[`TagRecord`](tagcol_core::TagRecord)
//! collaborator contract the session dispatches through. Each value
//! operation opens its own [`lofty::file::TaggedFile`] and releases it when
//! the record drops; setters stage changes on the in-memory tag and
//! [`TagRecord::save`](tagcol_core::TagRecord::save) persists them.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tagcol_core::TagSource;
//! use tagcol_lofty::LoftySource;
//!
//! let source = LoftySource::new();
//! let record = source.open(Path::new("/music/a.flac")).expect("open");
//! println!("{:?}", record.title());
//! ```

pub mod record;
pub mod source;

#[cfg(test)]
mod tests;

pub use self::record::LoftyRecord;
pub use self::source::LoftySource;
