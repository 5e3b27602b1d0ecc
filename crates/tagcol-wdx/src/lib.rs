//! Content-plugin boundary for the tagcol audio metadata provider.
//!
//! Builds as a `cdylib` exporting the WDX content-plugin entry points and
//! as an `rlib` so the exports can be driven directly from tests. The
//! crate is a thin adapter: [`entry`] owns the process-wide session and
//! the exported functions, [`marshal`] converts between host buffers and
//! Rust strings, and [`codes`] pins the integer vocabulary the interface
//! speaks.
//!
//! Nothing in this crate interprets audio metadata; that lives in
//! `tagcol-core` (the field model and session protocol) and `tagcol-lofty`
//! (the file backend).

pub mod codes;
pub mod entry;
pub mod marshal;

pub use entry::{ContentDefaultParamStruct, MAX_PATH};
