//! The lofty-backed tag source and its detect string.

use std::path::Path;

use tracing::debug;

use tagcol_core::{SourceError, TagRecord, TagSource};

use crate::record::LoftyRecord;

/// Log target for backend tracing.
const SOURCE_TARGET: &str = "tagcol::lofty";

/// File extensions this backend claims, as presented in the detect string.
const SUPPORTED_EXTENSIONS: &[&str] = &[
    "MP3", "FLAC", "OGG", "OPUS", "SPX", "M4A", "MP4", "AAC", "APE", "MPC", "WV", "WAV", "AIFF",
    "AIF",
];

/// [`TagSource`] implementation delegating to the `lofty` library.
///
/// Stateless: every [`open`](TagSource::open) probes the file fresh and the
/// returned record owns the parsed representation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftySource;

impl LoftySource {
    /// Creates the backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TagSource for LoftySource {
    fn open(&self, path: &Path) -> Result<Box<dyn TagRecord>, SourceError> {
        debug!(target: SOURCE_TARGET, file = %path.display(), "probing file");
        let file = lofty::read_from_path(path).map_err(|err| SourceError::Open {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Ok(Box::new(LoftyRecord::new(file, path.to_path_buf())))
    }

    fn detect_string(&self) -> String {
        let clauses: Vec<String> = SUPPORTED_EXTENSIONS
            .iter()
            .map(|ext| format!("EXT=\"{ext}\""))
            .collect();
        clauses.join(" | ")
    }
}
