//! Advisory cancel state for in-flight value retrieval.
//!
//! The host may signal that the user cancelled a long batch retrieval. The
//! session only records that intent here; nothing is preempted. A field
//! accessor that wants to short-circuit expensive work can poll
//! [`AbortState::is_aborted`], and a new retrieval request implicitly
//! supersedes any previous cancel by clearing this state.

/// One session's cancel flag plus the filename it applies to.
///
/// The filename is meaningful only while the state is aborted. Clearing a
/// state that is not aborted must leave the filename untouched; the
/// filename is reset only on the aborted-to-clear transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbortState {
    aborted: bool,
    filename: String,
}

impl AbortState {
    /// Creates a clear (not aborted) state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the session aborted for `filename`. Idempotent.
    pub fn set(&mut self, filename: impl Into<String>) {
        self.filename = filename.into();
        self.aborted = true;
    }

    /// Clears the abort flag.
    ///
    /// The filename is emptied first, and only when the previous state was
    /// aborted; clearing an already-clear state is a pure no-op.
    pub fn clear(&mut self) {
        if self.aborted {
            self.filename.clear();
        }
        self.aborted = false;
    }

    /// Returns `true` while an abort is recorded.
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Returns the filename the abort applies to.
    #[must_use]
    pub const fn filename(&self) -> &str {
        self.filename.as_str()
    }
}
