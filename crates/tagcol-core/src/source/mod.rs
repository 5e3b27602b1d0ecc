//! Collaborator traits for the external tagging library.
//!
//! The session never parses audio files itself. It opens them through a
//! [`TagSource`] and reads or writes individual values through the returned
//! [`TagRecord`]. Every value operation opens and releases its own record;
//! there is no pooling or handle reuse.
//!
//! The lifecycle hooks on [`TagSource`] surface the host protocol's
//! end-of-edit-batch and unload notifications to backends that need to flush
//! or release library state. Both default to no-ops.

use std::path::Path;

use crate::error::SourceError;

/// Audio stream properties reported by a tag source.
///
/// Every property is optional: a container may omit any of them, and a
/// backend that cannot determine one reports `None` rather than guessing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AudioProperties {
    bitrate_kbps: Option<u32>,
    sample_rate_hz: Option<u32>,
    channels: Option<u8>,
    duration_secs: Option<u64>,
}

impl AudioProperties {
    /// Creates a property bundle from whatever the backend could determine.
    #[must_use]
    pub const fn new(
        bitrate_kbps: Option<u32>,
        sample_rate_hz: Option<u32>,
        channels: Option<u8>,
        duration_secs: Option<u64>,
    ) -> Self {
        Self {
            bitrate_kbps,
            sample_rate_hz,
            channels,
            duration_secs,
        }
    }

    /// Returns the audio bitrate in kilobits per second.
    #[must_use]
    pub const fn bitrate_kbps(self) -> Option<u32> {
        self.bitrate_kbps
    }

    /// Returns the sample rate in hertz.
    #[must_use]
    pub const fn sample_rate_hz(self) -> Option<u32> {
        self.sample_rate_hz
    }

    /// Returns the channel count.
    #[must_use]
    pub const fn channels(self) -> Option<u8> {
        self.channels
    }

    /// Returns the stream duration in whole seconds.
    #[must_use]
    pub const fn duration_secs(self) -> Option<u64> {
        self.duration_secs
    }
}

/// One opened file's tag data, exposed through the tagging library's native
/// accessor model.
///
/// Read accessors return `None` when the file carries no tag container or
/// the container has no value for that slot; the session reports that as the
/// field-empty condition, not as an error. Setters operate on an in-memory
/// tag; nothing reaches the file until [`TagRecord::save`] is called.
#[cfg_attr(test, mockall::automock)]
pub trait TagRecord {
    /// Returns the track title.
    fn title(&self) -> Option<String>;
    /// Returns the performing artist.
    fn artist(&self) -> Option<String>;
    /// Returns the album name.
    fn album(&self) -> Option<String>;
    /// Returns the genre.
    fn genre(&self) -> Option<String>;
    /// Returns the free-form comment.
    fn comment(&self) -> Option<String>;
    /// Returns the release year.
    fn year(&self) -> Option<u32>;
    /// Returns the track number.
    fn track(&self) -> Option<u32>;

    /// Replaces the track title.
    fn set_title(&mut self, value: &str);
    /// Replaces the performing artist.
    fn set_artist(&mut self, value: &str);
    /// Replaces the album name.
    fn set_album(&mut self, value: &str);
    /// Replaces the genre.
    fn set_genre(&mut self, value: &str);
    /// Replaces the free-form comment.
    fn set_comment(&mut self, value: &str);
    /// Replaces the release year.
    fn set_year(&mut self, value: u32);
    /// Replaces the track number.
    fn set_track(&mut self, value: u32);

    /// Returns the audio stream properties.
    fn properties(&self) -> AudioProperties;

    /// Writes the in-memory tag back to the file.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Save`] if the underlying library could not
    /// persist the tag.
    fn save(&mut self) -> Result<(), SourceError>;
}

/// Capability to open files and expose their embedded metadata.
///
/// The session treats a tag source as an opaque `open(path) -> record`
/// capability plus a detect-string provider and two lifecycle hooks.
#[cfg_attr(test, mockall::automock)]
pub trait TagSource {
    /// Opens the file at `path` and returns its tag record.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Open`] if the file does not exist or the
    /// library cannot recognise its format.
    fn open(&self, path: &Path) -> Result<Box<dyn TagRecord>, SourceError>;

    /// Returns the signature string the host uses to decide which files
    /// this plugin claims. Pure and deterministic.
    fn detect_string(&self) -> String;

    /// Called once per end-of-edit-batch sentinel so the backend can flush
    /// or commit pending work.
    fn end_of_batch(&self) {}

    /// Called when the host is about to unload the plugin.
    fn unloading(&self) {}
}
