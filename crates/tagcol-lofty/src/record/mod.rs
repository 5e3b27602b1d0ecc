//! One opened file's tag data, adapted from lofty's tag model.

use std::path::PathBuf;

use lofty::config::WriteOptions;
use lofty::file::{AudioFile, TaggedFile, TaggedFileExt};
use lofty::tag::{Accessor, Tag, TagExt};

use tagcol_core::{AudioProperties, SourceError, TagRecord};

/// A [`TagRecord`] over one parsed audio file.
///
/// Reads prefer the file's primary tag and fall back to the first tag
/// present, matching lofty's own recommendation for format-agnostic
/// access. Setters create a tag of the file's primary type when the file
/// carries none yet.
pub struct LoftyRecord {
    file: TaggedFile,
    path: PathBuf,
}

impl LoftyRecord {
    pub(crate) const fn new(file: TaggedFile, path: PathBuf) -> Self {
        Self { file, path }
    }

    fn tag(&self) -> Option<&Tag> {
        self.file.primary_tag().or_else(|| self.file.first_tag())
    }

    fn with_tag_mut(&mut self, apply: impl FnOnce(&mut Tag)) {
        if self.file.first_tag().is_none() {
            self.file.insert_tag(Tag::new(self.file.primary_tag_type()));
        }
        let tag = if self.file.primary_tag().is_some() {
            self.file.primary_tag_mut()
        } else {
            self.file.first_tag_mut()
        };
        if let Some(tag) = tag {
            apply(tag);
        }
    }

    fn text(&self, get: impl Fn(&Tag) -> Option<std::borrow::Cow<'_, str>>) -> Option<String> {
        self.tag().and_then(|tag| get(tag).map(|cow| cow.into_owned()))
    }
}

impl TagRecord for LoftyRecord {
    fn title(&self) -> Option<String> {
        self.text(Accessor::title)
    }

    fn artist(&self) -> Option<String> {
        self.text(Accessor::artist)
    }

    fn album(&self) -> Option<String> {
        self.text(Accessor::album)
    }

    fn genre(&self) -> Option<String> {
        self.text(Accessor::genre)
    }

    fn comment(&self) -> Option<String> {
        self.text(Accessor::comment)
    }

    fn year(&self) -> Option<u32> {
        self.tag().and_then(Accessor::year)
    }

    fn track(&self) -> Option<u32> {
        self.tag().and_then(Accessor::track)
    }

    fn set_title(&mut self, value: &str) {
        self.with_tag_mut(|tag| tag.set_title(value.to_owned()));
    }

    fn set_artist(&mut self, value: &str) {
        self.with_tag_mut(|tag| tag.set_artist(value.to_owned()));
    }

    fn set_album(&mut self, value: &str) {
        self.with_tag_mut(|tag| tag.set_album(value.to_owned()));
    }

    fn set_genre(&mut self, value: &str) {
        self.with_tag_mut(|tag| tag.set_genre(value.to_owned()));
    }

    fn set_comment(&mut self, value: &str) {
        self.with_tag_mut(|tag| tag.set_comment(value.to_owned()));
    }

    fn set_year(&mut self, value: u32) {
        self.with_tag_mut(|tag| tag.set_year(value));
    }

    fn set_track(&mut self, value: u32) {
        self.with_tag_mut(|tag| tag.set_track(value));
    }

    fn properties(&self) -> AudioProperties {
        let props = self.file.properties();
        AudioProperties::new(
            props.audio_bitrate(),
            props.sample_rate(),
            props.channels(),
            Some(props.duration().as_secs()),
        )
    }

    fn save(&mut self) -> Result<(), SourceError> {
        let Some(tag) = self.tag() else {
            // Nothing staged; saving an untouched record is a no-op.
            return Ok(());
        };
        tag.save_to_path(&self.path, WriteOptions::default())
            .map_err(|err| SourceError::Save {
                path: self.path.clone(),
                message: err.to_string(),
            })
    }
}
