//! Crate-level end-to-end tests driving the session the way a host does.

use std::path::Path;

use crate::error::{SourceError, ValueError};
use crate::field::{Field, FieldFlags, FieldKind, FieldValue};
use crate::registry::FieldRegistry;
use crate::session::{PluginSession, SENTINEL_INDEX};
use crate::source::{AudioProperties, TagRecord, TagSource};

/// In-memory record: a file that opened fine but carries no tag data.
#[derive(Default)]
struct UntaggedRecord;

impl TagRecord for UntaggedRecord {
    fn title(&self) -> Option<String> {
        None
    }
    fn artist(&self) -> Option<String> {
        None
    }
    fn album(&self) -> Option<String> {
        None
    }
    fn genre(&self) -> Option<String> {
        None
    }
    fn comment(&self) -> Option<String> {
        None
    }
    fn year(&self) -> Option<u32> {
        None
    }
    fn track(&self) -> Option<u32> {
        None
    }
    fn set_title(&mut self, _value: &str) {}
    fn set_artist(&mut self, _value: &str) {}
    fn set_album(&mut self, _value: &str) {}
    fn set_genre(&mut self, _value: &str) {}
    fn set_comment(&mut self, _value: &str) {}
    fn set_year(&mut self, _value: u32) {}
    fn set_track(&mut self, _value: u32) {}
    fn properties(&self) -> AudioProperties {
        AudioProperties::default()
    }
    fn save(&mut self) -> Result<(), SourceError> {
        Ok(())
    }
}

/// Stub source: any path containing "missing" fails to open, everything
/// else opens as an untagged record.
struct StubSource;

impl TagSource for StubSource {
    fn open(&self, path: &Path) -> Result<Box<dyn TagRecord>, SourceError> {
        if path.to_string_lossy().contains("missing") {
            return Err(SourceError::Open {
                path: path.to_path_buf(),
                message: String::from("no such file"),
            });
        }
        Ok(Box::new(UntaggedRecord))
    }

    fn detect_string(&self) -> String {
        String::from("EXT=\"MP3\" | EXT=\"FLAC\"")
    }
}

fn wide_text_field(
    name: &'static str,
    read: crate::field::ReadFn,
    write: crate::field::WriteFn,
) -> Field {
    Field::new(name, FieldKind::WideText, read).editable(write)
}

fn host_session() -> PluginSession<StubSource> {
    let mut registry = FieldRegistry::new();
    registry
        .register(
            0,
            wide_text_field(
                "Title",
                |record| record.title().map(FieldValue::Text),
                |record, value| {
                    if let Some(text) = value.as_text() {
                        record.set_title(text);
                    }
                    Ok(())
                },
            ),
        )
        .expect("register Title");
    registry
        .register(
            1,
            wide_text_field(
                "Artist",
                |record| record.artist().map(FieldValue::Text),
                |record, value| {
                    if let Some(text) = value.as_text() {
                        record.set_artist(text);
                    }
                    Ok(())
                },
            ),
        )
        .expect("register Artist");
    PluginSession::new(registry, StubSource)
}

#[test]
fn host_enumeration_and_retrieval_scenario() {
    let mut session = host_session();

    // Enumeration: index 0 is Title, wide text, no unit.
    let title = session.supported_field(0).expect("field 0");
    assert_eq!(title.name(), "Title");
    assert_eq!(title.kind(), FieldKind::WideText);
    assert_eq!(title.units_text(), "");

    // Past the end: the defined "no more fields" condition.
    assert!(session.supported_field(2).is_none());

    // Both fields are editable, so the aggregate carries the edit bit.
    let flags = session
        .supported_field_flags(SENTINEL_INDEX)
        .expect("aggregate flags");
    assert_eq!(flags, FieldFlags::EDIT);

    // A file that opens but has no tag data: field empty.
    let err = session
        .get_value(Path::new("/music/untagged.wav"), 0, 0, 0)
        .expect_err("no tag data");
    assert!(matches!(err, ValueError::Empty));

    // A file that cannot be opened: file error.
    let err = session
        .get_value(Path::new("/music/missing.mp3"), 0, 0, 0)
        .expect_err("unopenable file");
    assert!(matches!(err, ValueError::Source { .. }));
}

#[test]
fn cancel_then_retrieve_clears_the_abort() {
    let mut session = host_session();
    session.stop_get_value("/music/slow.flac");
    assert!(session.is_aborted());
    assert_eq!(session.aborted_filename(), "/music/slow.flac");

    session
        .get_value(Path::new("/music/untagged.wav"), 1, 0, 0)
        .expect_err("untagged file reads empty");
    assert!(!session.is_aborted());
    assert_eq!(session.aborted_filename(), "");
}

#[test]
fn detect_string_is_stable() {
    let session = host_session();
    assert_eq!(session.detect_string(), session.detect_string());
    assert!(session.detect_string().contains("EXT=\"MP3\""));
}
