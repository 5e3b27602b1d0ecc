//! The standard audio field catalog.
//!
//! Registers the fixed set of metadata accessors the plugin exposes:
//! editable tag fields first (title, artist, album, year, track, genre,
//! comment), then the read-only audio stream properties (bitrate, sample
//! rate, channels, duration). Index order is host-visible and must stay
//! stable across releases; new fields are appended, never inserted.

use crate::error::{RegistryError, SetError};
use crate::field::{Field, FieldKind, FieldValue};
use crate::registry::FieldRegistry;

/// Index of the title field.
pub const FIELD_TITLE: i32 = 0;
/// Index of the artist field.
pub const FIELD_ARTIST: i32 = 1;
/// Index of the album field.
pub const FIELD_ALBUM: i32 = 2;
/// Index of the year field.
pub const FIELD_YEAR: i32 = 3;
/// Index of the track-number field.
pub const FIELD_TRACK: i32 = 4;
/// Index of the genre field.
pub const FIELD_GENRE: i32 = 5;
/// Index of the comment field.
pub const FIELD_COMMENT: i32 = 6;
/// Index of the bitrate property field.
pub const FIELD_BITRATE: i32 = 7;
/// Index of the sample-rate property field.
pub const FIELD_SAMPLE_RATE: i32 = 8;
/// Index of the channel-count property field.
pub const FIELD_CHANNELS: i32 = 9;
/// Index of the duration property field.
pub const FIELD_DURATION: i32 = 10;

fn expect_text(name: &str, value: &FieldValue) -> Result<String, SetError> {
    value
        .as_text()
        .map(ToOwned::to_owned)
        .ok_or_else(|| SetError::InvalidValue {
            name: name.to_owned(),
            message: String::from("expected a text value"),
        })
}

fn expect_unsigned(name: &str, value: &FieldValue) -> Result<u32, SetError> {
    let numeric = value.as_numeric().ok_or_else(|| SetError::InvalidValue {
        name: name.to_owned(),
        message: String::from("expected a numeric value"),
    })?;
    u32::try_from(numeric).map_err(|_| SetError::InvalidValue {
        name: name.to_owned(),
        message: format!("value {numeric} is negative"),
    })
}

fn numeric_from(value: Option<u32>) -> Option<FieldValue> {
    value.and_then(|v| i32::try_from(v).ok()).map(FieldValue::Numeric)
}

fn title() -> Field {
    Field::new("Title", FieldKind::WideText, |record| {
        record.title().map(FieldValue::Text)
    })
    .editable(|record, value| {
        record.set_title(&expect_text("Title", value)?);
        Ok(())
    })
}

fn artist() -> Field {
    Field::new("Artist", FieldKind::WideText, |record| {
        record.artist().map(FieldValue::Text)
    })
    .editable(|record, value| {
        record.set_artist(&expect_text("Artist", value)?);
        Ok(())
    })
}

fn album() -> Field {
    Field::new("Album", FieldKind::WideText, |record| {
        record.album().map(FieldValue::Text)
    })
    .editable(|record, value| {
        record.set_album(&expect_text("Album", value)?);
        Ok(())
    })
}

fn year() -> Field {
    Field::new("Year", FieldKind::Numeric32, |record| {
        numeric_from(record.year())
    })
    .editable(|record, value| {
        record.set_year(expect_unsigned("Year", value)?);
        Ok(())
    })
}

fn track() -> Field {
    Field::new("Track", FieldKind::Numeric32, |record| {
        numeric_from(record.track())
    })
    .editable(|record, value| {
        record.set_track(expect_unsigned("Track", value)?);
        Ok(())
    })
}

fn genre() -> Field {
    Field::new("Genre", FieldKind::WideText, |record| {
        record.genre().map(FieldValue::Text)
    })
    .editable(|record, value| {
        record.set_genre(&expect_text("Genre", value)?);
        Ok(())
    })
}

fn comment() -> Field {
    Field::new("Comment", FieldKind::WideText, |record| {
        record.comment().map(FieldValue::Text)
    })
    .editable(|record, value| {
        record.set_comment(&expect_text("Comment", value)?);
        Ok(())
    })
}

fn bitrate() -> Field {
    Field::new("Bitrate", FieldKind::Numeric32, |record| {
        numeric_from(record.properties().bitrate_kbps())
    })
    .with_unit("kbps")
}

fn sample_rate() -> Field {
    Field::new("Sample rate", FieldKind::Numeric32, |record| {
        numeric_from(record.properties().sample_rate_hz())
    })
    .with_unit("Hz")
}

fn channels() -> Field {
    Field::new("Channels", FieldKind::Numeric32, |record| {
        numeric_from(record.properties().channels().map(u32::from))
    })
}

fn duration() -> Field {
    Field::new("Duration", FieldKind::Numeric32, |record| {
        record
            .properties()
            .duration_secs()
            .and_then(|secs| i32::try_from(secs).ok())
            .map(FieldValue::Numeric)
    })
    .with_unit("s")
}

/// Builds the registry holding the standard field catalog.
///
/// # Errors
///
/// Returns [`RegistryError`] only if the catalog itself is inconsistent
/// (colliding indices); that is an initialization defect, not a runtime
/// condition.
pub fn standard_registry() -> Result<FieldRegistry, RegistryError> {
    let mut registry = FieldRegistry::new();
    registry.register(FIELD_TITLE, title())?;
    registry.register(FIELD_ARTIST, artist())?;
    registry.register(FIELD_ALBUM, album())?;
    registry.register(FIELD_YEAR, year())?;
    registry.register(FIELD_TRACK, track())?;
    registry.register(FIELD_GENRE, genre())?;
    registry.register(FIELD_COMMENT, comment())?;
    registry.register(FIELD_BITRATE, bitrate())?;
    registry.register(FIELD_SAMPLE_RATE, sample_rate())?;
    registry.register(FIELD_CHANNELS, channels())?;
    registry.register(FIELD_DURATION, duration())?;
    Ok(registry)
}
