//! Crate-level tests against real files.
//!
//! A minimal PCM WAV is synthesized per test so the backend is exercised
//! end to end without binary fixtures in the repository.

use std::io::Write;
use std::path::Path;

use tempfile::TempPath;

use tagcol_core::{TagRecord, TagSource};

use crate::source::LoftySource;

#[expect(
    clippy::little_endian_bytes,
    reason = "RIFF is a little-endian container"
)]
fn wav_bytes() -> Vec<u8> {
    let data_len: u32 = 2_000;
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16_u32.to_le_bytes());
    bytes.extend_from_slice(&1_u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1_u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&44_100_u32.to_le_bytes());
    bytes.extend_from_slice(&88_200_u32.to_le_bytes());
    bytes.extend_from_slice(&2_u16.to_le_bytes()); // block align
    bytes.extend_from_slice(&16_u16.to_le_bytes()); // bits per sample
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    let data_len = usize::try_from(data_len).expect("small length");
    bytes.resize(bytes.len() + data_len, 0);
    bytes
}

fn temp_wav() -> TempPath {
    let mut file = tempfile::Builder::new()
        .suffix(".wav")
        .tempfile()
        .expect("create temp wav");
    file.write_all(&wav_bytes()).expect("write wav body");
    file.into_temp_path()
}

fn open(path: &Path) -> Box<dyn TagRecord> {
    match LoftySource::new().open(path) {
        Ok(record) => record,
        Err(err) => panic!("open failed: {err}"),
    }
}

#[test]
fn untagged_file_reads_no_tag_values() {
    let wav = temp_wav();
    let record = open(&wav);
    assert_eq!(record.title(), None);
    assert_eq!(record.artist(), None);
    assert_eq!(record.year(), None);
}

#[test]
fn properties_come_from_the_stream() {
    let wav = temp_wav();
    let props = open(&wav).properties();
    assert_eq!(props.sample_rate_hz(), Some(44_100));
    assert_eq!(props.channels(), Some(1));
    assert!(props.bitrate_kbps().is_some());
    assert_eq!(props.duration_secs(), Some(0));
}

#[test]
fn set_save_reopen_round_trips_tag_values() {
    let wav = temp_wav();
    {
        let mut record = open(&wav);
        record.set_title("So What");
        record.set_artist("Miles Davis");
        record.save().expect("save tag");
    }
    let record = open(&wav);
    assert_eq!(record.title(), Some(String::from("So What")));
    assert_eq!(record.artist(), Some(String::from("Miles Davis")));
}

#[test]
fn unrecognised_content_fails_to_open() {
    let mut file = tempfile::Builder::new()
        .suffix(".mp3")
        .tempfile()
        .expect("create temp file");
    file.write_all(b"this is not audio data")
        .expect("write body");
    let path = file.into_temp_path();

    assert!(LoftySource::new().open(&path).is_err());
}
