use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cdl::CdlRecord;
use crate::detection::FaceDetection;
use crate::error::Result;
use crate::frame::HostThumbnail;
use crate::request::ColorCorrectionRequest;

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Pretty-printed JSON, newline-terminated.
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    std::fs::write(path, json)?;
    Ok(())
}

pub fn read_request(path: &Path) -> Result<ColorCorrectionRequest> {
    read_json(path)
}

/// Face boxes saved by an external detector: a JSON array of `FaceDetection`.
pub fn read_face_detections(path: &Path) -> Result<Vec<FaceDetection>> {
    read_json(path)
}

pub fn read_thumbnail(path: &Path) -> Result<HostThumbnail> {
    read_json(path)
}

pub fn write_cdl_record(record: &CdlRecord, path: &Path) -> Result<()> {
    write_json(record, path)
}
