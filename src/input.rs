//! Turns user-supplied images into base64 payloads for inline requests.

use crate::{
    error::{PokeMorphError, Result},
    models::ImagePayload,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;

const DEFAULT_MIME_TYPE: &str = "image/png";

pub fn encode_file(path: impl AsRef<Path>) -> Result<ImagePayload> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        PokeMorphError::ImageInputError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let mime_type = sniff_mime_type(&bytes)
        .or_else(|| mime_from_extension(path))
        .unwrap_or(DEFAULT_MIME_TYPE);

    log::debug!(
        "Read {} bytes from {} ({})",
        bytes.len(),
        path.display(),
        mime_type
    );

    encode_bytes(&bytes, mime_type)
}

pub fn encode_bytes(bytes: &[u8], mime_type: &str) -> Result<ImagePayload> {
    if bytes.is_empty() {
        return Err(PokeMorphError::ImageInputError("Image is empty".into()));
    }

    Ok(ImagePayload::new(STANDARD.encode(bytes), mime_type))
}

/// Like [`encode_bytes`], with the MIME type taken from the image header.
pub fn encode_bytes_detected(bytes: &[u8]) -> Result<ImagePayload> {
    encode_bytes(bytes, sniff_mime_type(bytes).unwrap_or(DEFAULT_MIME_TYPE))
}

/// Accepts a `data:image/...;base64,...` URL and keeps only the base64 part.
pub fn from_data_url(data_url: &str) -> Result<ImagePayload> {
    let rest = data_url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| PokeMorphError::ImageInputError("Not a data URL".into()))?;

    let (header, data) = rest
        .split_once(',')
        .ok_or_else(|| PokeMorphError::ImageInputError("Data URL has no payload".into()))?;

    let mime_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| PokeMorphError::ImageInputError("Data URL is not base64".into()))?;

    if data.is_empty() {
        return Err(PokeMorphError::ImageInputError("Image is empty".into()));
    }

    let mime_type = if mime_type.is_empty() {
        DEFAULT_MIME_TYPE
    } else {
        mime_type
    };

    Ok(ImagePayload::new(data, mime_type))
}

/// Identifies PNG, JPEG, GIF and WebP by their magic bytes.
pub fn sniff_mime_type(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => Some("image/png"),
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [b'G', b'I', b'F', b'8', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        _ => None,
    }
}

fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}
