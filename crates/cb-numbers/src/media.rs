//! Image payload helpers: base64 decoding, content hashing, MIME sniffing.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use cb_core::ConnectorError;
use sha2::{Digest, Sha256};

const TEXT_MIME: &str = "text/plain; charset=utf-8";
const BINARY_MIME: &str = "application/octet-stream";

/// Decode a base64 image. Accepts a bare payload or a
/// `data:<mime>;base64,<payload>` URI; line breaks in the payload are ignored.
pub fn decode_image(encoded: &str) -> Result<Vec<u8>, ConnectorError> {
    let payload: String = strip_data_uri(encoded.trim())
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    STANDARD
        .decode(payload)
        .map_err(|e| ConnectorError::Decode(e.to_string()))
}

fn strip_data_uri(encoded: &str) -> &str {
    if !encoded.starts_with("data:") {
        return encoded;
    }
    match encoded.split_once(',') {
        Some((_, payload)) => payload,
        None => encoded,
    }
}

/// Lowercase hex SHA-256 of the raw bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// MIME type sniffed from the content itself.
pub fn detect_encoding_format(data: &[u8]) -> String {
    if let Some(kind) = infer::get(data) {
        return kind.mime_type().to_string();
    }
    if std::str::from_utf8(data).is_ok() {
        TEXT_MIME.to_string()
    } else {
        BINARY_MIME.to_string()
    }
}
