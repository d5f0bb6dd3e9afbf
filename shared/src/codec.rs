//! Base64 transfer encoding for binary columns
//!
//! Binary payloads (document files, photos) are stored as raw bytes and
//! travel as standard base64 text inside JSON. Decoding tolerates missing
//! padding and embedded whitespace, the way browser-produced base64 tends to
//! arrive.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use thiserror::Error;

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Base64 text could not be turned back into bytes
#[derive(Debug, Error)]
#[error("invalid base64 payload: {0}")]
pub struct BlobDecodeError(#[from] base64::DecodeError);

/// Encode raw bytes as padded standard base64
pub fn encode(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Decode base64 text into raw bytes
pub fn decode(text: &str) -> Result<Vec<u8>, BlobDecodeError> {
    if text.bytes().any(|b| b.is_ascii_whitespace()) {
        let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        return Ok(LENIENT.decode(compact)?);
    }
    Ok(LENIENT.decode(text)?)
}

/// Decode an optional base64 field; empty text reads as no payload
pub fn decode_opt(text: Option<&str>) -> Result<Option<Vec<u8>>, BlobDecodeError> {
    match text {
        Some(t) if !t.is_empty() => decode(t).map(Some),
        _ => Ok(None),
    }
}

/// Serde adapter for `Option<Vec<u8>>` fields carried as base64 text
pub mod base64_opt {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(bytes) => s.serialize_some(&super::encode(bytes)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<u8>>, D::Error> {
        let text = Option::<String>::deserialize(d)?;
        super::decode_opt(text.as_deref()).map_err(serde::de::Error::custom)
    }
}
