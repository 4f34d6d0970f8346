// src/decoder.rs
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

use crate::data_types::{DecodedText, UploadPayload};
use crate::error::{Result, ValidationError};

const SEPARATOR: char = ',';

pub struct Decoder {}

impl Decoder {
    /// Splits `<content-type>,<base64 body>` and decodes the body as UTF-8 text.
    pub fn decode(payload: &UploadPayload) -> Result<DecodedText> {
        let mut parts = payload.contents.split(SEPARATOR);
        let (content_type, body) = match (parts.next(), parts.next(), parts.next()) {
            (Some(content_type), Some(body), None) => (content_type, body),
            (_, None, _) => {
                return Err(ValidationError::DecodeFailure(
                    "no separator between content type and body".to_string(),
                ))
            }
            _ => {
                return Err(ValidationError::DecodeFailure(
                    "more than one separator in transfer-encoded content".to_string(),
                ))
            }
        };

        let bytes = STANDARD.decode(body)?;
        debug!(
            filename = %payload.filename,
            content_type,
            bytes = bytes.len(),
            "decoded upload"
        );

        Ok(DecodedText {
            content_type: content_type.to_string(),
            text: String::from_utf8(bytes)?,
        })
    }

    /// Produces the transfer encoding the upload widget emits.
    pub fn encode(content_type: &str, bytes: &[u8]) -> String {
        format!("{}{}{}", content_type, SEPARATOR, STANDARD.encode(bytes))
    }

    /// `data:` prefix for a file, guessed from its name.
    pub fn content_type_for(filename: &str) -> &'static str {
        if filename.to_lowercase().ends_with(".csv") {
            "data:text/csv;base64"
        } else {
            "data:application/octet-stream;base64"
        }
    }
}
