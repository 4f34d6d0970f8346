// src/error.rs
use thiserror::Error;

/// Message shown when the uploaded file is not a CSV file.
pub const UNSUPPORTED_FORMAT_MESSAGE: &str =
    "The file format is not supported. Please upload a CSV file.";

/// Message shown for every other failure. The detailed cause only goes to the log.
pub const PROCESSING_ERROR_MESSAGE: &str = "There was an error processing the file.";

/// Coarse classification of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedFormat,
    MissingColumns,
    DecodeFailure,
    ParseFailure,
}

/// Everything that can go wrong between an upload and a chart.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The filename does not look like a CSV file
    #[error("Unsupported file format: {filename}")]
    UnsupportedFormat { filename: String },

    /// One or more required columns are absent from the header row
    #[error("Missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The transfer-encoded content could not be turned into text
    #[error("Decode error: {0}")]
    DecodeFailure(String),

    /// The text could not be read as a table or a cell could not be coerced
    #[error("Parse error: {0}")]
    ParseFailure(String),
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            ValidationError::MissingColumns(_) => ErrorKind::MissingColumns,
            ValidationError::DecodeFailure(_) => ErrorKind::DecodeFailure,
            ValidationError::ParseFailure(_) => ErrorKind::ParseFailure,
        }
    }

    /// Diagnostic text, including the underlying cause.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// The fixed text the end user gets to see.
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            ErrorKind::UnsupportedFormat => UNSUPPORTED_FORMAT_MESSAGE,
            _ => PROCESSING_ERROR_MESSAGE,
        }
    }
}

impl From<csv::Error> for ValidationError {
    fn from(error: csv::Error) -> Self {
        ValidationError::ParseFailure(error.to_string())
    }
}

impl From<base64::DecodeError> for ValidationError {
    fn from(error: base64::DecodeError) -> Self {
        ValidationError::DecodeFailure(format!("invalid base64 body: {}", error))
    }
}

impl From<std::string::FromUtf8Error> for ValidationError {
    fn from(error: std::string::FromUtf8Error) -> Self {
        ValidationError::DecodeFailure(format!("content is not valid UTF-8: {}", error))
    }
}

/// Type alias for Result with ValidationError
pub type Result<T> = std::result::Result<T, ValidationError>;
