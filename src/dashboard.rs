// src/dashboard.rs
use tokio::task;
use tracing::{error, instrument, warn};

use crate::chart::{is_csv_filename, ChartSpec, ChartSpecBuilder};
use crate::data_types::UploadPayload;
use crate::decoder::Decoder;
use crate::error::{Result, ValidationError, PROCESSING_ERROR_MESSAGE};

pub const UPLOAD_PROMPT: &str = "Please upload a CSV file.";

/// What the output region should show after an upload event.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayContent {
    /// Nothing uploaded yet
    Prompt,
    Chart(ChartSpec),
    Message(String),
}

impl DisplayContent {
    /// Plain text for the non-chart variants.
    pub fn text(&self) -> Option<&str> {
        match self {
            DisplayContent::Prompt => Some(UPLOAD_PROMPT),
            DisplayContent::Chart(_) => None,
            DisplayContent::Message(message) => Some(message.as_str()),
        }
    }
}

pub struct Dashboard {}

impl Dashboard {
    pub fn new() -> Self {
        Dashboard {}
    }

    /// Decode then build, with the failure kept structured.
    ///
    /// The filename is checked before decoding, so a binary non-CSV upload is
    /// reported as unsupported rather than undecodable.
    pub fn process(&self, payload: &UploadPayload) -> Result<ChartSpec> {
        if !is_csv_filename(&payload.filename) {
            return Err(ValidationError::UnsupportedFormat {
                filename: payload.filename.clone(),
            });
        }

        let decoded = Decoder::decode(payload)?;
        ChartSpecBuilder::new().build(decoded.as_str(), &payload.filename)
    }

    #[instrument(skip(self, upload), fields(filename = upload.map(|u| u.filename.as_str())))]
    pub fn handle_upload(&self, upload: Option<&UploadPayload>) -> DisplayContent {
        let payload = match upload {
            Some(payload) => payload,
            None => return DisplayContent::Prompt,
        };

        match self.process(payload) {
            Ok(chart) => DisplayContent::Chart(chart),
            Err(err) => {
                warn!(kind = ?err.kind(), cause = %err, "upload rejected");
                DisplayContent::Message(err.user_message().to_string())
            }
        }
    }

    /// Same cycle as [`Dashboard::handle_upload`], run on the blocking pool.
    pub async fn handle_upload_async(&self, upload: Option<UploadPayload>) -> DisplayContent {
        task::spawn_blocking(move || Dashboard::new().handle_upload(upload.as_ref()))
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "upload task failed");
                DisplayContent::Message(PROCESSING_ERROR_MESSAGE.to_string())
            })
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UNSUPPORTED_FORMAT_MESSAGE;

    fn upload(filename: &str, text: &str) -> UploadPayload {
        UploadPayload::new(
            filename,
            Decoder::encode("data:text/csv;base64", text.as_bytes()),
        )
    }

    #[test]
    fn no_upload_shows_the_prompt() {
        let content = Dashboard::new().handle_upload(None);
        assert_eq!(content, DisplayContent::Prompt);
        assert_eq!(content.text(), Some(UPLOAD_PROMPT));
    }

    #[test]
    fn valid_upload_shows_a_chart() {
        let payload = upload("ads.csv", "Day,Cost,Clicks,Impr.\n1,1,1,1\n");
        match Dashboard::new().handle_upload(Some(&payload)) {
            DisplayContent::Chart(chart) => assert_eq!(chart.series.len(), 3),
            other => panic!("expected chart, got {:?}", other),
        }
    }

    #[test]
    fn wrong_format_gets_its_own_message() {
        let payload = upload("report.txt", "anything");
        let content = Dashboard::new().handle_upload(Some(&payload));
        assert_eq!(content.text(), Some(UNSUPPORTED_FORMAT_MESSAGE));
    }

    #[test]
    fn binary_non_csv_upload_is_unsupported_not_broken() {
        let bytes = [0x50, 0x4b, 0x03, 0x04, 0xff, 0xfe, 0x00, 0x9c];
        let payload = UploadPayload::new(
            "report.xlsx",
            Decoder::encode(Decoder::content_type_for("report.xlsx"), &bytes),
        );

        let err = Dashboard::new().process(&payload).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::UnsupportedFormat);

        let content = Dashboard::new().handle_upload(Some(&payload));
        assert_eq!(content.text(), Some(UNSUPPORTED_FORMAT_MESSAGE));
    }

    #[test]
    fn every_other_failure_gets_the_generic_message() {
        let payloads = [
            UploadPayload::new("ads.csv", "no separator here"),
            UploadPayload::new("ads.csv", "data:text/csv;base64,!!!"),
            upload("ads.csv", "Day,Cost\n1,2\n"),
            upload("ads.csv", "Day,Cost,Clicks,Impr.\n1,x,1,1\n"),
        ];
        for payload in &payloads {
            let content = Dashboard::new().handle_upload(Some(payload));
            assert_eq!(content.text(), Some(PROCESSING_ERROR_MESSAGE), "{:?}", payload);
        }
    }

    #[tokio::test]
    async fn async_upload_matches_sync_result() {
        let payload = upload("ads.csv", "Day,Cost,Clicks,Impr.\n1,2,3,4\n");
        let dashboard = Dashboard::new();

        let sync = dashboard.handle_upload(Some(&payload));
        let async_content = dashboard.handle_upload_async(Some(payload)).await;
        assert_eq!(sync, async_content);

        assert_eq!(dashboard.handle_upload_async(None).await, DisplayContent::Prompt);
    }
}
