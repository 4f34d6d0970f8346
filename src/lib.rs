// src/lib.rs
//! Core of the marketing analytics dashboard.
//!
//! An upload arrives as a transfer-encoded string plus a filename. [`Decoder`]
//! turns it back into text, [`ChartSpecBuilder`] reads the text as CSV and
//! produces a [`ChartSpec`] with cost as bars and clicks and impressions as
//! lines on their own y-axes. [`Dashboard`] ties the two together for a host UI.

pub mod chart;
pub mod csv_handler;
pub mod dashboard;
pub mod data_types;
pub mod decoder;
pub mod error;
pub mod ui;

pub use chart::{ChartSpec, ChartSpecBuilder, LayoutSpec, SeriesSpec};
pub use dashboard::{Dashboard, DisplayContent};
pub use data_types::{DecodedText, Table, UploadPayload};
pub use decoder::Decoder;
pub use error::{ErrorKind, Result, ValidationError};
