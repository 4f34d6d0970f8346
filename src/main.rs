// src/main.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marketing_dashboard::{Dashboard, Decoder, DisplayContent, UploadPayload};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Render an ads export as a cost/clicks/impressions chart (plotly figure JSON)
#[derive(Parser)]
#[command(name = "marketing-dashboard")]
#[command(version)]
struct Cli {
    /// CSV file to upload
    file: PathBuf,

    /// Write the figure JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the figure JSON
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marketing_dashboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    info!(version = VERSION, file = %cli.file.display(), "marketing dashboard starting");

    let payload = read_upload(&cli.file)?;
    match Dashboard::new().handle_upload_async(Some(payload)).await {
        DisplayContent::Chart(chart) => {
            let figure = chart.to_plotly_json();
            let json = if cli.pretty {
                serde_json::to_string_pretty(&figure)?
            } else {
                serde_json::to_string(&figure)?
            };

            match &cli.output {
                Some(path) => {
                    fs::write(path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!(output = %path.display(), "figure written");
                }
                None => println!("{}", json),
            }
            Ok(ExitCode::SUCCESS)
        }
        other => {
            eprintln!("{}", other.text().unwrap_or_default());
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Builds the payload the browser's upload widget would send for `path`.
fn read_upload(path: &Path) -> Result<UploadPayload> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let contents = Decoder::encode(Decoder::content_type_for(&filename), &bytes);
    Ok(UploadPayload::new(filename, contents))
}
