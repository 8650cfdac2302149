mod app;
mod cli;
mod config;
mod download;
mod encoder;
mod i18n;
mod state;
mod task;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::encoder::{EncodeOptions, QrCodeEncoder, QrEncoder};

/// Build the window icon from a QR code of the app name
fn load_icon() -> Option<egui::IconData> {
    let options = EncodeOptions {
        width: 64,
        margin: 1,
        ..Default::default()
    };
    let image = QrCodeEncoder.encode("QR Tool", &options).ok()?;
    let pixels = image.pixels().clone();
    let (width, height) = pixels.dimensions();
    Some(egui::IconData {
        rgba: pixels.into_raw(),
        width,
        height,
    })
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "qrtool=trace,info" } else { "qrtool=debug,info" };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.output.verbose);

    if let Some(command) = cli.command {
        if let Err(e) = cli::run(command, &cli.output).await {
            cli::output::print_error(&format!("{:#}", e));
            std::process::exit(1);
        }
        return Ok(());
    }

    tracing::info!("Starting QR Tool");

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([560.0, 860.0])
        .with_min_inner_size([420.0, 600.0])
        .with_title("QR Code Tool");

    let viewport = match load_icon() {
        Some(icon) => viewport.with_icon(Arc::new(icon)),
        None => {
            tracing::warn!("Failed to build application icon");
            viewport
        }
    };

    let native_options = eframe::NativeOptions {
        viewport,
        persist_window: true,
        ..Default::default()
    };

    let initial_text = cli.text;
    eframe::run_native(
        "QR Tool",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::QrToolApp::new(cc, initial_text)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    Ok(())
}
