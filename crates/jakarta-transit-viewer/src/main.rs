#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

mod app;

use app::{Settings, TransitMapApp};
use clap::Parser;

const APP_NAME: &str = "Jakarta Transit Map";

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let settings = Settings::parse();
    tracing::info!(assets_dir = %settings.assets_dir.display(), "starting {APP_NAME}");

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    rt.block_on(async {
        let native_options = eframe::NativeOptions {
            viewport: eframe::egui::ViewportBuilder::default()
                .with_inner_size([1280.0, 720.0])
                .with_title(APP_NAME),
            ..Default::default()
        };

        let result = eframe::run_native(
            APP_NAME,
            native_options,
            Box::new(move |cc| Ok(Box::new(TransitMapApp::new(cc, settings)))),
        );
        if let Err(error) = result {
            tracing::error!(%error, "application terminated with an error");
        }
    });
}
