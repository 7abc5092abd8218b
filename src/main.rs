mod app;
mod color;
mod config;
mod data;
mod diagnostics;
mod state;
mod ui;

use app::EstateViewApp;
use clap::Parser;
use config::Args;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    log::info!("Starting Real Estate Dashboard with {}", args.file.display());
    let state = AppState::open(args.file.clone(), args.filter_defaults());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Real Estate Dashboard",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can fetch and render listing photos.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(EstateViewApp::new(state)))
        }),
    );

    log::info!("Dashboard closed");
    result
}
