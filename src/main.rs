mod analysis;
mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::FvProfilesApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let settings = config::load_settings();
    let mut app = FvProfilesApp::new(settings);

    // Optional file to open at start-up.
    if let Some(path) = std::env::args_os().nth(1) {
        app.state.load_path(Path::new(&path));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "F-V Profiles",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
