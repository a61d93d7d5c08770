mod app;
mod color;
mod state;
mod ui;

use app::LimitViewerApp;
use eframe::egui;
use lhctodd::config::Config;

fn main() -> eframe::Result {
    env_logger::init();

    let config = Config::from_env();
    log::info!("Using data directory {}", config.data_dir.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "lhctodd – DD limit viewer",
        options,
        Box::new(|_cc| Ok(Box::new(LimitViewerApp::new(config)))),
    )
}
