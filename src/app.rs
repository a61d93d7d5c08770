use eframe::egui;

use lhctodd::config::Config;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LimitViewerApp {
    pub state: AppState,
}

impl LimitViewerApp {
    /// Create the viewer and read the configured store right away.
    pub fn new(config: Config) -> Self {
        let mut state = AppState::new(config);
        state.load_store();
        Self { state }
    }
}

impl eframe::App for LimitViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: table of visible limits ----
        egui::TopBottomPanel::bottom("limit_table")
            .default_height(180.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::limit_table(ui, &self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::limit_plot(ui, &self.state);
        });
    }
}
