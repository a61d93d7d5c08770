use eframe::egui::Ui;
use egui_plot::{GridMark, Line, Plot, PlotPoint, PlotPoints};

use lhctodd::plot::Scale;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Limit plot (central panel)
// ---------------------------------------------------------------------------

/// Tick label for an axis value. Log axes are plotted in log10 space, so a
/// mark at `k` stands for `10^k`.
fn tick_label(value: f64, scale: Scale) -> String {
    match scale {
        Scale::Linear => format!("{value}"),
        Scale::Log if value.fract().abs() < 1e-9 => format!("1e{}", value.round() as i64),
        Scale::Log => String::new(),
    }
}

fn axis_value(value: f64, scale: Scale) -> f64 {
    match scale {
        Scale::Linear => value,
        Scale::Log => 10f64.powf(value),
    }
}

/// Render the limit plot in the central panel.
pub fn limit_plot(ui: &mut Ui, state: &AppState) {
    if state.catalog.is_none() && state.overlays.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a limit store to view limits  (File → Open data directory…)");
        });
        return;
    }

    let (figure, colors) = state.figure();
    let (x_scale, y_scale) = (figure.x_scale, figure.y_scale);

    Plot::new("limit_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label(figure.x_label.clone())
        .y_axis_label(figure.y_label.clone())
        .x_axis_formatter(move |mark: GridMark, _range| tick_label(mark.value, x_scale))
        .y_axis_formatter(move |mark: GridMark, _range| tick_label(mark.value, y_scale))
        .label_formatter(move |name: &str, value: &PlotPoint| {
            let x = axis_value(value.x, x_scale);
            let y = axis_value(value.y, y_scale);
            if name.is_empty() {
                format!("m = {x:.3} GeV\nσ = {y:.3e} cm²")
            } else {
                format!("{name}\nm = {x:.3} GeV\nσ = {y:.3e} cm²")
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (series, &color) in figure.series.iter().zip(&colors) {
                let points: PlotPoints = figure.axis_points(series).into_iter().collect();
                let line = Line::new(points)
                    .name(&series.label)
                    .color(color)
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}
