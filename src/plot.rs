//! Minimal drawing interface used by the limit and theory models.
//!
//! Models draw onto anything implementing [`PlotSurface`]. [`Figure`] is
//! the in-memory implementation: it records the calls so the viewer can
//! hand them to egui_plot, and so tests can inspect what was drawn.

/// Axis scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scale {
    #[default]
    Linear,
    Log,
}

/// Capabilities a 2-D plotting backend must offer.
pub trait PlotSurface {
    fn line(&mut self, xs: &[f64], ys: &[f64], label: &str);
    fn set_x_label(&mut self, label: &str);
    fn set_y_label(&mut self, label: &str);
    fn set_x_scale(&mut self, scale: Scale);
    fn set_y_scale(&mut self, scale: Scale);
}

/// One plotted line.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<[f64; 2]>,
}

/// Recording plot surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Figure {
    pub series: Vec<Series>,
    pub x_label: String,
    pub y_label: String,
    pub x_scale: Scale,
    pub y_scale: Scale,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Series points mapped into axis space (log10 on log axes), with
    /// points that cannot be shown on a log axis dropped.
    pub fn axis_points(&self, series: &Series) -> Vec<[f64; 2]> {
        series
            .points
            .iter()
            .filter_map(|&[x, y]| Some([to_axis(x, self.x_scale)?, to_axis(y, self.y_scale)?]))
            .collect()
    }
}

fn to_axis(v: f64, scale: Scale) -> Option<f64> {
    match scale {
        Scale::Linear => v.is_finite().then_some(v),
        Scale::Log => (v > 0.0 && v.is_finite()).then(|| v.log10()),
    }
}

impl PlotSurface for Figure {
    fn line(&mut self, xs: &[f64], ys: &[f64], label: &str) {
        let points = xs.iter().zip(ys).map(|(&x, &y)| [x, y]).collect();
        self.series.push(Series {
            label: label.to_string(),
            points,
        });
    }

    fn set_x_label(&mut self, label: &str) {
        self.x_label = label.to_string();
    }

    fn set_y_label(&mut self, label: &str) {
        self.y_label = label.to_string();
    }

    fn set_x_scale(&mut self, scale: Scale) {
        self.x_scale = scale;
    }

    fn set_y_scale(&mut self, scale: Scale) {
        self.y_scale = scale;
    }
}

/// Axis label for DM-nucleon cross-section plots of the given limit type.
pub fn cross_section_label(kind: &str) -> String {
    format!("{kind} DM-nucleon cross-section (cm²)")
}

pub const CHI_MASS_LABEL: &str = "m_χ (GeV)";
