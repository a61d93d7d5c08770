//! Direct-detection limits as evaluable, plottable curves.

use crate::config::Config;
use crate::data::filter::Selector;
use crate::data::model::{LimitMeta, LimitRecord};
use crate::data::store::{with_store, LimitStore};
use crate::error::LimitError;
use crate::interp::Interp1d;
use crate::plot::{cross_section_label, Figure, PlotSurface, Scale, CHI_MASS_LABEL};

/// A published DD limit wrapped with an extrapolating interpolant.
#[derive(Debug, Clone)]
pub struct DirectDetection {
    record: LimitRecord,
    func: Interp1d,
    /// Legend label.
    pub name: String,
    /// Interaction type label, e.g. `SI`.
    pub kind: String,
    /// Citation URL on arXiv.
    pub cite: String,
}

impl DirectDetection {
    pub fn from_record(record: LimitRecord) -> Result<Self, LimitError> {
        let func = Interp1d::new(&record.curve)?;
        log::debug!(
            "limit {:08} '{}': {} points over m_χ {:?}",
            record.id,
            record.meta.name,
            record.curve.len(),
            func.x_range()
        );
        Ok(Self {
            name: record.meta.name.clone(),
            kind: record.meta.kind.clone(),
            cite: record.meta.citation_url(),
            record,
            func,
        })
    }

    /// Select a limit from an already open store.
    pub fn load(store: &LimitStore, selector: &Selector) -> Result<Self, LimitError> {
        let record = store
            .find(selector)?
            .ok_or_else(|| LimitError::NotFound(selector.clone()))?;
        Self::from_record(record)
    }

    /// Open the configured store just long enough to pick one limit.
    pub fn open(config: &Config, selector: &Selector) -> Result<Self, LimitError> {
        with_store(&config.store_path(), |store| Self::load(store, selector))
    }

    pub fn id(&self) -> u32 {
        self.record.id
    }

    pub fn meta(&self) -> &LimitMeta {
        &self.record.meta
    }

    /// Cross-section limit at `mass` (GeV).
    pub fn sigma(&self, mass: f64) -> f64 {
        self.func.eval(mass)
    }

    pub fn sigma_many(&self, masses: &[f64]) -> Vec<f64> {
        self.func.eval_many(masses)
    }

    /// Raw `(mass, cross-section)` pairs as stored.
    pub fn data(&self) -> &[[f64; 2]] {
        &self.record.curve
    }

    pub fn plot(&self, surface: &mut dyn PlotSurface) {
        draw_curve(surface, &self.record);
    }

    /// Plot onto a fresh figure.
    pub fn figure(&self) -> Figure {
        let mut fig = Figure::new();
        self.plot(&mut fig);
        fig
    }
}

fn draw_curve(surface: &mut dyn PlotSurface, record: &LimitRecord) {
    let (xs, ys): (Vec<f64>, Vec<f64>) = record.curve.iter().map(|&[m, s]| (m, s)).unzip();
    surface.line(&xs, &ys, &record.meta.name);
    surface.set_x_label(CHI_MASS_LABEL);
    surface.set_y_label(&cross_section_label(&record.meta.kind));
    surface.set_x_scale(Scale::Log);
    surface.set_y_scale(Scale::Log);
}

/// Draw every stored limit whose type label contains `limit_type`.
/// Returns the number of curves drawn.
pub fn plot_all(
    store: &LimitStore,
    limit_type: &str,
    surface: &mut dyn PlotSurface,
) -> Result<usize, LimitError> {
    let mut drawn = 0;
    for record in store.records()? {
        if record.meta.kind.contains(limit_type) {
            draw_curve(surface, &record);
            drawn += 1;
        }
    }
    log::info!("plotted {drawn} '{limit_type}' limits from {}", store.path().display());
    Ok(drawn)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> LimitRecord {
        LimitRecord {
            id: 5,
            curve: vec![[10.0, 1e-45], [100.0, 1e-46], [1000.0, 1e-45]],
            meta: LimitMeta {
                cite: "1705.06655".into(),
                year: "2017".into(),
                kind: "SI".into(),
                expr: "XENON1T".into(),
                name: "XENON1T 2017".into(),
            },
        }
    }

    #[test]
    fn knots_are_exact() {
        let dd = DirectDetection::from_record(record()).unwrap();
        for &[m, s] in dd.data() {
            assert_eq!(dd.sigma(m), s);
        }
        assert_eq!(dd.cite, "https://arxiv.org/abs/1705.06655");
        assert_eq!(dd.id(), 5);
    }

    #[test]
    fn extrapolates_past_last_point() {
        let dd = DirectDetection::from_record(record()).unwrap();
        let slope = (1e-45 - 1e-46) / 900.0;
        let expected = 1e-45 + 1000.0 * slope;
        assert!((dd.sigma(2000.0) - expected).abs() < 1e-58);
    }

    #[test]
    fn plot_sets_log_axes_and_labels() {
        let dd = DirectDetection::from_record(record()).unwrap();
        let fig = dd.figure();
        assert_eq!(fig.series.len(), 1);
        assert_eq!(fig.series[0].label, "XENON1T 2017");
        assert_eq!(fig.series[0].points, dd.data());
        assert_eq!(fig.x_scale, Scale::Log);
        assert_eq!(fig.y_scale, Scale::Log);
        assert_eq!(fig.y_label, "SI DM-nucleon cross-section (cm²)");
    }

    #[test]
    fn too_short_curve_is_rejected() {
        let mut rec = record();
        rec.curve.truncate(1);
        assert!(matches!(
            DirectDetection::from_record(rec),
            Err(LimitError::Degenerate { points: 1 })
        ));
    }
}
