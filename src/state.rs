use std::collections::BTreeSet;
use std::path::Path;

use eframe::egui::Color32;

use lhctodd::config::Config;
use lhctodd::data::filter::{filtered_indices, init_filter_state, FilterState};
use lhctodd::data::model::{LimitCatalog, MetaField};
use lhctodd::data::store::with_store;
use lhctodd::error::LimitError;
use lhctodd::limit::DirectDetection;
use lhctodd::plot::Figure;
use lhctodd::theory::{Couplings, SimplifiedModel, TranslatedLimit, Variant};

use crate::color::ColorMap;

/// Colour used for translated LHC limits.
const OVERLAY_COLOR: Color32 = Color32::WHITE;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: Config,

    /// Limits read from the store (None until a store is opened).
    pub catalog: Option<LimitCatalog>,

    /// Per-field filter selections.
    pub filters: FilterState,

    /// Free-text search across all metadata fields.
    pub search: String,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Which metadata field is used for colouring.
    pub color_field: Option<MetaField>,

    pub color_map: Option<ColorMap>,

    /// Model and couplings applied to LHC tables.
    pub variant: Variant,
    pub couplings: Couplings,

    /// Translated LHC limits drawn on top of the DD curves.
    pub overlays: Vec<TranslatedLimit>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            catalog: None,
            filters: FilterState::default(),
            search: String::new(),
            visible_indices: Vec::new(),
            color_field: Some(MetaField::Expr),
            color_map: None,
            variant: Variant::SpinIndependent,
            couplings: Couplings::default(),
            overlays: Vec::new(),
            status_message: None,
        }
    }

    /// Read every record of the configured store. The store handle is
    /// released before this returns.
    pub fn load_store(&mut self) {
        let path = self.config.store_path();
        match with_store(&path, |store| store.records()) {
            Ok(records) => {
                log::info!("Loaded {} limits from {}", records.len(), path.display());
                self.set_catalog(LimitCatalog::from_records(records));
            }
            Err(e) => {
                log::error!("Failed to open store: {e:#}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Point the viewer at another data directory and reload.
    pub fn open_data_dir(&mut self, dir: &Path) {
        self.config = Config::with_data_dir(dir);
        self.load_store();
    }

    /// Ingest a newly loaded catalog, initialise filters and colour.
    pub fn set_catalog(&mut self, catalog: LimitCatalog) {
        self.filters = init_filter_state(&catalog);
        self.visible_indices = (0..catalog.len()).collect();
        self.rebuild_color_map(&catalog);
        self.catalog = Some(catalog);
        self.status_message = None;
    }

    pub fn rebuild_color_map(&mut self, catalog: &LimitCatalog) {
        self.color_map = self.color_field.and_then(|field| {
            catalog
                .unique_values
                .get(&field)
                .map(|vals| ColorMap::new(field, vals))
        });
    }

    /// Recompute `visible_indices` after a filter or search change.
    pub fn refilter(&mut self) {
        if let Some(cat) = &self.catalog {
            self.visible_indices = filtered_indices(cat, &self.filters, &self.search);
        }
    }

    pub fn set_color_field(&mut self, field: MetaField) {
        self.color_field = Some(field);
        if let Some(cat) = self.catalog.take() {
            self.rebuild_color_map(&cat);
            self.catalog = Some(cat);
        }
    }

    /// Select all values of a field.
    pub fn select_all(&mut self, field: MetaField) {
        if let Some(all_vals) = self
            .catalog
            .as_ref()
            .and_then(|cat| cat.unique_values.get(&field))
        {
            self.filters.insert(field, all_vals.clone());
            self.refilter();
        }
    }

    /// Deselect all values of a field.
    pub fn select_none(&mut self, field: MetaField) {
        self.filters.insert(field, BTreeSet::new());
        self.refilter();
    }

    /// Translate an LHC table with the current model and add it as overlay.
    pub fn add_overlay(&mut self, path: &Path) -> Result<(), LimitError> {
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "LHC".to_string());
        let model = SimplifiedModel::new(self.variant, self.couplings).with_label(label);
        let limit = model.translate_csv(path, b',')?;
        self.overlays.push(limit);
        Ok(())
    }

    /// Figure of every visible limit plus the overlays, with one colour per
    /// series.
    pub fn figure(&self) -> (Figure, Vec<Color32>) {
        let mut fig = Figure::new();
        let mut colors = Vec::new();

        if let Some(cat) = &self.catalog {
            for &idx in &self.visible_indices {
                let rec = &cat.records[idx];
                match DirectDetection::from_record(rec.clone()) {
                    Ok(dd) => dd.plot(&mut fig),
                    Err(e) => {
                        log::warn!("Skipping limit {:08}: {e}", rec.id);
                        continue;
                    }
                }
                let color = self
                    .color_map
                    .as_ref()
                    .map(|cm| cm.color_for(rec.meta.get(cm.field)))
                    .unwrap_or(Color32::LIGHT_BLUE);
                colors.push(color);
            }
        }

        for overlay in &self.overlays {
            overlay.plot(&mut fig);
            colors.push(OVERLAY_COLOR);
        }
        (fig, colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lhctodd::data::model::{LimitMeta, LimitRecord};

    fn record(id: u32, kind: &str, expr: &str) -> LimitRecord {
        LimitRecord {
            id,
            curve: vec![[10.0, 1e-45], [100.0, 1e-46]],
            meta: LimitMeta {
                cite: format!("2000.{id:05}"),
                year: "2020".into(),
                kind: kind.into(),
                expr: expr.into(),
                name: format!("{expr} {kind}"),
            },
        }
    }

    fn state() -> AppState {
        let mut st = AppState::new(Config::with_data_dir("/nonexistent"));
        st.set_catalog(LimitCatalog::from_records(vec![
            record(1, "SI", "XENON1T"),
            record(2, "SD-neutron", "XENON1T"),
            record(3, "SI", "LZ"),
        ]));
        st
    }

    #[test]
    fn select_none_then_all() {
        let mut st = state();
        st.select_none(MetaField::Kind);
        assert!(st.visible_indices.is_empty());
        st.select_all(MetaField::Kind);
        assert_eq!(st.visible_indices, vec![0, 1, 2]);
    }

    #[test]
    fn search_narrows_visible() {
        let mut st = state();
        st.search = "LZ".into();
        st.refilter();
        assert_eq!(st.visible_indices, vec![2]);
    }

    #[test]
    fn figure_has_one_color_per_series() {
        let mut st = state();
        st.overlays.push(
            SimplifiedModel::spin_independent(Couplings::default())
                .with_label("monojet")
                .translate(&[[1000.0, 10.0], [1500.0, 100.0]]),
        );
        let (fig, colors) = st.figure();
        assert_eq!(fig.series.len(), 4);
        assert_eq!(colors.len(), 4);
        assert_eq!(colors[3], OVERLAY_COLOR);
    }

    #[test]
    fn missing_store_sets_status() {
        let mut st = AppState::new(Config::with_data_dir("/nonexistent"));
        st.load_store();
        assert!(st.catalog.is_none());
        assert!(st.status_message.is_some());
    }
}
