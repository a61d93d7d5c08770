use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use lhctodd::data::model::MetaField;
use lhctodd::theory::Variant;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(catalog) = &state.catalog else {
        ui.label("No limit store loaded.");
        lhc_section(ui, state);
        return;
    };

    // Clone what we need so we can mutate state inside the loop.
    let unique = catalog.unique_values.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Search");
                if ui.text_edit_singleline(&mut state.search).changed() {
                    state.refilter();
                }
            });
            ui.separator();

            // ---- Colour-by selector ----
            ui.strong("Color by");
            let current = state.color_field;
            egui::ComboBox::from_id_salt("color_by")
                .selected_text(current.map(|f| f.to_string()).unwrap_or_default())
                .show_ui(ui, |ui: &mut Ui| {
                    for field in MetaField::ALL {
                        if ui
                            .selectable_label(current == Some(field), field.to_string())
                            .clicked()
                        {
                            state.set_color_field(field);
                        }
                    }
                });
            ui.separator();

            // ---- Per-field filter widgets (collapsible) ----
            for field in MetaField::ALL {
                let Some(all_values) = unique.get(&field) else {
                    continue;
                };

                let n_selected = state.filters.get(&field).map_or(0, |s| s.len());
                let header_text = format!("{field}  ({n_selected}/{})", all_values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(field.key())
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(field);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(field);
                            }
                        });

                        let colored = state.color_field == Some(field);
                        for val in all_values {
                            let mut text = RichText::new(val);
                            if colored {
                                if let Some(cm) = &state.color_map {
                                    text = text.color(cm.color_for(val));
                                }
                            }

                            let selected = state.filters.entry(field).or_default();
                            let mut checked = selected.contains(val);
                            if ui.checkbox(&mut checked, text).changed() {
                                if checked {
                                    selected.insert(val.clone());
                                } else {
                                    selected.remove(val);
                                }
                            }
                        }
                    });
            }

            ui.separator();
            lhc_section(ui, state);
        });

    // Recompute visible indices after any checkbox changes.
    state.refilter();
}

/// Model choice and couplings for translating LHC tables, plus the list of
/// current overlays.
fn lhc_section(ui: &mut Ui, state: &mut AppState) {
    ui.strong("LHC translation");
    ui.radio_value(&mut state.variant, Variant::SpinIndependent, "SI (vector / scalar)");
    ui.radio_value(&mut state.variant, Variant::SpinDependent, "SD (axial-vector)");

    egui::Grid::new("couplings").num_columns(2).show(ui, |ui: &mut Ui| {
        ui.label("g_χ");
        ui.add(egui::DragValue::new(&mut state.couplings.g_chi).speed(0.01).range(0.0..=10.0));
        ui.end_row();
        ui.label("g_q");
        ui.add(egui::DragValue::new(&mut state.couplings.g_quark).speed(0.01).range(0.0..=10.0));
        ui.end_row();
    });

    let mut remove = None;
    for (i, overlay) in state.overlays.iter().enumerate() {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(format!("{} [{}]", overlay.label, overlay.kind));
            if ui.small_button("✕").clicked() {
                remove = Some(i);
            }
        });
    }
    if let Some(i) = remove {
        state.overlays.remove(i);
    }
}

// ---------------------------------------------------------------------------
// Bottom panel – table of visible limits
// ---------------------------------------------------------------------------

pub fn limit_table(ui: &mut Ui, state: &AppState) {
    let Some(catalog) = &state.catalog else {
        return;
    };

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["id", "type", "Experiment", "arXiv", "name"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for &idx in &state.visible_indices {
                let rec = &catalog.records[idx];
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(rec.id.to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&rec.meta.kind);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&rec.meta.expr);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.hyperlink_to(&rec.meta.cite, rec.meta.citation_url());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&rec.meta.name);
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data directory…").clicked() {
                open_store_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.load_store();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Translate LHC limit…").clicked() {
                open_lhc_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(cat) = &state.catalog {
            ui.label(format!(
                "{} limits loaded, {} visible",
                cat.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_store_dialog(state: &mut AppState) {
    let dir = rfd::FileDialog::new()
        .set_title("Open data directory (containing darkmatter-data)")
        .set_directory(&state.config.data_dir)
        .pick_folder();

    if let Some(dir) = dir {
        state.open_data_dir(&dir);
    }
}

pub fn open_lhc_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open LHC (mediator mass, DM mass) limit")
        .add_filter("CSV", &["csv", "txt", "dat"])
        .pick_file();

    if let Some(path) = file {
        match state.add_overlay(&path) {
            Ok(()) => {
                log::info!("Added LHC overlay from {}", path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to translate {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
