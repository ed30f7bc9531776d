use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config;
use crate::data::filter::SelectionMode;
use crate::data::model::{AthleteKey, FilterColumn};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if !state.is_loaded() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for column in FilterColumn::CHAIN {
                filter_widget(ui, state, column);
            }

            ui.add_space(8.0);
            ui.strong("Athletes");
            ui.separator();
            let athletes = state.athlete_column();
            filter_widget(ui, state, athletes);
        });
}

fn filter_widget(ui: &mut Ui, state: &mut AppState, column: FilterColumn) {
    match state.mode_for(column) {
        SelectionMode::Multiple => checkbox_filter(ui, state, column),
        SelectionMode::Single => combo_filter(ui, state, column),
    }
}

/// Collapsible checkbox list with All/None shortcuts.
fn checkbox_filter(ui: &mut Ui, state: &mut AppState, column: FilterColumn) {
    let options = state.options(column);
    let n_selected = state.filters.selection(column).map_or(0, |s| s.len());
    let header_text = if n_selected == 0 {
        format!("{}  (all)", column.label())
    } else {
        format!("{}  ({n_selected}/{})", column.label(), options.len())
    };

    let is_athlete = matches!(column, FilterColumn::FullName | FilterColumn::Surname);

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(column)
        .default_open(is_athlete)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(column);
                }
                if ui.small_button("None").clicked() {
                    state.select_none(column);
                }
            });

            for value in &options {
                let mut text = RichText::new(value.to_string());
                if is_athlete {
                    text = text.color(state.color_map.color_for(&value.to_string()));
                }
                let mut checked = state.filters.is_selected(column, value);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_filter_value(column, value);
                }
            }
        });
}

/// Single-value picker; "(all)" clears the filter.
fn combo_filter(ui: &mut Ui, state: &mut AppState, column: FilterColumn) {
    let options = state.options(column);
    let current = state
        .filters
        .selection(column)
        .and_then(|s| s.first())
        .map_or_else(|| "(all)".to_string(), |v| v.to_string());

    ui.strong(column.label());
    egui::ComboBox::from_id_salt(column)
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(!state.filters.is_active(column), "(all)")
                .clicked()
            {
                state.select_none(column);
            }
            for value in &options {
                let selected = state.filters.is_selected(column, value);
                if ui.selectable_label(selected, value.to_string()).clicked() {
                    state.toggle_filter_value(column, value);
                }
            }
        });
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.menu_button("Settings", |ui: &mut Ui| {
            settings_menu(ui, state);
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let athletes = ds
                .unique_values
                .get(&state.athlete_column())
                .map_or(0, |v| v.len());
            ui.label(format!(
                "{} tests ({athletes} athletes) loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
            if let Some(name) = state.source.as_ref().and_then(|p| p.file_name()) {
                ui.label(RichText::new(name.to_string_lossy()).weak());
            }
        }

        ui.separator();

        if ui
            .selectable_label(state.show_labels, "Name labels")
            .clicked()
        {
            state.show_labels = !state.show_labels;
        }

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

fn settings_menu(ui: &mut Ui, state: &mut AppState) {
    ui.label("Identify athletes by");
    let mut key = state.settings.athlete_key;
    ui.radio_value(&mut key, AthleteKey::FullName, "Full name (NOM Prénom)");
    ui.radio_value(&mut key, AthleteKey::Surname, "Surname (NOM)");
    state.set_athlete_key(key);

    ui.separator();
    for column in [FilterColumn::Sprint, FilterColumn::Date] {
        let mut single = state.mode_for(column) == SelectionMode::Single;
        if ui
            .checkbox(&mut single, format!("Single {} only", column.label().to_lowercase()))
            .changed()
        {
            let mode = if single {
                SelectionMode::Single
            } else {
                SelectionMode::Multiple
            };
            state.set_selection_mode(column, mode);
        }
    }

    ui.separator();
    if ui.button("Save settings").clicked() {
        let mut settings = state.settings.clone();
        settings.show_labels = state.show_labels;
        let path = config::settings_path();
        state.status_message = Some(match settings.save_to(&path) {
            Ok(()) => {
                log::info!("Settings saved to {}", path.display());
                format!("Settings saved to {}", path.display())
            }
            Err(e) => {
                log::error!("Failed to save settings: {e}");
                format!("Error: {e}")
            }
        });
        ui.close_menu();
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open F-V test results")
        .add_filter(
            "Supported files",
            &["csv", "json", "parquet", "pq", "xlsx", "xlsm", "xlsb", "xls", "ods"],
        )
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("Spreadsheet", &["xlsx", "xlsm", "xlsb", "xls", "ods"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
