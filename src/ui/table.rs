use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::analysis::quadrant::classify;
use crate::color::quadrant_color;
use crate::state::{AppState, AthleteProfile};

const HEADERS: [&str; 8] = [
    "Team", "Position", "Sprint", "Date", "Athlete", "V0 (m/s)", "F0 (N/kg)", "Quadrant",
];

/// Visible records, one line per test.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let key = state.settings.athlete_key;
    let records = state.records(&state.visible_indices);

    TableBuilder::new(ui)
        .id_salt("records_table")
        .striped(true)
        .resizable(true)
        .vscroll(true)
        .max_scroll_height(300.0)
        .columns(Column::auto().at_least(60.0), HEADERS.len() - 1)
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, records.len(), |mut row| {
                let rec = records[row.index()];
                let quadrant = classify(rec.v0, rec.f0);
                row.col(|ui| {
                    ui.label(&rec.team);
                });
                row.col(|ui| {
                    ui.label(&rec.position);
                });
                row.col(|ui| {
                    ui.label(rec.sprint.to_string());
                });
                row.col(|ui| {
                    ui.label(rec.test_date.format("%d/%m/%Y").to_string());
                });
                row.col(|ui| {
                    ui.label(rec.athlete(key));
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", rec.v0));
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", rec.f0));
                });
                row.col(|ui| {
                    ui.label(RichText::new(quadrant.to_string()).color(quadrant_color(quadrant)));
                });
            });
        });
}

/// V0, F0 and F-V slope of each plotted profile.
pub fn profile_summary(ui: &mut Ui, state: &AppState, profiles: &[AthleteProfile]) {
    egui::Grid::new("profile_summary")
        .striped(true)
        .num_columns(4)
        .show(ui, |ui| {
            ui.strong("Profile");
            ui.strong("V0 (m/s)");
            ui.strong("F0 (N/kg)");
            ui.strong("Slope (N/kg per m/s)");
            ui.end_row();

            for profile in profiles {
                let line = &profile.line;
                ui.label(
                    RichText::new(&line.label).color(state.color_map.color_for(&profile.athlete)),
                );
                ui.label(format!("{:.2}", line.v0));
                ui.label(format!("{:.2}", line.intercept));
                ui.label(format!("{:.3}", line.slope));
                ui.end_row();
            }
        });
}
