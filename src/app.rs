use eframe::egui::{self, Ui};

use crate::analysis::quadrant::{F0_REF, Quadrant, V0_REF};
use crate::config::Settings;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FvProfilesApp {
    pub state: AppState,
}

impl FvProfilesApp {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: AppState::new(settings),
        }
    }
}

impl eframe::App for FvProfilesApp {
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

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts(ui, &self.state);
        });
    }
}

fn charts(ui: &mut Ui, state: &AppState) {
    if !state.is_loaded() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a 'Data F-V' file to view profiles  (File → Open…)");
        });
        return;
    }

    if state.dataset.as_ref().is_some_and(|ds| ds.is_empty()) {
        ui.label("The file contains no test records.");
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("F-V profile interpretation");
            ui.label("V0 and F0 quadrants of the players, by team and/or position");
            plot::quadrant_plot(ui, state);
            let groups = state.quadrant_groups();
            if groups.is_empty() {
                ui.label("No test matches the current filters.");
            } else {
                ui.horizontal_wrapped(|ui: &mut Ui| {
                    for quadrant in Quadrant::ALL {
                        ui.label(format!("{quadrant}: {}", groups.rows(quadrant).len()));
                    }
                });
            }
            ui.label(format!(
                "Quadrant limits are literature means for professional football players: \
                 F0 = {F0_REF} N/kg & V0 = {V0_REF} m/s"
            ));

            ui.add_space(12.0);
            ui.heading("Individual V0 and F0");
            if state.athlete_indices.is_empty() {
                ui.label("Select one or more athletes in the side panel.");
            } else {
                plot::athlete_scatter(ui, state);

                ui.add_space(12.0);
                ui.heading("Force-velocity relationship");
                let profiles = state.profiles();
                plot::profile_plot(ui, state, &profiles);
                table::profile_summary(ui, state, &profiles);
            }

            ui.add_space(12.0);
            egui::CollapsingHeader::new("Visible tests")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    table::records_table(ui, state);
                });
        });
}
