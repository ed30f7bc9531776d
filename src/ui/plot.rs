use eframe::egui::{Align2, Color32, RichText, Ui};
use egui_plot::{HLine, Legend, Line, LineStyle, MarkerShape, Plot, PlotPoint, PlotUi, Points, Text, VLine};

use crate::analysis::profile::ChartBounds;
use crate::analysis::quadrant::{F0_REF, Quadrant, V0_REF};
use crate::color::quadrant_color;
use crate::state::{AppState, AthleteProfile};

const PLOT_HEIGHT: f32 = 380.0;
const V0_AXIS: &str = "V0 (m/s)";
const F0_AXIS: &str = "F0 (N/kg)";

/// Dashed guide lines at the reference V0 and F0.
fn reference_lines(plot_ui: &mut PlotUi) {
    plot_ui.hline(
        HLine::new(F0_REF)
            .name("F0 limit")
            .color(Color32::GRAY)
            .style(LineStyle::dashed_loose()),
    );
    plot_ui.vline(
        VLine::new(V0_REF)
            .name("V0 limit")
            .color(Color32::GRAY)
            .style(LineStyle::dashed_loose()),
    );
}

/// Athlete name drawn just above its point.
fn point_label(plot_ui: &mut PlotUi, name: &str, x: f64, y: f64, size: f32) {
    plot_ui.text(
        Text::new(PlotPoint::new(x, y), RichText::new(name).size(size))
            .anchor(Align2::CENTER_BOTTOM),
    );
}

// ---------------------------------------------------------------------------
// Quadrant scatter
// ---------------------------------------------------------------------------

/// V0/F0 of every visible test, coloured by quadrant.
pub fn quadrant_plot(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let groups = state.quadrant_groups();
    let key = state.settings.athlete_key;

    Plot::new("quadrant_plot")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label(V0_AXIS)
        .y_axis_label(F0_AXIS)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for quadrant in Quadrant::ALL {
                let rows = groups.rows(quadrant);
                let points: Vec<[f64; 2]> = rows
                    .iter()
                    .map(|&i| [dataset.records[i].v0, dataset.records[i].f0])
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .name(format!("{quadrant} ({})", quadrant.description()))
                        .color(quadrant_color(quadrant))
                        .shape(MarkerShape::Circle)
                        .radius(4.0),
                );

                if state.show_labels {
                    for &i in rows {
                        let rec = &dataset.records[i];
                        point_label(plot_ui, rec.athlete(key), rec.v0, rec.f0, 9.0);
                    }
                }
            }
            reference_lines(plot_ui);
        });
}

// ---------------------------------------------------------------------------
// Selected athletes
// ---------------------------------------------------------------------------

/// V0/F0 of the selected athletes, one series per athlete, always labelled.
pub fn athlete_scatter(ui: &mut Ui, state: &AppState) {
    let key = state.settings.athlete_key;
    let records = state.records(&state.athlete_indices);

    Plot::new("athlete_scatter")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label(V0_AXIS)
        .y_axis_label(F0_AXIS)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for rec in &records {
                let name = rec.athlete(key);
                plot_ui.points(
                    Points::new(vec![[rec.v0, rec.f0]])
                        .name(name)
                        .color(state.color_map.color_for(name))
                        .shape(MarkerShape::Circle)
                        .radius(5.0),
                );
                point_label(plot_ui, name, rec.v0, rec.f0, 11.0);
            }
            reference_lines(plot_ui);
        });
}

// ---------------------------------------------------------------------------
// Force-velocity profiles
// ---------------------------------------------------------------------------

/// One force-velocity line per selected test, with its two anchor points and
/// the reference profile point.
pub fn profile_plot(ui: &mut Ui, state: &AppState, profiles: &[AthleteProfile]) {
    let bounds = ChartBounds::covering(profiles.iter().map(|p| &p.line));

    Plot::new("profile_plot")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label("Velocity (m/s)")
        .y_axis_label("Force (N/kg)")
        .include_x(0.0)
        .include_x(bounds.max_velocity)
        .include_y(0.0)
        .include_y(bounds.max_force)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for profile in profiles {
                let color = state.color_map.color_for(&profile.athlete);
                plot_ui.line(
                    Line::new(profile.line.samples.clone())
                        .name(&profile.line.label)
                        .color(color)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(profile.line.anchors().to_vec())
                        .name(&profile.line.label)
                        .color(color)
                        .shape(MarkerShape::Circle)
                        .radius(4.0),
                );
            }
            plot_ui.points(
                Points::new(vec![[V0_REF, F0_REF]])
                    .name("Reference (V0 9.2, F0 7.7)")
                    .color(Color32::GRAY)
                    .shape(MarkerShape::Diamond)
                    .radius(5.0),
            );
        });
}
