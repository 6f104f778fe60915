use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::color;
use crate::data::model::LaunchRecord;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

/// Table of the launches currently passing the filters.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let rows: Vec<&LaunchRecord> = state.visible_records().collect();
    if rows.is_empty() {
        ui.weak("No launches match the current filters.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(300.0)
        .column(Column::auto())
        .column(Column::auto().at_least(110.0))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Flight", "Launch Site", "Payload (kg)", "Outcome", "Booster", "Booster Version"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let rec = rows[row.index()];
                row.col(|ui| {
                    ui.label(rec.flight_number.map(|n| n.to_string()).unwrap_or_default());
                });
                row.col(|ui| {
                    ui.label(&rec.launch_site);
                });
                row.col(|ui| {
                    ui.label(format!("{:.0}", rec.payload_mass_kg));
                });
                row.col(|ui| {
                    ui.colored_label(color::outcome_color(rec.outcome), rec.outcome.label());
                });
                row.col(|ui| {
                    ui.colored_label(
                        state.booster_colors.color_for(&rec.booster_version_category),
                        &rec.booster_version_category,
                    );
                });
                row.col(|ui| {
                    ui.label(rec.booster_version.as_deref().unwrap_or(""));
                });
            });
        });
}
