use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::loader::DatasetSource;
use crate::data::model::{PayloadRange, SiteSelector};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – site dropdown and payload range
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    // ---- Site dropdown (searchable) ----
    ui.strong("Select a Launch Site");
    let mut chosen: Option<SiteSelector> = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(state.selector.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.add(
                egui::TextEdit::singleline(&mut state.site_search)
                    .hint_text("Select a Launch Site here"),
            );
            let options = state.site_options();
            if options.is_empty() {
                ui.weak("No matching sites");
            }
            for opt in options {
                if ui
                    .selectable_label(state.selector == opt, opt.to_string())
                    .clicked()
                {
                    chosen = Some(opt);
                }
            }
        });
    if let Some(selector) = chosen {
        state.set_site(selector);
    }

    ui.add_space(12.0);
    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload range (Kg):");
    let full = state.dataset.full_payload_range();
    let mut lo = state.payload_range.min_kg;
    let mut hi = state.payload_range.max_kg;
    ui.add(payload_slider(&mut lo, &full, "min"));
    ui.add(payload_slider(&mut hi, &full, "max"));

    if ui.small_button("Full range").clicked() {
        state.reset_payload_range();
    } else {
        state.set_payload_range(PayloadRange::new(lo, hi));
    }

    if state.payload_range.is_empty() {
        ui.label(RichText::new("Minimum is above maximum: no launches match.").color(Color32::YELLOW));
    }

    ui.add_space(12.0);
    ui.separator();
    ui.label(format!(
        "{} of {} launches in range",
        state.visible_indices.len(),
        state.dataset.len()
    ));
}

/// Slider over the dataset payload span. Only the label is rounded; the
/// stored value keeps its fraction so the end stops hit the exact bounds.
fn payload_slider<'a>(value: &'a mut f64, full: &PayloadRange, text: &str) -> egui::Slider<'a> {
    egui::Slider::new(value, full.min_kg..=full.max_kg)
        .text(text)
        .smart_aim(false)
        .custom_formatter(|v, _| format_kg(v))
}

fn format_kg(kg: f64) -> String {
    format!("{kg:.0} kg")
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
            if ui.button("Export charts…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} launches from {}",
            state.dataset.len(),
            state.source
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_source(DatasetSource::File(path));
    }
}

pub fn export_dialog(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export chart descriptions")
        .add_filter("JSON", &["json"])
        .set_file_name("launch_charts.json")
        .save_file()
    else {
        return;
    };

    let result = state
        .export_json()
        .and_then(|json| std::fs::write(&path, json).map_err(Into::into));
    match result {
        Ok(()) => {
            log::info!("Exported charts to {}", path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Failed to export charts: {e:#}");
            state.status_message = Some(format!("Export failed: {e:#}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_label_rounds_for_display_only() {
        assert_eq!(format_kg(100.6), "101 kg");
        assert_eq!(format_kg(9600.0), "9600 kg");
    }
}
