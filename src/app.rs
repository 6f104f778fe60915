use eframe::egui::{self, RichText};

use crate::color;
use crate::state::AppState;
use crate::ui::{panels, pie, scatter, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub title: String,
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(title: String, state: AppState) -> Self {
        Self { title, state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: site + payload controls ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: title, pie, scatter, records ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(&self.title).size(32.0).color(color::TITLE).strong());
            });
            ui.add_space(6.0);

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    pie::success_pie(ui, &self.state.pie);
                    ui.separator();
                    scatter::payload_scatter(ui, &self.state.scatter);
                    ui.separator();
                    egui::CollapsingHeader::new(format!(
                        "Launch records ({})",
                        self.state.visible_indices.len()
                    ))
                    .default_open(false)
                    .show(ui, |ui| {
                        table::records_table(ui, &self.state);
                    });
                });
        });
    }
}
