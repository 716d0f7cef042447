use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RegioLensApp {
    pub state: AppState,
}

impl RegioLensApp {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            state: AppState::new(data_dir),
        }
    }
}

impl eframe::App for RegioLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // A load/schema failure halts the whole page: no partial UI.
        if let Some(message) = self.state.fatal_error.clone() {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() * 0.4);
                    ui.label(
                        RichText::new(format!("Failed to load data: {message}"))
                            .color(Color32::RED)
                            .heading(),
                    );
                    ui.add_space(8.0);
                    if ui.button("Reload").clicked() {
                        self.state.reload();
                    }
                });
            });
            return;
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selection ----
        egui::SidePanel::left("selection_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Chart and table for the (already updated) selection ----
        match self.state.selection_view() {
            Ok(view) => {
                egui::TopBottomPanel::bottom("data_table")
                    .resizable(true)
                    .default_height(240.0)
                    .show(ctx, |ui| {
                        table::data_table(ui, &view);
                    });
                egui::CentralPanel::default().show(ctx, |ui| {
                    plot::series_plot(ui, &self.state, &view);
                });
            }
            Err(err) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new(err.to_string()).color(Color32::YELLOW).heading());
                    });
                });
            }
        }
    }
}
