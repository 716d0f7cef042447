use std::path::Path;

use anyhow::Context as _;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::TableView;
use crate::data::model::{Topic, IDENTIFIER_COLUMN};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the topic / period / region selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Regional analysis");
    ui.separator();

    // ---- Topic ----
    ui.strong("Topic");
    ui.horizontal(|ui: &mut Ui| {
        for topic in Topic::ALL {
            if ui.radio(state.topic == topic, topic.label()).clicked() {
                state.set_topic(topic);
            }
        }
    });
    ui.label(RichText::new(state.topic.description()).weak());
    ui.separator();

    // Clone the handle so the dataset stays readable while widgets below
    // mutate the state.
    let dataset = match state.dataset_arc() {
        Some(dataset) => dataset,
        None => {
            ui.label("No data loaded.");
            return;
        }
    };

    // ---- Year range ----
    ui.strong("Period");
    let (min_year, max_year) = dataset.year_bounds();
    let (mut y0, mut y1) = state.selection.year_range;
    ui.add(egui::Slider::new(&mut y0, min_year..=max_year).text("from"));
    ui.add(egui::Slider::new(&mut y1, min_year..=max_year).text("to"));
    state.selection.year_range = (y0.min(y1), y0.max(y1));
    ui.separator();

    // ---- Regions ----
    let n_selected = state.selection.entities.len();
    let n_total = dataset.entity_names().len();
    ui.strong(format!("Regions  ({n_selected}/{n_total})"));
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all_entities();
        }
        if ui.small_button("None").clicked() {
            state.select_no_entities();
        }
    });

    ScrollArea::vertical()
        .auto_shrink([false, true])
        .max_height(ui.available_height() * 0.5)
        .show(ui, |ui: &mut Ui| {
            for name in dataset.entity_names() {
                let mut checked = state.selection.entities.contains(name);
                let text = RichText::new(name).color(state.color_map.color_for(name));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_entity(name);
                }
            }
        });

    ui.separator();
    summary_panel(ui, state);

    if state.show_debug {
        ui.separator();
        debug_panel(ui, state);
    }
}

/// Textual summary of the current selection.
fn summary_panel(ui: &mut Ui, state: &AppState) {
    let (y0, y1) = state.selection.year_range;
    ui.strong("Summary");
    ui.label(format!("Topic: {}", state.topic.label()));
    ui.label(format!("Period: {y0} to {y1}"));
    ui.label(format!("Regions: {}", state.selection.entities.len()));
    ui.label(format!("Date: {}", chrono::Local::now().format("%Y-%m-%d")));
}

/// Per-file encoding details, for diagnosing heterogeneous exports.
fn debug_panel(ui: &mut Ui, state: &AppState) {
    egui::CollapsingHeader::new(RichText::new("Encoding details").strong())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            for (topic, dataset) in state.loaded_datasets() {
                ui.label(format!(
                    "{}: detected {}, decoded as {}",
                    topic.file_name(),
                    dataset.detected,
                    dataset.encoding,
                ));
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
            if ui.button("Open data folder…").clicked() {
                pick_data_dir(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Export selection…").clicked() {
                export_selection(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(format!("Data folder: {}", state.data_dir.display()));
        ui.separator();
        ui.toggle_value(&mut state.show_debug, "Debug");

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Dialogs
// ---------------------------------------------------------------------------

fn pick_data_dir(state: &mut AppState) {
    let dir = rfd::FileDialog::new()
        .set_title("Open data folder")
        .pick_folder();

    if let Some(dir) = dir {
        log::info!("Switching data folder to {}", dir.display());
        state.set_data_dir(dir);
    }
}

/// Save the current filtered selection as a semicolon-delimited CSV.
fn export_selection(state: &mut AppState) {
    let view = match state.selection_view() {
        Ok(view) => view,
        Err(err) => {
            state.status_message = Some(err.to_string());
            return;
        }
    };

    let file = rfd::FileDialog::new()
        .set_title("Export selection")
        .set_file_name("selection.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match write_view_csv(&path, &view) {
            Ok(()) => {
                log::info!("Exported {} rows to {}", view.rows.len(), path.display());
                state.status_message = None;
            }
            Err(err) => {
                log::error!("Export failed: {err:#}");
                state.status_message = Some(format!("Export failed: {err:#}"));
            }
        }
    }
}

fn write_view_csv(path: &Path, view: &TableView) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .context("creating export file")?;

    let mut header = vec![IDENTIFIER_COLUMN.to_string()];
    header.extend(view.years.iter().map(|year| year.to_string()));
    writer.write_record(&header).context("writing header")?;

    for row in &view.rows {
        let mut record = vec![row.name.clone()];
        record.extend(row.values.iter().map(|value| match value {
            Some(v) => v.to_string(),
            None => String::new(),
        }));
        writer.write_record(&record).context("writing row")?;
    }

    writer.flush().context("flushing export file")?;
    Ok(())
}
