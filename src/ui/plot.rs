use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::data::filter::TableView;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Series plot (central panel)
// ---------------------------------------------------------------------------

/// Render the per-region time series for the current selection: one line
/// per entity, x = year, y = metric value.
pub fn series_plot(ui: &mut Ui, state: &AppState, view: &TableView) {
    if view.rows.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No selected regions match the current dataset");
        });
        return;
    }

    Plot::new("series_plot")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label(state.topic.axis_label())
        .x_axis_formatter(|mark, _range| {
            // Years are integers; hide the fractional grid marks.
            if mark.value.fract() == 0.0 {
                format!("{:.0}", mark.value)
            } else {
                String::new()
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for row in &view.rows {
                let color = state.color_map.color_for(&row.name);

                // Cells that failed numeric parsing are skipped.
                let coords: Vec<[f64; 2]> = view
                    .years
                    .iter()
                    .zip(row.values.iter())
                    .filter_map(|(&year, value)| value.map(|v| [year as f64, v]))
                    .collect();

                let line = Line::new(PlotPoints::from(coords.clone()))
                    .name(&row.name)
                    .color(color)
                    .width(2.0);
                plot_ui.line(line);

                let markers = Points::new(PlotPoints::from(coords))
                    .name(&row.name)
                    .color(color)
                    .radius(2.5);
                plot_ui.points(markers);
            }
        });
}
