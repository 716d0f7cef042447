use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::filter::TableView;
use crate::data::model::IDENTIFIER_COLUMN;

// ---------------------------------------------------------------------------
// Data table (bottom panel)
// ---------------------------------------------------------------------------

/// Render the filtered selection as a striped table: the identifier column
/// plus one column per selected year.
pub fn data_table(ui: &mut Ui, view: &TableView) {
    ui.strong("Data");
    ui.add_space(2.0);

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(160.0))
        .columns(Column::remainder().at_least(60.0), view.years.len())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong(IDENTIFIER_COLUMN);
            });
            for year in &view.years {
                let year = *year;
                header.col(|ui: &mut Ui| {
                    ui.strong(year.to_string());
                });
            }
        })
        .body(|mut body| {
            for row in &view.rows {
                body.row(18.0, |mut table_row| {
                    table_row.col(|ui: &mut Ui| {
                        ui.label(&row.name);
                    });
                    for value in &row.values {
                        let text = format_cell(*value);
                        table_row.col(|ui: &mut Ui| {
                            ui.label(text);
                        });
                    }
                });
            }
        });
}

/// Whole numbers without a fraction, everything else with two decimals.
fn format_cell(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{v:.0}"),
        Some(v) => format!("{v:.2}"),
        None => "–".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_format_by_kind() {
        assert_eq!(format_cell(Some(1200.0)), "1200");
        assert_eq!(format_cell(Some(12.5)), "12.50");
        assert_eq!(format_cell(None), "–");
    }
}
