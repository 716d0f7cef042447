//! RegioLens: a single-window dashboard over three regional statistics
//! tables (budget, housing stock, investments), one value per region per
//! year. The data layer resolves character-encoding ambiguity with a
//! detect-then-fallback chain; the UI is immediate-mode egui glue.

pub mod app;
pub mod color;
pub mod data;
pub mod state;
pub mod ui;
