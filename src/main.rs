use std::path::PathBuf;

use clap::Parser;
use eframe::egui;

use regiolens::app::RegioLensApp;

/// Regional statistics dashboard: budget, housing and investment figures
/// per region per year.
#[derive(Parser)]
#[command(name = "regiolens", version, about)]
struct Cli {
    /// Directory containing budget.csv, housing.csv and investments.csv.
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,
}

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "RegioLens – Regional Statistics",
        options,
        Box::new(move |_cc| Ok(Box::new(RegioLensApp::new(cli.data_dir)))),
    )
}
