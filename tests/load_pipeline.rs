//! End-to-end: write the three input files to a temp directory, boot the
//! application state, and walk a selection through the loader and filter.

use std::fs;
use std::path::Path;

use encoding_rs::WINDOWS_1251;
use tempfile::TempDir;

use regiolens::data::model::Topic;
use regiolens::state::AppState;

const BUDGET: &str = "Name;2018;2019;2020\n\
    Москва;10;20;30\n\
    Tver;1;2;3\n\
    Omsk;4;5;6\n";

const HOUSING: &str = "Name;2018;2019;2020\n\
    Москва;22,1;22,8;23,4\n\
    Санкт-Петербург;24;24,5;25\n\
    Нижегородская область;21;21,6;22\n";

const INVESTMENTS: &str = "Name;2018;2019;2020\n\
    Москва;500;600;700\n\
    Tver;50;60;70\n";

/// housing.csv goes to disk as Windows-1251 so the fallback chain runs on
/// real non-UTF-8 bytes.
fn write_data_dir(dir: &Path) {
    fs::write(dir.join("budget.csv"), BUDGET).unwrap();
    let (housing_bytes, _, _) = WINDOWS_1251.encode(HOUSING);
    fs::write(dir.join("housing.csv"), &housing_bytes).unwrap();
    fs::write(dir.join("investments.csv"), INVESTMENTS).unwrap();
}

#[test]
fn default_selection_renders_three_points_from_source_values() {
    let dir = TempDir::new().unwrap();
    write_data_dir(dir.path());

    let state = AppState::new(dir.path().to_path_buf());
    assert_eq!(state.fatal_error, None);
    assert_eq!(state.topic, Topic::Budget);

    // Defaults: first entity in file order, full year range.
    assert!(state.selection.entities.contains("Москва"));
    assert_eq!(state.selection.year_range, (2018, 2020));

    let view = state.selection_view().unwrap();
    assert_eq!(view.years, [2018, 2019, 2020]);
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].name, "Москва");
    assert_eq!(view.rows[0].values, [Some(10.0), Some(20.0), Some(30.0)]);
}

#[test]
fn topic_switch_resets_selection_and_decodes_cp1251() {
    let dir = TempDir::new().unwrap();
    write_data_dir(dir.path());

    let mut state = AppState::new(dir.path().to_path_buf());
    state.set_topic(Topic::Housing);

    let dataset = state.dataset().unwrap();
    assert_eq!(dataset.encoding, "windows-1251");
    assert_eq!(
        dataset.entity_names(),
        ["Москва", "Санкт-Петербург", "Нижегородская область"]
    );

    let view = state.selection_view().unwrap();
    assert_eq!(view.rows[0].values, [Some(22.1), Some(22.8), Some(23.4)]);
}

#[test]
fn narrowing_the_year_range_narrows_the_view() {
    let dir = TempDir::new().unwrap();
    write_data_dir(dir.path());

    let mut state = AppState::new(dir.path().to_path_buf());
    state.selection.year_range = (2019, 2019);
    state.select_all_entities();

    let view = state.selection_view().unwrap();
    assert_eq!(view.years, [2019]);
    assert_eq!(view.rows.len(), 3);
}

#[test]
fn deselecting_everything_is_an_error_not_an_empty_table() {
    let dir = TempDir::new().unwrap();
    write_data_dir(dir.path());

    let mut state = AppState::new(dir.path().to_path_buf());
    state.select_no_entities();

    let err = state.selection_view().unwrap_err();
    assert!(err.to_string().contains("no regions selected"));
}

#[test]
fn missing_identifier_column_is_fatal_and_names_the_file() {
    let dir = TempDir::new().unwrap();
    write_data_dir(dir.path());
    fs::write(
        dir.path().join("investments.csv"),
        "Region;2018;2019\nTver;1;2\n",
    )
    .unwrap();

    let state = AppState::new(dir.path().to_path_buf());
    let message = state
        .fatal_error
        .as_deref()
        .expect("schema failure must be fatal");
    assert!(message.contains("investments.csv"));
    assert!(message.contains("'Name'"));
    assert!(state.dataset().is_none());
}

#[test]
fn file_change_invalidates_the_memoized_load() {
    let dir = TempDir::new().unwrap();
    write_data_dir(dir.path());

    let mut state = AppState::new(dir.path().to_path_buf());
    assert_eq!(state.dataset().unwrap().len(), 3);

    fs::write(
        dir.path().join("budget.csv"),
        format!("{BUDGET}Kazan;7;8;9\n"),
    )
    .unwrap();
    state.reload();

    assert_eq!(state.fatal_error, None);
    assert_eq!(state.dataset().unwrap().len(), 4);
}
