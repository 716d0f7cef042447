use std::path::PathBuf;
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::error::{DataError, Result};
use crate::data::filter::{filter_dataset, Selection, TableView};
use crate::data::loader::LoaderCache;
use crate::data::model::{Dataset, Topic};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Invariant after [`AppState::reload`]: either all three datasets are
/// loaded or `fatal_error` is set, never both.
pub struct AppState {
    /// Directory containing the three input files.
    pub data_dir: PathBuf,

    /// Memoized load results, shared across reruns.
    cache: LoaderCache,

    /// Loaded datasets indexed by `Topic` discriminant.
    datasets: Option<[Arc<Dataset>; 3]>,

    /// Topic currently on display.
    pub topic: Topic,

    /// Current (year range, entity set).
    pub selection: Selection,

    /// Entity → colour for the current dataset.
    pub color_map: ColorMap,

    /// Load/schema failure; when set, nothing else is rendered.
    pub fatal_error: Option<String>,

    /// Non-fatal notice shown in the top bar (e.g. a failed export).
    pub status_message: Option<String>,

    /// Whether the encoding debug panel is visible.
    pub show_debug: bool,
}

impl AppState {
    /// Build the state and load all three files from `data_dir`.
    pub fn new(data_dir: PathBuf) -> Self {
        let mut state = Self {
            data_dir,
            cache: LoaderCache::new(),
            datasets: None,
            topic: Topic::Budget,
            selection: Selection {
                year_range: (0, 0),
                entities: Default::default(),
            },
            color_map: ColorMap::default(),
            fatal_error: None,
            status_message: None,
            show_debug: false,
        };
        state.reload();
        state
    }

    /// (Re)load all three datasets through the cache. Any failure is fatal
    /// for the render pass: no partial set of datasets is published.
    pub fn reload(&mut self) {
        self.datasets = None;
        self.fatal_error = None;

        let mut loaded = Vec::with_capacity(Topic::ALL.len());
        for topic in Topic::ALL {
            let path = self.data_dir.join(topic.file_name());
            match self.cache.load(&path) {
                Ok(dataset) => loaded.push(dataset),
                Err(err) => {
                    log::error!("loading {}: {err}", path.display());
                    self.fatal_error = Some(err.to_string());
                    return;
                }
            }
        }

        if let Ok(datasets) = <[Arc<Dataset>; 3]>::try_from(loaded) {
            self.datasets = Some(datasets);
            self.reset_selection();
        }
    }

    /// Point the app at a different data directory and reload.
    pub fn set_data_dir(&mut self, dir: PathBuf) {
        self.data_dir = dir;
        self.cache.clear();
        self.reload();
    }

    /// Switch topic; the selection resets to the new dataset's defaults.
    pub fn set_topic(&mut self, topic: Topic) {
        if self.topic != topic {
            self.topic = topic;
            self.reset_selection();
        }
    }

    fn reset_selection(&mut self) {
        if let Some(dataset) = self.dataset_arc() {
            self.selection = Selection::defaults_for(&dataset);
            self.color_map = ColorMap::new(dataset.entity_names());
        }
    }

    /// Dataset for the current topic.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.datasets
            .as_ref()
            .map(|datasets| datasets[self.topic as usize].as_ref())
    }

    /// Shared handle to the current dataset, for widget code that also
    /// needs to mutate the state.
    pub fn dataset_arc(&self) -> Option<Arc<Dataset>> {
        self.datasets
            .as_ref()
            .map(|datasets| Arc::clone(&datasets[self.topic as usize]))
    }

    /// All loaded datasets with their topics, for the debug panel.
    pub fn loaded_datasets(&self) -> impl Iterator<Item = (Topic, &Arc<Dataset>)> + '_ {
        self.datasets
            .iter()
            .flat_map(|datasets| Topic::ALL.into_iter().zip(datasets.iter()))
    }

    /// Toggle one entity in the selection.
    pub fn toggle_entity(&mut self, name: &str) {
        if !self.selection.entities.remove(name) {
            self.selection.entities.insert(name.to_string());
        }
    }

    /// Select every entity of the current dataset.
    pub fn select_all_entities(&mut self) {
        if let Some(dataset) = self.dataset_arc() {
            self.selection.entities = dataset.entity_names().iter().cloned().collect();
        }
    }

    /// Deselect every entity.
    pub fn select_no_entities(&mut self) {
        self.selection.entities.clear();
    }

    /// The filtered sub-table for the current selection. An empty entity
    /// set is rejected here, before the filter runs.
    pub fn selection_view(&self) -> Result<TableView> {
        if self.selection.is_empty() {
            return Err(DataError::EmptySelection);
        }
        match self.dataset() {
            Some(dataset) => Ok(filter_dataset(dataset, &self.selection)),
            None => Ok(TableView::default()),
        }
    }
}
