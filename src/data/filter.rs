use std::collections::BTreeSet;

use super::model::{Dataset, Row};

// ---------------------------------------------------------------------------
// Selection – the ephemeral (year range, entity set) chosen by the user
// ---------------------------------------------------------------------------

/// User-chosen parameters for one render pass. Owns no persistent state;
/// rebuilt with dataset defaults whenever the topic changes.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Inclusive year range, clamped to the dataset's bounds.
    pub year_range: (i32, i32),
    /// Chosen entity identifiers (trimmed form).
    pub entities: BTreeSet<String>,
}

impl Selection {
    /// Dataset defaults: the full year range and the first entity in file
    /// order.
    pub fn defaults_for(dataset: &Dataset) -> Self {
        let entities = dataset
            .entity_names()
            .first()
            .cloned()
            .into_iter()
            .collect();
        Selection {
            year_range: dataset.year_bounds(),
            entities,
        }
    }

    /// An empty entity set must be rejected by the caller before the
    /// filter runs.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Sub-table produced by applying a [`Selection`] to a [`Dataset`]:
/// the identifier column plus the year columns inside the range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableView {
    pub years: Vec<i32>,
    pub rows: Vec<Row>,
}

/// Keep only rows whose identifier is in the chosen set and columns whose
/// year is inside the inclusive range. No aggregation, no sorting beyond
/// natural row order; unknown entities are skipped silently.
pub fn filter_dataset(dataset: &Dataset, selection: &Selection) -> TableView {
    let (y0, y1) = selection.year_range;
    let keep: Vec<usize> = dataset
        .years
        .iter()
        .enumerate()
        .filter(|&(_, &year)| y0 <= year && year <= y1)
        .map(|(idx, _)| idx)
        .collect();

    let years = keep.iter().map(|&idx| dataset.years[idx]).collect();
    let rows = dataset
        .rows
        .iter()
        .filter(|row| selection.entities.contains(&row.name))
        .map(|row| Row {
            name: row.name.clone(),
            values: keep.iter().map(|&idx| row.values[idx]).collect(),
        })
        .collect();

    TableView { years, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn dataset() -> Dataset {
        let rows = vec![
            Row {
                name: "Moscow".to_string(),
                values: vec![Some(1.0), Some(2.0), Some(3.0)],
            },
            Row {
                name: "Tver".to_string(),
                values: vec![Some(4.0), None, Some(6.0)],
            },
        ];
        Dataset::new(
            PathBuf::from("budget.csv"),
            "UTF-8",
            "UTF-8",
            vec![2018, 2019, 2020],
            rows,
        )
    }

    fn selection(range: (i32, i32), entities: &[&str]) -> Selection {
        Selection {
            year_range: range,
            entities: entities.iter().map(|e| e.to_string()).collect(),
        }
    }

    #[test]
    fn single_year_range_keeps_exactly_one_column() {
        let view = filter_dataset(&dataset(), &selection((2019, 2019), &["Moscow"]));
        assert_eq!(view.years, [2019]);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].values, [Some(2.0)]);
    }

    #[test]
    fn unknown_entities_are_skipped_silently() {
        let view = filter_dataset(&dataset(), &selection((2018, 2020), &["Tver", "Atlantis"]));
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].name, "Tver");
    }

    #[test]
    fn empty_entity_set_is_caught_before_filtering() {
        let sel = selection((2018, 2020), &[]);
        assert!(sel.is_empty());
    }

    #[test]
    fn defaults_pick_first_entity_and_full_range() {
        let sel = Selection::defaults_for(&dataset());
        assert_eq!(sel.year_range, (2018, 2020));
        assert_eq!(sel.entities.len(), 1);
        assert!(sel.entities.contains("Moscow"));
    }

    #[test]
    fn range_outside_columns_yields_empty_view() {
        let view = filter_dataset(&dataset(), &selection((1990, 1995), &["Moscow"]));
        assert!(view.years.is_empty());
        assert_eq!(view.rows.len(), 1);
        assert!(view.rows[0].values.is_empty());
    }
}
