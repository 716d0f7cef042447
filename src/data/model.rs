use std::collections::HashSet;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Topic – which of the three input files is on display
// ---------------------------------------------------------------------------

/// The three datasets the dashboard serves. The numeric discriminant
/// doubles as the index into the loaded-dataset array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Budget = 0,
    Housing = 1,
    Investments = 2,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Budget, Topic::Housing, Topic::Investments];

    /// Input file for this topic, relative to the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Topic::Budget => "budget.csv",
            Topic::Housing => "housing.csv",
            Topic::Investments => "investments.csv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Topic::Budget => "Budget",
            Topic::Housing => "Housing stock",
            Topic::Investments => "Investments",
        }
    }

    /// Y-axis caption for the chart.
    pub fn axis_label(self) -> &'static str {
        match self {
            Topic::Budget => "Budget (RUB)",
            Topic::Housing => "Housing stock (m² per capita)",
            Topic::Investments => "Investments (RUB)",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Topic::Budget => "Regional budget figures",
            Topic::Housing => "Housing availability per region",
            Topic::Investments => "Investment flows per region",
        }
    }
}

// ---------------------------------------------------------------------------
// Row – one entity of the source table
// ---------------------------------------------------------------------------

/// Column holding entity (region) names; matched case-sensitively after
/// header trimming.
pub const IDENTIFIER_COLUMN: &str = "Name";

/// One table row. `values` runs parallel to the owning dataset's `years`;
/// a `None` cell is a value that failed numeric parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The normalized in-memory table loaded from one input file: trimmed
/// identifiers plus digit-named year columns. Immutable after load.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Path the table was loaded from.
    pub source: PathBuf,
    /// Encoding that actually decoded the bytes.
    pub encoding: &'static str,
    /// Encoding the statistical detector guessed.
    pub detected: &'static str,
    /// Year columns in ascending order. Never empty for a loaded dataset.
    pub years: Vec<i32>,
    pub rows: Vec<Row>,
    /// Unique identifiers in file order, for the region picker.
    entity_names: Vec<String>,
}

impl Dataset {
    /// Build the dataset and precompute the deduplicated entity list.
    pub fn new(
        source: PathBuf,
        encoding: &'static str,
        detected: &'static str,
        years: Vec<i32>,
        rows: Vec<Row>,
    ) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut entity_names = Vec::new();
        for row in &rows {
            if seen.insert(row.name.as_str()) {
                entity_names.push(row.name.clone());
            }
        }
        Dataset {
            source,
            encoding,
            detected,
            years,
            rows,
            entity_names,
        }
    }

    /// Inclusive (min, max) of the year columns.
    pub fn year_bounds(&self) -> (i32, i32) {
        let first = self.years.first().copied().unwrap_or_default();
        let last = self.years.last().copied().unwrap_or_default();
        (first, last)
    }

    pub fn entity_names(&self) -> &[String] {
        &self.entity_names
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, values: &[f64]) -> Row {
        Row {
            name: name.to_string(),
            values: values.iter().copied().map(Some).collect(),
        }
    }

    #[test]
    fn entity_names_deduplicate_in_file_order() {
        let ds = Dataset::new(
            PathBuf::from("budget.csv"),
            "UTF-8",
            "UTF-8",
            vec![2018, 2019],
            vec![row("B", &[1.0, 2.0]), row("A", &[3.0, 4.0]), row("B", &[5.0, 6.0])],
        );
        assert_eq!(ds.entity_names(), ["B", "A"]);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn year_bounds_span_the_column_set() {
        let ds = Dataset::new(
            PathBuf::from("housing.csv"),
            "UTF-8",
            "UTF-8",
            vec![2015, 2016, 2020],
            vec![],
        );
        assert_eq!(ds.year_bounds(), (2015, 2020));
    }
}
