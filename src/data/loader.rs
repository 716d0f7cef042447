use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use log::{info, warn};

use super::encoding::{self, DecodedText};
use super::error::{DataError, Result};
use super::model::{Dataset, Row, IDENTIFIER_COLUMN};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load one semicolon-delimited table, resolving encoding ambiguity via the
/// fallback chain and enforcing the schema invariants:
///
/// * every header is trimmed of surrounding whitespace;
/// * the `Name` column must exist, else [`DataError::Schema`];
/// * at least one digit-named year column must exist, else
///   [`DataError::EmptyYearRange`];
/// * identifier values are trimmed before use.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let bytes = fs::read(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let decoded = encoding::decode_with_fallback(&bytes).ok_or_else(|| DataError::Decode {
        path: path.to_path_buf(),
    })?;

    if decoded.is_last_resort() {
        // Kept anyway: a garbled string is recoverable by the user
        // visually, a refused load blocks the whole session.
        warn!(
            "{}: decoded with terminal latin1 fallback, text may be garbled",
            path.display()
        );
    }

    let dataset = parse_table(path, &decoded)?;
    let (y0, y1) = dataset.year_bounds();
    info!(
        "{}: {} rows, years {y0}..{y1}, encoding {} (detected {})",
        path.display(),
        dataset.len(),
        dataset.encoding,
        dataset.detected,
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

fn parse_table(path: &Path, decoded: &DecodedText) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .from_reader(decoded.text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| DataError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let name_idx = headers
        .iter()
        .position(|h| h == IDENTIFIER_COLUMN)
        .ok_or_else(|| DataError::Schema {
            path: path.to_path_buf(),
            column: IDENTIFIER_COLUMN,
        })?;

    // Year columns: headers made of decimal digits only, kept in
    // ascending year order no matter how the file orders them.
    let mut year_cols: Vec<(usize, i32)> = headers
        .iter()
        .enumerate()
        .filter_map(|(idx, h)| {
            if h.is_empty() || !h.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            h.parse::<i32>().ok().map(|year| (idx, year))
        })
        .collect();
    year_cols.sort_by_key(|&(_, year)| year);

    if year_cols.is_empty() {
        return Err(DataError::EmptyYearRange {
            path: path.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| DataError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        let name = record.get(name_idx).unwrap_or("").trim().to_string();
        let values = year_cols
            .iter()
            .map(|&(idx, _)| record.get(idx).and_then(parse_number))
            .collect();
        rows.push(Row { name, values });
    }

    let years = year_cols.iter().map(|&(_, year)| year).collect();
    Ok(Dataset::new(
        path.to_path_buf(),
        decoded.encoding,
        decoded.detected,
        years,
        rows,
    ))
}

/// Numeric cell parser. Accepts plain floats plus decimal-comma exports
/// ("12,5"); anything else becomes a missing point.
fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse()
        .ok()
        .or_else(|| trimmed.replace(',', ".").parse().ok())
}

// ---------------------------------------------------------------------------
// Memoization
// ---------------------------------------------------------------------------

/// (modification time, length) fingerprint; a changed file re-loads, an
/// unchanged one is served from memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fingerprint {
    modified: Option<SystemTime>,
    len: u64,
}

fn fingerprint(path: &Path) -> Result<Fingerprint> {
    let meta = fs::metadata(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Fingerprint {
        modified: meta.modified().ok(),
        len: meta.len(),
    })
}

struct CacheEntry {
    fingerprint: Fingerprint,
    dataset: Arc<Dataset>,
}

/// Process-wide memoization of load results, keyed by file path. The
/// detection pass and parse are the only non-trivial cost in the system
/// and are re-requested on every interaction, so hits are the common case.
#[derive(Default)]
pub struct LoaderCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

impl LoaderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load through the cache. Returns the shared dataset on a fingerprint
    /// hit, otherwise re-loads and replaces the entry.
    pub fn load(&mut self, path: &Path) -> Result<Arc<Dataset>> {
        let fingerprint = fingerprint(path)?;
        if let Some(entry) = self.entries.get(path) {
            if entry.fingerprint == fingerprint {
                return Ok(Arc::clone(&entry.dataset));
            }
        }

        let dataset = Arc::new(load_dataset(path)?);
        self.entries.insert(
            path.to_path_buf(),
            CacheEntry {
                fingerprint,
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }

    /// Drop every memoized result.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::WINDOWS_1251;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(content).expect("write temp file");
        file.flush().expect("flush temp file");
        file
    }

    #[test]
    fn headers_are_trimmed_and_identifier_found() {
        let file = write_temp(" Name ; 2018 ;2019 \nМосква;1;2\n".as_bytes());
        let ds = load_dataset(file.path()).unwrap();
        assert_eq!(ds.years, [2018, 2019]);
        assert_eq!(ds.rows[0].name, "Москва");
    }

    #[test]
    fn missing_identifier_is_schema_error() {
        let file = write_temp(b"Region;2018\nTver;1\n");
        let err = load_dataset(file.path()).unwrap_err();
        assert!(matches!(err, DataError::Schema { column: "Name", .. }));
    }

    #[test]
    fn no_year_columns_is_empty_year_range() {
        let file = write_temp(b"Name;total;note\nTver;1;x\n");
        let err = load_dataset(file.path()).unwrap_err();
        assert!(matches!(err, DataError::EmptyYearRange { .. }));
    }

    #[test]
    fn only_digit_headers_count_as_years() {
        let file = write_temp(b"Name;2018;2019;2020;abc\nTver;1;2;3;4\n");
        let ds = load_dataset(file.path()).unwrap();
        assert_eq!(ds.years, [2018, 2019, 2020]);
        // The non-year column is dropped from the model entirely.
        assert_eq!(ds.rows[0].values.len(), 3);
    }

    #[test]
    fn identifier_values_are_trimmed() {
        let file = write_temp(b"Name;2018\n Moscow ;1\nMoscow;2\n");
        let ds = load_dataset(file.path()).unwrap();
        assert_eq!(ds.rows[0].name, "Moscow");
        assert_eq!(ds.rows[1].name, "Moscow");
        // Deduplicated by the normalized value.
        assert_eq!(ds.entity_names(), ["Moscow"]);
    }

    #[test]
    fn year_columns_are_sorted_ascending() {
        let file = write_temp(b"Name;2020;2018;2019\nTver;3;1;2\n");
        let ds = load_dataset(file.path()).unwrap();
        assert_eq!(ds.years, [2018, 2019, 2020]);
        assert_eq!(ds.rows[0].values, [Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn decimal_commas_and_garbage_cells() {
        let file = write_temp(b"Name;2018;2019\nTver;12,5;n/a\n");
        let ds = load_dataset(file.path()).unwrap();
        assert_eq!(ds.rows[0].values, [Some(12.5), None]);
    }

    #[test]
    fn cp1251_file_is_structurally_identical() {
        let text = "Name;2018;2019\n\
            Москва;100;110\n\
            Санкт-Петербург;90;95\n\
            Новосибирская область;40;42\n";
        let (bytes, _, _) = WINDOWS_1251.encode(text);
        let file = write_temp(&bytes);
        let ds = load_dataset(file.path()).unwrap();
        assert_eq!(ds.years, [2018, 2019]);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.rows[0].name, "Москва");
        assert_eq!(ds.encoding, "windows-1251");
    }

    #[test]
    fn cache_hits_share_and_content_changes_reload() {
        let mut file = write_temp(b"Name;2018\nTver;1\n");
        let mut cache = LoaderCache::new();

        let first = cache.load(file.path()).unwrap();
        let second = cache.load(file.path()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        // A different length changes the fingerprint even when the
        // filesystem's mtime granularity is coarse.
        file.write_all(b"Omsk;2\n").unwrap();
        file.flush().unwrap();
        let third = cache.load(file.path()).unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(third.len(), 2);
    }
}
