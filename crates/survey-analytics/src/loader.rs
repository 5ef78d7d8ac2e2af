//! Reading the survey CSV and caching it for the life of the process.
//!
//! [`read_dataset`] always goes to storage. [`DatasetCache`] wraps it so the
//! file is read and cleaned at most once, even when several threads ask for
//! the dataset before it has been loaded.

use crate::cleaner::SurveyCleaner;
use crate::config::AnalyticsConfig;
use crate::dataset::{CleanedDataset, Dataset};
use crate::error::{AnalyticsError, Result};
use crate::schema::REQUIRED_COLUMNS;
use parking_lot::Mutex;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Read the survey CSV at `path` without caching.
///
/// # Errors
///
/// - [`AnalyticsError::NotFound`] if `path` does not exist
/// - [`AnalyticsError::Parse`] if the CSV is malformed (rows longer or shorter
///   than the header, invalid UTF-8) or lacks one of the required columns
/// - [`AnalyticsError::Io`] if the file cannot be read
pub fn read_dataset(path: &Path, config: &AnalyticsConfig) -> Result<Dataset> {
    if !path.is_file() {
        return Err(AnalyticsError::NotFound(path.to_path_buf()));
    }

    debug!("Reading survey CSV: {}", path.display());
    let parse_error = |e: PolarsError| AnalyticsError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(config.infer_schema_length)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(parse_error)?
        .finish()
        .map_err(parse_error)?;

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| df.column(col).is_err())
        .collect();
    if !missing.is_empty() {
        return Err(AnalyticsError::Parse {
            path: path.to_path_buf(),
            reason: format!("missing required columns: {}", missing.join(", ")),
        });
    }

    let bytes = std::fs::read(path)?;
    if let Some((row, fields)) = first_short_record(&bytes, df.width()) {
        return Err(AnalyticsError::Parse {
            path: path.to_path_buf(),
            reason: format!("row {row} has {fields} fields, header has {}", df.width()),
        });
    }

    info!(
        "Loaded survey dataset: {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(Dataset::with_source(df, path))
}

/// First data record with fewer fields than `width`, as `(row, fields)`.
///
/// Rows are numbered from 0 after the header. Separators and line breaks
/// inside quotes do not count; blank lines are skipped. Polars fills the
/// missing trailing fields of such a record with nulls instead of failing.
fn first_short_record(bytes: &[u8], width: usize) -> Option<(usize, usize)> {
    // record 0 is the header
    let mut record = 0;
    let mut fields = 1;
    let mut blank = true;
    let mut in_quotes = false;

    for &byte in bytes {
        match byte {
            b'"' => {
                in_quotes = !in_quotes;
                blank = false;
            }
            b',' if !in_quotes => {
                fields += 1;
                blank = false;
            }
            b'\n' if !in_quotes => {
                if !blank {
                    if record > 0 && fields < width {
                        return Some((record - 1, fields));
                    }
                    record += 1;
                }
                fields = 1;
                blank = true;
            }
            b'\r' => {}
            _ => blank = false,
        }
    }

    (!blank && record > 0 && fields < width).then(|| (record - 1, fields))
}

/// Process-wide holder of the raw and cleaned survey dataset.
///
/// Construct one at startup and pass it by reference to whatever serves
/// requests. The first call to [`DatasetCache::load`] or
/// [`DatasetCache::cleaned`] reads storage; later calls return the cached
/// `Arc`. The lock is held across the read so concurrent first callers wait
/// for a single load instead of each reading the file.
///
/// ```rust,ignore
/// let cache = DatasetCache::new(AnalyticsConfig::default());
/// let ds = cache.cleaned()?;
/// let value = country_metric_value(&ds, Some("Canada"), "treatment_rate")?;
/// ```
#[derive(Debug)]
pub struct DatasetCache {
    config: AnalyticsConfig,
    raw: Mutex<Option<Arc<Dataset>>>,
    cleaned: Mutex<Option<Arc<CleanedDataset>>>,
}

static_assertions::assert_impl_all!(DatasetCache: Send, Sync);
static_assertions::assert_impl_all!(Arc<CleanedDataset>: Send, Sync);

impl DatasetCache {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self {
            config,
            raw: Mutex::new(None),
            cleaned: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Resolve `path` against the configured project root.
    ///
    /// Absolute paths are returned unchanged.
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        self.config.project_root.join(path)
    }

    /// Raw dataset at `path` (relative to the project root), read on first use.
    ///
    /// Once a dataset is cached it is returned for every later call until
    /// [`DatasetCache::reset`], whatever `path` is passed.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Arc<Dataset>> {
        let path = self.resolve_path(path);
        let mut slot = self.raw.lock();

        if let Some(ds) = slot.as_ref() {
            if ds.source() != Some(path.as_path()) {
                warn!(
                    "Dataset already cached from {:?}; ignoring request for {}",
                    ds.source(),
                    path.display()
                );
            }
            return Ok(Arc::clone(ds));
        }

        let ds = Arc::new(read_dataset(&path, &self.config)?);
        *slot = Some(Arc::clone(&ds));
        Ok(ds)
    }

    /// Raw dataset at the configured `dataset_path`.
    pub fn load_default(&self) -> Result<Arc<Dataset>> {
        self.load(&self.config.dataset_path)
    }

    /// Cleaned dataset, loading and cleaning the configured file on first use.
    pub fn cleaned(&self) -> Result<Arc<CleanedDataset>> {
        let mut slot = self.cleaned.lock();
        if let Some(ds) = slot.as_ref() {
            return Ok(Arc::clone(ds));
        }

        let raw = self.load_default()?;
        let ds = Arc::new(SurveyCleaner::from_config(&self.config).clean(&raw)?);
        *slot = Some(Arc::clone(&ds));
        Ok(ds)
    }

    /// True once a raw dataset has been read.
    pub fn is_loaded(&self) -> bool {
        self.raw.lock().is_some()
    }

    /// Drop both cached datasets so the next call reads storage again.
    pub fn reset(&self) {
        // same order as `cleaned()` acquires them
        let mut cleaned = self.cleaned.lock();
        let mut raw = self.raw.lock();
        *cleaned = None;
        *raw = None;
        debug!("Dataset cache cleared");
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new(AnalyticsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn fixtures_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
    }

    fn fixture_cache(file: &str) -> DatasetCache {
        let config = AnalyticsConfig::builder()
            .project_root(fixtures_root())
            .dataset_path(file)
            .build()
            .unwrap();
        DatasetCache::new(config)
    }

    #[test]
    fn test_read_all_columns_as_text() {
        let path = fixtures_root().join("mental_health_sample.csv");
        let ds = read_dataset(&path, &AnalyticsConfig::default()).unwrap();

        assert_eq!(ds.height(), 11);
        assert_eq!(ds.width(), 17);
        assert_eq!(ds.source(), Some(path.as_path()));
        for col in ds.frame().get_columns() {
            assert_eq!(col.dtype(), &DataType::String, "column {}", col.name());
        }
    }

    #[test]
    fn test_missing_file() {
        let cache = fixture_cache("does_not_exist.csv");
        let err = cache.load_default().unwrap_err();
        assert!(matches!(err, AnalyticsError::NotFound(_)));
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(!cache.is_loaded());
    }

    #[test]
    fn test_ragged_row_is_parse_error() {
        let path = fixtures_root().join("ragged_row.csv");
        let err = read_dataset(&path, &AnalyticsConfig::default()).unwrap_err();
        assert!(matches!(err, AnalyticsError::Parse { .. }), "got {err}");
    }

    #[test]
    fn test_short_row_is_parse_error() {
        let path = fixtures_root().join("short_row.csv");
        let err = read_dataset(&path, &AnalyticsConfig::default()).unwrap_err();
        match err {
            AnalyticsError::Parse { reason, .. } => {
                assert!(reason.contains("row 5 has 16 fields"), "got {reason}")
            }
            other => panic!("expected parse error, got {other}"),
        }
    }

    #[test]
    fn test_first_short_record() {
        assert_eq!(first_short_record(b"a,b,c\n1,2,3\n4,5\n", 3), Some((1, 2)));
        assert_eq!(first_short_record(b"a,b,c\r\n1,2,3\r\n4,5", 3), Some((1, 2)));
        // blank trailing field is still a field
        assert_eq!(first_short_record(b"a,b,c\n1,2,\n", 3), None);
        // quoted separators and line breaks belong to the field
        assert_eq!(first_short_record(b"a,b,c\n\"x,y\",\"p\nq\",3\n\n", 3), None);
        assert_eq!(first_short_record(b"a,b,c\n\"x,y\",3\n", 3), Some((0, 2)));
    }

    #[test]
    fn test_load_is_cached() {
        let cache = fixture_cache("mental_health_sample.csv");
        let first = cache.load_default().unwrap();
        let second = cache.load("mental_health_sample.csv").unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        // a different path still returns the cached dataset
        let other = cache.load("ragged_row.csv").unwrap();
        assert!(Arc::ptr_eq(&first, &other));
    }

    #[test]
    fn test_reset_forces_fresh_load() {
        let cache = fixture_cache("mental_health_sample.csv");
        let first = cache.cleaned().unwrap();
        assert!(cache.is_loaded());

        cache.reset();
        assert!(!cache.is_loaded());

        let second = cache.cleaned().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(first.frame().equals_missing(second.frame()));
    }

    #[test]
    fn test_concurrent_first_access_loads_once() {
        let cache = fixture_cache("mental_health_sample.csv");
        let loaded: Vec<Arc<CleanedDataset>> = thread::scope(|s| {
            let handles: Vec<_> = (0..4).map(|_| s.spawn(|| cache.cleaned().unwrap())).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for ds in &loaded[1..] {
            assert!(Arc::ptr_eq(&loaded[0], ds));
        }
    }

    #[test]
    fn test_resolve_path() {
        let cache = fixture_cache("mental_health_sample.csv");
        assert_eq!(
            cache.resolve_path("x.csv"),
            fixtures_root().join("x.csv")
        );
        assert_eq!(cache.resolve_path("/abs/x.csv"), PathBuf::from("/abs/x.csv"));
    }
}
