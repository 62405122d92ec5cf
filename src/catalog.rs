// ABOUTME: File-backed exercise catalog mined from the JEFit progress-history flight stream
// ABOUTME: Loads lazily on first use, creates the cache file when missing, and supports refresh
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Exercise catalog
//!
//! Workout sessions only carry exercise ids. Names, muscle groups and
//! equipment come from the exercise definitions embedded in the JEFit web
//! app's flight stream, which is large and slow to fetch, so they are
//! cached in a JSON file (`id -> record`) and fetched again only when the
//! file is missing or a refresh is requested.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use jefit_core::errors::RscError;
use jefit_core::models::{ExerciseCatalogStats, ExerciseRecord};
use jefit_core::rsc::{is_reference, FieldSignature, RscParser};
use serde_json::Value;
use tokio::fs;
use tokio::sync::{OnceCell, RwLock, RwLockReadGuard};
use tracing::{debug, warn};

use crate::config::ServerConfig;
use crate::constants::exercise::SIGNATURE;
use crate::errors::{AppError, AppResult};
use crate::jefit::JefitClient;
use crate::logging::AppLogger;

/// Exercise records keyed by JEFit exercise id
pub type ExerciseMap = BTreeMap<String, ExerciseRecord>;

/// Shared exercise catalog
///
/// Concurrent callers of [`ExerciseCatalog::ensure_loaded`] share a single
/// load. Until a load succeeds the catalog is empty and reports fall back to
/// `Unknown Exercise (<id>)`.
pub struct ExerciseCatalog {
    path: PathBuf,
    parser: RscParser,
    entries: RwLock<ExerciseMap>,
    loaded: OnceCell<()>,
}

impl ExerciseCatalog {
    /// Create an unloaded catalog backed by `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, parser: RscParser) -> Self {
        Self {
            path: path.into(),
            parser,
            entries: RwLock::new(ExerciseMap::new()),
            loaded: OnceCell::new(),
        }
    }

    /// Create an unloaded catalog from the server configuration
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.catalog.path.clone(), config.parser.parser())
    }

    /// Backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a load has succeeded
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }

    /// Load the catalog once: from the cache file when present, otherwise
    /// from JEFit, writing the cache file on success
    ///
    /// A failed load is logged and retried on the next call.
    pub async fn ensure_loaded(&self, client: &JefitClient) {
        let loaded = self
            .loaded
            .get_or_try_init(|| async { self.initialize(client).await })
            .await;
        if let Err(e) = loaded {
            warn!(path = %self.path.display(), "Exercise database unavailable: {e}");
        }
    }

    async fn initialize(&self, client: &JefitClient) -> AppResult<()> {
        if fs::try_exists(&self.path).await.unwrap_or(false) {
            let entries = read_catalog_file(&self.path).await?;
            AppLogger::log_catalog_event("loaded", entries.len(), "file");
            *self.entries.write().await = entries;
            return Ok(());
        }

        warn!(path = %self.path.display(), "Exercise database not found, fetching from JEFit");
        self.refresh(client).await.map(|_| ())
    }

    /// Fetch the flight stream again and replace the catalog and its file
    ///
    /// # Errors
    ///
    /// Returns an error when the fetch or the file write fails, or
    /// `ResourceNotFound` when the stream holds no exercises. The catalog
    /// and its file are left untouched on error.
    pub async fn refresh(&self, client: &JefitClient) -> AppResult<ExerciseCatalogStats> {
        let stream = client.fetch_flight_stream().await?;
        let entries = extract_exercises(&stream, &self.parser)?;
        if entries.is_empty() {
            return Err(AppError::not_found("exercises in the JEFit flight stream"));
        }
        self.replace(entries).await
    }

    /// Persist `entries` to the cache file and make them the catalog contents
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the file cannot be written.
    pub async fn replace(&self, entries: ExerciseMap) -> AppResult<ExerciseCatalogStats> {
        write_catalog_file(&self.path, &entries).await?;
        let stats = ExerciseCatalogStats::from_catalog(&entries);
        AppLogger::log_catalog_event("refreshed", stats.total, "jefit");
        *self.entries.write().await = entries;
        Ok(stats)
    }

    /// Look up one exercise
    pub async fn get(&self, id: &str) -> Option<ExerciseRecord> {
        self.entries.read().await.get(id).cloned()
    }

    /// Read access to every record, for rendering many lookups at once
    pub async fn read(&self) -> RwLockReadGuard<'_, ExerciseMap> {
        self.entries.read().await
    }

    /// Number of records held
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether no records are held
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Totals by exercise kind
    pub async fn stats(&self) -> ExerciseCatalogStats {
        ExerciseCatalogStats::from_catalog(&*self.entries.read().await)
    }
}

/// Mine exercise definitions out of a raw flight stream
///
/// Fragments are mined as decoded. Only the matched objects are resolved,
/// so a field such as `body_parts: "$5"` is read from its fragment while
/// nested shared references elsewhere in the stream are never expanded.
/// Mined objects that are not complete exercise definitions are dropped.
/// When an id occurs more than once the first occurrence, in fragment
/// order, is kept.
///
/// # Errors
///
/// In strict mode, any decoding or resolution failure. In lenient mode an
/// object whose references form a cycle is read unresolved.
pub fn extract_exercises(stream: &str, parser: &RscParser) -> AppResult<ExerciseMap> {
    let fragments = parser.decode(stream)?;
    let signature = FieldSignature::new(SIGNATURE)?;
    let mut exercises = ExerciseMap::new();

    for object in parser.mine_fragments(&fragments, &signature) {
        let record = if object.values().any(has_reference) {
            let raw = Value::Object(object.clone());
            match parser.resolve(&raw, &fragments) {
                Ok(Value::Object(resolved)) => ExerciseRecord::from_object(&resolved),
                Ok(_) => None,
                Err(e @ RscError::CyclicReference { .. }) if !parser.mode().is_strict() => {
                    warn!("Reading unresolved exercise object: {e}");
                    ExerciseRecord::from_object(object)
                }
                Err(e) => return Err(e.into()),
            }
        } else {
            ExerciseRecord::from_object(object)
        };

        if let Some(record) = record {
            exercises.entry(record.id.clone()).or_insert(record);
        }
    }

    debug!(
        fragments = fragments.len(),
        exercises = exercises.len(),
        "Extracted exercises from flight stream"
    );
    Ok(exercises)
}

fn has_reference(value: &Value) -> bool {
    match value {
        Value::String(s) => is_reference(s),
        Value::Array(items) => items.iter().any(has_reference),
        Value::Object(object) => object.values().any(has_reference),
        _ => false,
    }
}

/// Read a catalog file
///
/// # Errors
///
/// Returns `StorageError` when the file cannot be read and
/// `SerializationError` when it is not a catalog.
pub async fn read_catalog_file(path: &Path) -> AppResult<ExerciseMap> {
    let text = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&text)?)
}

/// Write a catalog file as indented JSON, creating its directory
///
/// # Errors
///
/// Returns `StorageError` when the directory or file cannot be written.
pub async fn write_catalog_file(path: &Path, entries: &ExerciseMap) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let text = serde_json::to_string_pretty(entries)?;
    fs::write(path, text).await?;
    Ok(())
}
