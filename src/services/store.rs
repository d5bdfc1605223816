use crate::models::{next_trip_id, CreateTripRequest, Trip, TripKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::fs;

/// Errors that can occur with trip storage
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// File names of the two collections inside the data directory
#[derive(Debug, Clone)]
pub struct StoreFiles {
    pub riders: String,
    pub passengers: String,
}

impl Default for StoreFiles {
    fn default() -> Self {
        Self {
            riders: "riders.json".to_string(),
            passengers: "passengers.json".to_string(),
        }
    }
}

/// Flat-file trip storage
///
/// Each collection is a JSON array in its own file. Reads go through an
/// in-memory cache that is refreshed on every write and expires after the
/// configured TTL so that edits made to the files by hand are picked up.
pub struct TripStore {
    root: PathBuf,
    files: StoreFiles,
    cache: moka::future::Cache<TripKind, Arc<Vec<Trip>>>,
    // Serializes writers and cache refills, remembers the last issued id
    write_lock: tokio::sync::Mutex<i64>,
}

impl TripStore {
    /// Create a new store rooted at `root`
    pub fn new(root: impl Into<PathBuf>, files: StoreFiles, cache_capacity: u64, ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(cache_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            root: root.into(),
            files,
            cache,
            write_lock: tokio::sync::Mutex::new(0),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing a collection
    pub fn collection_path(&self, kind: TripKind) -> PathBuf {
        match kind {
            TripKind::Rider => self.root.join(&self.files.riders),
            TripKind::Passenger => self.root.join(&self.files.passengers),
        }
    }

    /// Create the data directory if it does not exist yet
    pub async fn ensure_structure(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    pub async fn health_check(&self) -> bool {
        fs::try_exists(&self.root).await.unwrap_or(false)
    }

    /// All trips of a kind, in insertion order
    pub async fn list(&self, kind: TripKind) -> Result<Arc<Vec<Trip>>, StoreError> {
        if let Some(trips) = self.cache.get(&kind).await {
            tracing::trace!("Cache hit: {}", kind.collection());
            return Ok(trips);
        }

        // Refill under the write lock so a stale read cannot replace what a writer cached
        let _guard = self.write_lock.lock().await;
        if let Some(trips) = self.cache.get(&kind).await {
            return Ok(trips);
        }

        tracing::trace!("Cache miss: {}", kind.collection());
        let trips = Arc::new(self.load(kind).await?);
        self.cache.insert(kind, trips.clone()).await;
        Ok(trips)
    }

    /// Fetch a single trip by id
    pub async fn get(&self, kind: TripKind, id: i64) -> Result<Trip, StoreError> {
        self.list(kind)
            .await?
            .iter()
            .find(|trip| trip.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("{} {}", kind, id)))
    }

    /// Append a new trip and persist the collection
    pub async fn insert(&self, kind: TripKind, request: CreateTripRequest) -> Result<Trip, StoreError> {
        let mut last_id = self.write_lock.lock().await;

        let mut trips = self.load(kind).await?;
        let floor = trips.iter().map(|t| t.id).max().unwrap_or(0).max(*last_id);
        let now = chrono::Utc::now();
        let id = next_trip_id(floor, now.timestamp_millis());

        let trip = request.into_trip(id, now);
        trips.push(trip.clone());
        self.save(kind, &trips).await?;
        *last_id = id;

        self.cache.insert(kind, Arc::new(trips)).await;
        tracing::debug!("Inserted {} {}", kind, id);
        Ok(trip)
    }

    /// Remove a trip by id and persist the collection
    pub async fn delete(&self, kind: TripKind, id: i64) -> Result<Trip, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut trips = self.load(kind).await?;
        let position = trips
            .iter()
            .position(|trip| trip.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("{} {}", kind, id)))?;

        let removed = trips.remove(position);
        self.save(kind, &trips).await?;

        self.cache.insert(kind, Arc::new(trips)).await;
        tracing::debug!("Deleted {} {}", kind, id);
        Ok(removed)
    }

    async fn load(&self, kind: TripKind) -> Result<Vec<Trip>, StoreError> {
        let path = self.collection_path(kind);
        if !fs::try_exists(&path).await? {
            return Ok(Vec::new());
        }

        let raw = fs::read(&path).await?;
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_slice(&raw)?)
    }

    async fn save(&self, kind: TripKind, trips: &[Trip]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).await?;
        let data = serde_json::to_vec_pretty(trips)?;

        // Readers only ever see a complete file
        let path = self.collection_path(kind);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, data).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }
}
