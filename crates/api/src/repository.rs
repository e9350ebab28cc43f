use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracker_core::Clock;
use tracker_core::model::{Catalog, ProgressRecord, Roadmap, RoadmapId, SubtopicId};

/// Errors surfaced by API adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("not found")]
    NotFound,

    #[error("missing or expired credentials")]
    Unauthorized,

    #[error("request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("invalid base url: {0}")]
    InvalidUrl(String),

    #[error("connection error: {0}")]
    Connection(String),
}

/// Read-only access to roadmap definitions.
#[async_trait]
pub trait RoadmapApi: Send + Sync {
    /// `GET /roadmaps`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, auth or decoding failures.
    async fn list_roadmaps(&self) -> Result<Catalog, ApiError>;

    /// `GET /roadmaps/:id`
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown id, or other API errors.
    async fn get_roadmap(&self, id: &RoadmapId) -> Result<Roadmap, ApiError>;
}

/// Access to the current user's progress records.
#[async_trait]
pub trait ProgressApi: Send + Sync {
    /// `GET /progress`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, auth or decoding failures.
    async fn list_progress(&self) -> Result<Vec<ProgressRecord>, ApiError>;

    /// `GET /progress/:id`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, auth or decoding failures.
    async fn get_progress(&self, roadmap_id: &RoadmapId) -> Result<ProgressRecord, ApiError>;

    /// `POST /progress/:id/toggle`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the update is rejected or cannot be sent.
    async fn toggle_subtopic(
        &self,
        roadmap_id: &RoadmapId,
        subtopic: &SubtopicId,
    ) -> Result<ProgressRecord, ApiError>;

    /// `POST /progress/:id/note`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the update is rejected or cannot be sent.
    async fn save_note(
        &self,
        roadmap_id: &RoadmapId,
        subtopic: &SubtopicId,
        note: &str,
    ) -> Result<ProgressRecord, ApiError>;

    /// `POST /progress/:id/complete-all`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the update is rejected or cannot be sent.
    async fn complete_all(
        &self,
        roadmap_id: &RoadmapId,
        all_topic_ids: &[SubtopicId],
    ) -> Result<ProgressRecord, ApiError>;

    /// `DELETE /progress/:id`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the reset is rejected or cannot be sent.
    async fn reset(&self, roadmap_id: &RoadmapId) -> Result<(), ApiError>;
}

/// In-process API for tests and offline prototyping.
///
/// Mirrors the server's record semantics: records appear on first mutation,
/// every mutation stamps `last_updated`, reset deletes the record.
#[derive(Clone, Default)]
pub struct InMemoryApi {
    clock: Clock,
    catalog: Arc<Mutex<Catalog>>,
    records: Arc<Mutex<BTreeMap<RoadmapId, ProgressRecord>>>,
}

impl InMemoryApi {
    #[must_use]
    pub fn new(clock: Clock, catalog: Catalog) -> Self {
        Self {
            clock,
            catalog: Arc::new(Mutex::new(catalog)),
            records: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Seeds a stored record, replacing any existing one for the same roadmap.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Connection` if the record store is poisoned.
    pub fn insert_record(&self, record: ProgressRecord) -> Result<(), ApiError> {
        self.lock_records()?
            .insert(record.roadmap_id.clone(), record);
        Ok(())
    }

    fn lock_catalog(&self) -> Result<MutexGuard<'_, Catalog>, ApiError> {
        self.catalog
            .lock()
            .map_err(|e| ApiError::Connection(e.to_string()))
    }

    fn lock_records(&self) -> Result<MutexGuard<'_, BTreeMap<RoadmapId, ProgressRecord>>, ApiError> {
        self.records
            .lock()
            .map_err(|e| ApiError::Connection(e.to_string()))
    }

    fn ensure_roadmap(&self, id: &RoadmapId) -> Result<(), ApiError> {
        let catalog = self.lock_catalog()?;
        catalog.find(id).map(|_| ()).ok_or(ApiError::NotFound)
    }

    fn mutate(
        &self,
        roadmap_id: &RoadmapId,
        apply: impl FnOnce(&mut ProgressRecord),
    ) -> Result<ProgressRecord, ApiError> {
        self.ensure_roadmap(roadmap_id)?;
        let mut records = self.lock_records()?;
        let record = records
            .entry(roadmap_id.clone())
            .or_insert_with(|| ProgressRecord::empty(roadmap_id.clone()));
        apply(record);
        Ok(record.clone())
    }
}

#[async_trait]
impl RoadmapApi for InMemoryApi {
    async fn list_roadmaps(&self) -> Result<Catalog, ApiError> {
        Ok(self.lock_catalog()?.clone())
    }

    async fn get_roadmap(&self, id: &RoadmapId) -> Result<Roadmap, ApiError> {
        let catalog = self.lock_catalog()?;
        catalog.find(id).cloned().ok_or(ApiError::NotFound)
    }
}

#[async_trait]
impl ProgressApi for InMemoryApi {
    async fn list_progress(&self) -> Result<Vec<ProgressRecord>, ApiError> {
        Ok(self.lock_records()?.values().cloned().collect())
    }

    async fn get_progress(&self, roadmap_id: &RoadmapId) -> Result<ProgressRecord, ApiError> {
        self.ensure_roadmap(roadmap_id)?;
        let records = self.lock_records()?;
        Ok(records
            .get(roadmap_id)
            .cloned()
            .unwrap_or_else(|| ProgressRecord::empty(roadmap_id.clone())))
    }

    async fn toggle_subtopic(
        &self,
        roadmap_id: &RoadmapId,
        subtopic: &SubtopicId,
    ) -> Result<ProgressRecord, ApiError> {
        let now = self.clock.now();
        self.mutate(roadmap_id, |record| {
            record.toggle(subtopic.clone(), now);
        })
    }

    async fn save_note(
        &self,
        roadmap_id: &RoadmapId,
        subtopic: &SubtopicId,
        note: &str,
    ) -> Result<ProgressRecord, ApiError> {
        let now = self.clock.now();
        self.mutate(roadmap_id, |record| {
            record.set_note(subtopic.clone(), note, now);
        })
    }

    async fn complete_all(
        &self,
        roadmap_id: &RoadmapId,
        all_topic_ids: &[SubtopicId],
    ) -> Result<ProgressRecord, ApiError> {
        let now = self.clock.now();
        self.mutate(roadmap_id, |record| {
            record.complete_all(all_topic_ids.iter().cloned(), now);
        })
    }

    async fn reset(&self, roadmap_id: &RoadmapId) -> Result<(), ApiError> {
        self.ensure_roadmap(roadmap_id)?;
        self.lock_records()?.remove(roadmap_id);
        Ok(())
    }
}

/// Bundle of API handles shared by the services.
#[derive(Clone)]
pub struct Api {
    pub roadmaps: Arc<dyn RoadmapApi>,
    pub progress: Arc<dyn ProgressApi>,
}

impl Api {
    #[must_use]
    pub fn in_memory(clock: Clock, catalog: Catalog) -> Self {
        let api = InMemoryApi::new(clock, catalog);
        Self::from_backend(api)
    }

    /// Shares one backend for both roadmap and progress access.
    #[must_use]
    pub fn from_backend<B>(backend: B) -> Self
    where
        B: RoadmapApi + ProgressApi + 'static,
    {
        let backend = Arc::new(backend);
        let roadmaps: Arc<dyn RoadmapApi> = backend.clone();
        let progress: Arc<dyn ProgressApi> = backend;
        Self { roadmaps, progress }
    }
}
