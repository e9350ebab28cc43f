use std::sync::Arc;

use api::{ApiError, ProgressApi, RoadmapApi};
use tracker_core::model::{Category, ProgressRecord, Roadmap, RoadmapId, SubtopicId};
use tracker_core::progress;

use crate::error::ServiceError;
use crate::view::{RoadmapCard, RoadmapDetail};

/// Roadmap browsing and progress updates for a single roadmap.
#[derive(Clone)]
pub struct RoadmapService {
    roadmaps: Arc<dyn RoadmapApi>,
    progress: Arc<dyn ProgressApi>,
}

impl RoadmapService {
    #[must_use]
    pub fn new(roadmaps: Arc<dyn RoadmapApi>, progress: Arc<dyn ProgressApi>) -> Self {
        Self { roadmaps, progress }
    }

    /// Roadmaps of one category, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Api` if the catalog cannot be fetched.
    pub async fn list_category(&self, category: Category) -> Result<Vec<Roadmap>, ServiceError> {
        let catalog = self.roadmaps.list_roadmaps().await?;
        Ok(catalog.by_category(category).to_vec())
    }

    /// Category listing as cards with the user's percentages.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Api` if either request fails.
    pub async fn category_cards(&self, category: Category) -> Result<Vec<RoadmapCard>, ServiceError> {
        let (catalog, records) =
            tokio::try_join!(self.roadmaps.list_roadmaps(), self.progress.list_progress())?;
        Ok(catalog
            .by_category(category)
            .iter()
            .map(|roadmap| RoadmapCard::new(roadmap, &records))
            .collect())
    }

    /// Fetch a roadmap with the user's progress on it.
    ///
    /// A missing progress record is shown as an empty one.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Api` if the roadmap cannot be fetched or the
    /// progress request fails for a reason other than not-found.
    pub async fn detail(&self, roadmap_id: &RoadmapId) -> Result<RoadmapDetail, ServiceError> {
        let (roadmap, record) = tokio::join!(
            self.roadmaps.get_roadmap(roadmap_id),
            self.progress.get_progress(roadmap_id)
        );
        let roadmap = roadmap?;
        let record = match record {
            Ok(record) => record,
            Err(ApiError::NotFound) => {
                tracing::warn!(roadmap = %roadmap_id, "no progress record; showing empty progress");
                ProgressRecord::empty(roadmap_id.clone())
            }
            Err(err) => return Err(err.into()),
        };

        let stale = progress::stale_subtopics(&roadmap, &record);
        if !stale.is_empty() {
            tracing::warn!(
                roadmap = %roadmap_id,
                stale = stale.len(),
                "progress references subtopics missing from the current roadmap"
            );
        }

        Ok(RoadmapDetail::new(roadmap, record))
    }

    /// Flip completion of one subtopic.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Api` if the update fails.
    pub async fn toggle(
        &self,
        roadmap_id: &RoadmapId,
        subtopic: &SubtopicId,
    ) -> Result<ProgressRecord, ServiceError> {
        let record = self.progress.toggle_subtopic(roadmap_id, subtopic).await?;
        tracing::info!(roadmap = %roadmap_id, %subtopic, completed = record.is_completed(subtopic), "subtopic toggled");
        Ok(record)
    }

    /// Store the note for one subtopic.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Api` if the update fails.
    pub async fn save_note(
        &self,
        roadmap_id: &RoadmapId,
        subtopic: &SubtopicId,
        note: &str,
    ) -> Result<ProgressRecord, ServiceError> {
        let record = self.progress.save_note(roadmap_id, subtopic, note).await?;
        tracing::info!(roadmap = %roadmap_id, %subtopic, "note saved");
        Ok(record)
    }

    /// Mark every subtopic of the roadmap's current shape complete.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Api` if the update fails.
    pub async fn mark_all_complete(&self, roadmap: &Roadmap) -> Result<ProgressRecord, ServiceError> {
        let ids = roadmap.all_subtopic_ids();
        let record = self.progress.complete_all(&roadmap.id, &ids).await?;
        tracing::info!(roadmap = %roadmap.id, subtopics = ids.len(), "roadmap marked complete");
        Ok(record)
    }

    /// Delete all progress on a roadmap. Returns the empty record to display.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Api` if the reset fails.
    pub async fn reset(&self, roadmap_id: &RoadmapId) -> Result<ProgressRecord, ServiceError> {
        self.progress.reset(roadmap_id).await?;
        tracing::info!(roadmap = %roadmap_id, "progress reset");
        Ok(ProgressRecord::empty(roadmap_id.clone()))
    }
}
