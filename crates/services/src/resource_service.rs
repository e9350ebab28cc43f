use std::sync::Arc;

use api::RoadmapApi;
use tracker_core::model::{Resources, RoadmapId};

use crate::error::ServiceError;

/// Study material attached to a roadmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapResources {
    pub roadmap_id: RoadmapId,
    pub title: String,
    pub resources: Resources,
}

#[derive(Clone)]
pub struct ResourceService {
    roadmaps: Arc<dyn RoadmapApi>,
}

impl ResourceService {
    #[must_use]
    pub fn new(roadmaps: Arc<dyn RoadmapApi>) -> Self {
        Self { roadmaps }
    }

    /// Notes and videos for a roadmap, or `None` when it has none.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Api` if the roadmap cannot be fetched.
    pub async fn load(&self, roadmap_id: &RoadmapId) -> Result<Option<RoadmapResources>, ServiceError> {
        let roadmap = self.roadmaps.get_roadmap(roadmap_id).await?;
        let Some(resources) = roadmap.resources.filter(|r| !r.is_empty()) else {
            tracing::debug!(roadmap = %roadmap_id, "roadmap has no resources");
            return Ok(None);
        };
        Ok(Some(RoadmapResources {
            roadmap_id: roadmap.id,
            title: roadmap.title,
            resources,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::Api;
    use tracker_core::Clock;
    use tracker_core::model::{Catalog, Category, NoteResource, Roadmap};
    use tracker_core::time::fixed_now;

    fn catalog() -> Catalog {
        let mut web = Roadmap::new("web", "Web Development", "", Category::NonAcademic, Vec::new());
        web.resources = Some(Resources {
            notes: vec![NoteResource {
                id: None,
                title: "HTML Basics".into(),
                description: "Tags and attributes".into(),
                author: "MDN".into(),
                url: "https://example.com/html.pdf".into(),
            }],
            videos: Vec::new(),
        });
        let mut design = Roadmap::new("design", "Design", "", Category::NonAcademic, Vec::new());
        design.resources = Some(Resources::default());
        Catalog::new(Vec::new(), vec![web, design])
    }

    fn service() -> ResourceService {
        ResourceService::new(Api::in_memory(Clock::fixed(fixed_now()), catalog()).roadmaps)
    }

    #[tokio::test]
    async fn load_returns_notes() {
        let loaded = service().load(&RoadmapId::new("web")).await.unwrap().unwrap();
        assert_eq!(loaded.title, "Web Development");
        assert_eq!(loaded.resources.notes[0].download_file_name(), "HTML Basics.pdf");
    }

    #[tokio::test]
    async fn empty_resources_are_none() {
        assert!(service().load(&RoadmapId::new("design")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_roadmap_is_not_found() {
        let err = service().load(&RoadmapId::new("nope")).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
