use std::sync::Arc;

use api::{ProgressApi, RoadmapApi};
use tracker_core::model::{Catalog, Category, ProgressRecord};
use tracker_core::progress;

use crate::error::ServiceError;
use crate::view::RoadmapCard;

/// Landing screen after sign-in: overall progress plus both roadmap grids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dashboard {
    /// Mean over the whole catalog, independent of the search query.
    pub overall_percent: u8,
    pub academic: Vec<RoadmapCard>,
    pub non_academic: Vec<RoadmapCard>,
}

impl Dashboard {
    /// Build the dashboard from a fetched snapshot.
    #[must_use]
    pub fn from_snapshot(catalog: &Catalog, records: &[ProgressRecord], query: &str) -> Self {
        let cards = |category: Category| -> Vec<RoadmapCard> {
            progress::filter_by_text(catalog.by_category(category), query)
                .into_iter()
                .map(|roadmap| RoadmapCard::new(roadmap, records))
                .collect()
        };
        Self {
            overall_percent: progress::overall_percent(catalog.all(), records),
            academic: cards(Category::Academic),
            non_academic: cards(Category::NonAcademic),
        }
    }

    #[must_use]
    pub fn cards(&self, category: Category) -> &[RoadmapCard] {
        match category {
            Category::Academic => &self.academic,
            Category::NonAcademic => &self.non_academic,
        }
    }
}

#[derive(Clone)]
pub struct DashboardService {
    roadmaps: Arc<dyn RoadmapApi>,
    progress: Arc<dyn ProgressApi>,
}

impl DashboardService {
    #[must_use]
    pub fn new(roadmaps: Arc<dyn RoadmapApi>, progress: Arc<dyn ProgressApi>) -> Self {
        Self { roadmaps, progress }
    }

    /// Fetch catalog and progress together.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Api` if either request fails.
    pub async fn snapshot(&self) -> Result<(Catalog, Vec<ProgressRecord>), ServiceError> {
        let (catalog, records) =
            tokio::try_join!(self.roadmaps.list_roadmaps(), self.progress.list_progress())?;
        Ok((catalog, records))
    }

    /// Load the dashboard, filtering both grids by `query`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Api` if either request fails.
    pub async fn load(&self, query: &str) -> Result<Dashboard, ServiceError> {
        let (catalog, records) = self.snapshot().await?;
        tracing::debug!(
            roadmaps = catalog.len(),
            records = records.len(),
            "dashboard snapshot loaded"
        );
        Ok(Dashboard::from_snapshot(&catalog, &records, query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::Api;
    use tracker_core::Clock;
    use tracker_core::model::{Level, Roadmap, RoadmapId, SubtopicId, Topic};
    use tracker_core::time::fixed_now;

    fn catalog() -> Catalog {
        let topic = |id: &str, n: usize| {
            Topic::new(id, id, Level::Beginner, (0..n).map(|i| format!("s{i}")).collect())
        };
        Catalog::new(
            vec![
                Roadmap::new("dsa", "Data Structures", "Arrays, trees", Category::Academic, vec![topic("d", 4)]),
                Roadmap::new("os", "Operating Systems", "Kernels", Category::Academic, vec![topic("o", 2)]),
            ],
            vec![Roadmap::new(
                "web",
                "Web Development",
                "HTML and CSS",
                Category::NonAcademic,
                vec![topic("w", 2)],
            )],
        )
    }

    #[tokio::test]
    async fn load_filters_grids_but_not_overall() {
        let api = Api::in_memory(Clock::fixed(fixed_now()), catalog());
        api.progress
            .toggle_subtopic(&RoadmapId::new("web"), &SubtopicId::from_raw("w-sub-0"))
            .await
            .unwrap();
        let service = DashboardService::new(api.roadmaps.clone(), api.progress.clone());

        let dashboard = service.load("web").await.unwrap();
        assert!(dashboard.academic.is_empty());
        assert_eq!(dashboard.non_academic.len(), 1);
        assert_eq!(dashboard.non_academic[0].percent, 50);
        // (0 + 0 + 50) / 3
        assert_eq!(dashboard.overall_percent, 17);
    }

    #[tokio::test]
    async fn blank_query_lists_everything_in_catalog_order() {
        let api = Api::in_memory(Clock::fixed(fixed_now()), catalog());
        let service = DashboardService::new(api.roadmaps.clone(), api.progress.clone());

        let dashboard = service.load("  ").await.unwrap();
        let ids: Vec<&str> = dashboard
            .cards(Category::Academic)
            .iter()
            .map(|card| card.id.value())
            .collect();
        assert_eq!(ids, vec!["dsa", "os"]);
        assert_eq!(dashboard.overall_percent, 0);
    }
}
