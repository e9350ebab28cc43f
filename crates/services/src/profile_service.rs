use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use api::{ProgressApi, RoadmapApi};
use tracker_core::Clock;
use tracker_core::model::{Catalog, Category, ProgressRecord};
use tracker_core::progress::{self, TOP_ROADMAPS_LIMIT};
use tracker_core::stats::{
    self, Achievement, ActivityEntry, GoalProgress, ProfileStats, RECENT_ACTIVITY_LIMIT,
};
use tracker_core::time::date_stamp;

use crate::error::{ExportError, ServiceError};
use crate::view::TopRoadmap;

/// Everything the profile screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub stats: ProfileStats,
    pub academic_percent: u8,
    pub non_academic_percent: u8,
    pub top_roadmaps: Vec<TopRoadmap>,
    pub goals: [GoalProgress; 2],
    pub achievements: Vec<Achievement>,
    pub recent_activity: Vec<ActivityEntry>,
}

impl Profile {
    #[must_use]
    pub fn from_snapshot(catalog: &Catalog, records: &[ProgressRecord], now: DateTime<Utc>) -> Self {
        let stats = ProfileStats::compute(catalog.all(), records, now);
        Self {
            academic_percent: progress::category_percent(catalog.all(), records, Category::Academic),
            non_academic_percent: progress::category_percent(
                catalog.all(),
                records,
                Category::NonAcademic,
            ),
            top_roadmaps: progress::rank_top_roadmaps(catalog.all(), records, TOP_ROADMAPS_LIMIT)
                .into_iter()
                .map(TopRoadmap::from)
                .collect(),
            goals: stats::goals(&stats),
            achievements: stats::achievements(&stats),
            recent_activity: stats::recent_activity(records, catalog.all(), RECENT_ACTIVITY_LIMIT),
            stats,
        }
    }

    #[must_use]
    pub fn category_percent(&self, category: Category) -> u8 {
        match category {
            Category::Academic => self.academic_percent,
            Category::NonAcademic => self.non_academic_percent,
        }
    }
}

/// Account details included in a data export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub joined_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserDataExport<'a> {
    user: &'a UserInfo,
    progress: &'a [ProgressRecord],
    stats: &'a ProfileStats,
    export_date: DateTime<Utc>,
}

/// A rendered export, ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

#[derive(Clone)]
pub struct ProfileService {
    clock: Clock,
    roadmaps: Arc<dyn RoadmapApi>,
    progress: Arc<dyn ProgressApi>,
}

impl ProfileService {
    #[must_use]
    pub fn new(clock: Clock, roadmaps: Arc<dyn RoadmapApi>, progress: Arc<dyn ProgressApi>) -> Self {
        Self {
            clock,
            roadmaps,
            progress,
        }
    }

    async fn snapshot(&self) -> Result<(Catalog, Vec<ProgressRecord>), ServiceError> {
        let (catalog, records) =
            tokio::try_join!(self.roadmaps.list_roadmaps(), self.progress.list_progress())?;
        Ok((catalog, records))
    }

    /// Load statistics, rankings and activity for the profile.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Api` if either request fails.
    pub async fn load(&self) -> Result<Profile, ServiceError> {
        let (catalog, records) = self.snapshot().await?;
        Ok(Profile::from_snapshot(&catalog, &records, self.clock.now()))
    }

    /// Render the user's progress and statistics as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Service` if fetching fails, or
    /// `ExportError::Encode` if serialization fails.
    pub async fn export(&self, user: &UserInfo) -> Result<ExportFile, ExportError> {
        let (catalog, records) = self.snapshot().await?;
        let now = self.clock.now();
        let stats = ProfileStats::compute(catalog.all(), &records, now);
        let payload = UserDataExport {
            user,
            progress: &records,
            stats: &stats,
            export_date: now,
        };
        let contents = serde_json::to_string_pretty(&payload)?;
        tracing::info!(records = records.len(), "progress export rendered");
        Ok(ExportFile {
            file_name: format!("learning-progress-{}.json", date_stamp(now)),
            contents,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::Api;
    use tracker_core::model::{Level, Roadmap, Topic};
    use tracker_core::time::fixed_now;

    fn catalog() -> Catalog {
        let roadmap = |id: &str, category, n: usize| {
            Roadmap::new(
                id,
                id.to_uppercase(),
                "",
                category,
                vec![Topic::new(
                    format!("{id}-t"),
                    "T",
                    Level::Beginner,
                    (0..n).map(|i| format!("s{i}")).collect(),
                )],
            )
        };
        Catalog::new(
            vec![roadmap("small", Category::Academic, 10), roadmap("large", Category::Academic, 100)],
            vec![roadmap("web", Category::NonAcademic, 4)],
        )
    }

    async fn seeded() -> (Api, ProfileService) {
        let clock = Clock::fixed(fixed_now());
        let catalog = catalog();
        let api = Api::in_memory(clock, catalog.clone());
        for roadmap in catalog.all() {
            let done = match roadmap.id.value() {
                "small" => 5,
                "large" => 10,
                _ => 4,
            };
            let ids: Vec<_> = roadmap.all_subtopic_ids().into_iter().take(done).collect();
            api.progress.complete_all(&roadmap.id, &ids).await.unwrap();
        }
        let service = ProfileService::new(clock, api.roadmaps.clone(), api.progress.clone());
        (api, service)
    }

    #[tokio::test]
    async fn load_pools_categories_and_ranks() {
        let (_api, service) = seeded().await;
        let profile = service.load().await.unwrap();

        assert_eq!(profile.category_percent(Category::Academic), 14);
        assert_eq!(profile.category_percent(Category::NonAcademic), 100);
        assert_eq!(profile.stats.total_roadmaps, 3);
        assert_eq!(profile.stats.completed_roadmaps, 1);
        assert_eq!(profile.stats.completed_subtopics, 19);
        assert_eq!(profile.stats.learning_streak, 3);

        let ranked: Vec<&str> = profile.top_roadmaps.iter().map(|r| r.id.value()).collect();
        assert_eq!(ranked, vec!["web", "small", "large"]);
        assert!(profile.achievements[0].unlocked);
        assert!(profile.achievements[2].unlocked);
        assert_eq!(profile.recent_activity.len(), 3);
    }

    #[tokio::test]
    async fn export_renders_wire_shaped_json() {
        let (_api, service) = seeded().await;
        let user = UserInfo {
            name: Some("Sam".into()),
            email: Some("sam@example.com".into()),
            joined_date: None,
        };
        let file = service.export(&user).await.unwrap();
        assert_eq!(file.file_name, "learning-progress-2023-11-14.json");

        let value: serde_json::Value = serde_json::from_str(&file.contents).unwrap();
        assert_eq!(value["user"]["name"], "Sam");
        assert_eq!(value["stats"]["totalTopics"], 114);
        assert_eq!(value["stats"]["completedRoadmaps"], 1);
        assert_eq!(value["progress"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["exportDate"], "2023-11-14T22:13:20Z");
    }

    #[tokio::test]
    async fn empty_account_has_zeroed_profile() {
        let api = Api::in_memory(Clock::fixed(fixed_now()), Catalog::default());
        let service = ProfileService::new(Clock::fixed(fixed_now()), api.roadmaps, api.progress);
        let profile = service.load().await.unwrap();
        assert_eq!(profile.stats.average_percent, 0);
        assert!(profile.top_roadmaps.is_empty());
        assert!(profile.recent_activity.is_empty());
        assert!(profile.achievements.iter().all(|a| !a.unlocked));
    }
}
