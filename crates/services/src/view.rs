use serde::Serialize;

use tracker_core::model::{
    Category, Level, ProgressRecord, Roadmap, RoadmapId, SubtopicId, TopicId,
};
use tracker_core::progress::{self, RankedRoadmap};

/// Summary card for a roadmap in a list or grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapCard {
    pub id: RoadmapId,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub percent: u8,
}

impl RoadmapCard {
    #[must_use]
    pub fn new(roadmap: &Roadmap, records: &[ProgressRecord]) -> Self {
        Self {
            id: roadmap.id.clone(),
            title: roadmap.title.clone(),
            description: roadmap.description.clone(),
            category: roadmap.category,
            percent: progress::percent_for(roadmap, records),
        }
    }
}

/// Owned form of a ranked roadmap for the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopRoadmap {
    pub id: RoadmapId,
    pub title: String,
    pub category: Category,
    pub percent: u8,
    pub completed: usize,
    pub total: usize,
}

impl From<RankedRoadmap<'_>> for TopRoadmap {
    fn from(ranked: RankedRoadmap<'_>) -> Self {
        Self {
            id: ranked.roadmap.id.clone(),
            title: ranked.roadmap.title.clone(),
            category: ranked.roadmap.category,
            percent: ranked.percent,
            completed: ranked.completed,
            total: ranked.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtopicView {
    pub id: SubtopicId,
    pub label: String,
    pub completed: bool,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicView {
    pub id: TopicId,
    pub title: String,
    pub level: Level,
    pub subtopics: Vec<SubtopicView>,
}

/// A roadmap joined with the user's progress, ready to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapDetail {
    pub roadmap: Roadmap,
    pub progress: ProgressRecord,
    pub percent: u8,
    pub topics: Vec<TopicView>,
}

impl RoadmapDetail {
    #[must_use]
    pub fn new(roadmap: Roadmap, progress: ProgressRecord) -> Self {
        let percent = progress::completion_percent(&roadmap, Some(&progress));
        let topics = roadmap
            .topics
            .iter()
            .map(|topic| TopicView {
                id: topic.id.clone(),
                title: topic.title.clone(),
                level: topic.level,
                subtopics: topic
                    .subtopics_with_ids()
                    .map(|(id, label)| SubtopicView {
                        completed: progress.is_completed(&id),
                        note: progress.note(&id).map(str::to_owned),
                        label: label.to_owned(),
                        id,
                    })
                    .collect(),
            })
            .collect();
        Self {
            roadmap,
            progress,
            percent,
            topics,
        }
    }

    /// Resources are linked only from non-academic roadmaps that carry them.
    #[must_use]
    pub fn has_resources(&self) -> bool {
        self.roadmap.category == Category::NonAcademic && self.roadmap.resources.is_some()
    }

    /// Replace the progress (after a toggle, note or reset) and recompute.
    #[must_use]
    pub fn with_progress(self, progress: ProgressRecord) -> Self {
        Self::new(self.roadmap, progress)
    }
}
