//! Profile statistics: totals, goals, achievements and recent activity.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::model::{ProgressRecord, Roadmap, RoadmapId};
use crate::progress::{
    self, DEFAULT_COMPLETION_THRESHOLD, is_roadmap_effectively_complete, record_for,
};

/// A record updated within this many days counts toward the learning streak.
pub const ACTIVE_WINDOW_DAYS: i64 = 7;

/// Label used in recent activity when a record's roadmap is not in the catalog.
pub const UNKNOWN_ROADMAP_TITLE: &str = "Unknown Roadmap";

/// Entries shown in the profile's recent activity list.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Aggregate numbers shown on the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub total_roadmaps: usize,
    pub completed_roadmaps: usize,
    #[serde(rename = "totalTopics")]
    pub total_subtopics: usize,
    #[serde(rename = "completedTopics")]
    pub completed_subtopics: usize,
    /// Pooled over the whole catalog.
    #[serde(rename = "averageProgress")]
    pub average_percent: u8,
    pub learning_streak: usize,
}

impl ProfileStats {
    #[must_use]
    pub fn compute<'a, I>(roadmaps: I, records: &[ProgressRecord], now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a Roadmap>,
        I::IntoIter: Clone,
    {
        let roadmaps = roadmaps.into_iter();
        let mut stats = Self {
            total_roadmaps: 0,
            completed_roadmaps: 0,
            total_subtopics: 0,
            completed_subtopics: 0,
            average_percent: progress::pooled_percent(roadmaps.clone(), records),
            learning_streak: learning_streak(records, now),
        };

        for roadmap in roadmaps {
            stats.total_roadmaps += 1;
            stats.total_subtopics += progress::total_subtopics(roadmap);
            let record = record_for(records, &roadmap.id);
            if let Some(record) = record {
                stats.completed_subtopics += record.completed_count();
            }
            if is_roadmap_effectively_complete(roadmap, record, DEFAULT_COMPLETION_THRESHOLD) {
                stats.completed_roadmaps += 1;
            }
        }

        stats
    }
}

/// Number of records touched within the last [`ACTIVE_WINDOW_DAYS`].
#[must_use]
pub fn learning_streak(records: &[ProgressRecord], now: DateTime<Utc>) -> usize {
    let window = Duration::days(ACTIVE_WINDOW_DAYS);
    records
        .iter()
        .filter_map(|record| record.last_updated)
        .filter(|updated| now.signed_duration_since(*updated) <= window)
        .count()
}

//
// ─── GOALS ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GoalKind {
    Weekly,
    Monthly,
}

impl GoalKind {
    #[must_use]
    pub fn target(self) -> usize {
        match self {
            GoalKind::Weekly => 7,
            GoalKind::Monthly => 30,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            GoalKind::Weekly => "Weekly Goal",
            GoalKind::Monthly => "Monthly Goal",
        }
    }
}

/// Progress toward a recurring subtopic goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalProgress {
    pub kind: GoalKind,
    pub current: usize,
    pub target: usize,
    pub percent: u8,
}

impl GoalProgress {
    /// Goals cycle: progress is the completed count modulo the target.
    #[must_use]
    pub fn new(kind: GoalKind, completed_subtopics: usize) -> Self {
        let target = kind.target();
        let current = completed_subtopics % target;
        let percent = u8::try_from((current * 100 / target).min(100)).unwrap_or(100);
        Self {
            kind,
            current,
            target,
            percent,
        }
    }
}

#[must_use]
pub fn goals(stats: &ProfileStats) -> [GoalProgress; 2] {
    [
        GoalProgress::new(GoalKind::Weekly, stats.completed_subtopics),
        GoalProgress::new(GoalKind::Monthly, stats.completed_subtopics),
    ]
}

//
// ─── ACHIEVEMENTS ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AchievementKind {
    FirstSteps,
    LearningMachine,
    RoadmapMaster,
    KnowledgeSeeker,
}

impl AchievementKind {
    pub const ALL: [AchievementKind; 4] = [
        AchievementKind::FirstSteps,
        AchievementKind::LearningMachine,
        AchievementKind::RoadmapMaster,
        AchievementKind::KnowledgeSeeker,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            AchievementKind::FirstSteps => "First Steps",
            AchievementKind::LearningMachine => "Learning Machine",
            AchievementKind::RoadmapMaster => "Roadmap Master",
            AchievementKind::KnowledgeSeeker => "Knowledge Seeker",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            AchievementKind::FirstSteps => "Complete 10 topics",
            AchievementKind::LearningMachine => "Complete 50 topics",
            AchievementKind::RoadmapMaster => "Complete your first roadmap",
            AchievementKind::KnowledgeSeeker => "Complete 100 topics",
        }
    }

    #[must_use]
    pub fn target(self) -> usize {
        match self {
            AchievementKind::FirstSteps => 10,
            AchievementKind::LearningMachine => 50,
            AchievementKind::RoadmapMaster => 1,
            AchievementKind::KnowledgeSeeker => 100,
        }
    }

    fn measure(self, stats: &ProfileStats) -> usize {
        match self {
            AchievementKind::RoadmapMaster => stats.completed_roadmaps,
            _ => stats.completed_subtopics,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub kind: AchievementKind,
    /// Capped at `target`.
    pub current: usize,
    pub target: usize,
    pub unlocked: bool,
}

#[must_use]
pub fn achievements(stats: &ProfileStats) -> Vec<Achievement> {
    AchievementKind::ALL
        .iter()
        .map(|&kind| {
            let target = kind.target();
            let value = kind.measure(stats);
            Achievement {
                kind,
                current: value.min(target),
                target,
                unlocked: value >= target,
            }
        })
        .collect()
}

//
// ─── RECENT ACTIVITY ───────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub roadmap_id: RoadmapId,
    pub title: String,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Most recently updated records first; records without a timestamp last.
#[must_use]
pub fn recent_activity<'a, I>(
    records: &[ProgressRecord],
    roadmaps: I,
    limit: usize,
) -> Vec<ActivityEntry>
where
    I: IntoIterator<Item = &'a Roadmap>,
{
    let roadmaps: Vec<&Roadmap> = roadmaps.into_iter().collect();
    let mut sorted: Vec<&ProgressRecord> = records.iter().collect();
    // `Option` orders `None` first, so compare reversed for newest-first with `None` last.
    sorted.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));

    sorted
        .into_iter()
        .take(limit)
        .map(|record| {
            let title = roadmaps
                .iter()
                .find(|roadmap| roadmap.id == record.roadmap_id)
                .map_or_else(|| UNKNOWN_ROADMAP_TITLE.to_owned(), |r| r.title.clone());
            ActivityEntry {
                roadmap_id: record.roadmap_id.clone(),
                title,
                last_updated: record.last_updated,
            }
        })
        .collect()
}
