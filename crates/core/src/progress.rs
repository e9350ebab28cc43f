//! Progress aggregation over a roadmap catalog and the user's progress records.
//!
//! Every function here is pure: the same inputs always give the same output,
//! nothing panics, and a missing progress record counts as zero completed.
//!
//! The numerator of every percentage is the raw number of stored completed
//! identifiers; it is not validated against the roadmap's current shape. Use
//! [`stale_subtopics`] to detect records that no longer line up.

use crate::model::{Category, ProgressRecord, Roadmap, RoadmapId, SubtopicId};

/// A roadmap at or above this percent counts as completed on the profile.
pub const DEFAULT_COMPLETION_THRESHOLD: u8 = 90;

/// Number of roadmaps shown in the profile's "top roadmaps" list.
pub const TOP_ROADMAPS_LIMIT: usize = 5;

/// A roadmap with its computed progress, as listed in "top roadmaps".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedRoadmap<'a> {
    pub roadmap: &'a Roadmap,
    pub percent: u8,
    pub completed: usize,
    pub total: usize,
}

/// Total subtopics over all topics; zero for a roadmap without topics.
#[must_use]
pub fn total_subtopics(roadmap: &Roadmap) -> usize {
    roadmap.topics.iter().map(|topic| topic.subtopics.len()).sum()
}

/// Finds the record belonging to `roadmap_id`.
#[must_use]
pub fn record_for<'a>(
    records: &'a [ProgressRecord],
    roadmap_id: &RoadmapId,
) -> Option<&'a ProgressRecord> {
    records.iter().find(|record| &record.roadmap_id == roadmap_id)
}

/// `round(100 * completed / total)`, half-up, clamped to `[0, 100]`.
///
/// Integer arithmetic keeps the result exact for any count.
fn rounded_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed as u128;
    let total = total as u128;
    let percent = (200 * completed + total) / (2 * total);
    u8::try_from(percent.min(100)).unwrap_or(100)
}

/// Completed count attributed to `roadmap`; a record for another roadmap is ignored.
fn completed_for(roadmap: &Roadmap, record: Option<&ProgressRecord>) -> usize {
    record
        .filter(|record| record.roadmap_id == roadmap.id)
        .map_or(0, ProgressRecord::completed_count)
}

/// Percentage of a roadmap's subtopics marked complete.
///
/// Returns `0` when the roadmap has no subtopics or no matching record exists.
#[must_use]
pub fn completion_percent(roadmap: &Roadmap, record: Option<&ProgressRecord>) -> u8 {
    rounded_percent(completed_for(roadmap, record), total_subtopics(roadmap))
}

/// [`completion_percent`] with the record looked up by roadmap id.
#[must_use]
pub fn percent_for(roadmap: &Roadmap, records: &[ProgressRecord]) -> u8 {
    completion_percent(roadmap, record_for(records, &roadmap.id))
}

/// Mean of per-roadmap percentages across the combined catalog, rounded half-up.
#[must_use]
pub fn overall_percent<'a, I>(roadmaps: I, records: &[ProgressRecord]) -> u8
where
    I: IntoIterator<Item = &'a Roadmap>,
{
    let (sum, count) = roadmaps
        .into_iter()
        .fold((0_u64, 0_u64), |(sum, count), roadmap| {
            (sum + u64::from(percent_for(roadmap, records)), count + 1)
        });
    if count == 0 {
        return 0;
    }
    let mean = (2 * sum + count) / (2 * count);
    u8::try_from(mean.min(100)).unwrap_or(100)
}

/// Pooled percentage for one category: summed completed over summed totals.
///
/// Larger roadmaps weigh proportionally more than small ones.
#[must_use]
pub fn category_percent<'a, I>(roadmaps: I, records: &[ProgressRecord], category: Category) -> u8
where
    I: IntoIterator<Item = &'a Roadmap>,
{
    pooled_percent(
        roadmaps
            .into_iter()
            .filter(|roadmap| roadmap.category == category),
        records,
    )
}

/// Pooled percentage over every given roadmap, regardless of category.
#[must_use]
pub fn pooled_percent<'a, I>(roadmaps: I, records: &[ProgressRecord]) -> u8
where
    I: IntoIterator<Item = &'a Roadmap>,
{
    let (completed, total) = roadmaps
        .into_iter()
        .fold((0_usize, 0_usize), |(completed, total), roadmap| {
            let done = completed_for(roadmap, record_for(records, &roadmap.id));
            (
                completed.saturating_add(done),
                total.saturating_add(total_subtopics(roadmap)),
            )
        });
    rounded_percent(completed, total)
}

/// Case-insensitive substring search over title and description.
///
/// A blank (empty or whitespace-only) query returns every roadmap in its
/// original order. Otherwise the query is matched as typed.
#[must_use]
pub fn filter_by_text<'a, I>(roadmaps: I, query: &str) -> Vec<&'a Roadmap>
where
    I: IntoIterator<Item = &'a Roadmap>,
{
    if query.trim().is_empty() {
        return roadmaps.into_iter().collect();
    }
    let needle = query.to_lowercase();
    roadmaps
        .into_iter()
        .filter(|roadmap| {
            roadmap.title.to_lowercase().contains(&needle)
                || roadmap.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Roadmaps with any progress, highest percent first, at most `limit`.
///
/// Ties keep catalog order.
#[must_use]
pub fn rank_top_roadmaps<'a, I>(
    roadmaps: I,
    records: &[ProgressRecord],
    limit: usize,
) -> Vec<RankedRoadmap<'a>>
where
    I: IntoIterator<Item = &'a Roadmap>,
{
    let mut ranked: Vec<RankedRoadmap<'a>> = roadmaps
        .into_iter()
        .map(|roadmap| {
            let completed = completed_for(roadmap, record_for(records, &roadmap.id));
            let total = total_subtopics(roadmap);
            RankedRoadmap {
                roadmap,
                percent: rounded_percent(completed, total),
                completed,
                total,
            }
        })
        .filter(|ranked| ranked.percent > 0)
        .collect();
    // `sort_by` is stable.
    ranked.sort_by(|a, b| b.percent.cmp(&a.percent));
    ranked.truncate(limit);
    ranked
}

/// True when the rounded completion percent reaches `threshold`.
#[must_use]
pub fn is_roadmap_effectively_complete(
    roadmap: &Roadmap,
    record: Option<&ProgressRecord>,
    threshold: u8,
) -> bool {
    completion_percent(roadmap, record) >= threshold
}

/// Completed identifiers that do not name a subtopic of the current roadmap.
#[must_use]
pub fn stale_subtopics<'a>(roadmap: &Roadmap, record: &'a ProgressRecord) -> Vec<&'a SubtopicId> {
    record
        .completed_topics
        .iter()
        .filter(|id| !roadmap.contains_subtopic(id))
        .collect()
}
