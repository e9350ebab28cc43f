use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::model::ids::{RoadmapId, SubtopicId};

/// Per-user, per-roadmap progress as stored by the API.
///
/// `completed_topics` is a set: duplicates in the wire payload collapse on
/// deserialization and ordering carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub roadmap_id: RoadmapId,
    #[serde(default)]
    pub completed_topics: BTreeSet<SubtopicId>,
    #[serde(default)]
    pub notes: BTreeMap<SubtopicId, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl ProgressRecord {
    /// A record with nothing completed, as shown before the first toggle.
    #[must_use]
    pub fn empty(roadmap_id: RoadmapId) -> Self {
        Self {
            roadmap_id,
            completed_topics: BTreeSet::new(),
            notes: BTreeMap::new(),
            last_updated: None,
        }
    }

    /// Raw number of stored completed identifiers.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed_topics.len()
    }

    #[must_use]
    pub fn is_completed(&self, id: &SubtopicId) -> bool {
        self.completed_topics.contains(id)
    }

    #[must_use]
    pub fn note(&self, id: &SubtopicId) -> Option<&str> {
        self.notes.get(id).map(String::as_str)
    }

    /// Flips completion of one subtopic. Returns the new state.
    pub fn toggle(&mut self, id: SubtopicId, now: DateTime<Utc>) -> bool {
        let completed = if self.completed_topics.remove(&id) {
            false
        } else {
            self.completed_topics.insert(id);
            true
        };
        self.last_updated = Some(now);
        completed
    }

    /// Stores or replaces a note. A blank note clears the entry.
    pub fn set_note(&mut self, id: SubtopicId, note: &str, now: DateTime<Utc>) {
        if note.trim().is_empty() {
            self.notes.remove(&id);
        } else {
            self.notes.insert(id, note.to_owned());
        }
        self.last_updated = Some(now);
    }

    /// Marks every given identifier completed, keeping existing ones.
    pub fn complete_all(&mut self, ids: impl IntoIterator<Item = SubtopicId>, now: DateTime<Utc>) {
        self.completed_topics.extend(ids);
        self.last_updated = Some(now);
    }
}
