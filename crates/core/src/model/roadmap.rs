use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::Error;
use crate::model::ids::{RoadmapId, SubtopicId, TopicId};
use crate::model::resources::Resources;

//
// ─── CATEGORY / LEVEL ──────────────────────────────────────────────────────────
//

/// Top-level grouping of roadmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Academic,
    NonAcademic,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Academic, Category::NonAcademic];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Academic => "academic",
            Category::NonAcademic => "non-academic",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Academic => "Academic",
            Category::NonAcademic => "Non-Academic",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "academic" => Ok(Category::Academic),
            "non-academic" | "nonacademic" => Ok(Category::NonAcademic),
            other => Err(Error::UnknownCategory(other.to_owned())),
        }
    }
}

/// Difficulty level of a topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
            Level::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

//
// ─── TOPIC ─────────────────────────────────────────────────────────────────────
//

/// A group of ordered subtopic labels.
///
/// Subtopics carry no stored identity; their identifiers are derived from
/// their position (see [`SubtopicId`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub level: Level,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subtopics: Vec<String>,
}

/// Reads an explicit `null` the same way as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Topic {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        level: Level,
        subtopics: Vec<String>,
    ) -> Self {
        Self {
            id: TopicId::new(id),
            title: title.into(),
            level,
            subtopics,
        }
    }

    /// Identifier of the subtopic at `index`, if it exists.
    #[must_use]
    pub fn subtopic_id(&self, index: usize) -> Option<SubtopicId> {
        (index < self.subtopics.len()).then(|| SubtopicId::new(&self.id, index))
    }

    /// Iterates `(identifier, label)` pairs in display order.
    pub fn subtopics_with_ids(&self) -> impl Iterator<Item = (SubtopicId, &str)> + '_ {
        self.subtopics
            .iter()
            .enumerate()
            .map(|(idx, label)| (SubtopicId::new(&self.id, idx), label.as_str()))
    }
}

//
// ─── ROADMAP ───────────────────────────────────────────────────────────────────
//

/// A named curriculum: an ordered list of topics plus optional metadata.
///
/// A standalone roadmap without a `category` decodes as academic; inside a
/// [`Catalog`] it takes the category of the list it appears in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RoadmapWire")]
pub struct Roadmap {
    pub id: RoadmapId,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub topics: Vec<Topic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerequisites: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub books: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Resources>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoadmapWire {
    id: RoadmapId,
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
    #[serde(default)]
    category: Option<Category>,
    #[serde(default, deserialize_with = "null_as_default")]
    topics: Vec<Topic>,
    #[serde(default)]
    prerequisites: Option<Vec<String>>,
    #[serde(default)]
    tools: Option<Vec<String>>,
    #[serde(default)]
    books: Option<Vec<String>>,
    #[serde(default)]
    resources: Option<Resources>,
}

impl RoadmapWire {
    fn into_roadmap(self, fallback: Category) -> Roadmap {
        Roadmap {
            id: self.id,
            title: self.title,
            description: self.description,
            category: self.category.unwrap_or(fallback),
            topics: self.topics,
            prerequisites: self.prerequisites,
            tools: self.tools,
            books: self.books,
            resources: self.resources,
        }
    }
}

impl From<RoadmapWire> for Roadmap {
    fn from(wire: RoadmapWire) -> Self {
        wire.into_roadmap(Category::Academic)
    }
}

impl Roadmap {
    /// Creates a roadmap with no optional metadata.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        category: Category,
        topics: Vec<Topic>,
    ) -> Self {
        Self {
            id: RoadmapId::new(id),
            title: title.into(),
            description: description.into(),
            category,
            topics,
            prerequisites: None,
            tools: None,
            books: None,
            resources: None,
        }
    }

    /// All subtopic identifiers in topic order, as sent by "mark all complete".
    #[must_use]
    pub fn all_subtopic_ids(&self) -> Vec<SubtopicId> {
        self.topics
            .iter()
            .flat_map(|topic| topic.subtopics_with_ids().map(|(id, _)| id))
            .collect()
    }

    /// True when `id` names an existing `(topic, index)` pair of this roadmap.
    #[must_use]
    pub fn contains_subtopic(&self, id: &SubtopicId) -> bool {
        let Some((topic_id, index)) = id.parts() else {
            return false;
        };
        self.topics
            .iter()
            .any(|topic| topic.id == topic_id && index < topic.subtopics.len())
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// The full roadmap listing as returned by `GET /roadmaps`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CatalogWire")]
pub struct Catalog {
    pub academic: Vec<Roadmap>,
    pub non_academic: Vec<Roadmap>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogWire {
    #[serde(default, deserialize_with = "null_as_default")]
    academic: Vec<RoadmapWire>,
    #[serde(default, deserialize_with = "null_as_default")]
    non_academic: Vec<RoadmapWire>,
}

impl From<CatalogWire> for Catalog {
    fn from(wire: CatalogWire) -> Self {
        let fill = |list: Vec<RoadmapWire>, category: Category| -> Vec<Roadmap> {
            list.into_iter()
                .map(|roadmap| roadmap.into_roadmap(category))
                .collect()
        };
        Self {
            academic: fill(wire.academic, Category::Academic),
            non_academic: fill(wire.non_academic, Category::NonAcademic),
        }
    }
}

impl Catalog {
    #[must_use]
    pub fn new(academic: Vec<Roadmap>, non_academic: Vec<Roadmap>) -> Self {
        Self {
            academic,
            non_academic,
        }
    }

    /// Roadmaps of one category, in catalog order.
    #[must_use]
    pub fn by_category(&self, category: Category) -> &[Roadmap] {
        match category {
            Category::Academic => &self.academic,
            Category::NonAcademic => &self.non_academic,
        }
    }

    /// Combined catalog: academic roadmaps first, then non-academic.
    pub fn all(&self) -> impl Iterator<Item = &Roadmap> + Clone + '_ {
        self.academic.iter().chain(self.non_academic.iter())
    }

    #[must_use]
    pub fn find(&self, id: &RoadmapId) -> Option<&Roadmap> {
        self.all().find(|roadmap| &roadmap.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.academic.len() + self.non_academic.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Roadmap {
        Roadmap::new(
            "web",
            "Web Development",
            "HTML, CSS and JavaScript",
            Category::NonAcademic,
            vec![
                Topic::new("html", "HTML", Level::Beginner, vec!["Tags".into(), "Forms".into()]),
                Topic::new("css", "CSS", Level::Intermediate, vec!["Flexbox".into()]),
            ],
        )
    }

    #[test]
    fn all_subtopic_ids_follow_topic_order() {
        let ids: Vec<String> = sample()
            .all_subtopic_ids()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(ids, vec!["html-sub-0", "html-sub-1", "css-sub-0"]);
    }

    #[test]
    fn contains_subtopic_checks_topic_and_bounds() {
        let roadmap = sample();
        assert!(roadmap.contains_subtopic(&SubtopicId::from_raw("css-sub-0")));
        assert!(!roadmap.contains_subtopic(&SubtopicId::from_raw("css-sub-1")));
        assert!(!roadmap.contains_subtopic(&SubtopicId::from_raw("js-sub-0")));
        assert!(!roadmap.contains_subtopic(&SubtopicId::from_raw("garbage")));
    }

    #[test]
    fn deserializes_wire_shape_with_missing_fields() {
        let json = r#"{
            "id": "dsa",
            "title": "Data Structures",
            "category": "academic",
            "topics": [
                { "id": "t1", "title": "Arrays", "level": "beginner", "subtopics": ["a", "b"] },
                { "id": "t2", "title": "Graphs", "level": "expert" },
                { "id": "t3", "title": "Trees", "subtopics": ["c"] }
            ],
            "tools": ["C++"]
        }"#;
        let roadmap: Roadmap = serde_json::from_str(json).unwrap();
        assert_eq!(roadmap.category, Category::Academic);
        assert_eq!(roadmap.description, "");
        assert_eq!(roadmap.topics[1].level, Level::Unknown);
        assert_eq!(roadmap.topics[1].subtopics.len(), 0);
        assert_eq!(roadmap.topics[2].level, Level::Unknown);
        assert_eq!(roadmap.tools.as_deref(), Some(&["C++".to_string()][..]));
        assert!(roadmap.prerequisites.is_none());
    }

    #[test]
    fn roadmap_without_topics_deserializes_empty() {
        let json = r#"{ "id": "x", "title": "X", "category": "non-academic" }"#;
        let roadmap: Roadmap = serde_json::from_str(json).unwrap();
        assert!(roadmap.topics.is_empty());
        assert_eq!(roadmap.category, Category::NonAcademic);
    }

    #[test]
    fn catalog_all_lists_academic_first() {
        let mut academic = sample();
        academic.id = RoadmapId::new("a");
        academic.category = Category::Academic;
        let catalog = Catalog::new(vec![academic], vec![sample()]);
        let ids: Vec<&str> = catalog.all().map(|r| r.id.value()).collect();
        assert_eq!(ids, vec!["a", "web"]);
        assert!(catalog.find(&RoadmapId::new("web")).is_some());
        assert!(catalog.find(&RoadmapId::new("nope")).is_none());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn null_topics_and_subtopics_decode_empty() {
        let json = r#"{
            "id": "x",
            "title": "X",
            "description": null,
            "category": "academic",
            "topics": null
        }"#;
        let roadmap: Roadmap = serde_json::from_str(json).unwrap();
        assert!(roadmap.topics.is_empty());
        assert_eq!(roadmap.description, "");

        let json = r#"{ "id": "t", "title": "T", "level": null, "subtopics": null }"#;
        let topic: Topic = serde_json::from_str(json).unwrap();
        assert!(topic.subtopics.is_empty());
        assert_eq!(topic.level, Level::Unknown);
    }

    #[test]
    fn catalog_fills_missing_category_from_its_list() {
        let json = r#"{
            "academic": [{ "id": "calc", "title": "Calculus", "topics": null }],
            "nonAcademic": [
                { "id": "web", "title": "Web" },
                { "id": "art", "title": "Art", "category": "non-academic", "topics": [] }
            ]
        }"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.academic[0].category, Category::Academic);
        assert_eq!(catalog.non_academic[0].category, Category::NonAcademic);
        assert_eq!(catalog.non_academic[1].category, Category::NonAcademic);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn standalone_roadmap_without_category_is_academic() {
        let roadmap: Roadmap = serde_json::from_str(r#"{ "id": "x", "title": "X" }"#).unwrap();
        assert_eq!(roadmap.category, Category::Academic);
    }

    #[test]
    fn null_catalog_lists_decode_empty() {
        let catalog: Catalog =
            serde_json::from_str(r#"{ "academic": null, "nonAcademic": null }"#).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn catalog_uses_camel_case_keys() {
        let json = r#"{ "academic": [], "nonAcademic": [] }"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn category_parses_both_spellings() {
        assert_eq!("academic".parse::<Category>(), Ok(Category::Academic));
        assert_eq!("Non-Academic".parse::<Category>(), Ok(Category::NonAcademic));
        assert!("other".parse::<Category>().is_err());
    }
}
