use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator between a topic id and a subtopic index in wire identifiers.
const SUBTOPIC_SEPARATOR: &str = "-sub-";

/// Unique identifier for a Roadmap, as assigned by the API.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoadmapId(String);

impl RoadmapId {
    /// Creates a new `RoadmapId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for a Topic within a roadmap
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(String);

impl TopicId {
    /// Creates a new `TopicId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Positional identifier of a subtopic: the pair `(topic id, index)`.
///
/// On the wire it is the string `"{topic}-sub-{index}"`. The value is stored
/// as received so identifiers recorded against an older roadmap shape (or
/// malformed ones) survive a round trip through the API untouched.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubtopicId(String);

impl SubtopicId {
    /// Builds the identifier for subtopic `index` of `topic`.
    #[must_use]
    pub fn new(topic: &TopicId, index: usize) -> Self {
        Self(format!("{}{SUBTOPIC_SEPARATOR}{index}", topic.value()))
    }

    /// Wraps a raw wire identifier without validating it.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the wire representation.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Splits the identifier into its topic id and index, if well-formed.
    #[must_use]
    pub fn parts(&self) -> Option<(TopicId, usize)> {
        let (topic, index) = self.0.rsplit_once(SUBTOPIC_SEPARATOR)?;
        if topic.is_empty() {
            return None;
        }
        let index = index.parse::<usize>().ok()?;
        Some((TopicId::new(topic), index))
    }
}

impl fmt::Debug for RoadmapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoadmapId({})", self.0)
    }
}

impl fmt::Debug for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TopicId({})", self.0)
    }
}

impl fmt::Debug for SubtopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubtopicId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for RoadmapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for SubtopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing an ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for RoadmapId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseIdError { kind: "RoadmapId" });
        }
        Ok(Self::new(trimmed))
    }
}

impl FromStr for SubtopicId {
    type Err = ParseIdError;

    /// Parses a well-formed `"{topic}-sub-{index}"` identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = Self::from_raw(s.trim());
        match id.parts() {
            Some(_) => Ok(id),
            None => Err(ParseIdError { kind: "SubtopicId" }),
        }
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
