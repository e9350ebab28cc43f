mod ids;
mod record;
mod resources;
mod roadmap;

pub use ids::{ParseIdError, RoadmapId, SubtopicId, TopicId};
pub use record::ProgressRecord;
pub use resources::{NoteResource, Resources, VideoResource};
pub use roadmap::{Catalog, Category, Level, Roadmap, Topic};
