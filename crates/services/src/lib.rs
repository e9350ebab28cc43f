#![forbid(unsafe_code)]

pub mod app_services;
pub mod dashboard_service;
pub mod error;
pub mod fetch_guard;
pub mod profile_service;
pub mod resource_service;
pub mod roadmap_service;
pub mod view;

pub use tracker_core::Clock;

pub use app_services::AppServices;
pub use dashboard_service::{Dashboard, DashboardService};
pub use error::{ExportError, ServiceError};
pub use fetch_guard::{FetchGuard, FetchTicket};
pub use profile_service::{ExportFile, Profile, ProfileService, UserInfo};
pub use resource_service::{ResourceService, RoadmapResources};
pub use roadmap_service::RoadmapService;
pub use view::{RoadmapCard, RoadmapDetail, SubtopicView, TopRoadmap, TopicView};
