use std::sync::Arc;

use api::{Api, ApiConfig, ApiError};

use crate::Clock;
use crate::dashboard_service::DashboardService;
use crate::profile_service::ProfileService;
use crate::resource_service::ResourceService;
use crate::roadmap_service::RoadmapService;

/// Assembles the screen services over one shared API bundle.
#[derive(Clone)]
pub struct AppServices {
    dashboard: Arc<DashboardService>,
    roadmaps: Arc<RoadmapService>,
    profile: Arc<ProfileService>,
    resources: Arc<ResourceService>,
}

impl AppServices {
    #[must_use]
    pub fn new(clock: Clock, api: &Api) -> Self {
        Self {
            dashboard: Arc::new(DashboardService::new(
                Arc::clone(&api.roadmaps),
                Arc::clone(&api.progress),
            )),
            roadmaps: Arc::new(RoadmapService::new(
                Arc::clone(&api.roadmaps),
                Arc::clone(&api.progress),
            )),
            profile: Arc::new(ProfileService::new(
                clock,
                Arc::clone(&api.roadmaps),
                Arc::clone(&api.progress),
            )),
            resources: Arc::new(ResourceService::new(Arc::clone(&api.roadmaps))),
        }
    }

    /// Build services backed by the HTTP API.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the HTTP client cannot be built.
    pub fn http(config: ApiConfig, clock: Clock) -> Result<Self, ApiError> {
        let api = Api::http(config)?;
        tracing::debug!("services wired to the HTTP api");
        Ok(Self::new(clock, &api))
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    #[must_use]
    pub fn roadmaps(&self) -> Arc<RoadmapService> {
        Arc::clone(&self.roadmaps)
    }

    #[must_use]
    pub fn profile(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profile)
    }

    #[must_use]
    pub fn resources(&self) -> Arc<ResourceService> {
        Arc::clone(&self.resources)
    }
}
