#![forbid(unsafe_code)]

pub mod http;
pub mod repository;

pub use http::{ApiConfig, Credentials, HttpApi};
pub use repository::{Api, ApiError, InMemoryApi, ProgressApi, RoadmapApi};
