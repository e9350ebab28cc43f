use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use tracker_core::model::{Catalog, ProgressRecord, Roadmap, RoadmapId, SubtopicId};

use crate::repository::{Api, ApiError, ProgressApi, RoadmapApi};

mod config;

pub use config::{
    ApiConfig, Credentials, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, ENV_API_TIMEOUT, ENV_API_TOKEN,
    ENV_API_URL,
};

/// HTTP adapter for the tracker API.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
    credentials: Option<Credentials>,
}

impl HttpApi {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the underlying HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url,
            credentials: config.credentials,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends escaped path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(%method, %url, "api request");
        let builder = self.client.request(method, url);
        match &self.credentials {
            Some(credentials) => builder.bearer_auth(credentials.token()),
            None => builder,
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        let response = self.request(Method::GET, url).send().await?;
        decode(check_status(response)?).await
    }

    async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        let response = self.request(Method::POST, url).json(body).send().await?;
        decode(check_status(response)?).await
    }
}

impl Api {
    /// Bundle backed by the HTTP adapter.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn http(config: ApiConfig) -> Result<Self, ApiError> {
        Ok(Self::from_backend(HttpApi::new(config)?))
    }
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    tracing::debug!(%status, url = %response.url(), "api request rejected");
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized),
        StatusCode::NOT_FOUND => Err(ApiError::NotFound),
        _ => Err(ApiError::HttpStatus(status)),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToggleRequest<'a> {
    topic_id: &'a SubtopicId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NoteRequest<'a> {
    topic_id: &'a SubtopicId,
    note: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompleteAllRequest<'a> {
    all_topic_ids: &'a [SubtopicId],
}

#[async_trait]
impl RoadmapApi for HttpApi {
    async fn list_roadmaps(&self) -> Result<Catalog, ApiError> {
        self.fetch_json(&["roadmaps"]).await
    }

    async fn get_roadmap(&self, id: &RoadmapId) -> Result<Roadmap, ApiError> {
        self.fetch_json(&["roadmaps", id.value()]).await
    }
}

#[async_trait]
impl ProgressApi for HttpApi {
    async fn list_progress(&self) -> Result<Vec<ProgressRecord>, ApiError> {
        self.fetch_json(&["progress"]).await
    }

    async fn get_progress(&self, roadmap_id: &RoadmapId) -> Result<ProgressRecord, ApiError> {
        self.fetch_json(&["progress", roadmap_id.value()]).await
    }

    async fn toggle_subtopic(
        &self,
        roadmap_id: &RoadmapId,
        subtopic: &SubtopicId,
    ) -> Result<ProgressRecord, ApiError> {
        let body = ToggleRequest { topic_id: subtopic };
        self.post_json(&["progress", roadmap_id.value(), "toggle"], &body)
            .await
    }

    async fn save_note(
        &self,
        roadmap_id: &RoadmapId,
        subtopic: &SubtopicId,
        note: &str,
    ) -> Result<ProgressRecord, ApiError> {
        let body = NoteRequest {
            topic_id: subtopic,
            note,
        };
        self.post_json(&["progress", roadmap_id.value(), "note"], &body)
            .await
    }

    async fn complete_all(
        &self,
        roadmap_id: &RoadmapId,
        all_topic_ids: &[SubtopicId],
    ) -> Result<ProgressRecord, ApiError> {
        let body = CompleteAllRequest { all_topic_ids };
        self.post_json(&["progress", roadmap_id.value(), "complete-all"], &body)
            .await
    }

    async fn reset(&self, roadmap_id: &RoadmapId) -> Result<(), ApiError> {
        let url = self.endpoint(&["progress", roadmap_id.value()])?;
        let response = self.request(Method::DELETE, url).send().await?;
        check_status(response)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpApi {
        HttpApi::new(ApiConfig::new(base).unwrap()).unwrap()
    }

    #[test]
    fn endpoint_appends_segments_to_base_path() {
        let url = api("http://localhost:5000/api")
            .endpoint(&["progress", "dsa", "toggle"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/progress/dsa/toggle");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let url = api("http://localhost:5000/api/").endpoint(&["roadmaps"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/roadmaps");
    }

    #[test]
    fn endpoint_escapes_ids() {
        let url = api("http://localhost/api")
            .endpoint(&["roadmaps", "c++ basics"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost/api/roadmaps/c++%20basics");
    }

    #[test]
    fn request_bodies_use_wire_names() {
        let id = SubtopicId::from_raw("t1-sub-0");
        let note = serde_json::to_value(NoteRequest {
            topic_id: &id,
            note: "hi",
        })
        .unwrap();
        assert_eq!(note, serde_json::json!({ "topicId": "t1-sub-0", "note": "hi" }));

        let ids = [id.clone()];
        let all = serde_json::to_value(CompleteAllRequest { all_topic_ids: &ids }).unwrap();
        assert_eq!(all, serde_json::json!({ "allTopicIds": ["t1-sub-0"] }));
    }
}
