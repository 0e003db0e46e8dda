//! Typed client for the NutriGuide backend API.

use futures_util::future::try_join;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::models::{
    AdminSnapshot, EmailCopy, Question, RecentRecommendations, Recommendation, SegmentsSummary,
};

/// Failure at the HTTP boundary.
///
/// The distinction is internal only: every variant collapses to the owning
/// component's fixed user-facing message before it reaches the UI, and
/// nothing is retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network unreachable, or a response body that did not parse.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Response received but status outside the success range. 4xx and 5xx
    /// are treated uniformly.
    #[error("unexpected status {0}")]
    Status(StatusCode),
}

/// Thin wrapper over `reqwest::Client` bound to one backend base URL.
///
/// Cheap to clone; clones share the underlying connection pool, so the
/// spawned fetch tasks all hold their own handle.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into(),
        }
    }

    /// GET `/quiz/questions` — the one-shot question catalog.
    pub async fn fetch_questions(&self) -> Result<Vec<Question>, ApiError> {
        self.get_json("/quiz/questions").await
    }

    /// POST the full answer ledger to `/quiz/recommend`.
    pub async fn submit_answers(
        &self,
        answers: &serde_json::Value,
    ) -> Result<Recommendation, ApiError> {
        self.post_json("/quiz/recommend", answers).await
    }

    /// Fetch both admin aggregates concurrently as one unit of work.
    ///
    /// If either request fails the whole fetch fails and neither partial
    /// result is returned, so the caller can never render a mixed
    /// stale/fresh dashboard.
    pub async fn fetch_admin_snapshot(&self) -> Result<AdminSnapshot, ApiError> {
        let recent = self.get_json::<RecentRecommendations>("/admin/recent-recommendations");
        let segments = self.get_json::<SegmentsSummary>("/admin/segments-summary");
        let (recent, segments) = try_join(recent, segments).await?;

        Ok(AdminSnapshot {
            recent: recent.items,
            segments,
        })
    }

    /// GET `/admin/export-recent` — the server-rendered CSV, returned
    /// verbatim.
    pub async fn export_recent(&self) -> Result<String, ApiError> {
        let response = self
            .http
            .get(self.url("/admin/export-recent"))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        Ok(response.text().await?)
    }

    /// POST `/content/welcome-email` with `{quiz, recommendation}`.
    pub async fn welcome_email(&self, body: &serde_json::Value) -> Result<EmailCopy, ApiError> {
        self.post_json("/content/welcome-email", body).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        tracing::debug!(path, "GET");
        let response = self.http.get(self.url(path)).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(path, %status, "request failed");
            return Err(ApiError::Status(status));
        }
        Ok(response.json().await?)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "POST");
        let response = self.http.post(self.url(path)).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(path, %status, "request failed");
            return Err(ApiError::Status(status));
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn fetches_question_catalog() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quiz/questions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "allergies", "text": "Any known allergies?", "type": "text"}
            ])))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let questions = client.fetch_questions().await.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, "allergies");
    }

    #[tokio::test]
    async fn non_2xx_is_a_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/quiz/recommend"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let err = client.submit_answers(&json!({})).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR)
        ));
    }

    #[tokio::test]
    async fn admin_snapshot_requires_both_requests_to_succeed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/recent-recommendations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/admin/segments-summary"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let err = client.fetch_admin_snapshot().await.unwrap_err();
        assert!(matches!(err, ApiError::Status(StatusCode::NOT_FOUND)));
    }

    #[tokio::test]
    async fn admin_snapshot_joins_both_aggregates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/recent-recommendations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{"timestamp": "2025-11-02T10:15:00", "profile_type": "child"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/admin/segments-summary"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_recommendations": 1,
                "by_profile_type": {"child": 1}
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let snapshot = client.fetch_admin_snapshot().await.unwrap();
        assert_eq!(snapshot.recent.len(), 1);
        assert_eq!(snapshot.segments.total_recommendations, 1);
    }
}
