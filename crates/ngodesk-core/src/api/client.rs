//! HTTP client for the ngodesk backend.

use std::time::Duration;

use anyhow::{Context, Result};
use futures::future::join_all;
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{Dataset, UserStatus};
use crate::payload::Payload;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retries for rate-limited (429) requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Document operations exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentAction {
    Download,
    Preview,
}

impl DocumentAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentAction::Download => "download",
            DocumentAction::Preview => "preview",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLink {
    pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReminderRequest<'a> {
    document_ids: &'a [String],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserStatusRequest<'a> {
    user_ids: &'a [String],
    status: UserStatus,
}

/// Server acknowledgement of a bulk mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MutationResult {
    pub updated: usize,
}

/// API client for the ngodesk backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(ref token) = self.token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Ok(Some) on success, Ok(None) when rate limited (retry), Err otherwise.
    async fn check_response_for_retry(
        response: reqwest::Response,
    ) -> Result<Option<reqwest::Response>> {
        if response.status().is_success() {
            Ok(Some(response))
        } else if response.status().as_u16() == 429 {
            Ok(None)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    /// Send a request, retrying 429s with exponential backoff.
    async fn send_with_backoff<T, F>(&self, url: &str, build: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn() -> Result<reqwest::RequestBuilder>,
    {
        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            let response = build()?
                .send()
                .await
                .map_err(ApiError::from)
                .with_context(|| format!("Failed to send request to {}", url))?;

            match Self::check_response_for_retry(response).await? {
                Some(response) => {
                    return response
                        .json()
                        .await
                        .with_context(|| format!("Failed to parse JSON response from {}", url));
                }
                None => {
                    retries += 1;
                    if retries > MAX_RATE_LIMIT_RETRIES {
                        return Err(ApiError::RateLimited.into());
                    }
                    warn!(url = url, retry = retries, backoff_ms = backoff_ms, "Rate limited, backing off");
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms *= 2;
                }
            }
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.send_with_backoff(url, || Ok(self.client.get(url).headers(self.auth_headers()?)))
            .await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, url: &str, body: &B) -> Result<T> {
        self.send_with_backoff(url, || {
            Ok(self.client.post(url).headers(self.auth_headers()?).json(body))
        })
        .await
    }

    // ===== Data Fetching Methods =====

    /// Fetch one collection as a JSON array of `T`.
    pub async fn fetch_dataset<T: DeserializeOwned>(&self, dataset: Dataset) -> Result<Vec<T>> {
        let url = self.url(dataset.path());
        let records: Vec<T> = self
            .get(&url)
            .await
            .with_context(|| format!("Failed to fetch {}", dataset.noun()))?;
        debug!(dataset = %dataset, count = records.len(), "Fetched dataset");
        Ok(records)
    }

    pub async fn fetch_payload(&self, dataset: Dataset) -> Result<Payload> {
        Ok(match dataset {
            Dataset::Grants => Payload::Grants(self.fetch_dataset(dataset).await?),
            Dataset::ComplianceDocuments => {
                Payload::ComplianceDocuments(self.fetch_dataset(dataset).await?)
            }
            Dataset::Employees => Payload::Employees(self.fetch_dataset(dataset).await?),
            Dataset::OnboardingTasks => {
                Payload::OnboardingTasks(self.fetch_dataset(dataset).await?)
            }
            Dataset::Exits => Payload::Exits(self.fetch_dataset(dataset).await?),
            Dataset::ReferenceChecks => {
                Payload::ReferenceChecks(self.fetch_dataset(dataset).await?)
            }
            Dataset::Opportunities => Payload::Opportunities(self.fetch_dataset(dataset).await?),
            Dataset::Users => Payload::Users(self.fetch_dataset(dataset).await?),
        })
    }

    /// Fetch several collections concurrently. Each result is reported
    /// separately so one failing screen does not blank the others.
    pub async fn fetch_payloads(&self, datasets: &[Dataset]) -> Vec<(Dataset, Result<Payload>)> {
        let futures = datasets.iter().map(|&dataset| async move {
            (dataset, self.fetch_payload(dataset).await)
        });
        join_all(futures).await
    }

    // ===== Documents =====

    pub async fn document_link(&self, id: &str, action: DocumentAction) -> Result<DocumentLink> {
        let url = self.url(&format!("documents/{}/{}", id, action.as_str()));
        self.get(&url).await
    }

    // ===== Mutations =====

    pub async fn send_reminders(&self, document_ids: &[String]) -> Result<MutationResult> {
        let url = self.url("compliance/reminders");
        let result: MutationResult = self.post(&url, &ReminderRequest { document_ids }).await?;
        debug!(requested = document_ids.len(), updated = result.updated, "Reminders sent");
        Ok(result)
    }

    pub async fn update_user_status(
        &self,
        user_ids: &[String],
        status: UserStatus,
    ) -> Result<MutationResult> {
        let url = self.url("admin/users/status");
        let result: MutationResult = self
            .post(&url, &UserStatusRequest { user_ids, status })
            .await?;
        debug!(requested = user_ids.len(), updated = result.updated, status = %status, "User status updated");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let client = ApiClient::new("http://127.0.0.1:1").unwrap();
        let err = client.fetch_dataset::<serde_json::Value>(Dataset::Grants).await.unwrap_err();
        assert!(err
            .chain()
            .any(|cause| matches!(cause.downcast_ref::<ApiError>(), Some(ApiError::NetworkError(_)))));
    }

    #[test]
    fn test_url_joining() {
        let client = ApiClient::new("https://api.example.org/v1/").unwrap();
        assert_eq!(client.base_url(), "https://api.example.org/v1");
        assert_eq!(
            client.url(Dataset::ComplianceDocuments.path()),
            "https://api.example.org/v1/compliance/documents"
        );
        assert_eq!(client.url("/admin/users"), "https://api.example.org/v1/admin/users");
    }

    #[test]
    fn test_auth_headers() {
        let client = ApiClient::new("http://localhost").unwrap();
        assert!(client.auth_headers().unwrap().get(header::AUTHORIZATION).is_none());

        let client = client.with_token(Some("abc".to_string()));
        let headers = client.auth_headers().unwrap();
        assert_eq!(headers.get(header::AUTHORIZATION).unwrap(), "Bearer abc");
    }

    #[test]
    fn test_request_bodies_are_camel_case() {
        let ids = vec!["c1".to_string()];
        let json = serde_json::to_value(UserStatusRequest {
            user_ids: &ids,
            status: UserStatus::Suspended,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"userIds": ["c1"], "status": "Suspended"}));

        let json = serde_json::to_value(ReminderRequest { document_ids: &ids }).unwrap();
        assert_eq!(json, serde_json::json!({"documentIds": ["c1"]}));
    }

    #[test]
    fn test_document_action_paths() {
        assert_eq!(DocumentAction::Download.as_str(), "download");
        assert_eq!(DocumentAction::Preview.as_str(), "preview");
        let link: DocumentLink = serde_json::from_str(r#"{"url":"https://x/y.pdf"}"#).unwrap();
        assert_eq!(link.url, "https://x/y.pdf");
    }
}
