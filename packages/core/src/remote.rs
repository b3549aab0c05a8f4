// ABOUTME: HTTP client for the remote brief service
// ABOUTME: Lists briefs and fetches their task statistics

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};
use crate::types::SubtaskCounts;

/// A brief as served by the remote API. "Brief" is the remote vocabulary
/// for a tag: a named grouping of tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brief {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Task statistics for a single brief.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefTaskStats {
    pub total: usize,
    pub completed: usize,
    #[serde(default)]
    pub by_status: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<SubtaskCounts>,
}

/// Client for the remote brief service.
///
/// The service API is treated as opaque beyond the two calls consumed here;
/// errors it produces are assumed user-presentable and are surfaced as-is.
#[derive(Clone)]
pub struct RemoteClient {
    http_client: Client,
    base_url: String,
    token: String,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> CoreResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| CoreError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            token: token.into(),
        })
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// List all briefs visible to the authenticated account.
    pub async fn list_briefs(&self) -> CoreResult<Vec<Brief>> {
        let url = format!("{}/v1/briefs", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|e| CoreError::Network(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json::<Vec<Brief>>()
                .await
                .map_err(|e| CoreError::InvalidResponse(e.to_string())),
            StatusCode::UNAUTHORIZED => Err(CoreError::Authentication(
                "Invalid or expired token".to_string(),
            )),
            status => {
                let error_text = response.text().await.unwrap_or_else(|_| status.to_string());
                Err(CoreError::Http(error_text))
            }
        }
    }

    /// Fetch the task statistics of one brief.
    pub async fn brief_task_stats(&self, brief_id: &str) -> CoreResult<BriefTaskStats> {
        let url = format!("{}/v1/briefs/{}/task-stats", self.base_url, brief_id);

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|e| CoreError::Network(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json::<BriefTaskStats>()
                .await
                .map_err(|e| CoreError::InvalidResponse(e.to_string())),
            StatusCode::NOT_FOUND => Err(CoreError::NotFound(format!(
                "Brief {} not found",
                brief_id
            ))),
            StatusCode::UNAUTHORIZED => Err(CoreError::Authentication(
                "Invalid or expired token".to_string(),
            )),
            status => {
                let error_text = response.text().await.unwrap_or_else(|_| status.to_string());
                Err(CoreError::Http(error_text))
            }
        }
    }
}
