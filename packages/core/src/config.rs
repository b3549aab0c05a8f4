// ABOUTME: Project-local configuration for Taskdeck directories
// ABOUTME: Reads .taskdeck/config.json, auth.json and state.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// Name of the per-project metadata directory.
pub const PROJECT_DIR: &str = ".taskdeck";

pub const DEFAULT_API_ENDPOINT: &str = "https://api.taskdeck.dev";

/// Storage selection as written in config.json, before runtime resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    File,
    Api,
    #[default]
    Auto,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    #[serde(rename = "type", default)]
    pub kind: StorageKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default)]
    pub storage: StorageConfig,
}

impl ProjectConfig {
    /// Load config.json from a project root. A missing file yields the
    /// defaults; a malformed file is a configuration error.
    pub fn load(project_root: &Path) -> CoreResult<Self> {
        let path = project_root.join(PROJECT_DIR).join("config.json");
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)?;
        serde_json::from_str(&raw).map_err(|e| {
            CoreError::Configuration(format!("malformed {}: {}", path.display(), e))
        })
    }

    pub fn api_endpoint(&self) -> &str {
        self.storage
            .api_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_API_ENDPOINT)
    }
}

/// Credentials and brief link for the remote brief service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthCredentials {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brief_id: Option<String>,
}

impl AuthCredentials {
    /// Load auth.json from a project root. Returns `None` when the project
    /// has never authenticated.
    pub fn load(project_root: &Path) -> CoreResult<Option<Self>> {
        let path = project_root.join(PROJECT_DIR).join("auth.json");
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path)?;
        let creds: Self = serde_json::from_str(&raw).map_err(|e| {
            CoreError::Configuration(format!("malformed {}: {}", path.display(), e))
        })?;
        Ok(Some(creds))
    }
}

/// Mutable per-project state, currently just the active tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_tag: Option<String>,
}

impl ProjectState {
    pub fn load(project_root: &Path) -> CoreResult<Self> {
        let path = project_root.join(PROJECT_DIR).join("state.json");
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)?;
        serde_json::from_str(&raw).map_err(|e| {
            CoreError::Configuration(format!("malformed {}: {}", path.display(), e))
        })
    }
}

/// Validate that a path is an initialized Taskdeck project.
pub fn require_project_dir(project_root: &Path) -> CoreResult<PathBuf> {
    let dir = project_root.join(PROJECT_DIR);
    if !dir.is_dir() {
        return Err(CoreError::Configuration(format!(
            "{} is not a Taskdeck project (missing {}/)",
            project_root.display(),
            PROJECT_DIR
        )));
    }
    Ok(dir)
}
