// ABOUTME: Tag statistics type definitions
// ABOUTME: View-model structures shared by the file and API storage backends

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which storage backend a project resolved to.
///
/// This is the post-initialization kind: resolution may involve runtime
/// detection (auth state, linked brief), not just a config flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    File,
    Api,
}

/// Per-status task counts for the subtasks of a tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskCounts {
    pub total: usize,
    pub breakdown: BTreeMap<String, usize>,
}

/// One logical grouping of tasks: a local tag, or a remote brief.
///
/// Constructed fresh per query and never mutated afterwards. At most one
/// entry in a result set has `is_current = true`. The breakdown sums are
/// produced by the backing store and not re-derived here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagInfo {
    pub name: String,
    pub is_current: bool,
    pub task_count: usize,
    pub completed_tasks: usize,
    pub status_breakdown: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtask_counts: Option<SubtaskCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brief_id: Option<String>,
}

impl TagInfo {
    /// Bare tag with zeroed stats and no remote metadata.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_current: false,
            task_count: 0,
            completed_tasks: 0,
            status_breakdown: BTreeMap::new(),
            subtask_counts: None,
            created: None,
            description: None,
            status: None,
            brief_id: None,
        }
    }
}

/// Raw outcome of a tag statistics query against a storage backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagsWithStats {
    pub tags: Vec<TagInfo>,
    pub current_tag: Option<String>,
    pub total_tags: usize,
}
