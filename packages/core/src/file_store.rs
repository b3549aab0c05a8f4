// ABOUTME: File-backed tag statistics
// ABOUTME: Derives per-tag counts and status breakdowns from .taskdeck/tasks.json

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::{ProjectState, PROJECT_DIR};
use crate::error::CoreResult;
use crate::types::{SubtaskCounts, TagInfo, TagsWithStats};

fn default_status() -> String {
    "pending".to_string()
}

#[derive(Debug, Deserialize)]
struct SubtaskRecord {
    #[serde(default = "default_status")]
    status: String,
}

#[derive(Debug, Deserialize)]
struct TaskRecord {
    #[serde(default = "default_status")]
    status: String,
    #[serde(default)]
    subtasks: Vec<SubtaskRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TagMetadata {
    #[serde(default)]
    created: Option<DateTime<Utc>>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TagRecord {
    #[serde(default)]
    tasks: Vec<TaskRecord>,
    #[serde(default)]
    metadata: Option<TagMetadata>,
}

fn is_completed(status: &str) -> bool {
    matches!(status, "done" | "completed")
}

/// Tag statistics sourced from the project's local tasks file.
pub struct FileStore {
    project_root: PathBuf,
}

impl FileStore {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    fn tasks_file(&self) -> PathBuf {
        self.project_root.join(PROJECT_DIR).join("tasks.json")
    }

    /// Read the tasks file and shape per-tag statistics.
    ///
    /// A project with no tasks file yet simply has no tags.
    pub async fn tags_with_stats(&self) -> CoreResult<TagsWithStats> {
        let state = ProjectState::load(&self.project_root)?;
        let path = self.tasks_file();

        if !path.exists() {
            return Ok(TagsWithStats {
                tags: Vec::new(),
                current_tag: state.current_tag,
                total_tags: 0,
            });
        }

        let raw = tokio::fs::read_to_string(&path).await?;
        let records: BTreeMap<String, TagRecord> = serde_json::from_str(&raw)?;

        let tags: Vec<TagInfo> = records
            .into_iter()
            .map(|(name, record)| shape_tag(name, record, state.current_tag.as_deref()))
            .collect();
        let total_tags = tags.len();

        Ok(TagsWithStats {
            tags,
            current_tag: state.current_tag,
            total_tags,
        })
    }
}

fn shape_tag(name: String, record: TagRecord, current_tag: Option<&str>) -> TagInfo {
    let mut status_breakdown: BTreeMap<String, usize> = BTreeMap::new();
    let mut subtask_breakdown: BTreeMap<String, usize> = BTreeMap::new();
    let mut completed_tasks = 0;
    let mut subtask_total = 0;

    for task in &record.tasks {
        *status_breakdown.entry(task.status.clone()).or_insert(0) += 1;
        if is_completed(&task.status) {
            completed_tasks += 1;
        }
        for subtask in &task.subtasks {
            *subtask_breakdown.entry(subtask.status.clone()).or_insert(0) += 1;
            subtask_total += 1;
        }
    }

    let subtask_counts = (subtask_total > 0).then_some(SubtaskCounts {
        total: subtask_total,
        breakdown: subtask_breakdown,
    });

    let (created, description) = match record.metadata {
        Some(meta) => (meta.created, meta.description),
        None => (None, None),
    };

    TagInfo {
        is_current: current_tag == Some(name.as_str()),
        task_count: record.tasks.len(),
        completed_tasks,
        status_breakdown,
        subtask_counts,
        created,
        description,
        status: None,
        brief_id: None,
        name,
    }
}
