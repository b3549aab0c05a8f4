// ABOUTME: Core handle construction and storage resolution
// ABOUTME: Dispatches tag statistics queries to the file or API backend

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{require_project_dir, AuthCredentials, ProjectConfig, StorageKind};
use crate::error::{CoreError, CoreResult};
use crate::file_store::FileStore;
use crate::remote::RemoteClient;
use crate::types::{StorageType, TagInfo, TagsWithStats};

/// A source of tag statistics with a resolved storage kind.
///
/// Seam between the dispatch logic and the backing store; the CLI layer
/// tests its dispatcher against a mock of this trait.
#[async_trait]
pub trait TagSource: Send + Sync {
    fn storage_type(&self) -> StorageType;
    async fn tags_with_stats(&self) -> CoreResult<TagsWithStats>;
}

enum Backend {
    File(FileStore),
    Api {
        client: RemoteClient,
        linked_brief: Option<String>,
    },
}

/// Handle to a Taskdeck project with its storage backend resolved.
///
/// Construction reads the project's config and auth state; the resolved
/// kind is fixed for the lifetime of the handle.
pub struct Core {
    backend: Backend,
}

impl Core {
    /// Initialize a handle for the project at `project_root`.
    ///
    /// Resolution is runtime detection, not a static flag: an explicit
    /// `storage.type` in config.json wins; otherwise the project uses the
    /// API backend exactly when it is authenticated and linked to a brief.
    pub async fn initialize(project_root: impl AsRef<Path>) -> CoreResult<Self> {
        let project_root: PathBuf = project_root.as_ref().to_path_buf();
        require_project_dir(&project_root)?;

        let config = ProjectConfig::load(&project_root)?;
        let auth = AuthCredentials::load(&project_root)?;

        let backend = match config.storage.kind {
            StorageKind::File => Backend::File(FileStore::new(project_root)),
            StorageKind::Api => {
                let auth = auth.ok_or_else(|| {
                    CoreError::Configuration(
                        "api storage configured but project is not authenticated".to_string(),
                    )
                })?;
                Backend::Api {
                    client: RemoteClient::new(config.api_endpoint(), auth.token)?,
                    linked_brief: auth.brief_id,
                }
            }
            StorageKind::Auto => match auth {
                Some(auth) if auth.brief_id.is_some() => Backend::Api {
                    client: RemoteClient::new(config.api_endpoint(), auth.token)?,
                    linked_brief: auth.brief_id,
                },
                _ => Backend::File(FileStore::new(project_root)),
            },
        };

        let core = Self { backend };
        debug!(storage = ?core.storage_type(), "resolved project storage");
        Ok(core)
    }
}

#[async_trait]
impl TagSource for Core {
    fn storage_type(&self) -> StorageType {
        match self.backend {
            Backend::File(_) => StorageType::File,
            Backend::Api { .. } => StorageType::Api,
        }
    }

    /// Query tag statistics from the resolved backend.
    ///
    /// The API path fetches briefs and their stats sequentially; there is
    /// never more than one request in flight.
    async fn tags_with_stats(&self) -> CoreResult<TagsWithStats> {
        match &self.backend {
            Backend::File(store) => store.tags_with_stats().await,
            Backend::Api {
                client,
                linked_brief,
            } => {
                let briefs = client.list_briefs().await?;
                let mut tags = Vec::with_capacity(briefs.len());
                let mut current_tag = None;

                for brief in briefs {
                    let stats = client.brief_task_stats(&brief.id).await?;
                    let is_current = linked_brief.as_deref() == Some(brief.id.as_str());
                    if is_current {
                        current_tag = Some(brief.name.clone());
                    }
                    tags.push(TagInfo {
                        name: brief.name,
                        is_current,
                        task_count: stats.total,
                        completed_tasks: stats.completed,
                        status_breakdown: stats.by_status,
                        subtask_counts: stats.subtasks,
                        created: brief.created_at,
                        description: brief.description,
                        status: brief.status,
                        brief_id: Some(brief.id),
                    });
                }

                let total_tags = tags.len();
                Ok(TagsWithStats {
                    tags,
                    current_tag,
                    total_tags,
                })
            }
        }
    }
}
