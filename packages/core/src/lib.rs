//! Taskdeck Core Package
//!
//! Resolves a project's storage backend (local file store or remote brief
//! service) and serves tag statistics from whichever is authoritative.

pub mod config;
pub mod error;
pub mod file_store;
pub mod remote;
pub mod types;

mod core;

// Re-export commonly used types and traits
pub use crate::core::{Core, TagSource};
pub use config::{AuthCredentials, ProjectConfig, ProjectState, StorageKind, PROJECT_DIR};
pub use error::{CoreError, CoreResult};
pub use file_store::FileStore;
pub use remote::{Brief, BriefTaskStats, RemoteClient};
pub use types::{StorageType, SubtaskCounts, TagInfo, TagsWithStats};
