// ABOUTME: Tag listing command and storage dispatch
// ABOUTME: Serves tag stats from the remote brief service or defers to the file store

use clap::ValueEnum;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

use taskdeck_core::{Core, CoreResult, FileStore, StorageType, TagInfo, TagSource, TagsWithStats};

use crate::ui;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListTagsOptions {
    pub show_metadata: bool,
    pub is_mcp: bool,
    pub output_format: OutputFormat,
}

impl ListTagsOptions {
    /// Human-oriented rendering is only wanted for text output outside of
    /// machine-integration mode.
    pub fn interactive_text(&self) -> bool {
        self.output_format == OutputFormat::Text && !self.is_mcp
    }
}

/// Shaped outcome of a remote-backed tag query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTagsResult {
    pub success: bool,
    pub tags: Vec<TagInfo>,
    pub current_tag: Option<String>,
    pub total_tags: usize,
    pub message: String,
}

/// Outcome of the storage dispatch: either a remote-backed result, or a
/// signal that the file-based listing is authoritative.
#[derive(Debug)]
pub enum TagListing {
    Remote(RemoteTagsResult),
    Deferred,
}

/// Decide whether the remote brief service is authoritative for a project.
///
/// A core that cannot be constructed, or a project that resolved to file
/// storage, both defer: those are expected divergences, not failures.
pub async fn remote_core(project_root: &Path) -> Option<Core> {
    let core = match Core::initialize(project_root).await {
        Ok(core) => core,
        Err(error) => {
            warn!(%error, "task core unavailable, deferring to file-based tag listing");
            return None;
        }
    };

    if core.storage_type() != StorageType::Api {
        info!("storage resolved to file, deferring to file-based tag listing");
        return None;
    }

    Some(core)
}

/// Fetch tag statistics from a remote-backed source and shape the result.
///
/// Fetch failures propagate unchanged: the producing layer already formats
/// them for the user, so nothing is wrapped or translated here.
pub async fn fetch_remote_tags<S: TagSource>(source: &S) -> CoreResult<RemoteTagsResult> {
    let stats = source.tags_with_stats().await?;
    Ok(shape_listing(stats))
}

/// The full dispatch operation, rendering-free.
pub async fn resolve_tags(project_root: &Path) -> CoreResult<TagListing> {
    match remote_core(project_root).await {
        Some(core) => Ok(TagListing::Remote(fetch_remote_tags(&core).await?)),
        None => Ok(TagListing::Deferred),
    }
}

fn shape_listing(mut stats: TagsWithStats) -> RemoteTagsResult {
    // At most one entry is current; it sorts first, the rest by name.
    stats
        .tags
        .sort_by(|a, b| b.is_current.cmp(&a.is_current).then_with(|| a.name.cmp(&b.name)));

    let total_tags = stats.tags.len();
    RemoteTagsResult {
        success: true,
        message: format!("Found {} tag(s)", total_tags),
        current_tag: stats.current_tag,
        total_tags,
        tags: stats.tags,
    }
}

/// `taskdeck tags` entry point.
pub async fn handle_tags_command(
    project_root: &Path,
    options: ListTagsOptions,
) -> anyhow::Result<()> {
    let listing = match remote_core(project_root).await {
        Some(core) => {
            if options.interactive_text() {
                ui::boxed_notice("Fetching briefs from Taskdeck...");
            }
            TagListing::Remote(fetch_remote_tags(&core).await?)
        }
        None => TagListing::Deferred,
    };

    let result = match listing {
        TagListing::Remote(result) => result,
        TagListing::Deferred => {
            let stats = FileStore::new(project_root).tags_with_stats().await?;
            shape_listing(stats)
        }
    };

    if options.interactive_text() {
        if result.tags.is_empty() {
            ui::boxed_notice("No tags found");
        } else {
            ui::render_tags_table(&result.tags, options.show_metadata);
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use taskdeck_core::CoreError;
    use tempfile::TempDir;
    use tracing::instrument::WithSubscriber;
    use tracing::Level;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    #[derive(Default)]
    struct LevelCounts {
        warn: AtomicUsize,
        info: AtomicUsize,
    }

    struct CountingLayer(Arc<LevelCounts>);

    impl<S: tracing::Subscriber> Layer<S> for CountingLayer {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            match *event.metadata().level() {
                Level::WARN => {
                    self.0.warn.fetch_add(1, Ordering::SeqCst);
                }
                Level::INFO => {
                    self.0.info.fetch_add(1, Ordering::SeqCst);
                }
                _ => {}
            }
        }
    }

    fn counted_subscriber() -> (Arc<LevelCounts>, impl tracing::Subscriber) {
        let counts = Arc::new(LevelCounts::default());
        let subscriber =
            tracing_subscriber::registry().with(CountingLayer(Arc::clone(&counts)));
        (counts, subscriber)
    }

    mock! {
        Source {}

        #[async_trait]
        impl TagSource for Source {
            fn storage_type(&self) -> StorageType;
            async fn tags_with_stats(&self) -> CoreResult<TagsWithStats>;
        }
    }

    fn tag(name: &str, is_current: bool) -> TagInfo {
        TagInfo {
            is_current,
            ..TagInfo::empty(name)
        }
    }

    fn stats(tags: Vec<TagInfo>, current: Option<&str>) -> TagsWithStats {
        TagsWithStats {
            total_tags: tags.len(),
            current_tag: current.map(String::from),
            tags,
        }
    }

    #[tokio::test]
    async fn unusable_project_defers_with_single_warning() {
        let dir = TempDir::new().unwrap();
        let (counts, subscriber) = counted_subscriber();

        let listing = resolve_tags(dir.path())
            .with_subscriber(subscriber)
            .await
            .unwrap();

        assert!(matches!(listing, TagListing::Deferred));
        assert_eq!(counts.warn.load(Ordering::SeqCst), 1);
        assert_eq!(counts.info.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn file_storage_project_defers_with_single_info() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".taskdeck")).unwrap();
        std::fs::write(
            dir.path().join(".taskdeck").join("config.json"),
            r#"{"storage": {"type": "file"}}"#,
        )
        .unwrap();
        let (counts, subscriber) = counted_subscriber();

        let listing = resolve_tags(dir.path())
            .with_subscriber(subscriber)
            .await
            .unwrap();

        assert!(matches!(listing, TagListing::Deferred));
        assert_eq!(counts.info.load(Ordering::SeqCst), 1);
        assert_eq!(counts.warn.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn current_tag_sorts_first_then_names_ascend() {
        let mut source = MockSource::new();
        source.expect_tags_with_stats().returning(|| {
            Ok(stats(
                vec![
                    tag("delta", false),
                    tag("mainline", true),
                    tag("alpha", false),
                ],
                Some("mainline"),
            ))
        });

        let result = fetch_remote_tags(&source).await.unwrap();

        let names: Vec<&str> = result.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["mainline", "alpha", "delta"]);
        assert!(result.tags[0].is_current);
        assert_eq!(result.current_tag.as_deref(), Some("mainline"));
    }

    #[tokio::test]
    async fn beta_then_current_alpha_orders_alpha_first() {
        let mut source = MockSource::new();
        source.expect_tags_with_stats().returning(|| {
            Ok(stats(
                vec![tag("beta", false), tag("alpha", true)],
                Some("alpha"),
            ))
        });

        let result = fetch_remote_tags(&source).await.unwrap();

        let names: Vec<&str> = result.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
        assert!(result.tags[0].is_current);
    }

    #[tokio::test]
    async fn empty_remote_result_still_succeeds() {
        let mut source = MockSource::new();
        source
            .expect_tags_with_stats()
            .returning(|| Ok(stats(vec![], None)));

        let result = fetch_remote_tags(&source).await.unwrap();

        assert!(result.success);
        assert!(result.tags.is_empty());
        assert_eq!(result.total_tags, 0);
        assert_eq!(result.message, "Found 0 tag(s)");
    }

    #[tokio::test]
    async fn total_always_matches_sequence_length() {
        let mut source = MockSource::new();
        source.expect_tags_with_stats().returning(|| {
            // A backend reporting a bogus total is corrected by shaping.
            let mut s = stats(vec![tag("a", false), tag("b", false)], None);
            s.total_tags = 99;
            Ok(s)
        });

        let result = fetch_remote_tags(&source).await.unwrap();

        assert_eq!(result.total_tags, result.tags.len());
        assert_eq!(result.total_tags, 2);
    }

    #[tokio::test]
    async fn fetch_failure_propagates_unchanged() {
        let mut source = MockSource::new();
        source
            .expect_tags_with_stats()
            .returning(|| Err(CoreError::Http("brief service exploded".to_string())));

        let error = fetch_remote_tags(&source).await.unwrap_err();

        assert_eq!(error.to_string(), "HTTP error: brief service exploded");
    }
}
