//! Work-item store trait and implementations

/// In-memory store
pub mod memory;

use crate::item::{ItemKind, ItemStatus, NewQueueItem, Priority, QueueItem};
use crate::post::{GeneratedComment, NewGeneratedComment, NewRedditPost, PostType, RedditPost};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Filter options for listing queue items
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    /// Restrict to a single status
    pub status: Option<ItemStatus>,
    /// Restrict to a single kind
    pub kind: Option<ItemKind>,
    /// Cap the number of returned items
    pub limit: Option<usize>,
}

/// Filter options for listing fetched posts
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// Restrict to a single subreddit (`r/`-prefixed)
    pub subreddit: Option<String>,
    /// Restrict to a single listing type
    pub post_type: Option<PostType>,
    /// Cap the number of returned posts
    pub limit: Option<usize>,
}

/// Partial update for a queue item
///
/// Only the set fields are applied; the store re-stamps `updated_at` on
/// every update.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    /// New lifecycle status
    pub status: Option<ItemStatus>,
    /// New title
    pub title: Option<String>,
    /// New body text
    pub content: Option<String>,
    /// New priority
    pub priority: Option<Priority>,
    /// New earliest execution time
    pub scheduled_at: Option<DateTime<Utc>>,
    /// New processing timestamp
    pub processed_at: Option<DateTime<Utc>>,
    /// New failure description
    pub error_message: Option<String>,
    /// New auxiliary metadata
    pub metadata: Option<serde_json::Value>,
}

/// Aggregate dashboard counters derived by scanning the store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    /// Posts captured since midnight UTC
    pub posts_today: usize,
    /// Comments drafted since midnight UTC
    pub comments_generated: usize,
    /// Queue items still pending
    pub queue_items: usize,
    /// Completed share of all processed items, in percent (one decimal)
    pub success_rate: f64,
}

/// Trait for work-item store implementations
///
/// The store exclusively owns queue items; the processor holds only
/// transient copies while executing a batch.
#[async_trait]
pub trait Store: Send + Sync {
    /// Persist a new queue item as pending
    async fn create_item(&self, new: NewQueueItem) -> crate::Result<QueueItem>;

    /// Get a queue item by id
    async fn get_item(&self, id: &str) -> crate::Result<QueueItem>;

    /// List queue items matching the filter, creation time ascending
    async fn list_items(&self, filter: ItemFilter) -> crate::Result<Vec<QueueItem>>;

    /// List pending items, oldest first, capped at `limit`
    async fn list_pending(&self, limit: usize) -> crate::Result<Vec<QueueItem>> {
        self.list_items(ItemFilter {
            status: Some(ItemStatus::Pending),
            kind: None,
            limit: Some(limit),
        })
        .await
    }

    /// Apply a partial update to a queue item
    async fn update_item(&self, id: &str, patch: ItemPatch) -> crate::Result<QueueItem>;

    /// Atomically claim a pending item for processing
    ///
    /// Transitions Pending -> Processing and stamps `processed_at` only if
    /// the item is currently pending. Returns `None` when the item is
    /// absent or already taken by another pass.
    async fn claim_item(&self, id: &str) -> crate::Result<Option<QueueItem>>;

    /// Delete a queue item regardless of status
    async fn delete_item(&self, id: &str) -> crate::Result<()>;

    /// Persist a fetched Reddit post
    async fn create_post(&self, new: NewRedditPost) -> crate::Result<RedditPost>;

    /// Look up a fetched post by Reddit's own id
    async fn get_post_by_reddit_id(&self, reddit_id: &str) -> crate::Result<Option<RedditPost>>;

    /// Get a fetched post by local id
    async fn get_post(&self, id: &str) -> crate::Result<RedditPost>;

    /// List fetched posts matching the filter, newest first
    async fn list_posts(&self, filter: PostFilter) -> crate::Result<Vec<RedditPost>>;

    /// Persist an AI-drafted comment
    async fn add_generated_comment(
        &self,
        new: NewGeneratedComment,
    ) -> crate::Result<GeneratedComment>;

    /// List drafted comments for a post
    async fn comments_for_post(&self, post_id: &str) -> crate::Result<Vec<GeneratedComment>>;

    /// Record that a drafted comment has been enqueued
    async fn mark_comment_used(&self, id: &str) -> crate::Result<()>;

    /// Derive aggregate dashboard counters
    ///
    /// Pure scan: calling this twice without intervening mutation yields
    /// identical results.
    async fn stats(&self) -> crate::Result<DashboardStats>;
}
