//! In-memory store

use crate::item::{ItemStatus, NewQueueItem, QueueItem};
use crate::post::{GeneratedComment, NewGeneratedComment, NewRedditPost, RedditPost};
use crate::store::{DashboardStats, ItemFilter, ItemPatch, PostFilter, Store};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory store implementation backed by hash maps
pub struct MemoryStore {
    items: Arc<RwLock<HashMap<String, QueueItem>>>,
    posts: Arc<RwLock<HashMap<String, RedditPost>>>,
    comments: Arc<RwLock<HashMap<String, GeneratedComment>>>,
}

impl MemoryStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
            posts: Arc::new(RwLock::new(HashMap::new())),
            comments: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_item(&self, new: NewQueueItem) -> crate::Result<QueueItem> {
        let item = QueueItem::new(new);
        let mut items = self.items.write().await;
        items.insert(item.id.clone(), item.clone());

        debug!(
            "Queue item {} created ({:?}, priority {:?})",
            item.id, item.kind, item.priority
        );
        Ok(item)
    }

    async fn get_item(&self, id: &str) -> crate::Result<QueueItem> {
        let items = self.items.read().await;
        items
            .get(id)
            .cloned()
            .ok_or_else(|| crate::AutopilotError::ItemNotFound(id.to_string()))
    }

    async fn list_items(&self, filter: ItemFilter) -> crate::Result<Vec<QueueItem>> {
        let items = self.items.read().await;
        let mut matching: Vec<QueueItem> = items
            .values()
            .filter(|item| filter.status.is_none_or(|s| item.status == s))
            .filter(|item| filter.kind.is_none_or(|k| item.kind == k))
            .cloned()
            .collect();

        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        if let Some(limit) = filter.limit {
            matching.truncate(limit);
        }

        Ok(matching)
    }

    async fn update_item(&self, id: &str, patch: ItemPatch) -> crate::Result<QueueItem> {
        let mut items = self.items.write().await;
        let item = items
            .get_mut(id)
            .ok_or_else(|| crate::AutopilotError::ItemNotFound(id.to_string()))?;

        if let Some(status) = patch.status {
            item.status = status;
        }
        if let Some(title) = patch.title {
            item.title = Some(title);
        }
        if let Some(content) = patch.content {
            item.content = content;
        }
        if let Some(priority) = patch.priority {
            item.priority = priority;
        }
        if let Some(scheduled_at) = patch.scheduled_at {
            item.scheduled_at = Some(scheduled_at);
        }
        if let Some(processed_at) = patch.processed_at {
            item.processed_at = Some(processed_at);
        }
        if let Some(error_message) = patch.error_message {
            item.error_message = Some(error_message);
        }
        if let Some(metadata) = patch.metadata {
            item.metadata = Some(metadata);
        }
        item.updated_at = Utc::now();

        Ok(item.clone())
    }

    async fn claim_item(&self, id: &str) -> crate::Result<Option<QueueItem>> {
        let mut items = self.items.write().await;
        match items.get_mut(id) {
            Some(item) if item.status == ItemStatus::Pending => {
                item.mark_processing();
                debug!("Queue item {} claimed for processing", id);
                Ok(Some(item.clone()))
            }
            Some(item) => {
                debug!(
                    "Queue item {} not claimable (status {:?})",
                    id, item.status
                );
                Ok(None)
            }
            None => {
                debug!("Queue item {} gone before claim", id);
                Ok(None)
            }
        }
    }

    async fn delete_item(&self, id: &str) -> crate::Result<()> {
        let mut items = self.items.write().await;
        items
            .remove(id)
            .ok_or_else(|| crate::AutopilotError::ItemNotFound(id.to_string()))?;
        debug!("Queue item {} deleted", id);
        Ok(())
    }

    async fn create_post(&self, new: NewRedditPost) -> crate::Result<RedditPost> {
        let post = RedditPost::new(new);
        let mut posts = self.posts.write().await;
        posts.insert(post.id.clone(), post.clone());
        Ok(post)
    }

    async fn get_post_by_reddit_id(&self, reddit_id: &str) -> crate::Result<Option<RedditPost>> {
        let posts = self.posts.read().await;
        Ok(posts
            .values()
            .find(|post| post.reddit_id == reddit_id)
            .cloned())
    }

    async fn get_post(&self, id: &str) -> crate::Result<RedditPost> {
        let posts = self.posts.read().await;
        posts
            .get(id)
            .cloned()
            .ok_or_else(|| crate::AutopilotError::ItemNotFound(id.to_string()))
    }

    async fn list_posts(&self, filter: PostFilter) -> crate::Result<Vec<RedditPost>> {
        let posts = self.posts.read().await;
        let mut matching: Vec<RedditPost> = posts
            .values()
            .filter(|post| {
                filter
                    .subreddit
                    .as_deref()
                    .is_none_or(|s| post.subreddit == s)
            })
            .filter(|post| filter.post_type.is_none_or(|t| post.post_type == t))
            .cloned()
            .collect();

        matching.sort_by(|a, b| b.fetched_at.cmp(&a.fetched_at));

        if let Some(limit) = filter.limit {
            matching.truncate(limit);
        }

        Ok(matching)
    }

    async fn add_generated_comment(
        &self,
        new: NewGeneratedComment,
    ) -> crate::Result<GeneratedComment> {
        let comment = GeneratedComment::new(new);
        let mut comments = self.comments.write().await;
        comments.insert(comment.id.clone(), comment.clone());
        Ok(comment)
    }

    async fn comments_for_post(&self, post_id: &str) -> crate::Result<Vec<GeneratedComment>> {
        let comments = self.comments.read().await;
        Ok(comments
            .values()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn mark_comment_used(&self, id: &str) -> crate::Result<()> {
        let mut comments = self.comments.write().await;
        if let Some(comment) = comments.get_mut(id) {
            comment.is_used = true;
            comment.used_at = Some(Utc::now());
        } else {
            debug!("Generated comment {} not found, nothing to mark", id);
        }
        Ok(())
    }

    async fn stats(&self) -> crate::Result<DashboardStats> {
        let today = Utc::now()
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|t| t.and_utc())
            .unwrap_or_else(Utc::now);

        let posts = self.posts.read().await;
        let posts_today = posts.values().filter(|p| p.fetched_at >= today).count();
        drop(posts);

        let comments = self.comments.read().await;
        let comments_generated = comments
            .values()
            .filter(|c| c.generated_at >= today)
            .count();
        drop(comments);

        let items = self.items.read().await;
        let queue_items = items
            .values()
            .filter(|i| i.status == ItemStatus::Pending)
            .count();
        let completed = items
            .values()
            .filter(|i| i.status == ItemStatus::Completed)
            .count();
        let failed = items
            .values()
            .filter(|i| i.status == ItemStatus::Failed)
            .count();

        let total_processed = completed + failed;
        let success_rate = if total_processed > 0 {
            let rate = completed as f64 / total_processed as f64 * 100.0;
            (rate * 10.0).round() / 10.0
        } else {
            0.0
        };

        Ok(DashboardStats {
            posts_today,
            comments_generated,
            queue_items,
            success_rate,
        })
    }
}
