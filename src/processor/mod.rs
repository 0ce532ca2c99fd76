//! Queue processing and batch execution
//!
//! The processor pulls due pending items from the store, executes them
//! against the publisher one at a time, and records the outcome on each
//! item. Failures are isolated per item: one bad submission never aborts
//! the rest of the batch.

use crate::config::RedditCredentials;
use crate::item::{ItemKind, ItemStatus, QueueItem};
use crate::publisher::Publisher;
use crate::store::{ItemPatch, Store};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Default maximum number of items considered per pass
pub const DEFAULT_BATCH_LIMIT: usize = 10;

/// Executes batches of due queue items against a publisher
pub struct QueueProcessor {
    store: Arc<dyn Store>,
    publisher: Arc<dyn Publisher>,
    batch_limit: usize,
}

impl QueueProcessor {
    /// Create a processor over the given store and publisher
    pub fn new(store: Arc<dyn Store>, publisher: Arc<dyn Publisher>) -> Self {
        Self {
            store,
            publisher,
            batch_limit: DEFAULT_BATCH_LIMIT,
        }
    }

    /// Override the default batch limit (chainable)
    pub fn with_batch_limit(mut self, batch_limit: usize) -> Self {
        self.batch_limit = batch_limit;
        self
    }

    /// Execute one batch pass and return how many items completed
    ///
    /// Pulls up to `limit` pending items (oldest first), skips items whose
    /// scheduled time has not arrived, and executes the rest sequentially.
    /// A per-item failure is recorded on the item and swallowed; only an
    /// invalid credential bundle or a selection-phase store failure aborts
    /// the whole pass.
    pub async fn process_batch(
        &self,
        credentials: &RedditCredentials,
        limit: Option<usize>,
    ) -> crate::Result<usize> {
        credentials.validate()?;

        let pending = self
            .store
            .list_pending(limit.unwrap_or(self.batch_limit))
            .await?;
        let mut processed = 0;

        for item in pending {
            if !item.is_due() {
                debug!("Queue item {} not due yet, leaving pending", item.id);
                continue;
            }

            // Claim is the concurrency guard: a second pass racing on the
            // same item loses the compare-and-swap and skips it.
            let claimed = match self.store.claim_item(&item.id).await {
                Ok(Some(claimed)) => claimed,
                Ok(None) => {
                    debug!("Queue item {} already taken, skipping", item.id);
                    continue;
                }
                Err(e) => {
                    error!("Error claiming queue item {}: {}", item.id, e);
                    self.record_failure(&item.id, &e.to_string()).await;
                    continue;
                }
            };

            match self.dispatch(&claimed, credentials).await {
                Ok(()) => match self.complete(&claimed.id).await {
                    Ok(()) => processed += 1,
                    Err(e) => {
                        error!("Error finishing queue item {}: {}", claimed.id, e);
                        self.record_failure(&claimed.id, &e.to_string()).await;
                    }
                },
                Err(e) => {
                    error!("Error processing queue item {}: {}", claimed.id, e);
                    self.record_failure(&claimed.id, &e.to_string()).await;
                }
            }
        }

        Ok(processed)
    }

    /// Perform the remote call for one claimed item
    ///
    /// An item missing the fields its kind requires makes no remote call
    /// and reports success, matching the behavior the dashboard has always
    /// had; callers wanting stricter handling must validate at enqueue
    /// time.
    async fn dispatch(
        &self,
        item: &QueueItem,
        credentials: &RedditCredentials,
    ) -> crate::Result<()> {
        match item.kind {
            ItemKind::Post => {
                let title = item.title.as_deref().unwrap_or_default();
                if !title.is_empty() && !item.content.is_empty() {
                    let subreddit = item.subreddit.trim_start_matches("r/");
                    let post_url = self
                        .publisher
                        .submit_post(subreddit, title, &item.content, credentials)
                        .await?;
                    info!("Queue item {} posted successfully: {}", item.id, post_url);
                }
                Ok(())
            }
            ItemKind::Comment => {
                let target = item.target_post_id.as_deref().unwrap_or_default();
                if !target.is_empty() && !item.content.is_empty() {
                    self.publisher
                        .submit_comment(target, &item.content, credentials)
                        .await?;
                }
                Ok(())
            }
        }
    }

    async fn complete(&self, id: &str) -> crate::Result<()> {
        self.store
            .update_item(
                id,
                ItemPatch {
                    status: Some(ItemStatus::Completed),
                    processed_at: Some(Utc::now()),
                    ..Default::default()
                },
            )
            .await?;
        Ok(())
    }

    /// Record a per-item failure; a store error here is logged and dropped
    async fn record_failure(&self, id: &str, message: &str) {
        let patch = ItemPatch {
            status: Some(ItemStatus::Failed),
            error_message: Some(message.to_string()),
            processed_at: Some(Utc::now()),
            ..Default::default()
        };
        if let Err(e) = self.store.update_item(id, patch).await {
            error!("Failed to record failure for queue item {}: {}", id, e);
        }
    }
}
