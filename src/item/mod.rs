use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Priority levels for queue items
///
/// Advisory only: stored and surfaced to callers, but not consulted when
/// selecting a batch. Selection stays FIFO on creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Normal priority
    #[default]
    Normal,
    /// High priority
    High,
    /// Urgent priority
    Urgent,
}

/// Kind of action a queue item performs when processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Submit a new post to a subreddit
    Post,
    /// Submit a comment replying to an existing post
    Comment,
}

/// Status of a queue item in its lifecycle
///
/// Transitions are monotonic per attempt: Pending -> Processing ->
/// {Completed | Failed}. A Failed item is never retried automatically;
/// it returns to Pending only through an explicit re-enqueue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Item is waiting to be processed
    Pending,
    /// Item has been claimed by a processing pass
    Processing,
    /// Item was submitted successfully
    Completed,
    /// Item submission failed; see `error_message`
    Failed,
}

/// Represents a scheduled publishing action in the queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueItem {
    /// Unique item identifier
    pub id: String,

    /// Kind of action (post or comment)
    pub kind: ItemKind,

    /// Post title; required for posts, ignored for comments
    pub title: Option<String>,

    /// Body text of the post or comment
    pub content: String,

    /// Destination subreddit
    pub subreddit: String,

    /// Reddit id of the post being replied to; required for comments
    pub target_post_id: Option<String>,

    /// Advisory priority level
    pub priority: Priority,

    /// Current lifecycle status
    pub status: ItemStatus,

    /// Earliest time the item may be executed
    pub scheduled_at: Option<DateTime<Utc>>,

    /// Item creation timestamp
    pub created_at: DateTime<Utc>,

    /// Item last updated timestamp
    pub updated_at: DateTime<Utc>,

    /// Time the item was last picked up or finished by a pass
    pub processed_at: Option<DateTime<Utc>>,

    /// Failure description; set only when the item failed
    pub error_message: Option<String>,

    /// Opaque auxiliary payload, not interpreted by the processor
    pub metadata: Option<serde_json::Value>,
}

/// Insert shape for a new queue item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQueueItem {
    /// Kind of action (post or comment)
    pub kind: ItemKind,

    /// Post title, for posts
    pub title: Option<String>,

    /// Body text
    pub content: String,

    /// Destination subreddit
    pub subreddit: String,

    /// Target post id, for comments
    pub target_post_id: Option<String>,

    /// Advisory priority level
    pub priority: Priority,

    /// Earliest execution time
    pub scheduled_at: Option<DateTime<Utc>>,

    /// Opaque auxiliary payload
    pub metadata: Option<serde_json::Value>,
}

impl NewQueueItem {
    /// Create a new post submission
    pub fn post(
        subreddit: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            kind: ItemKind::Post,
            title: Some(title.into()),
            content: content.into(),
            subreddit: subreddit.into(),
            target_post_id: None,
            priority: Priority::default(),
            scheduled_at: None,
            metadata: None,
        }
    }

    /// Create a new comment submission replying to `target_post_id`
    pub fn comment(
        subreddit: impl Into<String>,
        target_post_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            kind: ItemKind::Comment,
            title: None,
            content: content.into(),
            subreddit: subreddit.into(),
            target_post_id: Some(target_post_id.into()),
            priority: Priority::default(),
            scheduled_at: None,
            metadata: None,
        }
    }

    /// Set the priority (chainable)
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Delay execution until the given time (chainable)
    pub fn schedule_at(mut self, at: DateTime<Utc>) -> Self {
        self.scheduled_at = Some(at);
        self
    }

    /// Attach auxiliary metadata (chainable)
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

impl QueueItem {
    /// Create a pending queue item from an insert shape
    pub fn new(new: NewQueueItem) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            kind: new.kind,
            title: new.title,
            content: new.content,
            subreddit: new.subreddit,
            target_post_id: new.target_post_id,
            priority: new.priority,
            status: ItemStatus::Pending,
            scheduled_at: new.scheduled_at,
            created_at: now,
            updated_at: now,
            processed_at: None,
            error_message: None,
            metadata: new.metadata,
        }
    }

    /// Mark the item as claimed by a processing pass
    pub fn mark_processing(&mut self) {
        self.status = ItemStatus::Processing;
        self.processed_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Mark the item as submitted successfully
    pub fn mark_completed(&mut self) {
        self.status = ItemStatus::Completed;
        self.processed_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Mark the item as failed with a human-readable description
    pub fn mark_failed(&mut self, error: String) {
        self.status = ItemStatus::Failed;
        self.error_message = Some(error);
        self.processed_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Check whether the item is eligible for execution now
    ///
    /// An item with `scheduled_at` strictly in the future is not due and
    /// must be left pending for a later pass.
    pub fn is_due(&self) -> bool {
        match self.scheduled_at {
            Some(at) => at <= Utc::now(),
            None => true,
        }
    }

    /// Get item age in seconds
    pub fn age_seconds(&self) -> i64 {
        (Utc::now() - self.created_at).num_seconds()
    }
}
