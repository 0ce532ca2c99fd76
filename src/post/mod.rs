use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which listing a fetched post came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    /// From the subreddit's hot listing
    Hot,
    /// From the subreddit's rising listing
    Rising,
}

/// A Reddit post captured by the trending sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditPost {
    /// Unique local identifier
    pub id: String,

    /// Reddit's own id for the post
    pub reddit_id: String,

    /// Post title
    pub title: String,

    /// Self-text body, if any
    pub content: Option<String>,

    /// Subreddit the post belongs to, `r/`-prefixed
    pub subreddit: String,

    /// Post author
    pub author: String,

    /// Upvote count at fetch time
    pub upvotes: i64,

    /// Comment count at fetch time
    pub comments: i64,

    /// Award count at fetch time
    pub awards: i64,

    /// Link to the post
    pub url: Option<String>,

    /// Listing the post was captured from
    pub post_type: PostType,

    /// Whether the post cleared the trending threshold
    pub is_trending: bool,

    /// Time the post was captured
    pub fetched_at: DateTime<Utc>,

    /// Local record creation time
    pub created_at: DateTime<Utc>,
}

/// Insert shape for a fetched Reddit post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRedditPost {
    /// Reddit's own id for the post
    pub reddit_id: String,
    /// Post title
    pub title: String,
    /// Self-text body, if any
    pub content: Option<String>,
    /// Subreddit the post belongs to, `r/`-prefixed
    pub subreddit: String,
    /// Post author
    pub author: String,
    /// Upvote count at fetch time
    pub upvotes: i64,
    /// Comment count at fetch time
    pub comments: i64,
    /// Award count at fetch time
    pub awards: i64,
    /// Link to the post
    pub url: Option<String>,
    /// Listing the post was captured from
    pub post_type: PostType,
    /// Whether the post cleared the trending threshold
    pub is_trending: bool,
}

impl RedditPost {
    /// Create a stored post from an insert shape
    pub fn new(new: NewRedditPost) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            reddit_id: new.reddit_id,
            title: new.title,
            content: new.content,
            subreddit: new.subreddit,
            author: new.author,
            upvotes: new.upvotes,
            comments: new.comments,
            awards: new.awards,
            url: new.url,
            post_type: new.post_type,
            is_trending: new.is_trending,
            fetched_at: now,
            created_at: now,
        }
    }
}

/// An AI-drafted comment attached to a fetched post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedComment {
    /// Unique comment identifier
    pub id: String,

    /// Local id of the post the comment was drafted for
    pub post_id: String,

    /// Drafted comment body
    pub content: String,

    /// Model that produced the draft
    pub ai_model: String,

    /// Generation timestamp
    pub generated_at: DateTime<Utc>,

    /// Whether the draft has been enqueued for posting
    pub is_used: bool,

    /// Time the draft was enqueued
    pub used_at: Option<DateTime<Utc>>,
}

/// Insert shape for a generated comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGeneratedComment {
    /// Local id of the post the comment was drafted for
    pub post_id: String,
    /// Drafted comment body
    pub content: String,
    /// Model that produced the draft
    pub ai_model: String,
}

impl GeneratedComment {
    /// Create a stored comment from an insert shape
    pub fn new(new: NewGeneratedComment) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            post_id: new.post_id,
            content: new.content,
            ai_model: new.ai_model,
            generated_at: Utc::now(),
            is_used: false,
            used_at: None,
        }
    }
}
