//! External publisher boundary
//!
//! The queue processor performs its side effects through this trait; the
//! production implementation talks to Reddit, tests substitute a fake.

/// Reddit client
pub mod reddit;

use crate::config::RedditCredentials;
use async_trait::async_trait;

/// Trait for components that submit content on behalf of a user
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Submit a new self post and return its locator URL
    async fn submit_post(
        &self,
        subreddit: &str,
        title: &str,
        content: &str,
        credentials: &RedditCredentials,
    ) -> crate::Result<String>;

    /// Submit a comment replying to an existing post
    async fn submit_comment(
        &self,
        target_post_id: &str,
        content: &str,
        credentials: &RedditCredentials,
    ) -> crate::Result<()>;
}
