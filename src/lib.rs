//! Reddit Autopilot RS - a Reddit automation dashboard core
//!
//! This library ingests trending posts from Reddit, drafts reply comments
//! with Google Gemini, and schedules post/comment submissions through a
//! work queue with per-item failure isolation.

/// AI drafting of comments and posts via Gemini
pub mod ai;
/// Configuration and credential management
pub mod config;
/// Queue item definitions and lifecycle
pub mod item;
/// Fetched Reddit content and generated comment models
pub mod post;
/// Queue processing and batch execution logic
pub mod processor;
/// External publisher trait and Reddit implementation
pub mod publisher;
/// Periodic automation trigger
pub mod scheduler;
/// Work-item store trait and implementations
pub mod store;

pub use config::{RedditCredentials, Settings};
pub use item::{ItemKind, ItemStatus, NewQueueItem, Priority, QueueItem};
pub use processor::QueueProcessor;
pub use scheduler::{AutomationHandle, AutomationScheduler};
pub use store::memory::MemoryStore;

use thiserror::Error;

/// Result type for autopilot operations
pub type Result<T> = std::result::Result<T, AutopilotError>;

/// Error types for the automation system
#[derive(Error, Debug)]
pub enum AutopilotError {
    /// Credentials or settings are missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// The external publisher rejected or failed a submit call
    #[error("Publish error: {0}")]
    Publish(String),

    /// AI generation failed or returned an unusable response
    #[error("Generation error: {0}")]
    Generation(String),

    /// The store failed to read or write
    #[error("Storage error: {0}")]
    Store(String),

    /// Queue item with the specified ID was not found
    #[error("Queue item not found: {0}")]
    ItemNotFound(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_types() {
        let err = AutopilotError::Config("missing credentials".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing credentials");

        let err = AutopilotError::ItemNotFound("test-id".to_string());
        assert_eq!(err.to_string(), "Queue item not found: test-id");
    }
}
