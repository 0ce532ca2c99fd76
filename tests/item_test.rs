use chrono::{Duration, Utc};
use reddit_autopilot_rs::item::{ItemKind, ItemStatus, NewQueueItem, Priority, QueueItem};

#[test]
fn test_item_creation() {
    let item = QueueItem::new(NewQueueItem::comment("r/rust", "abc123", "nice work"));

    assert_eq!(item.status, ItemStatus::Pending);
    assert_eq!(item.kind, ItemKind::Comment);
    assert_eq!(item.priority, Priority::Normal);
    assert_eq!(item.target_post_id.as_deref(), Some("abc123"));
    assert!(item.title.is_none());
    assert!(item.processed_at.is_none());
    assert!(item.error_message.is_none());
    assert!(!item.id.is_empty());
}

#[test]
fn test_post_builder() {
    let new = NewQueueItem::post("r/rust", "A title", "A body")
        .with_priority(Priority::Urgent)
        .with_metadata(serde_json::json!({"source": "manual"}));

    assert_eq!(new.kind, ItemKind::Post);
    assert_eq!(new.title.as_deref(), Some("A title"));
    assert_eq!(new.priority, Priority::Urgent);
    assert!(new.target_post_id.is_none());
    assert!(new.metadata.is_some());
}

#[test]
fn test_item_lifecycle() {
    let mut item = QueueItem::new(NewQueueItem::post("r/rust", "title", "body"));

    item.mark_processing();
    assert_eq!(item.status, ItemStatus::Processing);
    assert!(item.processed_at.is_some());

    item.mark_completed();
    assert_eq!(item.status, ItemStatus::Completed);
    assert!(item.error_message.is_none());
}

#[test]
fn test_mark_failed_records_error() {
    let mut item = QueueItem::new(NewQueueItem::comment("r/rust", "abc", "text"));

    item.mark_processing();
    item.mark_failed("Publish error: 403 Forbidden".to_string());

    assert_eq!(item.status, ItemStatus::Failed);
    assert_eq!(
        item.error_message.as_deref(),
        Some("Publish error: 403 Forbidden")
    );
    assert!(item.processed_at.is_some());
}

#[test]
fn test_is_due() {
    let unscheduled = QueueItem::new(NewQueueItem::comment("r/rust", "abc", "text"));
    assert!(unscheduled.is_due());

    let past = QueueItem::new(
        NewQueueItem::comment("r/rust", "abc", "text").schedule_at(Utc::now() - Duration::hours(1)),
    );
    assert!(past.is_due());

    let future = QueueItem::new(
        NewQueueItem::comment("r/rust", "abc", "text").schedule_at(Utc::now() + Duration::hours(1)),
    );
    assert!(!future.is_due());
}

#[test]
fn test_item_age() {
    let item = QueueItem::new(NewQueueItem::post("r/rust", "title", "body"));
    assert!(item.age_seconds() >= 0);
}
