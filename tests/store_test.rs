use reddit_autopilot_rs::item::{ItemKind, ItemStatus, NewQueueItem};
use reddit_autopilot_rs::post::{NewGeneratedComment, NewRedditPost, PostType};
use reddit_autopilot_rs::store::{ItemFilter, ItemPatch, PostFilter, Store};
use reddit_autopilot_rs::MemoryStore;
use tokio::time::{sleep, Duration};

fn sample_post(reddit_id: &str, subreddit: &str, post_type: PostType) -> NewRedditPost {
    NewRedditPost {
        reddit_id: reddit_id.to_string(),
        title: format!("Post {reddit_id}"),
        content: Some("body".to_string()),
        subreddit: subreddit.to_string(),
        author: "tester".to_string(),
        upvotes: 500,
        comments: 12,
        awards: 0,
        url: None,
        post_type,
        is_trending: false,
    }
}

#[tokio::test]
async fn test_create_and_get_item() {
    let store = MemoryStore::new();
    let item = store
        .create_item(NewQueueItem::comment("r/rust", "abc", "hello"))
        .await
        .unwrap();

    let retrieved = store.get_item(&item.id).await.unwrap();
    assert_eq!(retrieved.id, item.id);
    assert_eq!(retrieved.status, ItemStatus::Pending);

    let result = store.get_item("missing").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_update_item_patch() {
    let store = MemoryStore::new();
    let item = store
        .create_item(NewQueueItem::post("r/rust", "title", "body"))
        .await
        .unwrap();

    let updated = store
        .update_item(
            &item.id,
            ItemPatch {
                status: Some(ItemStatus::Failed),
                error_message: Some("boom".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, ItemStatus::Failed);
    assert_eq!(updated.error_message.as_deref(), Some("boom"));
    // Untouched fields survive a partial update
    assert_eq!(updated.title.as_deref(), Some("title"));
    assert_eq!(updated.content, "body");
    assert!(updated.updated_at >= item.updated_at);

    let result = store.update_item("missing", ItemPatch::default()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_delete_item() {
    let store = MemoryStore::new();
    let item = store
        .create_item(NewQueueItem::comment("r/rust", "abc", "hello"))
        .await
        .unwrap();

    store.delete_item(&item.id).await.unwrap();
    assert!(store.get_item(&item.id).await.is_err());
    assert!(store.delete_item(&item.id).await.is_err());
}

#[tokio::test]
async fn test_list_items_filters() {
    let store = MemoryStore::new();
    let comment = store
        .create_item(NewQueueItem::comment("r/rust", "abc", "hello"))
        .await
        .unwrap();
    let post = store
        .create_item(NewQueueItem::post("r/rust", "title", "body"))
        .await
        .unwrap();
    store
        .update_item(
            &post.id,
            ItemPatch {
                status: Some(ItemStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let pending = store
        .list_items(ItemFilter {
            status: Some(ItemStatus::Pending),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, comment.id);

    let posts = store
        .list_items(ItemFilter {
            kind: Some(ItemKind::Post),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, post.id);

    let all = store.list_items(ItemFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_list_pending_fifo_order_and_limit() {
    let store = MemoryStore::new();
    let mut ids = Vec::new();

    for i in 0..5 {
        let item = store
            .create_item(NewQueueItem::comment("r/rust", format!("post_{i}"), "hello"))
            .await
            .unwrap();
        ids.push(item.id);
        sleep(Duration::from_millis(2)).await;
    }

    let pending = store.list_pending(10).await.unwrap();
    let listed: Vec<String> = pending.iter().map(|i| i.id.clone()).collect();
    assert_eq!(listed, ids);

    let capped = store.list_pending(3).await.unwrap();
    assert_eq!(capped.len(), 3);
    assert_eq!(capped[0].id, ids[0]);
}

#[tokio::test]
async fn test_posts_dedup_lookup_and_listing() {
    let store = MemoryStore::new();
    store
        .create_post(sample_post("aaa", "r/rust", PostType::Hot))
        .await
        .unwrap();
    sleep(Duration::from_millis(2)).await;
    store
        .create_post(sample_post("bbb", "r/python", PostType::Rising))
        .await
        .unwrap();

    let found = store.get_post_by_reddit_id("aaa").await.unwrap();
    let found = found.expect("post aaa should be stored");
    assert!(store.get_post_by_reddit_id("zzz").await.unwrap().is_none());

    let by_id = store.get_post(&found.id).await.unwrap();
    assert_eq!(by_id.reddit_id, "aaa");
    assert!(store.get_post("missing").await.is_err());

    // Newest first
    let all = store.list_posts(PostFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].reddit_id, "bbb");

    let rust_only = store
        .list_posts(PostFilter {
            subreddit: Some("r/rust".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(rust_only.len(), 1);

    let rising_only = store
        .list_posts(PostFilter {
            post_type: Some(PostType::Rising),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(rising_only.len(), 1);
    assert_eq!(rising_only[0].reddit_id, "bbb");

    let capped = store
        .list_posts(PostFilter {
            limit: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(capped.len(), 1);
}

#[tokio::test]
async fn test_generated_comments() {
    let store = MemoryStore::new();
    let post = store
        .create_post(sample_post("aaa", "r/rust", PostType::Hot))
        .await
        .unwrap();

    let comment = store
        .add_generated_comment(NewGeneratedComment {
            post_id: post.id.clone(),
            content: "Interesting take, thanks for sharing the details".to_string(),
            ai_model: "gemini-2.5-flash".to_string(),
        })
        .await
        .unwrap();
    assert!(!comment.is_used);

    let drafts = store.comments_for_post(&post.id).await.unwrap();
    assert_eq!(drafts.len(), 1);

    store.mark_comment_used(&comment.id).await.unwrap();
    let drafts = store.comments_for_post(&post.id).await.unwrap();
    assert!(drafts[0].is_used);
    assert!(drafts[0].used_at.is_some());

    // Marking a missing draft is a no-op
    store.mark_comment_used("missing").await.unwrap();
}
