//! Reddit Autopilot binary entry point

use reddit_autopilot_rs::ai::GeminiClient;
use reddit_autopilot_rs::config::gemini_api_key;
use reddit_autopilot_rs::post::NewGeneratedComment;
use reddit_autopilot_rs::publisher::reddit::RedditClient;
use reddit_autopilot_rs::publisher::Publisher;
use reddit_autopilot_rs::store::{PostFilter, Store};
use reddit_autopilot_rs::{
    AutomationScheduler, MemoryStore, NewQueueItem, QueueProcessor, RedditCredentials, Settings,
};
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Trending posts drafted into comments per startup sweep
const DRAFT_LIMIT: usize = 3;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    info!("Starting Reddit Autopilot");

    // Load configuration
    let settings = Settings::load()?;
    settings.validate()?;
    let credentials = RedditCredentials::from_env()?;

    info!(
        "Initialized for {} subreddits, automation interval {} minutes",
        settings.subreddits.len(),
        settings.automation_interval_minutes
    );

    // Wire the store, clients, and processor
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let reddit = Arc::new(RedditClient::new(settings.request_timeout())?);
    let gemini = match gemini_api_key() {
        Ok(key) => Some(
            GeminiClient::new(key, settings.request_timeout())?
                .with_models(&settings.comment_model, &settings.post_model),
        ),
        Err(e) => {
            warn!("{e}; comment drafting disabled");
            None
        }
    };
    let processor = Arc::new(
        QueueProcessor::new(
            Arc::clone(&store),
            Arc::clone(&reddit) as Arc<dyn Publisher>,
        )
        .with_batch_limit(settings.batch_limit),
    );

    // Seed the queue from a trending sweep before the first pass
    if let Err(e) =
        seed_queue_from_trending(store.as_ref(), &reddit, gemini.as_ref(), &settings, &credentials)
            .await
    {
        warn!("Trending sweep failed: {}", e);
    }

    if settings.automation_enabled {
        let scheduler = AutomationScheduler::new(
            Arc::clone(&processor),
            settings.automation_interval(),
        );
        let handle = scheduler.start(credentials);

        tokio::signal::ctrl_c().await?;
        info!("Shutting down");
        handle.stop().await;
    } else {
        let count = processor.process_batch(&credentials, None).await?;
        info!("Processed {} queue items", count);
    }

    let stats = store.stats().await?;
    info!(
        "Stats: {} posts today, {} comments generated, {} queued, {}% success",
        stats.posts_today, stats.comments_generated, stats.queue_items, stats.success_rate
    );

    Ok(())
}

/// Fetch trending posts, store the new ones, and enqueue drafted comments
/// for the top trending posts
async fn seed_queue_from_trending(
    store: &dyn Store,
    reddit: &RedditClient,
    gemini: Option<&GeminiClient>,
    settings: &Settings,
    credentials: &RedditCredentials,
) -> reddit_autopilot_rs::Result<()> {
    let fetched = reddit
        .fetch_trending(&settings.subreddits, credentials)
        .await?;

    let mut new_count = 0;
    for post in fetched {
        if store.get_post_by_reddit_id(&post.reddit_id).await?.is_none() {
            store.create_post(post).await?;
            new_count += 1;
        }
    }
    info!("Fetched {} new posts", new_count);

    let Some(gemini) = gemini else {
        return Ok(());
    };

    let posts = store.list_posts(PostFilter::default()).await?;
    for post in posts.into_iter().filter(|p| p.is_trending).take(DRAFT_LIMIT) {
        let content = post.content.clone().unwrap_or_default();
        match gemini.generate_comment(&post.title, &content).await {
            Ok(comment) => {
                let draft = store
                    .add_generated_comment(NewGeneratedComment {
                        post_id: post.id.clone(),
                        content: comment.clone(),
                        ai_model: settings.comment_model.clone(),
                    })
                    .await?;
                store
                    .create_item(NewQueueItem::comment(
                        post.subreddit.clone(),
                        post.reddit_id.clone(),
                        comment,
                    ))
                    .await?;
                store.mark_comment_used(&draft.id).await?;
                info!("Enqueued drafted comment for post {}", post.reddit_id);
            }
            Err(e) => {
                warn!("Error generating comment for post {}: {}", post.reddit_id, e);
            }
        }
    }

    Ok(())
}
