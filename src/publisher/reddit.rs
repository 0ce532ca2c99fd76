//! Reddit API client
//!
//! Thin client over Reddit's OAuth2 API: trending-post ingestion plus the
//! submit operations behind the [`Publisher`] trait.

use crate::config::RedditCredentials;
use crate::post::{NewRedditPost, PostType};
use crate::publisher::Publisher;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const API_BASE: &str = "https://oauth.reddit.com";
const USER_AGENT: &str = "reddit-autopilot-rs/0.1";

/// How many hot posts to keep per subreddit sweep
const HOT_KEEP: usize = 10;
/// How many rising posts to keep per subreddit sweep
const RISING_KEEP: usize = 5;
/// Minimum upvotes for a hot post to count as engaging
const HOT_MIN_UPS: i64 = 100;
/// Minimum upvotes for a rising post to count as engaging
const RISING_MIN_UPS: i64 = 50;
/// Upvotes past which a hot post is flagged trending
const TRENDING_UPS: i64 = 1000;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: RedditPostData,
}

/// A post as returned by Reddit's listing endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct RedditPostData {
    /// Reddit's id for the post
    pub id: String,
    /// Post title
    pub title: String,
    /// Self-text body; empty for link posts
    #[serde(default)]
    pub selftext: String,
    /// Post author
    pub author: String,
    /// Upvote count
    #[serde(default)]
    pub ups: i64,
    /// Comment count
    #[serde(default)]
    pub num_comments: i64,
    /// Award count
    #[serde(default)]
    pub total_awards_received: i64,
    /// Link target
    pub url: Option<String>,
}

impl RedditPostData {
    fn to_new_post(&self, subreddit: &str, post_type: PostType, is_trending: bool) -> NewRedditPost {
        NewRedditPost {
            reddit_id: self.id.clone(),
            title: self.title.clone(),
            content: if self.selftext.is_empty() {
                None
            } else {
                Some(self.selftext.clone())
            },
            subreddit: format!("r/{subreddit}"),
            author: self.author.clone(),
            upvotes: self.ups,
            comments: self.num_comments,
            awards: self.total_awards_received,
            url: self.url.clone(),
            post_type,
            is_trending,
        }
    }
}

/// Select the engaging posts from one subreddit's hot and rising listings
///
/// Hot posts need more than 100 upvotes and are flagged trending past
/// 1000; rising posts need more than 50. Only the top of each listing is
/// considered.
pub fn collect_candidates(
    subreddit: &str,
    hot: &[RedditPostData],
    rising: &[RedditPostData],
) -> Vec<NewRedditPost> {
    let mut posts = Vec::new();

    for post in hot.iter().take(HOT_KEEP) {
        if post.ups > HOT_MIN_UPS {
            posts.push(post.to_new_post(subreddit, PostType::Hot, post.ups > TRENDING_UPS));
        }
    }

    for post in rising.iter().take(RISING_KEEP) {
        if post.ups > RISING_MIN_UPS {
            posts.push(post.to_new_post(subreddit, PostType::Rising, false));
        }
    }

    posts
}

/// Client for Reddit's OAuth2 API
pub struct RedditClient {
    http: reqwest::Client,
}

impl RedditClient {
    /// Create a client with the given network timeout
    pub fn new(timeout: Duration) -> crate::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                crate::AutopilotError::Config(format!("Failed to build HTTP client: {e}"))
            })?;
        Ok(Self { http })
    }

    /// Obtain an OAuth2 access token
    ///
    /// Uses the password grant when a username and password are present,
    /// the client-credentials grant otherwise.
    async fn access_token(&self, credentials: &RedditCredentials) -> crate::Result<String> {
        let mut params = vec![];
        match (&credentials.username, &credentials.password) {
            (Some(username), Some(password)) => {
                params.push(("grant_type", "password".to_string()));
                params.push(("username", username.clone()));
                params.push(("password", password.expose_secret().to_string()));
            }
            _ => params.push(("grant_type", "client_credentials".to_string())),
        }

        let response = self
            .http
            .post(TOKEN_URL)
            .basic_auth(
                &credentials.client_id,
                Some(credentials.client_secret.expose_secret()),
            )
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                crate::AutopilotError::Publish(format!("Failed to reach Reddit token endpoint: {e}"))
            })?;

        if !response.status().is_success() {
            return Err(crate::AutopilotError::Publish(format!(
                "Failed to get Reddit access token: {}",
                response.status()
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            crate::AutopilotError::Publish(format!("Invalid Reddit token response: {e}"))
        })?;
        Ok(token.access_token)
    }

    async fn fetch_listing(
        &self,
        subreddit: &str,
        sort: &str,
        token: &str,
    ) -> crate::Result<Vec<RedditPostData>> {
        let url = format!("{API_BASE}/r/{subreddit}/{sort}?limit=25");
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                crate::AutopilotError::Publish(format!(
                    "Failed to fetch posts from r/{subreddit}: {e}"
                ))
            })?;

        if !response.status().is_success() {
            return Err(crate::AutopilotError::Publish(format!(
                "Failed to fetch posts from r/{subreddit}: {}",
                response.status()
            )));
        }

        let listing: Listing = response.json().await.map_err(|e| {
            crate::AutopilotError::Publish(format!("Invalid listing from r/{subreddit}: {e}"))
        })?;
        Ok(listing.data.children.into_iter().map(|c| c.data).collect())
    }

    /// Sweep the hot and rising listings of each subreddit for engaging posts
    ///
    /// A failure on one subreddit is logged and skipped; only a token
    /// failure aborts the whole sweep.
    pub async fn fetch_trending(
        &self,
        subreddits: &[String],
        credentials: &RedditCredentials,
    ) -> crate::Result<Vec<NewRedditPost>> {
        let token = self.access_token(credentials).await?;
        let mut all_posts = Vec::new();

        for subreddit in subreddits {
            let hot = self.fetch_listing(subreddit, "hot", &token).await;
            let rising = self.fetch_listing(subreddit, "rising", &token).await;

            match (hot, rising) {
                (Ok(hot), Ok(rising)) => {
                    all_posts.extend(collect_candidates(subreddit, &hot, &rising));
                }
                (Err(e), _) | (_, Err(e)) => {
                    warn!("Error fetching posts from r/{}: {}", subreddit, e);
                }
            }
        }

        Ok(all_posts)
    }
}

#[async_trait]
impl Publisher for RedditClient {
    async fn submit_post(
        &self,
        subreddit: &str,
        title: &str,
        content: &str,
        credentials: &RedditCredentials,
    ) -> crate::Result<String> {
        let token = self.access_token(credentials).await?;

        let params = [
            ("sr", subreddit),
            ("kind", "self"),
            ("title", title),
            ("text", content),
        ];
        let response = self
            .http
            .post(format!("{API_BASE}/api/submit"))
            .bearer_auth(&token)
            .form(&params)
            .send()
            .await
            .map_err(|e| crate::AutopilotError::Publish(format!("Failed to create post: {e}")))?;

        if !response.status().is_success() {
            return Err(crate::AutopilotError::Publish(format!(
                "Failed to create post: {}",
                response.status()
            )));
        }

        let result: serde_json::Value = response.json().await.map_err(|e| {
            crate::AutopilotError::Publish(format!("Invalid submit response: {e}"))
        })?;
        let post_url = result
            .pointer("/json/data/url")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("https://reddit.com/r/{subreddit}"));

        info!("Successfully posted to Reddit: {}", post_url);
        Ok(post_url)
    }

    async fn submit_comment(
        &self,
        target_post_id: &str,
        content: &str,
        credentials: &RedditCredentials,
    ) -> crate::Result<()> {
        let token = self.access_token(credentials).await?;

        let thing_id = format!("t3_{target_post_id}");
        let params = [("thing_id", thing_id.as_str()), ("text", content)];
        let response = self
            .http
            .post(format!("{API_BASE}/api/comment"))
            .bearer_auth(&token)
            .form(&params)
            .send()
            .await
            .map_err(|e| crate::AutopilotError::Publish(format!("Failed to post comment: {e}")))?;

        if !response.status().is_success() {
            return Err(crate::AutopilotError::Publish(format!(
                "Failed to post comment: {}",
                response.status()
            )));
        }

        Ok(())
    }
}
