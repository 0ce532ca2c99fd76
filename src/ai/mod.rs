//! AI drafting via Google Gemini
//!
//! Drafts reply comments and full posts against the `generateContent`
//! endpoint. Comment drafts are sanitized and clamped to the 10-20 word
//! window before they reach the queue.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Fast model used for short comment drafts
pub const DEFAULT_COMMENT_MODEL: &str = "gemini-2.5-flash";
/// Stronger model used for full post drafts and analysis
pub const DEFAULT_POST_MODEL: &str = "gemini-2.5-pro";

/// Word-count window enforced on comment drafts
const MIN_COMMENT_WORDS: usize = 10;
const MAX_COMMENT_WORDS: usize = 20;
/// Words kept when a draft falls outside the window
const CLAMP_COMMENT_WORDS: usize = 15;

const FALLBACK_COMMENT: &str = "Great post! Thanks for sharing this interesting content.";

/// An AI-drafted post
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DraftPost {
    /// Drafted title
    pub title: String,
    /// Drafted body
    pub content: String,
}

/// Overall sentiment of an analyzed post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Positive tone
    Positive,
    /// Negative tone
    Negative,
    /// Neutral tone
    Neutral,
}

/// Sentiment analysis of a post, with a commenting recommendation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentReport {
    /// Overall tone of the post
    pub sentiment: Sentiment,
    /// Model confidence in the range 0-1
    pub confidence: f64,
    /// Whether commenting on the post is advisable
    pub should_comment: bool,
}

/// Strip quoting and markdown emphasis from a comment draft and enforce
/// the word window
///
/// Drafts outside 10-20 words are clamped to their first 15 words; an
/// empty draft falls back to a canned comment.
pub fn sanitize_comment(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| !matches!(c, '"' | '\u{201c}' | '\u{201d}' | '\'' | '\u{2018}' | '\u{2019}'))
        .collect();
    let stripped = stripped.replace("**", "").replace(['*', '_'], "");

    let words: Vec<&str> = stripped.split_whitespace().collect();
    let comment = if words.len() < MIN_COMMENT_WORDS || words.len() > MAX_COMMENT_WORDS {
        words
            .into_iter()
            .take(CLAMP_COMMENT_WORDS)
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        words.join(" ")
    };

    if comment.is_empty() {
        FALLBACK_COMMENT.to_string()
    } else {
        comment
    }
}

/// Parse a post draft out of the model's JSON response text
pub fn parse_draft(raw: &str) -> crate::Result<DraftPost> {
    if raw.trim().is_empty() {
        return Err(crate::AutopilotError::Generation(
            "empty response from model".to_string(),
        ));
    }

    let draft: DraftPost = serde_json::from_str(raw).map_err(|e| {
        crate::AutopilotError::Generation(format!("Invalid response format from AI: {e}"))
    })?;

    if draft.title.is_empty() || draft.content.is_empty() {
        return Err(crate::AutopilotError::Generation(
            "Draft is missing a title or content".to_string(),
        ));
    }

    Ok(draft)
}

/// Parse a sentiment report out of the model's JSON response text
pub fn parse_sentiment(raw: &str) -> crate::Result<SentimentReport> {
    if raw.trim().is_empty() {
        return Err(crate::AutopilotError::Generation(
            "empty response from model".to_string(),
        ));
    }

    serde_json::from_str(raw).map_err(|e| {
        crate::AutopilotError::Generation(format!("Invalid response format from AI: {e}"))
    })
}

/// Client for the Gemini `generateContent` API
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: SecretString,
    comment_model: String,
    post_model: String,
}

impl GeminiClient {
    /// Create a client with the given API key and network timeout
    pub fn new(api_key: SecretString, timeout: Duration) -> crate::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build().map_err(|e| {
            crate::AutopilotError::Config(format!("Failed to build HTTP client: {e}"))
        })?;
        Ok(Self {
            http,
            api_key,
            comment_model: DEFAULT_COMMENT_MODEL.to_string(),
            post_model: DEFAULT_POST_MODEL.to_string(),
        })
    }

    /// Override the models used for drafting (chainable)
    pub fn with_models(
        mut self,
        comment_model: impl Into<String>,
        post_model: impl Into<String>,
    ) -> Self {
        self.comment_model = comment_model.into();
        self.post_model = post_model.into();
        self
    }

    async fn generate(
        &self,
        model: &str,
        system_instruction: &str,
        prompt: &str,
        generation_config: Value,
    ) -> crate::Result<String> {
        let body = json!({
            "system_instruction": { "parts": [{ "text": system_instruction }] },
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": generation_config,
        });

        let response = self
            .http
            .post(format!("{API_BASE}/{model}:generateContent"))
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                crate::AutopilotError::Generation(format!("Gemini request failed: {e}"))
            })?;

        if !response.status().is_success() {
            return Err(crate::AutopilotError::Generation(format!(
                "Gemini request failed: {}",
                response.status()
            )));
        }

        let payload: Value = response.json().await.map_err(|e| {
            crate::AutopilotError::Generation(format!("Invalid Gemini response: {e}"))
        })?;

        extract_text(&payload).ok_or_else(|| {
            crate::AutopilotError::Generation("empty response from model".to_string())
        })
    }

    /// Draft a short reply comment for a post
    pub async fn generate_comment(&self, title: &str, content: &str) -> crate::Result<String> {
        let prompt = if content.is_empty() {
            format!("Post: {title}\n\nWrite a short 10-20 word Reddit comment. No quotes, emojis, or markdown.")
        } else {
            format!("Post: {title}\nContent: {content}\n\nWrite a short 10-20 word Reddit comment. No quotes, emojis, or markdown.")
        };

        let text = self
            .generate(
                &self.comment_model,
                "Generate concise Reddit comments. 10-20 words only.",
                &prompt,
                json!({ "maxOutputTokens": 50 }),
            )
            .await?;

        let comment = sanitize_comment(&text);
        debug!("Drafted comment ({} chars)", comment.len());
        Ok(comment)
    }

    /// Draft a full post for a subreddit about a topic
    pub async fn generate_post(&self, subreddit: &str, topic: &str) -> crate::Result<DraftPost> {
        let system_prompt = "You are a Reddit content creator who writes engaging posts for specific subreddits.\n\
            Your posts should be:\n\
            - Relevant to the subreddit topic\n\
            - Engaging and discussion-worthy\n\
            - Follow Reddit best practices\n\
            - Have compelling titles\n\
            - Provide valuable content\n\
            - Be authentic and conversational\n\n\
            Generate both a title and content for the post. Return as JSON with \"title\" and \"content\" fields.";
        let prompt = format!(
            "Create a post for r/{subreddit} about: {topic}\n\nGenerate an engaging Reddit post with title and content."
        );

        let text = self
            .generate(
                &self.post_model,
                system_prompt,
                &prompt,
                json!({
                    "responseMimeType": "application/json",
                    "responseSchema": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "content": { "type": "string" },
                        },
                        "required": ["title", "content"],
                    },
                }),
            )
            .await?;

        parse_draft(&text)
    }

    /// Analyze a post's sentiment and whether commenting is advisable
    pub async fn analyze_sentiment(
        &self,
        title: &str,
        content: &str,
    ) -> crate::Result<SentimentReport> {
        let system_prompt = "You are a sentiment analysis expert for Reddit posts.\n\
            Analyze the sentiment and determine if it's appropriate to comment.\n\
            Consider factors like:\n\
            - Overall tone (positive, negative, neutral)\n\
            - Engagement potential\n\
            - Controversy level\n\
            - Community guidelines\n\n\
            Return JSON with sentiment, confidence (0-1), and shouldComment boolean.";
        let body = if content.is_empty() { "No content provided" } else { content };
        let prompt = format!(
            "Analyze this Reddit post:\n\nTitle: {title}\nContent: {body}\n\nProvide sentiment analysis and commenting recommendation."
        );

        let text = self
            .generate(
                &self.post_model,
                system_prompt,
                &prompt,
                json!({
                    "responseMimeType": "application/json",
                    "responseSchema": {
                        "type": "object",
                        "properties": {
                            "sentiment": { "type": "string", "enum": ["positive", "negative", "neutral"] },
                            "confidence": { "type": "number" },
                            "shouldComment": { "type": "boolean" },
                        },
                        "required": ["sentiment", "confidence", "shouldComment"],
                    },
                }),
            )
            .await?;

        parse_sentiment(&text)
    }
}

/// Concatenate the text parts of the first candidate, if any
fn extract_text(payload: &Value) -> Option<String> {
    let parts = payload.pointer("/candidates/0/content/parts")?.as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
