//! Configuration

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Lowest automation interval the configuration layer accepts, in minutes
pub const MIN_INTERVAL_MINUTES: u64 = 5;
/// Highest automation interval the configuration layer accepts, in minutes
pub const MAX_INTERVAL_MINUTES: u64 = 1440;

/// Settings for the automation system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Subreddits swept for trending posts
    pub subreddits: Vec<String>,

    /// Whether the periodic automation trigger starts at boot
    pub automation_enabled: bool,

    /// Minutes between automation firings (5-1440)
    pub automation_interval_minutes: u64,

    /// Maximum queue items considered per processing pass
    pub batch_limit: usize,

    /// Network timeout for external API calls, in seconds
    pub request_timeout_secs: u64,

    /// Model used for comment drafts
    pub comment_model: String,

    /// Model used for post drafts and analysis
    pub post_model: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            subreddits: vec![
                "technology".to_string(),
                "programming".to_string(),
                "artificial".to_string(),
            ],
            automation_enabled: false,
            automation_interval_minutes: 30,
            batch_limit: 10,
            request_timeout_secs: 30,
            comment_model: crate::ai::DEFAULT_COMMENT_MODEL.to_string(),
            post_model: crate::ai::DEFAULT_POST_MODEL.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from file, environment variables, or defaults
    pub fn load() -> crate::Result<Self> {
        // Try to load from config file specified in environment variable
        if let Ok(config_path) = env::var("REDDIT_AUTOPILOT_CONFIG") {
            info!("Loading config from REDDIT_AUTOPILOT_CONFIG: {}", config_path);
            return Self::from_file(&config_path);
        }

        // Try default config file locations
        let default_paths = vec![
            "config.yaml",
            "config.toml",
            "config/config.yaml",
            "config/config.toml",
        ];

        for path in default_paths {
            if Path::new(path).exists() {
                info!("Loading config from: {}", path);
                return Self::from_file(path);
            }
        }

        // Try environment variables
        if let Ok(settings) = Self::from_env() {
            info!("Loaded config from environment variables");
            return Ok(settings);
        }

        // Fall back to defaults
        warn!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load settings from a file (YAML or TOML)
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()
            .map_err(|e| {
                crate::AutopilotError::Config(format!("Failed to load config file: {e}"))
            })?;

        let settings: Settings = builder
            .try_deserialize()
            .map_err(|e| crate::AutopilotError::Config(format!("Failed to parse config: {e}")))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut settings = Self::default();
        let mut found_any = false;

        if let Ok(val) = env::var("REDDIT_AUTOPILOT_SUBREDDITS") {
            settings.subreddits = val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            found_any = true;
        }

        if let Ok(val) = env::var("REDDIT_AUTOPILOT_AUTOMATION_ENABLED") {
            settings.automation_enabled = val.parse().map_err(|e| {
                crate::AutopilotError::Config(format!("Invalid AUTOMATION_ENABLED: {e}"))
            })?;
            found_any = true;
        }

        if let Ok(val) = env::var("REDDIT_AUTOPILOT_AUTOMATION_INTERVAL_MINUTES") {
            settings.automation_interval_minutes = val.parse().map_err(|e| {
                crate::AutopilotError::Config(format!("Invalid AUTOMATION_INTERVAL_MINUTES: {e}"))
            })?;
            found_any = true;
        }

        if let Ok(val) = env::var("REDDIT_AUTOPILOT_BATCH_LIMIT") {
            settings.batch_limit = val
                .parse()
                .map_err(|e| crate::AutopilotError::Config(format!("Invalid BATCH_LIMIT: {e}")))?;
            found_any = true;
        }

        if let Ok(val) = env::var("REDDIT_AUTOPILOT_REQUEST_TIMEOUT_SECS") {
            settings.request_timeout_secs = val.parse().map_err(|e| {
                crate::AutopilotError::Config(format!("Invalid REQUEST_TIMEOUT_SECS: {e}"))
            })?;
            found_any = true;
        }

        if let Ok(val) = env::var("REDDIT_AUTOPILOT_COMMENT_MODEL") {
            settings.comment_model = val;
            found_any = true;
        }

        if let Ok(val) = env::var("REDDIT_AUTOPILOT_POST_MODEL") {
            settings.post_model = val;
            found_any = true;
        }

        if !found_any {
            return Err(crate::AutopilotError::Config(
                "No environment variables found".to_string(),
            ));
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Validate the settings
    pub fn validate(&self) -> crate::Result<()> {
        if self.subreddits.is_empty() {
            return Err(crate::AutopilotError::Config(
                "At least one subreddit must be configured".to_string(),
            ));
        }

        if self.automation_interval_minutes < MIN_INTERVAL_MINUTES
            || self.automation_interval_minutes > MAX_INTERVAL_MINUTES
        {
            return Err(crate::AutopilotError::Config(format!(
                "Automation interval must be between {MIN_INTERVAL_MINUTES} and {MAX_INTERVAL_MINUTES} minutes"
            )));
        }

        if self.batch_limit == 0 {
            return Err(crate::AutopilotError::Config(
                "Batch limit must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(crate::AutopilotError::Config(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Automation firing interval as a duration
    pub fn automation_interval(&self) -> Duration {
        Duration::from_secs(self.automation_interval_minutes * 60)
    }

    /// Network timeout as a duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Credential bundle for Reddit's OAuth2 API
///
/// Secrets are wrapped so they never land in logs. Username and password
/// are optional; without them the client falls back to the
/// client-credentials grant.
#[derive(Debug, Clone, Deserialize)]
pub struct RedditCredentials {
    /// OAuth2 application client id
    pub client_id: String,
    /// OAuth2 application client secret
    pub client_secret: SecretString,
    /// Account username, for the password grant
    pub username: Option<String>,
    /// Account password, for the password grant
    pub password: Option<SecretString>,
}

impl RedditCredentials {
    /// Create a credential bundle for the client-credentials grant
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
            username: None,
            password: None,
        }
    }

    /// Add account credentials for the password grant (chainable)
    pub fn with_user_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(SecretString::from(password.into()));
        self
    }

    /// Load credentials from `REDDIT_CLIENT_ID` and friends
    pub fn from_env() -> crate::Result<Self> {
        let client_id = env::var("REDDIT_CLIENT_ID").map_err(|_| {
            crate::AutopilotError::Config(
                "Reddit credentials not configured in environment".to_string(),
            )
        })?;
        let client_secret = env::var("REDDIT_CLIENT_SECRET").map_err(|_| {
            crate::AutopilotError::Config(
                "Reddit credentials not configured in environment".to_string(),
            )
        })?;

        let mut credentials = Self::new(client_id, client_secret);
        if let (Ok(username), Ok(password)) =
            (env::var("REDDIT_USERNAME"), env::var("REDDIT_PASSWORD"))
        {
            credentials = credentials.with_user_auth(username, password);
        }

        credentials.validate()?;
        Ok(credentials)
    }

    /// Check that the bundle is usable before touching any queue item
    pub fn validate(&self) -> crate::Result<()> {
        if self.client_id.is_empty() || self.client_secret.expose_secret().is_empty() {
            return Err(crate::AutopilotError::Config(
                "Reddit credentials are missing or empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load the Gemini API key from the environment
pub fn gemini_api_key() -> crate::Result<SecretString> {
    env::var("GEMINI_API_KEY")
        .or_else(|_| env::var("GOOGLE_AI_API_KEY"))
        .map(SecretString::from)
        .map_err(|_| {
            crate::AutopilotError::Config("Gemini API key not configured in environment".to_string())
        })
}
