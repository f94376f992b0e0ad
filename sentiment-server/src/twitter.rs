//! Twitter API v2 client with mock-data fallback.
//!
//! Authentication is app-only: consumer key and secret are exchanged once at
//! startup for a bearer token. Without a token, or when a search fails,
//! `search_tweets` returns generated mock tweets so the API stays usable
//! offline.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use sentiment_common::config::TwitterConfig;

use crate::error::TwitterError;

/// Search API page size bounds.
const MIN_RESULTS: usize = 10;
const MAX_RESULTS: usize = 100;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// A tweet as returned to API clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
    pub created_at: String,
    pub user: String,
    pub retweets: u64,
    pub favorites: u64,
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Option<Vec<ApiTweet>>,
    #[serde(default)]
    includes: Option<Includes>,
}

#[derive(Debug, Deserialize)]
struct ApiTweet {
    id: String,
    text: String,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    author_id: Option<String>,
    #[serde(default)]
    public_metrics: Option<PublicMetrics>,
}

#[derive(Debug, Default, Deserialize)]
struct PublicMetrics {
    #[serde(default)]
    retweet_count: u64,
    #[serde(default)]
    like_count: u64,
}

#[derive(Debug, Deserialize)]
struct Includes {
    #[serde(default)]
    users: Vec<ApiUser>,
}

#[derive(Debug, Deserialize)]
struct ApiUser {
    id: String,
    username: String,
}

fn map_transport_error(e: reqwest::Error) -> TwitterError {
    if e.is_timeout() {
        TwitterError::Network("Request timeout".into())
    } else if e.is_connect() {
        TwitterError::Network("Connection failed".into())
    } else {
        TwitterError::Network(e.to_string())
    }
}

// ============================================================================
// Client
// ============================================================================

pub struct TwitterClient {
    client: reqwest::Client,
    api_base: String,
    bearer_token: Option<String>,
}

impl TwitterClient {
    fn build(api_base: impl Into<String>, bearer_token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            bearer_token,
        }
    }

    /// Client without credentials; every search returns mock tweets.
    pub fn offline() -> Self {
        Self::build(TwitterConfig::default().api_base, None)
    }

    /// Client with a known bearer token.
    pub fn with_bearer_token(api_base: impl Into<String>, token: impl Into<String>) -> Self {
        Self::build(api_base, Some(token.into()))
    }

    /// Create from config, exchanging app credentials for a bearer token.
    ///
    /// Missing credentials or a failed exchange yield a client that serves
    /// mock data.
    pub async fn connect(config: &TwitterConfig) -> Self {
        let mut client = Self::build(config.api_base.clone(), None);

        let Some((key, secret)) = config.app_credentials() else {
            tracing::info!("Twitter credentials not configured, using mock tweets");
            return client;
        };

        match client.fetch_bearer_token(key, secret).await {
            Ok(token) => {
                tracing::info!("Obtained Twitter bearer token");
                client.bearer_token = Some(token);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to obtain Twitter bearer token, using mock tweets");
            }
        }

        client
    }

    pub fn has_token(&self) -> bool {
        self.bearer_token.is_some()
    }

    /// OAuth2 client-credentials exchange.
    pub async fn fetch_bearer_token(&self, key: &str, secret: &str) -> Result<String, TwitterError> {
        let credentials = BASE64.encode(format!("{}:{}", key, secret));

        let response = self
            .client
            .post(format!("{}/oauth2/token", self.api_base))
            .header("Authorization", format!("Basic {}", credentials))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(TwitterError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| TwitterError::Malformed(format!("Failed to parse token: {}", e)))?;

        Ok(token.access_token)
    }

    /// Recent tweets matching `keyword`, excluding retweets, English only.
    /// Never fails: errors and missing credentials produce mock tweets.
    pub async fn search_tweets(&self, keyword: &str, count: usize) -> Vec<Tweet> {
        let Some(token) = &self.bearer_token else {
            tracing::debug!(keyword, count, "No bearer token, using mock tweets");
            return mock_tweets(keyword, count);
        };

        match self.fetch_recent(token, keyword, count).await {
            Ok(tweets) => tweets,
            Err(e) => {
                tracing::warn!(keyword, error = %e, "Tweet search failed, using mock tweets");
                mock_tweets(keyword, count)
            }
        }
    }

    async fn fetch_recent(
        &self,
        token: &str,
        keyword: &str,
        count: usize,
    ) -> Result<Vec<Tweet>, TwitterError> {
        let query = format!("{} -is:retweet lang:en", keyword);
        let max_results = count.clamp(MIN_RESULTS, MAX_RESULTS).to_string();

        tracing::debug!(query = %query, max_results = %max_results, "Searching recent tweets");

        let response = self
            .client
            .get(format!("{}/2/tweets/search/recent", self.api_base))
            .bearer_auth(token)
            .query(&[
                ("query", query.as_str()),
                ("max_results", max_results.as_str()),
                ("tweet.fields", "created_at,public_metrics,author_id"),
                ("user.fields", "username"),
                ("expansions", "author_id"),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TwitterError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| TwitterError::Malformed(format!("Failed to parse search: {}", e)))?;

        let mut tweets = convert_search(body);
        tweets.truncate(count);
        Ok(tweets)
    }
}

fn convert_search(response: SearchResponse) -> Vec<Tweet> {
    let Some(data) = response.data else {
        return Vec::new();
    };

    let users: HashMap<String, String> = response
        .includes
        .map(|includes| {
            includes
                .users
                .into_iter()
                .map(|u| (u.id, u.username))
                .collect()
        })
        .unwrap_or_default();

    data.into_iter()
        .map(|tweet| {
            let metrics = tweet.public_metrics.unwrap_or_default();
            let user = tweet
                .author_id
                .as_ref()
                .and_then(|id| users.get(id))
                .cloned()
                .unwrap_or_else(|| "unknown".to_string());

            Tweet {
                id: tweet.id,
                text: tweet.text,
                created_at: tweet.created_at.unwrap_or_default(),
                user,
                retweets: metrics.retweet_count,
                favorites: metrics.like_count,
            }
        })
        .collect()
}

/// Generated tweets for offline use. Positions 1 to 4 carry varied sentiment.
pub fn mock_tweets(keyword: &str, count: usize) -> Vec<Tweet> {
    let now = chrono::Utc::now().to_rfc3339();

    (0..count)
        .map(|i| {
            let text = match i {
                1 => format!("Not happy with {}. Poor quality!", keyword),
                2 => format!("{} is okay, nothing special.", keyword),
                3 => format!("Loving the new {} features! Amazing work!", keyword),
                4 => format!("Disappointed with {} service. Very bad experience.", keyword),
                _ => format!(
                    "This is a mock tweet about {}. It is great! #{}",
                    keyword, keyword
                ),
            };

            Tweet {
                id: format!("mock_{}", i),
                text,
                created_at: now.clone(),
                user: format!("user_{}", i),
                retweets: i as u64 * 2,
                favorites: i as u64 * 3,
            }
        })
        .collect()
}
