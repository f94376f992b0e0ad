//! HTTP API routes.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use sentiment_core::{Label, Method, SentimentClassifier};

use crate::error::ServiceError;
use crate::twitter::{Tweet, TwitterClient};

/// Upper bound for `count` on tweet searches.
pub const MAX_TWEET_COUNT: usize = 100;

/// Upper bound for texts in one batch request.
pub const MAX_BATCH_SIZE: usize = 100;

/// Tweets fetched for the trends view.
pub const TRENDS_TWEET_COUNT: usize = 50;

/// Tweets echoed back in the trends view.
pub const TRENDS_SAMPLE_SIZE: usize = 10;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<SentimentClassifier>,
    pub twitter: Arc<TwitterClient>,
    /// Default tweet count when a request gives none
    pub max_tweets: usize,
}

impl AppState {
    pub fn new(classifier: SentimentClassifier, twitter: TwitterClient, max_tweets: usize) -> Self {
        Self {
            classifier: Arc::new(classifier),
            twitter: Arc::new(twitter),
            max_tweets,
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/api/health", get(health_check))
        // Free text
        .route("/api/analyze/sentiment", post(analyze_sentiment))
        .route("/api/analyze/batch", post(analyze_batch))
        // Tweets
        .route("/api/twitter/sentiment", get(twitter_sentiment))
        .route("/api/twitter/trends", get(twitter_trends))
        // Model status
        .route("/api/model", get(model_info))
        .with_state(state)
}

// ============ Health Check ============

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "sentiment-server",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

// ============ Free Text ============

#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    text: String,
    sentiment: Label,
    method: String,
}

async fn analyze_sentiment(
    State(state): State<AppState>,
    payload: Option<Json<serde_json::Value>>,
) -> Result<impl IntoResponse, ServiceError> {
    let payload = payload.map(|Json(value)| value).unwrap_or_default();

    let text = payload
        .get("text")
        .and_then(serde_json::Value::as_str)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| ServiceError::BadRequest("No text provided".into()))?;

    let method = payload
        .get("method")
        .and_then(serde_json::Value::as_str)
        .unwrap_or(Method::default().as_str());

    let sentiment = state.classifier.predict_named(text, method).await;

    Ok(Json(AnalyzeResponse {
        text: text.to_string(),
        sentiment,
        method: method.to_string(),
    }))
}

#[derive(Debug, Serialize)]
struct BatchResult {
    text: String,
    sentiment: Label,
}

async fn analyze_batch(
    State(state): State<AppState>,
    payload: Option<Json<serde_json::Value>>,
) -> Result<impl IntoResponse, ServiceError> {
    let payload = payload.map(|Json(value)| value).unwrap_or_default();

    let texts = payload
        .get("texts")
        .and_then(serde_json::Value::as_array)
        .filter(|texts| !texts.is_empty())
        .ok_or_else(|| ServiceError::BadRequest("No texts provided".into()))?;

    if texts.len() > MAX_BATCH_SIZE {
        return Err(ServiceError::BadRequest(format!(
            "Too many texts: {} (max {})",
            texts.len(),
            MAX_BATCH_SIZE
        )));
    }

    let texts: Vec<&str> = texts
        .iter()
        .map(serde_json::Value::as_str)
        .collect::<Option<_>>()
        .ok_or_else(|| ServiceError::BadRequest("Texts must be strings".into()))?;

    let method = payload
        .get("method")
        .and_then(serde_json::Value::as_str)
        .unwrap_or(Method::default().as_str());

    let mut results = Vec::with_capacity(texts.len());
    for text in texts {
        let sentiment = state.classifier.predict_named(text, method).await;
        results.push(BatchResult {
            text: text.to_string(),
            sentiment,
        });
    }

    let statistics = SentimentStatistics::from_labels(results.iter().map(|r| r.sentiment));

    tracing::info!(
        method,
        total = statistics.total_tweets,
        positive_pct = statistics.positive_percentage,
        negative_pct = statistics.negative_percentage,
        "Batch sentiment analyzed"
    );

    Ok(Json(serde_json::json!({
        "statistics": statistics,
        "results": results,
        "method": method
    })))
}

// ============ Tweets ============

#[derive(Debug, Deserialize)]
struct TweetQuery {
    keyword: Option<String>,
    count: Option<String>,
    method: Option<String>,
}

impl TweetQuery {
    fn keyword(&self) -> Result<&str, ServiceError> {
        self.keyword
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ServiceError::BadRequest("No keyword provided".into()))
    }

    fn count(&self, default: usize) -> Result<usize, ServiceError> {
        let count = match self.count.as_deref() {
            None | Some("") => default,
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ServiceError::BadRequest(format!("Invalid count: {}", raw)))?,
        };
        Ok(count.clamp(1, MAX_TWEET_COUNT))
    }
}

#[derive(Debug, Serialize)]
struct ScoredTweet {
    #[serde(flatten)]
    tweet: Tweet,
    sentiment: Label,
}

#[derive(Debug, Serialize, PartialEq)]
struct SentimentStatistics {
    positive_percentage: f64,
    negative_percentage: f64,
    neutral_percentage: f64,
    total_tweets: usize,
}

impl SentimentStatistics {
    fn from_labels(labels: impl IntoIterator<Item = Label>) -> Self {
        let labels: Vec<Label> = labels.into_iter().collect();
        let total = labels.len();
        let percentage = |label: Label| {
            if total == 0 {
                0.0
            } else {
                let count = labels.iter().filter(|l| **l == label).count();
                count as f64 * 100.0 / total as f64
            }
        };

        Self {
            positive_percentage: percentage(Label::Positive),
            negative_percentage: percentage(Label::Negative),
            neutral_percentage: percentage(Label::Neutral),
            total_tweets: total,
        }
    }
}

async fn classify_tweets(
    classifier: &SentimentClassifier,
    tweets: Vec<Tweet>,
    method: &str,
) -> Vec<ScoredTweet> {
    let mut scored = Vec::with_capacity(tweets.len());
    for tweet in tweets {
        let sentiment = classifier.predict_named(&tweet.text, method).await;
        scored.push(ScoredTweet { tweet, sentiment });
    }
    scored
}

async fn twitter_sentiment(
    State(state): State<AppState>,
    Query(query): Query<TweetQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let keyword = query.keyword()?;
    let count = query.count(state.max_tweets)?;
    let method = query.method.as_deref().unwrap_or(Method::default().as_str());

    let tweets = state.twitter.search_tweets(keyword, count).await;
    if tweets.is_empty() {
        return Err(ServiceError::NotFound("No tweets found or API error".into()));
    }

    let scored = classify_tweets(&state.classifier, tweets, method).await;
    let statistics = SentimentStatistics::from_labels(scored.iter().map(|t| t.sentiment));

    tracing::info!(
        keyword,
        method,
        total = statistics.total_tweets,
        positive_pct = statistics.positive_percentage,
        negative_pct = statistics.negative_percentage,
        "Tweet sentiment analyzed"
    );

    Ok(Json(serde_json::json!({
        "keyword": keyword,
        "statistics": statistics,
        "tweets": scored,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

async fn twitter_trends(
    State(state): State<AppState>,
    Query(query): Query<TweetQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let keyword = query.keyword()?;

    let tweets = state.twitter.search_tweets(keyword, TRENDS_TWEET_COUNT).await;
    if tweets.is_empty() {
        return Err(ServiceError::NotFound("No tweets found".into()));
    }

    let mut scored = classify_tweets(&state.classifier, tweets, Method::default().as_str()).await;

    let mut current: BTreeMap<&'static str, usize> = BTreeMap::new();
    for tweet in &scored {
        *current.entry(tweet.sentiment.as_str()).or_insert(0) += 1;
    }

    scored.truncate(TRENDS_SAMPLE_SIZE);

    Ok(Json(serde_json::json!({
        "keyword": keyword,
        "current_sentiment": current,
        "hourly_sentiment": [],
        "sample_tweets": scored
    })))
}

// ============ Model Status ============

async fn model_info(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.classifier.model_info())
}
