//! Integration tests for sentiment-server.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sentiment_core::{bootstrap_examples, SentimentClassifier};
use sentiment_common::config::TwitterConfig;
use sentiment_server::{build_router, AppState, TwitterClient};

fn trained_classifier() -> SentimentClassifier {
    let mut classifier = SentimentClassifier::new();
    classifier
        .train_statistical(&bootstrap_examples())
        .unwrap();
    classifier
}

fn test_app() -> axum::Router {
    build_router(AppState::new(
        trained_classifier(),
        TwitterClient::offline(),
        100,
    ))
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_json(app: axum::Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

// ============================================================================
// Health and model status
// ============================================================================

#[tokio::test]
async fn test_health() {
    let (status, json) = get_json(test_app(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_model_info_after_training() {
    let (status, json) = get_json(test_app(), "/api/model").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["trained"], true);
    assert_eq!(
        json["classes"],
        serde_json::json!(["negative", "neutral", "positive"])
    );
    assert!(json["vocabulary_size"].as_u64().unwrap() > 0);
    assert!(json["evaluation"]["weighted_f1"].is_number());
}

#[tokio::test]
async fn test_model_info_untrained() {
    let app = build_router(AppState::new(
        SentimentClassifier::new(),
        TwitterClient::offline(),
        100,
    ));
    let (_, json) = get_json(app, "/api/model").await;
    assert_eq!(json["trained"], false);
    assert!(json["evaluation"].is_null());
}

// ============================================================================
// Free text
// ============================================================================

#[tokio::test]
async fn test_analyze_default_method() {
    let (status, json) = post_json(
        test_app(),
        "/api/analyze/sentiment",
        r#"{"text": "I love this product! It's amazing!"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["sentiment"], "positive");
    assert_eq!(json["method"], "rule_based");
    assert_eq!(json["text"], "I love this product! It's amazing!");
}

#[tokio::test]
async fn test_analyze_statistical_method() {
    let (status, json) = post_json(
        test_app(),
        "/api/analyze/sentiment",
        r#"{"text": "Excellent product highly recommended!", "method": "ml"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["sentiment"], "positive");
    assert_eq!(json["method"], "ml");
}

#[tokio::test]
async fn test_analyze_unknown_method_uses_rule_based() {
    let (status, json) = post_json(
        test_app(),
        "/api/analyze/sentiment",
        r#"{"text": "This is the worst experience ever.", "method": "bert"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["sentiment"], "negative");
}

#[tokio::test]
async fn test_analyze_rejects_missing_text() {
    for body in [r#"{}"#, r#"{"text": ""}"#, r#"{"text": 42}"#, "not json"] {
        let (status, json) = post_json(test_app(), "/api/analyze/sentiment", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(json["error"], "No text provided");
    }
}

#[tokio::test]
async fn test_analyze_batch() {
    let (status, json) = post_json(
        test_app(),
        "/api/analyze/batch",
        r#"{"texts": [
            "I love this product! It's amazing!",
            "This is the worst experience ever.",
            "The product is okay, nothing special.",
            "The service was 'great'"
        ]}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["method"], "rule_based");

    let stats = &json["statistics"];
    assert_eq!(stats["positive_percentage"], 50.0);
    assert_eq!(stats["negative_percentage"], 25.0);
    assert_eq!(stats["neutral_percentage"], 25.0);
    assert_eq!(stats["total_tweets"], 4);

    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 4);
    assert_eq!(results[1]["text"], "This is the worst experience ever.");
    assert_eq!(results[1]["sentiment"], "negative");
    assert_eq!(results[3]["sentiment"], "positive");
}

#[tokio::test]
async fn test_analyze_batch_with_method() {
    let (status, json) = post_json(
        test_app(),
        "/api/analyze/batch",
        r#"{"texts": ["Excellent product highly recommended!"], "method": "ml"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["method"], "ml");
    assert_eq!(json["results"][0]["sentiment"], "positive");
    assert_eq!(json["statistics"]["positive_percentage"], 100.0);
}

#[tokio::test]
async fn test_analyze_batch_rejects_empty_or_missing_texts() {
    for body in [r#"{"texts": []}"#, r#"{}"#, r#"{"texts": "hello"}"#, "not json"] {
        let (status, json) = post_json(test_app(), "/api/analyze/batch", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(json["error"], "No texts provided");
    }

    let (status, json) =
        post_json(test_app(), "/api/analyze/batch", r#"{"texts": ["fine", 7]}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Texts must be strings");
}

#[tokio::test]
async fn test_analyze_batch_rejects_oversized_batch() {
    let texts = vec!["good"; 101];
    let body = serde_json::json!({ "texts": texts }).to_string();
    let (status, json) = post_json(test_app(), "/api/analyze/batch", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("max 100"));
}

// ============================================================================
// Tweets (offline client)
// ============================================================================

#[tokio::test]
async fn test_twitter_sentiment_with_mock_tweets() {
    let (status, json) = get_json(test_app(), "/api/twitter/sentiment?keyword=rust&count=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["keyword"], "rust");

    let stats = &json["statistics"];
    assert_eq!(stats["total_tweets"], 5);
    // mock_0 positive, 1 negative, 2 neutral, 3 positive, 4 negative
    assert_eq!(stats["positive_percentage"], 40.0);
    assert_eq!(stats["negative_percentage"], 40.0);
    assert_eq!(stats["neutral_percentage"], 20.0);

    let tweets = json["tweets"].as_array().unwrap();
    assert_eq!(tweets.len(), 5);
    assert_eq!(tweets[1]["id"], "mock_1");
    assert_eq!(tweets[1]["sentiment"], "negative");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_twitter_sentiment_count_defaults_and_clamps() {
    let (_, json) = get_json(test_app(), "/api/twitter/sentiment?keyword=rust").await;
    assert_eq!(json["statistics"]["total_tweets"], 100);

    let (_, json) = get_json(test_app(), "/api/twitter/sentiment?keyword=rust&count=1000").await;
    assert_eq!(json["statistics"]["total_tweets"], 100);

    let (_, json) = get_json(test_app(), "/api/twitter/sentiment?keyword=rust&count=0").await;
    assert_eq!(json["statistics"]["total_tweets"], 1);
}

#[tokio::test]
async fn test_twitter_sentiment_requires_keyword() {
    let (status, json) = get_json(test_app(), "/api/twitter/sentiment").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No keyword provided");

    let (status, _) = get_json(test_app(), "/api/twitter/trends?keyword=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_twitter_trends() {
    let (status, json) = get_json(test_app(), "/api/twitter/trends?keyword=rust").await;
    assert_eq!(status, StatusCode::OK);

    // 50 mock tweets: 46 templated positives plus the four varied samples.
    let current = &json["current_sentiment"];
    assert_eq!(current["positive"], 47);
    assert_eq!(current["negative"], 2);
    assert_eq!(current["neutral"], 1);

    assert_eq!(json["sample_tweets"].as_array().unwrap().len(), 10);
    assert_eq!(json["hourly_sentiment"], serde_json::json!([]));
}

// ============================================================================
// Tweets (mocked Twitter API)
// ============================================================================

#[tokio::test]
async fn test_connect_exchanges_credentials_for_token() {
    let server = MockServer::start().await;

    // base64("key:secret")
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(header("authorization", "Basic a2V5OnNlY3JldA=="))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token_type": "bearer",
            "access_token": "app-token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = TwitterConfig {
        consumer_key: Some("key".into()),
        consumer_secret: Some("secret".into()),
        api_base: server.uri(),
        ..TwitterConfig::default()
    };

    let client = TwitterClient::connect(&config).await;
    assert!(client.has_token());
}

#[tokio::test]
async fn test_connect_failure_serves_mock() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let config = TwitterConfig {
        consumer_key: Some("key".into()),
        consumer_secret: Some("bad".into()),
        api_base: server.uri(),
        ..TwitterConfig::default()
    };

    let client = TwitterClient::connect(&config).await;
    assert!(!client.has_token());
    assert_eq!(client.search_tweets("rust", 2).await[0].id, "mock_0");
}

#[tokio::test]
async fn test_search_recent_tweets() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .and(header("authorization", "Bearer app-token"))
        .and(query_param("query", "rust -is:retweet lang:en"))
        .and(query_param("max_results", "10"))
        .and(query_param("expansions", "author_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {
                    "id": "101",
                    "text": "Terrible customer support, very disappointed.",
                    "created_at": "2024-05-01T12:00:00.000Z",
                    "author_id": "7",
                    "public_metrics": { "retweet_count": 1, "like_count": 4 }
                }
            ],
            "includes": { "users": [{ "id": "7", "username": "ferris" }] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let twitter = TwitterClient::with_bearer_token(server.uri(), "app-token");
    let app = build_router(AppState::new(trained_classifier(), twitter, 100));

    let (status, json) = get_json(app, "/api/twitter/sentiment?keyword=rust&count=3").await;
    assert_eq!(status, StatusCode::OK);

    let tweets = json["tweets"].as_array().unwrap();
    assert_eq!(tweets.len(), 1);
    assert_eq!(tweets[0]["id"], "101");
    assert_eq!(tweets[0]["user"], "ferris");
    assert_eq!(tweets[0]["favorites"], 4);
    assert_eq!(tweets[0]["sentiment"], "negative");
    assert_eq!(json["statistics"]["negative_percentage"], 100.0);
}

#[tokio::test]
async fn test_search_without_results_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "meta": { "result_count": 0 } })),
        )
        .mount(&server)
        .await;

    let twitter = TwitterClient::with_bearer_token(server.uri(), "app-token");
    let app = build_router(AppState::new(trained_classifier(), twitter, 100));

    let (status, json) = get_json(app, "/api/twitter/sentiment?keyword=nothing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "No tweets found or API error");
}

#[tokio::test]
async fn test_search_error_falls_back_to_mock() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .mount(&server)
        .await;

    let twitter = TwitterClient::with_bearer_token(server.uri(), "app-token");
    let tweets = twitter.search_tweets("rust", 3).await;
    assert_eq!(tweets.len(), 3);
    assert!(tweets.iter().all(|t| t.id.starts_with("mock_")));
}
