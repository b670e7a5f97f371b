//! Integration tests for the GraphQL client against a mock HTTP server.

mod common;

use std::collections::BTreeMap;

use common::{page_of, tweet_result, user_result};
use harvest::config::ApiConfig;
use harvest::source::{GraphqlClient, LookupSource, TimelineKind};
use harvest::twitter::{resolve_tweets_by_ids, resolve_user_id, resolve_users, walk};
use harvest::{Error, Session, WalkBounds};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

// =============================================================================
// Helpers
// =============================================================================

/// Matches on one key of the JSON-encoded `variables` query parameter.
struct Variable {
    key: &'static str,
    value: Option<Value>,
}

impl Variable {
    fn is(key: &'static str, value: Value) -> Self {
        Self {
            key,
            value: Some(value),
        }
    }

    fn absent(key: &'static str) -> Self {
        Self { key, value: None }
    }
}

impl Match for Variable {
    fn matches(&self, request: &Request) -> bool {
        let Some((_, raw)) = request.url.query_pairs().find(|(k, _)| k == "variables") else {
            return false;
        };
        let Ok(variables) = serde_json::from_str::<Value>(&raw) else {
            return false;
        };
        variables.get(self.key) == self.value.as_ref()
    }
}

fn api_config(server: &MockServer) -> ApiConfig {
    let operations = [
        ("UserByScreenName", "q1"),
        ("UserByRestId", "q2"),
        ("UsersByRestIds", "q3"),
        ("TweetResultByRestId", "q4"),
        ("UserTweets", "q5"),
    ]
    .into_iter()
    .map(|(op, id)| (op.to_string(), id.to_string()))
    .collect();

    ApiConfig {
        base_url: server.uri(),
        bearer_token: "bearer-test".to_string(),
        operations,
        features: BTreeMap::from([("rweb_lists_timeline_redesign_enabled".to_string(), true)]),
        ..Default::default()
    }
}

fn client(server: &MockServer) -> GraphqlClient {
    let session = Session::with_ct0("tok".to_string(), "csrf".to_string());
    GraphqlClient::new(api_config(server), session).unwrap()
}

// =============================================================================
// Lookups
// =============================================================================

#[tokio::test]
async fn test_user_lookup_sends_session_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/q1/UserByScreenName"))
        .and(header("authorization", "Bearer bearer-test"))
        .and(header("x-csrf-token", "csrf"))
        .and(header("cookie", "auth_token=tok; ct0=csrf"))
        .and(header("x-twitter-auth-type", "OAuth2Session"))
        .and(Variable::is("screen_name", json!("jack")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"user": user_result(12, "jack")}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let id = resolve_user_id(&client(&server), "jack").await.unwrap();
    assert_eq!(id, 12);
}

#[tokio::test]
async fn test_missing_user_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(path("/q1/UserByScreenName"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"user": {}}})))
        .mount(&server)
        .await;

    let err = resolve_user_id(&client(&server), "ghost").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn test_batched_user_lookup() {
    let server = MockServer::start().await;
    Mock::given(path("/q3/UsersByRestIds"))
        .and(Variable::is("userIds", json!(["1", "2"])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"users": [user_result(1, "one"), {}, user_result(2, "two")]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let users = resolve_users(&client(&server), &[], &[1, 2]).await.unwrap();
    let names: Vec<&str> = users.iter().map(|u| u.screen_name.as_str()).collect();
    assert_eq!(names, vec!["one", "two"]);
}

#[tokio::test]
async fn test_tweet_lookup_reads_tweet_result() {
    let server = MockServer::start().await;
    Mock::given(path("/q4/TweetResultByRestId"))
        .and(Variable::is("tweetId", json!("77")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"tweetResult": tweet_result(77, "hello")}})),
        )
        .mount(&server)
        .await;

    let tweets = resolve_tweets_by_ids(&client(&server), &[77]).await.unwrap();
    assert_eq!(tweets.len(), 1);
    assert_eq!(tweets[0].text, "hello");
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_error_status_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(path("/q2/UserByRestId"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit exceeded"))
        .mount(&server)
        .await;

    let err = client(&server).user_by_id(5).await.unwrap_err();
    match err {
        Error::Api { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "Rate limit exceeded");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_graphql_errors_without_data() {
    let server = MockServer::start().await;
    Mock::given(path("/q2/UserByRestId"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{"message": "Query: Unspecified", "code": 0}]
        })))
        .mount(&server)
        .await;

    let err = client(&server).user_by_id(5).await.unwrap_err();
    assert!(err.to_string().contains("Query: Unspecified"));
}

#[tokio::test]
async fn test_unconfigured_operation_makes_no_request() {
    let server = MockServer::start().await;
    let client = client(&server);

    let err = walk(&client.timeline(TimelineKind::UserMedia), 42, WalkBounds::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Config(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// =============================================================================
// Timelines
// =============================================================================

#[tokio::test]
async fn test_walk_passes_cursor_between_pages() {
    let server = MockServer::start().await;
    Mock::given(path("/q5/UserTweets"))
        .and(Variable::absent("cursor"))
        .and(Variable::is("userId", json!("42")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_of(&[30, 20], "p1", "next-1")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/q5/UserTweets"))
        .and(Variable::is("cursor", json!("next-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_of(&[10], "p2", "-")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let tweets = walk(&client.timeline(TimelineKind::UserTweets), 42, WalkBounds::default())
        .await
        .unwrap();

    let ids: Vec<u64> = tweets.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![30, 20, 10]);
}

#[tokio::test]
async fn test_unavailable_user_timeline_is_empty() {
    let server = MockServer::start().await;
    Mock::given(path("/q5/UserTweets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"user": {}}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let tweets = walk(&client.timeline(TimelineKind::UserTweets), 42, WalkBounds::default())
        .await
        .unwrap();
    assert!(tweets.is_empty());
}
