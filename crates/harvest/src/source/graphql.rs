//! GraphQL client for the web API, authenticated with session cookies.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, COOKIE};
use serde_json::{json, Value};
use std::time::Duration;

use super::{LookupSource, TimelineKind, TimelineSource};
use crate::auth::Session;
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::twitter::Cursor;

/// Client for the GraphQL endpoints behind the web app.
pub struct GraphqlClient {
    client: reqwest::Client,
    config: ApiConfig,
    session: Session,
}

impl GraphqlClient {
    /// Create a new client.
    pub fn new(config: ApiConfig, session: Session) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            config,
            session,
        })
    }

    /// A paginated source over one of the supported timelines.
    #[must_use]
    pub fn timeline(&self, kind: TimelineKind) -> GraphqlTimeline<'_> {
        GraphqlTimeline { client: self, kind }
    }

    /// Run one GraphQL query and return the response body.
    pub async fn query(&self, operation: &str, variables: &Value) -> Result<Value> {
        let query_id = self.config.query_id(operation)?;
        let url = format!(
            "{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            query_id,
            operation
        );
        let variables = variables.to_string();
        let features = serde_json::to_string(&self.config.features)?;

        tracing::debug!(operation, variables = %variables, "Sending GraphQL query");

        let mut request = self
            .client
            .get(&url)
            .query(&[("variables", &variables), ("features", &features)])
            .header(AUTHORIZATION, format!("Bearer {}", self.config.bearer_token))
            .header(COOKIE, self.session.cookie_string())
            .header("x-twitter-auth-type", "OAuth2Session")
            .header("x-twitter-active-user", "yes");
        if let Some(ct0) = &self.session.ct0 {
            request = request.header("x-csrf-token", ct0);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(operation, status = status.as_u16(), "GraphQL query failed");
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        if body.get("data").is_none() {
            if let Some(errors) = body.get("errors") {
                return Err(Error::Api {
                    status: status.as_u16(),
                    body: errors.to_string(),
                });
            }
        }
        Ok(body)
    }

    async fn lookup(
        &self,
        operation: &str,
        variables: &Value,
        pointer: &str,
    ) -> Result<Option<Value>> {
        let mut body = self.query(operation, variables).await?;
        Ok(body.pointer_mut(pointer).map(Value::take))
    }
}

#[async_trait]
impl LookupSource for GraphqlClient {
    async fn user_by_screen_name(&self, screen_name: &str) -> Result<Option<Value>> {
        let variables = json!({
            "screen_name": screen_name,
            "withSafetyModeUserFields": true,
        });
        self.lookup("UserByScreenName", &variables, "/data/user")
            .await
    }

    async fn user_by_id(&self, id: u64) -> Result<Option<Value>> {
        let variables = json!({
            "userId": id.to_string(),
            "withSafetyModeUserFields": true,
        });
        self.lookup("UserByRestId", &variables, "/data/user").await
    }

    async fn users_by_ids(&self, ids: &[u64]) -> Result<Vec<Value>> {
        let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
        let variables = json!({ "userIds": ids });
        let users = self
            .lookup("UsersByRestIds", &variables, "/data/users")
            .await?;
        match users {
            Some(Value::Array(users)) => Ok(users),
            Some(other) => Err(Error::Api {
                status: 200,
                body: format!("UsersByRestIds returned non-array data.users: {other}"),
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn tweet_by_id(&self, id: u64) -> Result<Option<Value>> {
        let variables = json!({
            "tweetId": id.to_string(),
            "withCommunity": false,
            "includePromotedContent": false,
            "withVoice": false,
        });
        self.lookup("TweetResultByRestId", &variables, "/data/tweetResult")
            .await
    }
}

/// One timeline of a [`GraphqlClient`].
pub struct GraphqlTimeline<'a> {
    client: &'a GraphqlClient,
    kind: TimelineKind,
}

impl GraphqlTimeline<'_> {
    fn variables(&self, id: u64, cursor: &Cursor) -> Value {
        let count = self.client.config.page_size;
        let mut variables = match self.kind {
            TimelineKind::UserTweets | TimelineKind::UserMedia => json!({
                "userId": id.to_string(),
                "count": count,
                "includePromotedContent": false,
                "withVoice": true,
                "withV2Timeline": true,
            }),
            TimelineKind::ListMembers => json!({
                "listId": id.to_string(),
                "count": count,
            }),
        };
        if !cursor.is_start() {
            variables["cursor"] = json!(cursor.as_str());
        }
        variables
    }
}

#[async_trait]
impl TimelineSource for GraphqlTimeline<'_> {
    fn kind(&self) -> TimelineKind {
        self.kind
    }

    async fn fetch(&self, id: u64, cursor: &Cursor) -> Result<Option<Value>> {
        let variables = self.variables(id, cursor);
        let body = self
            .client
            .query(self.kind.operation(), &variables)
            .await?;
        Ok(Some(body))
    }
}
