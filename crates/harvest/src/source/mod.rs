//! Fetch capabilities consumed by the pager and assembler.
//!
//! A source hands back raw JSON trees; it knows nothing about their shape
//! beyond where the payload sits in the HTTP response. Retry, rate limiting
//! and authentication are the source's business.

mod graphql;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::twitter::Cursor;

pub use graphql::{GraphqlClient, GraphqlTimeline};

/// The paginated timelines the pager knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineKind {
    /// A user's tweets and replies-to-self.
    UserTweets,
    /// A user's media grid.
    UserMedia,
    /// Members of a list.
    ListMembers,
}

impl TimelineKind {
    /// GraphQL operation name.
    #[must_use]
    pub fn operation(self) -> &'static str {
        match self {
            Self::UserTweets => "UserTweets",
            Self::UserMedia => "UserMedia",
            Self::ListMembers => "ListMembers",
        }
    }

    /// Path from the response root to the timeline's owner object. A missing
    /// owner means the timeline is unavailable.
    #[must_use]
    pub fn result_root(self) -> &'static [&'static str] {
        match self {
            Self::UserTweets | Self::UserMedia => &["data", "user", "result"],
            Self::ListMembers => &["data", "list"],
        }
    }

    /// Candidate paths from the owner object to the instruction list, tried in order.
    #[must_use]
    pub fn instruction_paths(self) -> &'static [&'static [&'static str]] {
        match self {
            Self::UserTweets | Self::UserMedia => &[
                &["timeline_v2", "timeline", "instructions"],
                &["timeline", "timeline", "instructions"],
            ],
            Self::ListMembers => &[&["members_timeline", "timeline", "instructions"]],
        }
    }
}

/// One paginated stream (tweets, media, list members).
#[async_trait]
pub trait TimelineSource: Send + Sync {
    /// Which timeline this source pages through.
    fn kind(&self) -> TimelineKind;

    /// Fetch one page for `id` (user or list) at `cursor`. `None` when the
    /// platform returned nothing resolvable.
    async fn fetch(&self, id: u64, cursor: &Cursor) -> Result<Option<Value>>;
}

/// Single-object lookups. Each call returns `*_results` wrappers
/// (`{"result": {...}}`), which may be empty for unavailable objects.
#[async_trait]
pub trait LookupSource: Send + Sync {
    async fn user_by_screen_name(&self, screen_name: &str) -> Result<Option<Value>>;

    async fn user_by_id(&self, id: u64) -> Result<Option<Value>>;

    /// Batched user lookup.
    async fn users_by_ids(&self, ids: &[u64]) -> Result<Vec<Value>>;

    async fn tweet_by_id(&self, id: u64) -> Result<Option<Value>>;
}
