//! Shared helpers for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use harvest::source::{TimelineKind, TimelineSource};
use harvest::{Cursor, Result};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

// =============================================================================
// Raw response builders
// =============================================================================

pub fn user_result(id: u64, screen_name: &str) -> Value {
    json!({
        "result": {
            "__typename": "User",
            "rest_id": id.to_string(),
            "legacy": {
                "created_at": "Wed Oct 10 20:19:24 +0000 2018",
                "description": "",
                "favourites_count": 0,
                "followers_count": 1,
                "friends_count": 1,
                "listed_count": 0,
                "media_count": 0,
                "name": screen_name,
                "screen_name": screen_name,
                "statuses_count": 1
            }
        }
    })
}

pub fn tweet_result(id: u64, text: &str) -> Value {
    json!({
        "result": {
            "__typename": "Tweet",
            "rest_id": id.to_string(),
            "core": { "user_results": user_result(42, "author") },
            "legacy": {
                "id_str": id.to_string(),
                "user_id_str": "42",
                "full_text": text,
                "created_at": "Thu Jan 04 12:00:00 +0000 2024",
                "favorite_count": 0,
                "reply_count": 0,
                "retweet_count": 0,
                "quote_count": 0
            }
        }
    })
}

/// A `tweet-<id>` entry whose text names the stream it came from.
pub fn tweet_entry(id: u64, text: &str) -> Value {
    json!({
        "entryId": format!("tweet-{id}"),
        "content": {
            "entryType": "TimelineTimelineItem",
            "__typename": "TimelineTimelineItem",
            "itemContent": {
                "itemType": "TimelineTweet",
                "__typename": "TimelineTweet",
                "tweetDisplayType": "Tweet",
                "tweet_results": tweet_result(id, text)
            }
        }
    })
}

pub fn bottom_cursor(value: &str) -> Value {
    json!({
        "entryId": "cursor-bottom-0",
        "content": {
            "entryType": "TimelineTimelineCursor",
            "__typename": "TimelineTimelineCursor",
            "value": value,
            "cursorType": "Bottom"
        }
    })
}

/// A user timeline response with the given entries, optional pin and bottom cursor.
pub fn timeline_page(entries: Vec<Value>, pinned: Option<Value>, cursor: Option<&str>) -> Value {
    let mut entries = entries;
    if let Some(cursor) = cursor {
        entries.push(bottom_cursor(cursor));
    }
    let mut instructions = vec![json!({"type": "TimelineClearCache"})];
    if let Some(pinned) = pinned {
        instructions.push(json!({"type": "TimelinePinEntry", "entry": pinned}));
    }
    instructions.push(json!({"type": "TimelineAddEntries", "entries": entries}));
    json!({
        "data": {
            "user": {
                "result": {
                    "__typename": "User",
                    "timeline_v2": { "timeline": { "instructions": instructions } }
                }
            }
        }
    })
}

/// Page of plain tweets labelled with `label`, followed by `cursor`.
pub fn page_of(ids: &[u64], label: &str, cursor: &str) -> Value {
    let entries = ids.iter().map(|id| tweet_entry(*id, label)).collect();
    timeline_page(entries, None, Some(cursor))
}

// =============================================================================
// Mock timeline source
// =============================================================================

/// Timeline source serving canned pages keyed by the cursor requested.
pub struct MockTimeline {
    kind: TimelineKind,
    pages: HashMap<String, Value>,
    requested: Mutex<Vec<String>>,
}

impl MockTimeline {
    pub fn new(kind: TimelineKind) -> Self {
        Self {
            kind,
            pages: HashMap::new(),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Serve `page` when `cursor` is requested (`""` for the first page).
    #[must_use]
    pub fn page(mut self, cursor: &str, page: Value) -> Self {
        self.pages.insert(cursor.to_string(), page);
        self
    }

    /// Cursors requested so far, in order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl TimelineSource for MockTimeline {
    fn kind(&self) -> TimelineKind {
        self.kind
    }

    async fn fetch(&self, _id: u64, cursor: &Cursor) -> Result<Option<Value>> {
        self.requested
            .lock()
            .unwrap()
            .push(cursor.as_str().to_string());
        Ok(self.pages.get(cursor.as_str()).cloned())
    }
}
