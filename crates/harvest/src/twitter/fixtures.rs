//! Raw GraphQL fixtures for unit tests.

use serde_json::{json, Value};

pub fn user_result(id: u64, screen_name: &str) -> Value {
    json!({
        "result": {
            "__typename": "User",
            "rest_id": id.to_string(),
            "legacy": {
                "created_at": "Wed Oct 10 20:19:24 +0000 2018",
                "description": format!("bio of {screen_name}"),
                "favourites_count": 10,
                "followers_count": 20,
                "friends_count": 30,
                "listed_count": 1,
                "media_count": 2,
                "name": screen_name.to_uppercase(),
                "screen_name": screen_name,
                "statuses_count": 100,
                "verified": false
            }
        }
    })
}

pub fn tweet_result(id: u64, user_id: u64, text: &str) -> Value {
    json!({
        "result": {
            "__typename": "Tweet",
            "rest_id": id.to_string(),
            "core": { "user_results": user_result(user_id, &format!("user{user_id}")) },
            "legacy": {
                "id_str": id.to_string(),
                "user_id_str": user_id.to_string(),
                "full_text": text,
                "created_at": "Thu Jan 04 12:00:00 +0000 2024",
                "favorite_count": 5,
                "reply_count": 1,
                "retweet_count": 2,
                "quote_count": 0,
                "bookmark_count": 3,
                "lang": "en",
                "favorited": false
            }
        }
    })
}

pub fn tweet_item_content(tweet_results: Value) -> Value {
    json!({
        "itemType": "TimelineTweet",
        "__typename": "TimelineTweet",
        "tweetDisplayType": "Tweet",
        "tweet_results": tweet_results
    })
}

pub fn tweet_entry(id: u64) -> Value {
    json!({
        "entryId": format!("tweet-{id}"),
        "sortIndex": id.to_string(),
        "content": {
            "entryType": "TimelineTimelineItem",
            "__typename": "TimelineTimelineItem",
            "itemContent": tweet_item_content(tweet_result(id, 42, &format!("tweet {id}")))
        }
    })
}

pub fn user_entry(id: u64, screen_name: &str) -> Value {
    json!({
        "entryId": format!("user-{id}"),
        "content": {
            "entryType": "TimelineTimelineItem",
            "__typename": "TimelineTimelineItem",
            "itemContent": {
                "itemType": "TimelineUser",
                "__typename": "TimelineUser",
                "userDisplayType": "User",
                "user_results": user_result(id, screen_name)
            }
        }
    })
}

pub fn module_item(entry_id: &str, tweet_id: u64) -> Value {
    json!({
        "entryId": entry_id,
        "item": {
            "itemContent": tweet_item_content(tweet_result(tweet_id, 42, &format!("tweet {tweet_id}")))
        }
    })
}

pub fn module_entry(entry_id: &str, items: Vec<Value>) -> Value {
    json!({
        "entryId": entry_id,
        "content": {
            "entryType": "TimelineTimelineModule",
            "__typename": "TimelineTimelineModule",
            "items": items
        }
    })
}

pub fn cursor_entry(entry_id: &str, value: &str) -> Value {
    json!({
        "entryId": entry_id,
        "content": {
            "entryType": "TimelineTimelineCursor",
            "__typename": "TimelineTimelineCursor",
            "value": value,
            "cursorType": "Bottom"
        }
    })
}

/// A `UserTweets`-style response carrying the given instructions.
pub fn user_timeline(instructions: Vec<Value>) -> Value {
    json!({
        "data": {
            "user": {
                "result": {
                    "__typename": "User",
                    "timeline_v2": {
                        "timeline": { "instructions": instructions }
                    }
                }
            }
        }
    })
}

pub fn add_entries(entries: Vec<Value>) -> Value {
    json!({ "type": "TimelineAddEntries", "entries": entries })
}

pub fn pin_entry(entry: Value) -> Value {
    json!({ "type": "TimelinePinEntry", "entry": entry })
}
