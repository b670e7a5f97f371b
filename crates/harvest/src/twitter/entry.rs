//! Timeline entry decoding.
//!
//! An entry is classified by its `entryId` prefix, then unwrapped through
//! `content` / `items` / `itemContent`, checking the type tag at each step.

use serde_json::Value;

use super::normalize::{normalize_tweet, normalize_user};
use super::shape::{expect_one_of, expect_tag, ValueExt};
use super::types::TimelineEntry;
use crate::error::DecodeError;

/// Entry kinds, in matching precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// `tweet-<id>`: a single tweet item.
    Tweet,
    /// `profile-conversation-<n>`: a module of tweets forming a thread.
    ProfileConversation,
    /// `profile-grid-<n>`: media grid module, or one grid item on its own.
    ProfileGrid,
    /// `user-<id>`: a single user item.
    User,
    /// Promotions, suggestions and cursors.
    Ignored,
}

impl EntryKind {
    const IGNORED_PREFIXES: [&'static str; 4] = [
        "promoted-tweet-",
        "who-to-follow-",
        "cursor-bottom-",
        "cursor-top-",
    ];

    /// Classify an entry id. `None` means the kind is unknown.
    #[must_use]
    pub fn classify(entry_id: &str) -> Option<Self> {
        if entry_id.starts_with("tweet-") {
            Some(Self::Tweet)
        } else if entry_id.starts_with("profile-conversation-") {
            Some(Self::ProfileConversation)
        } else if entry_id.starts_with("profile-grid-") {
            Some(Self::ProfileGrid)
        } else if entry_id.starts_with("user-") {
            Some(Self::User)
        } else if Self::IGNORED_PREFIXES
            .iter()
            .any(|prefix| entry_id.starts_with(prefix))
        {
            Some(Self::Ignored)
        } else {
            None
        }
    }
}

/// Decode one raw entry into zero or more timeline entries.
///
/// Deleted or unavailable content is dropped; an unknown entry kind or an
/// unexpected type tag is a decode failure.
pub fn decode_entry(entry: &Value) -> Result<Vec<TimelineEntry>, DecodeError> {
    let entry_id = entry.req_str("entryId")?;
    let Some(kind) = EntryKind::classify(entry_id) else {
        tracing::error!(entry_id, "Unknown timeline entry kind");
        return Err(DecodeError::UnknownEntry {
            entry_id: entry_id.to_string(),
        });
    };

    let decoded = match kind {
        EntryKind::Tweet => {
            let content = single_item(entry)?;
            vec![timeline_tweet(content.req("itemContent")?)?]
        }
        EntryKind::ProfileConversation => module_items(entry.req("content")?)?
            .iter()
            .map(|item| module_tweet(item, "profile-conversation"))
            .collect::<Result<Vec<_>, _>>()?,
        EntryKind::ProfileGrid => {
            let items = match entry.opt("content") {
                Some(content) => module_items(content)?,
                // Older media timelines put the grid item on the entry itself.
                None => std::slice::from_ref(entry),
            };
            items
                .iter()
                .map(|item| module_tweet(item, "profile-grid-"))
                .collect::<Result<Vec<_>, _>>()?
        }
        EntryKind::User => {
            let content = single_item(entry)?;
            vec![timeline_user(content.req("itemContent")?)?]
        }
        EntryKind::Ignored => Vec::new(),
    };

    Ok(decoded.into_iter().flatten().collect())
}

/// Decode one element of a `TimelineAddToModule` instruction's `moduleItems`.
///
/// Media timelines deliver later grid pages this way, and threads get their
/// continuation tweets this way. `module_id` is the instruction's
/// `moduleEntryId` and selects the item prefix to check against.
pub fn decode_module_item(
    module_id: &str,
    item: &Value,
) -> Result<Option<TimelineEntry>, DecodeError> {
    match EntryKind::classify(module_id) {
        Some(EntryKind::ProfileConversation) => module_tweet(item, "profile-conversation"),
        Some(EntryKind::ProfileGrid) => module_tweet(item, "profile-grid-"),
        _ => {
            tracing::error!(module_id, "Unknown timeline module kind");
            Err(DecodeError::UnknownEntry {
                entry_id: module_id.to_string(),
            })
        }
    }
}

fn single_item(entry: &Value) -> Result<&Value, DecodeError> {
    let content = entry.req("content")?;
    expect_tag(content, "entryType", "TimelineTimelineItem")?;
    expect_tag(content, "__typename", "TimelineTimelineItem")?;
    Ok(content)
}

fn module_items(content: &Value) -> Result<&[Value], DecodeError> {
    expect_tag(content, "entryType", "TimelineTimelineModule")?;
    expect_tag(content, "__typename", "TimelineTimelineModule")?;
    content.req_array("items")
}

fn module_tweet(item: &Value, prefix: &str) -> Result<Option<TimelineEntry>, DecodeError> {
    let entry_id = item.req_str("entryId")?;
    if !entry_id.starts_with(prefix) {
        return Err(DecodeError::UnexpectedTag {
            field: "entryId",
            expected: format!("{prefix}*"),
            found: entry_id.to_string(),
        });
    }
    timeline_tweet(item.req("item")?.req("itemContent")?)
}

fn timeline_tweet(item_content: &Value) -> Result<Option<TimelineEntry>, DecodeError> {
    expect_tag(item_content, "itemType", "TimelineTweet")?;
    expect_tag(item_content, "__typename", "TimelineTweet")?;
    expect_one_of(item_content, "tweetDisplayType", &["Tweet", "MediaGrid"])?;
    Ok(normalize_tweet(item_content.req("tweet_results")?)?.map(TimelineEntry::Tweet))
}

fn timeline_user(item_content: &Value) -> Result<Option<TimelineEntry>, DecodeError> {
    expect_tag(item_content, "itemType", "TimelineUser")?;
    expect_tag(item_content, "__typename", "TimelineUser")?;
    expect_tag(item_content, "userDisplayType", "User")?;
    Ok(normalize_user(item_content.req("user_results")?)?.map(TimelineEntry::User))
}
