//! Cursor pagination over timeline sources.

use serde_json::Value;

use super::entry::{decode_entry, decode_module_item};
use super::shape::ValueExt;
use super::types::{Cursor, Page, TimelineEntry, TweetRecord, WalkBounds};
use crate::error::{DecodeError, Result};
use crate::source::{TimelineKind, TimelineSource};

/// Timeline instructions this pager acts on.
#[derive(Debug, Clone, Copy)]
enum Instruction<'a> {
    ClearCache,
    PinEntry(Option<&'a Value>),
    AddEntries(&'a [Value]),
    AddToModule {
        module_id: &'a str,
        items: &'a [Value],
    },
    Other,
}

impl<'a> Instruction<'a> {
    fn parse(raw: &'a Value) -> std::result::Result<Self, DecodeError> {
        Ok(match raw.req_str("type")? {
            "TimelineClearCache" => Self::ClearCache,
            "TimelinePinEntry" => Self::PinEntry(raw.opt("entry")),
            "TimelineAddEntries" => Self::AddEntries(raw.req_array("entries")?),
            "TimelineAddToModule" => Self::AddToModule {
                module_id: raw.req_str("moduleEntryId")?,
                items: raw.req_array("moduleItems")?,
            },
            other => {
                tracing::debug!(instruction = other, "Ignoring timeline instruction");
                Self::Other
            }
        })
    }
}

/// Fetch and decode one page at `cursor`.
pub async fn fetch_page(source: &dyn TimelineSource, id: u64, cursor: &Cursor) -> Result<Page> {
    let kind = source.kind();
    let Some(raw) = source.fetch(id, cursor).await? else {
        tracing::info!(id, timeline = kind.operation(), "Timeline unavailable");
        return Ok(Page::exhausted());
    };
    Ok(decode_page(kind, &raw)?)
}

/// Decode a raw timeline response into a page.
///
/// A response without the timeline's owner object (protected, suspended or
/// deleted account, missing list) gives an exhausted page.
pub fn decode_page(kind: TimelineKind, raw: &Value) -> std::result::Result<Page, DecodeError> {
    let Some(root) = raw.at(kind.result_root()) else {
        tracing::info!(timeline = kind.operation(), "Response has no timeline owner");
        return Ok(Page::exhausted());
    };

    let instructions = kind
        .instruction_paths()
        .iter()
        .find_map(|path| root.at(path))
        .ok_or_else(|| DecodeError::MissingField {
            field: "instructions".to_string(),
        })?
        .as_array()
        .ok_or_else(|| DecodeError::InvalidField {
            field: "instructions".to_string(),
            reason: "expected an array".to_string(),
        })?;

    let mut pinned = None;
    let mut entries = None;
    let mut module_items = None;
    for raw in instructions {
        match Instruction::parse(raw)? {
            Instruction::PinEntry(entry) => {
                pinned = pinned.or(Some(entry));
            }
            Instruction::AddEntries(list) => {
                entries = entries.or(Some(list));
            }
            Instruction::AddToModule { module_id, items } => {
                module_items = module_items.or(Some((module_id, items)));
            }
            Instruction::ClearCache | Instruction::Other => {}
        }
    }
    let entries = entries.unwrap_or_default();

    let next_cursor = bottom_cursor(entries)?;

    let mut decoded = Vec::with_capacity(entries.len());
    for entry in entries {
        decoded.extend(decode_entry(entry)?);
    }
    if let Some((module_id, items)) = module_items {
        for item in items {
            decoded.extend(decode_module_item(module_id, item)?);
        }
    }

    let pinned = match pinned.flatten() {
        Some(entry) => decode_entry(entry)?.into_iter().next(),
        None => None,
    };

    Ok(Page {
        entries: decoded,
        pinned,
        next_cursor,
    })
}

/// Find the bottom cursor among a page's entries.
///
/// Two encodings exist: the value under `content.itemContent` and the value
/// directly on `content`. The nested one wins when both are present.
fn bottom_cursor(entries: &[Value]) -> std::result::Result<Option<Cursor>, DecodeError> {
    let Some(entry) = entries.iter().find(|entry| {
        entry
            .get("entryId")
            .and_then(Value::as_str)
            .is_some_and(|id| id.contains("cursor-bottom"))
    }) else {
        return Ok(None);
    };

    let content = entry.req("content")?;
    let value = match content.opt("itemContent") {
        Some(item_content) => item_content.req_str("value")?,
        None => content.req_str("value")?,
    };
    Ok(Some(Cursor::new(value)))
}

/// Walk a timeline from the newest page down.
///
/// Stops after a page that is empty, that reaches `since`, after which the
/// accumulated count exceeds `count`, or that gives no way forward. Returns
/// tweets in `(since, until]`, newest first, one per id.
pub async fn walk(
    source: &dyn TimelineSource,
    id: u64,
    bounds: WalkBounds,
) -> Result<Vec<TweetRecord>> {
    let timeline = source.kind().operation();
    let mut cursor = Cursor::start();
    let mut tweets: Vec<TweetRecord> = Vec::new();
    let mut pages = 0usize;

    loop {
        let page = fetch_page(source, id, &cursor).await?;
        pages += 1;

        let page_len = page.entries.len();
        let mut crossed_since = false;
        for entry in page.entries {
            match entry {
                TimelineEntry::Tweet(tweet) => {
                    crossed_since |= tweet.id <= bounds.since;
                    tweets.push(tweet);
                }
                TimelineEntry::User(user) => {
                    tracing::debug!(user_id = user.id, "Skipping user entry on tweet timeline");
                }
            }
        }
        if let Some(pinned) = page.pinned.and_then(TimelineEntry::into_tweet) {
            tweets.push(pinned);
        }

        tracing::debug!(
            timeline,
            page = pages,
            entries = page_len,
            total = tweets.len(),
            "Fetched timeline page"
        );

        if page_len == 0 || crossed_since || tweets.len() > bounds.count {
            break;
        }
        match page.next_cursor {
            Some(next) if !next.is_terminal() && next != cursor => cursor = next,
            _ => {
                tracing::debug!(timeline, page = pages, "No further cursor, stopping");
                break;
            }
        }
    }

    tweets.retain(|tweet| bounds.contains(tweet.id));
    let tweets = newest_first_unique(tweets);
    tracing::info!(timeline, id, pages, count = tweets.len(), "Timeline walk finished");
    Ok(tweets)
}

/// Sort by id descending and keep one record per id.
///
/// The sort is stable, so among records sharing an id the one encountered
/// first survives.
pub fn newest_first_unique(mut tweets: Vec<TweetRecord>) -> Vec<TweetRecord> {
    tweets.sort_by(|a, b| b.id.cmp(&a.id));
    tweets.dedup_by_key(|tweet| tweet.id);
    tweets
}
