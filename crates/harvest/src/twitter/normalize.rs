//! Normalization of raw user and tweet results into records.
//!
//! Both entry points take a `*_results` wrapper (`{"result": {...}}`). A
//! wrapper without a result is deleted or unavailable content and yields
//! `Ok(None)`; a result of an unknown `__typename` is a decode failure.
//! The input tree is never modified.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::shape::{parse_id, ValueExt};
use super::types::{MediaItem, OriginalInfo, TweetRecord, UrlRef, UserRecord, VideoInfo};
use crate::error::DecodeError;

/// Accepted `__typename`s of a tweet result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TweetResultKind {
    /// A plain tweet.
    Tweet,
    /// A tweet with visibility restrictions, nesting the real tweet under `tweet`.
    WithVisibilityResults,
}

impl TweetResultKind {
    fn of(result: &Value) -> Result<Self, DecodeError> {
        match result.req_str("__typename")? {
            "Tweet" => Ok(Self::Tweet),
            "TweetWithVisibilityResults" => Ok(Self::WithVisibilityResults),
            other => Err(DecodeError::UnknownTypename {
                context: "tweet result",
                typename: other.to_string(),
            }),
        }
    }
}

#[derive(Deserialize)]
struct LegacyUser {
    created_at: String,
    description: String,
    favourites_count: u64,
    followers_count: u64,
    friends_count: u64,
    listed_count: u64,
    media_count: u64,
    name: String,
    screen_name: String,
    statuses_count: u64,
}

#[derive(Deserialize)]
struct LegacyTweet {
    id_str: String,
    user_id_str: String,
    full_text: String,
    created_at: String,
    favorite_count: u64,
    reply_count: u64,
    retweet_count: u64,
    quote_count: u64,
    bookmark_count: Option<u64>,
    lang: Option<String>,
    possibly_sensitive: Option<bool>,
}

#[derive(Deserialize)]
struct RawMedia {
    id_str: String,
    media_url_https: Option<String>,
    media_url: Option<String>,
    #[serde(rename = "type")]
    media_type: String,
    original_info: OriginalInfo,
    additional_media_info: Option<Map<String, Value>>,
    url: Option<String>,
    display_url: Option<String>,
    expanded_url: Option<String>,
    media_key: Option<String>,
    ext_alt_text: Option<String>,
    video_info: Option<VideoInfo>,
}

#[derive(Deserialize)]
struct RawHashtag {
    text: String,
}

/// Normalize a `user_results` wrapper.
pub fn normalize_user(wrapper: &Value) -> Result<Option<UserRecord>, DecodeError> {
    let Some(result) = wrapper.opt("result") else {
        return Ok(None);
    };

    let typename = result.req_str("__typename")?;
    if typename != "User" {
        return Err(DecodeError::UnknownTypename {
            context: "user result",
            typename: typename.to_string(),
        });
    }

    let id_str = result.req_str("rest_id")?;
    let legacy: LegacyUser = result.decode("legacy")?;

    Ok(Some(UserRecord {
        id: parse_id(id_str)?,
        id_str: id_str.to_string(),
        created_at: legacy.created_at,
        description: legacy.description,
        favourites_count: legacy.favourites_count,
        followers_count: legacy.followers_count,
        friends_count: legacy.friends_count,
        listed_count: legacy.listed_count,
        media_count: legacy.media_count,
        name: legacy.name,
        screen_name: legacy.screen_name,
        statuses_count: legacy.statuses_count,
    }))
}

/// Normalize a `tweet_results` wrapper, including its author and any
/// retweeted or quoted tweet.
pub fn normalize_tweet(wrapper: &Value) -> Result<Option<TweetRecord>, DecodeError> {
    let Some(result) = wrapper.opt("result") else {
        return Ok(None);
    };

    let tweet = match TweetResultKind::of(result)? {
        TweetResultKind::Tweet => result,
        TweetResultKind::WithVisibilityResults => result.req("tweet")?,
    };
    build_tweet(tweet).map(Some)
}

fn build_tweet(tweet: &Value) -> Result<TweetRecord, DecodeError> {
    let id_str = tweet.req_str("rest_id")?;
    let id = parse_id(id_str)?;

    let user = normalize_user(tweet.req("core")?.req("user_results")?)?.ok_or_else(|| {
        DecodeError::MissingAuthor {
            tweet_id: id_str.to_string(),
        }
    })?;

    let legacy_node = tweet.req("legacy")?;
    let legacy: LegacyTweet = tweet.decode("legacy")?;

    if legacy.id_str != id_str {
        return Err(DecodeError::IdMismatch {
            field: "id_str",
            expected: id_str.to_string(),
            found: legacy.id_str,
        });
    }
    if legacy.user_id_str != user.id_str {
        return Err(DecodeError::IdMismatch {
            field: "user_id_str",
            expected: user.id_str,
            found: legacy.user_id_str,
        });
    }

    let retweeted_status = nested_tweet(tweet, legacy_node, "retweeted_status_result")?;
    let quoted_status = nested_tweet(tweet, legacy_node, "quoted_status_result")?;

    let (media, hashtags, urls) = match legacy_node.opt("entities") {
        Some(entities) => (
            media_items(entities)?,
            hashtag_texts(entities)?,
            url_refs(entities)?,
        ),
        None => (None, None, None),
    };

    Ok(TweetRecord {
        id,
        id_str: id_str.to_string(),
        user,
        text: legacy.full_text,
        created_at: legacy.created_at,
        favorite_count: legacy.favorite_count,
        reply_count: legacy.reply_count,
        retweet_count: legacy.retweet_count,
        quote_count: legacy.quote_count,
        bookmark_count: legacy.bookmark_count,
        lang: legacy.lang,
        possibly_sensitive: legacy.possibly_sensitive,
        media,
        hashtags,
        urls,
        retweeted_status,
        quoted_status,
    })
}

/// Embedded retweet or quote. Newer responses carry these beside `legacy`
/// rather than inside it, so both places are checked.
fn nested_tweet(
    tweet: &Value,
    legacy: &Value,
    key: &str,
) -> Result<Option<Box<TweetRecord>>, DecodeError> {
    let Some(wrapper) = legacy.opt(key).or_else(|| tweet.opt(key)) else {
        return Ok(None);
    };
    Ok(normalize_tweet(wrapper)?.map(Box::new))
}

fn media_items(entities: &Value) -> Result<Option<Vec<MediaItem>>, DecodeError> {
    if entities.opt("media").is_none() {
        return Ok(None);
    }
    let raw: Vec<RawMedia> = entities.decode("media")?;
    raw.into_iter()
        .map(media_item)
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn media_item(raw: RawMedia) -> Result<MediaItem, DecodeError> {
    let media_url = raw
        .media_url_https
        .or(raw.media_url)
        .ok_or_else(|| DecodeError::MissingField {
            field: "media_url_https".to_string(),
        })?;

    let additional_media_info = raw.additional_media_info.map(|mut info| {
        info.remove("source_user");
        info
    });

    Ok(MediaItem {
        id: parse_id(&raw.id_str)?,
        id_str: raw.id_str,
        media_url,
        media_type: raw.media_type,
        original_info: raw.original_info,
        additional_media_info,
        url: raw.url,
        display_url: raw.display_url,
        expanded_url: raw.expanded_url,
        media_key: raw.media_key,
        ext_alt_text: raw.ext_alt_text,
        video_info: raw.video_info,
    })
}

fn hashtag_texts(entities: &Value) -> Result<Option<Vec<String>>, DecodeError> {
    if entities.opt("hashtags").is_none() {
        return Ok(None);
    }
    let raw: Vec<RawHashtag> = entities.decode("hashtags")?;
    Ok(Some(raw.into_iter().map(|tag| tag.text).collect()))
}

fn url_refs(entities: &Value) -> Result<Option<Vec<UrlRef>>, DecodeError> {
    entities
        .opt("urls")
        .map(|_| entities.decode("urls"))
        .transpose()
}
