//! Normalized Twitter records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user profile, reduced to the stable legacy fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Numeric user ID.
    pub id: u64,
    /// User ID as sent by the platform.
    pub id_str: String,
    /// Account creation time, legacy format.
    pub created_at: String,
    /// Profile bio.
    pub description: String,
    pub favourites_count: u64,
    pub followers_count: u64,
    pub friends_count: u64,
    pub listed_count: u64,
    pub media_count: u64,
    /// Display name.
    pub name: String,
    /// Handle without the leading @.
    pub screen_name: String,
    pub statuses_count: u64,
}

/// A tweet with its author and any embedded retweet/quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetRecord {
    /// Unique tweet ID.
    pub id: u64,
    /// Tweet ID as sent by the platform.
    pub id_str: String,
    /// Tweet author.
    pub user: UserRecord,
    /// Full display text.
    pub text: String,
    /// When the tweet was posted, legacy format.
    pub created_at: String,
    pub favorite_count: u64,
    pub reply_count: u64,
    pub retweet_count: u64,
    pub quote_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possibly_sensitive: Option<bool>,
    /// Attached media.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<MediaItem>>,
    /// Hashtag texts, without the #.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<Vec<String>>,
    /// Links found in the tweet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<UrlRef>>,
    /// The original tweet, if this is a retweet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retweeted_status: Option<Box<TweetRecord>>,
    /// The quoted tweet, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quoted_status: Option<Box<TweetRecord>>,
}

/// Media attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    /// Parsed from `id_str`, never read separately.
    pub id: u64,
    pub id_str: String,
    /// HTTPS URL of the media file.
    pub media_url: String,
    /// Media type (photo, video, animated_gif).
    #[serde(rename = "type")]
    pub media_type: String,
    pub original_info: OriginalInfo,
    /// Platform-provided extra info, without `source_user`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_media_info: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_key: Option<String>,
    /// Alt text if available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext_alt_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_info: Option<VideoInfo>,
}

/// Original dimensions of a media file. Focus rectangles are not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginalInfo {
    pub width: u64,
    pub height: u64,
}

/// Playback variants of a video or GIF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct VideoInfo {
    #[serde(default)]
    pub aspect_ratio: Vec<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_millis: Option<u64>,
    #[serde(default)]
    pub variants: Vec<VideoVariant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct VideoVariant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u64>,
    pub content_type: String,
    pub url: String,
}

/// A link entity: the t.co short form and where it points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct UrlRef {
    pub url: String,
    pub expanded_url: String,
}

/// One decoded item of a timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TimelineEntry {
    Tweet(TweetRecord),
    User(UserRecord),
}

impl TimelineEntry {
    /// ID of the wrapped record.
    #[must_use]
    pub fn id(&self) -> u64 {
        match self {
            Self::Tweet(tweet) => tweet.id,
            Self::User(user) => user.id,
        }
    }

    #[must_use]
    pub fn into_tweet(self) -> Option<TweetRecord> {
        match self {
            Self::Tweet(tweet) => Some(tweet),
            Self::User(_) => None,
        }
    }

    #[must_use]
    pub fn into_user(self) -> Option<UserRecord> {
        match self {
            Self::User(user) => Some(user),
            Self::Tweet(_) => None,
        }
    }
}

/// Opaque pagination token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Sentinel for "no further pages can exist".
    const TERMINAL: &'static str = "-";

    /// The cursor a fresh walk starts from.
    #[must_use]
    pub fn start() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub fn terminal() -> Self {
        Self(Self::TERMINAL.to_string())
    }

    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn is_start(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.0 == Self::TERMINAL
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One decoded timeline response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Entries in the order the platform sent them.
    pub entries: Vec<TimelineEntry>,
    /// Pinned entry, returned out of chronological order.
    pub pinned: Option<TimelineEntry>,
    /// Cursor for the next page. `None` if the page carried no bottom cursor.
    pub next_cursor: Option<Cursor>,
}

impl Page {
    /// Page for an unavailable timeline (protected, suspended, deleted).
    #[must_use]
    pub fn exhausted() -> Self {
        Self {
            entries: Vec::new(),
            pinned: None,
            next_cursor: Some(Cursor::terminal()),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Id range and size cap for a timeline walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkBounds {
    /// Exclusive lower id bound.
    pub since: u64,
    /// Inclusive upper id bound.
    pub until: u64,
    /// Stop once more than this many records have accumulated.
    pub count: usize,
}

impl Default for WalkBounds {
    fn default() -> Self {
        Self {
            since: 0,
            until: u64::MAX,
            count: usize::MAX,
        }
    }
}

impl WalkBounds {
    /// Check whether an id falls inside `(since, until]`.
    #[must_use]
    pub fn contains(&self, id: u64) -> bool {
        self.since < id && id <= self.until
    }
}
