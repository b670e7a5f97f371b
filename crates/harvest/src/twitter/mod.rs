//! Twitter/X GraphQL timeline decoding and pagination.
//!
//! Raw responses are decoded bottom-up: [`normalize`] turns user and tweet
//! results into records, [`entry`] classifies timeline entries, [`pager`]
//! walks cursors, and [`assembler`] merges streams and resolves lookups.

pub mod assembler;
pub mod entry;
pub mod normalize;
pub mod pager;
pub mod shape;
mod types;

#[cfg(test)]
mod fixtures;

pub use assembler::{
    assemble_user_timeline, resolve_list_members, resolve_tweets_by_ids, resolve_user_id,
    resolve_users,
};
pub use entry::{decode_entry, decode_module_item, EntryKind};
pub use normalize::{normalize_tweet, normalize_user};
pub use pager::{decode_page, fetch_page, newest_first_unique, walk};
pub use shape::ValueExt;
pub use types::{
    Cursor, MediaItem, OriginalInfo, Page, TimelineEntry, TweetRecord, UrlRef, UserRecord,
    VideoInfo, VideoVariant, WalkBounds,
};
