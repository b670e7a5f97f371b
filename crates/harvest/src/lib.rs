//! Harvester for X/Twitter GraphQL timelines.
//!
//! This crate provides:
//! - Decoding of `__typename`-tagged GraphQL responses into flat tweet and user records
//! - Cursor pagination with range bounds, deduplication and stream merging
//! - A cookie-authenticated GraphQL client
//! - TOML configuration and JSON output

pub mod auth;
pub mod config;
pub mod error;
pub mod output;
pub mod snowflake;
pub mod source;
pub mod twitter;

// Re-export main types
pub use auth::Session;
pub use config::HarvestConfig;
pub use error::{DecodeError, Error, Result};
pub use source::{GraphqlClient, LookupSource, TimelineKind, TimelineSource};
pub use twitter::{Cursor, Page, TimelineEntry, TweetRecord, UserRecord, WalkBounds};
