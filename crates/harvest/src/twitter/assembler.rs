//! Timeline assembly and object resolution on top of the sources.

use super::normalize::{normalize_tweet, normalize_user};
use super::pager::{fetch_page, newest_first_unique, walk};
use super::types::{Cursor, TimelineEntry, TweetRecord, UserRecord, WalkBounds};
use crate::error::{Error, Result};
use crate::source::{LookupSource, TimelineSource};

/// Walk a user's tweets and media streams and merge them.
///
/// Both walks run concurrently on the current task. On an id collision the
/// record from the tweets stream is kept.
pub async fn assemble_user_timeline(
    tweets: &dyn TimelineSource,
    media: &dyn TimelineSource,
    user_id: u64,
    bounds: WalkBounds,
) -> Result<Vec<TweetRecord>> {
    let (mut merged, media_tweets) =
        futures::try_join!(walk(tweets, user_id, bounds), walk(media, user_id, bounds))?;

    tracing::debug!(
        user_id,
        tweets = merged.len(),
        media = media_tweets.len(),
        "Merging timeline streams"
    );
    merged.extend(media_tweets);
    Ok(newest_first_unique(merged))
}

/// Resolve users by screen name and by id.
///
/// Screen-name results come first, then id results. Users that cannot be
/// resolved are left out.
pub async fn resolve_users(
    source: &dyn LookupSource,
    screen_names: &[String],
    user_ids: &[u64],
) -> Result<Vec<UserRecord>> {
    let mut wrappers = Vec::with_capacity(screen_names.len() + user_ids.len());
    for screen_name in screen_names {
        wrappers.extend(source.user_by_screen_name(screen_name).await?);
    }
    match user_ids {
        [] => {}
        [id] => wrappers.extend(source.user_by_id(*id).await?),
        ids => wrappers.extend(source.users_by_ids(ids).await?),
    }

    let mut users = Vec::with_capacity(wrappers.len());
    for wrapper in &wrappers {
        users.extend(normalize_user(wrapper)?);
    }
    if users.len() < screen_names.len() + user_ids.len() {
        tracing::info!(
            requested = screen_names.len() + user_ids.len(),
            resolved = users.len(),
            "Some users could not be resolved"
        );
    }
    Ok(users)
}

/// Resolve tweets by id, one lookup each. Unavailable tweets are left out.
pub async fn resolve_tweets_by_ids(
    source: &dyn LookupSource,
    tweet_ids: &[u64],
) -> Result<Vec<TweetRecord>> {
    let mut tweets = Vec::with_capacity(tweet_ids.len());
    for &id in tweet_ids {
        let Some(wrapper) = source.tweet_by_id(id).await? else {
            tracing::debug!(tweet_id = id, "Tweet lookup returned nothing");
            continue;
        };
        tweets.extend(normalize_tweet(&wrapper)?);
    }
    Ok(tweets)
}

/// Members of a list, from the first page of its members timeline.
pub async fn resolve_list_members(
    source: &dyn TimelineSource,
    list_id: u64,
) -> Result<Vec<UserRecord>> {
    let page = fetch_page(source, list_id, &Cursor::start()).await?;
    let members: Vec<UserRecord> = page
        .entries
        .into_iter()
        .filter_map(TimelineEntry::into_user)
        .collect();
    tracing::info!(list_id, count = members.len(), "Resolved list members");
    Ok(members)
}

/// Numeric id for a screen name.
pub async fn resolve_user_id(source: &dyn LookupSource, screen_name: &str) -> Result<u64> {
    let wrapper = source.user_by_screen_name(screen_name).await?;
    let user = match wrapper {
        Some(wrapper) => normalize_user(&wrapper)?,
        None => None,
    };
    user.map(|user| user.id)
        .ok_or_else(|| Error::NotFound(format!("user @{screen_name}")))
}
