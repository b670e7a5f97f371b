//! Harvest CLI - dump X/Twitter timelines as normalized JSON records.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use harvest::auth::Session;
use harvest::config::HarvestConfig;
use harvest::output;
use harvest::snowflake;
use harvest::source::{GraphqlClient, TimelineKind};
use harvest::twitter::{self, TimelineEntry, WalkBounds};

/// Harvest CLI - decode and paginate X/Twitter GraphQL timelines.
#[derive(Parser)]
#[command(name = "harvest")]
#[command(about = "Twitter/X timeline harvester")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./harvest.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Session JSON file with auth cookies
    #[arg(long, global = true, conflicts_with = "request_file")]
    session: Option<PathBuf>,

    /// Captured HTTP request whose Cookie header holds the session
    #[arg(long, global = true)]
    request_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk a user's timeline and print its tweets
    Timeline {
        /// Screen name, without the @
        screen_name: String,

        /// Numeric user id (skips the screen-name lookup)
        #[arg(long)]
        user_id: Option<u64>,

        /// Only return tweets with an id greater than this
        #[arg(long, default_value = "0")]
        since: u64,

        /// Only return tweets with an id up to and including this
        #[arg(long)]
        until: Option<u64>,

        /// Stop paginating once more than this many tweets are collected
        #[arg(long)]
        count: Option<usize>,

        /// Only return tweets created at or after this time (RFC 3339)
        #[arg(long)]
        since_date: Option<DateTime<Utc>>,

        /// Only return tweets created at or before this time (RFC 3339)
        #[arg(long)]
        until_date: Option<DateTime<Utc>>,

        /// Walk the tweets stream only
        #[arg(long, conflicts_with = "media_only")]
        tweets_only: bool,

        /// Walk the media stream only
        #[arg(long)]
        media_only: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Look up tweets by id
    Tweets {
        /// Tweet ids
        #[arg(required = true)]
        ids: Vec<u64>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Look up users by screen name and/or id
    Users {
        /// Screen name (repeatable)
        #[arg(long = "screen-name")]
        screen_names: Vec<String>,

        /// User id (repeatable)
        #[arg(long = "id")]
        ids: Vec<u64>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the members of a list
    ListMembers {
        /// List id
        list_id: u64,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decode a saved raw timeline response without touching the network
    Decode {
        /// JSON file holding one GraphQL timeline response
        file: PathBuf,

        /// Timeline the response came from
        #[arg(long, value_enum, default_value_t = DecodeKind::UserTweets)]
        kind: DecodeKind,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DecodeKind {
    UserTweets,
    UserMedia,
    ListMembers,
}

impl From<DecodeKind> for TimelineKind {
    fn from(kind: DecodeKind) -> Self {
        match kind {
            DecodeKind::UserTweets => Self::UserTweets,
            DecodeKind::UserMedia => Self::UserMedia,
            DecodeKind::ListMembers => Self::ListMembers,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the JSON output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("harvest=debug,info")
        } else {
            EnvFilter::new("harvest=info,warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = HarvestConfig::resolve(cli.config.as_deref()).context("Failed to load config")?;
    let session = cli.session.as_deref();
    let request_file = cli.request_file.as_deref();

    match cli.command {
        Commands::Timeline {
            screen_name,
            user_id,
            since,
            until,
            count,
            since_date,
            until_date,
            tweets_only,
            media_only,
            output,
        } => {
            let bounds = walk_bounds(since, until, count, since_date, until_date);
            tracing::info!(
                screen_name,
                since = bounds.since,
                until = bounds.until,
                since_time = ?bound_time(bounds.since),
                until_time = ?bound_time(bounds.until),
                "Starting timeline walk"
            );
            let client = build_client(&config, session, request_file)?;
            let user_id = match user_id {
                Some(id) => id,
                None => twitter::resolve_user_id(&client, &screen_name).await?,
            };

            let tweets_source = client.timeline(TimelineKind::UserTweets);
            let media_source = client.timeline(TimelineKind::UserMedia);
            let tweets = if tweets_only {
                twitter::walk(&tweets_source, user_id, bounds).await?
            } else if media_only {
                twitter::walk(&media_source, user_id, bounds).await?
            } else {
                twitter::assemble_user_timeline(&tweets_source, &media_source, user_id, bounds)
                    .await?
            };
            tracing::info!(screen_name, count = tweets.len(), "Timeline assembled");
            output::emit(&tweets, output.as_deref())?;
        }
        Commands::Tweets { ids, output } => {
            let client = build_client(&config, session, request_file)?;
            let tweets = twitter::resolve_tweets_by_ids(&client, &ids).await?;
            output::emit(&tweets, output.as_deref())?;
        }
        Commands::Users {
            screen_names,
            ids,
            output,
        } => {
            if screen_names.is_empty() && ids.is_empty() {
                anyhow::bail!("Pass at least one --screen-name or --id");
            }
            let client = build_client(&config, session, request_file)?;
            let users = twitter::resolve_users(&client, &screen_names, &ids).await?;
            output::emit(&users, output.as_deref())?;
        }
        Commands::ListMembers { list_id, output } => {
            let client = build_client(&config, session, request_file)?;
            let members =
                twitter::resolve_list_members(&client.timeline(TimelineKind::ListMembers), list_id)
                    .await?;
            output::emit(&members, output.as_deref())?;
        }
        Commands::Decode { file, kind, output } => {
            let entries = run_decode(&file, kind.into())?;
            output::emit(&entries, output.as_deref())?;
        }
    }

    Ok(())
}

/// Combine id and date bounds, keeping the tighter of each pair.
fn walk_bounds(
    since: u64,
    until: Option<u64>,
    count: Option<usize>,
    since_date: Option<DateTime<Utc>>,
    until_date: Option<DateTime<Utc>>,
) -> WalkBounds {
    let mut bounds = WalkBounds {
        since,
        until: until.unwrap_or(u64::MAX),
        count: count.unwrap_or(usize::MAX),
    };
    if let Some(date) = since_date {
        bounds.since = bounds
            .since
            .max(snowflake::first_id_at(date).saturating_sub(1));
    }
    if let Some(date) = until_date {
        bounds.until = bounds.until.min(snowflake::last_id_at(date));
    }
    bounds
}

/// Creation time of a bounding id, for logging. Open bounds have none.
fn bound_time(id: u64) -> Option<String> {
    if id == 0 || id == u64::MAX {
        return None;
    }
    snowflake::timestamp_of(id).map(|time| time.to_rfc3339())
}

fn load_session(
    config: &HarvestConfig,
    session: Option<&Path>,
    request_file: Option<&Path>,
) -> Result<Session> {
    if let Some(path) = request_file.or(config.session.request_file.as_deref()) {
        tracing::debug!(path = %path.display(), "Loading session from request file");
        return Session::from_request_file(path)
            .with_context(|| format!("Failed to read cookies from {}", path.display()));
    }
    if let Some(path) = session.or(config.session.path.as_deref()) {
        tracing::debug!(path = %path.display(), "Loading session file");
        return Session::load(path)
            .with_context(|| format!("Failed to load session from {}", path.display()));
    }
    tracing::debug!("Loading session from environment");
    Session::from_env().context("No session file given and TWITTER_AUTH_TOKEN not set")
}

fn build_client(
    config: &HarvestConfig,
    session: Option<&Path>,
    request_file: Option<&Path>,
) -> Result<GraphqlClient> {
    let session = load_session(config, session, request_file)?;
    GraphqlClient::new(config.api.clone(), session).context("Failed to build HTTP client")
}

fn run_decode(file: &Path, kind: TimelineKind) -> Result<Vec<TimelineEntry>> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let raw: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;
    let page = twitter::decode_page(kind, &raw)
        .with_context(|| format!("Failed to decode {}", file.display()))?;

    tracing::info!(
        entries = page.entries.len(),
        pinned = page.pinned.is_some(),
        next_cursor = page.next_cursor.as_ref().map(|c| c.as_str()),
        "Decoded page"
    );
    let mut entries = page.entries;
    entries.extend(page.pinned);
    Ok(entries)
}
