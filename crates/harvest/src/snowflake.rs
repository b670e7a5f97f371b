//! Conversion between timestamps and snowflake ids.
//!
//! Tweet ids embed their creation time in milliseconds since the platform
//! epoch, shifted left by 22 bits. Date bounds on the command line are turned
//! into id bounds this way.

use chrono::{DateTime, TimeZone, Utc};

/// Platform epoch, in Unix milliseconds (2010-11-04T01:42:54.657Z).
pub const EPOCH_MS: i64 = 1_288_834_974_657;

const TIMESTAMP_SHIFT: u32 = 22;

const SEQUENCE_MASK: u64 = (1 << TIMESTAMP_SHIFT) - 1;

/// Lowest id that can have been issued at `time`.
///
/// Times before the epoch map to 0. Times past the last representable
/// millisecond (mid 2149) map to `u64::MAX`.
#[must_use]
pub fn first_id_at(time: DateTime<Utc>) -> u64 {
    match u64::try_from(time.timestamp_millis() - EPOCH_MS) {
        Ok(ms) => ms.checked_mul(1 << TIMESTAMP_SHIFT).unwrap_or(u64::MAX),
        Err(_) => 0,
    }
}

/// Highest id that can have been issued at `time` (same millisecond).
///
/// Saturates the same way as [`first_id_at`].
#[must_use]
pub fn last_id_at(time: DateTime<Utc>) -> u64 {
    match u64::try_from(time.timestamp_millis() - EPOCH_MS) {
        Ok(ms) => ms
            .checked_mul(1 << TIMESTAMP_SHIFT)
            .map_or(u64::MAX, |id| id | SEQUENCE_MASK),
        Err(_) => 0,
    }
}

/// Creation time embedded in an id.
#[must_use]
pub fn timestamp_of(id: u64) -> Option<DateTime<Utc>> {
    let ms = i64::try_from(id >> TIMESTAMP_SHIFT).ok()? + EPOCH_MS;
    Utc.timestamp_millis_opt(ms).single()
}
