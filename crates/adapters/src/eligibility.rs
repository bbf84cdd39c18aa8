use chrono::{DateTime, NaiveDate, Timelike, Utc};

use crate::adapter::SkipReason;

fn hour_bucket(t: DateTime<Utc>) -> (NaiveDate, u32) {
    (t.date_naive(), t.hour())
}

/// Why a content item is not new, or `Ok` when it is.
///
/// Creation time and `now` are compared at hour granularity: an item created
/// in an earlier hour than the current one is an edit of old content.
pub fn check_new(
    created: DateTime<Utc>,
    now: DateTime<Utc>,
    already_sent: bool,
    is_revision: bool,
) -> Result<(), SkipReason> {
    if hour_bucket(created) < hour_bucket(now) {
        return Err(SkipReason::NotNew);
    }
    if already_sent {
        return Err(SkipReason::AlreadySent);
    }
    if is_revision {
        return Err(SkipReason::Revision);
    }
    Ok(())
}

/// Whether a content item is genuinely new: created within the current hour
/// (or later), not yet sent, and not a revision.
pub fn is_new_item(
    created: DateTime<Utc>,
    now: DateTime<Utc>,
    already_sent: bool,
    is_revision: bool,
) -> bool {
    check_new(created, now, already_sent, is_revision).is_ok()
}
