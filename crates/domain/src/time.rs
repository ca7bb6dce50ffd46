//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp carried by every event, sensor state, and snapshot.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}
