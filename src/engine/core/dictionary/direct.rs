use chrono::{DateTime, Utc};

/// Smallest surrogate handed out for a real member; 1 is reserved for the
/// null member.
const FIRST_MEMBER_SURROGATE: u64 = 2;

/// Algorithmic surrogate codec for timestamp columns: the surrogate is the
/// bucketed offset from a fixed epoch, so no lookup table is ever stored.
#[derive(Debug, Clone, Copy)]
pub struct TimestampDirectDictionary {
    granularity_seconds: i64,
}

impl TimestampDirectDictionary {
    pub fn new(granularity_seconds: i64) -> Self {
        Self {
            granularity_seconds: granularity_seconds.max(1),
        }
    }

    /// Seconds granularity, the storage default.
    pub fn seconds() -> Self {
        Self::new(1)
    }

    fn epoch(&self) -> DateTime<Utc> {
        // cut-off below which timestamps are treated as null members
        DateTime::<Utc>::UNIX_EPOCH
    }

    pub fn surrogate_of(&self, instant: DateTime<Utc>) -> Option<u64> {
        let offset = instant.signed_duration_since(self.epoch()).num_seconds();
        if offset < 0 {
            return None;
        }
        Some(offset as u64 / self.granularity_seconds as u64 + FIRST_MEMBER_SURROGATE)
    }

    pub fn value_of(&self, surrogate: u64) -> Option<DateTime<Utc>> {
        if surrogate < FIRST_MEMBER_SURROGATE {
            return None;
        }
        let offset = (surrogate - FIRST_MEMBER_SURROGATE) as i64 * self.granularity_seconds;
        self.epoch().checked_add_signed(chrono::Duration::seconds(offset))
    }
}
