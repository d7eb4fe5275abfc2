use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifies a record (alarm, task, category, ...) inside a widget's data.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hands out record ids derived from the current time in milliseconds.
///
/// Ids from one generator strictly increase, so two records created within
/// the same millisecond still get distinct ids. Ids from different
/// generators (e.g. separate sessions) may collide.
#[derive(Debug, Default)]
pub struct IdGenerator {
    /// The numeric value of the last id handed out.
    last: Option<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        IdGenerator::default()
    }

    // Panics right before the id space is exhausted, which cannot happen for
    // any timestamp chrono can represent.
    pub fn next_id(&mut self, now: DateTime<Utc>) -> RecordId {
        let millis = now.timestamp_millis();
        let value = match self.last {
            Some(last) if millis <= last => last.checked_add(1).unwrap(),
            _ => millis,
        };
        self.last = Some(value);
        RecordId(value.to_string())
    }
}

#[cfg(test)]
mod test {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn ids_follow_the_clock() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_id(now), RecordId(now.timestamp_millis().to_string()));

        let later = now + Duration::seconds(5);
        assert_eq!(ids.next_id(later), RecordId(later.timestamp_millis().to_string()));
    }

    #[test]
    fn same_instant_does_not_collide() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut ids = IdGenerator::new();
        let first = ids.next_id(now);
        let second = ids.next_id(now);
        // the clock going backwards must not produce an old id either
        let third = ids.next_id(now - Duration::seconds(1));

        let base = now.timestamp_millis();
        assert_eq!(first, RecordId(base.to_string()));
        assert_eq!(second, RecordId((base + 1).to_string()));
        assert_eq!(third, RecordId((base + 2).to_string()));
    }
}
