use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{NaiveDate, Utc};

use crate::model::IdStrategy;

/// Source of fresh record ids. Ids must never repeat within one process.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Millisecond timestamps, bumped by one whenever the clock has not advanced
/// past the last id handed out.
#[derive(Debug, Default)]
pub struct TimestampIds {
    last: u128,
}

impl TimestampIds {
    pub fn new() -> Self {
        TimestampIds::default()
    }

    fn next_after(&mut self, now_millis: u128) -> u128 {
        let next = if now_millis > self.last {
            now_millis
        } else {
            self.last + 1
        };
        self.last = next;
        next
    }
}

impl IdGenerator for TimestampIds {
    fn next_id(&mut self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        self.next_after(now).to_string()
    }
}

/// Random v4 UUIDs
#[derive(Debug, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic `prefix1`, `prefix2`, ... for tests and scripted runs
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: &str) -> Self {
        SequentialIds {
            prefix: prefix.to_string(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Build the generator selected in `[ids]`
pub fn generator_for(strategy: IdStrategy) -> Box<dyn IdGenerator> {
    match strategy {
        IdStrategy::Timestamp => Box::new(TimestampIds::new()),
        IdStrategy::Uuid => Box::new(UuidIds),
    }
}

/// Source of "today" for record dates
pub trait Clock {
    fn today(&self) -> NaiveDate;

    /// Today as an ISO date string (`YYYY-MM-DD`)
    fn today_str(&self) -> String {
        self.today().format("%Y-%m-%d").to_string()
    }
}

/// Calendar date in UTC
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A clock pinned to one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
