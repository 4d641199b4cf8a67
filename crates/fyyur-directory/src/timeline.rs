//! Past/upcoming classification of shows.
//!
//! A show is upcoming only while its start time is strictly after the
//! evaluation instant; a show starting exactly "now" is already past.
//! Callers capture `now` once per request and reuse it for every
//! comparison in that request.

use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;

pub type Timestamp = DateTime<FixedOffset>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowTiming {
    Past,
    Upcoming,
}

impl ShowTiming {
    pub fn classify(start_time: &Timestamp, now: &Timestamp) -> Self {
        if start_time > now {
            Self::Upcoming
        } else {
            Self::Past
        }
    }

    pub fn is_upcoming(self) -> bool {
        self == Self::Upcoming
    }
}

#[derive(Debug)]
pub struct Partitioned<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

/// Splits `items` into past and upcoming, preserving input order on both sides.
pub fn partition<T, F>(items: impl IntoIterator<Item = T>, now: &Timestamp, start_of: F) -> Partitioned<T>
where
    F: Fn(&T) -> &Timestamp,
{
    let mut past = Vec::new();
    let mut upcoming = Vec::new();
    for item in items {
        match ShowTiming::classify(start_of(&item), now) {
            ShowTiming::Past => past.push(item),
            ShowTiming::Upcoming => upcoming.push(item),
        }
    }
    Partitioned { past, upcoming }
}

/// Counts upcoming shows per owner id from `(owner_id, start_time)` pairs.
///
/// Owners without upcoming shows are absent from the map.
pub fn count_upcoming<I>(shows: I, now: &Timestamp) -> HashMap<i32, u64>
where
    I: IntoIterator<Item = (i32, Timestamp)>,
{
    let mut counts = HashMap::new();
    for (owner_id, start_time) in shows {
        if ShowTiming::classify(&start_time, now).is_upcoming() {
            *counts.entry(owner_id).or_insert(0) += 1;
        }
    }
    counts
}
