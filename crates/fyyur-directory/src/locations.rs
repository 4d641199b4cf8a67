//! Grouping of venues by `(city, state)`.

use std::collections::HashMap;

use crate::views::{ListingSummary, LocationGroup};

/// Groups venues by exact `(city, state)` equality.
///
/// Keys are compared case-sensitively with no normalization. Groups appear in
/// the order their first venue was seen and venues keep their input order
/// within a group.
pub fn group_by_location<I>(venues: I) -> Vec<LocationGroup>
where
    I: IntoIterator<Item = (String, String, ListingSummary)>,
{
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut groups: Vec<LocationGroup> = Vec::new();

    for (city, state, summary) in venues {
        let key = (city, state);
        match index.get(&key) {
            Some(&slot) => groups[slot].venues.push(summary),
            None => {
                index.insert(key.clone(), groups.len());
                let (city, state) = key;
                groups.push(LocationGroup {
                    city,
                    state,
                    venues: vec![summary],
                });
            }
        }
    }

    groups
}
