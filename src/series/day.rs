//! Calendar-day partitioning
//!
//! Reports and the clustering call sites both work day-by-day: events are
//! grouped by calendar date before any per-day processing, so clusters and
//! report sections never span a day boundary.

use crate::series::types::{sort_ascending, Timestamped};
use chrono::NaiveDate;
use serde::Serialize;

/// Events of a single calendar day, ascending by time
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayGroup<T> {
    /// The calendar date (UTC) shared by every event in the group
    pub date: NaiveDate,
    /// The day's events in ascending time order
    pub events: Vec<T>,
}

/// Split a sequence into per-day groups
///
/// Input is re-sorted ascending if a collaborator handed it over out of
/// order. Groups come back in ascending date order; an empty input yields
/// an empty vec.
pub fn partition_by_day<T: Timestamped>(events: Vec<T>) -> Vec<DayGroup<T>> {
    let mut events = events;
    sort_ascending(&mut events, "day partition input");

    let mut groups: Vec<DayGroup<T>> = Vec::new();
    for event in events {
        let date = event.timestamp().date_naive();
        match groups.last_mut() {
            Some(group) if group.date == date => group.events.push(event),
            _ => groups.push(DayGroup {
                date,
                events: vec![event],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_partition_empty() {
        let groups = partition_by_day(Vec::<DateTime<Utc>>::new());
        assert!(groups.is_empty());
    }

    #[test]
    fn test_partition_single_day() {
        let groups = partition_by_day(vec![at(10, 8, 0), at(10, 12, 30), at(10, 23, 59)]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].date, at(10, 0, 0).date_naive());
        assert_eq!(groups[0].events.len(), 3);
    }

    #[test]
    fn test_partition_splits_at_midnight() {
        let groups = partition_by_day(vec![at(10, 23, 58), at(11, 0, 1)]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].events, vec![at(10, 23, 58)]);
        assert_eq!(groups[1].events, vec![at(11, 0, 1)]);
    }

    #[test]
    fn test_partition_unsorted_input() {
        let groups = partition_by_day(vec![at(11, 9, 0), at(10, 9, 0), at(11, 7, 0)]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].events, vec![at(10, 9, 0)]);
        assert_eq!(groups[1].events, vec![at(11, 7, 0), at(11, 9, 0)]);
    }
}
