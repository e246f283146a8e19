//! Near-duplicate event collapsing
//!
//! Upstream treatment streams double-log some physical events: a sensor
//! restart shows up as two or three "Sensor Start" records a couple of
//! minutes apart, a manual glucose check as several strip tests in a row.
//! This filter collapses any run of events mutually within a threshold of
//! their immediate neighbor down to the run's latest record.
//!
//! The comparison is strictly pairwise: each event is only measured against
//! its immediate successor, never against the whole cluster, so events at
//! minute gaps (2, 10, 2) with a 3-minute threshold resolve to two clusters.

use crate::series::types::{sort_ascending, Timestamped};
use chrono::Duration;

/// Maximum gap between two consecutive events for them to count as one
/// physical event
///
/// A caller-supplied parameter: each call site picks the threshold matching
/// how noisy its upstream stream is (see [`crate::events`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClusterThreshold(Duration);

impl ClusterThreshold {
    /// Threshold of the given number of whole minutes
    pub fn minutes(minutes: i64) -> Self {
        Self(Duration::minutes(minutes))
    }

    /// The threshold as a duration
    pub fn as_duration(self) -> Duration {
        self.0
    }
}

/// Collapse events closer together than `threshold` to their latest record
///
/// Single forward pass over the sequence in ascending time order: every
/// event whose gap to the *next* event is within the threshold is dropped
/// (superseded by the next record of the same cluster); the last event is
/// always kept. Within any maximal run of events each within threshold of
/// its successor, only the latest survives.
///
/// The result is the same length or shorter and still ascending. An empty
/// input yields an empty vec; a single event is returned unchanged. A zero
/// threshold only collapses identical timestamps. Input is re-sorted
/// defensively if a collaborator handed it over out of order.
pub fn collapse_nearby<T: Timestamped>(events: Vec<T>, threshold: ClusterThreshold) -> Vec<T> {
    let mut events = events;
    sort_ascending(&mut events, "cluster input");

    if events.len() <= 1 {
        return events;
    }

    let times: Vec<_> = events.iter().map(|e| e.timestamp()).collect();
    let last = events.len() - 1;

    events
        .into_iter()
        .enumerate()
        .filter(|(i, _)| *i == last || times[*i + 1] - times[*i] > threshold.as_duration())
        .map(|(_, event)| event)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(minute: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap() + Duration::minutes(minute)
    }

    #[test]
    fn test_empty_input() {
        let out = collapse_nearby(Vec::<DateTime<Utc>>::new(), ClusterThreshold::minutes(3));
        assert!(out.is_empty());
    }

    #[test]
    fn test_single_event_unchanged() {
        let out = collapse_nearby(vec![at(7)], ClusterThreshold::minutes(3));
        assert_eq!(out, vec![at(7)]);
    }

    #[test]
    fn test_all_gaps_above_threshold_unchanged() {
        let events = vec![at(0), at(10), at(25)];
        let out = collapse_nearby(events.clone(), ClusterThreshold::minutes(3));
        assert_eq!(out, events);
    }

    #[test]
    fn test_all_gaps_within_threshold_keep_last() {
        let out = collapse_nearby(
            vec![at(0), at(2), at(4), at(5)],
            ClusterThreshold::minutes(3),
        );
        assert_eq!(out, vec![at(5)]);
    }

    #[test]
    fn test_mixed_gaps() {
        // 0 absorbed into 2; 12 absorbed into 14; 40 stands alone.
        let out = collapse_nearby(
            vec![at(0), at(2), at(12), at(14), at(40)],
            ClusterThreshold::minutes(3),
        );
        assert_eq!(out, vec![at(2), at(14), at(40)]);
    }

    #[test]
    fn test_pairwise_not_transitive() {
        // Gaps (2, 10, 2): the filter never looks past the immediate
        // successor, so two clusters survive.
        let out = collapse_nearby(
            vec![at(0), at(2), at(12), at(14)],
            ClusterThreshold::minutes(3),
        );
        assert_eq!(out, vec![at(2), at(14)]);
    }

    #[test]
    fn test_gap_exactly_at_threshold_collapses() {
        let out = collapse_nearby(vec![at(0), at(3)], ClusterThreshold::minutes(3));
        assert_eq!(out, vec![at(3)]);
    }

    #[test]
    fn test_zero_threshold_only_collapses_identical_timestamps() {
        let out = collapse_nearby(
            vec![at(0), at(0), at(1), at(2)],
            ClusterThreshold::minutes(0),
        );
        assert_eq!(out, vec![at(0), at(1), at(2)]);
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let threshold = ClusterThreshold::minutes(3);
        let once = collapse_nearby(vec![at(0), at(2), at(12), at(14), at(40)], threshold);
        let twice = collapse_nearby(once.clone(), threshold);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unsorted_input_matches_sorted() {
        let threshold = ClusterThreshold::minutes(3);
        let sorted = collapse_nearby(vec![at(0), at(2), at(12), at(14), at(40)], threshold);
        let shuffled = collapse_nearby(vec![at(14), at(0), at(40), at(2), at(12)], threshold);
        assert_eq!(sorted, shuffled);
    }
}
