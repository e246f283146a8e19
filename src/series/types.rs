//! Core data types for glucose time series
//!
//! This module defines the fundamental types shared by both analytics
//! engines:
//! - `GlucoseReading`: a single sensor glucose measurement
//! - `Timestamped`: abstraction over anything carrying an absolute timestamp

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single sensor glucose value at a specific point in time
///
/// Timestamps are timezone-normalized UTC; the retrieval layer is
/// responsible for converting upstream local times before handing
/// readings to the engines.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlucoseReading {
    /// When the reading was taken
    pub time: DateTime<Utc>,
    /// Glucose concentration in mg/dL
    pub mgdl: i32,
}

impl GlucoseReading {
    /// Create a new reading
    pub fn new(time: DateTime<Utc>, mgdl: i32) -> Self {
        Self { time, mgdl }
    }
}

/// Anything carrying an absolute point in time
///
/// Both engines operate on `Timestamped` values so readings, treatment
/// events, and bare timestamps can flow through the same code paths.
pub trait Timestamped {
    /// The absolute timestamp of this value
    fn timestamp(&self) -> DateTime<Utc>;
}

impl Timestamped for GlucoseReading {
    fn timestamp(&self) -> DateTime<Utc> {
        self.time
    }
}

impl Timestamped for DateTime<Utc> {
    fn timestamp(&self) -> DateTime<Utc> {
        *self
    }
}

/// Sort a sequence ascending by timestamp if it is not already
///
/// Ascending order is a documented precondition for every engine in this
/// crate. Collaborators occasionally violate it, so the engines re-sort
/// defensively and log the violation instead of silently misbehaving or
/// refusing the input.
pub(crate) fn sort_ascending<T: Timestamped>(items: &mut [T], context: &'static str) {
    let sorted = items
        .windows(2)
        .all(|w| w[0].timestamp() <= w[1].timestamp());

    if !sorted {
        tracing::warn!(
            context,
            count = items.len(),
            "input sequence violated ascending-order contract, re-sorting"
        );
        items.sort_by_key(|item| item.timestamp());
    }
}
