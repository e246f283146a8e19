//! Glucose time-series building blocks
//!
//! The abstractions shared by both analytics engines:
//!
//! - **types**: `GlucoseReading` and the `Timestamped` trait
//! - **day**: calendar-day partitioning for day-scoped processing

pub mod day;
pub mod types;

pub use day::{partition_by_day, DayGroup};
pub use types::{GlucoseReading, Timestamped};
