//! # Glucocast
//!
//! Glucose time-series analytics for continuous glucose monitoring (CGM)
//! data: treatment-event deduplication, calendar-day grouping, and
//! short-horizon glucose forecasting.
//!
//! ## Features
//!
//! - **AR(2) forecasting**: log-space autoregressive projection of future
//!   glucose values, with an optional widening confidence cone
//! - **Event clustering**: collapses near-duplicate treatment timestamps
//!   (double-logged sensor starts, repeated strip tests) to one record
//! - **Day grouping**: partitions time-ordered data by calendar day for
//!   reporting, so no cluster or report section spans midnight
//! - **Pure core**: every operation is a stateless computation over its
//!   inputs; the only cross-call state is the immutable model config
//!
//! The retrieval side (HTTP access to the telemetry store, JSON mapping,
//! timezone normalization) and the rendering side (text tables) are
//! external collaborators: this crate takes ordered readings and events in
//! and hands structured results back.
//!
//! ## Modules
//!
//! - [`series`]: readings, the `Timestamped` trait, day partitioning
//! - [`cluster`]: the near-duplicate collapsing filter
//! - [`forecast`]: the AR(2) forecast engine
//! - [`events`]: treatment kinds, payloads, and dedup call sites
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use glucocast::forecast::{ForecastEngine, ForecastRequest};
//! use glucocast::series::GlucoseReading;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let t0 = Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap();
//!     let readings = vec![
//!         GlucoseReading::new(t0, 100),
//!         GlucoseReading::new(t0 + Duration::minutes(5), 110),
//!     ];
//!
//!     let engine = ForecastEngine::default();
//!     let points = engine.forecast(&readings, ForecastRequest::minutes(60).with_cone(2.0))?;
//!
//!     for point in points {
//!         println!("{}: {} mg/dL", point.time.format("%H:%M"), point.mgdl);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cluster;
pub mod config;
pub mod events;
pub mod forecast;
pub mod series;

// Re-export top-level types for convenience
pub use cluster::{collapse_nearby, ClusterThreshold};

pub use forecast::{
    Ar2Model, ForecastEngine, ForecastError, ForecastPoint, ForecastRequest, ForecastResult,
};

pub use series::{partition_by_day, DayGroup, GlucoseReading, Timestamped};

pub use events::{dedup_by_day, dedup_for_kind, TreatmentEvent, TreatmentKind};

pub use config::{Config, ConfigError, ClusterConfig, LoggingConfig};
