//! Glucose Forecast Engine
//!
//! Short-horizon glucose forecasting with a second-order autoregressive
//! model evaluated in log space:
//!
//! - **model**: the immutable AR(2) constants (`Ar2Model`)
//! - **engine**: the recurrence itself (`ForecastEngine`)
//! - **error**: error types
//!
//! The two most recent readings seed the recurrence; every step advances
//! the forecast by the model's step width and optionally carries a
//! confidence cone that widens with horizon distance.
//!
//! # Example
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use glucocast::forecast::{ForecastEngine, ForecastRequest};
//! use glucocast::series::GlucoseReading;
//!
//! let t0 = Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap();
//! let readings = vec![
//!     GlucoseReading::new(t0, 100),
//!     GlucoseReading::new(t0 + Duration::minutes(5), 110),
//! ];
//!
//! let engine = ForecastEngine::default();
//! let points = engine.forecast(&readings, ForecastRequest::minutes(30))?;
//! assert_eq!(points.len(), 6);
//! # Ok::<(), glucocast::forecast::ForecastError>(())
//! ```

pub mod engine;
pub mod error;
pub mod model;

pub use engine::{ForecastEngine, ForecastPoint, ForecastRequest};
pub use error::{ForecastError, ForecastResult};
pub use model::Ar2Model;
