//! AR(2) forecast engine
//!
//! Projects future glucose values from the two most recent readings using
//! a fixed second-order autoregressive recurrence evaluated in log space,
//! optionally with a widening confidence cone.

use crate::forecast::error::{ForecastError, ForecastResult};
use crate::forecast::model::Ar2Model;
use crate::series::types::{sort_ascending, GlucoseReading};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Parameters of a single forecast call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRequest {
    /// Forecast horizon in minutes (>= 0)
    pub horizon_minutes: i64,
    /// Emit lower/upper confidence bounds per step
    pub cone: bool,
    /// Multiplier applied to the per-step cone widths (positive)
    pub cone_factor: f64,
}

impl Default for ForecastRequest {
    fn default() -> Self {
        Self {
            horizon_minutes: 60,
            cone: false,
            cone_factor: 2.0,
        }
    }
}

impl ForecastRequest {
    /// Request a forecast over the given horizon, no cone
    pub fn minutes(horizon_minutes: i64) -> Self {
        Self {
            horizon_minutes,
            ..Self::default()
        }
    }

    /// Builder: enable the confidence cone with the given factor
    pub fn with_cone(mut self, cone_factor: f64) -> Self {
        self.cone = true;
        self.cone_factor = cone_factor;
        self
    }
}

/// One projected glucose value
///
/// `lower`/`upper` are present only when the cone was requested. The cone
/// is symmetric in log space and therefore asymmetric around the point
/// estimate in raw units.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ForecastPoint {
    /// The projected timestamp
    pub time: DateTime<Utc>,
    /// Point forecast in mg/dL
    pub mgdl: i32,
    /// Lower confidence bound in mg/dL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<i32>,
    /// Upper confidence bound in mg/dL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<i32>,
}

/// Stateless forecast engine around an immutable [`Ar2Model`]
///
/// The engine holds no mutable state; a single instance may be shared
/// freely across threads and calls.
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    model: Ar2Model,
}

impl ForecastEngine {
    /// Create an engine around the given model
    pub fn new(model: Ar2Model) -> Self {
        Self { model }
    }

    /// The model this engine projects with
    pub fn model(&self) -> &Ar2Model {
        &self.model
    }

    /// Project future readings from the two most recent observations
    ///
    /// Readings are re-sorted ascending if the caller handed them over out
    /// of order. One point is produced per `step_minutes` of the horizon
    /// (integer division); when the cone is requested the step count is
    /// additionally capped to the model's cone-width table, so horizons
    /// beyond the supported cone are truncated rather than extended
    /// uncovered. A zero horizon yields an empty forecast.
    ///
    /// # Errors
    ///
    /// `InsufficientHistory` with fewer than two readings;
    /// `NonPositiveReading` if either seed value cannot be log-transformed.
    pub fn forecast(
        &self,
        readings: &[GlucoseReading],
        request: ForecastRequest,
    ) -> ForecastResult<Vec<ForecastPoint>> {
        if readings.len() < 2 {
            return Err(ForecastError::InsufficientHistory {
                available: readings.len(),
            });
        }

        let mut sorted = readings.to_vec();
        sort_ascending(&mut sorted, "forecast input");

        let latest = sorted[sorted.len() - 1];
        let previous = sorted[sorted.len() - 2];

        let mut x_prev = self.seed(previous)?;
        let mut x_curr = self.seed(latest)?;

        let mut steps = (request.horizon_minutes / self.model.step_minutes).max(0) as usize;
        if request.cone {
            steps = steps.min(self.model.cone_widths.len());
        }

        let [a1, a2] = self.model.coefficients;
        let step = Duration::minutes(self.model.step_minutes);
        let mut time = latest.time;
        let mut points = Vec::with_capacity(steps);

        for i in 0..steps {
            time += step;

            // a1 pairs with the older log-value, a2 with the newer one.
            let next = a1 * x_prev + a2 * x_curr;

            let (lower, upper) = if request.cone {
                // Bounds are built in log space before back-transforming.
                let width = request.cone_factor * self.model.cone_widths[i];
                (
                    Some(self.model.to_mgdl(next - width)),
                    Some(self.model.to_mgdl(next + width)),
                )
            } else {
                (None, None)
            };

            points.push(ForecastPoint {
                time,
                mgdl: self.model.to_mgdl(next),
                lower,
                upper,
            });

            x_prev = x_curr;
            x_curr = next;
        }

        Ok(points)
    }

    fn seed(&self, reading: GlucoseReading) -> ForecastResult<f64> {
        if reading.mgdl <= 0 {
            return Err(ForecastError::NonPositiveReading {
                mgdl: reading.mgdl,
                time: reading.time,
            });
        }
        Ok(self.model.to_log(reading.mgdl))
    }
}
