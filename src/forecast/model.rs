//! AR(2) model constants
//!
//! The model is a plain immutable value handed to the engine at
//! construction time rather than hidden module-level constants, so tests
//! and configuration can substitute alternate models without touching
//! global state.

use crate::forecast::error::{ForecastError, ForecastResult};
use serde::Deserialize;

/// Second-order autoregressive model over log-transformed glucose values
///
/// Values enter the recurrence as `ln(mgdl / reference)` and leave it via
/// `round(reference * exp(x))`, clamped to the physiologically valid
/// `[min_mgdl, max_mgdl]` range.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ar2Model {
    /// `[a1, a2]`: a1 weights the older of the two log-values, a2 the newer
    #[serde(default = "default_coefficients")]
    pub coefficients: [f64; 2],

    /// Baseline converting between raw mg/dL and log space
    #[serde(default = "default_reference")]
    pub reference: f64,

    /// Lower clamp bound for back-transformed values (inclusive)
    #[serde(default = "default_min_mgdl")]
    pub min_mgdl: i32,

    /// Upper clamp bound for back-transformed values (inclusive)
    #[serde(default = "default_max_mgdl")]
    pub max_mgdl: i32,

    /// Spacing of forecast steps in minutes
    #[serde(default = "default_step_minutes")]
    pub step_minutes: i64,

    /// Per-step cone widths; the table length is the maximum supported
    /// cone horizon
    #[serde(default = "default_cone_widths")]
    pub cone_widths: Vec<f64>,
}

fn default_coefficients() -> [f64; 2] {
    [-0.723, 1.716]
}

fn default_reference() -> f64 {
    140.0
}

fn default_min_mgdl() -> i32 {
    36
}

fn default_max_mgdl() -> i32 {
    400
}

fn default_step_minutes() -> i64 {
    5
}

fn default_cone_widths() -> Vec<f64> {
    vec![
        0.020, 0.041, 0.061, 0.081, 0.099, 0.116, 0.132, 0.146, 0.159, 0.171, 0.182, 0.192,
    ]
}

impl Default for Ar2Model {
    fn default() -> Self {
        Self {
            coefficients: default_coefficients(),
            reference: default_reference(),
            min_mgdl: default_min_mgdl(),
            max_mgdl: default_max_mgdl(),
            step_minutes: default_step_minutes(),
            cone_widths: default_cone_widths(),
        }
    }
}

impl Ar2Model {
    /// Check the model constants for internal consistency
    pub fn validate(&self) -> ForecastResult<()> {
        if !(self.reference > 0.0) {
            return Err(ForecastError::InvalidModel(format!(
                "reference must be positive, got {}",
                self.reference
            )));
        }
        if self.min_mgdl > self.max_mgdl {
            return Err(ForecastError::InvalidModel(format!(
                "min_mgdl {} exceeds max_mgdl {}",
                self.min_mgdl, self.max_mgdl
            )));
        }
        if self.step_minutes <= 0 {
            return Err(ForecastError::InvalidModel(format!(
                "step_minutes must be positive, got {}",
                self.step_minutes
            )));
        }
        if let Some(width) = self.cone_widths.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(ForecastError::InvalidModel(format!(
                "cone widths must be finite and non-negative, got {}",
                width
            )));
        }
        Ok(())
    }

    /// Transform a raw mg/dL value into log space
    pub(crate) fn to_log(&self, mgdl: i32) -> f64 {
        (f64::from(mgdl) / self.reference).ln()
    }

    /// Back-transform a log-space value into clamped integer mg/dL
    pub(crate) fn to_mgdl(&self, log_value: f64) -> i32 {
        let raw = (self.reference * log_value.exp()).round() as i32;
        raw.clamp(self.min_mgdl, self.max_mgdl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let model = Ar2Model::default();

        assert_eq!(model.coefficients, [-0.723, 1.716]);
        assert_eq!(model.reference, 140.0);
        assert_eq!(model.min_mgdl, 36);
        assert_eq!(model.max_mgdl, 400);
        assert_eq!(model.step_minutes, 5);
        assert_eq!(model.cone_widths.len(), 12);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_round_trip_at_reference() {
        let model = Ar2Model::default();
        assert_eq!(model.to_log(140), 0.0);
        assert_eq!(model.to_mgdl(0.0), 140);
    }

    #[test]
    fn test_to_mgdl_clamps_both_ends() {
        let model = Ar2Model::default();

        // exp(3) * 140 is far above the ceiling, exp(-3) * 140 far below
        // the floor.
        assert_eq!(model.to_mgdl(3.0), 400);
        assert_eq!(model.to_mgdl(-3.0), 36);
    }

    #[test]
    fn test_validate_rejects_bad_constants() {
        let mut model = Ar2Model {
            reference: 0.0,
            ..Ar2Model::default()
        };
        assert!(matches!(
            model.validate(),
            Err(ForecastError::InvalidModel(_))
        ));

        model = Ar2Model {
            min_mgdl: 500,
            ..Ar2Model::default()
        };
        assert!(model.validate().is_err());

        model = Ar2Model {
            step_minutes: 0,
            ..Ar2Model::default()
        };
        assert!(model.validate().is_err());

        model = Ar2Model {
            cone_widths: vec![0.02, -0.1],
            ..Ar2Model::default()
        };
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let model: Ar2Model = toml::from_str("reference = 120.0").unwrap();

        assert_eq!(model.reference, 120.0);
        assert_eq!(model.coefficients, [-0.723, 1.716]);
        assert_eq!(model.cone_widths.len(), 12);
    }
}
