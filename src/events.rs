//! Treatment events
//!
//! The treatment record kinds tracked in the upstream glucose-monitoring
//! store, and the per-kind deduplication call sites. Some upstream streams
//! double-log physical events; those kinds carry a dedup threshold that
//! parameterizes the clustering filter. The filter itself never hardcodes
//! a threshold.

use crate::cluster::{collapse_nearby, ClusterThreshold};
use crate::series::day::{partition_by_day, DayGroup};
use crate::series::types::Timestamped;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dedup window for sensor starts: a sensor restart is logged two or three
/// times within a couple of minutes
pub const SENSOR_START_DEDUP_MINUTES: i64 = 3;

/// Dedup window for manual glucose checks: repeated strip tests around a
/// single physical check
pub const GLUCOSE_CHECK_DEDUP_MINUTES: i64 = 30;

/// Kind of a treatment record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentKind {
    /// A new sensor was put on and started recording
    SensorStart,
    /// Finger-prick capillary glucometer check
    GlucoseCheck,
    /// Insulin bolus
    Bolus,
    /// Temporary basal rate
    TempBasal,
    /// Carbohydrate intake (meal)
    Carbs,
    /// Exercise session
    Exercise,
    /// Free-form note
    Note,
}

impl TreatmentKind {
    /// Get all kinds for iteration
    pub fn all() -> &'static [TreatmentKind] {
        &[
            TreatmentKind::SensorStart,
            TreatmentKind::GlucoseCheck,
            TreatmentKind::Bolus,
            TreatmentKind::TempBasal,
            TreatmentKind::Carbs,
            TreatmentKind::Exercise,
            TreatmentKind::Note,
        ]
    }

    /// The event-type string the upstream store files this kind under
    pub fn event_type(&self) -> &'static str {
        match self {
            TreatmentKind::SensorStart => "Sensor Start",
            TreatmentKind::GlucoseCheck => "BG Check",
            TreatmentKind::Bolus => "Bolus",
            TreatmentKind::TempBasal => "Temp Basal",
            TreatmentKind::Carbs => "Carbs",
            TreatmentKind::Exercise => "Exercise",
            TreatmentKind::Note => "Note",
        }
    }

    /// Dedup threshold for kinds whose upstream stream double-logs events
    pub fn dedup_threshold(&self) -> Option<ClusterThreshold> {
        match self {
            TreatmentKind::SensorStart => {
                Some(ClusterThreshold::minutes(SENSOR_START_DEDUP_MINUTES))
            }
            TreatmentKind::GlucoseCheck => {
                Some(ClusterThreshold::minutes(GLUCOSE_CHECK_DEDUP_MINUTES))
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for TreatmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.event_type())
    }
}

/// A single treatment record
///
/// Carries the payload fields the upstream record can hold; which ones are
/// set depends on the kind (a bolus has insulin, a meal has carbs, a check
/// has a glucose value).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreatmentEvent {
    /// When the treatment happened
    pub time: DateTime<Utc>,
    /// What kind of treatment this is
    pub kind: TreatmentKind,
    /// Measured glucose in mg/dL, for checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glucose: Option<i32>,
    /// Carbohydrates in grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    /// Insulin in units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insulin: Option<f64>,
    /// Duration in minutes, for basal rates and exercise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TreatmentEvent {
    /// Create a new event with no payload
    pub fn new(time: DateTime<Utc>, kind: TreatmentKind) -> Self {
        Self {
            time,
            kind,
            glucose: None,
            carbs: None,
            insulin: None,
            duration_minutes: None,
            notes: None,
        }
    }

    /// Builder: set the measured glucose value
    pub fn glucose(mut self, mgdl: i32) -> Self {
        self.glucose = Some(mgdl);
        self
    }

    /// Builder: set the carbohydrate amount
    pub fn carbs(mut self, grams: f64) -> Self {
        self.carbs = Some(grams);
        self
    }

    /// Builder: set the insulin amount
    pub fn insulin(mut self, units: f64) -> Self {
        self.insulin = Some(units);
        self
    }

    /// Builder: set the duration
    pub fn duration_minutes(mut self, minutes: f64) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    /// Builder: set the notes text
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

impl Timestamped for TreatmentEvent {
    fn timestamp(&self) -> DateTime<Utc> {
        self.time
    }
}

/// Partition events by calendar day, then collapse each day's
/// near-duplicates with the given threshold
///
/// Clusters never span a day boundary: partitioning happens first, the
/// filter runs per day.
pub fn dedup_by_day<T: Timestamped>(
    events: Vec<T>,
    threshold: ClusterThreshold,
) -> Vec<DayGroup<T>> {
    partition_by_day(events)
        .into_iter()
        .map(|group| DayGroup {
            date: group.date,
            events: collapse_nearby(group.events, threshold),
        })
        .collect()
}

/// Day-partition a kind's events, deduplicating with the kind's own
/// threshold when it has one
pub fn dedup_for_kind(
    kind: TreatmentKind,
    events: Vec<TreatmentEvent>,
) -> Vec<DayGroup<TreatmentEvent>> {
    match kind.dedup_threshold() {
        Some(threshold) => dedup_by_day(events, threshold),
        None => partition_by_day(events),
    }
}
