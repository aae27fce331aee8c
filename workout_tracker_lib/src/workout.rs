use std::sync::atomic::{AtomicU64, Ordering};

use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coords::Coords;

/// Raised when a workout cannot be constructed from the given inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkoutError {
    #[error("{field} has to be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} has to be a positive number, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("invalid coordinates ({lat}, {lng})")]
    InvalidCoords { lat: f64, lng: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized name used in descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }
}

impl std::fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WorkoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(format!("unknown workout type: {other}")),
        }
    }
}

static ID_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Opaque workout identifier.
///
/// Millisecond creation time plus a process-wide sequence number, so ids stay
/// unique even when several workouts are created within the same millisecond.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn generate(date: DateTime<Utc>) -> Self {
        let sequence = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self(format!("{}-{}", date.timestamp_millis(), sequence))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkoutId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl std::fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Variant specific inputs and the metric derived from them at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutDetails {
    Running {
        /// steps/min
        cadence: f64,
        /// min/km
        pace: f64,
    },
    #[serde(rename_all = "camelCase")]
    Cycling {
        /// meters
        #[serde(alias = "elevation")]
        elevation_gain: f64,
        /// km/h
        speed: f64,
    },
}

/// The headline metric of a workout, pace for running and speed for cycling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrimaryMetric {
    Pace(f64),
    Speed(f64),
}

impl PrimaryMetric {
    pub fn value(&self) -> f64 {
        match self {
            PrimaryMetric::Pace(value) | PrimaryMetric::Speed(value) => *value,
        }
    }
}

/// A recorded workout. Immutable once constructed; the derived fields
/// (`description`, `pace`, `speed`) are computed once and never recomputed,
/// also not when a workout is read back from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    id: WorkoutId,
    date: DateTime<Utc>,
    coords: Coords,
    /// km
    distance: f64,
    /// min
    duration: f64,
    description: String,
    #[serde(flatten)]
    details: WorkoutDetails,
}

impl Workout {
    /// `date` is the creation time in the user's timezone. It decides the
    /// calendar day in the description and is stored as UTC.
    pub fn running<Tz>(coords: Coords, distance: f64, duration: f64, cadence: f64, date: DateTime<Tz>) -> Result<Self, WorkoutError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let (distance, duration) = validate_common(coords, distance, duration)?;
        let cadence = ensure_positive("cadence", cadence)?;

        let details = WorkoutDetails::Running {
            cadence,
            pace: duration / distance,
        };

        Ok(Self::build(coords, distance, duration, details, date))
    }

    pub fn cycling<Tz>(coords: Coords, distance: f64, duration: f64, elevation_gain: f64, date: DateTime<Tz>) -> Result<Self, WorkoutError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let (distance, duration) = validate_common(coords, distance, duration)?;
        let elevation_gain = ensure_positive("elevation", elevation_gain)?;

        let details = WorkoutDetails::Cycling {
            elevation_gain,
            speed: distance / (duration / 60.0),
        };

        Ok(Self::build(coords, distance, duration, details, date))
    }

    fn build<Tz>(coords: Coords, distance: f64, duration: f64, details: WorkoutDetails, date: DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let kind = match details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        };

        let description = format!("{} on {}", kind.label(), date.format("%B %-d"));
        let date = date.with_timezone(&Utc);

        Self {
            id: WorkoutId::generate(date),
            date,
            coords,
            distance,
            duration,
            description,
            details,
        }
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn describe(&self) -> &str {
        &self.description
    }

    pub fn details(&self) -> &WorkoutDetails {
        &self.details
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    pub fn primary_metric(&self) -> PrimaryMetric {
        match self.details {
            WorkoutDetails::Running { pace, .. } => PrimaryMetric::Pace(pace),
            WorkoutDetails::Cycling { speed, .. } => PrimaryMetric::Speed(speed),
        }
    }
}

fn validate_common(coords: Coords, distance: f64, duration: f64) -> Result<(f64, f64), WorkoutError> {
    // Coords deserialized or built by hand skip Coords::new
    Coords::new(coords.lat, coords.lng)?;
    Ok((ensure_positive("distance", distance)?, ensure_positive("duration", duration)?))
}

fn ensure_positive(field: &'static str, value: f64) -> Result<f64, WorkoutError> {
    if !value.is_finite() {
        return Err(WorkoutError::NonFinite { field });
    }
    if value <= 0.0 {
        return Err(WorkoutError::NonPositive { field, value });
    }
    Ok(value)
}
