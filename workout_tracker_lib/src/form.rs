use chrono::{DateTime, FixedOffset};

use crate::{
    coords::Coords,
    workout::{Workout, WorkoutError, WorkoutKind},
};

/// Values of the workout form at submit time.
///
/// `cadence` is only read for running and `elevation` only for cycling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormFields {
    pub kind: WorkoutKind,
    pub distance: f64,
    pub duration: f64,
    pub cadence: f64,
    pub elevation: f64,
}

impl FormFields {
    pub fn running(distance: f64, duration: f64, cadence: f64) -> Self {
        Self { kind: WorkoutKind::Running, distance, duration, cadence, elevation: 0. }
    }

    pub fn cycling(distance: f64, duration: f64, elevation: f64) -> Self {
        Self { kind: WorkoutKind::Cycling, distance, duration, cadence: 0., elevation }
    }

    /// Build from raw input strings. An empty input reads as 0 and anything
    /// unparsable as NaN, so both fail validation.
    pub fn parse(kind: WorkoutKind, distance: &str, duration: &str, cadence: &str, elevation: &str) -> Self {
        Self {
            kind,
            distance: parse_number(distance),
            duration: parse_number(duration),
            cadence: parse_number(cadence),
            elevation: parse_number(elevation),
        }
    }

    /// Every field the chosen type uses must be finite and strictly positive.
    pub fn into_workout(self, coords: Coords, date: DateTime<FixedOffset>) -> Result<Workout, WorkoutError> {
        match self.kind {
            WorkoutKind::Running => Workout::running(coords, self.distance, self.duration, self.cadence, date),
            WorkoutKind::Cycling => Workout::cycling(coords, self.distance, self.duration, self.elevation, date),
        }
    }
}

fn parse_number(input: &str) -> f64 {
    let input = input.trim();
    if input.is_empty() {
        return 0.;
    }
    input.parse().unwrap_or(f64::NAN)
}
