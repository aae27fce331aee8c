use crate::{
    coords::Coords,
    workout::{Workout, WorkoutDetails, WorkoutId, WorkoutKind},
};

/// One icon/value/unit cell of a rendered list row.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutDetail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl WorkoutDetail {
    fn new(icon: &'static str, value: String, unit: &'static str) -> Self {
        Self { icon, value, unit }
    }
}

/// Everything a list row needs, independent of markup.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutView {
    pub id: WorkoutId,
    pub kind: WorkoutKind,
    pub icon: &'static str,
    pub description: String,
    pub details: Vec<WorkoutDetail>,
}

impl WorkoutView {
    pub fn class_name(&self) -> String {
        format!("workout workout--{}", self.kind)
    }
}

impl From<&Workout> for WorkoutView {
    fn from(workout: &Workout) -> Self {
        let kind = workout.kind();

        let mut details = vec![
            WorkoutDetail::new(kind.icon(), format_number(workout.distance()), "km"),
            WorkoutDetail::new("⏱", format_number(workout.duration()), "min"),
        ];

        match workout.details() {
            WorkoutDetails::Running { cadence, pace } => {
                details.push(WorkoutDetail::new("⚡️", format!("{pace:.1}"), "min/km"));
                details.push(WorkoutDetail::new("🦶🏼", format_number(*cadence), "spm"));
            }
            WorkoutDetails::Cycling { elevation_gain, speed } => {
                details.push(WorkoutDetail::new("⚡️", format!("{speed:.1}"), "km/h"));
                details.push(WorkoutDetail::new("⛰", format_number(*elevation_gain), "m"));
            }
        }

        Self {
            id: workout.id().clone(),
            kind,
            icon: kind.icon(),
            description: workout.describe().to_owned(),
            details,
        }
    }
}

/// Popup attached to a workout's map marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPopup {
    pub coords: Coords,
    pub content: String,
    pub class_name: String,
    pub max_width: f64,
    pub min_width: f64,
    pub auto_close: bool,
    pub close_on_click: bool,
}

impl From<&Workout> for MarkerPopup {
    fn from(workout: &Workout) -> Self {
        let kind = workout.kind();
        Self {
            coords: workout.coords(),
            content: format!("{} {}", kind.icon(), workout.describe()),
            class_name: format!("{kind}-popup"),
            max_width: 250.,
            min_width: 100.,
            auto_close: false,
            close_on_click: false,
        }
    }
}

/// Whole numbers without a trailing `.0`, like the values typed into the form.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
