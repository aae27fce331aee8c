//! Terminal stand-ins for the map, geolocation and list view.

use workout_tracker_lib::{
    adapters::{Geolocation, MapAdapter, PanOptions, View},
    coords::Coords,
    view_model::{MarkerPopup, WorkoutView},
    workout::WorkoutKind,
};

/// Prints what a map widget would draw.
#[derive(Debug, Default)]
pub struct ConsoleMap;

impl MapAdapter for ConsoleMap {
    fn initialize(&mut self, center: Coords, zoom: f64) {
        tracing::debug!("Map centered on {center} at zoom {zoom}");
    }

    fn add_tile_layer(&mut self, url: &str, _attribution: &str) {
        tracing::debug!("Tile layer {url}");
    }

    fn listen_for_clicks(&mut self) {}

    fn add_marker(&mut self, popup: &MarkerPopup) {
        println!("Marker at {}: {}", popup.coords, popup.content);
    }

    fn set_view(&mut self, center: Coords, zoom: f64, pan: PanOptions) {
        println!("Map moved to {center} (zoom {zoom}, {:.1}s pan)", pan.duration_secs);
    }
}

/// Answers position requests with a fix given on the command line, if any.
#[derive(Debug, Default)]
pub struct ConsoleGeolocation {
    pub fix: Option<Coords>,
}

impl ConsoleGeolocation {
    pub fn at(fix: Coords) -> Self {
        Self { fix: Some(fix) }
    }
}

impl Geolocation for ConsoleGeolocation {
    /// The fix is handed to the controller by the caller once `start` returns.
    fn request_position(&mut self) {
        tracing::debug!("Position requested, fix {:?}", self.fix);
    }
}

#[derive(Debug, Default)]
pub struct ConsoleView;

impl View for ConsoleView {
    fn show_form(&mut self) {
        tracing::debug!("Form shown");
    }

    fn hide_form(&mut self) {
        tracing::debug!("Form hidden");
    }

    fn toggle_fields_for_type(&mut self, kind: WorkoutKind) {
        tracing::debug!("Form fields for {kind}");
    }

    fn render_workout(&mut self, workout: &WorkoutView) {
        println!("{}", format_row(workout));
    }

    fn notify(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn reload(&mut self) {
        println!("All workouts removed");
    }
}

pub fn format_row(workout: &WorkoutView) -> String {
    let details = workout
        .details
        .iter()
        .map(|detail| format!("{} {} {}", detail.icon, detail.value, detail.unit))
        .collect::<Vec<String>>()
        .join("  ");

    format!("{}\t{}\t{}", workout.id, workout.description, details)
}
