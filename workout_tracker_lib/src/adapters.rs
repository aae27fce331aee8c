//! Capabilities the session controller needs from its host: a map widget,
//! a geolocation provider, the form/list view and a clock.

use chrono::{DateTime, FixedOffset, Local};

use crate::{
    coords::Coords,
    view_model::{MarkerPopup, WorkoutView},
    workout::WorkoutKind,
};

/// Animation settings for a programmatic pan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanOptions {
    pub animate: bool,
    pub duration_secs: f64,
}

pub trait MapAdapter {
    fn initialize(&mut self, center: Coords, zoom: f64);

    fn add_tile_layer(&mut self, url: &str, attribution: &str);

    /// Start routing map clicks back to the host, which forwards them to
    /// `SessionController::map_clicked`.
    fn listen_for_clicks(&mut self);

    fn add_marker(&mut self, popup: &MarkerPopup);

    fn set_view(&mut self, center: Coords, zoom: f64, pan: PanOptions);
}

pub trait Geolocation {
    /// Ask for the current position. The answer arrives later through
    /// `SessionController::position_acquired` or `position_unavailable`.
    fn request_position(&mut self);
}

pub trait View {
    fn show_form(&mut self);

    /// Hides the form and clears its inputs.
    fn hide_form(&mut self);

    fn toggle_fields_for_type(&mut self, kind: WorkoutKind);

    fn render_workout(&mut self, workout: &WorkoutView);

    /// User visible notice, e.g. an alert.
    fn notify(&mut self, message: &str);

    /// Restart the whole application.
    fn reload(&mut self);
}

pub trait Clock {
    /// Current time in the user's timezone.
    fn now(&self) -> DateTime<FixedOffset>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}
