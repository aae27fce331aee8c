use crate::persistence::DEFAULT_STORAGE_KEY;

pub const OSM_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Used both for the initial map view and when panning to a workout.
    pub zoom_level: f64,
    pub storage_key: String,
    pub tile_url: String,
    pub tile_attribution: String,
    pub pan_duration_secs: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            zoom_level: 13.,
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            tile_url: OSM_TILE_URL.to_owned(),
            tile_attribution: OSM_ATTRIBUTION.to_owned(),
            pan_duration_secs: 1.,
        }
    }
}
