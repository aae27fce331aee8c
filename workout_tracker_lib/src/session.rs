use thiserror::Error;

use crate::{
    adapters::{Clock, Geolocation, MapAdapter, PanOptions, SystemClock, View},
    config::SessionConfig,
    coords::Coords,
    form::FormFields,
    persistence::{PersistenceError, WorkoutRepository},
    store::KeyValueStore,
    view_model::{MarkerPopup, WorkoutView},
    workout::{Workout, WorkoutError, WorkoutId, WorkoutKind},
};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("invalid workout input: {0}")]
    InvalidInput(#[from] WorkoutError),

    #[error("no map position selected")]
    NoPendingClick,

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    Idle,
    /// The map was clicked at `pending` and the form is open.
    AwaitingSubmission { pending: Coords },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapState {
    /// Waiting for the geolocation answer.
    Pending,
    Ready,
    /// Geolocation failed. The list still works, the map does not.
    Unavailable,
}

/// Owns the workout list and mediates between map, form, list and storage.
///
/// Lifecycle: `start` loads saved workouts and asks for a position; the host
/// then feeds every event (position, map click, submit, cancel, list click,
/// reset) into the matching method. Only those methods mutate state.
pub struct SessionController<M, V, S, C = SystemClock> {
    map: M,
    view: V,
    repository: WorkoutRepository<S>,
    clock: C,
    config: SessionConfig,
    workouts: Vec<Workout>,
    state: SessionState,
    map_state: MapState,
}

impl<M, V, S> SessionController<M, V, S, SystemClock>
where
    M: MapAdapter,
    V: View,
    S: KeyValueStore,
{
    pub fn new(map: M, view: V, store: S, config: SessionConfig) -> Self {
        Self::with_clock(map, view, store, SystemClock, config)
    }
}

impl<M, V, S, C> SessionController<M, V, S, C>
where
    M: MapAdapter,
    V: View,
    S: KeyValueStore,
    C: Clock,
{
    pub fn with_clock(map: M, view: V, store: S, clock: C, config: SessionConfig) -> Self {
        let repository = WorkoutRepository::with_key(store, config.storage_key.clone());
        Self {
            map,
            view,
            repository,
            clock,
            config,
            workouts: Vec::new(),
            state: SessionState::Idle,
            map_state: MapState::Pending,
        }
    }

    /// Replays saved workouts into the list, then asks for the position the map is centered on.
    pub fn start(&mut self, geolocation: &mut impl Geolocation) {
        self.load_saved();
        geolocation.request_position();
    }

    /// Replaces the in-memory list with whatever storage holds and renders it.
    pub fn load_saved(&mut self) {
        self.workouts = self.repository.load();
        tracing::info!("Loaded {} saved workouts", self.workouts.len());

        for workout in &self.workouts {
            self.view.render_workout(&WorkoutView::from(workout));
        }
        if self.map_state == MapState::Ready {
            self.render_all_markers();
        }
    }

    pub fn position_acquired(&mut self, position: Coords) {
        if self.map_state == MapState::Ready {
            tracing::debug!("Map already initialized, ignoring position {position}");
            return;
        }

        tracing::info!("Initializing map at {position}");
        self.map.initialize(position, self.config.zoom_level);
        self.map.add_tile_layer(&self.config.tile_url, &self.config.tile_attribution);
        self.map.listen_for_clicks();
        self.map_state = MapState::Ready;

        self.render_all_markers();
    }

    pub fn position_unavailable(&mut self) {
        tracing::warn!("Geolocation unavailable, map disabled");
        self.map_state = MapState::Unavailable;
        self.view.notify("Could not get your position");
    }

    pub fn map_clicked(&mut self, coords: Coords) {
        if let SessionState::AwaitingSubmission { pending } = self.state {
            tracing::debug!("Replacing pending click {pending} with {coords}");
        }
        self.state = SessionState::AwaitingSubmission { pending: coords };
        self.view.show_form();
    }

    pub fn workout_type_changed(&mut self, kind: WorkoutKind) {
        self.view.toggle_fields_for_type(kind);
    }

    /// Creates a workout at the pending click position.
    ///
    /// Invalid input leaves the form open and the list untouched. A failed
    /// save keeps the new workout in memory and on screen, but reports the error.
    pub fn form_submitted(&mut self, fields: FormFields) -> Result<&Workout, SessionError> {
        let SessionState::AwaitingSubmission { pending } = self.state else {
            return Err(SessionError::NoPendingClick);
        };

        let workout = match fields.into_workout(pending, self.clock.now()) {
            Ok(workout) => workout,
            Err(err) => {
                tracing::debug!("Rejected workout input: {err}");
                self.view.notify(&err.to_string());
                return Err(err.into());
            }
        };

        tracing::info!("Created workout {} ({})", workout.id(), workout.describe());

        if self.map_state == MapState::Ready {
            self.map.add_marker(&MarkerPopup::from(&workout));
        }
        self.view.render_workout(&WorkoutView::from(&workout));

        let index = self.workouts.len();
        self.workouts.push(workout);
        self.state = SessionState::Idle;
        self.view.hide_form();

        if let Err(err) = self.repository.save(&self.workouts) {
            tracing::error!("Failed to save workouts: {err}");
            self.view.notify(&format!("Could not save workouts: {err}"));
            return Err(err.into());
        }

        Ok(&self.workouts[index])
    }

    pub fn cancel(&mut self) {
        self.state = SessionState::Idle;
        self.view.hide_form();
    }

    /// Pans the map to the workout with `id`. Unknown ids are ignored.
    pub fn list_item_clicked(&mut self, id: &WorkoutId) {
        if self.map_state != MapState::Ready {
            return;
        }

        let Some(workout) = self.workouts.iter().find(|workout| workout.id() == id) else {
            tracing::debug!("No workout with id {id}");
            return;
        };

        let pan = PanOptions {
            animate: true,
            duration_secs: self.config.pan_duration_secs,
        };
        self.map.set_view(workout.coords(), self.config.zoom_level, pan);
    }

    /// Removes every saved workout and restarts the application.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if let Err(err) = self.repository.clear() {
            tracing::error!("Failed to clear workouts: {err}");
            self.view.notify(&format!("Could not reset workouts: {err}"));
            return Err(err.into());
        }

        self.workouts.clear();
        self.state = SessionState::Idle;
        self.view.reload();
        Ok(())
    }

    fn render_all_markers(&mut self) {
        for workout in &self.workouts {
            self.map.add_marker(&MarkerPopup::from(workout));
        }
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn map_state(&self) -> MapState {
        self.map_state
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn repository(&self) -> &WorkoutRepository<S> {
        &self.repository
    }
}
