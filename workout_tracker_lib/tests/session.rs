use chrono::{DateTime, FixedOffset, TimeZone};
use workout_tracker_lib::{
    adapters::{Clock, Geolocation, MapAdapter, PanOptions, View},
    config::SessionConfig,
    coords::Coords,
    form::FormFields,
    persistence::{WorkoutRepository, DEFAULT_STORAGE_KEY},
    session::{MapState, SessionController, SessionError, SessionState},
    store::{KeyValueStore, MemoryStore, StoreError},
    view_model::{MarkerPopup, WorkoutView},
    workout::{PrimaryMetric, WorkoutId, WorkoutKind},
};

#[derive(Debug, Clone, PartialEq)]
enum MapCall {
    Initialize(Coords, f64),
    TileLayer,
    ListenForClicks,
    Marker(MarkerPopup),
    SetView(Coords, f64, PanOptions),
}

#[derive(Default)]
struct RecordingMap {
    calls: Vec<MapCall>,
}

impl RecordingMap {
    fn markers(&self) -> Vec<&MarkerPopup> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                MapCall::Marker(popup) => Some(popup),
                _ => None,
            })
            .collect()
    }
}

impl MapAdapter for RecordingMap {
    fn initialize(&mut self, center: Coords, zoom: f64) {
        self.calls.push(MapCall::Initialize(center, zoom));
    }

    fn add_tile_layer(&mut self, _url: &str, _attribution: &str) {
        self.calls.push(MapCall::TileLayer);
    }

    fn listen_for_clicks(&mut self) {
        self.calls.push(MapCall::ListenForClicks);
    }

    fn add_marker(&mut self, popup: &MarkerPopup) {
        self.calls.push(MapCall::Marker(popup.clone()));
    }

    fn set_view(&mut self, center: Coords, zoom: f64, pan: PanOptions) {
        self.calls.push(MapCall::SetView(center, zoom, pan));
    }
}

#[derive(Default)]
struct RecordingView {
    form_visible: bool,
    toggled: Vec<WorkoutKind>,
    rows: Vec<WorkoutView>,
    notices: Vec<String>,
    reloads: usize,
}

impl View for RecordingView {
    fn show_form(&mut self) {
        self.form_visible = true;
    }

    fn hide_form(&mut self) {
        self.form_visible = false;
    }

    fn toggle_fields_for_type(&mut self, kind: WorkoutKind) {
        self.toggled.push(kind);
    }

    fn render_workout(&mut self, workout: &WorkoutView) {
        self.rows.push(workout.clone());
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_owned());
    }

    fn reload(&mut self) {
        self.reloads += 1;
    }
}

#[derive(Default)]
struct PendingGeolocation {
    requests: usize,
}

impl Geolocation for PendingGeolocation {
    fn request_position(&mut self) {
        self.requests += 1;
    }
}

struct FixedClock(DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Reads fine, refuses every write.
struct FullStore;

impl KeyValueStore for FullStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::QuotaExceeded("workouts".into()))
    }

    fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("read only".into()))
    }
}

type Controller<S> = SessionController<RecordingMap, RecordingView, S, FixedClock>;

fn clock() -> FixedClock {
    let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
    FixedClock(plus_two.with_ymd_and_hms(2024, 4, 14, 11, 30, 0).unwrap())
}

fn london() -> Coords {
    Coords::new(51.5, -0.1).unwrap()
}

fn controller<S: KeyValueStore>(store: S) -> Controller<S> {
    SessionController::with_clock(RecordingMap::default(), RecordingView::default(), store, clock(), SessionConfig::default())
}

fn started<S: KeyValueStore>(store: S) -> Controller<S> {
    let mut controller = controller(store);
    controller.start(&mut PendingGeolocation::default());
    controller.position_acquired(london());
    controller
}

#[test]
fn start_requests_position_and_initializes_map() {
    let mut controller = controller(MemoryStore::new());
    let mut geolocation = PendingGeolocation::default();

    controller.start(&mut geolocation);
    assert_eq!(geolocation.requests, 1);
    assert_eq!(controller.map_state(), MapState::Pending);

    controller.position_acquired(london());

    assert_eq!(controller.map_state(), MapState::Ready);
    assert_eq!(
        controller.map().calls,
        vec![MapCall::Initialize(london(), 13.), MapCall::TileLayer, MapCall::ListenForClicks]
    );
}

#[test]
fn running_submission_is_appended_rendered_and_saved() {
    let mut store = MemoryStore::new();
    let mut controller = started(&mut store);

    controller.map_clicked(london());
    assert!(controller.view().form_visible);

    let workout = controller.form_submitted(FormFields::running(5., 25., 178.)).unwrap();
    assert_eq!(workout.primary_metric(), PrimaryMetric::Pace(5.));
    assert_eq!(workout.coords(), london());

    assert_eq!(controller.state(), SessionState::Idle);
    assert!(!controller.view().form_visible);
    assert_eq!(controller.workouts().len(), 1);
    assert_eq!(controller.view().rows.len(), 1);

    let markers = controller.map().markers();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].coords, london());
    assert_eq!(markers[0].content, "🏃‍♂️ Running on April 14");

    let saved = controller.workouts().to_vec();
    drop(controller);
    assert_eq!(WorkoutRepository::new(&mut store).load(), saved);
}

#[test]
fn description_uses_the_local_day_of_the_clock() {
    let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
    let after_midnight = FixedClock(plus_two.with_ymd_and_hms(2024, 4, 15, 1, 0, 0).unwrap());
    let mut controller =
        SessionController::with_clock(RecordingMap::default(), RecordingView::default(), MemoryStore::new(), after_midnight, SessionConfig::default());
    controller.start(&mut PendingGeolocation::default());
    controller.position_acquired(london());
    controller.map_clicked(london());

    let workout = controller.form_submitted(FormFields::running(5., 25., 178.)).unwrap();

    assert_eq!(workout.describe(), "Running on April 15");
    assert_eq!(controller.map().markers()[0].content, "🏃‍♂️ Running on April 15");
}

#[test]
fn negative_elevation_is_rejected_and_form_stays_open() {
    let mut controller = started(MemoryStore::new());
    controller.map_clicked(london());

    let result = controller.form_submitted(FormFields::cycling(20., 60., -5.));

    assert!(matches!(result, Err(SessionError::InvalidInput(_))));
    assert!(controller.workouts().is_empty());
    assert_eq!(controller.state(), SessionState::AwaitingSubmission { pending: london() });
    assert!(controller.view().form_visible);
    assert_eq!(controller.view().notices, vec!["elevation has to be a positive number, got -5".to_owned()]);
    assert!(controller.map().markers().is_empty());
    assert_eq!(controller.repository().store().get(DEFAULT_STORAGE_KEY).unwrap(), None);
}

#[test]
fn invalid_running_input_is_rejected_symmetrically() {
    let mut controller = started(MemoryStore::new());
    controller.map_clicked(london());

    assert!(controller.form_submitted(FormFields::running(5., 0., 178.)).is_err());
    assert!(controller.form_submitted(FormFields::running(f64::NAN, 25., 178.)).is_err());
    assert!(controller.form_submitted(FormFields::running(5., 25., -178.)).is_err());
    assert!(controller.workouts().is_empty());
}

#[test]
fn latest_map_click_wins() {
    let mut controller = started(MemoryStore::new());
    let paris = Coords::new(48.85, 2.35).unwrap();

    controller.map_clicked(london());
    controller.map_clicked(paris);

    let workout = controller.form_submitted(FormFields::cycling(20., 60., 150.)).unwrap();
    assert_eq!(workout.coords(), paris);
}

#[test]
fn submit_without_click_is_refused() {
    let mut controller = started(MemoryStore::new());

    let result = controller.form_submitted(FormFields::running(5., 25., 178.));

    assert!(matches!(result, Err(SessionError::NoPendingClick)));
    assert!(controller.workouts().is_empty());
}

#[test]
fn cancel_clears_pending_click() {
    let mut controller = started(MemoryStore::new());
    controller.map_clicked(london());

    controller.cancel();

    assert_eq!(controller.state(), SessionState::Idle);
    assert!(!controller.view().form_visible);
    assert!(matches!(
        controller.form_submitted(FormFields::running(5., 25., 178.)),
        Err(SessionError::NoPendingClick)
    ));
}

#[test]
fn type_change_toggles_fields() {
    let mut controller = started(MemoryStore::new());

    controller.workout_type_changed(WorkoutKind::Cycling);

    assert_eq!(controller.view().toggled, vec![WorkoutKind::Cycling]);
}

#[test]
fn saved_workouts_are_replayed_on_next_session() {
    let mut store = MemoryStore::new();
    {
        let mut first = started(&mut store);
        first.map_clicked(london());
        first.form_submitted(FormFields::running(5., 25., 178.)).unwrap();
        first.map_clicked(london());
        first.form_submitted(FormFields::cycling(20., 60., 150.)).unwrap();
    }

    let mut second = controller(&mut store);
    second.start(&mut PendingGeolocation::default());

    // rows right away, markers once the map exists
    assert_eq!(second.view().rows.len(), 2);
    assert!(second.map().markers().is_empty());

    second.position_acquired(london());
    assert_eq!(second.map().markers().len(), 2);
    assert_eq!(second.workouts()[1].kind(), WorkoutKind::Cycling);
}

#[test]
fn list_still_renders_without_geolocation() {
    let mut store = MemoryStore::new();
    {
        let mut first = started(&mut store);
        first.map_clicked(london());
        first.form_submitted(FormFields::running(5., 25., 178.)).unwrap();
    }

    let mut second = controller(&mut store);
    second.start(&mut PendingGeolocation::default());
    second.position_unavailable();

    assert_eq!(second.map_state(), MapState::Unavailable);
    assert_eq!(second.view().notices, vec!["Could not get your position".to_owned()]);
    assert_eq!(second.view().rows.len(), 1);
    assert!(second.map().calls.is_empty());
}

#[test]
fn list_click_pans_to_workout() {
    let mut controller = started(MemoryStore::new());
    let paris = Coords::new(48.85, 2.35).unwrap();
    controller.map_clicked(paris);
    let id = controller.form_submitted(FormFields::running(5., 25., 178.)).unwrap().id().clone();

    controller.list_item_clicked(&id);

    let pan = PanOptions { animate: true, duration_secs: 1. };
    assert_eq!(controller.map().calls.last(), Some(&MapCall::SetView(paris, 13., pan)));
}

#[test]
fn unknown_list_click_is_ignored() {
    let mut controller = started(MemoryStore::new());
    let calls_before = controller.map().calls.len();

    controller.list_item_clicked(&WorkoutId::from("0000000000"));

    assert_eq!(controller.map().calls.len(), calls_before);
    assert!(controller.view().notices.is_empty());
}

#[test]
fn reset_clears_storage_and_reloads() {
    let mut store = MemoryStore::new();
    {
        let mut controller = started(&mut store);
        controller.map_clicked(london());
        controller.form_submitted(FormFields::running(5., 25., 178.)).unwrap();

        controller.reset().unwrap();

        assert!(controller.workouts().is_empty());
        assert_eq!(controller.view().reloads, 1);
    }

    assert_eq!(store.get(DEFAULT_STORAGE_KEY).unwrap(), None);
    assert!(WorkoutRepository::new(&mut store).load().is_empty());
}

#[test]
fn failed_save_is_reported_but_workout_kept() {
    let mut controller = started(FullStore);
    controller.map_clicked(london());

    let result = controller.form_submitted(FormFields::running(5., 25., 178.));

    assert!(matches!(result, Err(SessionError::Persistence(_))));
    assert_eq!(controller.workouts().len(), 1);
    assert_eq!(controller.state(), SessionState::Idle);
    assert_eq!(controller.view().notices.len(), 1);
}

#[test]
fn failed_reset_does_not_reload() {
    let mut controller = started(FullStore);

    assert!(controller.reset().is_err());
    assert_eq!(controller.view().reloads, 0);
}
