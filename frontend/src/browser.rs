use gloo_console::{error, info};
use gloo_timers::callback::Timeout;
use gloo_utils::window;
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{Storage, js_sys::Reflect};
use workout_tracker_lib::{
    adapters::{Geolocation, View},
    coords::Coords,
    store::{KeyValueStore, StoreError},
    view_model::WorkoutView,
    workout::WorkoutKind,
};
use yew::Callback;

/// `window.localStorage`.
pub struct LocalStorage;

impl LocalStorage {
    fn storage(&self) -> Result<Storage, StoreError> {
        match window().local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(StoreError::Unavailable("no localStorage".into())),
            Err(err) => Err(StoreError::Unavailable(format!("{err:?}"))),
        }
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| StoreError::Io(format!("{err:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // setItem only throws when the quota is used up
        self.storage()?
            .set_item(key, value)
            .map_err(|err| StoreError::QuotaExceeded(format!("{err:?}")))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage()?
            .remove_item(key)
            .map_err(|err| StoreError::Io(format!("{err:?}")))
    }
}

/// `navigator.geolocation`, answering through yew callbacks.
pub struct BrowserGeolocation {
    pub on_position: Callback<Coords>,
    pub on_error: Callback<()>,
}

impl Geolocation for BrowserGeolocation {
    fn request_position(&mut self) {
        let geolocation = match window().navigator().geolocation() {
            Ok(geolocation) => geolocation,
            Err(err) => {
                error!("Geolocation not supported", err);
                self.on_error.emit(());
                return;
            }
        };

        let on_position = self.on_position.clone();
        let on_failure = self.on_error.clone();
        let success = Closure::once(move |position: JsValue| match position_coords(&position) {
            Some(coords) => on_position.emit(coords),
            None => on_failure.emit(()),
        });

        let on_error = self.on_error.clone();
        let failure = Closure::once(move |_: JsValue| on_error.emit(()));

        if let Err(err) = geolocation.get_current_position_with_error_callback(
            success.as_ref().unchecked_ref(),
            Some(failure.as_ref().unchecked_ref()),
        ) {
            error!("Position request failed", err);
            self.on_error.emit(());
            return;
        }

        // One-shot callbacks owned by the browser from here on
        success.forget();
        failure.forget();
    }
}

fn position_coords(position: &JsValue) -> Option<Coords> {
    let coords = Reflect::get(position, &"coords".into()).ok()?;
    let lat = Reflect::get(&coords, &"latitude".into()).ok()?.as_f64()?;
    let lng = Reflect::get(&coords, &"longitude".into()).ok()?.as_f64()?;
    Coords::new(lat, lng).ok()
}

/// Raw values of the form inputs plus its visibility.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub visible: bool,
    /// `display: none` while the hide transition runs
    pub collapsed: bool,
    pub focus_pending: bool,
    pub kind: WorkoutKind,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            visible: false,
            collapsed: false,
            focus_pending: false,
            kind: WorkoutKind::Running,
            distance: String::new(),
            duration: String::new(),
            cadence: String::new(),
            elevation: String::new(),
        }
    }
}

/// View state rendered by the yew component.
pub struct BrowserView {
    pub form: FormState,
    pub rows: Vec<WorkoutView>,
    on_form_restored: Callback<()>,
}

impl BrowserView {
    pub fn new(on_form_restored: Callback<()>) -> Self {
        Self {
            form: FormState::default(),
            rows: Vec::new(),
            on_form_restored,
        }
    }
}

impl View for BrowserView {
    fn show_form(&mut self) {
        self.form.visible = true;
        self.form.focus_pending = true;
    }

    fn hide_form(&mut self) {
        self.form = FormState {
            kind: self.form.kind,
            collapsed: true,
            ..FormState::default()
        };

        let restored = self.on_form_restored.clone();
        Timeout::new(1_000, move || restored.emit(())).forget();
    }

    fn toggle_fields_for_type(&mut self, kind: WorkoutKind) {
        self.form.kind = kind;
    }

    fn render_workout(&mut self, workout: &WorkoutView) {
        self.rows.push(workout.clone());
    }

    fn notify(&mut self, message: &str) {
        if let Err(err) = window().alert_with_message(message) {
            error!("Failed to show alert", err);
        }
    }

    fn reload(&mut self) {
        info!("Reloading");
        if let Err(err) = window().location().reload() {
            error!("Failed to reload", err);
        }
    }
}
