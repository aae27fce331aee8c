use gloo_console::error;
use gloo_utils::{document, format::JsValueSerdeExt};
use leaflet::{LatLng, Map, MapOptions, Marker, MouseEvent, Popup, PopupOptions, TileLayer, TileLayerOptions};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, Node};
use workout_tracker_lib::{
    adapters::{MapAdapter, PanOptions},
    coords::Coords,
    view_model::MarkerPopup,
};
use yew::{Callback, Html};

/// Leaflet map living in its own container element, outside yew's virtual DOM.
pub struct LeafletMap {
    map: Map,
    container: HtmlElement,
    on_click: Callback<Coords>,
}

/// Options of `setView`, see leaflet's zoom/pan options.
#[derive(Serialize)]
struct ZoomPanOptions {
    animate: bool,
    pan: PanDuration,
}

#[derive(Serialize)]
struct PanDuration {
    duration: f64,
}

impl LeafletMap {
    pub fn new(on_click: Callback<Coords>) -> Result<Self, JsValue> {
        let container: HtmlElement = document().create_element("div")?.dyn_into()?;
        container.set_id("map");

        let map = Map::new_with_element(&container, &MapOptions::default());

        Ok(Self {
            map,
            container,
            on_click,
        })
    }

    pub fn render(&self) -> Html {
        let node: &Node = &self.container.clone().into();
        Html::VRef(node.clone())
    }

    pub fn invalidate_size(&self) {
        self.map.invalidate_size(false);
    }
}

impl MapAdapter for LeafletMap {
    fn initialize(&mut self, center: Coords, zoom: f64) {
        self.map.set_view(&lat_lng(center), zoom);
    }

    fn add_tile_layer(&mut self, url: &str, attribution: &str) {
        let opts = TileLayerOptions::new();
        opts.set_update_when_idle(true);
        opts.set_attribution(attribution.to_owned());
        TileLayer::new_options(url, &opts).add_to(&self.map);
    }

    fn listen_for_clicks(&mut self) {
        let on_click = self.on_click.clone();
        self.map.on_mouse_click(Box::new(move |event: MouseEvent| {
            let position = event.lat_lng();
            match Coords::new(position.lat(), position.lng()) {
                Ok(coords) => on_click.emit(coords),
                Err(err) => error!(format!("Map click without a valid position: {err}")),
            }
        }));
    }

    fn add_marker(&mut self, popup: &MarkerPopup) {
        let opts = PopupOptions::default();
        opts.set_max_width(popup.max_width);
        opts.set_min_width(popup.min_width);
        opts.set_auto_close(popup.auto_close);
        opts.set_close_on_click(popup.close_on_click);
        opts.set_class_name(popup.class_name.clone());

        let leaflet_popup = Popup::new(&opts, None);
        leaflet_popup.set_content(&popup.content.as_str().into());

        let marker = Marker::new(&lat_lng(popup.coords));
        marker.add_to(&self.map);
        marker.bind_popup(&leaflet_popup);
        marker.open_popup();
    }

    fn set_view(&mut self, center: Coords, zoom: f64, pan: PanOptions) {
        let opts = ZoomPanOptions {
            animate: pan.animate,
            pan: PanDuration { duration: pan.duration_secs },
        };

        match JsValue::from_serde(&opts) {
            Ok(opts) => {
                self.map.set_view_with_options(&lat_lng(center), zoom, &opts);
            }
            Err(err) => error!(format!("Failed to encode pan options: {err}")),
        }
    }
}

fn lat_lng(coords: Coords) -> LatLng {
    LatLng::new(coords.lat, coords.lng)
}
