use gloo_console::{error, info};
use web_sys::HtmlInputElement;
use workout_tracker_lib::{
    config::SessionConfig,
    coords::Coords,
    form::FormFields,
    session::SessionController,
    workout::{WorkoutId, WorkoutKind},
};
use yew::prelude::*;

use crate::{
    browser::{BrowserGeolocation, BrowserView, LocalStorage},
    components::{
        workout_form::{FormInput, WorkoutForm},
        workout_list::WorkoutList,
    },
    leaflet_map::LeafletMap,
};

mod browser;
mod components;
mod leaflet_map;

type Controller = SessionController<LeafletMap, BrowserView, LocalStorage>;

enum MainMsg {
    PositionAcquired(Coords),
    PositionUnavailable,
    MapClicked(Coords),
    TypeChanged(String),
    Input(FormInput, String),
    Submit,
    Cancel,
    FormRestored,
    SelectWorkout(WorkoutId),
    Reset,
}

struct Model {
    controller: Controller,
    distance_ref: NodeRef,
}

impl Component for Model {
    type Message = MainMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link();

        let map = LeafletMap::new(link.callback(MainMsg::MapClicked)).expect("Failed to create map container");
        let view = BrowserView::new(link.callback(|()| MainMsg::FormRestored));
        let mut controller = Controller::new(map, view, LocalStorage, SessionConfig::default());

        let mut geolocation = BrowserGeolocation {
            on_position: link.callback(MainMsg::PositionAcquired),
            on_error: link.callback(|()| MainMsg::PositionUnavailable),
        };
        controller.start(&mut geolocation);

        Self {
            controller,
            distance_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            MainMsg::PositionAcquired(coords) => {
                info!(format!("Position: {coords}"));
                self.controller.position_acquired(coords);
            }
            MainMsg::PositionUnavailable => self.controller.position_unavailable(),
            MainMsg::MapClicked(coords) => self.controller.map_clicked(coords),
            MainMsg::TypeChanged(value) => match value.parse::<WorkoutKind>() {
                Ok(kind) => self.controller.workout_type_changed(kind),
                Err(err) => error!(err),
            },
            MainMsg::Input(field, value) => {
                let form = &mut self.controller.view_mut().form;
                match field {
                    FormInput::Distance => form.distance = value,
                    FormInput::Duration => form.duration = value,
                    FormInput::Cadence => form.cadence = value,
                    FormInput::Elevation => form.elevation = value,
                }
            }
            MainMsg::Submit => {
                let form = &self.controller.view().form;
                let fields = FormFields::parse(form.kind, &form.distance, &form.duration, &form.cadence, &form.elevation);
                if let Err(err) = self.controller.form_submitted(fields) {
                    error!(format!("Workout not added: {err}"));
                }
            }
            MainMsg::Cancel => self.controller.cancel(),
            MainMsg::FormRestored => self.controller.view_mut().form.collapsed = false,
            MainMsg::SelectWorkout(id) => self.controller.list_item_clicked(&id),
            MainMsg::Reset => {
                if let Err(err) = self.controller.reset() {
                    error!(format!("Reset failed: {err}"));
                }
            }
        }
        true
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if first_render {
            self.controller.map().invalidate_size();
        }

        let form = &mut self.controller.view_mut().form;
        if form.focus_pending {
            form.focus_pending = false;
            if let Some(input) = self.distance_ref.cast::<HtmlInputElement>() {
                if let Err(err) = input.focus() {
                    error!("Failed to focus distance input", err);
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let view = self.controller.view();

        html! {
            <>
                <div class="sidebar">
                    <ul class="workouts">
                        <WorkoutForm
                            form={view.form.clone()}
                            distance_ref={self.distance_ref.clone()}
                            on_type_change={link.callback(MainMsg::TypeChanged)}
                            on_input={link.callback(|(field, value): (FormInput, String)| MainMsg::Input(field, value))}
                            on_submit={link.callback(|()| MainMsg::Submit)}
                            on_cancel={link.callback(|()| MainMsg::Cancel)}
                        />
                        <WorkoutList rows={view.rows.clone()} on_select={link.callback(MainMsg::SelectWorkout)} />
                    </ul>
                    <button class="btn--reset" onclick={link.callback(|_: MouseEvent| MainMsg::Reset)}>
                        {"Reset"}
                    </button>
                </div>
                { self.controller.map().render() }
            </>
        }
    }
}

fn main() {
    yew::Renderer::<Model>::new().render();
}
