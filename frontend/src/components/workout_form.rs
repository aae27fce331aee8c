use web_sys::{HtmlInputElement, HtmlSelectElement};
use workout_tracker_lib::workout::WorkoutKind;
use yew::prelude::*;

use crate::browser::FormState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormInput {
    Distance,
    Duration,
    Cadence,
    Elevation,
}

#[derive(PartialEq, Properties, Clone)]
pub struct WorkoutFormProps {
    pub form: FormState,
    pub distance_ref: NodeRef,
    pub on_type_change: Callback<String>,
    pub on_input: Callback<(FormInput, String)>,
    pub on_submit: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component]
pub fn WorkoutForm(props: &WorkoutFormProps) -> Html {
    let form = &props.form;

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let onkeydown = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                on_cancel.emit(());
            }
        })
    };

    let onchange = {
        let on_type_change = props.on_type_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_type_change.emit(select.value());
        })
    };

    let input = |field: FormInput| {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_input.emit((field, input.value()));
        })
    };

    let running = form.kind == WorkoutKind::Running;
    let form_class = classes!("form", (!form.visible).then_some("hidden"));
    let style = if form.collapsed { "display: none" } else { "display: grid" };
    let row_class = |shown: bool| classes!("form__row", (!shown).then_some("form__row--hidden"));

    html! {
        <form class={form_class} style={style} {onsubmit} {onkeydown}>
            <div class="form__row">
                <label class="form__label">{"Type"}</label>
                <select class="form__input form__input--type" {onchange}>
                    <option value="running" selected={running}>{"Running"}</option>
                    <option value="cycling" selected={!running}>{"Cycling"}</option>
                </select>
            </div>
            <div class="form__row">
                <label class="form__label">{"Distance"}</label>
                <input class="form__input form__input--distance" placeholder="km" ref={props.distance_ref.clone()}
                    value={form.distance.clone()} oninput={input(FormInput::Distance)} />
            </div>
            <div class="form__row">
                <label class="form__label">{"Duration"}</label>
                <input class="form__input form__input--duration" placeholder="min"
                    value={form.duration.clone()} oninput={input(FormInput::Duration)} />
            </div>
            <div class={row_class(running)}>
                <label class="form__label">{"Cadence"}</label>
                <input class="form__input form__input--cadence" placeholder="step/min"
                    value={form.cadence.clone()} oninput={input(FormInput::Cadence)} />
            </div>
            <div class={row_class(!running)}>
                <label class="form__label">{"Elev Gain"}</label>
                <input class="form__input form__input--elevation" placeholder="meters"
                    value={form.elevation.clone()} oninput={input(FormInput::Elevation)} />
            </div>
            <button class="form__btn">{"OK"}</button>
        </form>
    }
}
