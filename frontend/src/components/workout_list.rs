use workout_tracker_lib::{view_model::WorkoutView, workout::WorkoutId};
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct WorkoutListProps {
    pub rows: Vec<WorkoutView>,
    pub on_select: Callback<WorkoutId>,
}

/// Newest workout first, right below the form.
#[function_component]
pub fn WorkoutList(props: &WorkoutListProps) -> Html {
    html! {<>
        { for props.rows.iter().rev().map(|row| {
            let id = row.id.clone();
            let on_select = props.on_select.clone();
            let onclick = Callback::from(move |_: MouseEvent| on_select.emit(id.clone()));

            html! {
                <li key={row.id.to_string()} class={row.class_name()} data-id={row.id.to_string()} {onclick}>
                    <h2 class="workout__title">{&row.description}</h2>
                    { for row.details.iter().map(|detail| html! {
                        <div class="workout__details">
                            <span class="workout__icon">{detail.icon}</span>
                            <span class="workout__value">{&detail.value}</span>
                            <span class="workout__unit">{detail.unit}</span>
                        </div>
                    }) }
                </li>
            }
        }) }
    </>}
}
