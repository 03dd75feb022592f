//! Start and end date pickers for the filter form.

use crate::state::AppState;
use dioxus::prelude::*;
use fdv_dashboard::render::{END_DATE_MIN, START_DATE_MAX};

/// Date inputs holding the pending filter range. Values are sent on submit.
#[component]
pub fn DateRangePicker() -> Element {
    let mut state = use_context::<AppState>();
    let start = (state.start_date)();
    let end = (state.end_date)();

    let on_start_change = move |evt: Event<FormData>| {
        state.start_date.set(evt.value());
    };

    let on_end_change = move |evt: Event<FormData>| {
        state.end_date.set(evt.value());
    };

    rsx! {
        div {
            class: "form-group",
            style: "margin: 8px 0; display: flex; flex-direction: column; gap: 2px;",
            label {
                r#for: "start-date",
                style: "font-weight: bold;",
                "Start Date:"
            }
            input {
                id: "start-date",
                r#type: "date",
                value: "{start}",
                max: START_DATE_MAX,
                onchange: on_start_change,
            }
            p { class: "infos", style: "margin: 0; font-size: 11px; color: #666;", "max : 10/09/2023" }
        }
        div {
            class: "form-group",
            style: "margin: 8px 0; display: flex; flex-direction: column; gap: 2px;",
            label {
                r#for: "end-date",
                style: "font-weight: bold;",
                "End Date:"
            }
            input {
                id: "end-date",
                r#type: "date",
                value: "{end}",
                min: END_DATE_MIN,
                onchange: on_end_change,
            }
            p { class: "infos", style: "margin: 0; font-size: 11px; color: #666;", "min : 08/07/1967" }
        }
    }
}
