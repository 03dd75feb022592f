//! Filter form: date range, cascading region dropdowns and the action buttons.

use crate::components::{DateRangePicker, DistrictSelector, ErrorDisplay, StateSelector};
use crate::state::AppState;
use dioxus::prelude::*;
use fdv_dashboard::render::FormFields;
use fdv_dashboard::DashboardEvent;

const BUTTON_STYLE: &str = "padding: 6px 12px; border: 1px solid #1F3A5F; border-radius: 4px; background: white; cursor: pointer;";

fn picker_value(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[component]
pub fn FilterPanel() -> Element {
    let mut state = use_context::<AppState>();

    let on_submit = move |_| {
        let (region_state, district) = match &*state.tree.read() {
            Some(tree) => (tree.form.state.clone(), tree.form.district.clone()),
            None => (None, None),
        };
        let form = FormFields {
            start_date: picker_value((state.start_date)()),
            end_date: picker_value((state.end_date)()),
            state: region_state,
            district,
        };
        state.dispatch(DashboardEvent::Submit(form));
    };

    rsx! {
        div {
            class: "filter-box",
            style: "min-width: 220px; padding: 8px 12px; border-right: 1px solid #E0E0E0;",
            div { id: "filter-header", style: "font-weight: bold; margin-bottom: 4px;", "Apply Filter:" }
            div {
                class: "form-inline",
                DateRangePicker {}
                StateSelector {}
                DistrictSelector {}
            }
            div {
                class: "form-buttons",
                style: "display: flex; flex-direction: column; gap: 6px; margin-top: 8px;",
                button { class: "filter-button", style: BUTTON_STYLE, onclick: on_submit, "Submit" }
                button {
                    class: "filter-button",
                    style: BUTTON_STYLE,
                    onclick: move |_| state.dispatch(DashboardEvent::Reset),
                    "Reset Filters"
                }
                button {
                    class: "filter-button",
                    style: BUTTON_STYLE,
                    onclick: move |_| state.dispatch(DashboardEvent::ResetAll),
                    "Delete All Filters"
                }
            }
            if let Some(message) = (state.form_error)() {
                ErrorDisplay { message, title: "Invalid filter".to_string(), compact: true }
            }
        }
    }
}
