//! Cascading state and district dropdowns.

use crate::state::AppState;
use dioxus::prelude::*;
use fdv_dashboard::DashboardEvent;

fn selection(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// State dropdown. Choosing a state refreshes the district options.
#[component]
pub fn StateSelector() -> Element {
    let mut state = use_context::<AppState>();
    let (options, selected) = match &*state.tree.read() {
        Some(tree) => (tree.state_options.clone(), tree.form.state.clone()),
        None => (Vec::new(), None),
    };

    let on_change = move |evt: Event<FormData>| {
        state.dispatch(DashboardEvent::StateChanged(selection(evt.value())));
    };

    rsx! {
        div {
            class: "form-group",
            style: "margin: 8px 0; display: flex; flex-direction: column; gap: 2px;",
            label {
                r#for: "state",
                style: "font-weight: bold;",
                "State:"
            }
            select {
                id: "state",
                onchange: on_change,
                option {
                    value: "",
                    selected: selected.is_none(),
                    "SELECT STATE"
                }
                for name in options.iter() {
                    option {
                        value: "{name}",
                        selected: selected.as_deref() == Some(name.as_str()),
                        "{name}"
                    }
                }
            }
        }
    }
}

/// District dropdown, listing the districts of the selected state.
#[component]
pub fn DistrictSelector() -> Element {
    let mut state = use_context::<AppState>();
    let (options, selected) = match &*state.tree.read() {
        Some(tree) => (tree.district_options.clone(), tree.form.district.clone()),
        None => (Vec::new(), None),
    };

    let on_change = move |evt: Event<FormData>| {
        state.dispatch(DashboardEvent::DistrictChanged(selection(evt.value())));
    };

    rsx! {
        div {
            class: "form-group",
            style: "margin: 8px 0; display: flex; flex-direction: column; gap: 2px;",
            label {
                r#for: "district",
                style: "font-weight: bold;",
                "District:"
            }
            select {
                id: "district",
                disabled: options.is_empty(),
                onchange: on_change,
                option {
                    value: "",
                    selected: selected.is_none(),
                    "SELECT DISTRICT"
                }
                for name in options.iter() {
                    option {
                        value: "{name}",
                        selected: selected.as_deref() == Some(name.as_str()),
                        "{name}"
                    }
                }
            }
        }
    }
}
