//! Radio buttons choosing whether the map shows states or districts.

use crate::state::AppState;
use dioxus::prelude::*;
use fdv_core::criteria::Granularity;
use fdv_dashboard::DashboardEvent;

#[component]
pub fn GranularitySelector() -> Element {
    let mut state = use_context::<AppState>();
    let current = state
        .tree
        .read()
        .as_ref()
        .map(|tree| tree.granularity)
        .unwrap_or_default();

    let on_change = move |evt: Event<FormData>| match evt.value().parse::<Granularity>() {
        Ok(granularity) => state.dispatch(DashboardEvent::GranularityChanged(granularity)),
        Err(e) => log::warn!("Ignoring granularity input: {}", e),
    };

    rsx! {
        div {
            class: "radio-buttons",
            style: "margin: 8px 0; display: flex; gap: 16px; align-items: center;",
            for (granularity, label) in [(Granularity::State, "Show States"), (Granularity::District, "Show Districts")] {
                label {
                    style: "display: inline-block; cursor: pointer;",
                    input {
                        r#type: "radio",
                        name: "highlight-option",
                        value: "{granularity}",
                        checked: current == granularity,
                        onchange: on_change,
                    }
                    " {label}"
                }
            }
        }
    }
}
