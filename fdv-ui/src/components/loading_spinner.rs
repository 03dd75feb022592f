//! Placeholder shown while the inventory and geometries are parsed.

use dioxus::prelude::*;

#[component]
pub fn LoadingSpinner(#[props(default = "Loading flood data...".to_string())] message: String) -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; padding: 40px; color: #666;",
            "{message}"
        }
    }
}
