//! Flood Data Visualiser
//!
//! Browses the India flood event inventory as a table that can be filtered by
//! date range, state and district. Selecting a row highlights the affected
//! states or districts on a choropleth map.
//!
//! Data flow:
//! 1. `build.rs` copies the inventory CSV and state GeoJSON into `OUT_DIR`
//!    and gzips the district GeoJSON next to them.
//! 2. `include_str!`/`include_bytes!` embed them into the WASM binary.
//! 3. On mount they are parsed into a `DashboardContext` and a
//!    `DashboardController` is started.
//! 4. Widget input is dispatched to the controller; every new `RenderTree`
//!    re-renders the table and form and is handed to Plotly for the map.

use dioxus::prelude::*;
use fdv_dashboard::{DashboardContext, DashboardController};
use fdv_ui::components::{
    ErrorDisplay, EventTable, FilterPanel, GranularitySelector, LoadingSpinner, MapContainer,
    Navbar,
};
use fdv_ui::js_bridge;
use fdv_ui::state::AppState;
use std::rc::Rc;
use wasm_bindgen::JsValue;

/// Flood event inventory.
const INVENTORY_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/IndiaFloodInventory.csv"));
/// State polygons, names in `ST_NM`.
const STATES_GEOJSON: &str = include_str!(concat!(env!("OUT_DIR"), "/india_states.geojson"));
/// District polygons, names in `Dist_Name`, gzip-compressed.
const DISTRICTS_GEOJSON_GZ: &[u8] =
    include_bytes!(concat!(env!("OUT_DIR"), "/india_districts.geojson.gz"));

/// Map container DOM element ID used by Plotly to render into.
const MAP_ID: &str = "map-graph";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("flood-data-visualiser-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // Load the embedded data on mount
    use_effect(move || {
        match DashboardContext::load(INVENTORY_CSV, STATES_GEOJSON, DISTRICTS_GEOJSON_GZ) {
            Ok(context) => {
                web_sys::console::log_1(&JsValue::from_str(&format!(
                    "[FDV] Loaded {} flood events",
                    context.events().len()
                )));
                js_bridge::init_map();
                state.start(DashboardController::new(Rc::new(context)));
            }
            Err(e) => {
                log::error!("Failed to load flood data: {}", e);
                state
                    .error_msg
                    .set(Some(format!("Failed to load flood data: {}", e)));
                state.loading.set(false);
            }
        }
    });

    // Redraw the map whenever the controller publishes a new view
    use_effect(move || {
        if let Some(tree) = &*state.tree.read() {
            js_bridge::render_choropleth_map(MAP_ID, &tree.map);
        }
    });

    rsx! {
        div {
            class: "content",
            style: "font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            Navbar { title: "FLOOD DATA VISUALISER".to_string() }

            if let Some(err) = (state.error_msg)() {
                ErrorDisplay { message: err }
            } else if (state.loading)() {
                LoadingSpinner {}
            } else {
                div {
                    class: "container",
                    style: "display: flex; flex-direction: column; gap: 16px; padding: 0 16px 16px 16px;",
                    div {
                        class: "table-box",
                        p {
                            class: "box-header",
                            style: "font-weight: bold; font-size: 16px; margin: 0 0 8px 0;",
                            "Flood Data"
                        }
                        div {
                            class: "horizontal-flex",
                            style: "display: flex; gap: 12px;",
                            FilterPanel {}
                            EventTable {}
                        }
                    }
                    div {
                        class: "map-box",
                        GranularitySelector {}
                        MapContainer { id: MAP_ID.to_string() }
                    }
                }
            }
        }
    }
}
