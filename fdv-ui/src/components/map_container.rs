//! Container the Plotly map renders into.

use dioxus::prelude::*;

/// Height of the map in pixels, matching the Plotly layout
const MAP_HEIGHT: u32 = 600;

/// Props for MapContainer
#[derive(Props, Clone, PartialEq)]
pub struct MapContainerProps {
    /// The DOM id Plotly renders into
    pub id: String,
}

#[component]
pub fn MapContainer(props: MapContainerProps) -> Element {
    rsx! {
        div {
            class: "map-container",
            style: "min-height: {MAP_HEIGHT}px; position: relative; width: 100%; border: 1px solid #E0E0E0; border-radius: 4px;",
            div {
                id: "{props.id}",
                style: "width: 100%; height: {MAP_HEIGHT}px;",
            }
        }
    }
}
