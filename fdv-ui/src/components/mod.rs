//! Dioxus RSX components for the flood dashboard page.

mod date_range_picker;
mod error_display;
mod event_table;
mod filter_panel;
mod granularity_selector;
mod loading_spinner;
mod map_container;
mod navbar;
mod region_selector;

pub use date_range_picker::DateRangePicker;
pub use error_display::ErrorDisplay;
pub use event_table::EventTable;
pub use filter_panel::FilterPanel;
pub use granularity_selector::GranularitySelector;
pub use loading_spinner::LoadingSpinner;
pub use map_container::MapContainer;
pub use navbar::Navbar;
pub use region_selector::{DistrictSelector, StateSelector};
