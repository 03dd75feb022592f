//! Dioxus components and Plotly bridge for the flood data visualiser.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the Plotly choropleth map via `js_sys::eval()`
//! - `state`: reactive `AppState` wrapping the dashboard controller in Dioxus Signals
//! - `components`: the navbar, filter form, event table, map and status widgets

pub mod components;
pub mod js_bridge;
pub mod state;
