//! Reconciliation pipeline between the event table and the map.
//!
//! This crate filters the event inventory and turns a selected row into the
//! state or district polygons it refers to, matching free-text region names
//! to geometry names by fuzzy similarity.

pub mod filter;
pub mod fuzz;
pub mod projector;
pub mod resolver;

pub use filter::{filter, filter_indices};
pub use projector::{HighlightProjector, HighlightSets, Projection};
pub use resolver::{GeoNameResolver, NameMatch};
