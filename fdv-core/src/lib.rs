//! Core types and data loaders for the India flood event inventory.
//!
//! - `event`: flood event rows parsed from the inventory CSV
//! - `geometry`: named state/district polygons parsed from GeoJSON
//! - `hierarchy`: the embedded state -> districts reference table
//! - `criteria`: transient filter and highlight selections

pub mod criteria;
pub mod error;
pub mod event;
pub mod geometry;
pub mod hierarchy;

pub use error::{FloodError, Result};
