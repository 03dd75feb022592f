//! Interaction logic of the flood dashboard, independent of any UI toolkit.
//!
//! - `context`: process-lifetime data shared by every view
//! - `controller`: the Idle/Filtered state machine driven by UI events
//! - `render`: the serializable tree each event produces

pub mod context;
pub mod controller;
pub mod render;

pub use context::DashboardContext;
pub use controller::{DashboardController, DashboardEvent};
pub use render::RenderTree;
