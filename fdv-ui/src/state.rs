//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`
//! and send widget input through [`AppState::dispatch`].

use dioxus::prelude::*;
use fdv_dashboard::{DashboardController, DashboardEvent, RenderTree};

/// Shared state for the dashboard page.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Dashboard state machine (None until the data is loaded)
    pub controller: Signal<Option<DashboardController>>,
    /// Latest view produced by the controller
    pub tree: Signal<Option<RenderTree>>,
    /// Whether the app is still loading
    pub loading: Signal<bool>,
    /// Startup failure; the dashboard is not shown when set
    pub error_msg: Signal<Option<String>>,
    /// Rejected form input, shown next to the filter buttons
    pub form_error: Signal<Option<String>>,
    /// Start date being edited in the picker ("YYYY-MM-DD"), sent on submit
    pub start_date: Signal<String>,
    /// End date being edited in the picker ("YYYY-MM-DD"), sent on submit
    pub end_date: Signal<String>,
    /// Zero-based table page
    pub page: Signal<usize>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            controller: Signal::new(None),
            tree: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            form_error: Signal::new(None),
            start_date: Signal::new(String::new()),
            end_date: Signal::new(String::new()),
            page: Signal::new(0),
        }
    }

    /// Install a freshly built controller and show its initial view.
    pub fn start(&mut self, controller: DashboardController) {
        self.tree.set(Some(controller.render()));
        self.controller.set(Some(controller));
        self.loading.set(false);
    }

    /// Feed a widget event to the controller and publish the new view.
    pub fn dispatch(&mut self, event: DashboardEvent) {
        let resets_form = matches!(event, DashboardEvent::Reset | DashboardEvent::ResetAll);
        let changes_rows = matches!(
            event,
            DashboardEvent::Submit(_) | DashboardEvent::Reset | DashboardEvent::ResetAll
        );

        let result = {
            let mut controller = self.controller.write();
            match controller.as_mut() {
                Some(controller) => controller.handle(event),
                None => {
                    log::warn!("Dropping {:?}: dashboard not loaded", event);
                    return;
                }
            }
        };

        match result {
            Ok(tree) => {
                if resets_form {
                    self.start_date.set(String::new());
                    self.end_date.set(String::new());
                }
                if changes_rows {
                    self.page.set(0);
                }
                self.form_error.set(None);
                self.tree.set(Some(tree));
            }
            Err(e) => {
                log::error!("Rejected dashboard input: {}", e);
                self.form_error.set(Some(e.to_string()));
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
