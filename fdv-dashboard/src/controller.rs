//! Dashboard state machine.
//!
//! Two phases: `Idle` shows the full inventory, `Filtered` shows the result
//! of the last submitted form. Map granularity is independent of the phase.
//! The selected row always refers to a displayed row: a filter that hides it
//! clears the selection, a reset keeps it. Every event is handled to
//! completion and answered with a fresh [`RenderTree`].

use crate::context::DashboardContext;
use crate::render::{FormFields, MapLayer, Phase, RenderTree, TableRow, TableView};
use fdv_core::criteria::{FilterCriteria, Granularity, HighlightSelection};
use fdv_core::Result;
use fdv_data::filter_indices;
use std::rc::Rc;

/// Input from the UI widgets.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// Submit button, with the form as currently entered
    Submit(FormFields),
    /// "Reset Filters"
    Reset,
    /// "Delete All Filters"
    ResetAll,
    StateChanged(Option<String>),
    DistrictChanged(Option<String>),
    /// Selected positions in the displayed table; only the first is used
    RowSelected(Vec<usize>),
    GranularityChanged(Granularity),
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

pub struct DashboardController {
    context: Rc<DashboardContext>,
    phase: Phase,
    form: FormFields,
    /// Inventory positions of the displayed rows, ascending
    displayed: Vec<usize>,
    district_options: Vec<String>,
    /// `row` is an inventory position, not a displayed one
    selection: HighlightSelection,
}

impl DashboardController {
    pub fn new(context: Rc<DashboardContext>) -> Self {
        let displayed = (0..context.events().len()).collect();
        DashboardController {
            context,
            phase: Phase::Idle,
            form: FormFields::default(),
            displayed,
            district_options: Vec::new(),
            selection: HighlightSelection::default(),
        }
    }

    pub fn context(&self) -> &Rc<DashboardContext> {
        &self.context
    }

    pub fn form(&self) -> &FormFields {
        &self.form
    }

    pub fn selection(&self) -> HighlightSelection {
        self.selection
    }

    /// Inventory positions of the rows currently in the table.
    pub fn displayed(&self) -> &[usize] {
        &self.displayed
    }

    /// Apply `event` and return the resulting view.
    ///
    /// Only `Submit` can fail (a malformed date); the controller is left
    /// unchanged in that case.
    pub fn handle(&mut self, event: DashboardEvent) -> Result<RenderTree> {
        match event {
            DashboardEvent::Submit(form) => self.submit(form)?,
            DashboardEvent::Reset => self.reset(),
            DashboardEvent::ResetAll => self.reset_all(),
            DashboardEvent::StateChanged(state) => self.state_changed(state),
            DashboardEvent::DistrictChanged(district) => self.district_changed(district),
            DashboardEvent::RowSelected(rows) => self.row_selected(&rows),
            DashboardEvent::GranularityChanged(granularity) => {
                self.granularity_changed(granularity)
            }
        }
        Ok(self.render())
    }

    /// Filter the inventory by `form` and show the result.
    pub fn submit(&mut self, form: FormFields) -> Result<()> {
        let criteria = FilterCriteria::from_form_values(
            form.start_date.as_deref(),
            form.end_date.as_deref(),
            form.state.as_deref(),
            form.district.as_deref(),
        )?;
        self.displayed = filter_indices(self.context.events(), &criteria);
        if let Some(row) = self.selection.row {
            if self.displayed.binary_search(&row).is_err() {
                log::info!("Selected row {} filtered out, clearing highlight", row);
                self.selection.row = None;
            }
        }
        self.district_options = self.districts_for(form.state.as_deref());
        self.form = form;
        self.phase = Phase::Filtered;
        log::info!("Submitted filter, {} rows displayed", self.displayed.len());
        Ok(())
    }

    /// Clear the form and show the full inventory. The highlighted row and
    /// granularity are kept.
    pub fn reset(&mut self) {
        self.form = FormFields::default();
        self.district_options.clear();
        self.displayed = (0..self.context.events().len()).collect();
        self.phase = Phase::Idle;
        log::info!("Filters reset");
    }

    /// Same as [`reset`](Self::reset); bound to the "Delete All Filters" button.
    pub fn reset_all(&mut self) {
        self.reset();
    }

    /// Select a state in the form and refresh the district dropdown.
    ///
    /// A previously chosen district that does not belong to the new state is
    /// dropped. An unknown or cleared state leaves no district options.
    pub fn state_changed(&mut self, state: Option<String>) {
        let state = non_blank(state);
        self.district_options = self.districts_for(state.as_deref());
        if let Some(district) = &self.form.district {
            if !self.district_options.contains(district) {
                self.form.district = None;
            }
        }
        self.form.state = state;
    }

    /// Select a district in the form; values outside the current options are
    /// rejected.
    pub fn district_changed(&mut self, district: Option<String>) {
        self.form.district = match non_blank(district) {
            Some(district) if self.district_options.contains(&district) => Some(district),
            Some(district) => {
                log::warn!(
                    "Ignoring district '{}' not listed for state {:?}",
                    district,
                    self.form.state
                );
                None
            }
            None => None,
        };
    }

    /// Select the first of `rows` (displayed positions). Empty or out-of-range
    /// input clears the selection.
    pub fn row_selected(&mut self, rows: &[usize]) {
        self.selection.row = match rows.first() {
            None => None,
            Some(&position) => match self.displayed.get(position) {
                Some(&event_index) => Some(event_index),
                None => {
                    log::warn!(
                        "Row {} is outside the {} displayed rows",
                        position,
                        self.displayed.len()
                    );
                    None
                }
            },
        };
    }

    pub fn granularity_changed(&mut self, granularity: Granularity) {
        self.selection.granularity = granularity;
    }

    fn districts_for(&self, state: Option<&str>) -> Vec<String> {
        let Some(state) = state else {
            return Vec::new();
        };
        match self.context.hierarchy().districts_of(state) {
            Some(districts) => districts.to_vec(),
            None => {
                log::warn!("No districts listed for state '{}'", state);
                Vec::new()
            }
        }
    }

    /// Build the view for the current state.
    pub fn render(&self) -> RenderTree {
        let events = self.context.events();
        let rows = self
            .displayed
            .iter()
            .filter_map(|&index| events.get(index).map(|event| TableRow::new(index, event)))
            .collect();

        let selected_event = self.selection.row.and_then(|index| events.get(index));
        let projection = self
            .context
            .projector()
            .project(selected_event, self.selection.granularity);

        RenderTree {
            phase: self.phase,
            table: TableView::new(rows, self.selection.row),
            form: self.form.clone(),
            state_options: self
                .context
                .hierarchy()
                .states()
                .map(String::from)
                .collect(),
            district_options: self.district_options.clone(),
            granularity: self.selection.granularity,
            map: MapLayer::from_projection(&projection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support;
    use fdv_core::FloodError;

    fn controller() -> DashboardController {
        DashboardController::new(Rc::new(test_support::context()))
    }

    fn event_indices(tree: &RenderTree) -> Vec<usize> {
        tree.table.rows.iter().map(|r| r.event_index).collect()
    }

    fn form(start: Option<&str>, end: Option<&str>, state: Option<&str>, district: Option<&str>) -> FormFields {
        FormFields {
            start_date: start.map(String::from),
            end_date: end.map(String::from),
            state: state.map(String::from),
            district: district.map(String::from),
        }
    }

    #[test]
    fn test_initial_render() {
        let tree = controller().render();
        assert_eq!(tree.phase, Phase::Idle);
        assert_eq!(event_indices(&tree), vec![0, 1, 2, 3, 4]);
        assert!(tree.table.selected_rows.is_empty());
        assert!(tree.form.is_empty());
        assert_eq!(tree.state_options.len(), 36);
        assert_eq!(tree.state_options[0], "Andaman and Nicobar Islands");
        assert!(tree.district_options.is_empty());
        assert_eq!(tree.granularity, Granularity::State);
        assert!(!tree.map.highlighted);
        assert_eq!(tree.map.locations.len(), 6);
        assert_eq!(tree.map.z, vec![0.0; 6]);
        assert_eq!(tree.map.zoom, 3.3);
        assert_eq!(tree.map.center.lat, 22.5937);
        assert_eq!(tree.map.center.lon, 78.9629);
    }

    #[test]
    fn test_submit_filters_and_keeps_form() {
        let mut controller = controller();
        let entered = form(None, None, Some("Bihar"), None);
        let tree = controller.handle(DashboardEvent::Submit(entered.clone())).unwrap();
        assert_eq!(tree.phase, Phase::Filtered);
        assert_eq!(event_indices(&tree), vec![1, 2]);
        assert_eq!(tree.form, entered);
        assert_eq!(tree.district_options.len(), 38);
        assert_eq!(tree.district_options[0], "Araria");
    }

    #[test]
    fn test_submit_date_range() {
        let mut controller = controller();
        let tree = controller
            .handle(DashboardEvent::Submit(form(
                Some("2019-01-01"),
                Some("2019-07-31"),
                None,
                None,
            )))
            .unwrap();
        assert_eq!(event_indices(&tree), vec![1]);
        assert_eq!(tree.table.rows[0].cells[0], "10/07/2019");
    }

    #[test]
    fn test_resubmit_stays_filtered() {
        let mut controller = controller();
        controller.submit(form(None, None, Some("Bihar"), None)).unwrap();
        let tree = controller
            .handle(DashboardEvent::Submit(form(None, None, Some("Kerala"), None)))
            .unwrap();
        assert_eq!(tree.phase, Phase::Filtered);
        assert_eq!(event_indices(&tree), vec![0]);
    }

    #[test]
    fn test_submit_with_no_matches() {
        let mut controller = controller();
        let tree = controller
            .handle(DashboardEvent::Submit(form(None, None, Some("Goa"), None)))
            .unwrap();
        assert_eq!(tree.phase, Phase::Filtered);
        assert!(tree.table.rows.is_empty());
    }

    #[test]
    fn test_bad_date_leaves_state_unchanged() {
        let mut controller = controller();
        controller.submit(form(None, None, Some("Bihar"), None)).unwrap();
        let err = controller
            .handle(DashboardEvent::Submit(form(Some("31/12/2019"), None, None, None)))
            .unwrap_err();
        assert!(matches!(err, FloodError::DateParse(_)));
        assert_eq!(controller.displayed(), &[1, 2]);
        assert_eq!(controller.form().state.as_deref(), Some("Bihar"));
    }

    #[test]
    fn test_reset_after_submit() {
        for reset in [DashboardEvent::Reset, DashboardEvent::ResetAll] {
            let mut controller = controller();
            controller
                .submit(form(Some("2019-01-01"), None, Some("Bihar"), Some("Patna")))
                .unwrap();
            let tree = controller.handle(reset).unwrap();
            assert_eq!(tree.phase, Phase::Idle);
            assert_eq!(event_indices(&tree), vec![0, 1, 2, 3, 4]);
            assert_eq!(tree.form, FormFields::default());
            assert!(tree.district_options.is_empty());
        }
    }

    #[test]
    fn test_reset_keeps_highlight() {
        let mut controller = controller();
        controller.row_selected(&[2]);
        controller.granularity_changed(Granularity::District);
        let tree = controller.handle(DashboardEvent::Reset).unwrap();
        assert!(tree.map.highlighted);
        assert_eq!(tree.granularity, Granularity::District);
        assert_eq!(tree.table.selected_rows, vec![2]);
    }

    #[test]
    fn test_state_cascade() {
        let mut controller = controller();
        let tree = controller
            .handle(DashboardEvent::StateChanged(Some("Kerala".to_string())))
            .unwrap();
        assert_eq!(tree.form.state.as_deref(), Some("Kerala"));
        assert_eq!(tree.district_options.len(), 14);
        assert_eq!(tree.district_options[0], "Alappuzha");
        assert_eq!(tree.district_options[13], "Wayanad");

        let tree = controller
            .handle(DashboardEvent::DistrictChanged(Some("Ernakulam".to_string())))
            .unwrap();
        assert_eq!(tree.form.district.as_deref(), Some("Ernakulam"));

        let tree = controller
            .handle(DashboardEvent::StateChanged(Some("Bihar".to_string())))
            .unwrap();
        assert_eq!(tree.form.district, None);
        assert!(tree.district_options.contains(&"Patna".to_string()));

        let tree = controller.handle(DashboardEvent::StateChanged(None)).unwrap();
        assert_eq!(tree.form.state, None);
        assert!(tree.district_options.is_empty());
    }

    #[test]
    fn test_unknown_state_has_no_districts() {
        let mut controller = controller();
        controller.state_changed(Some("Atlantis".to_string()));
        assert!(controller.render().district_options.is_empty());
        controller.district_changed(Some("Patna".to_string()));
        assert_eq!(controller.form().district, None);
    }

    #[test]
    fn test_state_change_keeps_valid_district() {
        let mut controller = controller();
        controller.state_changed(Some("Bihar".to_string()));
        controller.district_changed(Some("Patna".to_string()));
        controller.state_changed(Some("Bihar".to_string()));
        assert_eq!(controller.form().district.as_deref(), Some("Patna"));
    }

    #[test]
    fn test_row_selection_highlights_regions() {
        let mut controller = controller();
        let tree = controller.handle(DashboardEvent::RowSelected(vec![1])).unwrap();
        assert!(tree.map.highlighted);
        assert_eq!(tree.map.locations, vec!["Bihar", "Jharkhand"]);
        assert_eq!(tree.map.z, vec![1.0, 1.0]);
        assert_eq!(tree.table.selected_rows, vec![1]);

        let tree = controller
            .handle(DashboardEvent::GranularityChanged(Granularity::District))
            .unwrap();
        assert_eq!(tree.map.locations, vec!["Patna", "Ranchi"]);

        let tree = controller
            .handle(DashboardEvent::GranularityChanged(Granularity::State))
            .unwrap();
        assert_eq!(tree.map.locations, vec!["Bihar", "Jharkhand"]);
    }

    #[test]
    fn test_row_index_refers_to_displayed_table() {
        let mut controller = controller();
        controller.submit(form(None, None, Some("Bihar"), None)).unwrap();
        controller.row_selected(&[1, 0]);
        assert_eq!(controller.selection().row, Some(2));
        controller.granularity_changed(Granularity::District);
        let tree = controller.render();
        assert_eq!(tree.map.locations, vec!["Patna"]);
        assert_eq!(tree.table.selected_rows, vec![1]);
    }

    #[test]
    fn test_misspelled_row_resolves() {
        let mut controller = controller();
        controller.row_selected(&[3]);
        assert_eq!(controller.render().map.locations, vec!["Odisha"]);
        controller.granularity_changed(Granularity::District);
        assert_eq!(controller.render().map.locations, vec!["Cuttack"]);
    }

    #[test]
    fn test_empty_district_cell_highlights_nothing() {
        let mut controller = controller();
        controller.row_selected(&[4]);
        controller.granularity_changed(Granularity::District);
        let tree = controller.render();
        assert!(tree.map.highlighted);
        assert!(tree.map.locations.is_empty());
    }

    #[test]
    fn test_clearing_selection() {
        let mut controller = controller();
        controller.row_selected(&[1]);
        let tree = controller.handle(DashboardEvent::RowSelected(Vec::new())).unwrap();
        assert!(!tree.map.highlighted);
        assert_eq!(tree.map.locations.len(), 6);

        controller.row_selected(&[1]);
        let tree = controller.handle(DashboardEvent::RowSelected(vec![99])).unwrap();
        assert!(!tree.map.highlighted);
        assert_eq!(controller.selection().row, None);
    }

    #[test]
    fn test_filter_hiding_selected_row_clears_highlight() {
        let mut controller = controller();
        controller.row_selected(&[0]);
        let tree = controller
            .handle(DashboardEvent::Submit(form(None, None, Some("Bihar"), None)))
            .unwrap();
        assert_eq!(tree.table.rows.len(), 2);
        assert!(tree.table.selected_rows.is_empty());
        assert!(!tree.map.highlighted);
        assert_eq!(tree.map.locations.len(), 6);
        assert_eq!(controller.selection().row, None);

        // Reset shows every row again, but the cleared selection stays cleared
        let tree = controller.handle(DashboardEvent::Reset).unwrap();
        assert!(!tree.map.highlighted);
    }

    #[test]
    fn test_filter_keeping_selected_row_keeps_highlight() {
        let mut controller = controller();
        controller.row_selected(&[2]);
        let tree = controller
            .handle(DashboardEvent::Submit(form(None, None, Some("Bihar"), None)))
            .unwrap();
        assert_eq!(tree.table.selected_rows, vec![1]);
        assert!(tree.map.highlighted);
        assert_eq!(tree.map.locations, vec!["Bihar"]);
    }
}
