//! Conjunctive date-range and region filtering over the event inventory.

use fdv_core::criteria::FilterCriteria;
use fdv_core::event::EventRecord;

fn contains(field: Option<&str>, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(needle) => field.map(|text| text.contains(needle)).unwrap_or(false),
    }
}

/// True when `event` satisfies every set field of `criteria`.
///
/// Dates are compared as calendar dates (start on or after the lower bound,
/// end on or before the upper bound). Region fields are case-sensitive
/// substring matches against the raw affected-region text.
pub fn matches(event: &EventRecord, criteria: &FilterCriteria) -> bool {
    if let Some(start) = criteria.start_date {
        if event.start_date < start {
            return false;
        }
    }
    if let Some(end) = criteria.end_date {
        if event.end_date > end {
            return false;
        }
    }
    contains(event.affected_state.as_deref(), criteria.state.as_deref())
        && contains(event.affected_district.as_deref(), criteria.district.as_deref())
}

/// Events satisfying `criteria`, in their original order.
pub fn filter<'a>(events: &'a [EventRecord], criteria: &FilterCriteria) -> Vec<&'a EventRecord> {
    events.iter().filter(|e| matches(e, criteria)).collect()
}

/// Positions in `events` of the rows satisfying `criteria`, ascending.
pub fn filter_indices(events: &[EventRecord], criteria: &FilterCriteria) -> Vec<usize> {
    if criteria.is_unconstrained() {
        log::info!("No filter set, keeping all {} events", events.len());
        return (0..events.len()).collect();
    }
    let indices: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(_, e)| matches(e, criteria))
        .map(|(i, _)| i)
        .collect();
    log::info!("Filter kept {} of {} events", indices.len(), events.len());
    indices
}
