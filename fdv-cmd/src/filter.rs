//! `filter` subcommand: inventory rows matching a date range and region.

use crate::output_writer;
use fdv_core::criteria::FilterCriteria;
use fdv_core::event::{EventRecord, DISPLAY_COLUMNS};
use log::info;
use std::io::Write;

/// Write `events` as CSV with the table's display columns and dates.
pub fn write_events<W: Write>(events: &[&EventRecord], writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(DISPLAY_COLUMNS)?;
    for event in events {
        wtr.write_record([
            event.start_date_display(),
            event.end_date_display(),
            event.duration_days.map(|d| d.to_string()).unwrap_or_default(),
            event.main_cause.clone().unwrap_or_default(),
            event.affected_state.clone().unwrap_or_default(),
            event.affected_district.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Filter an inventory held in memory and write the matches to `writer`.
///
/// Returns the number of rows written.
pub fn filter_inventory<W: Write>(
    inventory_csv: &str,
    criteria: &FilterCriteria,
    writer: W,
) -> anyhow::Result<usize> {
    let events = EventRecord::parse_inventory_csv(inventory_csv)?;
    let kept = fdv_data::filter(&events, criteria);
    write_events(&kept, writer)?;
    info!("Kept {} of {} events", kept.len(), events.len());
    Ok(kept.len())
}

pub fn run_filter(
    events_path: &str,
    start_date: Option<&str>,
    end_date: Option<&str>,
    state: Option<&str>,
    district: Option<&str>,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let criteria = FilterCriteria::from_form_values(start_date, end_date, state, district)?;
    let inventory_csv = std::fs::read_to_string(events_path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", events_path, e))?;
    filter_inventory(&inventory_csv, &criteria, output_writer(output)?)?;
    Ok(())
}
