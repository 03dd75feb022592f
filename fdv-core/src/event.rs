use crate::error::{FloodError, Result};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use fdv_utils::dates::{format_display_date, parse_display_date};
use serde::{Deserialize, Serialize};

/// Inventory column holding the first day of the event.
pub const START_COLUMN: &str = "Start";
/// Inventory column holding the last day of the event.
pub const END_COLUMN: &str = "End";
/// Inventory column holding the event duration in days.
pub const DURATION_COLUMN: &str = "Duration(Days)";
/// Inventory column holding the main cause of the flood.
pub const CAUSE_COLUMN: &str = "Main Cause";
/// Inventory column holding the affected state(s).
pub const STATE_COLUMN: &str = "State";
/// Inventory column holding the affected district(s).
pub const DISTRICT_COLUMN: &str = "Districts";

/// Table headers for an event row, in display order.
pub const DISPLAY_COLUMNS: [&str; 6] = [
    "Start Date",
    "End Date",
    "Duration (in days)",
    "Main Cause",
    "Affected State",
    "Affected District",
];

/// Separator between place names in a multi-region cell.
pub const REGION_SEPARATOR: &str = ", ";

/// A single flood event from the India flood inventory.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: Option<u32>,
    pub main_cause: Option<String>,
    /// Free text, possibly several states separated by ", "
    pub affected_state: Option<String>,
    /// Free text, possibly several districts separated by ", "
    pub affected_district: Option<String>,
}

/// Header positions of the columns we read; the inventory carries many more.
struct InventoryColumns {
    start: usize,
    end: usize,
    duration: usize,
    cause: usize,
    state: usize,
    district: usize,
}

impl InventoryColumns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| FloodError::MissingColumn(name.to_string()))
        };
        Ok(InventoryColumns {
            start: find(START_COLUMN)?,
            end: find(END_COLUMN)?,
            duration: find(DURATION_COLUMN)?,
            cause: find(CAUSE_COLUMN)?,
            state: find(STATE_COLUMN)?,
            district: find(DISTRICT_COLUMN)?,
        })
    }
}

fn split_regions(field: Option<&str>) -> Vec<&str> {
    match field {
        Some(text) => text
            .split(REGION_SEPARATOR)
            .filter(|token| !token.trim().is_empty())
            .collect(),
        None => Vec::new(),
    }
}

fn parse_text(cell: Option<&str>) -> Option<String> {
    cell.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn parse_date_cell(cell: Option<&str>, column: &str, line: usize) -> Result<NaiveDate> {
    let raw = cell.unwrap_or("");
    parse_display_date(raw)
        .map_err(|e| FloodError::DateParse(format!("line {}, {} '{}': {}", line, column, raw, e)))
}

fn parse_duration(cell: Option<&str>, line: usize) -> Result<Option<u32>> {
    let raw = cell.unwrap_or("").trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(days) = raw.parse::<u32>() {
        return Ok(Some(days));
    }
    // Exports with missing durations store the column as floats ("3.0").
    match raw.parse::<f64>() {
        Ok(days) if days >= 0.0 && days.fract() == 0.0 && days <= f64::from(u32::MAX) => {
            Ok(Some(days as u32))
        }
        _ => Err(FloodError::InvalidNumber(format!(
            "line {}, {} '{}'",
            line, DURATION_COLUMN, raw
        ))),
    }
}

impl EventRecord {
    /// State names listed in `affected_state`; empty when the cell is blank.
    pub fn affected_states(&self) -> Vec<&str> {
        split_regions(self.affected_state.as_deref())
    }

    /// District names listed in `affected_district`; empty when the cell is blank.
    pub fn affected_districts(&self) -> Vec<&str> {
        split_regions(self.affected_district.as_deref())
    }

    pub fn start_date_display(&self) -> String {
        format_display_date(&self.start_date)
    }

    pub fn end_date_display(&self) -> String {
        format_display_date(&self.end_date)
    }

    /// Parse the flood inventory CSV into event records, preserving file order.
    ///
    /// Columns are located by header name: `Start`, `End`, `Duration(Days)`,
    /// `Main Cause`, `State`, `Districts`. Any other columns are ignored.
    /// Dates are `DD/MM/YYYY`. A bad date or duration aborts the whole load.
    pub fn parse_inventory_csv(csv_object: &str) -> Result<Vec<EventRecord>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_object.as_bytes());
        let columns = InventoryColumns::from_headers(rdr.headers()?)?;

        let mut events: Vec<EventRecord> = Vec::new();
        for (index, row) in rdr.records().enumerate() {
            let record = row?;
            // header is line 1
            let line = index + 2;
            let event = EventRecord {
                start_date: parse_date_cell(record.get(columns.start), START_COLUMN, line)?,
                end_date: parse_date_cell(record.get(columns.end), END_COLUMN, line)?,
                duration_days: parse_duration(record.get(columns.duration), line)?,
                main_cause: parse_text(record.get(columns.cause)),
                affected_state: parse_text(record.get(columns.state)),
                affected_district: parse_text(record.get(columns.district)),
            };
            events.push(event);
        }
        log::info!("Loaded {} flood events", events.len());
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::EventRecord;
    use crate::error::FloodError;
    use chrono::NaiveDate;

    const INVENTORY: &str = "\
UEI,Start,End,Duration(Days),Main Cause,Location,State,Districts
UEI-IMD-FL-2019-0001,05/08/2019,20/08/2019,16,Heavy rains,Patna,\"Bihar, Jharkhand\",\"Patna, Ranchi\"
UEI-IMD-FL-2018-0002,08/08/2018,30/08/2018,23.0,Monsoon,,Kerala,
UEI-IMD-FL-1967-0003,8/7/1967,9/7/1967,,,,,
";

    #[test]
    fn test_parse_inventory_csv() {
        let events = EventRecord::parse_inventory_csv(INVENTORY).unwrap();
        assert_eq!(events.len(), 3);

        let first = &events[0];
        assert_eq!(first.start_date, NaiveDate::from_ymd_opt(2019, 8, 5).unwrap());
        assert_eq!(first.end_date, NaiveDate::from_ymd_opt(2019, 8, 20).unwrap());
        assert_eq!(first.duration_days, Some(16));
        assert_eq!(first.main_cause.as_deref(), Some("Heavy rains"));
        assert_eq!(first.affected_states(), vec!["Bihar", "Jharkhand"]);
        assert_eq!(first.affected_districts(), vec!["Patna", "Ranchi"]);
        assert_eq!(first.start_date_display(), "05/08/2019");

        assert_eq!(events[1].duration_days, Some(23));
        assert_eq!(events[1].affected_states(), vec!["Kerala"]);
        assert!(events[1].affected_districts().is_empty());

        let sparse = &events[2];
        assert_eq!(sparse.start_date_display(), "08/07/1967");
        assert_eq!(sparse.duration_days, None);
        assert_eq!(sparse.main_cause, None);
        assert_eq!(sparse.affected_state, None);
        assert!(sparse.affected_states().is_empty());
    }

    #[test]
    fn test_parse_missing_column() {
        let csv_data = "Start,End,Duration(Days),Main Cause,State\n01/01/2020,02/01/2020,1,Rain,Assam\n";
        match EventRecord::parse_inventory_csv(csv_data) {
            Err(FloodError::MissingColumn(column)) => assert_eq!(column, "Districts"),
            other => panic!("expected missing column error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_bad_date() {
        let csv_data = "Start,End,Duration(Days),Main Cause,State,Districts\n2020-01-01,02/01/2020,1,Rain,Assam,Kamrup\n";
        let err = EventRecord::parse_inventory_csv(csv_data).unwrap_err();
        assert!(matches!(err, FloodError::DateParse(_)));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_parse_bad_duration() {
        let csv_data = "Start,End,Duration(Days),Main Cause,State,Districts\n01/01/2020,02/01/2020,-4,Rain,Assam,Kamrup\n";
        let err = EventRecord::parse_inventory_csv(csv_data).unwrap_err();
        assert!(matches!(err, FloodError::InvalidNumber(_)));
    }

    #[test]
    fn test_parse_empty_csv() {
        let csv_data = "Start,End,Duration(Days),Main Cause,State,Districts\n";
        let events = EventRecord::parse_inventory_csv(csv_data).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_split_ignores_blank_tokens() {
        let csv_data = "Start,End,Duration(Days),Main Cause,State,Districts\n01/01/2020,02/01/2020,1,Rain,\"Assam, , Meghalaya\",Kamrup\n";
        let events = EventRecord::parse_inventory_csv(csv_data).unwrap();
        assert_eq!(events[0].affected_states(), vec!["Assam", "Meghalaya"]);
    }
}
