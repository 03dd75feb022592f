//! Shared utility functions for flood data visualiser crates.

/// Date utility functions
pub mod dates {
    use chrono::NaiveDate;

    /// Date format stored in the flood inventory and shown in the table: "DD/MM/YYYY"
    pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

    /// Date format emitted by the date picker widgets: "YYYY-MM-DD"
    pub const PICKER_FORMAT: &str = "%Y-%m-%d";

    /// Format a NaiveDate as "DD/MM/YYYY"
    pub fn format_display_date(date: &NaiveDate) -> String {
        date.format(DISPLAY_FORMAT).to_string()
    }

    /// Parse a date string in "DD/MM/YYYY" format (inventory format)
    pub fn parse_display_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), DISPLAY_FORMAT)?)
    }

    /// Parse a date string in "YYYY-MM-DD" format (date picker format)
    pub fn parse_picker_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), PICKER_FORMAT)?)
    }

    /// Parse an optional picker value. Blank values count as unset.
    pub fn parse_optional_picker_date(s: Option<&str>) -> anyhow::Result<Option<NaiveDate>> {
        match s.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => parse_picker_date(value).map(Some),
        }
    }

}
