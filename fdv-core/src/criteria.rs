use crate::error::{FloodError, Result};
use crate::geometry::RegionKind;
use chrono::NaiveDate;
use fdv_utils::dates::parse_optional_picker_date;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User-specified table filter. Unset fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Keep events starting on or after this date
    pub start_date: Option<NaiveDate>,
    /// Keep events ending on or before this date
    pub end_date: Option<NaiveDate>,
    /// Substring required in the affected state text
    pub state: Option<String>,
    /// Substring required in the affected district text
    pub district: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

impl FilterCriteria {
    /// Build criteria from raw form values.
    ///
    /// Dates arrive from the picker as `YYYY-MM-DD`; blank values count as unset.
    pub fn from_form_values(
        start_date: Option<&str>,
        end_date: Option<&str>,
        state: Option<&str>,
        district: Option<&str>,
    ) -> Result<FilterCriteria> {
        let parse = |label: &str, value: Option<&str>| {
            parse_optional_picker_date(value).map_err(|e| {
                FloodError::DateParse(format!("{} '{}': {}", label, value.unwrap_or(""), e))
            })
        };
        Ok(FilterCriteria {
            start_date: parse("start date", start_date)?,
            end_date: parse("end date", end_date)?,
            state: non_blank(state),
            district: non_blank(district),
        })
    }

    /// True when no field is set.
    pub fn is_unconstrained(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.state.is_none()
            && self.district.is_none()
    }
}

/// Level at which affected regions are highlighted on the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    State,
    District,
}

impl Granularity {
    pub fn region_kind(self) -> RegionKind {
        match self {
            Granularity::State => RegionKind::State,
            Granularity::District => RegionKind::District,
        }
    }

    pub fn toggled(self) -> Granularity {
        match self {
            Granularity::State => Granularity::District,
            Granularity::District => Granularity::State,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.region_kind().as_str())
    }
}

impl FromStr for Granularity {
    type Err = FloodError;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<RegionKind>().map(|kind| match kind {
            RegionKind::State => Granularity::State,
            RegionKind::District => Granularity::District,
        })
    }
}

/// Which row of the displayed table is selected, and at what level it is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightSelection {
    /// Inventory position of the selected row; always one of the displayed rows
    pub row: Option<usize>,
    pub granularity: Granularity,
}
