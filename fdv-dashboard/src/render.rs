//! Serializable view model produced after every dashboard event.
//!
//! The UI draws exactly what is in a [`RenderTree`]; it holds no dashboard
//! logic of its own.

use fdv_core::criteria::Granularity;
use fdv_core::event::{EventRecord, DISPLAY_COLUMNS};
use fdv_data::Projection;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rows shown per table page.
pub const PAGE_SIZE: usize = 50;

/// Latest date the start picker allows (`YYYY-MM-DD`).
pub const START_DATE_MAX: &str = "2023-09-10";
/// Earliest date the end picker allows (`YYYY-MM-DD`).
pub const END_DATE_MIN: &str = "1967-07-08";

pub const MAP_CENTER: MapCenter = MapCenter {
    lat: 22.5937,
    lon: 78.9629,
};
pub const MAP_ZOOM: f64 = 3.3;
pub const MAP_OPACITY: f64 = 0.6;
pub const MAP_STYLE: &str = "carto-positron";
/// Fill for plain regions, then for highlighted ones.
pub const MAP_COLOR_SCALE: [&str; 2] = ["lightgrey", "red"];

/// Whether the table currently shows a filtered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Filtered,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub id: String,
    pub name: String,
}

impl ColumnSpec {
    fn display_columns() -> Vec<ColumnSpec> {
        DISPLAY_COLUMNS
            .iter()
            .map(|name| ColumnSpec {
                id: name
                    .chars()
                    .filter(|c| c.is_alphanumeric() || *c == ' ')
                    .collect::<String>()
                    .to_lowercase()
                    .replace(' ', "_"),
                name: name.to_string(),
            })
            .collect()
    }
}

/// One displayed event, cells in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    /// Position of the event in the full inventory
    pub event_index: usize,
    pub cells: Vec<String>,
}

impl TableRow {
    pub fn new(event_index: usize, event: &EventRecord) -> TableRow {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        TableRow {
            event_index,
            cells: vec![
                event.start_date_display(),
                event.end_date_display(),
                event
                    .duration_days
                    .map(|days| days.to_string())
                    .unwrap_or_default(),
                text(&event.main_cause),
                text(&event.affected_state),
                text(&event.affected_district),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<TableRow>,
    /// Displayed position of the selected event, if it is still displayed
    pub selected_rows: Vec<usize>,
    pub page_size: usize,
}

impl TableView {
    pub fn new(rows: Vec<TableRow>, selected_event: Option<usize>) -> TableView {
        let selected_rows = selected_event
            .and_then(|index| rows.iter().position(|row| row.event_index == index))
            .into_iter()
            .collect();
        TableView {
            columns: ColumnSpec::display_columns(),
            rows,
            selected_rows,
            page_size: PAGE_SIZE,
        }
    }

    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.page_size).max(1)
    }

    /// Rows on the zero-based `page`; empty past the last page.
    pub fn page(&self, page: usize) -> &[TableRow] {
        let start = (page * self.page_size).min(self.rows.len());
        let end = (start + self.page_size).min(self.rows.len());
        &self.rows[start..end]
    }
}

/// Filter form values as shown in the widgets. Dates use `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
}

impl FormFields {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.state.is_none()
            && self.district.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapCenter {
    pub lat: f64,
    pub lon: f64,
}

/// Choropleth layer for the map widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayer {
    /// FeatureCollection with one feature per region, `id` = region name
    pub geojson: Value,
    /// Feature ids to draw
    pub locations: Vec<String>,
    /// Color value per location: 1 when highlighted, 0 otherwise
    pub z: Vec<f64>,
    pub highlighted: bool,
    pub color_scale: [&'static str; 2],
    pub center: MapCenter,
    pub zoom: f64,
    pub opacity: f64,
    pub style: &'static str,
}

impl MapLayer {
    pub fn from_projection(projection: &Projection<'_>) -> MapLayer {
        let locations: Vec<String> = projection.names().into_iter().map(String::from).collect();
        let fill = if projection.highlighted { 1.0 } else { 0.0 };
        MapLayer {
            geojson: projection.to_feature_collection(),
            z: vec![fill; locations.len()],
            locations,
            highlighted: projection.highlighted,
            color_scale: MAP_COLOR_SCALE,
            center: MAP_CENTER,
            zoom: MAP_ZOOM,
            opacity: MAP_OPACITY,
            style: MAP_STYLE,
        }
    }
}

/// Everything the UI needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderTree {
    pub phase: Phase,
    pub table: TableView,
    pub form: FormFields,
    pub state_options: Vec<String>,
    pub district_options: Vec<String>,
    pub granularity: Granularity,
    pub map: MapLayer,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(day: u32) -> EventRecord {
        EventRecord {
            start_date: NaiveDate::from_ymd_opt(2019, 7, day).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2019, 7, day + 1).unwrap(),
            duration_days: None,
            main_cause: Some("Heavy rains".to_string()),
            affected_state: Some("Bihar".to_string()),
            affected_district: None,
        }
    }

    #[test]
    fn test_columns() {
        let columns = ColumnSpec::display_columns();
        let ids: Vec<&str> = columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "start_date",
                "end_date",
                "duration_in_days",
                "main_cause",
                "affected_state",
                "affected_district"
            ]
        );
        assert_eq!(columns[2].name, "Duration (in days)");
    }

    #[test]
    fn test_table_row_cells() {
        let row = TableRow::new(7, &event(5));
        assert_eq!(row.event_index, 7);
        assert_eq!(
            row.cells,
            vec!["05/07/2019", "06/07/2019", "", "Heavy rains", "Bihar", ""]
        );
    }

    #[test]
    fn test_selected_row_follows_event_index() {
        let rows = vec![TableRow::new(3, &event(1)), TableRow::new(9, &event(2))];
        assert_eq!(TableView::new(rows.clone(), Some(9)).selected_rows, vec![1]);
        assert!(TableView::new(rows.clone(), Some(4)).selected_rows.is_empty());
        assert!(TableView::new(rows, None).selected_rows.is_empty());
    }

    #[test]
    fn test_paging() {
        let rows: Vec<TableRow> = (0..120).map(|i| TableRow::new(i, &event(1))).collect();
        let table = TableView::new(rows, None);
        assert_eq!(table.page_size, 50);
        assert_eq!(table.page_count(), 3);
        assert_eq!(table.page(0).len(), 50);
        assert_eq!(table.page(2).len(), 20);
        assert_eq!(table.page(2)[0].event_index, 100);
        assert!(table.page(3).is_empty());

        let empty = TableView::new(Vec::new(), None);
        assert_eq!(empty.page_count(), 1);
        assert!(empty.page(0).is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let tree = serde_json::to_value(Phase::Filtered).unwrap();
        assert_eq!(tree, "filtered");
        let form = serde_json::to_value(FormFields::default()).unwrap();
        assert_eq!(form["state"], Value::Null);
    }
}
