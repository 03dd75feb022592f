//! `resolve`, `highlight` and `districts` subcommands.

use crate::output_writer;
use fdv_core::criteria::Granularity;
use fdv_core::event::EventRecord;
use fdv_core::geometry::{GeometryCollection, RegionKind};
use fdv_core::hierarchy::RegionHierarchy;
use fdv_data::{GeoNameResolver, HighlightProjector};
use log::info;
use serde_json::Value;
use std::io::Write;

/// Load a GeoJSON FeatureCollection, gunzipping when the path ends in `.gz`.
pub fn load_geometries(path: &str, kind: RegionKind) -> anyhow::Result<GeometryCollection> {
    let collection = if path.ends_with(".gz") {
        let compressed = std::fs::read(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path, e))?;
        GeometryCollection::from_geojson_gz(kind, &compressed)?
    } else {
        let geojson = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path, e))?;
        GeometryCollection::from_geojson_str(kind, &geojson)?
    };
    Ok(collection)
}

/// One line describing the best match for `query`, or why there is none.
pub fn resolve_report(
    collection: &GeometryCollection,
    query: &str,
    threshold: Option<u8>,
) -> anyhow::Result<String> {
    let resolver = GeoNameResolver::new(collection.unique_names())?;
    let report = match threshold {
        Some(threshold) => match resolver.resolve_above(query, threshold) {
            Some(best) => format!("{}\t{}", best.name, best.score),
            None => {
                let closest = resolver.best_match(query);
                format!(
                    "no {} scores at least {} for '{}' (closest: {}, {})",
                    collection.kind(),
                    threshold,
                    query,
                    closest.name,
                    closest.score
                )
            }
        },
        None => {
            let best = resolver.best_match(query);
            format!("{}\t{}", best.name, best.score)
        }
    };
    Ok(report)
}

pub fn run_resolve(
    geometries: &str,
    kind: RegionKind,
    threshold: Option<u8>,
    query: &str,
) -> anyhow::Result<()> {
    let collection = load_geometries(geometries, kind)?;
    println!("{}", resolve_report(&collection, query, threshold)?);
    Ok(())
}

/// FeatureCollection of the regions highlighted for inventory row `row`.
pub fn highlight_geojson(
    events: &[EventRecord],
    projector: &HighlightProjector,
    row: usize,
    granularity: Granularity,
) -> anyhow::Result<Value> {
    let event = events.get(row).ok_or_else(|| {
        anyhow::anyhow!("row {} is out of range ({} events)", row, events.len())
    })?;
    let projection = projector.project(Some(event), granularity);
    info!(
        "Row {} highlights {} {}(s): {}",
        row,
        projection.geometries.len(),
        granularity,
        projection.names().join(", ")
    );
    Ok(projection.to_feature_collection())
}

pub fn run_highlight(
    events_path: &str,
    states_path: &str,
    districts_path: &str,
    row: usize,
    granularity: Granularity,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let inventory_csv = std::fs::read_to_string(events_path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", events_path, e))?;
    let events = EventRecord::parse_inventory_csv(&inventory_csv)?;
    let projector = HighlightProjector::new(
        load_geometries(states_path, RegionKind::State)?,
        load_geometries(districts_path, RegionKind::District)?,
    )?;
    let geojson = highlight_geojson(&events, &projector, row, granularity)?;

    let mut writer = output_writer(output)?;
    serde_json::to_writer_pretty(&mut writer, &geojson)?;
    writeln!(writer)?;
    Ok(())
}

/// Hierarchy states, or the districts of `state`.
pub fn district_listing(hierarchy: &RegionHierarchy, state: Option<&str>) -> anyhow::Result<Vec<String>> {
    match state {
        None => Ok(hierarchy.states().map(String::from).collect()),
        Some(state) => hierarchy
            .districts_of(state)
            .map(<[String]>::to_vec)
            .ok_or_else(|| anyhow::anyhow!("unknown state '{}'", state)),
    }
}

pub fn run_districts(state: Option<&str>) -> anyhow::Result<()> {
    let hierarchy = RegionHierarchy::embedded()?;
    for name in district_listing(&hierarchy, state)? {
        println!("{}", name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATES: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {"ST_NM": "Bihar"},
         "geometry": {"type": "Polygon", "coordinates": [[[84.0, 25.0], [88.0, 25.0], [88.0, 27.5], [84.0, 25.0]]]}},
        {"type": "Feature", "properties": {"ST_NM": "Jharkhand"},
         "geometry": {"type": "Polygon", "coordinates": [[[83.5, 22.0], [87.5, 22.0], [87.5, 25.0], [83.5, 22.0]]]}},
        {"type": "Feature", "properties": {"ST_NM": "Odisha"},
         "geometry": {"type": "Polygon", "coordinates": [[[81.5, 18.0], [87.5, 18.0], [87.5, 22.5], [81.5, 18.0]]]}}
    ]}"#;

    const DISTRICTS: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {"Dist_Name": "Patna"},
         "geometry": {"type": "Polygon", "coordinates": [[[85.0, 25.4], [85.4, 25.4], [85.4, 25.7], [85.0, 25.4]]]}},
        {"type": "Feature", "properties": {"Dist_Name": "Ranchi"},
         "geometry": {"type": "Polygon", "coordinates": [[[85.0, 23.1], [85.6, 23.1], [85.6, 23.6], [85.0, 23.1]]]}}
    ]}"#;

    const INVENTORY: &str = "\
Start,End,Duration(Days),Main Cause,State,Districts
10/07/2019,25/07/2019,16,Heavy rains,\"Bihar, Jharkhand\",\"Patna, Ranchi\"
03/05/2019,04/05/2019,2,Cyclone,Orissa,
";

    fn projector() -> HighlightProjector {
        HighlightProjector::new(
            GeometryCollection::from_geojson_str(RegionKind::State, STATES).unwrap(),
            GeometryCollection::from_geojson_str(RegionKind::District, DISTRICTS).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_report() {
        let states = GeometryCollection::from_geojson_str(RegionKind::State, STATES).unwrap();
        assert_eq!(resolve_report(&states, "Bihar", None).unwrap(), "Bihar\t100");
        assert_eq!(resolve_report(&states, "Orissa", Some(60)).unwrap(), "Odisha\t67");
        let report = resolve_report(&states, "Orissa", Some(90)).unwrap();
        assert!(report.starts_with("no state scores at least 90"));
    }

    #[test]
    fn test_highlight_geojson() {
        let events = EventRecord::parse_inventory_csv(INVENTORY).unwrap();
        let projector = projector();

        let states = highlight_geojson(&events, &projector, 0, Granularity::State).unwrap();
        let ids: Vec<&str> = states["features"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["Bihar", "Jharkhand"]);

        let districts = highlight_geojson(&events, &projector, 1, Granularity::District).unwrap();
        assert_eq!(districts["features"].as_array().unwrap().len(), 0);

        assert!(highlight_geojson(&events, &projector, 2, Granularity::State).is_err());
    }

    #[test]
    fn test_district_listing() {
        let hierarchy = RegionHierarchy::embedded().unwrap();
        let states = district_listing(&hierarchy, None).unwrap();
        assert_eq!(states.len(), 36);
        let kerala = district_listing(&hierarchy, Some("Kerala")).unwrap();
        assert_eq!(kerala.len(), 14);
        assert!(district_listing(&hierarchy, Some("Atlantis")).is_err());
    }
}
