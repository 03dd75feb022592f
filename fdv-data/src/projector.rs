//! Maps the selected event row onto the state or district polygons it names.

use crate::resolver::GeoNameResolver;
use fdv_core::criteria::Granularity;
use fdv_core::event::EventRecord;
use fdv_core::geometry::{feature_collection, GeometryCollection, RegionGeometry, RegionKind};
use fdv_core::{FloodError, Result};
use serde_json::Value;
use std::collections::HashSet;

/// Geometries to draw for one map render.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection<'a> {
    pub granularity: Granularity,
    /// False when no row is selected and the whole collection is shown plain
    pub highlighted: bool,
    pub geometries: Vec<&'a RegionGeometry>,
}

impl Projection<'_> {
    /// Distinct names of the projected geometries, in collection order.
    pub fn names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.geometries
            .iter()
            .map(|g| g.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    pub fn to_feature_collection(&self) -> Value {
        feature_collection(&self.geometries)
    }
}

/// Highlighted geometries at both levels for one event.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightSets<'a> {
    pub states: Vec<&'a RegionGeometry>,
    pub districts: Vec<&'a RegionGeometry>,
}

/// Holds both geometry collections and a resolver over each one's names.
#[derive(Debug, Clone)]
pub struct HighlightProjector {
    states: GeometryCollection,
    districts: GeometryCollection,
    state_names: GeoNameResolver,
    district_names: GeoNameResolver,
}

fn resolver_for(collection: &GeometryCollection, expected: RegionKind) -> Result<GeoNameResolver> {
    if collection.kind() != expected {
        return Err(FloodError::InvalidArgument(format!(
            "expected a {} collection, got {}",
            expected,
            collection.kind()
        )));
    }
    if collection.is_empty() {
        return Err(FloodError::InvalidArgument(format!(
            "{} geometry collection is empty",
            expected
        )));
    }
    GeoNameResolver::new(collection.unique_names())
}

impl HighlightProjector {
    /// Fails with `InvalidArgument` if either collection is empty or of the
    /// wrong kind.
    pub fn new(states: GeometryCollection, districts: GeometryCollection) -> Result<Self> {
        let state_names = resolver_for(&states, RegionKind::State)?;
        let district_names = resolver_for(&districts, RegionKind::District)?;
        Ok(HighlightProjector {
            states,
            districts,
            state_names,
            district_names,
        })
    }

    pub fn states(&self) -> &GeometryCollection {
        &self.states
    }

    pub fn districts(&self) -> &GeometryCollection {
        &self.districts
    }

    fn collection(&self, granularity: Granularity) -> &GeometryCollection {
        match granularity {
            Granularity::State => &self.states,
            Granularity::District => &self.districts,
        }
    }

    fn select<'a>(
        collection: &'a GeometryCollection,
        resolver: &'a GeoNameResolver,
        tokens: &[&str],
    ) -> Vec<&'a RegionGeometry> {
        let matched: HashSet<&str> = tokens.iter().map(|token| resolver.resolve(token)).collect();
        collection.select_named(&matched)
    }

    /// State and district geometries named by `event`'s affected regions.
    ///
    /// Each `", "`-separated token resolves to its closest geometry name.
    /// An absent region field gives an empty set.
    pub fn highlight_sets(&self, event: &EventRecord) -> HighlightSets<'_> {
        HighlightSets {
            states: Self::select(&self.states, &self.state_names, &event.affected_states()),
            districts: Self::select(
                &self.districts,
                &self.district_names,
                &event.affected_districts(),
            ),
        }
    }

    /// Geometries for the map: the whole collection when no row is selected,
    /// otherwise the regions named by the row at `granularity`.
    pub fn project(&self, row: Option<&EventRecord>, granularity: Granularity) -> Projection<'_> {
        match row {
            None => Projection {
                granularity,
                highlighted: false,
                geometries: self.collection(granularity).iter().collect(),
            },
            Some(event) => {
                let sets = self.highlight_sets(event);
                let geometries = match granularity {
                    Granularity::State => sets.states,
                    Granularity::District => sets.districts,
                };
                log::info!(
                    "Highlighting {} {} geometries",
                    geometries.len(),
                    granularity
                );
                Projection {
                    granularity,
                    highlighted: true,
                    geometries,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use geojson::Geometry;
    use serde_json::json;

    fn polygon(offset: f64) -> Geometry {
        Geometry::new(geojson::Value::Polygon(vec![vec![
            vec![offset, 20.0],
            vec![offset + 1.0, 20.0],
            vec![offset + 1.0, 21.0],
            vec![offset, 20.0],
        ]]))
    }

    fn collection(kind: RegionKind, names: &[&str]) -> GeometryCollection {
        let regions = names
            .iter()
            .enumerate()
            .map(|(i, name)| RegionGeometry {
                name: name.to_string(),
                kind,
                boundary: polygon(70.0 + i as f64),
            })
            .collect();
        GeometryCollection::new(kind, regions)
    }

    fn projector() -> HighlightProjector {
        HighlightProjector::new(
            collection(
                RegionKind::State,
                &["Bihar", "Jharkhand", "Kerala", "Odisha", "Bihar", "NCT of Delhi"],
            ),
            collection(
                RegionKind::District,
                &["Patna", "Ranchi", "Gaya", "Ernakulam", "Alappuzha", "Cuttack"],
            ),
        )
        .unwrap()
    }

    fn event(state: Option<&str>, district: Option<&str>) -> EventRecord {
        EventRecord {
            start_date: NaiveDate::from_ymd_opt(2019, 7, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2019, 7, 25).unwrap(),
            duration_days: Some(16),
            main_cause: None,
            affected_state: state.map(String::from),
            affected_district: district.map(String::from),
        }
    }

    #[test]
    fn test_no_row_shows_full_collection() {
        let projector = projector();
        let states = projector.project(None, Granularity::State);
        assert!(!states.highlighted);
        assert_eq!(states.geometries.len(), 6);

        let districts = projector.project(None, Granularity::District);
        assert_eq!(districts.geometries.len(), 6);
        assert!(districts.geometries.iter().all(|g| g.kind == RegionKind::District));
    }

    #[test]
    fn test_row_highlights_named_states() {
        let projector = projector();
        let row = event(Some("Bihar, Jharkhand"), Some("Patna, Ranchi"));
        let projection = projector.project(Some(&row), Granularity::State);
        assert!(projection.highlighted);
        assert_eq!(projection.names(), vec!["Bihar", "Jharkhand"]);
        // Bihar is split across two features
        assert_eq!(projection.geometries.len(), 3);

        let districts = projector.project(Some(&row), Granularity::District);
        assert_eq!(districts.names(), vec!["Patna", "Ranchi"]);
    }

    #[test]
    fn test_misspelled_tokens_resolve() {
        let projector = projector();
        let row = event(Some("Orissa, Delhi"), Some("Cuttak"));
        let sets = projector.highlight_sets(&row);
        let states: Vec<&str> = sets.states.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(states, vec!["Odisha", "NCT of Delhi"]);
        assert_eq!(sets.districts.len(), 1);
        assert_eq!(sets.districts[0].name, "Cuttack");
    }

    #[test]
    fn test_missing_regions_give_empty_sets() {
        let projector = projector();
        let row = event(None, None);
        let projection = projector.project(Some(&row), Granularity::District);
        assert!(projection.highlighted);
        assert!(projection.geometries.is_empty());
        assert_eq!(projection.to_feature_collection()["features"], json!([]));
    }

    #[test]
    fn test_granularity_round_trip_restores_highlight() {
        let projector = projector();
        let row = event(Some("Kerala"), Some("Ernakulam, Alappuzha"));
        let first = projector.project(Some(&row), Granularity::State);
        let toggled = projector.project(Some(&row), Granularity::State.toggled());
        let back = projector.project(Some(&row), Granularity::State.toggled().toggled());
        assert_ne!(first, toggled);
        assert_eq!(first, back);
    }

    #[test]
    fn test_empty_collection_is_rejected() {
        let err = HighlightProjector::new(
            GeometryCollection::new(RegionKind::State, Vec::new()),
            collection(RegionKind::District, &["Patna"]),
        )
        .unwrap_err();
        assert!(matches!(err, FloodError::InvalidArgument(_)));
    }

    #[test]
    fn test_swapped_collections_are_rejected() {
        let err = HighlightProjector::new(
            collection(RegionKind::District, &["Patna"]),
            collection(RegionKind::State, &["Bihar"]),
        )
        .unwrap_err();
        assert!(matches!(err, FloodError::InvalidArgument(_)));
    }
}
