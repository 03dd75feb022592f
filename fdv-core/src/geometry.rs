//! Named state and district polygons loaded from GeoJSON.
//!
//! The geometry sources spell region names their own way (`ST_NM` for states,
//! `Dist_Name` for districts). Those spellings are canonical: free-text names
//! from the event inventory are reconciled against them, never the other way
//! round.

use crate::error::{FloodError, Result};
use flate2::read::GzDecoder;
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, PolygonType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::io::Read;
use std::str::FromStr;

/// Administrative level of a region polygon.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    State,
    District,
}

impl RegionKind {
    /// Feature property holding the canonical region name.
    pub fn name_property(&self) -> &'static str {
        match self {
            RegionKind::State => "ST_NM",
            RegionKind::District => "Dist_Name",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RegionKind::State => "state",
            RegionKind::District => "district",
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegionKind {
    type Err = FloodError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "state" => Ok(RegionKind::State),
            "district" => Ok(RegionKind::District),
            other => Err(FloodError::InvalidArgument(format!(
                "unknown region kind '{}'",
                other
            ))),
        }
    }
}

/// One state or district polygon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionGeometry {
    /// Canonical name as spelled in the geometry source
    pub name: String,
    pub kind: RegionKind,
    /// `Polygon` or `MultiPolygon` geometry
    pub boundary: Geometry,
}

impl RegionGeometry {
    /// GeoJSON Feature for this region, identified by its name.
    pub fn to_feature(&self) -> Feature {
        self.feature_with(self.boundary.clone())
    }

    fn feature_with(&self, geometry: Geometry) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert("name".to_string(), Value::from(self.name.as_str()));
        properties.insert("kind".to_string(), Value::from(self.kind.as_str()));
        Feature {
            bbox: None,
            geometry: Some(geometry),
            id: Some(Id::String(self.name.clone())),
            properties: Some(properties),
            foreign_members: None,
        }
    }

    /// Polygons making up this region's boundary.
    fn polygons(&self) -> Vec<PolygonType> {
        match &self.boundary.value {
            geojson::Value::Polygon(rings) => vec![rings.clone()],
            geojson::Value::MultiPolygon(polygons) => polygons.clone(),
            _ => Vec::new(),
        }
    }
}

fn geometry_type(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

/// Build a GeoJSON FeatureCollection from a selection of regions.
///
/// Regions sharing a name become one MultiPolygon feature, so every feature
/// id is unique.
pub fn feature_collection(regions: &[&RegionGeometry]) -> Value {
    let mut grouped: Vec<(&RegionGeometry, Vec<&RegionGeometry>)> = Vec::new();
    for &region in regions {
        match grouped.iter_mut().find(|(first, _)| first.name == region.name) {
            Some((_, parts)) => parts.push(region),
            None => grouped.push((region, vec![region])),
        }
    }

    let features: Vec<Feature> = grouped
        .into_iter()
        .map(|(first, parts)| {
            if parts.len() == 1 {
                return first.to_feature();
            }
            let polygons = parts.iter().flat_map(|r| r.polygons()).collect();
            first.feature_with(Geometry::new(geojson::Value::MultiPolygon(polygons)))
        })
        .collect();
    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };
    Value::Object(JsonObject::from(&collection))
}

/// An immutable collection of region polygons of a single kind.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCollection {
    kind: RegionKind,
    regions: Vec<RegionGeometry>,
}

impl GeometryCollection {
    pub fn new(kind: RegionKind, regions: Vec<RegionGeometry>) -> Self {
        GeometryCollection { kind, regions }
    }

    /// Parse a GeoJSON FeatureCollection, reading names from the kind's
    /// default property (`ST_NM` or `Dist_Name`).
    pub fn from_geojson_str(kind: RegionKind, geojson: &str) -> Result<Self> {
        Self::from_geojson_str_with_property(kind, geojson, kind.name_property())
    }

    /// Parse a GeoJSON FeatureCollection, reading names from `name_property`.
    ///
    /// Features without a name or with a null geometry are skipped.
    /// Geometries other than Polygon/MultiPolygon are rejected.
    pub fn from_geojson_str_with_property(
        kind: RegionKind,
        geojson: &str,
        name_property: &str,
    ) -> Result<Self> {
        match geojson.parse::<GeoJson>()? {
            GeoJson::FeatureCollection(collection) => {
                Self::from_feature_collection(kind, collection, name_property)
            }
            _ => Err(FloodError::GeoJson(
                "expected a FeatureCollection".to_string(),
            )),
        }
    }

    /// Parse a gzip-compressed GeoJSON FeatureCollection.
    pub fn from_geojson_gz(kind: RegionKind, compressed: &[u8]) -> Result<Self> {
        let mut decoder = GzDecoder::new(compressed);
        let mut geojson = String::new();
        decoder.read_to_string(&mut geojson)?;
        Self::from_geojson_str(kind, &geojson)
    }

    fn from_feature_collection(
        kind: RegionKind,
        collection: FeatureCollection,
        name_property: &str,
    ) -> Result<Self> {
        let mut regions = Vec::with_capacity(collection.features.len());
        let mut skipped = 0u32;
        for (index, feature) in collection.features.into_iter().enumerate() {
            let name = feature
                .property(name_property)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from);

            let (name, geometry) = match (name, feature.geometry) {
                (Some(name), Some(geometry)) => (name, geometry),
                _ => {
                    log::warn!(
                        "Skipping {} feature {}: missing '{}' or geometry",
                        kind,
                        index,
                        name_property
                    );
                    skipped += 1;
                    continue;
                }
            };

            match geometry.value {
                geojson::Value::Polygon(_) | geojson::Value::MultiPolygon(_) => {}
                ref other => {
                    return Err(FloodError::GeoJson(format!(
                        "{} '{}' has unsupported geometry type {}",
                        kind,
                        name,
                        geometry_type(other)
                    )))
                }
            }

            regions.push(RegionGeometry {
                name,
                kind,
                boundary: geometry,
            });
        }
        log::info!(
            "Loaded {} {} geometries, skipped {} unnamed",
            regions.len(),
            kind,
            skipped
        );
        Ok(GeometryCollection { kind, regions })
    }

    pub fn kind(&self) -> RegionKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionGeometry> {
        self.regions.iter()
    }

    /// Distinct region names in first-occurrence order.
    ///
    /// A region split across several features appears once.
    pub fn unique_names(&self) -> Vec<&str> {
        let mut seen: HashSet<&str> = HashSet::new();
        self.regions
            .iter()
            .map(|r| r.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Every region whose name is in `names`, in collection order.
    pub fn select_named(&self, names: &HashSet<&str>) -> Vec<&RegionGeometry> {
        self.regions
            .iter()
            .filter(|r| names.contains(r.name.as_str()))
            .collect()
    }
}
