/*!
# GeoJSON Output

Minimal RFC 7946 types for the two places the crate emits GeoJSON: the
Point Snapper's preview (original/snapped/snap-line features) and the
Path Materializer's route polyline. Deserialization is not needed,
since these types are write-only, constructed directly from domain data.
*/

use crate::geometry::Coordinate;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A GeoJSON geometry: only the two kinds this crate ever emits.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: [f64; 2],
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
}

impl Geometry {
    pub fn point(coord: Coordinate) -> Self {
        Geometry::Point {
            coordinates: coord.as_lonlat(),
        }
    }

    pub fn line_string(coords: &[Coordinate]) -> Self {
        Geometry::LineString {
            coordinates: coords.iter().map(Coordinate::as_lonlat).collect(),
        }
    }
}

/// A single GeoJSON feature: a geometry plus free-form properties.
#[derive(Debug, Clone, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub geometry: Geometry,
    pub properties: BTreeMap<String, Value>,
}

impl Feature {
    pub fn new(geometry: Geometry, properties: BTreeMap<String, Value>) -> Self {
        Self {
            kind: "Feature",
            geometry,
            properties,
        }
    }
}

/// A GeoJSON `FeatureCollection`.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: "FeatureCollection",
            features,
        }
    }
}

/// Builds a `{key: value}` property map with `serde_json::Value` conversion,
/// the pattern every caller in this crate uses to assemble `properties`.
#[macro_export]
macro_rules! geojson_props {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut map = std::collections::BTreeMap::new();
        $(map.insert($key.to_string(), serde_json::json!($value));)*
        map
    }};
}
