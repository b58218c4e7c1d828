/*!
# OSM XML Adapter

Converts raw OpenStreetMap XML bytes into a [`RoadGraph`], following the
output contract of `load_network` (spec's external operation table):
a graph, summary stats, a bounding box, and a GeoJSON preview of every
road edge.

Only `<way>` elements carrying a `highway` tag are treated as roads,
matching standard OSM routing conventions. The XML format carries no
precomputed edge length, so each edge's length is the haversine
distance between its endpoint coordinates; every forward edge gets a
matching reverse edge so the resulting graph is always bidirectional.
*/

use crate::core::error::{Result, TourError};
use crate::core::types::NodeId;
use crate::geojson::{Feature, FeatureCollection, Geometry};
use crate::geometry::Coordinate;
use crate::graph::RoadGraph;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize)]
struct XmlOsm {
    #[serde(rename = "node", default)]
    nodes: Vec<XmlNode>,
    #[serde(rename = "way", default)]
    ways: Vec<XmlWay>,
}

#[derive(Debug, Clone, Deserialize)]
struct XmlNode {
    #[serde(rename = "@id")]
    id: i64,
    #[serde(rename = "@lat")]
    lat: f64,
    #[serde(rename = "@lon")]
    lon: f64,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct XmlWay {
    #[serde(rename = "@id")]
    #[allow(dead_code)]
    id: i64,
    #[serde(rename = "nd", default)]
    refs: Vec<XmlNodeRef>,
    #[serde(rename = "tag", default)]
    tags: Vec<XmlTag>,
}

#[derive(Debug, Clone, Deserialize)]
struct XmlNodeRef {
    #[serde(rename = "@ref")]
    node_ref: i64,
}

#[derive(Debug, Clone, Deserialize)]
struct XmlTag {
    #[serde(rename = "@k")]
    key: String,
    #[serde(rename = "@v")]
    #[allow(dead_code)]
    value: String,
}

impl XmlWay {
    fn is_highway(&self) -> bool {
        self.tags.iter().any(|tag| tag.key == "highway")
    }
}

/// Summary counts returned alongside a freshly loaded [`RoadGraph`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkStats {
    pub nodes: usize,
    pub edges: usize,
}

/// The geographic bounding box of a loaded network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Parses OSM XML bytes into a road graph, following `highway`-tagged
/// ways only. Returns the graph, summary stats, bounding box, and a
/// GeoJSON preview of every resulting edge.
///
/// # Errors
///
/// Returns [`TourError::BadNetworkFile`] if the bytes are not
/// well-formed OSM XML, and [`TourError::EmptyGraph`] if no
/// `highway`-tagged way produces any usable edge.
pub fn load_network(
    bytes: &[u8],
) -> Result<(RoadGraph, NetworkStats, Bounds, FeatureCollection)> {
    let parsed: XmlOsm = quick_xml::de::from_reader(bytes)
        .map_err(|err| TourError::bad_network_file(format!("malformed OSM XML: {err}")))?;

    if parsed.nodes.is_empty() {
        return Err(TourError::bad_network_file(
            "OSM document contains no <node> elements",
        ));
    }

    let mut graph = RoadGraph::with_capacity(parsed.nodes.len(), parsed.ways.len());
    let mut id_map: HashMap<i64, NodeId> = HashMap::with_capacity(parsed.nodes.len());
    let mut min_lat = f64::INFINITY;
    let mut max_lat = f64::NEG_INFINITY;
    let mut min_lon = f64::INFINITY;
    let mut max_lon = f64::NEG_INFINITY;

    for node in &parsed.nodes {
        let coord = Coordinate::new(node.lon, node.lat);
        let node_id = graph.add_node(coord);
        id_map.insert(node.id, node_id);
        min_lat = min_lat.min(node.lat);
        max_lat = max_lat.max(node.lat);
        min_lon = min_lon.min(node.lon);
        max_lon = max_lon.max(node.lon);
    }

    let mut features = Vec::new();
    for way in parsed.ways.iter().filter(|way| way.is_highway()) {
        for pair in way.refs.windows(2) {
            let (Some(&u), Some(&v)) = (id_map.get(&pair[0].node_ref), id_map.get(&pair[1].node_ref))
            else {
                continue;
            };
            let cu = graph.node_coordinate(u).expect("just-inserted node");
            let cv = graph.node_coordinate(v).expect("just-inserted node");
            let length = cu.haversine_distance_m(&cv);

            graph.add_edge(u, v, length, None);
            graph.add_edge(v, u, length, None);

            features.push(Feature::new(
                Geometry::line_string(&[cu, cv]),
                crate::geojson_props! { "length_m" => length },
            ));
        }
    }

    if graph.edge_count() == 0 {
        return Err(TourError::empty_graph(
            "no highway-tagged way produced a usable edge",
        ));
    }

    let stats = NetworkStats {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
    };
    let bounds = Bounds {
        min_lat,
        max_lat,
        min_lon,
        max_lon,
    };
    let feature_collection = FeatureCollection::new(features);

    Ok((graph, stats, bounds, feature_collection))
}
