/*!
# Point Snapper

Projects each raw point onto the nearest edge of a [`RoadGraph`], by
Euclidean degree-space distance, using every edge's geometry (or its
straight segment, if it has none). Ties are broken first-encountered-wins
over a deterministic `(u, v, key)` edge order, per the graph's invariant
that edge iteration order isn't itself guaranteed stable.
*/

use crate::core::error::{Result, TourError};
use crate::core::types::NodeId;
use crate::geojson::{Feature, FeatureCollection, Geometry};
use crate::geometry::{Coordinate, closest_point_on_linestring};
use crate::graph::RoadGraph;
use crate::points_io::RawPoint;

/// A point after snapping to its nearest edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnappedPoint {
    pub id: i64,
    pub original: Coordinate,
    pub snapped: Coordinate,
    pub edge: (NodeId, NodeId, u32),
    pub offset_distance: f64,
}

/// Snaps every raw point onto the nearest graph edge, in input order.
///
/// # Errors
///
/// Returns [`TourError::EmptyGraph`] if the graph has no edges, and
/// [`TourError::BadPointsFile`] if `raw_points` is empty.
pub fn snap_points(
    graph: &RoadGraph,
    raw_points: &[RawPoint],
) -> Result<(Vec<SnappedPoint>, FeatureCollection)> {
    if graph.edge_count() == 0 {
        return Err(TourError::empty_graph(
            "cannot snap points against a graph with no edges",
        ));
    }
    if raw_points.is_empty() {
        return Err(TourError::bad_points_file("no points supplied to snap"));
    }

    let edges = graph.edges_sorted();
    let mut snapped_points = Vec::with_capacity(raw_points.len());
    let mut features = Vec::with_capacity(raw_points.len() * 3);

    for point in raw_points {
        let original = Coordinate::new(point.x, point.y);
        let mut best: Option<(NodeId, NodeId, u32, Coordinate, f64)> = None;

        for (u, v, attrs) in &edges {
            let line = graph.edge_geometry(*u, *v, attrs);
            let (candidate, dist) = closest_point_on_linestring(original, &line);
            let better = match &best {
                Some((_, _, _, _, best_dist)) => dist < *best_dist,
                None => true,
            };
            if better {
                best = Some((*u, *v, attrs.key, candidate, dist));
            }
        }

        let (u, v, key, snapped, offset_distance) =
            best.expect("graph has at least one edge, checked above");

        snapped_points.push(SnappedPoint {
            id: point.id,
            original,
            snapped,
            edge: (u, v, key),
            offset_distance,
        });

        features.push(Feature::new(
            Geometry::point(original),
            crate::geojson_props! { "kind" => "original", "id" => point.id },
        ));
        features.push(Feature::new(
            Geometry::point(snapped),
            crate::geojson_props! { "kind" => "snapped", "id" => point.id },
        ));
        features.push(Feature::new(
            Geometry::line_string(&[original, snapped]),
            crate::geojson_props! { "kind" => "snap_line", "id" => point.id },
        ));
    }

    Ok((snapped_points, FeatureCollection::new(features)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> RoadGraph {
        let mut g = RoadGraph::new();
        let a = g.add_node(Coordinate::new(0.0, 0.0));
        let b = g.add_node(Coordinate::new(1.0, 0.0));
        g.add_edge(a, b, 100.0, None);
        g
    }

    #[test]
    fn snaps_a_point_near_the_segment_onto_it() {
        let graph = sample_graph();
        let raw = vec![RawPoint { id: 7, x: 0.5, y: 0.2 }];
        let (snapped, fc) = snap_points(&graph, &raw).unwrap();
        assert_eq!(snapped.len(), 1);
        assert_eq!(snapped[0].id, 7);
        assert!((snapped[0].snapped.lat - 0.0).abs() < 1e-9);
        assert!((snapped[0].offset_distance - 0.2).abs() < 1e-9);
        assert_eq!(fc.features.len(), 3);
    }

    #[test]
    fn empty_graph_is_rejected() {
        let graph = RoadGraph::new();
        let raw = vec![RawPoint { id: 1, x: 0.0, y: 0.0 }];
        let result = snap_points(&graph, &raw);
        assert!(matches!(result, Err(TourError::EmptyGraph(_))));
    }

    #[test]
    fn empty_points_is_rejected() {
        let graph = sample_graph();
        let result = snap_points(&graph, &[]);
        assert!(matches!(result, Err(TourError::BadPointsFile(_))));
    }
}
