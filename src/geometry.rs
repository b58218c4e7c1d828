/*!
# Geometry Primitives

Small, dependency-free geometric helpers shared by the OSM adapter, the
Point Snapper, and the Path Materializer: a `Coordinate` type, point-to-
segment projection in raw degree space, and great-circle (haversine)
distance in meters.

Two distance spaces are deliberately kept apart, per the data model: the
Point Snapper measures in degree space (cheap, and the only thing that
matters is *which* edge is nearest), while the Road Graph's edge lengths
and the Shortest-Path Oracle's costs are always meters.
*/

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, used for haversine distance.
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// A geographic point as (longitude, latitude) degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Euclidean distance in raw degree space. Used only for snapping and
    /// nearest-node resolution, never for tour cost.
    pub fn degree_distance(&self, other: &Coordinate) -> f64 {
        let dx = self.lon - other.lon;
        let dy = self.lat - other.lat;
        (dx * dx + dy * dy).sqrt()
    }

    /// Great-circle distance in meters via the haversine formula.
    pub fn haversine_distance_m(&self, other: &Coordinate) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlon = (other.lon - self.lon).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();
        EARTH_RADIUS_M * c
    }

    /// [longitude, latitude] pair, the order RFC 7946 GeoJSON requires.
    pub fn as_lonlat(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

/// The point on a segment `a -> b` nearest to `p`, and the degree-space
/// distance from `p` to it. Handles the degenerate `a == b` case.
pub fn closest_point_on_segment(p: Coordinate, a: Coordinate, b: Coordinate) -> (Coordinate, f64) {
    let abx = b.lon - a.lon;
    let aby = b.lat - a.lat;
    let len_sq = abx * abx + aby * aby;

    let t = if len_sq <= f64::EPSILON {
        0.0
    } else {
        let apx = p.lon - a.lon;
        let apy = p.lat - a.lat;
        ((apx * abx + apy * aby) / len_sq).clamp(0.0, 1.0)
    };

    let projected = Coordinate::new(a.lon + t * abx, a.lat + t * aby);
    let dist = p.degree_distance(&projected);
    (projected, dist)
}

/// The point on a polyline (sequence of at least two coordinates) nearest
/// to `p`: the minimum over every consecutive segment.
pub fn closest_point_on_linestring(p: Coordinate, line: &[Coordinate]) -> (Coordinate, f64) {
    assert!(line.len() >= 2, "linestring must have at least two points");

    let mut best_point = line[0];
    let mut best_dist = f64::INFINITY;
    for window in line.windows(2) {
        let (candidate, dist) = closest_point_on_segment(p, window[0], window[1]);
        if dist < best_dist {
            best_dist = dist;
            best_point = candidate;
        }
    }
    (best_point, best_dist)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closest_point_on_segment_clamps_to_endpoints() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(1.0, 0.0);
        let p = Coordinate::new(-1.0, 1.0);
        let (point, dist) = closest_point_on_segment(p, a, b);
        assert_eq!(point.lon, 0.0);
        assert_eq!(point.lat, 0.0);
        assert!((dist - std::f64::consts::SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn closest_point_on_segment_projects_onto_interior() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(10.0, 0.0);
        let p = Coordinate::new(5.0, 3.0);
        let (point, dist) = closest_point_on_segment(p, a, b);
        assert!((point.lon - 5.0).abs() < 1e-9);
        assert!((point.lat - 0.0).abs() < 1e-9);
        assert!((dist - 3.0).abs() < 1e-9);
    }

    #[test]
    fn closest_point_on_degenerate_segment_is_the_shared_endpoint() {
        let a = Coordinate::new(2.0, 2.0);
        let p = Coordinate::new(5.0, 6.0);
        let (point, dist) = closest_point_on_segment(p, a, a);
        assert_eq!(point.lon, 2.0);
        assert_eq!(point.lat, 2.0);
        assert!((dist - 5.0).abs() < 1e-9);
    }

    #[test]
    fn haversine_distance_is_symmetric_and_zero_for_same_point() {
        let a = Coordinate::new(-74.0, 40.7);
        let b = Coordinate::new(-73.9, 40.8);
        assert_eq!(a.haversine_distance_m(&a), 0.0);
        assert!((a.haversine_distance_m(&b) - b.haversine_distance_m(&a)).abs() < 1e-6);
        assert!(a.haversine_distance_m(&b) > 0.0);
    }
}
