/*!
# Session State

Process-wide cache of the currently loaded network and its snapped
points, guarded by an explicit `RwLock` rather than a module-level
singleton macro, so ownership and locking are visible at every call site
(spec §9 Design Notes). Replacement is wholesale: loading a new network
overwrites the old one entirely, matching the "exclusive-on-write,
shared-on-read" discipline spec §5 calls for.
*/

use crate::geojson::FeatureCollection;
use crate::graph::RoadGraph;
use crate::osm::{Bounds, NetworkStats};
use crate::snap::SnappedPoint;
use std::sync::{RwLock, RwLockReadGuard};

/// Everything retained between requests once a network has been loaded
/// and points have been snapped against it.
#[derive(Debug, Clone)]
pub struct SessionData {
    pub graph: RoadGraph,
    pub network_stats: NetworkStats,
    pub bounds: Bounds,
    pub network_geojson: FeatureCollection,
    pub snapped_points: Option<Vec<SnappedPoint>>,
}

/// The process-wide session cache: one Road Graph and its snapped points,
/// if any have been loaded.
#[derive(Default)]
pub struct SessionState {
    data: RwLock<Option<SessionData>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(None),
        }
    }

    /// Replaces the entire session wholesale with a freshly loaded network.
    /// Any previously snapped points are discarded, since they were derived
    /// from the old graph.
    pub fn load_network(
        &self,
        graph: RoadGraph,
        network_stats: NetworkStats,
        bounds: Bounds,
        network_geojson: FeatureCollection,
    ) {
        let mut guard = self.data.write().expect("session lock poisoned");
        *guard = Some(SessionData {
            graph,
            network_stats,
            bounds,
            network_geojson,
            snapped_points: None,
        });
    }

    /// Replaces the snapped points for the currently loaded network.
    /// Panics if no network has been loaded yet (callers are expected to
    /// check [`SessionState::read`] first).
    pub fn set_snapped_points(&self, points: Vec<SnappedPoint>) {
        let mut guard = self.data.write().expect("session lock poisoned");
        match guard.as_mut() {
            Some(session) => session.snapped_points = Some(points),
            None => panic!("set_snapped_points called before any network was loaded"),
        }
    }

    /// A read-only view of the current session, if any network is loaded.
    pub fn read(&self) -> RwLockReadGuard<'_, Option<SessionData>> {
        self.data.read().expect("session lock poisoned")
    }
}
