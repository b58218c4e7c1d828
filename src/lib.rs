/*!
# tournet

Road-constrained traveling-salesman solving core: point snapping, cost
matrices, and exact/approximate tour solvers over a street network.

The crate is organized leaf-first, mirroring the data flow Graph + raw
points → Snapper → Cost Matrix Builder → Solver → Path Materializer:

- [`core`]: generic graph substrate (`BaseGraph`, Dijkstra, the unified
  error type) shared by everything above it.
- [`geometry`]: coordinate type, point-to-segment projection, haversine
  distance.
- [`graph`]: the Road Graph domain type built on [`core::types`].
- [`osm`]: the OSM XML adapter producing a [`graph::RoadGraph`].
- [`points_io`]: raw-points file parsing.
- [`snap`]: the Point Snapper.
- [`paths`]: the Shortest-Path Oracle.
- [`matrix`]: the Cost Matrix Builder and its validation pass.
- [`solvers`]: Exhaustive, Held-Karp, and Greedy+2-Opt.
- [`route`]: the Path Materializer.
- [`session`]: the process-wide load-once/read-many cache.
- [`api`]: the five external operations tying everything together.
*/

#[cfg(feature = "logging")]
mod settings;

pub mod api;
pub mod core;
pub mod geojson;
pub mod geometry;
pub mod graph;
pub mod matrix;
pub mod osm;
pub mod paths;
pub mod points_io;
pub mod route;
pub mod session;
pub mod snap;
pub mod solvers;
