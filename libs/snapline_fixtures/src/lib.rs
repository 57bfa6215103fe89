//! On-disk fixtures shared by the tests and benchmarks.
//!
//! The `grid` network is a 3x3 lattice of intersections spaced `0.01`
//! degrees apart, anchored at `(126.60, 45.74)`. Every street is a pair
//! of directed edges: the eastbound/northbound edge carries an even `fid`
//! starting at `100`, its reverse the following odd `fid`.
//!
//! ```text
//!   7 ── 8 ── 9      45.76
//!   │    │    │
//!   4 ── 5 ── 6      45.75
//!   │    │    │
//!   1 ── 2 ── 3      45.74
//! 126.60    126.62
//! ```

use std::path::PathBuf;

/// Road network of the grid, as CSV with `fid,u,v,geom` columns.
pub const GRID_NETWORK: &str = "grid/edges.csv";

/// Precomputed cost table for the grid, covering every node pair.
pub const GRID_UBODT: &str = "grid/ubodt.csv";

/// `stmatch` configuration: `k=4, r=0.01, e=0.002`.
pub const GRID_STMATCH_CONFIG: &str = "grid/stmatch_config.json";

/// `fmm` configuration over [`GRID_UBODT`]: `k=4, r=0.01, e=0.002`.
pub const GRID_FMM_CONFIG: &str = "grid/fmm_config.json";

/// Eastbound edge `1 -> 2`, with an interior vertex at its midpoint.
pub const EDGE_1_2: i64 = 100;
/// Westbound edge `2 -> 1`.
pub const EDGE_2_1: i64 = 101;
/// Eastbound edge `2 -> 3`.
pub const EDGE_2_3: i64 = 102;
/// Northbound edge `3 -> 6`.
pub const EDGE_3_6: i64 = 116;

/// Three points 50m apart along [`EDGE_1_2`], travelling east.
pub const STRAIGHT_TRIP: &str =
    "LINESTRING (126.604 45.74, 126.604643 45.74, 126.605286 45.74)";

/// Travels east along the bottom row, then north up the right-hand column.
pub const TURNING_TRIP: &str = "LINESTRING (126.603 45.7401, 126.607 45.7399, 126.613 45.7401, 126.617 45.7400, 126.6199 45.743, 126.6201 45.747)";

/// A single point roughly 10km south of the grid.
pub const DISTANT_POINT_TRIP: &str = "LINESTRING (126.60 45.65)";

/// Resolves the absolute path of a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join(name)
}
