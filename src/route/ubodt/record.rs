use serde::{Deserialize, Serialize};

/// Size of one record within a binary table.
pub const RECORD_SIZE: usize = 48;

/// One row of the upper-bounded origin-destination table.
///
/// Nodes and edges are named by their external ids.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Record {
    pub source: i64,
    pub target: i64,

    /// The node following `source` upon the shortest path.
    pub next_n: i64,

    /// The node preceding `target` upon the shortest path.
    pub prev_n: i64,

    /// The first edge of the shortest path.
    pub next_e: i64,

    pub distance: f64,
}
