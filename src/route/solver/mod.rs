//! Network distances between consecutive candidates.
//!
//! A [`Solver`] answers, for one origin node, how far each of a set of
//! destination nodes lies, and by which edges. The two variants differ
//! only in where those answers come from.

#[doc(hidden)]
pub mod fmm;
#[doc(hidden)]
pub mod stmatch;

#[doc(inline)]
pub use fmm::FmmSolver;
#[doc(inline)]
pub use stmatch::StmatchSolver;

use crate::network::Network;
use petgraph::graph::NodeIndex;

/// A destination reached from an origin node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reachable {
    /// Network distance travelled.
    pub distance: f64,

    /// The edges travelled, in order. Empty when the origin is the destination.
    pub path: Vec<usize>,
}

/// What is known of the movement between two consecutive observations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentContext {
    /// Straight-line distance between the observations.
    pub euclidean: f64,

    /// Seconds elapsed between the observations, when known.
    pub elapsed: Option<f64>,
}

pub trait Solver: Send + Sync {
    /// Resolves the shortest path from `source` to each of `targets`,
    /// `None` for those which cannot be reached.
    fn reach(
        &self,
        network: &Network,
        source: NodeIndex,
        targets: &[NodeIndex],
        context: SegmentContext,
    ) -> Vec<Option<Reachable>>;
}
