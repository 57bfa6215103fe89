use crate::config::StmatchConfig;
use crate::network::Network;
use crate::route::primitives::Dijkstra;
use crate::route::solver::{Reachable, SegmentContext, Solver};

use petgraph::graph::NodeIndex;

/// Searches the network on demand, bounded by how far the vehicle could
/// plausibly have travelled between two observations.
#[derive(Clone, Copy, Debug)]
pub struct StmatchSolver {
    pub factor: f64,
    pub vmax: f64,
}

impl StmatchSolver {
    pub fn new(config: &StmatchConfig) -> Self {
        Self {
            factor: config.factor,
            vmax: config.vmax,
        }
    }

    /// `factor * vmax * dt` when the elapsed time is known, otherwise
    /// `4 * factor * eu`.
    pub fn bound(&self, context: SegmentContext) -> f64 {
        match context.elapsed {
            Some(elapsed) if elapsed > 0.0 => self.factor * self.vmax * elapsed,
            _ => 4.0 * self.factor * context.euclidean,
        }
    }
}

impl Solver for StmatchSolver {
    fn reach(
        &self,
        network: &Network,
        source: NodeIndex,
        targets: &[NodeIndex],
        context: SegmentContext,
    ) -> Vec<Option<Reachable>> {
        let tree = Dijkstra::new(self.bound(context)).reach_until(network, source, targets);

        targets
            .iter()
            .map(|target| {
                Some(Reachable {
                    distance: tree.distance(*target)?,
                    path: tree.path(*target)?,
                })
            })
            .collect()
    }
}
