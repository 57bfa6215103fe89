use crate::network::Network;
use crate::route::solver::{Reachable, SegmentContext, Solver};
use crate::route::ubodt::Ubodt;

use petgraph::graph::NodeIndex;

/// Answers from the precomputed table. Pairs absent from the table lie
/// beyond its bound, and are unreachable.
#[derive(Debug)]
pub struct FmmSolver {
    pub ubodt: Ubodt,
}

impl FmmSolver {
    pub fn new(ubodt: Ubodt) -> Self {
        Self { ubodt }
    }
}

impl Solver for FmmSolver {
    fn reach(
        &self,
        network: &Network,
        source: NodeIndex,
        targets: &[NodeIndex],
        _: SegmentContext,
    ) -> Vec<Option<Reachable>> {
        targets
            .iter()
            .map(|target| {
                if *target == source {
                    return Some(Reachable::default());
                }

                Some(Reachable {
                    distance: self.ubodt.lookup(source, *target)?.distance,
                    path: self.ubodt.path(network, source, *target)?,
                })
            })
            .collect()
    }
}
