use crate::coord::linear::{concat, substring};
use crate::network::Network;
use crate::route::transition::Solution;

use geo::LineString;

/// The outcome of matching one trajectory.
///
/// An empty [`MatchResult::mgeom`] is the degenerate outcome: no plausible
/// path exists, and every other field is empty too.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchResult {
    /// The matched path, from the first matched position to the last.
    pub mgeom: LineString,

    /// The matched position of every observation.
    pub pgeom: LineString,

    /// The matched edge of every observation.
    pub opath: Vec<i64>,

    /// The connected sequence of edges travelled.
    pub cpath: Vec<i64>,

    /// Position within [`MatchResult::cpath`] of each observation's edge.
    pub indices: Vec<usize>,

    /// Distance along the matched edge of each observation.
    pub offset: Vec<f64>,

    /// Length of the matched edge of each observation.
    pub length: Vec<f64>,

    /// Network distance from the previous matched position, `0` for the first.
    pub spdist: Vec<f64>,
}

impl Default for MatchResult {
    fn default() -> Self {
        Self {
            mgeom: LineString::new(vec![]),
            pgeom: LineString::new(vec![]),
            opath: vec![],
            cpath: vec![],
            indices: vec![],
            offset: vec![],
            length: vec![],
            spdist: vec![],
        }
    }
}

impl MatchResult {
    /// Completes a decoded solution into the full path it implies.
    pub fn new(network: &Network, solution: &Solution) -> Self {
        let (Some(first), Some(last)) = (solution.route.first(), solution.route.last()) else {
            return MatchResult::default();
        };

        let mut cpath = vec![first.edge];
        let mut indices = vec![0];

        for (arrival, candidate) in solution.arrivals.iter().zip(&solution.route[1..]) {
            if !arrival.same_edge {
                cpath.extend(arrival.path.iter().copied());
                cpath.push(candidate.edge);
            }

            indices.push(cpath.len() - 1);
        }

        let terminal = cpath.len() - 1;
        let mut coords = vec![];

        for (position, edge) in cpath.iter().enumerate() {
            let edge = network.edge(*edge);

            if position == 0 || position == terminal {
                let start = if position == 0 { first.offset } else { 0.0 };
                let end = if position == terminal { last.offset } else { edge.length };
                concat(&mut coords, &substring(&edge.geometry, start, end));
            } else {
                concat(&mut coords, &edge.geometry);
            }
        }

        if coords.len() == 1 {
            coords.push(coords[0]);
        }

        MatchResult {
            mgeom: LineString::new(coords),
            pgeom: solution
                .route
                .iter()
                .map(|candidate| candidate.position)
                .collect(),
            opath: solution
                .route
                .iter()
                .map(|candidate| network.edge(candidate.edge).fid)
                .collect(),
            cpath: cpath.iter().map(|edge| network.edge(*edge).fid).collect(),
            indices,
            offset: solution.route.iter().map(|candidate| candidate.offset).collect(),
            length: solution
                .route
                .iter()
                .map(|candidate| network.edge(candidate.edge).length)
                .collect(),
            spdist: std::iter::once(0.0)
                .chain(solution.arrivals.iter().map(|arrival| arrival.distance))
                .collect(),
        }
    }

    /// Whether this is the degenerate, unmatched outcome.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mgeom.0.is_empty()
    }
}
