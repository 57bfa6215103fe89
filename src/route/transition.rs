use crate::config::CandidateConfig;
use crate::network::Network;
use crate::route::candidate::{Candidate, LayerGenerator, Layers};
use crate::route::costing::{Costing, EmissionStrategy, TransitionStrategy};
use crate::route::result::MatchResult;
use crate::route::solver::{SegmentContext, Solver};
use crate::trajectory::Trajectory;

use geo::{Distance, Euclidean};
use log::debug;
use measure_time::debug_time;

/// How the best-scoring candidate of a layer was arrived at.
#[derive(Clone, Debug, PartialEq)]
pub struct Arrival {
    /// Index of the candidate arrived from, within the previous layer.
    pub previous: usize,

    /// Network distance travelled between the two candidates.
    pub distance: f64,

    /// Edges travelled strictly between the two candidates' edges.
    pub path: Vec<usize>,

    /// Whether the movement stayed upon a single edge, moving forwards.
    pub same_edge: bool,
}

/// The most likely sequence of candidates, one per observation.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    pub route: Vec<Candidate>,

    /// The arrival at each candidate of the route, but the first.
    pub arrivals: Vec<Arrival>,
}

/// Viterbi decoding of the hidden-Markov model whose hidden states are
/// the candidates of each observation.
pub struct Transition<'a, S, E, T>
where
    S: Solver,
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    network: &'a Network,
    solver: &'a S,
    costing: &'a Costing<E, T>,
}

impl<'a, S, E, T> Transition<'a, S, E, T>
where
    S: Solver,
    E: EmissionStrategy + Send + Sync,
    T: TransitionStrategy + Send + Sync,
{
    pub fn new(network: &'a Network, solver: &'a S, costing: &'a Costing<E, T>) -> Self {
        Self {
            network,
            solver,
            costing,
        }
    }

    /// Matches `trajectory` end-to-end, yielding an empty result when no
    /// plausible path exists.
    pub fn match_trajectory(
        &self,
        trajectory: &Trajectory,
        candidates: &CandidateConfig,
    ) -> MatchResult {
        debug_time!("Matched trajectory of {} points", trajectory.len());

        let layers = LayerGenerator::new(self.network, self.costing, candidates.k, candidates.radius)
            .with_points(trajectory.points().collect());

        match self.solve(&layers, trajectory) {
            Some(solution) => MatchResult::new(self.network, &solution),
            None => MatchResult::default(),
        }
    }

    /// Decodes the most likely route through `layers`.
    ///
    /// Returns `None` when there are no layers, when some layer has no
    /// candidates, or when some layer cannot be reached from the last.
    pub fn solve(&self, layers: &Layers, trajectory: &Trajectory) -> Option<Solution> {
        let first = layers.layers.first()?;
        if layers.has_gap() {
            debug!("Trajectory has observations without candidates");
            return None;
        }

        let mut scores = first
            .candidates
            .iter()
            .map(|candidate| candidate.emission)
            .collect::<Vec<_>>();

        let mut history: Vec<Vec<Option<Arrival>>> = Vec::with_capacity(layers.layers.len());

        for (index, pair) in layers.layers.windows(2).enumerate() {
            let (previous, next) = (&pair[0], &pair[1]);
            let context = SegmentContext {
                euclidean: Euclidean.distance(previous.origin, next.origin),
                elapsed: trajectory.elapsed(index + 1),
            };

            let targets = next
                .candidates
                .iter()
                .map(|candidate| self.network.endpoints(candidate.edge).map(|(source, _)| source))
                .collect::<Option<Vec<_>>>()?;

            let mut best = vec![(f64::NEG_INFINITY, None::<Arrival>); next.candidates.len()];

            for (from, a) in previous.candidates.iter().enumerate() {
                if scores[from] == f64::NEG_INFINITY {
                    continue;
                }

                let (_, origin) = self.network.endpoints(a.edge)?;
                let remaining = (self.network.edge(a.edge).length - a.offset).max(0.0);
                let reached = self.solver.reach(self.network, origin, &targets, context);

                for (to, b) in next.candidates.iter().enumerate() {
                    let (distance, path, same_edge) = if a.edge == b.edge && a.offset <= b.offset {
                        (b.offset - a.offset, vec![], true)
                    } else {
                        match &reached[to] {
                            Some(reachable) => (
                                remaining + reachable.distance + b.offset,
                                reachable.path.clone(),
                                false,
                            ),
                            None => continue,
                        }
                    };

                    let score = scores[from]
                        + self.costing.transition(context.euclidean, distance)
                        + b.emission;

                    if score > best[to].0 {
                        best[to] = (
                            score,
                            Some(Arrival {
                                previous: from,
                                distance,
                                path,
                                same_edge,
                            }),
                        );
                    }
                }
            }

            if best.iter().all(|(score, _)| *score == f64::NEG_INFINITY) {
                debug!("Layer {} is unreachable from its predecessor", index + 1);
                return None;
            }

            let (next_scores, arrivals): (Vec<_>, Vec<_>) = best.into_iter().unzip();
            scores = next_scores;
            history.push(arrivals);
        }

        // Most likely final state, earliest on ties
        let (mut current, _) = scores
            .iter()
            .enumerate()
            .filter(|(_, score)| **score > f64::NEG_INFINITY)
            .fold(None, |best: Option<(usize, f64)>, (index, score)| match best {
                Some((_, top)) if top >= *score => best,
                _ => Some((index, *score)),
            })?;

        let mut route = Vec::with_capacity(layers.layers.len());
        let mut arrivals = Vec::with_capacity(history.len());

        for (index, layer) in layers.layers.iter().enumerate().rev() {
            route.push(layer.candidates[current]);

            if index > 0 {
                let arrival = history[index - 1][current].clone()?;
                current = arrival.previous;
                arrivals.push(arrival);
            }
        }

        route.reverse();
        arrivals.reverse();

        Some(Solution { route, arrivals })
    }
}
