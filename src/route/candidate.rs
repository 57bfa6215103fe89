use crate::network::{Network, Scan};
use crate::route::costing::{Costing, EmissionStrategy, TransitionStrategy};

use geo::Point;
use log::debug;
use rayon::prelude::*;
use wkt::ToWkt;

/// A position upon the network which an observation may be matched onto.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Index of the edge within the network.
    pub edge: usize,

    /// The observation projected onto the edge.
    pub position: Point,

    /// Distance from the observation to [`Candidate::position`].
    pub distance: f64,

    /// Distance along the edge from its source to [`Candidate::position`].
    pub offset: f64,

    /// Log-probability of emitting the observation from this candidate.
    pub emission: f64,
}

/// The candidates of a single observation.
#[derive(Clone, Debug)]
pub struct Layer {
    pub origin: Point,
    pub candidates: Vec<Candidate>,
}

#[derive(Clone, Debug, Default)]
pub struct Layers {
    pub layers: Vec<Layer>,
}

impl Layers {
    /// Whether some observation has nowhere to be matched onto.
    pub fn has_gap(&self) -> bool {
        self.layers.iter().any(|layer| layer.candidates.is_empty())
    }
}

impl FromParallelIterator<Layer> for Layers {
    fn from_par_iter<I>(layers: I) -> Self
    where
        I: IntoParallelIterator<Item = Layer>,
    {
        let layers = layers.into_par_iter().collect::<Vec<Layer>>();
        Self { layers }
    }
}

/// Generates one layer of candidates per observation: the `k` closest
/// projections onto edges no further than `radius` away.
pub struct LayerGenerator<'a, E, T>
where
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    network: &'a Network,
    costing: &'a Costing<E, T>,

    k: usize,
    radius: f64,
}

impl<'a, E, T> LayerGenerator<'a, E, T>
where
    E: EmissionStrategy + Send + Sync,
    T: TransitionStrategy + Send + Sync,
{
    pub fn new(network: &'a Network, costing: &'a Costing<E, T>, k: usize, radius: f64) -> Self {
        Self {
            network,
            costing,
            k,
            radius,
        }
    }

    pub fn with_points(&self, input: Vec<Point>) -> Layers {
        input
            .into_par_iter()
            .enumerate()
            .map(|(layer_id, origin)| {
                let candidates = self
                    .network
                    .candidates(&origin, self.k, self.radius)
                    .into_iter()
                    .map(|(edge, projection)| Candidate {
                        edge,
                        position: projection.point,
                        distance: projection.distance,
                        offset: projection.offset,
                        emission: self.costing.emission(projection.distance),
                    })
                    .collect::<Vec<_>>();

                debug!(
                    "Generated layer {} with {} candidates (Point={})",
                    layer_id,
                    candidates.len(),
                    origin.wkt_string()
                );

                Layer { origin, candidates }
            })
            .collect::<Layers>()
    }
}
