//! The upper-bounded origin-destination table (UBODT).
//!
//! Holds, for every pair of nodes no further than `delta` apart, the
//! shortest distance between them and the first step of the path. Full
//! paths are recovered by repeatedly following the first step.

#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod io;
#[doc(hidden)]
pub mod record;
#[cfg(test)]
mod test;

#[doc(inline)]
pub use error::UbodtError;
#[doc(inline)]
pub use record::Record;

use crate::network::Network;
use crate::route::primitives::Dijkstra;

use itertools::Itertools;
use log::info;
use measure_time::info_time;
use petgraph::graph::NodeIndex;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// The shortest path between an origin and a destination, by its first step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entry {
    pub next_node: NodeIndex,
    pub prev_node: NodeIndex,
    pub next_edge: usize,
    pub distance: f64,
}

#[derive(Debug, Default)]
pub struct Ubodt {
    entries: FxHashMap<(NodeIndex, NodeIndex), Entry>,
    delta: f64,
}

impl Ubodt {
    /// Precomputes the table for every node of `network`, one bounded
    /// search per origin.
    pub fn generate(network: &Network, delta: f64) -> Self {
        info_time!("Generated UBODT (delta={delta})");

        let origins = network.node_indices().collect::<Vec<_>>();
        let entries = origins
            .into_par_iter()
            .flat_map_iter(|origin| {
                let tree = Dijkstra::new(delta).reach(network, origin);

                tree.reached()
                    .filter_map(|(destination, distance)| {
                        let path = tree.path(destination)?;
                        let next_edge = *path.first()?;
                        let (_, next_node) = network.endpoints(next_edge)?;

                        let entry = Entry {
                            next_node,
                            prev_node: tree.parent(destination)?,
                            next_edge,
                            distance,
                        };

                        Some(((origin, destination), entry))
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<FxHashMap<_, _>>();

        info!("UBODT holds {} records", entries.len());
        Self { entries, delta }
    }

    /// Validates externally named `records` against `network`.
    pub fn from_records(
        network: &Network,
        records: impl IntoIterator<Item = Record>,
    ) -> Result<Self, UbodtError> {
        let node = |id: i64| network.node_index(id).ok_or(UbodtError::UnknownNode(id));

        let mut entries = FxHashMap::default();
        let mut delta: f64 = 0.0;

        for record in records {
            if !record.distance.is_finite() || record.distance < 0.0 {
                return Err(UbodtError::InvalidDistance(record.distance));
            }

            let entry = Entry {
                next_node: node(record.next_n)?,
                prev_node: node(record.prev_n)?,
                next_edge: network
                    .edge_index(record.next_e)
                    .ok_or(UbodtError::UnknownEdge(record.next_e))?,
                distance: record.distance,
            };

            delta = delta.max(record.distance);
            entries.insert((node(record.source)?, node(record.target)?), entry);
        }

        Ok(Self { entries, delta })
    }

    /// Every entry, named by external ids, ordered by origin then destination.
    pub fn records<'a>(&'a self, network: &'a Network) -> impl Iterator<Item = Record> + 'a {
        self.entries
            .iter()
            .map(|((source, target), entry)| Record {
                source: network.node_id(*source),
                target: network.node_id(*target),
                next_n: network.node_id(entry.next_node),
                prev_n: network.node_id(entry.prev_node),
                next_e: network.edge(entry.next_edge).fid,
                distance: entry.distance,
            })
            .sorted_by_key(|record| (record.source, record.target))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The largest distance the table covers.
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    #[inline]
    pub fn lookup(&self, source: NodeIndex, target: NodeIndex) -> Option<&Entry> {
        self.entries.get(&(source, target))
    }

    /// The edges of the shortest path from `source` to `target`.
    ///
    /// Empty when both are the same node, and `None` when the pair is
    /// absent from the table.
    pub fn path(&self, network: &Network, source: NodeIndex, target: NodeIndex) -> Option<Vec<usize>> {
        let mut edges = vec![];
        let mut current = source;

        while current != target {
            let entry = self.lookup(current, target)?;
            edges.push(entry.next_edge);

            // Each step must leave through its recorded edge
            let (from, to) = network.endpoints(entry.next_edge)?;
            if from != current || edges.len() > network.node_count() {
                return None;
            }

            current = to;
        }

        Some(edges)
    }
}
