use crate::network::Network;

use petgraph::graph::NodeIndex;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug)]
struct SmallestHolder {
    cost: f64,
    node: NodeIndex,
}

impl PartialEq for SmallestHolder {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cost.total_cmp(&other.cost) == Ordering::Equal
    }
}

impl Eq for SmallestHolder {}

impl PartialOrd for SmallestHolder {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestHolder {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.total_cmp(&self.cost)
    }
}

/// The settled nodes of a bounded search, rooted at [`ShortestPathTree::root`].
#[derive(Debug, Default)]
pub struct ShortestPathTree {
    pub root: NodeIndex,

    /// Shortest distance to every settled node.
    distances: FxHashMap<NodeIndex, f64>,

    /// The edge, and node, each settled node was reached through.
    parents: FxHashMap<NodeIndex, (usize, NodeIndex)>,
}

impl ShortestPathTree {
    #[inline]
    pub fn distance(&self, node: NodeIndex) -> Option<f64> {
        self.distances.get(&node).copied()
    }

    /// The node preceding `node` upon its shortest path.
    #[inline]
    pub fn parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.parents.get(&node).map(|(_, parent)| *parent)
    }

    /// The edges, in travel order, of the shortest path to `node`.
    ///
    /// Empty for the root itself, and `None` for unsettled nodes.
    pub fn path(&self, node: NodeIndex) -> Option<Vec<usize>> {
        self.distances.get(&node)?;

        let mut edges = vec![];
        let mut current = node;
        while let Some((edge, parent)) = self.parents.get(&current) {
            edges.push(*edge);
            current = *parent;
        }

        edges.reverse();
        Some(edges)
    }

    /// Every settled node other than the root.
    pub fn reached(&self) -> impl Iterator<Item = (NodeIndex, f64)> + '_ {
        self.distances
            .iter()
            .filter(|(node, _)| **node != self.root)
            .map(|(node, distance)| (*node, *distance))
    }
}

/// Shortest paths over the network, abandoned beyond a distance bound.
#[derive(Clone, Copy, Debug)]
pub struct Dijkstra {
    pub bound: f64,
}

impl Dijkstra {
    pub fn new(bound: f64) -> Self {
        Self { bound }
    }

    /// Settles every node within the bound of `start`.
    pub fn reach(&self, network: &Network, start: NodeIndex) -> ShortestPathTree {
        self.search(network, start, None)
    }

    /// Settles nodes within the bound of `start`, stopping early once every
    /// one of `targets` is settled.
    pub fn reach_until(
        &self,
        network: &Network,
        start: NodeIndex,
        targets: &[NodeIndex],
    ) -> ShortestPathTree {
        let remaining = targets.iter().copied().collect::<FxHashSet<_>>();
        self.search(network, start, Some(remaining))
    }

    fn search(
        &self,
        network: &Network,
        start: NodeIndex,
        mut remaining: Option<FxHashSet<NodeIndex>>,
    ) -> ShortestPathTree {
        let mut tree = ShortestPathTree {
            root: start,
            ..ShortestPathTree::default()
        };

        let mut best = FxHashMap::default();
        let mut to_see = BinaryHeap::with_capacity(64);

        best.insert(start, 0.0);
        to_see.push(SmallestHolder {
            cost: 0.0,
            node: start,
        });

        while let Some(SmallestHolder { cost, node }) = to_see.pop() {
            if tree.distances.contains_key(&node) {
                continue;
            }

            tree.distances.insert(node, cost);

            if let Some(remaining) = remaining.as_mut() {
                remaining.remove(&node);
                if remaining.is_empty() {
                    break;
                }
            }

            for (edge, successor, length) in network.outgoing(node) {
                let next = cost + length;
                if next > self.bound || tree.distances.contains_key(&successor) {
                    continue;
                }

                if best.get(&successor).is_none_or(|current| next < *current) {
                    best.insert(successor, next);
                    tree.parents.insert(successor, (edge, node));
                    to_see.push(SmallestHolder {
                        cost: next,
                        node: successor,
                    });
                }
            }
        }

        tree
    }
}
