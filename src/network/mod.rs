//! The road network: a directed multigraph of road segments, bound once
//! at startup and shared read-only by every match.

#[doc(hidden)]
pub mod edge;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod scan;
#[doc(hidden)]
pub mod source;

#[doc(inline)]
pub use edge::Edge;
#[doc(inline)]
pub use error::NetworkError;
#[doc(inline)]
pub use scan::Scan;

use crate::config::NetworkConfig;
use edge::IndexedEdge;

use log::info;
use measure_time::info_time;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use rstar::RTree;
use rustc_hash::FxHashMap;

/// The road network graph.
///
/// Nodes carry their external id, and the `n`-th graph edge is the `n`-th
/// entry of [`Network::edges`], weighted by its length.
pub struct Network {
    edges: Vec<Edge>,
    fids: FxHashMap<i64, usize>,
    nodes: FxHashMap<i64, NodeIndex>,
    graph: DiGraph<i64, f64>,
    index: RTree<IndexedEdge>,
}

impl Network {
    /// Loads the network described by `config`.
    ///
    /// This is proportional to the size of the network, and should be
    /// performed once.
    pub fn load(config: &NetworkConfig) -> Result<Self, NetworkError> {
        info_time!("Loaded network from {}", config.file.display());

        let edges = source::read_edges(config)?;
        Self::from_edges(edges)
    }

    /// Builds the graph and spatial index over `edges`.
    pub fn from_edges(edges: Vec<Edge>) -> Result<Self, NetworkError> {
        if edges.is_empty() {
            return Err(NetworkError::Empty);
        }

        let mut fids = FxHashMap::default();
        let mut nodes = FxHashMap::default();
        let mut graph = DiGraph::with_capacity(edges.len(), edges.len());

        for (index, edge) in edges.iter().enumerate() {
            if fids.insert(edge.fid, index).is_some() {
                return Err(NetworkError::DuplicateEdge(edge.fid));
            }

            let source = *nodes
                .entry(edge.source)
                .or_insert_with(|| graph.add_node(edge.source));
            let target = *nodes
                .entry(edge.target)
                .or_insert_with(|| graph.add_node(edge.target));

            graph.add_edge(source, target, edge.length);
        }

        let index = RTree::bulk_load(
            edges
                .iter()
                .enumerate()
                .map(|(index, edge)| IndexedEdge::new(index, edge))
                .collect(),
        );

        info!(
            "Network holds {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Network {
            edges,
            fids,
            nodes,
            graph,
            index,
        })
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn edge(&self, index: usize) -> &Edge {
        &self.edges[index]
    }

    /// The position within [`Network::edges`] of the edge with id `fid`.
    #[inline]
    pub fn edge_index(&self, fid: i64) -> Option<usize> {
        self.fids.get(&fid).copied()
    }

    #[inline]
    pub fn node_index(&self, id: i64) -> Option<NodeIndex> {
        self.nodes.get(&id).copied()
    }

    #[inline]
    pub fn node_id(&self, node: NodeIndex) -> i64 {
        self.graph[node]
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Every node of the network, by graph index.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// The graph endpoints of the edge at `index`.
    pub fn endpoints(&self, index: usize) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(EdgeIndex::new(index))
    }

    /// The edges leaving `node`, as `(edge index, target node, length)`.
    pub fn outgoing(&self, node: NodeIndex) -> impl Iterator<Item = (usize, NodeIndex, f64)> + '_ {
        self.graph
            .edges(node)
            .map(|edge| (edge.id().index(), edge.target(), *edge.weight()))
    }

    pub(crate) fn index(&self) -> &RTree<IndexedEdge> {
        &self.index
    }
}
