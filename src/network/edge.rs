use geo::{Euclidean, Length, LineString, Point};
use rstar::{AABB, RTreeObject};

/// A directed road segment.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    /// The stable external identifier, reported in match results.
    pub fid: i64,

    pub source: i64,
    pub target: i64,

    pub geometry: LineString,

    /// Planar length of [`Edge::geometry`], in coordinate units.
    pub length: f64,
}

impl Edge {
    pub fn new(fid: i64, source: i64, target: i64, geometry: LineString) -> Self {
        let length = Euclidean.length(&geometry);

        Self {
            fid,
            source,
            target,
            geometry,
            length,
        }
    }
}

/// The bounding box of an edge, as stored in the spatial index.
#[derive(Clone, Copy, Debug)]
pub struct IndexedEdge {
    pub index: usize,
    envelope: AABB<Point>,
}

impl IndexedEdge {
    pub fn new(index: usize, edge: &Edge) -> Self {
        let points = edge.geometry.points().collect::<Vec<_>>();

        Self {
            index,
            envelope: AABB::from_points(&points),
        }
    }
}

impl RTreeObject for IndexedEdge {
    type Envelope = AABB<Point>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}
