use crate::coord::linear::{Projection, project};
use crate::network::{Edge, Network};

use geo::Point;
use itertools::Itertools;
use rstar::AABB;

/// Spatial queries over the edges of a network.
pub trait Scan {
    /// Finds all edges whose bounding box intersects the square of
    /// half-width `distance` centred on `point`.
    fn nearest_edges(&self, point: &Point, distance: f64) -> impl Iterator<Item = (usize, &Edge)>;

    /// Projects `point` onto every edge within `distance`, keeping only
    /// the projections which land no further than `distance` away.
    fn nearest_projections(
        &self,
        point: &Point,
        distance: f64,
    ) -> impl Iterator<Item = (usize, Projection)>;

    /// The `k` closest projections within `distance`, closest first.
    /// Equidistant projections are ordered by edge id.
    fn candidates(&self, point: &Point, k: usize, distance: f64) -> Vec<(usize, Projection)>;
}

impl Scan for Network {
    #[inline]
    fn nearest_edges(&self, point: &Point, distance: f64) -> impl Iterator<Item = (usize, &Edge)> {
        let bottom_left = Point::new(point.x() - distance, point.y() - distance);
        let top_right = Point::new(point.x() + distance, point.y() + distance);

        let bbox = AABB::from_corners(bottom_left, top_right);
        self.index()
            .locate_in_envelope_intersecting(&bbox)
            .map(|indexed| (indexed.index, self.edge(indexed.index)))
    }

    #[inline]
    fn nearest_projections(
        &self,
        point: &Point,
        distance: f64,
    ) -> impl Iterator<Item = (usize, Projection)> {
        self.nearest_edges(point, distance)
            .filter_map(move |(index, edge)| {
                project(&edge.geometry, *point).map(|projection| (index, projection))
            })
            .filter(move |(_, projection)| projection.distance <= distance)
    }

    fn candidates(&self, point: &Point, k: usize, distance: f64) -> Vec<(usize, Projection)> {
        self.nearest_projections(point, distance)
            .sorted_by(|(a_index, a), (b_index, b)| {
                a.distance
                    .total_cmp(&b.distance)
                    .then_with(|| self.edge(*a_index).fid.cmp(&self.edge(*b_index).fid))
            })
            .take(k)
            .collect()
    }
}
