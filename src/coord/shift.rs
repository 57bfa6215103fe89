//! Offset transform between WGS-84 and the regionally shifted GCJ-02
//! coordinate system.
//!
//! The shift is an empirical, smooth correction which only applies inside
//! a fixed rectangle covering the target region. Outside of it, both
//! directions are the identity.
//!
//! ```rust
//! use snapline::coord::shift::{to_original, to_shifted};
//!
//! let (lat, lng) = (45.74, 126.60);
//! let (s_lat, s_lng) = to_shifted(lat, lng);
//! let (o_lat, o_lng) = to_original(s_lat, s_lng);
//!
//! assert!((o_lat - lat).abs() < 1e-6);
//! assert!((o_lng - lng).abs() < 1e-6);
//! ```

use geo::{Coord, LineString};
use std::f64::consts::PI;
use strum::{Display, EnumString};

/// Equatorial radius of the reference ellipsoid, in meters.
const EARTH_RADIUS: f64 = 6378137.0;

/// First eccentricity squared of the reference ellipsoid.
const EE: f64 = 0.00669342162296594323;

/// `(min_lng, max_lng, min_lat, max_lat)` of the shifted region.
const REGION: (f64, f64, f64, f64) = (72.004, 137.8347, 0.8293, 55.8271);

/// Refinement steps of the inverse before giving up on convergence.
const MAX_INVERSE_ITERATIONS: usize = 10;
const INVERSE_TOLERANCE: f64 = 1e-12;

/// Whether the coordinate lies outside the rectangle the shift applies to.
#[inline]
pub fn out_of_region(lat: f64, lng: f64) -> bool {
    let (min_lng, max_lng, min_lat, max_lat) = REGION;
    !((min_lng..=max_lng).contains(&lng) && (min_lat..=max_lat).contains(&lat))
}

/// Raw correction, in the pre-scaled unit, for coordinates relative to
/// the region origin `(105, 35)`.
fn correction(x: f64, y: f64) -> (f64, f64) {
    let xy = x * y;
    let abs_x = x.abs().sqrt();
    let x_pi = x * PI;
    let y_pi = y * PI;
    let d = 20.0 * (6.0 * x_pi).sin() + 20.0 * (2.0 * x_pi).sin();

    let mut lat = d;
    let mut lng = d;

    lat += 20.0 * y_pi.sin() + 40.0 * (y_pi / 3.0).sin();
    lng += 20.0 * x_pi.sin() + 40.0 * (x_pi / 3.0).sin();

    lat += 160.0 * (y_pi / 12.0).sin() + 320.0 * (y_pi / 30.0).sin();
    lng += 150.0 * (x_pi / 12.0).sin() + 300.0 * (x_pi / 30.0).sin();

    lat *= 2.0 / 3.0;
    lng *= 2.0 / 3.0;

    lat += -100.0 + 2.0 * x + 3.0 * y + 0.2 * y * y + 0.1 * xy + 0.2 * abs_x;
    lng += 300.0 + x + 2.0 * y + 0.1 * x * x + 0.1 * xy + 0.1 * abs_x;

    (lat, lng)
}

/// The `(d_lat, d_lng)` offset, in degrees, at the given coordinate.
///
/// The raw correction is rescaled by the meridian and parallel radii of
/// curvature of the reference ellipsoid at `lat`.
pub fn delta(lat: f64, lng: f64) -> (f64, f64) {
    let (d_lat, d_lng) = correction(lng - 105.0, lat - 35.0);

    let rad_lat = lat / 180.0 * PI;
    let magic = rad_lat.sin();
    let magic = 1.0 - EE * magic * magic;
    let sqrt_magic = magic.sqrt();

    let d_lat = (d_lat * 180.0) / ((EARTH_RADIUS * (1.0 - EE)) / (magic * sqrt_magic) * PI);
    let d_lng = (d_lng * 180.0) / (EARTH_RADIUS / sqrt_magic * rad_lat.cos() * PI);

    (d_lat, d_lng)
}

/// Converts a WGS-84 coordinate into the shifted system.
pub fn to_shifted(lat: f64, lng: f64) -> (f64, f64) {
    if out_of_region(lat, lng) {
        return (lat, lng);
    }

    let (d_lat, d_lng) = delta(lat, lng);
    (lat + d_lat, lng + d_lng)
}

/// Converts a shifted coordinate back into WGS-84.
///
/// Starts from the single-step estimate `p - delta(p)`, then refines it
/// until shifting the estimate reproduces the input.
pub fn to_original(lat: f64, lng: f64) -> (f64, f64) {
    if out_of_region(lat, lng) {
        return (lat, lng);
    }

    let (d_lat, d_lng) = delta(lat, lng);
    let (mut o_lat, mut o_lng) = (lat - d_lat, lng - d_lng);

    for _ in 0..MAX_INVERSE_ITERATIONS {
        let (d_lat, d_lng) = delta(o_lat, o_lng);
        let e_lat = o_lat + d_lat - lat;
        let e_lng = o_lng + d_lng - lng;

        o_lat -= e_lat;
        o_lng -= e_lng;

        if e_lat.abs() < INVERSE_TOLERANCE && e_lng.abs() < INVERSE_TOLERANCE {
            break;
        }
    }

    (o_lat, o_lng)
}

/// A coordinate reference system understood by the service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Crs {
    /// WGS-84 longitude / latitude.
    #[default]
    Wgs,
    /// The regionally shifted system (GCJ-02).
    Gcj,
}

impl Crs {
    /// Converts a `(lng, lat)` coordinate from this system into `target`.
    pub fn convert(self, coord: Coord, target: Crs) -> Coord {
        let (lat, lng) = match (self, target) {
            (Crs::Wgs, Crs::Gcj) => to_shifted(coord.y, coord.x),
            (Crs::Gcj, Crs::Wgs) => to_original(coord.y, coord.x),
            _ => return coord,
        };

        Coord { x: lng, y: lat }
    }
}

/// Moves geometries between the system trajectories arrive in and the
/// system the road network is stored in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Normalization {
    pub trajectory: Crs,
    pub network: Crs,
}

impl Normalization {
    pub fn new(trajectory: Crs, network: Crs) -> Self {
        Self {
            trajectory,
            network,
        }
    }

    /// Whether both systems agree, and no conversion takes place.
    pub fn is_identity(&self) -> bool {
        self.trajectory == self.network
    }

    /// Converts an incoming trajectory geometry into the network's system.
    pub fn ingest(&self, geometry: &LineString) -> LineString {
        self.apply(geometry, self.trajectory, self.network)
    }

    /// Converts a network-space geometry into the trajectory's system.
    pub fn export(&self, geometry: &LineString) -> LineString {
        self.apply(geometry, self.network, self.trajectory)
    }

    fn apply(&self, geometry: &LineString, from: Crs, to: Crs) -> LineString {
        if from == to {
            return geometry.clone();
        }

        geometry
            .coords()
            .map(|coord| from.convert(*coord, to))
            .collect::<LineString>()
    }
}
