//! The trajectory to be matched, and its wire decoding.
//!
//! A trajectory arrives as a WKT `LINESTRING` of `(longitude, latitude)`
//! pairs, one line per request.

use geo::{Coord, Geometry, LineString, Point};
use thiserror::Error;
use wkt::TryFromWkt;


#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrajectoryError {
    #[error("could not parse WKT: {0}")]
    Parse(String),

    #[error("expected a LINESTRING, found {0}")]
    NotLineString(&'static str),

    #[error("coordinate {index} is not finite")]
    NonFinite { index: usize },

    #[error("{timestamps} timestamps given for {points} points")]
    TimestampMismatch { points: usize, timestamps: usize },
}

/// An ordered sequence of GPS fixes.
///
/// Timestamps are optional, and only refine the reachability bound of the
/// `stmatch` variant. Requests arriving over the wire never carry them.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    pub geometry: LineString,
    pub timestamps: Option<Vec<f64>>,
}

impl Default for Trajectory {
    fn default() -> Self {
        Self::new(LineString::new(vec![]))
    }
}

impl Trajectory {
    pub fn new(geometry: LineString) -> Self {
        Self {
            geometry,
            timestamps: None,
        }
    }

    /// Attaches one timestamp, in seconds, per point.
    pub fn with_timestamps(self, timestamps: Vec<f64>) -> Result<Self, TrajectoryError> {
        let points = self.geometry.0.len();
        if timestamps.len() != points {
            return Err(TrajectoryError::TimestampMismatch {
                points,
                timestamps: timestamps.len(),
            });
        }

        Ok(Self {
            timestamps: Some(timestamps),
            ..self
        })
    }

    /// Decodes a trajectory from its WKT encoding.
    ///
    /// ```rust
    /// use snapline::Trajectory;
    ///
    /// let trajectory = Trajectory::from_wkt("LINESTRING (1 2, 3 4)").unwrap();
    /// assert_eq!(trajectory.len(), 2);
    /// ```
    pub fn from_wkt(text: &str) -> Result<Self, TrajectoryError> {
        let geometry = Geometry::<f64>::try_from_wkt_str(text.trim())
            .map_err(|err| TrajectoryError::Parse(err.to_string()))?;

        let Geometry::LineString(geometry) = geometry else {
            return Err(TrajectoryError::NotLineString(kind(&geometry)));
        };

        if let Some(index) = geometry
            .coords()
            .position(|Coord { x, y }| !x.is_finite() || !y.is_finite())
        {
            return Err(TrajectoryError::NonFinite { index });
        }

        Ok(Self::new(geometry))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.geometry.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.geometry.0.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.geometry.points()
    }

    /// Seconds elapsed between point `index - 1` and point `index`.
    pub fn elapsed(&self, index: usize) -> Option<f64> {
        let timestamps = self.timestamps.as_ref()?;
        let previous = timestamps.get(index.checked_sub(1)?)?;

        timestamps.get(index).map(|current| current - previous)
    }
}

fn kind(geometry: &Geometry) -> &'static str {
    match geometry {
        Geometry::Point(_) => "POINT",
        Geometry::LineString(_) => "LINESTRING",
        Geometry::Polygon(_) => "POLYGON",
        Geometry::MultiPoint(_) => "MULTIPOINT",
        Geometry::MultiLineString(_) => "MULTILINESTRING",
        Geometry::MultiPolygon(_) => "MULTIPOLYGON",
        Geometry::GeometryCollection(_) => "GEOMETRYCOLLECTION",
        _ => "GEOMETRY",
    }
}
