//! Planar linear referencing upon polylines.
//!
//! All distances are measured in the units of the coordinates themselves,
//! matching the units of the road network's edge lengths.

use geo::{
    Coord, Distance, Euclidean, Length, LineInterpolatePoint, LineLocatePoint, LineString, Point,
};

/// A position projected onto a polyline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// The closest position upon the polyline.
    pub point: Point,

    /// Distance between the original position and [`Projection::point`].
    pub distance: f64,

    /// Distance travelled along the polyline, from its first coordinate,
    /// to reach [`Projection::point`].
    pub offset: f64,
}

/// Projects `point` onto the closest position of `line`.
///
/// Returns `None` for a polyline without coordinates.
pub fn project(line: &LineString, point: Point) -> Option<Projection> {
    let first = *line.0.first()?;
    let length = Euclidean.length(line);

    // A collapsed polyline has a single position to project onto
    let (fraction, position) = if length > 0.0 {
        let fraction = line.line_locate_point(&point)?;
        (fraction, line.line_interpolate_point(fraction)?)
    } else {
        (0.0, Point(first))
    };

    Some(Projection {
        point: position,
        distance: Euclidean.distance(point, position),
        offset: fraction * length,
    })
}

/// Interpolates the coordinate `offset` units along `line`.
///
/// Offsets outside the polyline are clamped to its ends.
pub fn interpolate(line: &LineString, offset: f64) -> Option<Coord> {
    let length = Euclidean.length(line);
    if length <= 0.0 {
        return line.0.first().copied();
    }

    line.line_interpolate_point((offset / length).clamp(0.0, 1.0))
        .map(|point| point.0)
}

/// Extracts the portion of `line` between the `start` and `end` offsets.
///
/// The result always holds at least two coordinates, such that a zero-length
/// portion is still a valid polyline, repeating the single position.
pub fn substring(line: &LineString, start: f64, end: f64) -> LineString {
    let (start, end) = if start <= end { (start, end) } else { (end, start) };

    let Some(first) = interpolate(line, start) else {
        return LineString::new(vec![]);
    };

    let mut coords = vec![first];
    let mut travelled = 0.0;

    for segment in line.lines() {
        travelled += Euclidean.length(&segment);

        // Interior vertices strictly within the requested window
        if travelled > start && travelled < end {
            coords.push(segment.end);
        }
    }

    if let Some(last) = interpolate(line, end) {
        coords.push(last);
    }

    coords.dedup();
    if coords.len() == 1 {
        coords.push(first);
    }

    LineString::new(coords)
}

/// Appends `tail` onto `head`, skipping the first coordinate of `tail`
/// when it repeats the final coordinate of `head`.
pub fn concat(head: &mut Vec<Coord>, tail: &LineString) {
    let mut coords = tail.coords().copied();

    if let (Some(last), Some(first)) = (head.last().copied(), tail.0.first().copied()) {
        if last == first {
            coords.next();
        }
    }

    head.extend(coords);
}
