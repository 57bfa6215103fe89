//! Readers for the on-disk road network formats.

use crate::config::NetworkConfig;
use crate::coord::linear::concat;
use crate::network::{Edge, NetworkError};

use geo::{Geometry, LineString, MultiLineString};
use log::debug;
use rustc_hash::FxHashMap;
use shapefile::dbase::FieldValue;
use std::path::Path;
use wkt::TryFromWkt;

/// Name of the CSV column holding each edge's WKT geometry.
pub const GEOMETRY_COLUMN: &str = "geom";

/// Reads the edges of the network described by `config`, choosing the
/// reader from the file extension.
pub fn read_edges(config: &NetworkConfig) -> Result<Vec<Edge>, NetworkError> {
    let extension = config
        .file
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("shp") => read_shapefile(&config.file, config),
        Some("csv") => read_csv(&config.file, config),
        _ => Err(NetworkError::UnsupportedFormat(config.file.clone())),
    }
}

fn integral(field: &str, row: usize, value: f64) -> Result<i64, NetworkError> {
    // `2^63` is the first float beyond `i64::MAX`
    let representable = (i64::MIN as f64..i64::MAX as f64).contains(&value);
    if representable && value.fract() == 0.0 {
        Ok(value as i64)
    } else {
        Err(NetworkError::InvalidField {
            field: field.to_string(),
            row,
            value: value.to_string(),
        })
    }
}

fn parse_integral(field: &str, row: usize, value: &str) -> Result<i64, NetworkError> {
    let value = value.trim();
    if let Ok(value) = value.parse::<i64>() {
        return Ok(value);
    }

    match value.parse::<f64>() {
        Ok(float) => integral(field, row, float),
        Err(_) => Err(NetworkError::InvalidField {
            field: field.to_string(),
            row,
            value: value.to_string(),
        }),
    }
}

fn single_line(row: usize, lines: MultiLineString) -> Result<LineString, NetworkError> {
    let mut coords = vec![];
    for line in &lines {
        concat(&mut coords, line);
    }

    if coords.len() < 2 {
        return Err(NetworkError::InvalidGeometry {
            row,
            reason: "fewer than two coordinates".to_string(),
        });
    }

    Ok(LineString::new(coords))
}

fn read_csv(path: &Path, config: &NetworkConfig) -> Result<Vec<Edge>, NetworkError> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(index, name)| (name.trim().to_string(), index))
        .collect::<FxHashMap<_, _>>();

    let column = |name: &str| {
        headers
            .get(name)
            .copied()
            .ok_or_else(|| NetworkError::MissingField(name.to_string()))
    };

    let id = column(&config.id)?;
    let source = column(&config.source)?;
    let target = column(&config.target)?;
    let geom = column(GEOMETRY_COLUMN)?;

    let mut edges = vec![];
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let field = |index: usize, name: &str| {
            record
                .get(index)
                .ok_or_else(|| NetworkError::MissingField(name.to_string()))
        };

        let geometry = Geometry::<f64>::try_from_wkt_str(field(geom, GEOMETRY_COLUMN)?)
            .map_err(|err| NetworkError::InvalidGeometry {
                row,
                reason: err.to_string(),
            })?;

        let geometry = match geometry {
            Geometry::LineString(line) => single_line(row, MultiLineString::new(vec![line]))?,
            Geometry::MultiLineString(lines) => single_line(row, lines)?,
            _ => {
                return Err(NetworkError::InvalidGeometry {
                    row,
                    reason: "expected a LINESTRING".to_string(),
                });
            }
        };

        edges.push(Edge::new(
            parse_integral(&config.id, row, field(id, &config.id)?)?,
            parse_integral(&config.source, row, field(source, &config.source)?)?,
            parse_integral(&config.target, row, field(target, &config.target)?)?,
            geometry,
        ));
    }

    debug!("Read {} edges from {}", edges.len(), path.display());
    Ok(edges)
}

fn attribute(
    record: &shapefile::dbase::Record,
    name: &str,
    row: usize,
) -> Result<i64, NetworkError> {
    let value = record
        .get(name)
        .ok_or_else(|| NetworkError::MissingField(name.to_string()))?;

    match value {
        FieldValue::Numeric(Some(value)) => integral(name, row, *value),
        FieldValue::Double(value) => integral(name, row, *value),
        FieldValue::Float(Some(value)) => integral(name, row, f64::from(*value)),
        FieldValue::Integer(value) => Ok(i64::from(*value)),
        FieldValue::Character(Some(value)) => parse_integral(name, row, value),
        other => Err(NetworkError::InvalidField {
            field: name.to_string(),
            row,
            value: format!("{other:?}"),
        }),
    }
}

fn read_shapefile(path: &Path, config: &NetworkConfig) -> Result<Vec<Edge>, NetworkError> {
    let rows = shapefile::read(path)?;

    let mut edges = Vec::with_capacity(rows.len());
    for (row, (shape, record)) in rows.into_iter().enumerate() {
        let invalid = |reason: String| NetworkError::InvalidGeometry { row, reason };

        let lines: MultiLineString = match shape {
            shapefile::Shape::Polyline(line) => line.into(),
            shapefile::Shape::PolylineM(line) => line.into(),
            shapefile::Shape::PolylineZ(line) => line.into(),
            other => {
                return Err(invalid(format!(
                    "unexpected shape type {}, must be a polyline",
                    other.shapetype()
                )));
            }
        };

        edges.push(Edge::new(
            attribute(&record, &config.id, row)?,
            attribute(&record, &config.source, row)?,
            attribute(&record, &config.target, row)?,
            single_line(row, lines)?,
        ));
    }

    debug!("Read {} edges from {}", edges.len(), path.display());
    Ok(edges)
}
