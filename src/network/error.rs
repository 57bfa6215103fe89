use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("could not read CSV network: {0}")]
    Csv(#[from] csv::Error),

    #[error("could not read shapefile network: {0}")]
    Shapefile(#[from] shapefile::Error),

    #[error("unsupported network format `{}`, expected `.shp` or `.csv`", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("required field `{0}` is absent")]
    MissingField(String),

    #[error("field `{field}` of row {row} is not an integer: {value}")]
    InvalidField {
        field: String,
        row: usize,
        value: String,
    },

    #[error("geometry of row {row} is unusable: {reason}")]
    InvalidGeometry { row: usize, reason: String },

    #[error("edge id {0} appears more than once")]
    DuplicateEdge(i64),

    #[error("network contains no edges")]
    Empty,
}
