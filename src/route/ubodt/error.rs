use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UbodtError {
    #[error("could not access `{path}`: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed CSV table: {0}")]
    Csv(#[from] csv::Error),

    #[error("unsupported table format `{}`, expected `.csv` or `.bin`", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("binary table holds {0} trailing bytes, not a whole record")]
    Truncated(usize),

    #[error("record references node {0}, absent from the network")]
    UnknownNode(i64),

    #[error("record references edge {0}, absent from the network")]
    UnknownEdge(i64),

    #[error("record distance {0} is not a finite, non-negative number")]
    InvalidDistance(f64),
}
