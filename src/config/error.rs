use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read `{path}`: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not parse configuration document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("unsupported model `{0}`")]
    UnsupportedModel(String),

    #[error("parameter `{name}` must be finite and positive, found {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("unknown coordinate system `{0}`, expected `wgs` or `gcj`")]
    UnknownCrs(String),
}
