//! The configuration document as written on disk.
//!
//! Every field is optional here so that absent values surface as
//! [`ConfigError::MissingField`](super::ConfigError::MissingField) during
//! validation, instead of as opaque parse failures.

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawDocument {
    pub input: RawInput,
    pub model: Option<String>,
    pub parameters: RawParameters,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawInput {
    pub network: Option<RawNetwork>,
    pub ubodt: Option<RawFile>,
    pub trajectory: Option<RawTrajectory>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawNetwork {
    pub file: Option<PathBuf>,
    pub id: Option<String>,
    pub source: Option<String>,
    pub target: Option<String>,
    pub crs: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawFile {
    pub file: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawTrajectory {
    pub crs: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawParameters {
    pub k: Option<usize>,
    pub r: Option<f64>,
    pub e: Option<f64>,
    pub f: Option<f64>,
    pub vmax: Option<f64>,
}
