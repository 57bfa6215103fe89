//! Loading and validation of the matcher's configuration document.
//!
//! ```json
//! {
//!   "input": {
//!     "network": { "file": "edges.shp", "id": "id", "source": "source", "target": "target" },
//!     "ubodt": { "file": "ubodt.csv" }
//!   },
//!   "model": "fmm",
//!   "parameters": { "k": 8, "r": 300, "e": 50 }
//! }
//! ```

#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod raw;

#[doc(inline)]
pub use error::ConfigError;

use crate::coord::{Crs, Normalization};
use raw::{RawDocument, RawParameters};

use log::debug;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use strum::{Display, EnumString};

pub const DEFAULT_K: usize = 8;
pub const DEFAULT_RADIUS: f64 = 300.0;
pub const DEFAULT_GPS_ERROR: f64 = 50.0;
pub const DEFAULT_FACTOR: f64 = 1.5;
pub const DEFAULT_VMAX: f64 = 30.0;

/// The algorithm tag of a configuration document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Model {
    Stmatch,
    Fmm,
}

/// Where the road network lives, and which of its attributes name each
/// edge and its endpoints.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkConfig {
    pub file: PathBuf,
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Parameters of the candidate search, shared by both variants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandidateConfig {
    /// Maximum number of candidates kept per point.
    pub k: usize,

    /// Search radius around each point, in network units.
    pub radius: f64,

    /// Standard deviation of the GPS error, in network units.
    pub gps_error: f64,
}

impl Default for CandidateConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            radius: DEFAULT_RADIUS,
            gps_error: DEFAULT_GPS_ERROR,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StmatchConfig {
    pub candidates: CandidateConfig,

    /// Multiplier applied to the reachability bound of each transition.
    pub factor: f64,

    /// Maximum vehicle speed, in network units per second.
    pub vmax: f64,
}

impl Default for StmatchConfig {
    fn default() -> Self {
        Self {
            candidates: CandidateConfig::default(),
            factor: DEFAULT_FACTOR,
            vmax: DEFAULT_VMAX,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FmmConfig {
    pub candidates: CandidateConfig,

    /// The precomputed cost table.
    pub ubodt: PathBuf,
}

/// The closed set of matching algorithms, each with its own parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum ModelConfig {
    Stmatch(StmatchConfig),
    Fmm(FmmConfig),
}

impl ModelConfig {
    pub fn model(&self) -> Model {
        match self {
            ModelConfig::Stmatch(_) => Model::Stmatch,
            ModelConfig::Fmm(_) => Model::Fmm,
        }
    }

    pub fn candidates(&self) -> &CandidateConfig {
        match self {
            ModelConfig::Stmatch(config) => &config.candidates,
            ModelConfig::Fmm(config) => &config.candidates,
        }
    }
}

/// A validated configuration, sufficient to build a [`Matcher`](crate::Matcher).
#[derive(Clone, Debug, PartialEq)]
pub struct MatchConfig {
    pub network: NetworkConfig,
    pub normalization: Normalization,
    pub model: ModelConfig,
}

impl MatchConfig {
    /// Reads and validates the document at `path`.
    ///
    /// Relative file references resolve against the document's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        debug!("Loading configuration from {}", path.display());

        Self::parse(&text, base)
    }

    /// Validates the document `text`, resolving relative paths against `base`.
    pub fn parse(text: &str, base: &Path) -> Result<Self, ConfigError> {
        let document: RawDocument = serde_json::from_str(text)?;

        let tag = document.model.ok_or(ConfigError::MissingField("model"))?;
        let model =
            Model::from_str(&tag).map_err(|_| ConfigError::UnsupportedModel(tag.clone()))?;

        let network = document
            .input
            .network
            .ok_or(ConfigError::MissingField("input.network"))?;

        let file = network
            .file
            .ok_or(ConfigError::MissingField("input.network.file"))?;

        let normalization = Normalization::new(
            crs(document.input.trajectory.and_then(|t| t.crs))?,
            crs(network.crs)?,
        );

        let network = NetworkConfig {
            file: base.join(file),
            id: network.id.unwrap_or_else(|| "id".to_string()),
            source: network.source.unwrap_or_else(|| "source".to_string()),
            target: network.target.unwrap_or_else(|| "target".to_string()),
        };

        let candidates = candidates(&document.parameters)?;
        let model = match model {
            Model::Stmatch => ModelConfig::Stmatch(StmatchConfig {
                candidates,
                factor: positive("f", document.parameters.f.unwrap_or(DEFAULT_FACTOR))?,
                vmax: positive("vmax", document.parameters.vmax.unwrap_or(DEFAULT_VMAX))?,
            }),
            Model::Fmm => {
                let ubodt = document
                    .input
                    .ubodt
                    .and_then(|ubodt| ubodt.file)
                    .ok_or(ConfigError::MissingField("input.ubodt.file"))?;

                ModelConfig::Fmm(FmmConfig {
                    candidates,
                    ubodt: base.join(ubodt),
                })
            }
        };

        Ok(MatchConfig {
            network,
            normalization,
            model,
        })
    }
}

fn crs(value: Option<String>) -> Result<Crs, ConfigError> {
    match value {
        None => Ok(Crs::default()),
        Some(value) => Crs::from_str(&value).map_err(|_| ConfigError::UnknownCrs(value)),
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

fn candidates(parameters: &RawParameters) -> Result<CandidateConfig, ConfigError> {
    let k = parameters.k.unwrap_or(DEFAULT_K);
    if k == 0 {
        return Err(ConfigError::InvalidParameter {
            name: "k",
            value: 0.0,
        });
    }

    Ok(CandidateConfig {
        k,
        radius: positive("r", parameters.r.unwrap_or(DEFAULT_RADIUS))?,
        gps_error: positive("e", parameters.e.unwrap_or(DEFAULT_GPS_ERROR))?,
    })
}
