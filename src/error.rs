use crate::config::ConfigError;
use crate::impl_err;
use crate::network::NetworkError;
use crate::route::EngineError;
use crate::trajectory::TrajectoryError;

use thiserror::Error;

/// Top-level failure of the service.
///
/// Every variant except [`Error::Trajectory`] is a startup failure, and is
/// fatal before the listening socket is bound. A trajectory which matches
/// nothing is not an error, see [`MatchResult::is_empty`](crate::MatchResult::is_empty).
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(ConfigError),

    #[error("unsupported model `{0}`, expected one of `stmatch` or `fmm`")]
    UnsupportedModel(String),

    #[error("could not load network: {0}")]
    NetworkLoad(NetworkError),

    #[error("could not initialise matching engine: {0}")]
    EngineInit(EngineError),

    #[error("malformed trajectory: {0}")]
    Trajectory(TrajectoryError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for Error {
    fn from(value: ConfigError) -> Self {
        match value {
            ConfigError::UnsupportedModel(model) => Error::UnsupportedModel(model),
            other => Error::Config(other),
        }
    }
}

impl_err!(NetworkError, NetworkLoad);
impl_err!(EngineError, EngineInit);
impl_err!(TrajectoryError, Trajectory);
