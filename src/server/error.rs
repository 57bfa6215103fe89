use crate::codec::CodecError;
use crate::trajectory::TrajectoryError;

use thiserror::Error;

/// Why a connection was closed without a response.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("connection failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("request not received within {0:?}")]
    Timeout(std::time::Duration),

    #[error("request exceeds {0} bytes")]
    Oversized(usize),

    #[error("request is empty")]
    Empty,

    #[error("request is not valid UTF-8")]
    Encoding,

    #[error("malformed trajectory: {0}")]
    Trajectory(#[from] TrajectoryError),

    #[error("could not encode response: {0}")]
    Codec(#[from] CodecError),

    #[error("matching worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
