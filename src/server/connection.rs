//! A single connection: one request line in, one response out, closed.

use crate::codec::Response;
use crate::matcher::Matcher;
use crate::server::{ProtocolError, ServerConfig};
use crate::trajectory::Trajectory;

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::{Level, debug, instrument};

/// Reads one newline-terminated request of at most `limit` bytes, not
/// counting its `\n` or `\r\n` terminator.
///
/// A final line terminated by the end of the stream is accepted.
pub async fn read_request<R>(reader: R, limit: usize) -> Result<String, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let mut line = Vec::new();
    let mut reader = BufReader::new(reader.take((limit as u64).saturating_add(2)));
    reader.read_until(b'\n', &mut line).await?;

    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }

    if line.len() > limit {
        return Err(ProtocolError::Oversized(limit));
    }

    let text = String::from_utf8(line).map_err(|_| ProtocolError::Encoding)?;
    if text.trim().is_empty() {
        return Err(ProtocolError::Empty);
    }

    Ok(text)
}

/// Serves the request on `stream`.
///
/// On error, nothing has been written, and dropping the stream closes the
/// connection without a response.
#[instrument(level = Level::DEBUG, skip_all, fields(%peer))]
pub async fn handle(
    stream: TcpStream,
    peer: SocketAddr,
    matcher: Arc<Matcher>,
    config: ServerConfig,
) -> Result<(), ProtocolError> {
    let (reader, mut writer) = stream.into_split();

    let request = tokio::time::timeout(
        config.read_timeout,
        read_request(reader, config.max_request_bytes),
    )
    .await
    .map_err(|_| ProtocolError::Timeout(config.read_timeout))??;

    let trajectory = Trajectory::from_wkt(&request)?;
    debug!(points = trajectory.len(), "Received trajectory");

    // Matching is CPU-bound, and must not stall the runtime's workers.
    let response = tokio::task::spawn_blocking(move || {
        Response::encode(&matcher.match_trajectory(&trajectory))
    })
    .await?;

    debug!(state = response.state(), "Responding");

    writer.write_all(&response.to_bytes()?).await?;
    writer.shutdown().await?;

    Ok(())
}
