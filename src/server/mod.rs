//! The map-matching service: one trajectory per TCP connection.
//!
//! A client connects, writes a single newline-terminated WKT
//! `LINESTRING`, and reads the JSON response until the server closes the
//! connection. Malformed, oversized, or late requests are closed without
//! a response.

#[doc(hidden)]
pub mod connection;
#[doc(hidden)]
pub mod error;
#[cfg(test)]
mod test;
pub mod trace;

#[doc(inline)]
pub use error::ProtocolError;

use crate::matcher::Matcher;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, ToSocketAddrs};
use tokio::task::JoinSet;
use tracing::{info, warn};

pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 16 * 1024 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Time allowed for the request line to arrive.
    pub read_timeout: Duration,

    /// Largest accepted request line, excluding its terminator.
    pub max_request_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            read_timeout: DEFAULT_READ_TIMEOUT,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
        }
    }
}

/// A bound listener, serving a fully built [`Matcher`].
///
/// Holding a built matcher before binding makes it impossible for a
/// connection to observe a partially initialised service.
pub struct Server {
    listener: TcpListener,
    matcher: Arc<Matcher>,
    config: ServerConfig,
}

impl Server {
    pub async fn bind(
        addr: impl ToSocketAddrs,
        matcher: Arc<Matcher>,
        config: ServerConfig,
    ) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;

        Ok(Self {
            listener,
            matcher,
            config,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until `shutdown` resolves, then waits for the
    /// connections already accepted to finish.
    pub async fn serve(self, shutdown: impl Future<Output = ()>) -> std::io::Result<()> {
        let addr = self.local_addr()?;
        info!(message = "Starting server.", %addr);

        let mut connections = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                Some(_) = connections.join_next(), if !connections.is_empty() => {}
                accepted = self.listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(accepted) => accepted,
                        Err(err) => {
                            warn!(%err, "Could not accept connection");
                            continue;
                        }
                    };

                    let matcher = self.matcher.clone();
                    let config = self.config;

                    connections.spawn(async move {
                        if let Err(err) = connection::handle(stream, peer, matcher, config).await {
                            warn!(%peer, %err, "Closed connection without response");
                        }
                    });
                }
            }
        }

        info!(
            message = "Terminating server.",
            in_flight = connections.len()
        );
        while connections.join_next().await.is_some() {}

        Ok(())
    }
}
