use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind HTTP listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("could not find an available port on {host} after {attempts} attempts starting at {start}")]
    NoAvailablePort { host: String, start: u16, attempts: u16 },
    #[error("HTTP server error: {0}")]
    Serve(#[from] std::io::Error),
}
