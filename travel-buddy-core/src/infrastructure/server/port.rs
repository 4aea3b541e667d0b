use super::error::ServerError;
use std::net::TcpListener;
use tracing::{debug, error};

/// Bind the first free port in `start..start + attempts` on `host`.
///
/// Ports are tried in order. The bound listener is returned so the port
/// cannot be taken between probing and serving.
pub fn bind_available(host: &str, start: u16, attempts: u16) -> Result<TcpListener, ServerError> {
    let ports = (0..attempts).filter_map(|offset| start.checked_add(offset));
    for port in ports {
        match TcpListener::bind((host, port)) {
            Ok(listener) => return Ok(listener),
            Err(err) => debug!(host, port, %err, "Port unavailable, trying next"),
        }
    }

    error!(host, start, attempts, "Could not find an available port");
    Err(ServerError::NoAvailablePort {
        host: host.to_string(),
        start,
        attempts,
    })
}
