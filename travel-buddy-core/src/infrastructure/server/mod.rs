mod docs;
pub mod dto;
mod error;
mod port;
mod router;
mod routes;
mod state;

pub use error::ServerError;
pub use port::bind_available;
pub use router::{bind_listener, router, serve, serve_listener};
pub use state::{ServerState, SharedSession};
