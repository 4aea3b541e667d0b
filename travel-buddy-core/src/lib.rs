//! Travel Buddy core: provider registry, model handler, travel prompt
//! enrichment and the REST surface.

pub mod application;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::{ChatSession, HandlerError, HandlerState, ModelHandler, SessionError};
pub use config::{AppConfig, ConfigError};
pub use domain::{TravelContext, types};
pub use infrastructure::{model, server};
