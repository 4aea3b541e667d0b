//! Model infrastructure module
//!
//! # Structure
//! - `types` - Request, Response, Error types
//! - `traits` - ModelClient trait
//! - `adapter` - Message format and reply normalization
//! - `registry` - Static provider table
//! - `factory` - Opens sessions from registry descriptors
//! - `session` - A live binding to one provider
//! - `clients` - Individual client implementations

pub mod adapter;
pub mod clients;
pub mod factory;
pub mod registry;
pub mod session;
pub mod traits;
pub mod types;

pub use clients::{OllamaClient, OpenAIClient};
pub use factory::SessionFactory;
pub use registry::{ProviderDescriptor, ProviderKind, ProviderRegistry, RegistryError};
pub use session::Session;
pub use traits::ModelClient;
pub use types::{ConnectError, ModelError, ModelRequest, ModelResponse};
