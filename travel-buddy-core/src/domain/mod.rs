pub mod context;
pub mod types;

pub use context::TravelContext;
pub use types::{ChatMessage, ConversationTurn, MessageRole};
