pub mod handler;
pub mod prompt;
pub mod session;

pub use handler::{HandlerError, HandlerState, ModelHandler};
pub use prompt::{QuickAction, TravelPlan, build_travel_prompt};
pub use session::{ChatSession, SessionError};
