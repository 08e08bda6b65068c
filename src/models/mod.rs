//! Request and response bodies.

pub mod conversation;
pub mod system;

pub use conversation::{MessageIn, MessageOut};
pub use system::{HealthResponse, InfoResponse, RootResponse};
