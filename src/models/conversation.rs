use serde::{Deserialize, Serialize};

/// Inbound chat message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageIn {
    pub conversation_id: String,
    pub content: String,
}

/// Reply to a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageOut {
    pub conversation_id: String,
    pub content: String,
    pub wait_response: bool,
}
