pub mod property_dtos;
pub mod tenant_dtos;

use serde::Serialize;

/// Body of every plain acknowledgement and every error reply.
#[derive(Debug, Serialize)]
pub struct MessageOut {
    pub message: String,
}

impl MessageOut {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
