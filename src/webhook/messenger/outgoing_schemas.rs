//! # Messenger Outgoing Message Schemas
//!
//! Payloads sent to the Send API and the response it returns.

use super::schemas::Participant;
use serde::{Deserialize, Serialize};

/// Text message to send to a user
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OutgoingTextMessage {
    /// Page-scoped ID of the user receiving the reply
    pub recipient: Participant,
    /// Message content
    pub message: OutgoingTextContent,
}

impl OutgoingTextMessage {
    /// Creates a new text message
    pub fn new(recipient_id: String, text: String) -> Self {
        Self {
            recipient: Participant { id: recipient_id },
            message: OutgoingTextContent { text },
        }
    }
}

/// Text content for outgoing messages
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OutgoingTextContent {
    pub text: String,
}

/// Success body of the Send API
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct SendApiResponse {
    #[serde(default)]
    pub recipient_id: Option<String>,
    #[serde(default)]
    pub message_id: Option<String>,
}
