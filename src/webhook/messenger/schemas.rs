//! # Messenger Webhook Schemas
//!
//! Data structures for the JSON payload the Messenger platform posts to the
//! webhook when page events occur (incoming messages, postbacks, ...).

use serde::{Deserialize, Serialize};

/// Root webhook payload
#[derive(Debug, Deserialize, Serialize)]
pub struct WebhookPayload {
    /// The object type, "page" for Messenger events
    pub object: String,
    /// Array of entry objects containing the actual data
    #[serde(default)]
    pub entry: Vec<Entry>,
}

/// Only the object type of a payload, read before the full shape
#[derive(Debug, Deserialize)]
pub struct PayloadObject {
    pub object: String,
}

/// Entry object, one per page and batch
#[derive(Debug, Deserialize, Serialize)]
pub struct Entry {
    /// Page ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Time of the update in epoch milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    /// Messaging events of this entry
    #[serde(default)]
    pub messaging: Vec<MessagingEvent>,
}

/// A single messaging event
#[derive(Debug, Deserialize, Serialize)]
pub struct MessagingEvent {
    /// Page-scoped ID of the user who triggered the event
    pub sender: Participant,
    /// The page receiving the event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<Participant>,
    /// Timestamp of the event in epoch milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Message content (if the user sent a message)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<IncomingMessage>,
    /// Postback content (if the user tapped a button)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postback: Option<Postback>,
}

/// Sender or recipient reference
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: String,
}

/// Message sent by the user
#[derive(Debug, Deserialize, Serialize)]
pub struct IncomingMessage {
    /// Message ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mid: Option<String>,
    /// Text of the message, absent for attachments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Button press delivered as a postback
#[derive(Debug, Deserialize, Serialize)]
pub struct Postback {
    /// Title of the tapped button
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Developer-defined payload of the button
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}
