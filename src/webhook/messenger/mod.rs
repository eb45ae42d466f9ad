//! Messenger webhook integration module
//!
//! ## Submodules
//!
//! - [`routes`] - HTTP endpoint handlers for the webhook
//! - [`security`] - Signature verification of incoming payloads
//! - [`handler`] - Dispatch of messaging events to replies
//! - [`schemas`] - Incoming webhook payloads
//! - [`outgoing_schemas`] - Send API payloads
//! - [`client`] - Send API client

pub mod client;
pub mod handler;
pub mod outgoing_schemas;
pub mod routes;
pub mod schemas;
pub mod security;

pub use routes::{receive, verify};
