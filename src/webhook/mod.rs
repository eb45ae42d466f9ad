//! Webhook handlers for external integrations
//!
//! ## Modules
//!
//! - [`messenger`] - Messenger platform webhook handlers

pub mod messenger;
pub mod routes;
