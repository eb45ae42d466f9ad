//! Messenger webhook endpoint handlers
//!
//! This module handles incoming webhook requests from the Messenger platform.
//! It implements both the verification endpoint (GET) and the webhook receiver (POST).
//!
//! # Security
//!
//! The POST endpoint checks the HMAC signature of the raw body before the
//! payload is parsed, see [`super::security`].

use super::{handler, schemas, security};
use crate::{AppState, consts, errors::WebhookError};
use ntex::{util::Bytes, web};
use serde::Deserialize;
use tracing::Instrument;

/// Query parameters for webhook verification
#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    /// The mode parameter, should be "subscribe"
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    /// The verification token from the app dashboard
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    /// The challenge string to echo back
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// Webhook verification endpoint (GET)
///
/// The platform sends a GET request to verify the webhook URL.
/// This endpoint validates the verify token and returns the challenge.
///
/// # Query Parameters
/// - `hub.mode` - Should be "subscribe"
/// - `hub.verify_token` - Token configured in the app dashboard
/// - `hub.challenge` - Challenge string to echo back
///
/// # Returns
/// - 200 with challenge string if verification succeeds
/// - 403 if verification fails
#[web::get("")]
pub async fn verify(
    req: web::HttpRequest,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    // Unreadable query strings (e.g. repeated keys) fail the handshake like a bad token
    let query = web::types::Query::<VerifyQuery>::from_query(req.query_string())
        .map_err(|e| {
            logfire::warn!(
                "Invalid verification query: {error}",
                error = e.to_string()
            );
            WebhookError::VerificationFailed
        })?
        .into_inner();

    if query.mode.as_deref() != Some(consts::SUBSCRIBE_MODE)
        || query.verify_token.as_deref() != Some(app_state.config.fb_verify_token.as_str())
    {
        return Err(WebhookError::VerificationFailed.into());
    }

    logfire::info!("WEBHOOK_VERIFIED");

    Ok(web::HttpResponse::Ok()
        .content_type("text/plain")
        .body(query.challenge.unwrap_or_default()))
}

/// Webhook receiver endpoint (POST)
///
/// Receives webhook events from the Messenger platform and replies to each
/// message and postback.
///
/// # Returns
/// - 200 `EVENT_RECEIVED` for page payloads, whatever the Send API answered
/// - 400 if the signature header is missing or the body is not a payload
/// - 403 if the signature does not match
/// - 404 if the payload is not for a page
#[web::post("")]
pub async fn receive(
    req: web::HttpRequest,
    body: Bytes,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let span = logfire::span!("messenger_webhook");

    let payload =
        span.in_scope(|| verify_and_parse(&req, &body, &app_state.config.fb_app_secret))?;

    let delivered = handler::process_webhook(&payload, &app_state.send_api)
        .instrument(span.clone())
        .await;

    span.in_scope(|| {
        logfire::info!(
            "Webhook processed: entries={entries}, delivered={delivered}",
            entries = payload.entry.len() as i64,
            delivered = delivered as i64
        )
    });

    Ok(web::HttpResponse::Ok()
        .content_type("text/plain")
        .body(consts::EVENT_RECEIVED))
}

/// Checks the signature, then the object type, then the full payload shape.
///
/// The object type is read on its own so that a non-page body answers 404
/// whatever the rest of it looks like.
fn verify_and_parse(
    req: &web::HttpRequest,
    body: &[u8],
    app_secret: &str,
) -> Result<schemas::WebhookPayload, WebhookError> {
    let signature = security::signature_from_headers(req.headers())?;
    if !security::verify_signature(signature, body, app_secret) {
        return Err(WebhookError::InvalidSignature);
    }

    // Parse the JSON payload only after the signature matched
    let envelope: schemas::PayloadObject =
        serde_json::from_slice(body).map_err(invalid_payload)?;
    if envelope.object != consts::PAGE_OBJECT {
        return Err(WebhookError::UnsupportedObject(envelope.object));
    }

    serde_json::from_slice(body).map_err(invalid_payload)
}

fn invalid_payload(e: serde_json::Error) -> WebhookError {
    logfire::error!(
        "Failed to parse webhook payload: {error}",
        error = e.to_string()
    );
    WebhookError::InvalidPayload(e.to_string())
}
