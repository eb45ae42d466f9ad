//! # Messenger Send API Client
//!
//! Client for delivering replies through the Messenger Send API. The page
//! access token travels as the `access_token` query parameter.

use super::outgoing_schemas::{OutgoingTextMessage, SendApiResponse};
use crate::config::AppConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;

/// Outbound side of the webhook, the dispatcher only talks to this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SendApi {
    /// Sends a message payload, failing on transport errors and non-2xx statuses.
    async fn send_message(&self, message: &OutgoingTextMessage) -> Result<SendApiResponse>;
}

pub type ImplSendApi = Box<dyn SendApi>;

/// Messenger API client for sending messages
#[derive(Clone)]
pub struct MessengerClient {
    /// HTTP client for making API requests
    client: reqwest::Client,
    /// Send API endpoint, without the credential
    endpoint: String,
    /// Page access token
    access_token: String,
}

impl MessengerClient {
    /// Creates a new Messenger client from the loaded configuration
    pub fn new(app_config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: app_config.send_api_endpoint(),
            access_token: app_config.fb_page_access_token.clone(),
        }
    }
}

#[async_trait]
impl SendApi for MessengerClient {
    async fn send_message(&self, message: &OutgoingTextMessage) -> Result<SendApiResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("access_token", self.access_token.as_str())])
            .header("Content-Type", "application/json")
            .json(message)
            .send()
            .await
            .context("Failed to send request to Send API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());

            anyhow::bail!("Send API error status {}: {}", status, body);
        }

        let send_response: SendApiResponse = response
            .json()
            .await
            .context("Failed to parse Send API response")?;

        Ok(send_response)
    }
}
