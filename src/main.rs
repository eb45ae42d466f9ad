//! # Messenger Relay
//!
//! Main entry point of the Messenger webhook relay. Loads the configuration,
//! configures logging and serves the webhook routes.

pub mod config;
pub mod consts;
pub mod errors;
pub mod metric;
pub mod webhook;

use logfire::config::{MetricsOptions, SendToLogfire};
use ntex::web;
use std::sync::Arc;
use webhook::messenger::client::{ImplSendApi, MessengerClient};

/// State shared by the handlers of one server worker
pub struct AppState {
    pub config: Arc<config::AppConfig>,
    pub send_api: ImplSendApi,
}

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    // Exits non-zero when a secret is missing
    let app_config = Arc::new(config::AppConfig::load()?);

    // Initialize logging and metrics
    let shutdown_handler = setup_logfire(&app_config)?;

    configure_and_run_server(app_config).await?;

    shutdown_handler.shutdown()?;

    Ok(())
}

/// Configures logfire, spans are only exported when a token is set
fn setup_logfire(app_config: &config::AppConfig) -> anyhow::Result<logfire::ShutdownHandler> {
    let mut logfire_config = logfire::configure()
        .install_panic_handler()
        .with_metrics(Some(MetricsOptions::default()))
        .send_to_logfire(SendToLogfire::IfTokenPresent);

    if let Some(token) = &app_config.logfire_token {
        logfire_config = logfire_config.with_token(token);
    }

    Ok(logfire_config.finish()?)
}

/// Creates application state for one worker
fn create_app_state(app_config: Arc<config::AppConfig>) -> AppState {
    AppState {
        send_api: Box::new(MessengerClient::new(&app_config)),
        config: app_config,
    }
}

/// Configures and starts the web server
async fn configure_and_run_server(app_config: Arc<config::AppConfig>) -> anyhow::Result<()> {
    let server_addr = ("0.0.0.0", app_config.port);
    let env = app_config.env.clone();

    let server = web::server(move || {
        web::App::new()
            .wrap(web::middleware::Logger::default())
            .state(create_app_state(app_config.clone()))
            .configure(webhook::routes::messenger)
    })
    .bind(server_addr)?;

    tracing::info!("Server listening on {} (env={})", server_addr.1, env);

    server
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
