use crate::consts;
use ntex::web;

/// Configures the Messenger webhook routes.
///
/// These routes are public endpoints, requests are authenticated by the
/// verify token (GET) and the body signature (POST).
///
/// # Routes
/// - `GET /webhook` - Messenger webhook verification
/// - `POST /webhook` - Messenger webhook receiver
pub fn messenger(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(consts::WEBHOOK_PATH)
            .service((super::messenger::verify, super::messenger::receive)),
    );
}
