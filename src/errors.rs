use derive_more::{Display, Error};
use ntex::{http, web};

/// Rejections of an inbound webhook request.
///
/// Every variant answers with its status code and an empty body, the
/// platform only looks at the status.
#[derive(Debug, Display, Error, PartialEq, Eq)]
pub enum WebhookError {
    /// Neither signature header was sent
    MissingSignature,
    /// Signature header present but it does not match the body
    InvalidSignature,
    /// Verification handshake with a wrong mode or token
    VerificationFailed,
    /// Signed body that is not a webhook payload
    InvalidPayload(#[error(not(source))] String),
    /// Payload for an object other than a page
    UnsupportedObject(#[error(not(source))] String),
}

impl web::error::WebResponseError for WebhookError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        logfire::warn!(
            "Webhook request rejected: {error}",
            error = format!("{:?}", self)
        );

        web::HttpResponse::build(self.status_code()).finish()
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            WebhookError::MissingSignature | WebhookError::InvalidPayload(_) => {
                http::StatusCode::BAD_REQUEST
            }
            WebhookError::InvalidSignature | WebhookError::VerificationFailed => {
                http::StatusCode::FORBIDDEN
            }
            WebhookError::UnsupportedObject(_) => http::StatusCode::NOT_FOUND,
        }
    }
}
