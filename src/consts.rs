pub const WEBHOOK_PATH: &str = "/webhook";
pub const PAGE_OBJECT: &str = "page";
pub const SUBSCRIBE_MODE: &str = "subscribe";
pub const EVENT_RECEIVED: &str = "EVENT_RECEIVED";

pub const SIGNATURE_HEADER: &str = "X-Hub-Signature-256";
pub const LEGACY_SIGNATURE_HEADER: &str = "X-Hub-Signature";

// Placeholder replies, swap for a real conversation engine.
pub const ECHO_REPLY_PREFIX: &str = "Aapne likha: ";
pub const POSTBACK_REPLY_PREFIX: &str = "Postback received: ";
