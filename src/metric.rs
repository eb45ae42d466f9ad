use opentelemetry::{KeyValue, metrics::Counter};
use std::sync::LazyLock;

static WEBHOOK_EVENTS: LazyLock<Counter<u64>> = LazyLock::new(|| {
    logfire::u64_counter("messenger_relay_webhook_events")
        .with_description("Messaging events received, by kind")
        .with_unit("event")
        .build()
});

static SEND_API_CALLS: LazyLock<Counter<u64>> = LazyLock::new(|| {
    logfire::u64_counter("messenger_relay_send_api_calls")
        .with_description("Send API calls, by outcome")
        .with_unit("call")
        .build()
});

/// `kind` is one of "message", "postback" or "ignored"
pub fn record_webhook_event(kind: &'static str) {
    WEBHOOK_EVENTS.add(1, &[KeyValue::new("kind", kind)]);
}

pub fn record_send_api_call(delivered: bool) {
    let outcome = if delivered { "ok" } else { "failed" };
    SEND_API_CALLS.add(1, &[KeyValue::new("outcome", outcome)]);
}
