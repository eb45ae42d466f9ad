//! # Messenger Webhook Handler
//!
//! Walks the entries of a verified webhook payload and answers every
//! messaging event through the Send API.

use super::{
    client::ImplSendApi,
    outgoing_schemas::OutgoingTextMessage,
    schemas::{MessagingEvent, WebhookPayload},
};
use crate::{consts, metric};

/// Shape of a messaging event, decides which reply it gets
#[derive(Debug, PartialEq, Eq)]
pub enum EventKind<'a> {
    /// Free text message, text is empty for attachments
    Message { text: &'a str },
    /// Button press
    Postback { payload: &'a str },
    /// Anything else (reads, deliveries, ...)
    Ignored,
}

impl EventKind<'_> {
    fn as_str(&self) -> &'static str {
        match self {
            EventKind::Message { .. } => "message",
            EventKind::Postback { .. } => "postback",
            EventKind::Ignored => "ignored",
        }
    }
}

/// Classifies an event, a present `message` wins over a `postback`.
pub fn classify_event(event: &MessagingEvent) -> EventKind<'_> {
    if let Some(message) = &event.message {
        return EventKind::Message {
            text: message.text.as_deref().unwrap_or_default(),
        };
    }

    if let Some(postback) = &event.postback {
        return EventKind::Postback {
            payload: postback.payload.as_deref().unwrap_or_default(),
        };
    }

    EventKind::Ignored
}

/// Builds the reply for an event, `None` when the event gets no answer.
///
/// Echo logic only, this is where a conversation engine would plug in.
pub fn build_reply(event: &MessagingEvent) -> Option<OutgoingTextMessage> {
    let text = match classify_event(event) {
        EventKind::Message { text } => format!("{}{}", consts::ECHO_REPLY_PREFIX, text),
        EventKind::Postback { payload } => format!("{}{}", consts::POSTBACK_REPLY_PREFIX, payload),
        EventKind::Ignored => return None,
    };

    Some(OutgoingTextMessage::new(event.sender.id.clone(), text))
}

/// Iterates every messaging event of every entry, in payload order
pub fn messaging_events(payload: &WebhookPayload) -> impl Iterator<Item = &MessagingEvent> {
    payload.entry.iter().flat_map(|entry| &entry.messaging)
}

/// Main webhook processor
///
/// Sends one reply per answerable event, one at a time and in order. Send
/// failures are logged and do not stop the remaining events.
///
/// # Returns
///
/// Number of replies the Send API accepted
pub async fn process_webhook(payload: &WebhookPayload, send_api: &ImplSendApi) -> usize {
    let mut delivered = 0;

    for event in messaging_events(payload) {
        metric::record_webhook_event(classify_event(event).as_str());

        let Some(reply) = build_reply(event) else {
            continue;
        };

        match send_api.send_message(&reply).await {
            Ok(response) => {
                delivered += 1;
                metric::record_send_api_call(true);
                logfire::info!(
                    "Reply delivered: {message_id}",
                    message_id = response.message_id.unwrap_or_default()
                );
            }
            Err(e) => {
                metric::record_send_api_call(false);
                logfire::error!("Send API error: {error}", error = e.to_string());
            }
        }
    }

    delivered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::webhook::messenger::{
        client::{MockSendApi, SendApi},
        outgoing_schemas::SendApiResponse,
    };
    use mockall::Sequence;

    fn payload_from(json: &str) -> WebhookPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_classify_event() {
        let payload = payload_from(
            r#"{"object":"page","entry":[{"messaging":[
                {"sender":{"id":"1"},"message":{"text":"hello"}},
                {"sender":{"id":"2"},"message":{"mid":"m_attachment"}},
                {"sender":{"id":"3"},"postback":{"payload":"BUY"}},
                {"sender":{"id":"4"},"postback":{"title":"no payload"}},
                {"sender":{"id":"5"}},
                {"sender":{"id":"6"},"message":{"text":"both"},"postback":{"payload":"X"}}
            ]}]}"#,
        );
        let kinds = messaging_events(&payload).map(classify_event).collect::<Vec<_>>();

        assert_eq!(
            kinds,
            vec![
                EventKind::Message { text: "hello" },
                EventKind::Message { text: "" },
                EventKind::Postback { payload: "BUY" },
                EventKind::Postback { payload: "" },
                EventKind::Ignored,
                EventKind::Message { text: "both" },
            ]
        );
    }

    #[test]
    fn test_build_reply() {
        let payload = payload_from(
            r#"{"object":"page","entry":[{"messaging":[
                {"sender":{"id":"USER_1"},"message":{"text":"hello"}},
                {"sender":{"id":"USER_2"},"postback":{"payload":"BUY"}},
                {"sender":{"id":"USER_3"}}
            ]}]}"#,
        );
        let replies = messaging_events(&payload).map(build_reply).collect::<Vec<_>>();

        assert_eq!(
            replies[0],
            Some(OutgoingTextMessage::new(
                "USER_1".into(),
                format!("{}hello", consts::ECHO_REPLY_PREFIX)
            ))
        );
        let postback_reply = replies[1].as_ref().unwrap();
        assert_eq!(postback_reply.recipient.id, "USER_2");
        assert!(postback_reply.message.text.contains("BUY"));
        assert!(replies[2].is_none());
    }

    #[ntex::test]
    async fn test_process_webhook_sends_in_order() {
        let payload = payload_from(
            r#"{"object":"page","entry":[
                {"messaging":[{"sender":{"id":"A"},"message":{"text":"first"}}]},
                {"messaging":[
                    {"sender":{"id":"B"},"postback":{"payload":"second"}},
                    {"sender":{"id":"C"}}
                ]}
            ]}"#,
        );

        let mut seq = Sequence::new();
        let mut mock_send_api = MockSendApi::new();
        mock_send_api
            .expect_send_message()
            .withf(|message| message.recipient.id == "A" && message.message.text.ends_with("first"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(SendApiResponse::default()));
        mock_send_api
            .expect_send_message()
            .withf(|message| message.recipient.id == "B" && message.message.text.ends_with("second"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(SendApiResponse::default()));
        let send_api: Box<dyn SendApi> = Box::new(mock_send_api);

        assert_eq!(process_webhook(&payload, &send_api).await, 2);
    }

    #[ntex::test]
    async fn test_process_webhook_continues_after_send_failure() {
        let payload = payload_from(
            r#"{"object":"page","entry":[{"messaging":[
                {"sender":{"id":"A"},"message":{"text":"one"}},
                {"sender":{"id":"B"},"message":{"text":"two"}}
            ]}]}"#,
        );

        let mut mock_send_api = MockSendApi::new();
        mock_send_api
            .expect_send_message()
            .withf(|message| message.recipient.id == "A")
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("Send API error status 500: boom")));
        mock_send_api
            .expect_send_message()
            .withf(|message| message.recipient.id == "B")
            .times(1)
            .returning(|_| Ok(SendApiResponse::default()));
        let send_api: Box<dyn SendApi> = Box::new(mock_send_api);

        assert_eq!(process_webhook(&payload, &send_api).await, 1);
    }

    #[ntex::test]
    async fn test_process_webhook_without_events() {
        let payload = payload_from(r#"{"object":"page","entry":[]}"#);

        let mut mock_send_api = MockSendApi::new();
        mock_send_api.expect_send_message().never();
        let send_api: Box<dyn SendApi> = Box::new(mock_send_api);

        assert_eq!(process_webhook(&payload, &send_api).await, 0);
    }
}
