use {
    chrono::{DateTime, Utc},
    tracing::warn,
};

use crate::{
    message::{FlowFields, MediaKind, MessageKind, ParsedMessage},
    phone::normalize_phone,
    types::{WireContact, WireInteractive, WireMedia, WireMessage},
};

/// Why a raw payload could not become a [`ParsedMessage`].
///
/// All variants are permanent: redelivering the same bytes cannot fix them,
/// so the consumer acknowledges the message after logging.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Payload is not a structured JSON record.
    #[error("payload is not a structured record: {0}")]
    InvalidEncoding(#[from] serde_json::Error),

    /// A required field is absent or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The delivery timestamp is not whole epoch seconds.
    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),
}

/// Parse one raw queue-message body into a normalized [`ParsedMessage`].
pub fn parse(raw: &[u8]) -> Result<ParsedMessage, ParseError> {
    let wire: WireMessage = serde_json::from_slice(raw)?;

    let from = wire
        .from
        .filter(|f| !f.is_empty())
        .ok_or(ParseError::MissingField("from"))?;
    let timestamp_raw = wire
        .timestamp
        .filter(|t| !t.is_empty())
        .ok_or(ParseError::MissingField("timestamp"))?;
    let message_type = wire
        .message_type
        .filter(|t| !t.is_empty())
        .ok_or(ParseError::MissingField("type"))?;

    let timestamp = parse_timestamp(&timestamp_raw)?;
    let sender_name = contact_name(&wire.contacts, &from);

    let (content, kind) = match message_type.as_str() {
        "text" => (
            wire.text.and_then(|t| t.body).unwrap_or_default(),
            MessageKind::Text,
        ),
        "image" => media_content(wire.image, MediaKind::Image),
        "video" => media_content(wire.video, MediaKind::Video),
        "document" => media_content(wire.document, MediaKind::Document),
        "interactive" => interactive_content(wire.interactive),
        other => (
            format!("[{other}]"),
            MessageKind::Other {
                raw_type: other.to_string(),
            },
        ),
    };

    Ok(ParsedMessage {
        phone: normalize_phone(&from),
        sender_name,
        content,
        timestamp,
        provider_message_id: wire.id.unwrap_or_default(),
        kind,
    })
}

/// Provider timestamps are whole seconds since epoch, as a string.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ParseError> {
    let secs: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidTimestamp(raw.to_string()))?;
    DateTime::from_timestamp(secs, 0).ok_or_else(|| ParseError::InvalidTimestamp(raw.to_string()))
}

/// Profile name for the sender, preferring an exact wa_id match.
fn contact_name(contacts: &[WireContact], from: &str) -> Option<String> {
    let named = |c: &WireContact| {
        c.profile
            .as_ref()
            .and_then(|p| p.name.clone())
            .filter(|n| !n.is_empty())
    };
    contacts
        .iter()
        .find(|c| c.wa_id.as_deref() == Some(from))
        .and_then(named)
        .or_else(|| contacts.iter().find_map(named))
}

fn media_content(media: Option<WireMedia>, kind: MediaKind) -> (String, MessageKind) {
    let (media_id, caption) = media.map(|m| (m.id, m.caption)).unwrap_or((None, None));
    let content = caption
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| kind.placeholder().to_string());
    (content, MessageKind::Media { media_id, kind })
}

fn interactive_content(interactive: Option<WireInteractive>) -> (String, MessageKind) {
    let fallback = |raw_type: &str| {
        (
            format!("[{raw_type}]"),
            MessageKind::Other {
                raw_type: raw_type.to_string(),
            },
        )
    };
    let Some(interactive) = interactive else {
        return fallback("interactive");
    };

    match interactive.kind.as_deref() {
        Some("list_reply") => {
            let Some(reply) = interactive.list_reply else {
                return fallback("list_reply");
            };
            let id = reply.id.unwrap_or_default();
            let label = reply.title.clone().unwrap_or_else(|| id.clone());
            (
                format!("Selected: {label}"),
                MessageKind::ListReply {
                    id,
                    title: reply.title,
                },
            )
        },
        Some("button_reply") => {
            let title = interactive
                .button_reply
                .and_then(|b| b.title)
                .unwrap_or_default();
            (title, MessageKind::ButtonReply)
        },
        Some("nfm_reply") => {
            let Some(reply) = interactive.nfm_reply else {
                return fallback("nfm_reply");
            };
            let (token, fields) = match reply.response_json.as_deref() {
                Some(doc) => parse_response_document(doc),
                None => (None, None),
            };
            let content = reply
                .body
                .filter(|b| !b.is_empty())
                .unwrap_or_else(|| "[Flow Reply]".to_string());
            (content, MessageKind::FlowReply { token, fields })
        },
        Some(other) => fallback(other),
        None => fallback("interactive"),
    }
}

/// Extract the correlation token and field map from the embedded JSON
/// response document. A malformed document degrades to "no structured data"
/// rather than failing the whole message.
fn parse_response_document(doc: &str) -> (Option<String>, Option<FlowFields>) {
    let value: serde_json::Value = match serde_json::from_str(doc) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "flow response document is not valid JSON, ignoring structured data");
            return (None, None);
        },
    };

    let token = string_field(&value, "flow_token");
    let fields = FlowFields {
        name: string_field(&value, "name"),
        business_name: string_field(&value, "business_name"),
        email: string_field(&value, "email"),
        pincode: string_field(&value, "pincode"),
        first_name: string_field(&value, "first_name"),
        last_name: string_field(&value, "last_name"),
        terms_accepted: bool_field(&value, "terms_accepted"),
        offers_opt_in: bool_field(&value, "offers_opt_in"),
        category_id: string_field(&value, "category_id"),
    };
    let fields = (!fields.is_empty()).then_some(fields);
    (token, fields)
}

/// Read a field as a string, stringifying numbers (pincodes arrive both ways).
fn string_field(value: &serde_json::Value, key: &str) -> Option<String> {
    match value.get(key)? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn bool_field(value: &serde_json::Value, key: &str) -> Option<bool> {
    match value.get(key)? {
        serde_json::Value::Bool(b) => Some(*b),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_json(json: &str) -> ParsedMessage {
        parse(json.as_bytes()).unwrap()
    }

    #[test]
    fn text_round_trip() {
        let msg = parse_json(
            r#"{
                "from": "919999999999",
                "id": "wamid.123",
                "timestamp": "1722470400",
                "type": "text",
                "text": {"body": "I need a quotation for steel pipes"}
            }"#,
        );
        assert_eq!(msg.phone, "+919999999999");
        assert_eq!(msg.content, "I need a quotation for steel pipes");
        assert_eq!(msg.timestamp.timestamp(), 1_722_470_400);
        assert_eq!(msg.provider_message_id, "wamid.123");
        assert_eq!(msg.kind, MessageKind::Text);
    }

    #[test]
    fn empty_text_body_is_allowed() {
        let msg = parse_json(
            r#"{"from": "1", "timestamp": "1", "type": "text", "text": {"body": ""}}"#,
        );
        assert_eq!(msg.content, "");
    }

    #[test]
    fn non_json_body_is_invalid_encoding() {
        let err = parse(b"\xff not json").unwrap_err();
        assert!(matches!(err, ParseError::InvalidEncoding(_)));
    }

    #[test]
    fn missing_required_fields() {
        let cases = [
            (r#"{"timestamp": "1", "type": "text"}"#, "from"),
            (r#"{"from": "1", "type": "text"}"#, "timestamp"),
            (r#"{"from": "1", "timestamp": "1"}"#, "type"),
            (r#"{"from": "", "timestamp": "1", "type": "text"}"#, "from"),
        ];
        for (json, field) in cases {
            match parse(json.as_bytes()).unwrap_err() {
                ParseError::MissingField(f) => assert_eq!(f, field),
                other => panic!("expected MissingField({field}), got {other:?}"),
            }
        }
    }

    #[test]
    fn fractional_or_garbage_timestamp_is_rejected() {
        for ts in ["1722470400.5", "not-a-number", "  "] {
            let json = format!(r#"{{"from": "1", "timestamp": "{ts}", "type": "text"}}"#);
            assert!(matches!(
                parse(json.as_bytes()).unwrap_err(),
                ParseError::InvalidTimestamp(_) | ParseError::MissingField(_)
            ));
        }
    }

    #[test]
    fn image_caption_and_placeholder() {
        let with_caption = parse_json(
            r#"{"from": "1", "timestamp": "1", "type": "image",
                "image": {"id": "media-9", "caption": "our warehouse"}}"#,
        );
        assert_eq!(with_caption.content, "our warehouse");
        assert_eq!(
            with_caption.kind,
            MessageKind::Media {
                media_id: Some("media-9".into()),
                kind: MediaKind::Image,
            }
        );

        let without = parse_json(
            r#"{"from": "1", "timestamp": "1", "type": "video", "video": {"id": "media-10"}}"#,
        );
        assert_eq!(without.content, "[Video]");
    }

    #[test]
    fn unknown_type_gets_bracketed_placeholder() {
        let msg = parse_json(r#"{"from": "1", "timestamp": "1", "type": "sticker"}"#);
        assert_eq!(msg.content, "[sticker]");
        assert_eq!(
            msg.kind,
            MessageKind::Other {
                raw_type: "sticker".into()
            }
        );
    }

    #[test]
    fn list_reply_content_prefers_title() {
        let msg = parse_json(
            r#"{"from": "1", "timestamp": "1", "type": "interactive",
                "interactive": {"type": "list_reply",
                    "list_reply": {"id": "category_select~cat-7", "title": "Pipes"}}}"#,
        );
        assert_eq!(msg.content, "Selected: Pipes");
        assert_eq!(
            msg.kind,
            MessageKind::ListReply {
                id: "category_select~cat-7".into(),
                title: Some("Pipes".into()),
            }
        );
    }

    #[test]
    fn button_reply_content_is_title() {
        let msg = parse_json(
            r#"{"from": "1", "timestamp": "1", "type": "interactive",
                "interactive": {"type": "button_reply", "button_reply": {"id": "b1", "title": "Yes"}}}"#,
        );
        assert_eq!(msg.content, "Yes");
        assert_eq!(msg.kind, MessageKind::ButtonReply);
    }

    #[test]
    fn nfm_reply_extracts_token_and_fields() {
        let msg = parse_json(
            r#"{"from": "1", "timestamp": "1", "type": "interactive",
                "interactive": {"type": "nfm_reply", "nfm_reply": {
                    "response_json": "{\"flow_token\": \"lead-42~cat-7\", \"name\": \"Asha Rao\", \"email\": \"asha@example.com\", \"pincode\": 560001, \"terms_accepted\": true}"
                }}}"#,
        );
        let MessageKind::FlowReply { token, fields } = msg.kind else {
            panic!("expected flow reply, got {:?}", msg.kind);
        };
        assert_eq!(token.as_deref(), Some("lead-42~cat-7"));
        let fields = fields.unwrap();
        assert_eq!(fields.name.as_deref(), Some("Asha Rao"));
        assert_eq!(fields.email.as_deref(), Some("asha@example.com"));
        assert_eq!(fields.pincode.as_deref(), Some("560001"));
        assert_eq!(fields.terms_accepted, Some(true));
        assert_eq!(msg.content, "[Flow Reply]");
    }

    #[test]
    fn nfm_reply_with_broken_document_degrades() {
        let msg = parse_json(
            r#"{"from": "1", "timestamp": "1", "type": "interactive",
                "interactive": {"type": "nfm_reply", "nfm_reply": {
                    "body": "thanks", "response_json": "{not json"}}}"#,
        );
        assert_eq!(msg.content, "thanks");
        assert_eq!(
            msg.kind,
            MessageKind::FlowReply {
                token: None,
                fields: None,
            }
        );
    }

    #[test]
    fn contact_profile_becomes_sender_name() {
        let msg = parse_json(
            r#"{"from": "919999999999", "timestamp": "1", "type": "text",
                "text": {"body": "hi"},
                "contacts": [{"wa_id": "919999999999", "profile": {"name": "Asha"}}]}"#,
        );
        assert_eq!(msg.sender_name.as_deref(), Some("Asha"));
    }

    #[test]
    fn unknown_interactive_subtype_falls_through() {
        let msg = parse_json(
            r#"{"from": "1", "timestamp": "1", "type": "interactive",
                "interactive": {"type": "cta_url"}}"#,
        );
        assert_eq!(msg.content, "[cta_url]");
        assert_eq!(
            msg.kind,
            MessageKind::Other {
                raw_type: "cta_url".into()
            }
        );
    }
}
