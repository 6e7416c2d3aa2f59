use chrono::{DateTime, Utc};

/// Media attachment kind carried by a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Document,
}

impl MediaKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Document => "document",
        }
    }

    /// Synthetic content used when the message carries no caption.
    #[must_use]
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Image => "[Image]",
            Self::Video => "[Video]",
            Self::Document => "[Document]",
        }
    }
}

/// Structured-form field map extracted from an `nfm_reply` response document.
///
/// Every field is optional; older form versions sent first/last name instead
/// of a single name field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowFields {
    pub name: Option<String>,
    pub business_name: Option<String>,
    pub email: Option<String>,
    /// Kept as a string even when the wire carries a number.
    pub pincode: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub terms_accepted: Option<bool>,
    pub offers_opt_in: Option<bool>,
    pub category_id: Option<String>,
}

impl FlowFields {
    /// Preferred contact name: the name field, else legacy first/last joined.
    #[must_use]
    pub fn effective_name(&self) -> Option<String> {
        if let Some(name) = &self.name
            && !name.trim().is_empty()
        {
            return Some(name.trim().to_string());
        }
        let joined = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or(""),
        );
        let joined = joined.trim();
        (!joined.is_empty()).then(|| joined.to_string())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Message subtype, a closed set so the orchestrator can match exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    Media {
        media_id: Option<String>,
        kind: MediaKind,
    },
    /// Reply to an interactive list; `id` is the selected row id.
    ListReply {
        id: String,
        title: Option<String>,
    },
    ButtonReply,
    /// Structured-form submission. The correlation token is kept raw here;
    /// the orchestrator parses it and decides how to fail.
    FlowReply {
        token: Option<String>,
        fields: Option<FlowFields>,
    },
    /// Discriminator we do not handle specially; the raw type is preserved.
    Other {
        raw_type: String,
    },
}

/// Normalized inbound event, produced per raw payload and consumed
/// immediately by the orchestrator. Never persisted directly.
#[derive(Debug, Clone)]
pub struct ParsedMessage {
    /// E.164-normalized sender address.
    pub phone: String,
    /// Contact profile name, when the payload carried one.
    pub sender_name: Option<String>,
    /// Text content, possibly a synthetic placeholder for non-text types.
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Opaque provider message id, carried verbatim for idempotency/audit.
    pub provider_message_id: String,
    pub kind: MessageKind,
}
