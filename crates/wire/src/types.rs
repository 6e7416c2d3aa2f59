//! Serde types mirroring the provider's webhook-relayed message shape.
//!
//! Everything is optional at this layer; [`crate::parse`] decides which
//! absences are fatal. Unknown fields are ignored so provider additions do
//! not break deserialization.

use serde::Deserialize;

/// One relayed chat event, as delivered on the queue.
#[derive(Debug, Clone, Deserialize)]
pub struct WireMessage {
    /// Sender address (national or international digits).
    pub from: Option<String>,
    /// Opaque provider message id.
    pub id: Option<String>,
    /// Whole seconds since epoch, as a string.
    pub timestamp: Option<String>,
    /// Message-type discriminator (`text`, `image`, `interactive`, ...).
    #[serde(rename = "type")]
    pub message_type: Option<String>,
    pub text: Option<WireText>,
    pub image: Option<WireMedia>,
    pub video: Option<WireMedia>,
    pub document: Option<WireMedia>,
    pub interactive: Option<WireInteractive>,
    /// Contact profiles relayed alongside the message.
    #[serde(default)]
    pub contacts: Vec<WireContact>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireText {
    pub body: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireMedia {
    /// Opaque media identifier for later download.
    pub id: Option<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireInteractive {
    /// Sub-discriminator (`list_reply`, `button_reply`, `nfm_reply`).
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub list_reply: Option<WireListReply>,
    pub button_reply: Option<WireButtonReply>,
    pub nfm_reply: Option<WireNfmReply>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireListReply {
    pub id: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireButtonReply {
    pub id: Option<String>,
    pub title: Option<String>,
}

/// Structured-form ("flow") submission.
#[derive(Debug, Clone, Deserialize)]
pub struct WireNfmReply {
    /// Free-text body some flows attach.
    pub body: Option<String>,
    /// JSON-encoded response document (field map + correlation token).
    pub response_json: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireContact {
    pub wa_id: Option<String>,
    pub profile: Option<WireProfile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireProfile {
    pub name: Option<String>,
}
