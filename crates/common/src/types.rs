use {
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

/// Direction of a stored conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inbound,
    Outbound,
}

/// A prospective contact, keyed by phone number.
///
/// At most one live lead exists per phone number; the store enforces this
/// with an atomic create (see `leadgate_service_traits::LeadStore`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    /// E.164-normalized phone number.
    pub phone: String,
    /// Display name shown to operators. Falls back to the phone number.
    pub display_name: String,
    /// Classification bucket, unset until classified or selected.
    pub category_id: Option<String>,
    /// Assigned operator, unset until an agent is picked.
    pub assigned_agent_id: Option<String>,
    pub assigned_at: Option<DateTime<Utc>>,
    /// Contact details collected through the structured form.
    pub contact_name: Option<String>,
    pub business_name: Option<String>,
    pub email: Option<String>,
    pub pincode: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to create a lead. The store mints the id and timestamp.
#[derive(Debug, Clone)]
pub struct NewLead {
    pub phone: String,
    pub display_name: String,
    pub category_id: Option<String>,
}

/// A classification bucket with the keywords used to route inbound content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Ordered keyword list; order is preserved for scoring output.
    pub keywords: Vec<String>,
    pub active: bool,
}

/// A human operator eligible for lead assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentCandidate {
    pub id: String,
    pub display_name: String,
    pub active: bool,
    /// Categories this agent handles.
    pub category_ids: Vec<String>,
}

/// A persisted conversation message, inbound or outbound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: String,
    pub lead_id: String,
    pub direction: Direction,
    pub body: String,
    /// Opaque provider message id, kept for idempotency and audit.
    pub provider_message_id: Option<String>,
    pub media_id: Option<String>,
    pub media_kind: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to persist a message. The store mints the id and timestamp.
#[derive(Debug, Clone)]
pub struct NewStoredMessage {
    pub lead_id: String,
    pub direction: Direction,
    pub body: String,
    pub provider_message_id: Option<String>,
    pub media_id: Option<String>,
    pub media_kind: Option<String>,
}

impl NewStoredMessage {
    /// Convenience constructor for plain text records with no media.
    #[must_use]
    pub fn text(lead_id: impl Into<String>, direction: Direction, body: impl Into<String>) -> Self {
        Self {
            lead_id: lead_id.into(),
            direction,
            body: body.into(),
            provider_message_id: None,
            media_id: None,
            media_kind: None,
        }
    }
}
