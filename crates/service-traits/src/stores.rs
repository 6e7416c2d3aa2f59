use {
    async_trait::async_trait,
    chrono::{DateTime, Utc},
};

use leadgate_common::{AgentCandidate, Category, Lead, NewLead, NewStoredMessage, StoredMessage};

use crate::Result;

/// Persistent storage for leads, keyed by phone number.
#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Lead>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Lead>>;

    /// Create a lead. Must be atomic on the phone number: a second create
    /// for the same phone returns [`Error::Conflict`](crate::Error::Conflict),
    /// and the caller re-fetches instead of failing.
    async fn create(&self, lead: NewLead) -> Result<Lead>;

    async fn save(&self, lead: &Lead) -> Result<()>;
}

/// Read-only category catalog.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Look up a category by id, returning it only if active and not deleted.
    async fn find_active(&self, id: &str) -> Result<Option<Category>>;

    /// All active categories. Enumeration order is part of the contract:
    /// classification and selection ties resolve to the first entry.
    async fn list_active(&self) -> Result<Vec<Category>>;
}

/// Persistent storage for conversation messages.
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn create(&self, message: NewStoredMessage) -> Result<StoredMessage>;

    /// Inbound messages for a lead created at or after `since`, used by the
    /// duplicate guard.
    async fn recent_inbound(&self, lead_id: &str, since: DateTime<Utc>)
    -> Result<Vec<StoredMessage>>;
}

/// Roster of human agents eligible for assignment.
#[async_trait]
pub trait AgentRoster: Send + Sync {
    /// Active agents linked to the category, in enumeration order (ties in
    /// least-load selection resolve to the first entry).
    async fn find_active_by_category(&self, category_id: &str) -> Result<Vec<AgentCandidate>>;

    /// Lifetime count of leads currently assigned to the agent.
    async fn count_assigned_leads(&self, agent_id: &str) -> Result<u64>;
}
