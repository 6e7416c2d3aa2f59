use std::sync::Arc;

use {
    anyhow::Result,
    chrono::{Duration, Utc},
};

use leadgate_service_traits::{LeadStore, MessageStore};

/// How far back identical content counts as a duplicate.
const DEDUP_WINDOW_SECS: i64 = 60;

/// Best-effort suppression of provider redeliveries.
///
/// Keyed on content equality within a short window, not the provider message
/// id, so it blunts redelivery storms without being a strict idempotency
/// guarantee.
pub struct DuplicateGuard {
    leads: Arc<dyn LeadStore>,
    messages: Arc<dyn MessageStore>,
}

impl DuplicateGuard {
    pub fn new(leads: Arc<dyn LeadStore>, messages: Arc<dyn MessageStore>) -> Self {
        Self { leads, messages }
    }

    /// True when an identical inbound message for this phone number was
    /// stored within the window. A phone with no lead can never be a
    /// duplicate.
    pub async fn is_duplicate(&self, phone: &str, content: &str) -> Result<bool> {
        let Some(lead) = self.leads.find_by_phone(phone).await? else {
            return Ok(false);
        };
        let since = Utc::now() - Duration::seconds(DEDUP_WINDOW_SECS);
        let recent = self.messages.recent_inbound(&lead.id, since).await?;
        Ok(recent.iter().any(|m| m.body == content))
    }
}
