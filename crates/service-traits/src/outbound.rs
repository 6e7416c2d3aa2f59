use async_trait::async_trait;

use leadgate_common::{Category, Lead, StoredMessage};

use crate::Result;

/// Send messages to the channel provider.
#[async_trait]
pub trait ChannelSender: Send + Sync {
    /// Send the structured data-collection form, embedding the correlation
    /// token the provider will echo back in the eventual reply.
    async fn send_flow_form(&self, phone: &str, correlation_token: &str) -> Result<()>;

    /// Send the interactive category-selection list.
    async fn send_category_list(
        &self,
        phone: &str,
        display_name: &str,
        categories: &[Category],
    ) -> Result<()>;
}

/// SLA timer bookkeeping. Only initialization is driven from the pipeline;
/// failures are logged at the call site and never abort lead creation.
#[async_trait]
pub trait SlaTracker: Send + Sync {
    async fn initialize(&self, lead_id: &str) -> Result<()>;
}

/// Template + category-media auto-reply, triggered once a lead has a category.
#[async_trait]
pub trait AutoReplyDispatcher: Send + Sync {
    async fn send_for_lead(&self, lead_id: &str) -> Result<()>;
}

/// Real-time fan-out to connected operator UIs. Fire-and-forget.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Broadcast a newly stored message for live conversation views.
    async fn notify_new_message(&self, lead_id: &str, message: &StoredMessage);

    /// Notify the users eligible to see this lead (role/category scoped).
    async fn notify_eligible_users(&self, lead: &Lead, message: &StoredMessage);
}
