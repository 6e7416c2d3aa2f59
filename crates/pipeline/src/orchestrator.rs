use std::sync::Arc;

use {
    anyhow::{Result, bail},
    chrono::Utc,
    tracing::{info, warn},
};

use {
    leadgate_assign::select_for_category,
    leadgate_classify::CategoryDetector,
    leadgate_common::{Direction, Lead, NewLead, NewStoredMessage, StoredMessage},
    leadgate_service_traits::{
        AgentRoster, AutoReplyDispatcher, CategoryStore, ChannelSender, Error as StoreError,
        LeadStore, MessageStore, NotificationSink, SlaTracker,
    },
    leadgate_wire::{CATEGORY_SELECT_PREFIX, FlowFields, FlowToken, MessageKind, ParsedMessage},
};

/// Every external collaborator the orchestrator drives.
pub struct Collaborators {
    pub leads: Arc<dyn LeadStore>,
    pub categories: Arc<dyn CategoryStore>,
    pub messages: Arc<dyn MessageStore>,
    pub roster: Arc<dyn AgentRoster>,
    pub channel: Arc<dyn ChannelSender>,
    pub sla: Arc<dyn SlaTracker>,
    pub auto_reply: Arc<dyn AutoReplyDispatcher>,
    pub notifier: Arc<dyn NotificationSink>,
}

/// Drives the acquisition conversation over a lead's lifecycle:
/// no lead → lead without category → categorized → assigned.
///
/// Logical inconsistencies (unknown token, missing lead or category) are
/// logged and swallowed — retrying them would reproduce the same outcome.
/// Anything else propagates so the consumer leaves the message for
/// redelivery.
pub struct Orchestrator {
    leads: Arc<dyn LeadStore>,
    categories: Arc<dyn CategoryStore>,
    messages: Arc<dyn MessageStore>,
    roster: Arc<dyn AgentRoster>,
    channel: Arc<dyn ChannelSender>,
    sla: Arc<dyn SlaTracker>,
    auto_reply: Arc<dyn AutoReplyDispatcher>,
    notifier: Arc<dyn NotificationSink>,
    detector: CategoryDetector,
}

impl Orchestrator {
    pub fn new(collaborators: Collaborators) -> Self {
        let detector = CategoryDetector::new(Arc::clone(&collaborators.categories));
        Self {
            leads: collaborators.leads,
            categories: collaborators.categories,
            messages: collaborators.messages,
            roster: collaborators.roster,
            channel: collaborators.channel,
            sla: collaborators.sla,
            auto_reply: collaborators.auto_reply,
            notifier: collaborators.notifier,
            detector,
        }
    }

    /// Dispatch a parsed message to its conversation branch.
    pub async fn handle(&self, message: &ParsedMessage) -> Result<()> {
        match &message.kind {
            MessageKind::ListReply { id, .. } if id.starts_with(CATEGORY_SELECT_PREFIX) => {
                self.handle_category_selection(message, id).await
            },
            MessageKind::FlowReply {
                token: Some(token),
                fields,
            } => self.handle_flow_reply(message, token, fields.as_ref()).await,
            // Plain content, and interactive replies carrying no protocol
            // marker, all land on the new-inbound branch.
            MessageKind::Text
            | MessageKind::Media { .. }
            | MessageKind::ButtonReply
            | MessageKind::ListReply { .. }
            | MessageKind::FlowReply { .. }
            | MessageKind::Other { .. } => self.handle_inbound_content(message).await,
        }
    }

    /// New inbound content: record it for an existing lead, or classify and
    /// create a lead for an unknown phone number.
    async fn handle_inbound_content(&self, message: &ParsedMessage) -> Result<()> {
        if let Some(lead) = self.leads.find_by_phone(&message.phone).await? {
            let stored = self.store_inbound(&lead.id, message).await?;
            self.notify(&lead, &stored).await;
            return Ok(());
        }

        let detected = self.detector.detect(&message.content).await?;
        let new_lead = NewLead {
            phone: message.phone.clone(),
            display_name: message
                .sender_name
                .clone()
                .unwrap_or_else(|| message.phone.clone()),
            category_id: detected.as_ref().map(|c| c.id.clone()),
        };

        let lead = match self.leads.create(new_lead).await {
            Ok(lead) => lead,
            Err(StoreError::Conflict { .. }) => {
                // Lost a create race (redelivery, or a concurrent consumer).
                // Continue on the existing-lead path.
                let Some(existing) = self.leads.find_by_phone(&message.phone).await? else {
                    bail!("lead vanished after create conflict for {}", message.phone);
                };
                let stored = self.store_inbound(&existing.id, message).await?;
                self.notify(&existing, &stored).await;
                return Ok(());
            },
            Err(e) => return Err(e.into()),
        };
        info!(
            lead_id = %lead.id,
            phone = %lead.phone,
            category = ?lead.category_id,
            "created lead"
        );

        // The SLA clock starts with the lead; a tracker failure must not
        // undo lead creation.
        if let Err(e) = self.sla.initialize(&lead.id).await {
            warn!(lead_id = %lead.id, error = %e, "sla initialization failed");
        }

        let stored = self.store_inbound(&lead.id, message).await?;
        self.notify(&lead, &stored).await;

        match detected {
            Some(category) => self.send_flow_form(&lead, &category.id).await,
            None => self.send_category_menu(&lead).await,
        }
    }

    /// The sender picked a category from the selection list.
    async fn handle_category_selection(
        &self,
        message: &ParsedMessage,
        selection_id: &str,
    ) -> Result<()> {
        let category_id = selection_id
            .strip_prefix(CATEGORY_SELECT_PREFIX)
            .unwrap_or(selection_id);

        let Some(mut lead) = self.leads.find_by_phone(&message.phone).await? else {
            warn!(phone = %message.phone, "category selection from unknown phone, dropping");
            return Ok(());
        };
        let Some(category) = self.categories.find_active(category_id).await? else {
            warn!(category_id, "selected category missing or inactive, dropping");
            return Ok(());
        };

        lead.category_id = Some(category.id.clone());
        self.leads.save(&lead).await?;
        info!(lead_id = %lead.id, category_id = %category.id, "lead categorized by selection");

        self.store_inbound(&lead.id, message).await?;
        self.send_flow_form(&lead, &category.id).await
    }

    /// The sender submitted the detail-collection form.
    async fn handle_flow_reply(
        &self,
        message: &ParsedMessage,
        raw_token: &str,
        fields: Option<&FlowFields>,
    ) -> Result<()> {
        let token: FlowToken = match raw_token.parse() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "dropping flow reply with unusable token");
                return Ok(());
            },
        };
        let Some(mut lead) = self.leads.find_by_id(token.lead_id()).await? else {
            warn!(lead_id = %token.lead_id(), "flow reply for unknown lead, dropping");
            return Ok(());
        };

        if let Some(fields) = fields {
            apply_fields(&mut lead, fields);
        }
        if lead.category_id.is_none()
            && let Some(category_id) = token.category_id()
        {
            lead.category_id = Some(category_id.to_string());
        }

        if let Some(agent_id) =
            select_for_category(self.roster.as_ref(), lead.category_id.as_deref()).await?
        {
            info!(lead_id = %lead.id, agent_id, "assigning lead");
            lead.assigned_agent_id = Some(agent_id);
            lead.assigned_at = Some(Utc::now());
        }
        self.leads.save(&lead).await?;

        let stored = self
            .messages
            .create(NewStoredMessage {
                lead_id: lead.id.clone(),
                direction: Direction::Inbound,
                body: summarize_fields(fields, &message.content),
                provider_message_id: provider_id(message),
                media_id: None,
                media_kind: None,
            })
            .await?;
        self.notify(&lead, &stored).await;

        if lead.category_id.is_some() {
            self.auto_reply.send_for_lead(&lead.id).await?;
        }
        Ok(())
    }

    /// Persist an inbound record mirroring the parsed message.
    async fn store_inbound(&self, lead_id: &str, message: &ParsedMessage) -> Result<StoredMessage> {
        let (media_id, media_kind) = match &message.kind {
            MessageKind::Media { media_id, kind } => {
                (media_id.clone(), Some(kind.as_str().to_string()))
            },
            _ => (None, None),
        };
        let stored = self
            .messages
            .create(NewStoredMessage {
                lead_id: lead_id.to_string(),
                direction: Direction::Inbound,
                body: message.content.clone(),
                provider_message_id: provider_id(message),
                media_id,
                media_kind,
            })
            .await?;
        Ok(stored)
    }

    async fn notify(&self, lead: &Lead, stored: &StoredMessage) {
        self.notifier.notify_new_message(&lead.id, stored).await;
        self.notifier.notify_eligible_users(lead, stored).await;
    }

    /// Send the detail-collection form and mirror it as an outbound record.
    async fn send_flow_form(&self, lead: &Lead, category_id: &str) -> Result<()> {
        let token = FlowToken::Category {
            lead_id: lead.id.clone(),
            category_id: category_id.to_string(),
        }
        .to_string();
        self.channel.send_flow_form(&lead.phone, &token).await?;
        self.messages
            .create(NewStoredMessage::text(
                &lead.id,
                Direction::Outbound,
                format!("Sent detail-collection form ({token})"),
            ))
            .await?;
        Ok(())
    }

    /// Send the category-selection list, or warn when the catalog is empty
    /// and leave the lead unclassified until a later classifiable message.
    async fn send_category_menu(&self, lead: &Lead) -> Result<()> {
        let catalog = self.categories.list_active().await?;
        if catalog.is_empty() {
            warn!(lead_id = %lead.id, "no active categories, lead stays unclassified");
            return Ok(());
        }
        self.channel
            .send_category_list(&lead.phone, &lead.display_name, &catalog)
            .await?;
        self.messages
            .create(NewStoredMessage::text(
                &lead.id,
                Direction::Outbound,
                "Sent category selection list",
            ))
            .await?;
        Ok(())
    }
}

fn provider_id(message: &ParsedMessage) -> Option<String> {
    (!message.provider_message_id.is_empty()).then(|| message.provider_message_id.clone())
}

/// Copy present form fields onto the lead.
fn apply_fields(lead: &mut Lead, fields: &FlowFields) {
    if let Some(name) = fields.effective_name() {
        lead.contact_name = Some(name);
    }
    if let Some(business) = &fields.business_name {
        lead.business_name = Some(business.clone());
    }
    if let Some(email) = &fields.email {
        lead.email = Some(email.clone());
    }
    if let Some(pincode) = &fields.pincode {
        lead.pincode = Some(pincode.clone());
    }
}

/// Human-readable digest of a form submission for the conversation log.
fn summarize_fields(fields: Option<&FlowFields>, fallback: &str) -> String {
    let Some(fields) = fields else {
        return fallback.to_string();
    };
    let mut parts = Vec::new();
    if let Some(name) = fields.effective_name() {
        parts.push(format!("Name: {name}"));
    }
    if let Some(business) = &fields.business_name {
        parts.push(format!("Business: {business}"));
    }
    if let Some(email) = &fields.email {
        parts.push(format!("Email: {email}"));
    }
    if let Some(pincode) = &fields.pincode {
        parts.push(format!("Pincode: {pincode}"));
    }
    if parts.is_empty() {
        fallback.to_string()
    } else {
        format!("[Form] {}", parts.join(", "))
    }
}
