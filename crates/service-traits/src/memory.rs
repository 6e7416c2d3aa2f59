//! In-memory stores for testing.

use std::{collections::HashMap, sync::Mutex};

use {
    async_trait::async_trait,
    chrono::{DateTime, Utc},
    uuid::Uuid,
};

use leadgate_common::{
    AgentCandidate, Category, Direction, Lead, NewLead, NewStoredMessage, StoredMessage,
};

use crate::{AgentRoster, CategoryStore, Error, LeadStore, MessageStore, Result};

/// In-memory store backed by `HashMap`s and `Vec`s. No persistence — for
/// tests only. Implements every store trait so a test can wire the whole
/// pipeline against a single instance.
///
/// Categories and agents keep insertion order, which makes tie-break
/// assertions deterministic.
pub struct MemoryStore {
    leads: Mutex<HashMap<String, Lead>>,
    categories: Mutex<Vec<Category>>,
    messages: Mutex<Vec<StoredMessage>>,
    agents: Mutex<Vec<AgentCandidate>>,
    /// Extra assigned-lead counts per agent, on top of leads held here.
    assigned_offsets: Mutex<HashMap<String, u64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            leads: Mutex::new(HashMap::new()),
            categories: Mutex::new(Vec::new()),
            messages: Mutex::new(Vec::new()),
            agents: Mutex::new(Vec::new()),
            assigned_offsets: Mutex::new(HashMap::new()),
        }
    }

    pub fn seed_category(&self, category: Category) {
        let mut categories = self.categories.lock().unwrap_or_else(|e| e.into_inner());
        categories.push(category);
    }

    pub fn seed_agent(&self, agent: AgentCandidate) {
        let mut agents = self.agents.lock().unwrap_or_else(|e| e.into_inner());
        agents.push(agent);
    }

    /// Pretend `agent_id` already carries `count` assigned leads.
    pub fn set_assigned_count(&self, agent_id: impl Into<String>, count: u64) {
        let mut offsets = self
            .assigned_offsets
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        offsets.insert(agent_id.into(), count);
    }

    /// Snapshot of every stored message, in creation order.
    pub fn messages(&self) -> Vec<StoredMessage> {
        let messages = self.messages.lock().unwrap_or_else(|e| e.into_inner());
        messages.clone()
    }

    /// Snapshot of every lead.
    pub fn leads(&self) -> Vec<Lead> {
        let leads = self.leads.lock().unwrap_or_else(|e| e.into_inner());
        leads.values().cloned().collect()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LeadStore for MemoryStore {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Lead>> {
        let leads = self.leads.lock().unwrap_or_else(|e| e.into_inner());
        Ok(leads.values().find(|l| l.phone == phone).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Lead>> {
        let leads = self.leads.lock().unwrap_or_else(|e| e.into_inner());
        Ok(leads.get(id).cloned())
    }

    async fn create(&self, lead: NewLead) -> Result<Lead> {
        let mut leads = self.leads.lock().unwrap_or_else(|e| e.into_inner());
        if leads.values().any(|l| l.phone == lead.phone) {
            return Err(Error::conflict(format!(
                "lead already exists for {}",
                lead.phone
            )));
        }
        let created = Lead {
            id: Uuid::new_v4().to_string(),
            phone: lead.phone,
            display_name: lead.display_name,
            category_id: lead.category_id,
            assigned_agent_id: None,
            assigned_at: None,
            contact_name: None,
            business_name: None,
            email: None,
            pincode: None,
            created_at: Utc::now(),
        };
        leads.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn save(&self, lead: &Lead) -> Result<()> {
        let mut leads = self.leads.lock().unwrap_or_else(|e| e.into_inner());
        if !leads.contains_key(&lead.id) {
            return Err(Error::not_found(format!("lead {}", lead.id)));
        }
        leads.insert(lead.id.clone(), lead.clone());
        Ok(())
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn find_active(&self, id: &str) -> Result<Option<Category>> {
        let categories = self.categories.lock().unwrap_or_else(|e| e.into_inner());
        Ok(categories.iter().find(|c| c.id == id && c.active).cloned())
    }

    async fn list_active(&self) -> Result<Vec<Category>> {
        let categories = self.categories.lock().unwrap_or_else(|e| e.into_inner());
        Ok(categories.iter().filter(|c| c.active).cloned().collect())
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn create(&self, message: NewStoredMessage) -> Result<StoredMessage> {
        let mut messages = self.messages.lock().unwrap_or_else(|e| e.into_inner());
        let created = StoredMessage {
            id: Uuid::new_v4().to_string(),
            lead_id: message.lead_id,
            direction: message.direction,
            body: message.body,
            provider_message_id: message.provider_message_id,
            media_id: message.media_id,
            media_kind: message.media_kind,
            created_at: Utc::now(),
        };
        messages.push(created.clone());
        Ok(created)
    }

    async fn recent_inbound(
        &self,
        lead_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<StoredMessage>> {
        let messages = self.messages.lock().unwrap_or_else(|e| e.into_inner());
        Ok(messages
            .iter()
            .filter(|m| {
                m.lead_id == lead_id && m.direction == Direction::Inbound && m.created_at >= since
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AgentRoster for MemoryStore {
    async fn find_active_by_category(&self, category_id: &str) -> Result<Vec<AgentCandidate>> {
        let agents = self.agents.lock().unwrap_or_else(|e| e.into_inner());
        Ok(agents
            .iter()
            .filter(|a| a.active && a.category_ids.iter().any(|c| c == category_id))
            .cloned()
            .collect())
    }

    async fn count_assigned_leads(&self, agent_id: &str) -> Result<u64> {
        let offsets = self
            .assigned_offsets
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let base = offsets.get(agent_id).copied().unwrap_or(0);
        let leads = self.leads.lock().unwrap_or_else(|e| e.into_inner());
        let held = leads
            .values()
            .filter(|l| l.assigned_agent_id.as_deref() == Some(agent_id))
            .count() as u64;
        Ok(base + held)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_lead(phone: &str) -> NewLead {
        NewLead {
            phone: phone.into(),
            display_name: phone.into(),
            category_id: None,
        }
    }

    #[tokio::test]
    async fn create_is_atomic_on_phone() {
        let store = MemoryStore::new();
        LeadStore::create(&store, new_lead("+14155551234"))
            .await
            .unwrap();
        let err = LeadStore::create(&store, new_lead("+14155551234"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));
    }

    #[tokio::test]
    async fn recent_inbound_filters_direction_and_lead() {
        let store = MemoryStore::new();
        let lead = LeadStore::create(&store, new_lead("+10000000001"))
            .await
            .unwrap();
        for message in [
            NewStoredMessage::text(&lead.id, Direction::Inbound, "hi"),
            NewStoredMessage::text(&lead.id, Direction::Outbound, "hi"),
            NewStoredMessage::text("other", Direction::Inbound, "hi"),
        ] {
            MessageStore::create(&store, message).await.unwrap();
        }

        let since = Utc::now() - chrono::Duration::seconds(60);
        let recent = store.recent_inbound(&lead.id, since).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].direction, Direction::Inbound);
    }

    #[tokio::test]
    async fn assigned_count_includes_offsets_and_held_leads() {
        let store = MemoryStore::new();
        store.set_assigned_count("agent-1", 3);
        let mut lead = LeadStore::create(&store, new_lead("+10000000002"))
            .await
            .unwrap();
        lead.assigned_agent_id = Some("agent-1".into());
        store.save(&lead).await.unwrap();

        assert_eq!(store.count_assigned_leads("agent-1").await.unwrap(), 4);
        assert_eq!(store.count_assigned_leads("agent-2").await.unwrap(), 0);
    }
}
