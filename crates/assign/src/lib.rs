//! Least-load agent selection.

use {
    anyhow::Result,
    tracing::{debug, info},
};

use leadgate_service_traits::AgentRoster;

/// Pick the agent to assign a lead in `category_id` to.
///
/// Selection is least-load: the active agent linked to the category with the
/// smallest lifetime assigned-lead count wins. Ties keep the first candidate
/// in roster order. No category, or no eligible agent, means no selection —
/// neither is an error.
pub async fn select_for_category(
    roster: &dyn AgentRoster,
    category_id: Option<&str>,
) -> Result<Option<String>> {
    let Some(category_id) = category_id else {
        return Ok(None);
    };

    let candidates = roster.find_active_by_category(category_id).await?;
    if candidates.is_empty() {
        debug!(category_id, "no eligible agents for category");
        return Ok(None);
    }

    let mut best: Option<(u64, String)> = None;
    for candidate in candidates {
        let count = roster.count_assigned_leads(&candidate.id).await?;
        debug!(agent_id = %candidate.id, count, "candidate load");
        if best.as_ref().is_none_or(|(least, _)| count < *least) {
            best = Some((count, candidate.id));
        }
    }

    if let Some((count, agent_id)) = best {
        info!(category_id, agent_id, count, "selected least-loaded agent");
        return Ok(Some(agent_id));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use {
        leadgate_common::AgentCandidate,
        leadgate_service_traits::memory::MemoryStore,
    };

    use super::*;

    fn agent(id: &str, categories: &[&str]) -> AgentCandidate {
        AgentCandidate {
            id: id.into(),
            display_name: id.into(),
            active: true,
            category_ids: categories.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn picks_least_loaded() {
        let store = Arc::new(MemoryStore::new());
        store.seed_agent(agent("a1", &["cat-1"]));
        store.seed_agent(agent("a2", &["cat-1"]));
        store.set_assigned_count("a1", 5);
        store.set_assigned_count("a2", 2);

        let picked = select_for_category(store.as_ref(), Some("cat-1"))
            .await
            .unwrap();
        assert_eq!(picked.as_deref(), Some("a2"));
    }

    #[tokio::test]
    async fn tie_keeps_roster_order() {
        let store = Arc::new(MemoryStore::new());
        store.seed_agent(agent("first", &["cat-1"]));
        store.seed_agent(agent("second", &["cat-1"]));

        let picked = select_for_category(store.as_ref(), Some("cat-1"))
            .await
            .unwrap();
        assert_eq!(picked.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn no_category_means_no_selection() {
        let store = MemoryStore::new();
        assert!(select_for_category(&store, None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn no_eligible_agents_means_no_selection() {
        let store = MemoryStore::new();
        store.seed_agent(agent("a1", &["other-category"]));
        assert!(
            select_for_category(&store, Some("cat-1"))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn inactive_agents_are_skipped() {
        let store = MemoryStore::new();
        let mut inactive = agent("a1", &["cat-1"]);
        inactive.active = false;
        store.seed_agent(inactive);
        store.seed_agent(agent("a2", &["cat-1"]));
        store.set_assigned_count("a2", 100);

        let picked = select_for_category(&store, Some("cat-1")).await.unwrap();
        assert_eq!(picked.as_deref(), Some("a2"));
    }
}
