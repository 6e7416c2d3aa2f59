use std::sync::Arc;

use {anyhow::Result, tracing::debug};

use {leadgate_common::Category, leadgate_service_traits::CategoryStore};

use crate::score::score_keywords;

/// Scores inbound content against the active category catalog.
pub struct CategoryDetector {
    categories: Arc<dyn CategoryStore>,
}

impl CategoryDetector {
    pub fn new(categories: Arc<dyn CategoryStore>) -> Self {
        Self { categories }
    }

    /// The active category with the strictly highest keyword score, or none
    /// when nothing scores above zero. Ties keep the first candidate in
    /// catalog order.
    pub async fn detect(&self, content: &str) -> Result<Option<Category>> {
        let candidates = self.categories.list_active().await?;
        let mut best: Option<(u32, Category)> = None;

        for category in candidates {
            let scored = score_keywords(content, &category.keywords);
            if scored.score == 0 {
                continue;
            }
            debug!(
                category = %category.name,
                score = scored.score,
                matched = ?scored.matched,
                "scored category"
            );
            if best.as_ref().is_none_or(|(top, _)| scored.score > *top) {
                best = Some((scored.score, category));
            }
        }

        Ok(best.map(|(_, category)| category))
    }
}
