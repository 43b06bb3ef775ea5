//! Sector-based (knowledge) recommendations.
//!
//! Course names are scored against the user's sector label with
//! [`fuzzy::partial_ratio`]. Scores are kept in a per-call buffer; the
//! catalog is only read.

use tracing::debug;

use crate::catalog::{Catalog, SectorStore};
use crate::fuzzy;
use crate::types::*;

/// A course score against a sector label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorMatch {
    /// Catalog position
    pub index: usize,
    /// Partial-ratio score (0-100)
    pub score: u8,
}

/// Knowledge-based recommender.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnowledgeRecommender;

impl KnowledgeRecommender {
    /// Create a recommender
    pub fn new() -> Self {
        Self
    }

    /// Score every course name against `sector_label`, best first.
    ///
    /// Both sides are lowercased. Ties keep catalog order.
    pub fn rank(&self, sector_label: &str, catalog: &Catalog) -> Vec<SectorMatch> {
        let label = sector_label.to_lowercase();

        let mut scores: Vec<SectorMatch> = catalog
            .iter()
            .enumerate()
            .map(|(index, item)| SectorMatch {
                index,
                score: fuzzy::partial_ratio(&item.name.to_lowercase(), &label),
            })
            .collect();
        scores.sort_by(|a, b| b.score.cmp(&a.score));

        scores
    }

    /// Top `k` course names for the sector of `user_id`.
    ///
    /// Empty when the user has no sector.
    pub fn recommend(
        &self,
        user_id: UserId,
        sectors: &SectorStore,
        catalog: &Catalog,
        k: usize,
    ) -> Vec<String> {
        let Some(label) = sectors.sector_for(user_id) else {
            debug!(user_id, "User has no sector, no knowledge recommendations");
            return Vec::new();
        };
        debug!(user_id, sector = label, "Selected user sector");

        let ranked = self.rank(label, catalog);
        for m in &ranked {
            if let Some(item) = catalog.get(m.index) {
                debug!(course = %item.name, similarity = m.score, "Sector match");
            }
        }

        ranked
            .into_iter()
            .take(k)
            .filter_map(|m| catalog.get(m.index))
            .map(|item| item.name.clone())
            .collect()
    }
}
