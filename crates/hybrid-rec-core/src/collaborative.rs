//! Neighbor-based collaborative filtering.
//!
//! A neighbor is any other user who rated one of the target user's courses
//! positively. Every course a neighbor rated positively is a candidate; the
//! candidates are returned unweighted, in catalog order.

use std::collections::HashSet;

use tracing::debug;

use crate::catalog::{Catalog, RatingStore};
use crate::config::EngineConfig;
use crate::types::*;

/// Collaborative recommender settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CollaborativeRecommender {
    /// Minimum score for a rating to count as positive
    pub positive_threshold: f64,
    /// Drop courses the target user already rated
    pub exclude_rated_items: bool,
}

impl Default for CollaborativeRecommender {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl CollaborativeRecommender {
    /// Create a recommender from the engine configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            positive_threshold: config.positive_rating_threshold,
            exclude_rated_items: config.exclude_rated_items,
        }
    }

    fn is_positive(&self, rating: &Rating) -> bool {
        rating.score >= self.positive_threshold
    }

    /// Users other than `user_id` who rated one of its courses positively.
    pub fn neighbors(&self, user_id: UserId, ratings: &RatingStore) -> HashSet<UserId> {
        let rated: HashSet<ItemId> = ratings.for_user(user_id).map(|r| r.item_id).collect();

        rated
            .iter()
            .flat_map(|&item_id| ratings.for_item(item_id))
            .filter(|r| r.user_id != user_id && self.is_positive(r))
            .map(|r| r.user_id)
            .collect()
    }

    /// Course names recommended to `user_id`, in catalog order.
    ///
    /// Empty when the user has no ratings or no neighbors. Candidate IDs
    /// missing from the catalog are dropped. No result limit is applied.
    pub fn recommend(&self, user_id: UserId, ratings: &RatingStore, catalog: &Catalog) -> Vec<String> {
        if !ratings.has_user(user_id) {
            debug!(user_id, "User has no ratings, no collaborative recommendations");
            return Vec::new();
        }

        let neighbors = self.neighbors(user_id, ratings);
        if neighbors.is_empty() {
            debug!(user_id, "No neighbors found");
            return Vec::new();
        }

        let mut candidates: HashSet<ItemId> = neighbors
            .iter()
            .flat_map(|&neighbor| ratings.for_user(neighbor))
            .filter(|r| self.is_positive(r))
            .map(|r| r.item_id)
            .collect();

        if self.exclude_rated_items {
            for rating in ratings.for_user(user_id) {
                candidates.remove(&rating.item_id);
            }
        }

        let results: Vec<String> = catalog
            .iter()
            .filter(|item| candidates.contains(&item.id))
            .map(|item| item.name.clone())
            .collect();

        debug!(
            user_id,
            neighbors = neighbors.len(),
            candidates = candidates.len(),
            count = results.len(),
            "Collaborative recommendations"
        );
        results
    }
}
