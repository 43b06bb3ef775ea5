//! Recommendation engine - owns the loaded tables and dispatches requests
//!
//! The engine is built once at startup: the catalog is indexed eagerly and
//! everything is read-only afterwards, so a single engine can serve any
//! number of requests (and be shared across threads by reference).

use std::collections::HashSet;

use tracing::{debug, info, instrument, warn};

use crate::{
    catalog::{Catalog, RatingStore, SectorStore, StoreStats},
    collaborative::CollaborativeRecommender,
    config::EngineConfig,
    content::ContentIndex,
    knowledge::KnowledgeRecommender,
    types::*,
    Result,
};

/// Engine context holding every store and precomputed index.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    config: EngineConfig,
    catalog: Catalog,
    content: ContentIndex,
    ratings: RatingStore,
    sectors: SectorStore,
    collaborative: CollaborativeRecommender,
    knowledge: KnowledgeRecommender,
}

impl RecommendationEngine {
    /// Build an engine with the default configuration.
    pub fn new(catalog: Catalog, ratings: RatingStore, sectors: SectorStore) -> Self {
        Self::assemble(catalog, ratings, sectors, EngineConfig::default())
    }

    /// Validate `config`, index the catalog and assemble the engine.
    pub fn build(
        catalog: Catalog,
        ratings: RatingStore,
        sectors: SectorStore,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(catalog, ratings, sectors, config))
    }

    fn assemble(
        catalog: Catalog,
        ratings: RatingStore,
        sectors: SectorStore,
        config: EngineConfig,
    ) -> Self {
        let content = ContentIndex::build(&catalog);
        let collaborative = CollaborativeRecommender::from_config(&config);

        let known: HashSet<ItemId> = catalog.iter().map(|item| item.id).collect();
        let orphaned = ratings
            .ratings()
            .iter()
            .filter(|r| !known.contains(&r.item_id))
            .count();
        if orphaned > 0 {
            warn!(orphaned, "Ratings reference courses missing from the catalog");
        }

        info!(
            items = catalog.len(),
            ratings = ratings.len(),
            sectors = sectors.len(),
            "Recommendation engine ready"
        );

        Self {
            config,
            catalog,
            content,
            ratings,
            sectors,
            collaborative,
            knowledge: KnowledgeRecommender::new(),
        }
    }

    /// Validate and run a request.
    ///
    /// A request missing a mode-required parameter is rejected before any
    /// store is read. Lookups that find nothing return an empty list.
    #[instrument(skip(self), fields(mode = %request.mode))]
    pub fn recommend(&self, request: RecommendRequest) -> Result<Vec<String>> {
        let query = request.into_query(&self.config)?;
        Ok(self.dispatch(&query))
    }

    /// Route a validated query to its strategy.
    pub fn dispatch(&self, query: &Query) -> Vec<String> {
        let results = match query {
            Query::Content { item_name, top_n } => {
                self.content.recommend(&self.catalog, item_name, *top_n)
            }
            Query::Collaborative { user_id } => {
                self.collaborative.recommend(*user_id, &self.ratings, &self.catalog)
            }
            Query::Knowledge { user_id, top_n } => {
                self.knowledge.recommend(*user_id, &self.sectors, &self.catalog, *top_n)
            }
        };

        debug!(mode = %query.mode(), count = results.len(), "Dispatched query");
        results
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Course catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Content similarity index
    pub fn content_index(&self) -> &ContentIndex {
        &self.content
    }

    /// Rating store
    pub fn ratings(&self) -> &RatingStore {
        &self.ratings
    }

    /// Sector store
    pub fn sectors(&self) -> &SectorStore {
        &self.sectors
    }

    /// Size summary of the loaded data
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            items: self.catalog.len(),
            ratings: self.ratings.len(),
            rating_users: self.ratings.user_count(),
            user_range: self.ratings.user_range(),
            sector_users: self.sectors.user_count(),
            vocabulary: self.content.vocabulary_size(),
        }
    }
}
