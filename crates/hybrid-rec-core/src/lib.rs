//! Hybrid Rec Core - Course Recommendation Engine
//!
//! This crate recommends courses with three independent strategies:
//! - Content-based: TF-IDF cosine similarity between course descriptions
//! - Collaborative: courses liked by users who share a positive rating
//! - Knowledge-based: fuzzy match between course names and the user's sector
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     RecommendationEngine                        │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐           │
//! │  │   Catalog    │  │ RatingStore  │  │ SectorStore  │           │
//! │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘           │
//! │         │                 │                 │                   │
//! │  ┌──────┴───────┐  ┌──────┴───────┐  ┌──────┴───────┐           │
//! │  │ ContentIndex │  │Collaborative │  │  Knowledge   │           │
//! │  │   (TF-IDF)   │  │ Recommender  │  │ Recommender  │           │
//! │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘           │
//! │         │                 │                 │                   │
//! │         └─────────────────┼─────────────────┘                   │
//! │                    ┌──────┴──────┐                              │
//! │                    │  Dispatcher │                              │
//! │                    └─────────────┘                              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```
//! use hybrid_rec_core::{
//!     Catalog, Item, Rating, RatingStore, RecommendRequest, RecommendationEngine, SectorStore,
//! };
//!
//! let catalog = Catalog::new(vec![
//!     Item::new(1, "Intro to Python", "python basics programming"),
//!     Item::new(2, "Advanced Python", "python programming deep dive"),
//!     Item::new(3, "Cooking 101", "recipes and kitchen skills"),
//! ]);
//! let ratings = RatingStore::new(vec![Rating::new(1, 1, 5.0), Rating::new(2, 1, 5.0)]);
//!
//! let engine = RecommendationEngine::new(catalog, ratings, SectorStore::default());
//! let recs = engine.recommend(RecommendRequest::content("Intro to Python").with_top_n(1))?;
//! assert_eq!(recs, vec!["Advanced Python"]);
//! # Ok::<(), hybrid_rec_core::Error>(())
//! ```

pub mod catalog;
pub mod collaborative;
pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod fuzzy;
pub mod knowledge;
pub mod text;
pub mod types;

#[cfg(feature = "csv")]
pub mod source;

pub use catalog::{Catalog, RatingStore, SectorStore, StoreStats};
pub use collaborative::CollaborativeRecommender;
pub use config::EngineConfig;
pub use content::{ContentIndex, SimilarityMatrix, TfIdfModel};
pub use engine::RecommendationEngine;
pub use error::{Error, Result};
pub use knowledge::KnowledgeRecommender;
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log library initialization
pub fn init() {
    tracing::info!(version = VERSION, "Hybrid Rec Core initialized");
}
