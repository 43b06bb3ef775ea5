//! Core types shared by the catalog, the strategies and the dispatcher.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{Error, Result};

// =============================================================================
// Data Model
// =============================================================================

/// Course identifier as found in the catalog source
pub type ItemId = i64;

/// User identifier as found in the ratings and sector sources
pub type UserId = i64;

/// A course in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Course ID
    pub id: ItemId,
    /// Display name, used as the lookup key for content recommendations
    pub name: String,
    /// Free-text description (empty when the source cell is missing)
    #[serde(default)]
    pub description: String,
}

impl Item {
    /// Create a new catalog item
    pub fn new(id: ItemId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A single (user, course, score) rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Rating user
    pub user_id: UserId,
    /// Rated course
    pub item_id: ItemId,
    /// Rating score (5-star scale in the bundled data)
    pub score: f64,
}

impl Rating {
    /// Create a new rating
    pub fn new(user_id: UserId, item_id: ItemId, score: f64) -> Self {
        Self {
            user_id,
            item_id,
            score,
        }
    }
}

/// A user's sector label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorAssignment {
    /// User the label belongs to
    pub user_id: UserId,
    /// Free-text sector label, e.g. "data science"
    pub sector_label: String,
}

impl SectorAssignment {
    /// Create a new sector assignment
    pub fn new(user_id: UserId, sector_label: impl Into<String>) -> Self {
        Self {
            user_id,
            sector_label: sector_label.into(),
        }
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Recommendation strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendMode {
    /// TF-IDF similarity between course descriptions
    Content,
    /// Neighbors found through shared positive ratings
    Collaborative,
    /// Fuzzy match between course names and the user's sector
    Knowledge,
}

impl RecommendMode {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendMode::Content => "content",
            RecommendMode::Collaborative => "collaborative",
            RecommendMode::Knowledge => "knowledge",
        }
    }
}

impl fmt::Display for RecommendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecommendMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "content" | "content-based" => Ok(RecommendMode::Content),
            "collaborative" | "collaborative-filtering" | "cf" => Ok(RecommendMode::Collaborative),
            "knowledge" | "knowledge-based" | "sector" => Ok(RecommendMode::Knowledge),
            other => Err(Error::InvalidParameter {
                parameter: "mode",
                reason: format!("unknown mode '{}'", other),
            }),
        }
    }
}

/// A recommendation request as received from a caller.
///
/// `item_name` is required for [`RecommendMode::Content`], `user_id` for the
/// two user-based modes. `top_n` falls back to the engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    /// Strategy to run
    pub mode: RecommendMode,
    /// Seed course name (content mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    /// Target user (collaborative and knowledge modes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// Maximum number of results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_n: Option<usize>,
}

impl RecommendRequest {
    /// Content request for courses similar to `item_name`
    pub fn content(item_name: impl Into<String>) -> Self {
        Self {
            mode: RecommendMode::Content,
            item_name: Some(item_name.into()),
            user_id: None,
            top_n: None,
        }
    }

    /// Collaborative request for `user_id`
    pub fn collaborative(user_id: UserId) -> Self {
        Self {
            mode: RecommendMode::Collaborative,
            item_name: None,
            user_id: Some(user_id),
            top_n: None,
        }
    }

    /// Sector-based request for `user_id`
    pub fn knowledge(user_id: UserId) -> Self {
        Self {
            mode: RecommendMode::Knowledge,
            item_name: None,
            user_id: Some(user_id),
            top_n: None,
        }
    }

    /// Set the maximum number of results
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }

    /// Validate the request and resolve defaults.
    ///
    /// Fails when a mode-required parameter is missing or `top_n` is zero.
    pub fn into_query(self, config: &EngineConfig) -> Result<Query> {
        if self.top_n == Some(0) {
            return Err(Error::InvalidParameter {
                parameter: "top_n",
                reason: "must be at least 1".to_string(),
            });
        }

        match self.mode {
            RecommendMode::Content => {
                let item_name = self.item_name.ok_or(Error::MissingParameter {
                    mode: self.mode,
                    parameter: "item_name",
                })?;
                Ok(Query::Content {
                    item_name,
                    top_n: self.top_n.unwrap_or(config.content_top_n),
                })
            }
            RecommendMode::Collaborative => {
                let user_id = self.user_id.ok_or(Error::MissingParameter {
                    mode: self.mode,
                    parameter: "user_id",
                })?;
                Ok(Query::Collaborative { user_id })
            }
            RecommendMode::Knowledge => {
                let user_id = self.user_id.ok_or(Error::MissingParameter {
                    mode: self.mode,
                    parameter: "user_id",
                })?;
                Ok(Query::Knowledge {
                    user_id,
                    top_n: self.top_n.unwrap_or(config.knowledge_top_n),
                })
            }
        }
    }
}

/// A validated request, ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Courses with descriptions similar to `item_name`
    Content { item_name: String, top_n: usize },
    /// Courses liked by users who share a positive rating with `user_id`
    Collaborative { user_id: UserId },
    /// Courses whose names best match the sector of `user_id`
    Knowledge { user_id: UserId, top_n: usize },
}

impl Query {
    /// Strategy this query is routed to
    pub fn mode(&self) -> RecommendMode {
        match self {
            Query::Content { .. } => RecommendMode::Content,
            Query::Collaborative { .. } => RecommendMode::Collaborative,
            Query::Knowledge { .. } => RecommendMode::Knowledge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("content".parse::<RecommendMode>().unwrap(), RecommendMode::Content);
        assert_eq!("Content-Based".parse::<RecommendMode>().unwrap(), RecommendMode::Content);
        assert_eq!("cf".parse::<RecommendMode>().unwrap(), RecommendMode::Collaborative);
        assert_eq!("sector".parse::<RecommendMode>().unwrap(), RecommendMode::Knowledge);
        assert!("hybrid".parse::<RecommendMode>().is_err());
    }

    #[test]
    fn test_request_defaults() {
        let config = EngineConfig::default();

        let query = RecommendRequest::content("Intro to Python").into_query(&config).unwrap();
        assert_eq!(
            query,
            Query::Content { item_name: "Intro to Python".to_string(), top_n: 6 }
        );

        let query = RecommendRequest::knowledge(3).into_query(&config).unwrap();
        assert_eq!(query, Query::Knowledge { user_id: 3, top_n: 5 });

        let query = RecommendRequest::collaborative(3).with_top_n(2).into_query(&config).unwrap();
        assert_eq!(query, Query::Collaborative { user_id: 3 });
    }

    #[test]
    fn test_request_missing_parameter() {
        let config = EngineConfig::default();
        let request = RecommendRequest {
            mode: RecommendMode::Collaborative,
            item_name: Some("Intro to Python".to_string()),
            user_id: None,
            top_n: None,
        };

        let err = request.into_query(&config).unwrap_err();
        assert!(matches!(err, Error::MissingParameter { parameter: "user_id", .. }));
    }

    #[test]
    fn test_request_zero_top_n() {
        let config = EngineConfig::default();
        let err = RecommendRequest::content("x").with_top_n(0).into_query(&config).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
    }

    #[test]
    fn test_request_json() {
        let request: RecommendRequest =
            serde_json::from_str(r#"{"mode":"knowledge","user_id":7,"top_n":3}"#).unwrap();
        assert_eq!(request, RecommendRequest::knowledge(7).with_top_n(3));

        let json = serde_json::to_string(&RecommendRequest::content("Cooking 101")).unwrap();
        assert_eq!(json, r#"{"mode":"content","item_name":"Cooking 101"}"#);
    }
}
