//! Integration tests for Hybrid Rec Core

use std::io::Write;

use hybrid_rec_core::{
    fuzzy::partial_ratio,
    source::{load_catalog, load_ratings, load_sectors},
    Catalog, ContentIndex, EngineConfig, Error, Item, Rating, RatingStore, RecommendMode,
    RecommendRequest, RecommendationEngine, SectorAssignment, SectorStore,
};
use proptest::prelude::*;
use tempfile::NamedTempFile;

fn sample_engine() -> RecommendationEngine {
    RecommendationEngine::new(
        Catalog::new(vec![
            Item::new(1, "Intro to Python", "python basics programming"),
            Item::new(2, "Advanced Python", "python programming deep dive"),
            Item::new(3, "Cooking 101", "recipes and kitchen skills"),
        ]),
        RatingStore::new(vec![
            Rating::new(1, 1, 5.0),
            Rating::new(2, 1, 5.0),
            Rating::new(2, 2, 5.0),
        ]),
        SectorStore::new(vec![
            SectorAssignment::new(1, "Cooking"),
            SectorAssignment::new(2, "Python"),
        ]),
    )
}

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// =============================================================================
// End-to-End Tests
// =============================================================================

#[test]
fn test_content_end_to_end() {
    let engine = sample_engine();
    let recs = engine
        .recommend(RecommendRequest::content("Intro to Python").with_top_n(2))
        .unwrap();
    assert_eq!(recs, vec!["Advanced Python", "Cooking 101"]);
}

#[test]
fn test_collaborative_end_to_end() {
    let engine = sample_engine();
    let recs = engine.recommend(RecommendRequest::collaborative(1)).unwrap();
    assert_eq!(recs, vec!["Intro to Python", "Advanced Python"]);
}

#[test]
fn test_knowledge_end_to_end() {
    let engine = sample_engine();
    let recs = engine
        .recommend(RecommendRequest::knowledge(2).with_top_n(2))
        .unwrap();
    assert_eq!(recs.len(), 2);
    assert!(recs.iter().all(|name| name.contains("Python")));
}

#[test]
fn test_request_from_json() {
    let engine = sample_engine();
    let request: RecommendRequest =
        serde_json::from_str(r#"{"mode":"content","item_name":"Cooking 101","top_n":1}"#).unwrap();
    assert_eq!(request.mode, RecommendMode::Content);

    let recs = engine.recommend(request).unwrap();
    assert_eq!(recs.len(), 1);
    assert_ne!(recs[0], "Cooking 101");
}

#[test]
fn test_missing_parameter_is_recoverable() {
    let engine = sample_engine();
    let request: RecommendRequest = serde_json::from_str(r#"{"mode":"collaborative"}"#).unwrap();
    let err = engine.recommend(request).unwrap_err();

    assert!(!err.is_fatal());
    assert_eq!(err.error_code(), "MISSING_PARAMETER");
    // Engine still serves later requests
    assert!(!engine.recommend(RecommendRequest::collaborative(2)).unwrap().is_empty());
}

#[test]
fn test_configured_defaults_apply() {
    let config = EngineConfig {
        content_top_n: 1,
        knowledge_top_n: 1,
        ..Default::default()
    };
    let base = sample_engine();
    let engine = RecommendationEngine::build(
        base.catalog().clone(),
        base.ratings().clone(),
        base.sectors().clone(),
        config,
    )
    .unwrap();

    assert_eq!(engine.recommend(RecommendRequest::content("Cooking 101")).unwrap().len(), 1);
    assert_eq!(engine.recommend(RecommendRequest::knowledge(1)).unwrap(), vec!["Cooking 101"]);
}

// =============================================================================
// Fuzzy Matching Tests
// =============================================================================

#[test]
fn test_partial_ratio_reference_values() {
    assert_eq!(partial_ratio("new york mets", "new york yankees"), 69);
    assert_eq!(partial_ratio("financial markets", "finance"), 86);
    assert_eq!(partial_ratio("machine learning", "learning"), 100);
    assert_eq!(partial_ratio("abc", "xyz"), 0);
}

// =============================================================================
// CSV Source Tests
// =============================================================================

#[test]
fn test_load_all_tables() {
    let catalog = write_csv(
        "course_id,course_nam,description\n\
         1,Intro to Python,python basics programming\n\
         2,Advanced Python,python programming deep dive\n",
    );
    let ratings = write_csv("user_id,course_id,rating\n1,1,5\n2,1,4\n2,2,5\n");
    let sectors = write_csv("user_id,sectors\n1,Python\n");

    let engine = RecommendationEngine::new(
        load_catalog(catalog.path()).unwrap(),
        load_ratings(ratings.path()).unwrap(),
        load_sectors(sectors.path()).unwrap(),
    );

    let stats = engine.stats();
    assert_eq!(stats.items, 2);
    assert_eq!(stats.ratings, 3);
    assert_eq!(stats.sector_users, 1);
    assert_eq!(
        engine.recommend(RecommendRequest::collaborative(1)).unwrap(),
        vec!["Intro to Python", "Advanced Python"]
    );
}

#[test]
fn test_load_missing_column() {
    let ratings = write_csv("user_id,course_id\n1,1\n");
    let err = load_ratings(ratings.path()).unwrap_err();

    assert!(err.is_fatal());
    assert!(matches!(err, Error::MissingColumn { column: "rating", .. }));
}

#[test]
fn test_load_missing_file() {
    let err = load_catalog("/nonexistent/content_data.csv").unwrap_err();
    assert_eq!(err.error_code(), "IO");
}

// =============================================================================
// Property Tests
// =============================================================================

const WORDS: &[&str] = &[
    "python", "data", "science", "cooking", "finance", "markets", "learning", "machine",
    "kitchen", "deep", "the", "and",
];

fn catalog_strategy() -> impl Strategy<Value = Catalog> {
    let description = prop::collection::vec(prop::sample::select(WORDS), 0..6)
        .prop_map(|words| words.join(" "));
    prop::collection::vec(description, 1..8).prop_map(|descriptions| {
        descriptions
            .into_iter()
            .enumerate()
            .map(|(i, d)| Item::new(i as i64, format!("Course {i}"), d))
            .collect::<Catalog>()
    })
}

fn ratings_strategy() -> impl Strategy<Value = RatingStore> {
    prop::collection::vec((1i64..5, 0i64..8, 1u8..=5), 0..20).prop_map(|rows| {
        rows.into_iter()
            .map(|(user, item, score)| Rating::new(user, item, f64::from(score)))
            .collect::<RatingStore>()
    })
}

proptest! {
    #[test]
    fn prop_self_similarity_is_row_maximum(catalog in catalog_strategy()) {
        let index = ContentIndex::build(&catalog);
        for i in 0..index.len() {
            let row = index.row(i).unwrap();
            let diagonal = row[i];
            prop_assert!(row.iter().all(|&v| v <= diagonal + 1e-12));
        }
    }

    #[test]
    fn prop_similarity_is_symmetric(catalog in catalog_strategy()) {
        let index = ContentIndex::build(&catalog);
        for i in 0..index.len() {
            for j in 0..index.len() {
                let a = index.similarity(i, j).unwrap();
                let b = index.similarity(j, i).unwrap();
                prop_assert!((a - b).abs() < 1e-12);
                prop_assert!((0.0..=1.0).contains(&a));
            }
        }
    }

    #[test]
    fn prop_content_excludes_seed(catalog in catalog_strategy(), k in 0usize..10) {
        let index = ContentIndex::build(&catalog);
        let seed = catalog.items()[0].name.clone();
        let recs = index.recommend(&catalog, &seed, k);

        prop_assert!(recs.len() <= k);
        prop_assert!(!recs.contains(&seed));
    }

    #[test]
    fn prop_content_is_idempotent(catalog in catalog_strategy(), k in 1usize..10) {
        let seed = catalog.items()[0].name.clone();
        let engine = RecommendationEngine::new(catalog, RatingStore::default(), SectorStore::default());

        let first = engine.recommend(RecommendRequest::content(seed.clone()).with_top_n(k)).unwrap();
        let second = engine.recommend(RecommendRequest::content(seed).with_top_n(k)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_collaborative_is_idempotent(catalog in catalog_strategy(), ratings in ratings_strategy()) {
        let engine = RecommendationEngine::new(catalog, ratings, SectorStore::default());

        let first = engine.recommend(RecommendRequest::collaborative(1)).unwrap();
        let second = engine.recommend(RecommendRequest::collaborative(1)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_knowledge_is_idempotent(catalog in catalog_strategy(), label in "[a-z ]{0,12}") {
        let sectors = SectorStore::new(vec![SectorAssignment::new(1, label)]);
        let engine = RecommendationEngine::new(catalog, RatingStore::default(), sectors);

        let first = engine.recommend(RecommendRequest::knowledge(1)).unwrap();
        let second = engine.recommend(RecommendRequest::knowledge(1)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_partial_ratio_bounded(a in "[a-z ]{0,20}", b in "[a-z ]{0,20}") {
        let score = partial_ratio(&a, &b);
        prop_assert!(score <= 100);
        if a == b {
            prop_assert_eq!(score, 100);
        }
    }
}
