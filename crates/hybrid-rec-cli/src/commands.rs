//! CLI command implementations

use anyhow::Context;
use hybrid_rec_core::{
    source::{load_catalog, load_ratings, load_sectors},
    EngineConfig, RecommendRequest, RecommendationEngine,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::output::{self, OutputFormat};

/// Data and configuration paths shared by every command
pub struct Sources {
    pub catalog: PathBuf,
    pub ratings: PathBuf,
    pub sectors: PathBuf,
    pub config: Option<PathBuf>,
}

impl Sources {
    fn load_config(&self) -> anyhow::Result<EngineConfig> {
        let Some(path) = &self.config else {
            return Ok(EngineConfig::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = EngineConfig::from_json(&json)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Load every table and build the engine behind a spinner.
    fn load_engine(&self) -> anyhow::Result<RecommendationEngine> {
        let config = self.load_config()?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
        spinner.enable_steady_tick(Duration::from_millis(100));

        spinner.set_message("Loading catalog...");
        let catalog = load_catalog(&self.catalog)
            .with_context(|| format!("Failed to load catalog {}", self.catalog.display()))?;
        spinner.set_message("Loading ratings...");
        let ratings = load_ratings(&self.ratings)
            .with_context(|| format!("Failed to load ratings {}", self.ratings.display()))?;
        spinner.set_message("Loading sectors...");
        let sectors = load_sectors(&self.sectors)
            .with_context(|| format!("Failed to load sectors {}", self.sectors.display()))?;

        spinner.set_message("Building content index...");
        let engine = RecommendationEngine::build(catalog, ratings, sectors, config)?;
        spinner.finish_and_clear();

        info!(
            items = engine.catalog().len(),
            ratings = engine.ratings().len(),
            sector_users = engine.sectors().user_count(),
            "Engine loaded"
        );
        Ok(engine)
    }
}

/// List catalog courses
pub fn courses(sources: &Sources, filter: Option<&str>, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = load_catalog(&sources.catalog)
        .with_context(|| format!("Failed to load catalog {}", sources.catalog.display()))?;

    let needle = filter.map(str::to_lowercase);
    let items: Vec<_> = catalog
        .iter()
        .filter(|item| match &needle {
            Some(n) => item.name.to_lowercase().contains(n.as_str()),
            None => true,
        })
        .collect();

    output::print_courses(&items, format)
}

/// Run one recommendation request
pub fn recommend(sources: &Sources, request: RecommendRequest, format: OutputFormat) -> anyhow::Result<()> {
    let engine = sources.load_engine()?;
    let mode = request.mode;
    debug!(%mode, ?request, "Running request");
    let results = engine.recommend(request)?;
    debug!(%mode, count = results.len(), "Recommendations computed");

    output::print_recommendations(mode, &results, format)
}

/// Run a request read from a JSON file
pub fn request_file(sources: &Sources, file: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read request {}", file.display()))?;
    let request: RecommendRequest = serde_json::from_str(&json)
        .with_context(|| format!("Invalid request {}", file.display()))?;
    debug!(path = %file.display(), mode = %request.mode, "Loaded request file");

    recommend(sources, request, format)
}

/// Show data statistics
pub fn stats(sources: &Sources, format: OutputFormat) -> anyhow::Result<()> {
    let engine = sources.load_engine()?;
    output::print_stats(&engine.stats(), format)
}
