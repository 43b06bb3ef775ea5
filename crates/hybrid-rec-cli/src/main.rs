//! Hybrid Rec CLI - Course Recommender
//!
//! Features:
//! - Content recommendations from description similarity
//! - Collaborative recommendations from shared positive ratings
//! - Knowledge recommendations from the user's sector
//! - Catalog listing and data statistics

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

/// Hybrid Rec CLI - Course recommendation toolkit
#[derive(Parser)]
#[command(name = "hybrid-rec")]
#[command(version)]
#[command(about = "Hybrid course recommender (content, collaborative, knowledge)", long_about = None)]
struct Cli {
    /// Course catalog CSV (id, name, description)
    #[arg(long, global = true, default_value = "content_data.csv")]
    catalog: PathBuf,

    /// Ratings CSV (user_id, item_id, rating)
    #[arg(long, global = true, default_value = "collaborative_data.csv")]
    ratings: PathBuf,

    /// User sector CSV (user_id, sector_label)
    #[arg(long, global = true, default_value = "first_type.csv")]
    sectors: PathBuf,

    /// Engine configuration JSON
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json, table)
    #[arg(short, long, global = true, default_value = "text")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog courses
    Courses {
        /// Only show courses whose name contains this text
        #[arg(long)]
        filter: Option<String>,
    },

    /// Recommend courses similar to a course
    Content {
        /// Exact course name
        item_name: String,

        /// Number of recommendations
        #[arg(short = 'n', long)]
        top_n: Option<usize>,
    },

    /// Recommend courses liked by similar users
    Collaborative {
        /// User ID
        user_id: i64,
    },

    /// Recommend courses matching the user's sector
    Knowledge {
        /// User ID
        user_id: i64,

        /// Number of recommendations
        #[arg(short = 'n', long)]
        top_n: Option<usize>,
    },

    /// Run a JSON recommendation request
    Request {
        /// Path to the request file
        file: PathBuf,
    },

    /// Show data statistics
    Stats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    hybrid_rec_core::init();

    let sources = commands::Sources {
        catalog: cli.catalog,
        ratings: cli.ratings,
        sectors: cli.sectors,
        config: cli.config,
    };
    let format = output::OutputFormat::from(cli.format.as_str());

    match cli.command {
        Commands::Courses { filter } => {
            commands::courses(&sources, filter.as_deref(), format)?;
        }
        Commands::Content { item_name, top_n } => {
            let mut request = hybrid_rec_core::RecommendRequest::content(item_name);
            request.top_n = top_n;
            commands::recommend(&sources, request, format)?;
        }
        Commands::Collaborative { user_id } => {
            let request = hybrid_rec_core::RecommendRequest::collaborative(user_id);
            commands::recommend(&sources, request, format)?;
        }
        Commands::Knowledge { user_id, top_n } => {
            let mut request = hybrid_rec_core::RecommendRequest::knowledge(user_id);
            request.top_n = top_n;
            commands::recommend(&sources, request, format)?;
        }
        Commands::Request { file } => {
            commands::request_file(&sources, &file, format)?;
        }
        Commands::Stats => {
            commands::stats(&sources, format)?;
        }
    }

    Ok(())
}
