//! Output formatting for CLI

use console::style;
use hybrid_rec_core::{Item, RecommendMode, StoreStats};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Table,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "table" => OutputFormat::Table,
            _ => OutputFormat::Text,
        }
    }
}

const EMPTY_MESSAGE: &str = "No recommendations found.";

#[derive(Tabled)]
struct RecommendationRow<'a> {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Course")]
    name: &'a str,
}

#[derive(Tabled)]
struct CourseRow<'a> {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Course")]
    name: &'a str,
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Serialize)]
struct RecommendationOutput<'a> {
    mode: RecommendMode,
    recommendations: &'a [String],
}

fn print_json<T: Serialize>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

fn print_table<R: Tabled>(rows: Vec<R>) {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

/// Print a recommendation list
pub fn print_recommendations(
    mode: RecommendMode,
    results: &[String],
    format: OutputFormat,
) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return print_json(&RecommendationOutput { mode, recommendations: results });
    }
    if results.is_empty() {
        println!("{}", EMPTY_MESSAGE);
        return Ok(());
    }

    match format {
        OutputFormat::Table => print_table(
            results
                .iter()
                .enumerate()
                .map(|(i, name)| RecommendationRow { rank: i + 1, name })
                .collect(),
        ),
        _ => {
            println!("{}", style(format!("{} recommendations:", mode)).bold().cyan());
            for (i, name) in results.iter().enumerate() {
                println!("  {}. {}", i + 1, name);
            }
        }
    }
    Ok(())
}

/// Print catalog courses
pub fn print_courses(items: &[&Item], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(&items)?,
        OutputFormat::Table => print_table(
            items
                .iter()
                .map(|item| CourseRow { id: item.id, name: &item.name })
                .collect(),
        ),
        OutputFormat::Text => {
            println!("{}", style(format!("{} courses:", items.len())).bold().cyan());
            for item in items {
                println!("  {:>5}  {}", item.id, item.name);
            }
        }
    }
    Ok(())
}

fn stat_rows(stats: &StoreStats) -> Vec<StatRow> {
    let user_range = match stats.user_range {
        Some((min, max)) => format!("{} - {}", min, max),
        None => "-".to_string(),
    };
    vec![
        StatRow { metric: "Courses", value: stats.items.to_string() },
        StatRow { metric: "Ratings", value: stats.ratings.to_string() },
        StatRow { metric: "Rating users", value: stats.rating_users.to_string() },
        StatRow { metric: "User ID range", value: user_range },
        StatRow { metric: "Sector users", value: stats.sector_users.to_string() },
        StatRow { metric: "Vocabulary", value: stats.vocabulary.to_string() },
    ]
}

/// Print data statistics
pub fn print_stats(stats: &StoreStats, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(stats)?,
        OutputFormat::Table => print_table(stat_rows(stats)),
        OutputFormat::Text => {
            println!("{}", style("Data statistics:").bold().cyan());
            for row in stat_rows(stats) {
                println!("  {:<14} {}", format!("{}:", row.metric), row.value);
            }
        }
    }
    Ok(())
}
