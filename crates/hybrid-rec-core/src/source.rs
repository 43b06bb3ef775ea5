//! CSV data sources for the catalog, ratings and sector tables.
//!
//! Each table is located by header name. Alternative header spellings used
//! by legacy course exports (`course_id`, `course_nam`, `sectors`) are
//! accepted. A missing required column is a fatal configuration error.

use std::io;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::info;

use crate::catalog::{Catalog, RatingStore, SectorStore};
use crate::error::{Error, Result};
use crate::types::*;

/// Logical column name and the header spellings accepted for it
type ColumnSpec = (&'static str, &'static [&'static str]);

const ITEM_ID: ColumnSpec = ("id", &["id", "course_id", "item_id"]);
const ITEM_NAME: ColumnSpec = ("name", &["name", "course_nam", "course_name"]);
const ITEM_DESCRIPTION: ColumnSpec = ("description", &["description"]);
const USER_ID: ColumnSpec = ("user_id", &["user_id"]);
const RATED_ITEM: ColumnSpec = ("item_id", &["item_id", "course_id"]);
const RATING: ColumnSpec = ("rating", &["rating", "score"]);
const SECTOR: ColumnSpec = ("sector_label", &["sector_label", "sectors", "sector"]);

/// A resolved column position.
#[derive(Debug, Clone, Copy)]
struct Column {
    name: &'static str,
    index: usize,
}

fn resolve(table: &'static str, headers: &StringRecord, (name, aliases): ColumnSpec) -> Result<Column> {
    aliases
        .iter()
        .find_map(|alias| headers.iter().position(|h| h.trim() == *alias))
        .map(|index| Column { name, index })
        .ok_or_else(|| Error::MissingColumn {
            table,
            column: name,
            found: headers.iter().map(str::trim).collect::<Vec<_>>().join(", "),
        })
}

/// One data row with typed accessors.
struct Row<'a> {
    table: &'static str,
    line: usize,
    record: &'a StringRecord,
}

impl Row<'_> {
    fn text(&self, column: Column) -> &str {
        self.record.get(column.index).unwrap_or("").trim()
    }

    fn invalid(&self, column: Column) -> Error {
        Error::InvalidRecord {
            table: self.table,
            row: self.line,
            column: column.name,
            value: self.text(column).to_string(),
        }
    }

    /// Integer cell; integral floats such as `3.0` are accepted when they fit in `i64`.
    fn id(&self, column: Column) -> Result<i64> {
        let value = self.text(column);
        if let Ok(id) = value.parse::<i64>() {
            return Ok(id);
        }
        match value.parse::<f64>() {
            Ok(v) if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 => {
                Ok(v as i64)
            }
            _ => Err(self.invalid(column)),
        }
    }

    fn number(&self, column: Column) -> Result<f64> {
        self.text(column)
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| self.invalid(column))
    }
}

/// Resolve `specs` against the header row, then map every record with `parse`.
///
/// Columns are resolved before any record is read, so a header-only file
/// with a missing column still fails.
fn read_table<R, T, F, const N: usize>(
    reader: R,
    table: &'static str,
    specs: [ColumnSpec; N],
    mut parse: F,
) -> Result<Vec<T>>
where
    R: io::Read,
    F: FnMut(&Row<'_>, [Column; N]) -> Result<T>,
{
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut columns = [Column { name: "", index: 0 }; N];
    for (slot, spec) in columns.iter_mut().zip(specs) {
        *slot = resolve(table, &headers, spec)?;
    }

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let line = record.position().map_or(i + 2, |p| p.line() as usize);
        let row = Row { table, line, record: &record };
        rows.push(parse(&row, columns)?);
    }
    Ok(rows)
}

/// Read the course catalog. Missing descriptions become empty strings.
pub fn read_catalog<R: io::Read>(reader: R) -> Result<Catalog> {
    let items = read_table(
        reader,
        "catalog",
        [ITEM_ID, ITEM_NAME, ITEM_DESCRIPTION],
        |row, [id, name, description]| {
            Ok(Item {
                id: row.id(id)?,
                name: row.text(name).to_string(),
                description: row.text(description).to_string(),
            })
        },
    )?;
    Ok(Catalog::new(items))
}

/// Read the rating table.
pub fn read_ratings<R: io::Read>(reader: R) -> Result<RatingStore> {
    let ratings = read_table(
        reader,
        "ratings",
        [USER_ID, RATED_ITEM, RATING],
        |row, [user_id, item_id, score]| {
            Ok(Rating {
                user_id: row.id(user_id)?,
                item_id: row.id(item_id)?,
                score: row.number(score)?,
            })
        },
    )?;
    Ok(RatingStore::new(ratings))
}

/// Read the user sector table. Rows with an empty label are skipped.
pub fn read_sectors<R: io::Read>(reader: R) -> Result<SectorStore> {
    let assignments = read_table(reader, "sectors", [USER_ID, SECTOR], |row, [user_id, label]| {
        let label = row.text(label);
        if label.is_empty() {
            return Ok(None);
        }
        Ok(Some(SectorAssignment {
            user_id: row.id(user_id)?,
            sector_label: label.to_string(),
        }))
    })?;
    Ok(SectorStore::new(assignments.into_iter().flatten().collect()))
}

/// Load the course catalog from a CSV file.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    let catalog = read_catalog(std::fs::File::open(path)?)?;
    info!(path = %path.display(), items = catalog.len(), "Loaded catalog");
    Ok(catalog)
}

/// Load ratings from a CSV file.
pub fn load_ratings(path: impl AsRef<Path>) -> Result<RatingStore> {
    let path = path.as_ref();
    let ratings = read_ratings(std::fs::File::open(path)?)?;
    info!(
        path = %path.display(),
        ratings = ratings.len(),
        users = ratings.user_count(),
        "Loaded ratings"
    );
    Ok(ratings)
}

/// Load user sectors from a CSV file.
pub fn load_sectors(path: impl AsRef<Path>) -> Result<SectorStore> {
    let path = path.as_ref();
    let sectors = read_sectors(std::fs::File::open(path)?)?;
    info!(path = %path.display(), users = sectors.user_count(), "Loaded sectors");
    Ok(sectors)
}
