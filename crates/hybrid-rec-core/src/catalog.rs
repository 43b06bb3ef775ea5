//! In-memory tables: the course catalog, the rating store and the sector store.
//!
//! All three are built once from already-typed rows and are read-only
//! afterwards. The catalog owns item identity and ordering: an item's position
//! is its row in the content similarity matrix.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::*;

/// Ordered table of courses.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Create a catalog, preserving source order.
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// All items in catalog order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Iterate items in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Item at a catalog position
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Position of the first item named exactly `name` (case-sensitive).
    pub fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name == name)
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Item> for Catalog {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Rating triples indexed by user and by item.
///
/// Duplicate (user, item) rows are kept as separate signals.
#[derive(Debug, Clone, Default)]
pub struct RatingStore {
    ratings: Vec<Rating>,
    by_user: HashMap<UserId, Vec<usize>>,
    by_item: HashMap<ItemId, Vec<usize>>,
}

impl RatingStore {
    /// Create a store and build the user/item adjacency.
    pub fn new(ratings: Vec<Rating>) -> Self {
        let mut by_user: HashMap<UserId, Vec<usize>> = HashMap::new();
        let mut by_item: HashMap<ItemId, Vec<usize>> = HashMap::new();

        for (i, rating) in ratings.iter().enumerate() {
            by_user.entry(rating.user_id).or_default().push(i);
            by_item.entry(rating.item_id).or_default().push(i);
        }

        Self {
            ratings,
            by_user,
            by_item,
        }
    }

    /// All ratings given by `user_id`, in source order
    pub fn for_user(&self, user_id: UserId) -> impl Iterator<Item = &Rating> {
        self.rows(self.by_user.get(&user_id))
    }

    /// All ratings of `item_id`, in source order
    pub fn for_item(&self, item_id: ItemId) -> impl Iterator<Item = &Rating> {
        self.rows(self.by_item.get(&item_id))
    }

    fn rows<'a>(&'a self, index: Option<&'a Vec<usize>>) -> impl Iterator<Item = &'a Rating> {
        index
            .into_iter()
            .flatten()
            .map(move |&i| &self.ratings[i])
    }

    /// Check if the user rated anything
    pub fn has_user(&self, user_id: UserId) -> bool {
        self.by_user.contains_key(&user_id)
    }

    /// Number of distinct users
    pub fn user_count(&self) -> usize {
        self.by_user.len()
    }

    /// Smallest and largest user ID, if any ratings exist
    pub fn user_range(&self) -> Option<(UserId, UserId)> {
        let min = self.by_user.keys().min()?;
        let max = self.by_user.keys().max()?;
        Some((*min, *max))
    }

    /// All ratings in source order
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// Number of ratings
    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

impl FromIterator<Rating> for RatingStore {
    fn from_iter<I: IntoIterator<Item = Rating>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// User sector labels.
#[derive(Debug, Clone, Default)]
pub struct SectorStore {
    assignments: Vec<SectorAssignment>,
    by_user: HashMap<UserId, usize>,
}

impl SectorStore {
    /// Create a store. When a user appears several times the first row wins.
    pub fn new(assignments: Vec<SectorAssignment>) -> Self {
        let mut by_user = HashMap::new();
        for (i, assignment) in assignments.iter().enumerate() {
            by_user.entry(assignment.user_id).or_insert(i);
        }

        Self {
            assignments,
            by_user,
        }
    }

    /// Sector label of `user_id`
    pub fn sector_for(&self, user_id: UserId) -> Option<&str> {
        self.by_user
            .get(&user_id)
            .map(|&i| self.assignments[i].sector_label.as_str())
    }

    /// All assignments in source order
    pub fn assignments(&self) -> &[SectorAssignment] {
        &self.assignments
    }

    /// Number of users with a sector
    pub fn user_count(&self) -> usize {
        self.by_user.len()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

impl FromIterator<SectorAssignment> for SectorStore {
    fn from_iter<I: IntoIterator<Item = SectorAssignment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Size summary of the loaded tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreStats {
    /// Courses in the catalog
    pub items: usize,
    /// Rating rows
    pub ratings: usize,
    /// Distinct users with at least one rating
    pub rating_users: usize,
    /// Smallest and largest rating user ID
    pub user_range: Option<(UserId, UserId)>,
    /// Users with a sector label
    pub sector_users: usize,
    /// Distinct terms in the content index
    pub vocabulary: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_first_match() {
        let catalog = Catalog::new(vec![
            Item::new(1, "Rust", "a"),
            Item::new(2, "Go", "b"),
            Item::new(3, "Rust", "c"),
        ]);

        assert_eq!(catalog.position("Rust"), Some(0));
        assert_eq!(catalog.position("rust"), None);
        assert_eq!(catalog.get(2).map(|i| i.id), Some(3));
    }

    #[test]
    fn test_rating_store_keeps_duplicates() {
        let store: RatingStore = vec![
            Rating::new(1, 10, 5.0),
            Rating::new(1, 10, 3.0),
            Rating::new(2, 10, 4.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(store.for_user(1).count(), 2);
        assert_eq!(store.for_item(10).count(), 3);
        assert_eq!(store.for_user(99).count(), 0);
        assert_eq!(store.user_count(), 2);
        assert_eq!(store.user_range(), Some((1, 2)));
    }

    #[test]
    fn test_sector_store_first_row_wins() {
        let store = SectorStore::new(vec![
            SectorAssignment::new(1, "Finance"),
            SectorAssignment::new(1, "Health"),
        ]);

        assert_eq!(store.sector_for(1), Some("Finance"));
        assert_eq!(store.sector_for(2), None);
        assert_eq!(store.user_count(), 1);
        assert_eq!(store.len(), 2);
    }
}
