//! Content-based recommendations from course descriptions.
//!
//! Descriptions are turned into TF-IDF vectors (raw term counts weighted by
//! smoothed inverse document frequency, then L2-normalised) and a full
//! pairwise cosine similarity matrix is precomputed at build time.
//! Queries only read a row of that matrix.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::text;

/// Sparse L2-normalised term vector, sorted by term index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_unsorted(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|(term, _)| *term);
        Self { entries }
    }

    /// Non-zero `(term, weight)` pairs
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Check if the vector has no terms
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product by merging the two sorted term lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;

        while i < self.entries.len() && j < other.entries.len() {
            let (ta, wa) = self.entries[i];
            let (tb, wb) = other.entries[j];
            if ta == tb {
                sum += wa * wb;
                i += 1;
                j += 1;
            } else if ta < tb {
                i += 1;
            } else {
                j += 1;
            }
        }

        sum
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }
}

/// TF-IDF model fitted on a corpus.
#[derive(Debug, Clone, Default)]
pub struct TfIdfModel {
    /// Term -> column, in lexical order
    vocabulary: BTreeMap<String, usize>,
    /// Inverse document frequency per column
    idf: Vec<f64>,
}

impl TfIdfModel {
    /// Fit vocabulary and IDF weights, returning one vector per document.
    pub fn fit_transform<S: AsRef<str>>(documents: &[S]) -> (Self, Vec<SparseVector>) {
        let analyzed: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| text::analyze(doc.as_ref()))
            .collect();

        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &analyzed {
            let mut seen: Vec<&str> = tokens.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let n_docs = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (column, (term, df)) in doc_freq.iter().enumerate() {
            vocabulary.insert(term.to_string(), column);
            idf.push(((1.0 + n_docs) / (1.0 + *df as f64)).ln() + 1.0);
        }

        let model = Self { vocabulary, idf };
        let vectors = analyzed.iter().map(|tokens| model.weigh(tokens)).collect();
        (model, vectors)
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokens {
            if let Some(&column) = self.vocabulary.get(token) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        let mut vector = SparseVector::from_unsorted(
            counts
                .into_iter()
                .map(|(column, tf)| (column, tf * self.idf[column]))
                .collect(),
        );
        vector.normalize();
        vector
    }

    /// Number of distinct terms
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// IDF weight of a term, if it is in the vocabulary
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&column| self.idf[column])
    }
}

/// Dense, symmetric item-by-item cosine similarity matrix.
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compute all pairwise similarities of L2-normalised vectors.
    ///
    /// The diagonal is 1.0 for non-empty vectors and 0.0 for empty ones, and
    /// off-diagonal cells are capped at 1.0, so self-similarity is always the
    /// row maximum.
    pub fn from_vectors(vectors: &[SparseVector]) -> Self {
        let size = vectors.len();
        let mut values = vec![0.0; size * size];

        for i in 0..size {
            values[i * size + i] = if vectors[i].is_empty() { 0.0 } else { 1.0 };
            for j in (i + 1)..size {
                let sim = vectors[i].dot(&vectors[j]).min(1.0);
                values[i * size + j] = sim;
                values[j * size + i] = sim;
            }
        }

        Self { size, values }
    }

    /// Similarity of items `i` and `j`
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.size && j < self.size {
            Some(self.values[i * self.size + j])
        } else {
            None
        }
    }

    /// Row of similarities for item `i`
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i < self.size {
            Some(&self.values[i * self.size..(i + 1) * self.size])
        } else {
            None
        }
    }

    /// Number of rows (and columns)
    pub fn len(&self) -> usize {
        self.size
    }

    /// Check if the matrix is empty
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// Precomputed description similarity over a catalog.
#[derive(Debug, Clone, Default)]
pub struct ContentIndex {
    model: TfIdfModel,
    matrix: SimilarityMatrix,
}

impl ContentIndex {
    /// Build the TF-IDF model and the full similarity matrix for `catalog`.
    pub fn build(catalog: &Catalog) -> Self {
        let documents: Vec<&str> = catalog.iter().map(|item| item.description.as_str()).collect();
        let (model, vectors) = TfIdfModel::fit_transform(&documents);
        let matrix = SimilarityMatrix::from_vectors(&vectors);

        info!(
            items = catalog.len(),
            vocabulary = model.vocabulary_size(),
            "Built content index"
        );

        Self { model, matrix }
    }

    /// Names of the `k` courses most similar to `item_name`.
    ///
    /// The first catalog row with exactly that name is the seed. Unknown names
    /// yield an empty list. Ties keep catalog order, and the seed name itself
    /// is never part of the result.
    pub fn recommend(&self, catalog: &Catalog, item_name: &str, k: usize) -> Vec<String> {
        let Some(seed) = catalog.position(item_name) else {
            debug!(item_name, "Unknown course, no content recommendations");
            return Vec::new();
        };
        let Some(row) = self.matrix.row(seed) else {
            return Vec::new();
        };

        let mut ranked: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let results: Vec<String> = ranked
            .into_iter()
            .filter(|&(i, _)| i != seed)
            .filter_map(|(i, _)| catalog.get(i))
            .filter(|item| item.name != item_name)
            .take(k)
            .map(|item| item.name.clone())
            .collect();

        debug!(item_name, seed, count = results.len(), "Content recommendations");
        results
    }

    /// Similarity between two catalog positions
    pub fn similarity(&self, i: usize, j: usize) -> Option<f64> {
        self.matrix.get(i, j)
    }

    /// Similarity row of a catalog position
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        self.matrix.row(i)
    }

    /// Number of distinct terms in the corpus
    pub fn vocabulary_size(&self) -> usize {
        self.model.vocabulary_size()
    }

    /// Number of indexed items
    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }
}
