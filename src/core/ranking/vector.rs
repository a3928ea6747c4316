//! Sparse term-frequency vectors

use super::tokenizer::tokenize;
use std::collections::BTreeMap;

/// Term-frequency vector keyed by token.
///
/// Backed by an ordered map so sums are taken in the same order on every run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    terms: BTreeMap<String, f64>,
}

impl TermVector {
    /// Empty vector
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vector from text, adding `weight` for every token occurrence
    #[must_use]
    pub fn from_text(text: &str, weight: f64) -> Self {
        let mut vec = Self::new();
        for token in tokenize(text) {
            *vec.terms.entry(token).or_insert(0.0) += weight;
        }
        vec
    }

    /// Add another vector into this one, summing shared terms
    pub fn merge(&mut self, other: &Self) {
        for (term, value) in &other.terms {
            *self.terms.entry(term.clone()).or_insert(0.0) += value;
        }
    }

    /// Weight of a term (0 when absent)
    #[must_use]
    pub fn get(&self, term: &str) -> f64 {
        self.terms.get(term).copied().unwrap_or(0.0)
    }

    /// Number of distinct terms
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the vector has no terms
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Dot product with another vector
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.terms
            .iter()
            .map(|(term, value)| value * other.get(term))
            .sum()
    }

    /// Euclidean norm
    #[must_use]
    pub fn l2_norm(&self) -> f64 {
        self.terms.values().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Cosine similarity; 0 when either vector has zero norm
    #[must_use]
    pub fn cosine(&self, other: &Self) -> f64 {
        let denom = self.l2_norm() * other.l2_norm();
        if denom == 0.0 {
            0.0
        } else {
            self.dot(other) / denom
        }
    }
}
