//! crates/tutorhub_core/src/catalog.rs
//!
//! Pure logic over tutorial documents: price ordering, category listing and
//! the marketplace statistics. Everything here works on fully materialized
//! result sets handed over by the store.

use serde_json::Value;
use std::collections::HashSet;

use crate::domain::{Document, Sort};

/// Field names used on tutorial documents.
pub mod fields {
    pub const EMAIL: &str = "email";
    pub const LANGUAGE: &str = "language";
    pub const PRICE: &str = "price";
    pub const REVIEW: &str = "review";
}

//=========================================================================================
// Price Ordering
//=========================================================================================

/// The `sortBy` values understood by the tutorial listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceOrder {
    LowToHigh,
    HighToLow,
}

impl PriceOrder {
    /// Parses a `sortBy` query value. Unrecognized values yield `None`, which
    /// leaves the listing in the store's natural order.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "low2high" => Some(PriceOrder::LowToHigh),
            "high2low" => Some(PriceOrder::HighToLow),
            _ => None,
        }
    }

    pub fn to_sort(self) -> Sort {
        match self {
            PriceOrder::LowToHigh => Sort::ascending(fields::PRICE),
            PriceOrder::HighToLow => Sort::descending(fields::PRICE),
        }
    }
}

//=========================================================================================
// Categories
//=========================================================================================

/// Distinct `language` values, in order of first appearance.
/// Documents without a string language are skipped.
pub fn distinct_languages(tutorials: &[Document]) -> Vec<String> {
    let mut seen = HashSet::new();
    tutorials
        .iter()
        .filter_map(|doc| doc.get(fields::LANGUAGE).and_then(Value::as_str))
        .filter(|language| seen.insert(*language))
        .map(str::to_owned)
        .collect()
}

//=========================================================================================
// Statistics
//=========================================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TutorialStats {
    pub total_reviews: i64,
    pub total_languages: usize,
    pub total_tutorials: usize,
    pub total_tutors: usize,
}

impl TutorialStats {
    /// Computes the statistics in one pass over the whole collection.
    ///
    /// Languages and tutors are counted over string values only, the same
    /// rule `distinct_languages` applies. The review total saturates.
    pub fn compute(tutorials: &[Document]) -> Self {
        let mut languages = HashSet::new();
        let mut tutors = HashSet::new();
        let mut total_reviews = 0i64;

        for doc in tutorials {
            let reviews = doc.get(fields::REVIEW).map(review_count).unwrap_or(0);
            total_reviews = total_reviews.saturating_add(reviews);
            if let Some(language) = doc.get(fields::LANGUAGE).and_then(Value::as_str) {
                languages.insert(language);
            }
            if let Some(email) = doc.get(fields::EMAIL).and_then(Value::as_str) {
                tutors.insert(email);
            }
        }

        Self {
            total_reviews,
            total_languages: languages.len(),
            total_tutorials: tutorials.len(),
            total_tutors: tutors.len(),
        }
    }
}

// Non-numeric values count as zero, fractions are truncated.
fn review_count(value: &Value) -> i64 {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .unwrap_or(0)
}
