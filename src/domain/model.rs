use crate::utils::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// One book's metadata and the ratings readers gave it.
///
/// Ratings only grow through [`BookRecord::add_rating`], which keeps every
/// stored value inside `MIN_RATING..=MAX_RATING`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookRecord {
    author: String,
    year: i32,
    ratings: Vec<u8>,
}

impl BookRecord {
    /// Builds a record, rejecting any initial rating outside 1..=5.
    pub fn new(author: impl Into<String>, year: i32, ratings: &[i64]) -> Result<Self> {
        let ratings = ratings
            .iter()
            .map(|&value| checked_rating(value))
            .collect::<Result<Vec<u8>>>()?;

        Ok(Self {
            author: author.into(),
            year,
            ratings,
        })
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn ratings(&self) -> &[u8] {
        &self.ratings
    }

    pub fn add_rating(&mut self, value: i64) -> Result<()> {
        let rating = checked_rating(value)?;
        self.ratings.push(rating);
        Ok(())
    }

    /// Mean of all ratings rounded to two decimals, `0.0` with no ratings.
    ///
    /// Rounding is half away from zero; ratings are positive so ties go up
    /// (an exact 4.125 becomes 4.13).
    pub fn average_rating(&self) -> f64 {
        if self.ratings.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.ratings.iter().map(|&r| u64::from(r)).sum();
        let mean = sum as f64 / self.ratings.len() as f64;
        (mean * 100.0).round() / 100.0
    }

    pub fn rating_count(&self) -> usize {
        self.ratings.len()
    }
}

fn checked_rating(value: i64) -> Result<u8> {
    if !(MIN_RATING..=MAX_RATING).contains(&value) {
        return Err(CatalogError::InvalidRating { value });
    }
    u8::try_from(value).map_err(|_| CatalogError::InvalidRating { value })
}

/// How command results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Flat, serializable projection of a catalog entry for output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookView {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub average_rating: f64,
    pub rating_count: usize,
    pub ratings: Vec<u8>,
}

impl BookView {
    pub fn new(title: &str, record: &BookRecord) -> Self {
        Self {
            title: title.to_string(),
            author: record.author().to_string(),
            year: record.year(),
            average_rating: record.average_rating(),
            rating_count: record.rating_count(),
            ratings: record.ratings().to_vec(),
        }
    }
}

/// Why a single import row was not added.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("expected at least 4 fields, found {found}")]
    TooFewFields { found: usize },

    #[error("year '{value}' is not an integer")]
    InvalidYear { value: String },

    #[error("rating '{value}' is not an integer")]
    UnparsableRating { value: String },

    #[error("rating {value} is outside 1-5")]
    RatingOutOfRange { value: i64 },

    #[error("title '{title}' already exists")]
    DuplicateTitle { title: String },

    #[error("row rejected: {message}")]
    Rejected { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 1-based line number in the source file.
    pub line: u64,
    pub content: String,
    pub reason: SkipReason,
}

/// Outcome of one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub added: usize,
    pub skipped: Vec<SkippedRow>,
}

impl ImportSummary {
    /// Skipped rows other than the ones dropped for having too few fields.
    pub fn rejected(&self) -> impl Iterator<Item = &SkippedRow> {
        self.skipped
            .iter()
            .filter(|row| !matches!(row.reason, SkipReason::TooFewFields { .. }))
    }
}
