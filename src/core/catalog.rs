use crate::domain::model::BookRecord;
use crate::utils::error::{CatalogError, Result};
use std::collections::BTreeMap;

/// Snapshot of catalog entries, ordered by title.
pub type Books = BTreeMap<String, BookRecord>;

/// Books preloaded by [`Catalog::seeded`].
pub const SEED_BOOKS: &[(&str, &str, i32, &[i64])] = &[
    ("War and Peace", "L. Tolstoy", 1869, &[5, 4, 5]),
    ("Crime and Punishment", "F. Dostoevsky", 1866, &[5, 5, 4]),
];

/// Title-keyed collection of book records.
///
/// Titles are unique. Every read that hands out more than one record
/// returns an owned snapshot, so callers never observe later mutation.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Books,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the two classics the command line starts with.
    pub fn seeded() -> Self {
        let mut catalog = Self::new();
        for (title, author, year, ratings) in SEED_BOOKS {
            if let Err(e) = catalog.add(*title, *author, *year, ratings) {
                tracing::error!("Failed to seed '{}': {}", title, e);
            }
        }
        catalog
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.books.contains_key(title)
    }

    /// Adds a new book.
    ///
    /// Fails with `DuplicateTitle` if the title is taken and with
    /// `InvalidRating` if any initial rating is outside 1..=5; in both cases
    /// the catalog is left untouched.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        ratings: &[i64],
    ) -> Result<()> {
        let title = title.into();
        if self.books.contains_key(&title) {
            return Err(CatalogError::DuplicateTitle { title });
        }

        let record = BookRecord::new(author, year, ratings)?;
        tracing::debug!("Adding '{}' ({} ratings)", title, record.rating_count());
        self.books.insert(title, record);
        Ok(())
    }

    /// Removes a book and hands back its record.
    pub fn remove(&mut self, title: &str) -> Result<BookRecord> {
        let record = self
            .books
            .remove(title)
            .ok_or_else(|| not_found(title))?;
        tracing::debug!("Removed '{}'", title);
        Ok(record)
    }

    pub fn find(&self, title: &str) -> Result<&BookRecord> {
        self.books.get(title).ok_or_else(|| not_found(title))
    }

    pub fn all(&self) -> Books {
        self.books.clone()
    }

    pub fn add_rating(&mut self, title: &str, value: i64) -> Result<()> {
        let record = self.books.get_mut(title).ok_or_else(|| not_found(title))?;
        record.add_rating(value)?;
        tracing::debug!("Rated '{}' with {}", title, value);
        Ok(())
    }

    /// Books published strictly after `year`.
    pub fn filter_after_year(&self, year: i32) -> Books {
        self.filtered(|record| record.year() > year)
    }

    /// Books whose average rating is strictly above `min_rating`.
    pub fn filter_above_rating(&self, min_rating: f64) -> Books {
        self.filtered(|record| record.average_rating() > min_rating)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&String, &BookRecord)> {
        self.books.iter()
    }

    fn filtered(&self, keep: impl Fn(&BookRecord) -> bool) -> Books {
        self.books
            .iter()
            .filter(|(_, record)| keep(record))
            .map(|(title, record)| (title.clone(), record.clone()))
            .collect()
    }
}

fn not_found(title: &str) -> CatalogError {
    CatalogError::NotFound {
        title: title.to_string(),
    }
}
