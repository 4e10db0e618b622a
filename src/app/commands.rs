use crate::core::catalog::{Books, Catalog};
use crate::domain::model::{BookView, ImportSummary};
pub use crate::domain::model::OutputFormat;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_range};
use serde::Serialize;

pub const MIN_YEAR: i32 = 1000;
pub const MAX_YEAR: i32 = 2100;
pub const MIN_THRESHOLD: f64 = 0.0;
pub const MAX_THRESHOLD: f64 = 5.0;

/// One catalog operation requested from outside the library.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    List,
    Find {
        title: String,
    },
    Add {
        title: String,
        author: String,
        year: i32,
        ratings: Vec<i64>,
    },
    Remove {
        title: String,
    },
    Rate {
        title: String,
        value: i64,
    },
    AfterYear {
        year: i32,
    },
    AboveRating {
        min_rating: f64,
    },
    Export {
        destination: String,
    },
    Import {
        source: String,
    },
}

impl Action {
    /// Whether a successful run of this action changes the catalog.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Self::Add { .. } | Self::Remove { .. } | Self::Rate { .. } | Self::Import { .. }
        )
    }

    /// Argument checks done before the catalog is touched.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::List => Ok(()),
            Self::Find { title } | Self::Remove { title } | Self::Rate { title, .. } => {
                validate_non_empty_string("title", title)
            }
            Self::Add {
                title,
                author,
                year,
                ..
            } => {
                validate_non_empty_string("title", title)?;
                validate_non_empty_string("author", author)?;
                validate_range("year", *year, MIN_YEAR, MAX_YEAR)
            }
            Self::AfterYear { year } => validate_range("year", *year, MIN_YEAR, MAX_YEAR),
            Self::AboveRating { min_rating } => {
                validate_range("min_rating", *min_rating, MIN_THRESHOLD, MAX_THRESHOLD)
            }
            Self::Export { destination } => validate_path("destination", destination),
            Self::Import { source } => validate_path("source", source),
        }
    }
}

/// What an action produced, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    Books { books: Vec<BookView> },
    Added { title: String },
    Removed { title: String },
    Rated { title: String, value: i64, average_rating: f64 },
    Exported { destination: String, count: usize },
    Imported { source: String, summary: ImportSummary },
}

/// Runs one action against the catalog the caller owns.
pub fn run_action(catalog: &mut Catalog, action: Action) -> Result<Outcome> {
    action.validate()?;
    tracing::debug!("Running {:?}", action);

    let outcome = match action {
        Action::List => Outcome::Books {
            books: views(&catalog.all()),
        },
        Action::Find { title } => {
            let title = title.trim().to_string();
            let record = catalog.find(&title)?;
            Outcome::Books {
                books: vec![BookView::new(&title, record)],
            }
        }
        Action::Add {
            title,
            author,
            year,
            ratings,
        } => {
            let title = title.trim().to_string();
            catalog.add(title.clone(), author.trim(), year, &ratings)?;
            Outcome::Added { title }
        }
        Action::Remove { title } => {
            let title = title.trim().to_string();
            catalog.remove(&title)?;
            Outcome::Removed { title }
        }
        Action::Rate { title, value } => {
            let title = title.trim().to_string();
            catalog.add_rating(&title, value)?;
            let average_rating = catalog.find(&title)?.average_rating();
            Outcome::Rated {
                title,
                value,
                average_rating,
            }
        }
        Action::AfterYear { year } => Outcome::Books {
            books: views(&catalog.filter_after_year(year)),
        },
        Action::AboveRating { min_rating } => Outcome::Books {
            books: views(&catalog.filter_above_rating(min_rating)),
        },
        Action::Export { destination } => {
            catalog.export(&destination)?;
            Outcome::Exported {
                destination,
                count: catalog.len(),
            }
        }
        Action::Import { source } => {
            let summary = catalog.import(&source)?;
            Outcome::Imported { source, summary }
        }
    };

    Ok(outcome)
}

fn views(books: &Books) -> Vec<BookView> {
    books
        .iter()
        .map(|(title, record)| BookView::new(title, record))
        .collect()
}

pub fn render(outcome: &Outcome, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(outcome).map_err(CatalogError::from),
        OutputFormat::Text => Ok(render_text(outcome)),
    }
}

fn render_text(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Books { books } if books.is_empty() => "No matching books\n".to_string(),
        Outcome::Books { books } => books.iter().map(render_book).collect(),
        Outcome::Added { title } => format!("Added '{}'\n", title),
        Outcome::Removed { title } => format!("Removed '{}'\n", title),
        Outcome::Rated {
            title,
            value,
            average_rating,
        } => format!(
            "Rated '{}' with {} (average now {:.2})\n",
            title, value, average_rating
        ),
        Outcome::Exported { destination, count } => {
            format!("Exported {} books to '{}'\n", count, destination)
        }
        Outcome::Imported { source, summary } => {
            let mut out = format!("Imported {} books from '{}'\n", summary.added, source);
            for row in summary.rejected() {
                out.push_str(&format!(
                    "  line {}: {} ({})\n",
                    row.line, row.reason, row.content
                ));
            }
            out
        }
    }
}

fn render_book(book: &BookView) -> String {
    let mut out = format!(
        "{}\n  Author: {}\n  Year: {}\n  Average rating: {:.2} ({} ratings)\n",
        book.title, book.author, book.year, book.average_rating, book.rating_count
    );
    if !book.ratings.is_empty() {
        out.push_str(&format!("  Ratings: {:?}\n", book.ratings));
    }
    out
}
