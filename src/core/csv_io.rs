//! `;`-delimited catalog files.
//!
//! Layout is one header line `title;author;year;ratings` followed by one
//! line per book with ratings joined by `,`. Nothing is quoted or escaped,
//! so a `;` or `,` inside a title or author does not survive a round trip.

use crate::core::catalog::Catalog;
use crate::domain::model::{ImportSummary, SkipReason, SkippedRow, MAX_RATING, MIN_RATING};
use crate::utils::error::{CatalogError, Result};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, Trim, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

pub const HEADER: [&str; 4] = ["title", "author", "year", "ratings"];
pub const FIELD_DELIMITER: u8 = b';';
pub const RATING_DELIMITER: &str = ",";

/// Label used in errors when the codec runs over an in-memory stream.
const STREAM_LABEL: &str = "<stream>";

struct ParsedRow {
    title: String,
    author: String,
    year: i32,
    ratings: Vec<i64>,
}

impl Catalog {
    /// Writes the whole catalog to `destination`, replacing any existing file.
    pub fn export(&self, destination: impl AsRef<Path>) -> Result<()> {
        let path = destination.as_ref();
        let label = path.display().to_string();

        let file = File::create(path).map_err(|e| CatalogError::ExportError {
            path: label.clone(),
            source: e.into(),
        })?;
        self.write_rows(file)
            .map_err(|source| CatalogError::ExportError {
                path: label.clone(),
                source,
            })?;

        tracing::info!("Exported {} books to {}", self.len(), label);
        Ok(())
    }

    pub fn export_to_writer<W: Write>(&self, writer: W) -> Result<()> {
        self.write_rows(writer)
            .map_err(|source| CatalogError::ExportError {
                path: STREAM_LABEL.to_string(),
                source,
            })
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.export_to_writer(&mut buffer)?;
        String::from_utf8(buffer).map_err(|e| CatalogError::ExportError {
            path: STREAM_LABEL.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e).into(),
        })
    }

    /// Adds every valid row of `source` to the catalog.
    ///
    /// Bad rows are skipped and listed in the summary. A missing or
    /// unreadable file aborts the import before any row is added.
    pub fn import(&mut self, source: impl AsRef<Path>) -> Result<ImportSummary> {
        let path = source.as_ref();
        let label = path.display().to_string();

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CatalogError::FileNotFound { path: label });
            }
            Err(e) => {
                return Err(CatalogError::ImportError {
                    path: label,
                    source: e.into(),
                });
            }
        };

        let summary = self
            .read_rows(file)
            .map_err(|source| CatalogError::ImportError {
                path: label.clone(),
                source,
            })?;

        tracing::info!(
            "Imported {} books from {} ({} rows skipped)",
            summary.added,
            label,
            summary.skipped.len()
        );
        Ok(summary)
    }

    pub fn import_from_reader<R: Read>(&mut self, reader: R) -> Result<ImportSummary> {
        self.read_rows(reader)
            .map_err(|source| CatalogError::ImportError {
                path: STREAM_LABEL.to_string(),
                source,
            })
    }

    fn write_rows<W: Write>(&self, writer: W) -> csv::Result<()> {
        let mut writer = WriterBuilder::new()
            .delimiter(FIELD_DELIMITER)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(writer);

        writer.write_record(HEADER)?;
        for (title, record) in self.iter() {
            let ratings = record
                .ratings()
                .iter()
                .map(|r| r.to_string())
                .collect::<Vec<_>>()
                .join(RATING_DELIMITER);
            let year = record.year().to_string();
            writer.write_record([
                title.as_str(),
                record.author(),
                year.as_str(),
                ratings.as_str(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    fn read_rows<R: Read>(&mut self, reader: R) -> csv::Result<ImportSummary> {
        let mut reader = ReaderBuilder::new()
            .delimiter(FIELD_DELIMITER)
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .trim(Trim::None)
            .from_reader(reader);

        // Every record is decoded before any row is applied.
        let records = reader.records().collect::<csv::Result<Vec<StringRecord>>>()?;

        let mut summary = ImportSummary::default();
        for record in &records {
            let fields = line_fields(record);
            if is_blank(&fields) {
                continue;
            }

            let line = record.position().map(|p| p.line()).unwrap_or_default();
            match self.add_row(&fields) {
                Ok(()) => summary.added += 1,
                Err(reason) => {
                    let content = fields.join(";");
                    if let SkipReason::TooFewFields { .. } = reason {
                        tracing::debug!("Ignoring line {}: {}", line, reason);
                    } else {
                        tracing::warn!("Skipping line {} '{}': {}", line, content, reason);
                    }
                    summary.skipped.push(SkippedRow {
                        line,
                        content,
                        reason,
                    });
                }
            }
        }

        Ok(summary)
    }

    fn add_row(&mut self, fields: &[&str]) -> std::result::Result<(), SkipReason> {
        let row = parse_row(fields)?;
        match self.add(row.title, row.author, row.year, &row.ratings) {
            Ok(()) => Ok(()),
            Err(CatalogError::DuplicateTitle { title }) => {
                Err(SkipReason::DuplicateTitle { title })
            }
            Err(CatalogError::InvalidRating { value }) => {
                Err(SkipReason::RatingOutOfRange { value })
            }
            Err(other) => Err(SkipReason::Rejected {
                message: other.to_string(),
            }),
        }
    }
}

/// Fields of one line with whitespace stripped from the ends of the line
/// only; padding next to a `;` is part of the value.
fn line_fields(record: &StringRecord) -> Vec<&str> {
    let mut fields: Vec<&str> = record.iter().collect();
    if let Some(first) = fields.first_mut() {
        *first = first.trim_start();
    }
    if let Some(last) = fields.last_mut() {
        *last = last.trim_end();
    }
    fields
}

fn is_blank(fields: &[&str]) -> bool {
    fields.len() <= 1 && fields.iter().all(|field| field.is_empty())
}

fn parse_row(fields: &[&str]) -> std::result::Result<ParsedRow, SkipReason> {
    if fields.len() < HEADER.len() {
        return Err(SkipReason::TooFewFields {
            found: fields.len(),
        });
    }

    let year_field = fields[2];
    let year = year_field
        .trim()
        .parse::<i32>()
        .map_err(|_| SkipReason::InvalidYear {
            value: year_field.to_string(),
        })?;

    let ratings = parse_ratings(fields[3])?;

    Ok(ParsedRow {
        title: fields[0].to_string(),
        author: fields[1].to_string(),
        year,
        ratings,
    })
}

fn parse_ratings(field: &str) -> std::result::Result<Vec<i64>, SkipReason> {
    if field.is_empty() {
        return Ok(Vec::new());
    }

    field
        .split(RATING_DELIMITER)
        .map(|token| {
            let token = token.trim();
            let value = token
                .parse::<i64>()
                .map_err(|_| SkipReason::UnparsableRating {
                    value: token.to_string(),
                })?;
            if !(MIN_RATING..=MAX_RATING).contains(&value) {
                return Err(SkipReason::RatingOutOfRange { value });
            }
            Ok(value)
        })
        .collect()
}
