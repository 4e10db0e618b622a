use book_catalog::{Catalog, CatalogError, SkipReason};
use std::collections::BTreeSet;
use tempfile::TempDir;

type Tuple = (String, String, i32, Vec<u8>);

fn tuples(catalog: &Catalog) -> BTreeSet<Tuple> {
    catalog
        .all()
        .into_iter()
        .map(|(title, record)| {
            (
                title,
                record.author().to_string(),
                record.year(),
                record.ratings().to_vec(),
            )
        })
        .collect()
}

#[test]
fn test_export_then_import_round_trips() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("books.csv");

    let mut original = Catalog::seeded();
    original.add("Dune", "F. Herbert", 1965, &[]).unwrap();
    original.add("Solaris", "S. Lem", 1961, &[4, 4, 5, 3]).unwrap();
    original.export(&path).unwrap();

    let mut restored = Catalog::new();
    let summary = restored.import(&path).unwrap();

    assert_eq!(summary.added, 4);
    assert!(summary.skipped.is_empty());
    assert_eq!(tuples(&restored), tuples(&original));
}

#[test]
fn test_export_file_layout() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("books.csv");

    let mut catalog = Catalog::new();
    catalog.add("Dune", "F. Herbert", 1965, &[5, 4]).unwrap();
    catalog.export(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "title;author;year;ratings\nDune;F. Herbert;1965;5,4\n");
}

#[test]
fn test_export_empty_catalog_writes_header() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty.csv");

    Catalog::new().export(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "title;author;year;ratings\n");
}

#[test]
fn test_export_into_missing_directory_is_export_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("no-such-dir").join("books.csv");

    let err = Catalog::seeded().export(&path).unwrap_err();
    assert!(matches!(err, CatalogError::ExportError { .. }));
}

#[test]
fn test_import_skips_out_of_range_row_and_continues() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("books.csv");
    std::fs::write(
        &path,
        "title;author;year;ratings\n\
         First;A;2001;5,4\n\
         Second;B;2002;3,9\n\
         Third;C;2003;\n",
    )
    .unwrap();

    let mut catalog = Catalog::new();
    let summary = catalog.import(&path).unwrap();

    assert_eq!(summary.added, 2);
    assert!(catalog.contains("First"));
    assert!(!catalog.contains("Second"));
    assert!(catalog.contains("Third"));
    assert_eq!(catalog.find("Third").unwrap().rating_count(), 0);

    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].line, 3);
    assert_eq!(
        summary.skipped[0].reason,
        SkipReason::RatingOutOfRange { value: 9 }
    );
}

#[test]
fn test_import_reports_duplicates_and_keeps_existing_record() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("books.csv");
    std::fs::write(
        &path,
        "title;author;year;ratings\nWar and Peace;Someone;2000;1\nNew Book;N;2020;2\n",
    )
    .unwrap();

    let mut catalog = Catalog::seeded();
    let summary = catalog.import(&path).unwrap();

    assert_eq!(summary.added, 1);
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.find("War and Peace").unwrap().author(), "L. Tolstoy");
    assert_eq!(
        summary.skipped[0].reason,
        SkipReason::DuplicateTitle {
            title: "War and Peace".to_string()
        }
    );
}

#[test]
fn test_import_missing_file_is_file_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.csv");

    let mut catalog = Catalog::new();
    let err = catalog.import(&path).unwrap_err();

    assert!(matches!(err, CatalogError::FileNotFound { .. }));
    assert!(catalog.is_empty());
}

#[test]
fn test_import_directory_is_import_error() {
    let temp_dir = TempDir::new().unwrap();

    let mut catalog = Catalog::new();
    let err = catalog.import(temp_dir.path()).unwrap_err();

    assert!(matches!(err, CatalogError::ImportError { .. }));
}

#[test]
fn test_import_header_only_adds_nothing() {
    let mut catalog = Catalog::new();
    let summary = catalog
        .import_from_reader("title;author;year;ratings\n".as_bytes())
        .unwrap();

    assert_eq!(summary.added, 0);
    assert!(summary.skipped.is_empty());
}
