use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;

use super::model::{BookRecord, Catalogue, FacetValue};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a catalogue could not be loaded. Every variant is fatal to startup.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("catalogue file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array of objects")]
    NotRecords,

    #[error("missing required column(s): {}", .missing.join(", "))]
    MissingColumns { missing: Vec<&'static str> },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a catalogue from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row, one book per line
/// * `.json` – `[{ "title": ..., "author": ..., ... }, ...]`
pub fn load_file(path: &Path) -> Result<Catalogue, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let text = read_text(path)?;
    match ext.as_str() {
        "csv" => load_csv(&text),
        "json" => load_json(&text),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

fn read_text(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

// ---------------------------------------------------------------------------
// Column resolution
// ---------------------------------------------------------------------------

/// Logical columns of the catalogue and the header names accepted for each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Column {
    Title,
    Author,
    Language,
    Category,
    Year,
    PublicationDate,
    Publisher,
    Link,
    AuthorLink,
}

impl Column {
    const ALL: [Column; 9] = [
        Column::Title,
        Column::Author,
        Column::Language,
        Column::Category,
        Column::Year,
        Column::PublicationDate,
        Column::Publisher,
        Column::Link,
        Column::AuthorLink,
    ];

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Column::Title => &["title", "book title", "book_title"],
            Column::Author => &["author", "author(s)", "authors"],
            Column::Language => &["language"],
            Column::Category => &["category"],
            Column::Year => &["publication_year", "publication year", "year"],
            Column::PublicationDate => &["publication date", "publication_date"],
            Column::Publisher => &["publisher"],
            Column::Link => &["book title_url", "url", "link"],
            Column::AuthorLink => &["author_url"],
        }
    }

    fn from_header(header: &str) -> Option<Column> {
        let normalized = header.trim().to_lowercase();
        Column::ALL
            .into_iter()
            .find(|col| col.aliases().contains(&normalized.as_str()))
    }
}

/// Name reported for each required column when it is absent.
const REQUIRED: [(&str, &[Column]); 5] = [
    ("title", &[Column::Title]),
    ("author", &[Column::Author]),
    ("language", &[Column::Language]),
    ("category", &[Column::Category]),
    (
        "publication_year",
        &[Column::Year, Column::PublicationDate],
    ),
];

fn check_required(present: &BTreeSet<Column>) -> Result<(), LoadError> {
    let missing: Vec<&'static str> = REQUIRED
        .iter()
        .filter(|(_, cols)| !cols.iter().any(|c| present.contains(c)))
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(LoadError::MissingColumns { missing })
    }
}

// ---------------------------------------------------------------------------
// Cell cleaning
// ---------------------------------------------------------------------------

/// Trim a raw cell and map the usual placeholders for "no value" to `None`.
pub fn clean_cell(raw: &str) -> Option<String> {
    let s = raw.trim();
    match s.to_lowercase().as_str() {
        "" | "unknown" | "nan" | "null" | "none" => None,
        _ => Some(s.to_string()),
    }
}

/// Parse a year cell: integers, or floats without a fractional part.
pub fn parse_year(cell: &str) -> Option<i32> {
    let s = clean_cell(cell)?;
    if let Ok(y) = s.parse::<i32>() {
        return Some(y);
    }
    let f = s.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() <= i32::MAX as f64 {
        Some(f as i32)
    } else {
        None
    }
}

/// Cleaned cells of one row: recognised columns plus everything else by header.
#[derive(Debug, Default)]
struct RowCells {
    known: BTreeMap<Column, String>,
    extra: BTreeMap<String, String>,
}

impl RowCells {
    /// Record one raw cell. Blank cells are dropped and, when several headers
    /// resolve to the same column, the first non-blank cell wins.
    fn push(&mut self, header: &str, column: Option<Column>, raw: &str) {
        let Some(cell) = clean_cell(raw) else {
            return;
        };
        match column {
            Some(col) => {
                self.known.entry(col).or_insert(cell);
            }
            None => {
                self.extra.entry(header.trim().to_string()).or_insert(cell);
            }
        }
    }
}

/// Assemble a record from the cleaned cells of one row.
fn build_record(cells: RowCells) -> BookRecord {
    let RowCells { mut known, extra } = cells;
    let year = known
        .get(&Column::Year)
        .and_then(|c| parse_year(c))
        .or_else(|| known.get(&Column::PublicationDate).and_then(|c| parse_year(c)));

    let mut take = |col: Column| known.remove(&col);
    let mut record = BookRecord::new(
        take(Column::Title).unwrap_or_default(),
        FacetValue::from_cell(take(Column::Author)),
        FacetValue::from_cell(take(Column::Language)),
        FacetValue::from_cell(take(Column::Category)),
        year,
    );
    record.publisher = FacetValue::from_cell(take(Column::Publisher));
    record.link = take(Column::Link);
    record.author_link = take(Column::AuthorLink);
    record.extra = extra;
    record
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, matched case-insensitively.
/// Unrecognised columns are kept per record as extra metadata.
fn load_csv(text: &str) -> Result<Catalogue, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<(String, Option<Column>)> = reader
        .headers()?
        .iter()
        .map(|h| (h.to_string(), Column::from_header(h)))
        .collect();

    let present: BTreeSet<Column> = headers.iter().filter_map(|(_, col)| *col).collect();
    check_required(&present)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let mut cells = RowCells::default();
        for ((header, col), value) in headers.iter().zip(row.iter()) {
            cells.push(header, *col, value);
        }
        records.push(build_record(cells));
    }

    Ok(Catalogue::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "title": "Kanyasulkam", "author": "Gurajada", "language": "te",
///     "category": "Drama", "publication_year": 1892 },
///   ...
/// ]
/// ```
///
/// A column counts as present when at least one object carries it; objects
/// without it get an unknown value for that column. Unrecognised keys are
/// kept as extra metadata.
fn load_json(text: &str) -> Result<Catalogue, LoadError> {
    let root: JsonValue = serde_json::from_str(text)?;
    let rows = root.as_array().ok_or(LoadError::NotRecords)?;

    let mut present = BTreeSet::new();
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let obj = row.as_object().ok_or(LoadError::NotRecords)?;
        let mut cells = RowCells::default();
        for (key, value) in obj {
            let col = Column::from_header(key);
            if let Some(col) = col {
                present.insert(col);
            }
            if let Some(cell) = json_cell(value) {
                cells.push(key, col, &cell);
            }
        }
        records.push(build_record(cells));
    }

    if !rows.is_empty() {
        check_required(&present)?;
    }
    Ok(Catalogue::from_records(records))
}

fn json_cell(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
