use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// FacetValue – a normalized text cell
// ---------------------------------------------------------------------------

/// Label rendered for missing values.
pub const UNKNOWN_LABEL: &str = "unknown";

/// A cleaned text value of a facet column (author, language, ...).
///
/// Missing cells are kept as an explicit `Unknown` instead of being dropped, so
/// grouping and filtering always see every row. `Unknown` sorts before any
/// known value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FacetValue {
    Unknown,
    Known(String),
}

impl FacetValue {
    /// Build from an already cleaned cell.
    pub fn from_cell(cell: Option<String>) -> Self {
        match cell {
            Some(s) => FacetValue::known(s),
            None => FacetValue::Unknown,
        }
    }

    pub fn known(s: impl Into<String>) -> Self {
        FacetValue::Known(s.into())
    }

    pub fn is_known(&self) -> bool {
        matches!(self, FacetValue::Known(_))
    }

    pub fn as_known(&self) -> Option<&str> {
        match self {
            FacetValue::Known(s) => Some(s),
            FacetValue::Unknown => None,
        }
    }

    /// Text used for display, sorting by label and free-text search.
    pub fn label(&self) -> &str {
        self.as_known().unwrap_or(UNKNOWN_LABEL)
    }
}

impl fmt::Display for FacetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// YearRange – inclusive publication year interval
// ---------------------------------------------------------------------------

/// Inclusive `[min, max]` interval of publication years.
///
/// The constructor orders its arguments, so `min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    min: i32,
    max: i32,
}

impl YearRange {
    pub fn new(a: i32, b: i32) -> Self {
        YearRange {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }

    /// Whether `other` lies completely inside this range.
    pub fn covers(&self, other: &YearRange) -> bool {
        self.min <= other.min && other.max <= self.max
    }
}

// ---------------------------------------------------------------------------
// BookRecord – one row of the catalogue
// ---------------------------------------------------------------------------

/// A single book (one row of the source file).
#[derive(Debug, Clone, PartialEq)]
pub struct BookRecord {
    pub title: String,
    pub author: FacetValue,
    pub language: FacetValue,
    pub category: FacetValue,
    /// `None` when the year is missing or not numeric.
    pub publication_year: Option<i32>,
    pub publisher: FacetValue,
    /// Direct link to a digital copy, as given in the source.
    pub link: Option<String>,
    pub author_link: Option<String>,
    /// Non-empty cells of unrecognised columns, keyed by header.
    pub extra: BTreeMap<String, String>,
}

impl BookRecord {
    /// A record with only the required columns set.
    pub fn new(
        title: impl Into<String>,
        author: FacetValue,
        language: FacetValue,
        category: FacetValue,
        publication_year: Option<i32>,
    ) -> Self {
        BookRecord {
            title: title.into(),
            author,
            language,
            category,
            publication_year,
            publisher: FacetValue::Unknown,
            link: None,
            author_link: None,
            extra: BTreeMap::new(),
        }
    }

    /// Display text of the year column.
    pub fn year_label(&self) -> String {
        match self.publication_year {
            Some(y) => y.to_string(),
            None => UNKNOWN_LABEL.to_string(),
        }
    }

    /// Lower-cased concatenation of every searchable field.
    pub fn search_blob(&self) -> String {
        let year = self
            .publication_year
            .map(|y| y.to_string())
            .unwrap_or_default();
        [
            self.title.as_str(),
            self.author.as_known().unwrap_or(""),
            year.as_str(),
            self.category.as_known().unwrap_or(""),
            self.language.as_known().unwrap_or(""),
            self.publisher.as_known().unwrap_or(""),
        ]
        .join(" ")
        .to_lowercase()
    }

    /// Where the details window should send the user for this book.
    pub fn access_link(&self) -> AccessLink {
        if let Some(link) = self.link.as_deref().filter(|l| is_web_link(l)) {
            return AccessLink::Direct(link.to_string());
        }
        let title = self.title.trim();
        if title.is_empty() {
            return AccessLink::None;
        }
        let query = match self.author.as_known() {
            Some(author) => format!("{title} {author}"),
            None => title.to_string(),
        };
        match url::Url::parse_with_params(WEB_SEARCH_URL, &[("q", query.as_str())]) {
            Ok(url) => AccessLink::Search(url.into()),
            Err(e) => {
                log::warn!("could not build search link for {title:?}: {e}");
                AccessLink::None
            }
        }
    }

    /// The author profile link, if it looks like a web address.
    pub fn author_profile_link(&self) -> Option<&str> {
        self.author_link.as_deref().filter(|l| is_web_link(l))
    }
}

const WEB_SEARCH_URL: &str = "https://www.google.com/search";

fn is_web_link(s: &str) -> bool {
    s.starts_with("http") || s.starts_with("www")
}

/// Target of the "access" button in the details window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessLink {
    /// The catalogue provides a link to a digital copy.
    Direct(String),
    /// Fallback web search for title and author.
    Search(String),
    /// Nothing to link to (untitled record).
    None,
}

// ---------------------------------------------------------------------------
// Catalogue – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed catalogue with pre-computed facet options.
///
/// Records keep the order of the source file and are never mutated after load.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    records: Vec<BookRecord>,
    languages: BTreeSet<FacetValue>,
    categories: BTreeSet<FacetValue>,
    authors: BTreeSet<FacetValue>,
    publishers: BTreeSet<FacetValue>,
    year_span: Option<YearRange>,
}

impl Catalogue {
    /// Build facet indices from the loaded records.
    pub fn from_records(records: Vec<BookRecord>) -> Self {
        let mut languages = BTreeSet::new();
        let mut categories = BTreeSet::new();
        let mut authors = BTreeSet::new();
        let mut publishers = BTreeSet::new();
        let mut year_span: Option<YearRange> = None;

        for rec in &records {
            languages.insert(rec.language.clone());
            categories.insert(rec.category.clone());
            authors.insert(rec.author.clone());
            publishers.insert(rec.publisher.clone());
            if let Some(y) = rec.publication_year {
                year_span = Some(match year_span {
                    Some(span) => YearRange::new(span.min().min(y), span.max().max(y)),
                    None => YearRange::new(y, y),
                });
            }
        }

        Catalogue {
            records,
            languages,
            categories,
            authors,
            publishers,
            year_span,
        }
    }

    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&BookRecord> {
        self.records.get(index)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalogue is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn languages(&self) -> &BTreeSet<FacetValue> {
        &self.languages
    }

    pub fn categories(&self) -> &BTreeSet<FacetValue> {
        &self.categories
    }

    pub fn authors(&self) -> &BTreeSet<FacetValue> {
        &self.authors
    }

    pub fn publishers(&self) -> &BTreeSet<FacetValue> {
        &self.publishers
    }

    /// Smallest range holding every known publication year.
    pub fn year_span(&self) -> Option<YearRange> {
        self.year_span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str, author: Option<&str>, year: Option<i32>) -> BookRecord {
        BookRecord::new(
            title,
            FacetValue::from_cell(author.map(String::from)),
            FacetValue::known("te"),
            FacetValue::known("History"),
            year,
        )
    }

    #[test]
    fn year_range_orders_bounds() {
        let r = YearRange::new(2010, 1990);
        assert_eq!(r.min(), 1990);
        assert_eq!(r.max(), 2010);
        assert!(r.contains(1990));
        assert!(r.contains(2010));
        assert!(!r.contains(2011));
    }

    #[test]
    fn unknown_sorts_first() {
        let mut set = BTreeSet::new();
        set.insert(FacetValue::known("b"));
        set.insert(FacetValue::Unknown);
        set.insert(FacetValue::known("a"));
        let labels: Vec<&str> = set.iter().map(|v| v.label()).collect();
        assert_eq!(labels, ["unknown", "a", "b"]);
    }

    #[test]
    fn catalogue_collects_facets_and_span() {
        let cat = Catalogue::from_records(vec![
            book("A", Some("X"), Some(1950)),
            book("B", None, None),
            book("C", Some("Y"), Some(1921)),
        ]);
        assert_eq!(cat.len(), 3);
        assert_eq!(cat.year_span(), Some(YearRange::new(1921, 1950)));
        assert_eq!(cat.authors().len(), 3);
        assert!(cat.authors().contains(&FacetValue::Unknown));
        assert_eq!(cat.records()[1].title, "B");
    }

    #[test]
    fn empty_catalogue_has_no_span() {
        let cat = Catalogue::from_records(Vec::new());
        assert!(cat.is_empty());
        assert_eq!(cat.year_span(), None);
    }

    #[test]
    fn access_link_prefers_direct_copy() {
        let mut rec = book("Ramayana", Some("Valmiki"), None);
        rec.link = Some("https://archive.org/details/ramayana".into());
        assert_eq!(
            rec.access_link(),
            AccessLink::Direct("https://archive.org/details/ramayana".into())
        );
    }

    #[test]
    fn access_link_falls_back_to_search() {
        let mut rec = book("Veyi Padagalu", Some("Viswanatha"), None);
        rec.link = Some("n/a".into());
        match rec.access_link() {
            AccessLink::Search(url) => {
                assert!(url.starts_with("https://www.google.com/search?q="));
                assert!(url.contains("Veyi+Padagalu+Viswanatha"));
            }
            other => panic!("expected search link, got {other:?}"),
        }
    }

    #[test]
    fn untitled_record_has_no_link() {
        let rec = book("  ", None, None);
        assert_eq!(rec.access_link(), AccessLink::None);
    }

    #[test]
    fn search_blob_skips_unknowns() {
        let rec = book("Kanyasulkam", None, Some(1892));
        assert_eq!(rec.search_blob(), "kanyasulkam  1892 history te ");
    }
}
