use std::cmp::Ordering;

use super::filter::FilteredView;
use super::model::BookRecord;

// ---------------------------------------------------------------------------
// Table ordering
// ---------------------------------------------------------------------------

/// Columns of the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Title,
    Author,
    Year,
    Language,
    Category,
    Publisher,
}

impl SortColumn {
    pub const ALL: [SortColumn; 6] = [
        SortColumn::Title,
        SortColumn::Author,
        SortColumn::Year,
        SortColumn::Language,
        SortColumn::Category,
        SortColumn::Publisher,
    ];

    pub fn header(self) -> &'static str {
        match self {
            SortColumn::Title => "Title",
            SortColumn::Author => "Author",
            SortColumn::Year => "Year",
            SortColumn::Language => "Language",
            SortColumn::Category => "Category",
            SortColumn::Publisher => "Publisher",
        }
    }

    /// Cell text for this column.
    pub fn cell(self, rec: &BookRecord) -> String {
        match self {
            SortColumn::Title => rec.title.clone(),
            SortColumn::Author => rec.author.to_string(),
            SortColumn::Year => rec.year_label(),
            SortColumn::Language => rec.language.to_string(),
            SortColumn::Category => rec.category.to_string(),
            SortColumn::Publisher => rec.publisher.to_string(),
        }
    }
}

/// Active table sort. `None` keeps catalogue order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub column: Option<SortColumn>,
    pub ascending: bool,
}

impl SortSpec {
    pub fn by(column: SortColumn, ascending: bool) -> Self {
        SortSpec {
            column: Some(column),
            ascending,
        }
    }

    /// Next state when a header is clicked: ascending → descending → unsorted.
    pub fn cycle(self, clicked: SortColumn) -> Self {
        match self.column {
            Some(col) if col == clicked && self.ascending => SortSpec::by(clicked, false),
            Some(col) if col == clicked => SortSpec::default(),
            _ => SortSpec::by(clicked, true),
        }
    }
}

/// Catalogue indices of the view's rows in display order.
///
/// The result is always a permutation of `view.indices()`. Equal keys keep
/// catalogue order and unknown years go last in either direction.
pub fn sorted_rows(view: &FilteredView, spec: SortSpec) -> Vec<usize> {
    let mut rows = view.indices().to_vec();
    let Some(column) = spec.column else {
        return rows;
    };
    let records = view.catalogue().records();

    rows.sort_by(|&a, &b| {
        let (ra, rb) = (&records[a], &records[b]);
        if column == SortColumn::Year {
            return match (ra.publication_year, rb.publication_year) {
                (Some(x), Some(y)) => directed(x.cmp(&y), spec.ascending),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
        }
        let ord = match column {
            SortColumn::Title => ra.title.to_lowercase().cmp(&rb.title.to_lowercase()),
            SortColumn::Author => ra.author.cmp(&rb.author),
            SortColumn::Language => ra.language.cmp(&rb.language),
            SortColumn::Category => ra.category.cmp(&rb.category),
            SortColumn::Publisher => ra.publisher.cmp(&rb.publisher),
            SortColumn::Year => Ordering::Equal,
        };
        directed(ord, spec.ascending)
    });
    rows
}

fn directed(ord: Ordering, ascending: bool) -> Ordering {
    if ascending {
        ord
    } else {
        ord.reverse()
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Number of pages needed for `rows` rows; at least one.
pub fn page_count(rows: usize, page_size: usize) -> usize {
    rows.div_ceil(page_size.max(1)).max(1)
}

/// The slice of `rows` shown on zero-based `page`, clamped to the last page.
pub fn page_slice(rows: &[usize], page: usize, page_size: usize) -> &[usize] {
    let page_size = page_size.max(1);
    let page = page.min(page_count(rows.len(), page_size) - 1);
    let start = (page * page_size).min(rows.len());
    let end = (start + page_size).min(rows.len());
    &rows[start..end]
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::data::model::{Catalogue, FacetValue};

    fn view() -> FilteredView {
        let rec = |title: &str, author: &str, year: Option<i32>| {
            BookRecord::new(
                title,
                FacetValue::known(author),
                FacetValue::known("te"),
                FacetValue::known("Novel"),
                year,
            )
        };
        FilteredView::all(Arc::new(Catalogue::from_records(vec![
            rec("banana", "Y", Some(1990)),
            rec("Apple", "X", None),
            rec("cherry", "X", Some(1950)),
        ])))
    }

    #[test]
    fn unsorted_keeps_catalogue_order() {
        assert_eq!(sorted_rows(&view(), SortSpec::default()), [0, 1, 2]);
    }

    #[test]
    fn title_sort_ignores_case() {
        let v = view();
        assert_eq!(sorted_rows(&v, SortSpec::by(SortColumn::Title, true)), [1, 0, 2]);
        assert_eq!(sorted_rows(&v, SortSpec::by(SortColumn::Title, false)), [2, 0, 1]);
    }

    #[test]
    fn unknown_years_sort_last_both_ways() {
        let v = view();
        assert_eq!(sorted_rows(&v, SortSpec::by(SortColumn::Year, true)), [2, 0, 1]);
        assert_eq!(sorted_rows(&v, SortSpec::by(SortColumn::Year, false)), [0, 2, 1]);
    }

    #[test]
    fn equal_keys_keep_catalogue_order() {
        let v = view();
        assert_eq!(sorted_rows(&v, SortSpec::by(SortColumn::Author, true)), [1, 2, 0]);
    }

    #[test]
    fn header_clicks_cycle() {
        let spec = SortSpec::default().cycle(SortColumn::Year);
        assert_eq!(spec, SortSpec::by(SortColumn::Year, true));
        let spec = spec.cycle(SortColumn::Year);
        assert_eq!(spec, SortSpec::by(SortColumn::Year, false));
        assert_eq!(spec.cycle(SortColumn::Year), SortSpec::default());
        assert_eq!(spec.cycle(SortColumn::Title), SortSpec::by(SortColumn::Title, true));
    }

    #[test]
    fn pages() {
        let rows: Vec<usize> = (0..45).collect();
        assert_eq!(page_count(rows.len(), 20), 3);
        assert_eq!(page_count(0, 20), 1);
        assert_eq!(page_slice(&rows, 0, 20), &rows[0..20]);
        assert_eq!(page_slice(&rows, 2, 20), &rows[40..45]);
        assert_eq!(page_slice(&rows, 9, 20), &rows[40..45]);
        assert!(page_slice(&[], 0, 20).is_empty());
    }
}
