use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Deserialize;

use super::model::{BookRecord, Catalogue, FacetValue, YearRange};

// ---------------------------------------------------------------------------
// Filter selection: what the user has picked in the side panel
// ---------------------------------------------------------------------------

/// Which fields the free-text search looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// Title only.
    #[default]
    Title,
    /// Title, author, year, category, language and publisher.
    AllFields,
}

/// The complete set of user constraints.
///
/// An empty set for a facet means "no constraint" (show all). A `None` year
/// range means the full span of the catalogue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    pub languages: BTreeSet<FacetValue>,
    pub categories: BTreeSet<FacetValue>,
    pub authors: BTreeSet<FacetValue>,
    pub publishers: BTreeSet<FacetValue>,
    pub years: Option<YearRange>,
    pub search_text: String,
    pub search_scope: SearchScope,
}

impl FilterSelection {
    /// Whether this selection lets every record through.
    pub fn is_unconstrained(&self, catalogue: &Catalogue) -> bool {
        self.languages.is_empty()
            && self.categories.is_empty()
            && self.authors.is_empty()
            && self.publishers.is_empty()
            && !narrows_years(self.years, catalogue.year_span())
            && self.search_text.trim().is_empty()
    }
}

/// A range only filters when it leaves out part of the catalogue's known years.
fn narrows_years(range: Option<YearRange>, span: Option<YearRange>) -> bool {
    match (range, span) {
        (Some(range), Some(span)) => !range.covers(&span),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// The records of a catalogue passing a selection, in catalogue order.
#[derive(Debug, Clone)]
pub struct FilteredView {
    catalogue: Arc<Catalogue>,
    indices: Vec<usize>,
}

impl FilteredView {
    /// A view containing every record.
    pub fn all(catalogue: Arc<Catalogue>) -> Self {
        let indices = (0..catalogue.len()).collect();
        FilteredView { catalogue, indices }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// Catalogue indices of the matching records, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BookRecord> + '_ {
        self.indices.iter().map(|&i| &self.catalogue.records()[i])
    }
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Return the view of records that pass every active constraint.
///
/// A record passes when:
/// * each facet set is empty or contains the record's value
/// * the year range is absent or covers the whole catalogue span, or the
///   record has a known year inside the range
/// * the trimmed search text is empty or occurs in the searched fields,
///   ignoring case
pub fn apply(catalogue: &Arc<Catalogue>, selection: &FilterSelection) -> FilteredView {
    let year_filter = if narrows_years(selection.years, catalogue.year_span()) {
        selection.years
    } else {
        None
    };
    let needle = selection.search_text.trim().to_lowercase();

    let indices = catalogue
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            in_facet(&selection.languages, &rec.language)
                && in_facet(&selection.categories, &rec.category)
                && in_facet(&selection.authors, &rec.author)
                && in_facet(&selection.publishers, &rec.publisher)
                && year_filter.map_or(true, |range| {
                    rec.publication_year.is_some_and(|y| range.contains(y))
                })
                && (needle.is_empty() || matches_search(rec, &needle, selection.search_scope))
        })
        .map(|(i, _)| i)
        .collect();

    FilteredView {
        catalogue: Arc::clone(catalogue),
        indices,
    }
}

fn in_facet(selected: &BTreeSet<FacetValue>, value: &FacetValue) -> bool {
    selected.is_empty() || selected.contains(value)
}

fn matches_search(rec: &BookRecord, needle: &str, scope: SearchScope) -> bool {
    match scope {
        SearchScope::Title => rec.title.to_lowercase().contains(needle),
        SearchScope::AllFields => rec.search_blob().contains(needle),
    }
}
