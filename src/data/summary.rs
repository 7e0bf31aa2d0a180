use std::collections::{BTreeMap, HashMap, HashSet};

use super::filter::FilteredView;
use super::model::FacetValue;

/// Shown in place of the most common language when nothing matches.
pub const NO_DATA: &str = "no data";

// ---------------------------------------------------------------------------
// Aggregate summary
// ---------------------------------------------------------------------------

/// One slice of the language donut.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageShare {
    pub language: FacetValue,
    pub count: usize,
    /// Share of the view in percent (0–100).
    pub percentage: f64,
}

/// KPIs and chart series derived from a single filtered view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateSummary {
    pub total_books: usize,
    /// Distinct known authors.
    pub unique_authors: usize,
    /// `None` for an empty view.
    pub most_common_language: Option<FacetValue>,
    /// Known authors by descending count.
    pub top_authors: Vec<(String, usize)>,
    /// Books per known year, ascending by year.
    pub publication_trend: Vec<(i32, usize)>,
    pub language_distribution: Vec<LanguageShare>,
}

impl AggregateSummary {
    /// Label of the most common language KPI.
    pub fn most_common_language_label(&self) -> &str {
        self.most_common_language
            .as_ref()
            .map_or(NO_DATA, |lang| lang.label())
    }
}

/// Derive the summary for `view`, keeping at most `top_n` authors.
///
/// Ties in every ranking go to the value seen first in catalogue order.
pub fn summarize(view: &FilteredView, top_n: usize) -> AggregateSummary {
    let total_books = view.len();

    let unique_authors = view
        .iter()
        .filter_map(|r| r.author.as_known())
        .collect::<HashSet<_>>()
        .len();

    let languages = ranked_counts(view.iter().map(|r| &r.language));
    let most_common_language = languages.first().map(|(lang, _)| (*lang).clone());

    let language_distribution = languages
        .iter()
        .map(|(lang, count)| LanguageShare {
            language: (*lang).clone(),
            count: *count,
            percentage: *count as f64 * 100.0 / total_books as f64,
        })
        .collect();

    let top_authors = ranked_counts(view.iter().filter_map(|r| r.author.as_known()))
        .into_iter()
        .take(top_n)
        .map(|(author, count)| (author.to_string(), count))
        .collect();

    let mut trend: BTreeMap<i32, usize> = BTreeMap::new();
    for year in view.iter().filter_map(|r| r.publication_year) {
        *trend.entry(year).or_default() += 1;
    }

    AggregateSummary {
        total_books,
        unique_authors,
        most_common_language,
        top_authors,
        publication_trend: trend.into_iter().collect(),
        language_distribution,
    }
}

/// Count occurrences, then order by descending count.
///
/// The sort is stable over first-seen order, which settles ties.
fn ranked_counts<'a, T, I>(values: I) -> Vec<(&'a T, usize)>
where
    T: Eq + std::hash::Hash + ?Sized,
    I: IntoIterator<Item = &'a T>,
{
    let mut slots: HashMap<&T, usize> = HashMap::new();
    let mut counts: Vec<(&T, usize)> = Vec::new();
    for value in values {
        let slot = *slots.entry(value).or_insert_with(|| {
            counts.push((value, 0));
            counts.len() - 1
        });
        counts[slot].1 += 1;
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use super::*;
    use crate::data::filter::{apply, FilterSelection};
    use crate::data::model::{BookRecord, Catalogue};

    fn rec(title: &str, author: Option<&str>, language: &str, year: Option<i32>) -> BookRecord {
        BookRecord::new(
            title,
            FacetValue::from_cell(author.map(String::from)),
            FacetValue::known(language),
            FacetValue::known("Fiction"),
            year,
        )
    }

    fn sample() -> Arc<Catalogue> {
        Arc::new(Catalogue::from_records(vec![
            rec("A", Some("X"), "en", Some(2001)),
            rec("B", Some("X"), "te", Some(2005)),
            rec("C", Some("Y"), "en", None),
        ]))
    }

    fn select_languages(values: &[&str]) -> FilterSelection {
        FilterSelection {
            languages: values
                .iter()
                .map(|v| FacetValue::known(*v))
                .collect::<BTreeSet<_>>(),
            ..Default::default()
        }
    }

    #[test]
    fn english_selection_example() {
        let cat = sample();
        let view = apply(&cat, &select_languages(&["en"]));
        let summary = summarize(&view, 10);

        assert_eq!(summary.total_books, 2);
        assert_eq!(summary.unique_authors, 2);
        assert_eq!(summary.most_common_language_label(), "en");
        assert_eq!(summary.publication_trend, vec![(2001, 1)]);
    }

    #[test]
    fn empty_view_is_zero_state() {
        let cat = sample();
        let view = apply(&cat, &select_languages(&["fr"]));
        let summary = summarize(&view, 10);

        assert_eq!(summary.total_books, 0);
        assert_eq!(summary.unique_authors, 0);
        assert_eq!(summary.most_common_language, None);
        assert_eq!(summary.most_common_language_label(), NO_DATA);
        assert!(summary.top_authors.is_empty());
        assert!(summary.publication_trend.is_empty());
        assert!(summary.language_distribution.is_empty());
    }

    #[test]
    fn language_tie_goes_to_first_occurrence() {
        let cat = Arc::new(Catalogue::from_records(vec![
            rec("A", Some("X"), "te", None),
            rec("B", Some("Y"), "en", None),
            rec("C", Some("Z"), "en", None),
            rec("D", Some("W"), "te", None),
        ]));
        let summary = summarize(&FilteredView::all(cat), 10);
        assert_eq!(summary.most_common_language_label(), "te");
    }

    #[test]
    fn top_authors_ranked_and_truncated() {
        let cat = Arc::new(Catalogue::from_records(vec![
            rec("A", Some("Y"), "te", None),
            rec("B", Some("X"), "te", None),
            rec("C", Some("X"), "te", None),
            rec("D", None, "te", None),
            rec("E", None, "te", None),
            rec("F", None, "te", None),
            rec("G", Some("Z"), "te", None),
        ]));
        let summary = summarize(&FilteredView::all(cat), 2);
        assert_eq!(
            summary.top_authors,
            vec![("X".to_string(), 2), ("Y".to_string(), 1)]
        );
        assert_eq!(summary.unique_authors, 3);
    }

    #[test]
    fn distribution_percentages_sum_to_hundred() {
        let cat = Arc::new(Catalogue::from_records(vec![
            rec("A", Some("X"), "te", None),
            rec("B", Some("X"), "en", None),
            rec("C", Some("X"), "te", None),
            rec("D", Some("X"), "hi", None),
            rec("E", Some("X"), "sa", None),
            rec("F", Some("X"), "sa", None),
            rec("G", Some("X"), "te", None),
        ]));
        let summary = summarize(&FilteredView::all(cat), 10);
        let total: f64 = summary
            .language_distribution
            .iter()
            .map(|s| s.percentage)
            .sum();
        assert!((total - 100.0).abs() < 1e-9);
        let counts: usize = summary.language_distribution.iter().map(|s| s.count).sum();
        assert_eq!(counts, summary.total_books);
        assert_eq!(summary.language_distribution[0].language, FacetValue::known("te"));
    }

    #[test]
    fn totals_match_view_for_all_selections() {
        let cat = sample();
        for selection in [
            FilterSelection::default(),
            select_languages(&["te"]),
            select_languages(&["en", "te"]),
        ] {
            let view = apply(&cat, &selection);
            let summary = summarize(&view, 5);
            assert_eq!(summary.total_books, view.len());
            assert!(summary.unique_authors <= summary.total_books);
        }
    }

    #[test]
    fn trend_is_ascending_and_skips_unknown() {
        let cat = Arc::new(Catalogue::from_records(vec![
            rec("A", Some("X"), "te", Some(1990)),
            rec("B", Some("X"), "te", None),
            rec("C", Some("X"), "te", Some(1950)),
            rec("D", Some("X"), "te", Some(1990)),
        ]));
        let summary = summarize(&FilteredView::all(cat), 10);
        assert_eq!(summary.publication_trend, vec![(1950, 1), (1990, 2)]);
    }
}
