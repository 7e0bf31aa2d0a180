use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::filter::{apply, FilterSelection, FilteredView};
use crate::data::model::Catalogue;
use crate::data::sort::{page_count, page_slice, sorted_rows, SortSpec};
use crate::data::summary::{summarize, AggregateSummary};

// ---------------------------------------------------------------------------
// Events emitted by the UI
// ---------------------------------------------------------------------------

/// A user interaction. Widgets never touch the state directly; they push
/// events that [`DashboardState::handle`] applies between frames.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// The complete new filter selection.
    SelectionChanged(FilterSelection),
    SortChanged(SortSpec),
    /// Zero-based table page.
    PageChanged(usize),
    /// Open the details window for a catalogue index.
    ShowDetails(usize),
    CloseDetails,
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// The full UI state of one session, independent of rendering.
pub struct DashboardState {
    catalogue: Arc<Catalogue>,
    pub config: DashboardConfig,

    selection: FilterSelection,
    view: FilteredView,
    summary: AggregateSummary,

    sort: SortSpec,
    /// Catalogue indices of the view in table order.
    rows: Vec<usize>,
    page: usize,

    /// Catalogue index shown in the details window.
    details: Option<usize>,

    /// Stable colour per language.
    pub language_colors: ColorMap,
    /// Text typed into the author list filter; does not affect the view.
    pub author_query: String,
}

impl DashboardState {
    /// Start a session over a freshly loaded catalogue.
    pub fn new(catalogue: Arc<Catalogue>, config: DashboardConfig) -> Self {
        let selection = FilterSelection {
            search_scope: config.search_scope,
            ..Default::default()
        };
        let language_colors = ColorMap::new(catalogue.languages());
        let view = FilteredView::all(Arc::clone(&catalogue));
        let mut state = Self {
            catalogue,
            config,
            selection,
            view,
            summary: AggregateSummary::default(),
            sort: SortSpec::default(),
            rows: Vec::new(),
            page: 0,
            details: None,
            language_colors,
            author_query: String::new(),
        };
        state.recompute();
        state
    }

    pub fn catalogue(&self) -> &Arc<Catalogue> {
        &self.catalogue
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    pub fn summary(&self) -> &AggregateSummary {
        &self.summary
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        page_count(self.rows.len(), self.config.page_size)
    }

    /// Catalogue indices on the current page, in table order.
    pub fn page_rows(&self) -> &[usize] {
        page_slice(&self.rows, self.page, self.config.page_size)
    }

    pub fn details(&self) -> Option<usize> {
        self.details
    }

    /// The event for a selection the panels edited during this frame, if it
    /// differs from the current one. All panels write into the same draft.
    pub fn selection_edit(&self, draft: FilterSelection) -> Option<DashboardEvent> {
        (draft != self.selection).then_some(DashboardEvent::SelectionChanged(draft))
    }

    /// Apply one event synchronously.
    pub fn handle(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::SelectionChanged(selection) => {
                if selection != self.selection {
                    self.selection = selection;
                    self.page = 0;
                    self.recompute();
                }
            }
            DashboardEvent::SortChanged(sort) => {
                self.sort = sort;
                self.rows = sorted_rows(&self.view, self.sort);
            }
            DashboardEvent::PageChanged(page) => {
                self.page = page.min(self.page_count() - 1);
            }
            DashboardEvent::ShowDetails(index) => {
                if index < self.catalogue.len() {
                    self.details = Some(index);
                }
            }
            DashboardEvent::CloseDetails => self.details = None,
        }
    }

    /// Re-derive view, summary and table order from the current selection.
    fn recompute(&mut self) {
        self.view = apply(&self.catalogue, &self.selection);
        self.summary = summarize(&self.view, self.config.top_authors);
        self.rows = sorted_rows(&self.view, self.sort);
        self.page = self.page.min(self.page_count() - 1);
        log::debug!(
            "{} of {} books match the current filters",
            self.view.len(),
            self.catalogue.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{BookRecord, FacetValue};
    use crate::data::sort::SortColumn;

    fn state(n: usize) -> DashboardState {
        let records = (0..n)
            .map(|i| {
                BookRecord::new(
                    format!("Book {i:03}"),
                    FacetValue::known(if i % 2 == 0 { "Even" } else { "Odd" }),
                    FacetValue::known(if i % 3 == 0 { "en" } else { "te" }),
                    FacetValue::known("Essay"),
                    Some(1900 + i as i32),
                )
            })
            .collect();
        let config = DashboardConfig {
            page_size: 10,
            ..Default::default()
        };
        DashboardState::new(Arc::new(Catalogue::from_records(records)), config)
    }

    #[test]
    fn starts_with_everything_visible() {
        let s = state(25);
        assert_eq!(s.view().len(), 25);
        assert_eq!(s.summary().total_books, 25);
        assert_eq!(s.page_count(), 3);
        assert_eq!(s.page_rows(), (0..10).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn selection_change_recomputes_and_resets_page() {
        let mut s = state(25);
        s.handle(DashboardEvent::PageChanged(2));
        assert_eq!(s.page(), 2);

        let selection = FilterSelection {
            authors: [FacetValue::known("Odd")].into_iter().collect(),
            ..s.selection().clone()
        };
        s.handle(DashboardEvent::SelectionChanged(selection));
        assert_eq!(s.page(), 0);
        assert_eq!(s.view().len(), 12);
        assert_eq!(s.summary().total_books, 12);
        assert_eq!(s.summary().unique_authors, 1);
    }

    #[test]
    fn edits_from_both_panels_arrive_together() {
        let mut s = state(25);
        assert_eq!(s.selection_edit(s.selection().clone()), None);

        let mut draft = s.selection().clone();
        draft.search_text = "Book 00".to_string();
        draft.languages.insert(FacetValue::known("en"));

        let event = s.selection_edit(draft.clone()).unwrap();
        s.handle(event);
        assert_eq!(s.selection(), &draft);
        assert_eq!(s.view().indices(), &[0, 3, 6, 9]);
    }

    #[test]
    fn table_rows_match_view() {
        let mut s = state(25);
        s.handle(DashboardEvent::SortChanged(SortSpec::by(SortColumn::Year, false)));
        s.handle(DashboardEvent::SelectionChanged(FilterSelection {
            languages: [FacetValue::known("en")].into_iter().collect(),
            ..Default::default()
        }));
        let mut shown: Vec<usize> = (0..s.page_count())
            .flat_map(|p| {
                s.handle(DashboardEvent::PageChanged(p));
                s.page_rows().to_vec()
            })
            .collect();
        assert_eq!(shown.first(), Some(&24));
        shown.sort_unstable();
        assert_eq!(shown, s.view().indices());
    }

    #[test]
    fn page_is_clamped() {
        let mut s = state(5);
        s.handle(DashboardEvent::PageChanged(7));
        assert_eq!(s.page(), 0);
    }

    #[test]
    fn details_ignore_out_of_range_index() {
        let mut s = state(3);
        s.handle(DashboardEvent::ShowDetails(9));
        assert_eq!(s.details(), None);
        s.handle(DashboardEvent::ShowDetails(1));
        assert_eq!(s.details(), Some(1));
        s.handle(DashboardEvent::CloseDetails);
        assert_eq!(s.details(), None);
    }
}
