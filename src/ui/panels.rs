use std::collections::BTreeSet;
use std::sync::Arc;

use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::color::ColorMap;
use crate::data::filter::{FilterSelection, SearchScope};
use crate::data::model::{FacetValue, YearRange};
use crate::state::DashboardState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
///
/// Widgets edit `draft`, the frame's copy of the selection.
pub fn side_panel(ui: &mut Ui, state: &mut DashboardState, draft: &mut FilterSelection) {
    ui.heading("Filters");
    ui.separator();

    let catalogue = Arc::clone(state.catalogue());

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            year_controls(ui, catalogue.year_span(), &mut draft.years);
            ui.separator();

            facet_section(
                ui,
                "Language",
                catalogue.languages(),
                &mut draft.languages,
                "",
                Some(&state.language_colors),
            );
            facet_section(
                ui,
                "Category",
                catalogue.categories(),
                &mut draft.categories,
                "",
                None,
            );

            ui.horizontal(|ui: &mut Ui| {
                ui.label("Find author");
                ui.text_edit_singleline(&mut state.author_query);
            });
            facet_section(
                ui,
                "Author",
                catalogue.authors(),
                &mut draft.authors,
                &state.author_query,
                None,
            );
            facet_section(
                ui,
                "Publisher",
                catalogue.publishers(),
                &mut draft.publishers,
                "",
                None,
            );

            ui.separator();
            let reset = ui.add_enabled(
                !draft.is_unconstrained(&catalogue),
                egui::Button::new("Reset filters"),
            );
            if reset.clicked() {
                *draft = FilterSelection {
                    search_scope: draft.search_scope,
                    ..Default::default()
                };
            }
        });
}

/// Collapsible checkbox list for one facet. An empty selection means "all".
fn facet_section(
    ui: &mut Ui,
    title: &str,
    options: &BTreeSet<FacetValue>,
    selected: &mut BTreeSet<FacetValue>,
    query: &str,
    colors: Option<&ColorMap>,
) {
    let query = query.trim().to_lowercase();
    let visible: Vec<&FacetValue> = options
        .iter()
        .filter(|v| query.is_empty() || v.label().to_lowercase().contains(&query))
        .collect();

    let header_text = if selected.is_empty() {
        format!("{title}  (all {})", options.len())
    } else {
        format!("{title}  ({}/{})", selected.len(), options.len())
    };

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("Select shown").clicked() {
                    selected.extend(visible.iter().map(|v| (*v).clone()));
                }
                if ui.small_button("Clear").clicked() {
                    selected.clear();
                }
            });

            // Author lists run into the thousands; only lay out what is on screen.
            let row_height = ui.spacing().interact_size.y;
            ScrollArea::vertical()
                .id_salt(format!("{title}_options"))
                .max_height(220.0)
                .show_rows(ui, row_height, visible.len(), |ui: &mut Ui, range| {
                    for val in &visible[range] {
                        let mut text = RichText::new(val.label());
                        if let Some(cm) = colors {
                            text = text.color(cm.color_for(val));
                        }
                        let mut checked = selected.contains(*val);
                        if ui.checkbox(&mut checked, text).changed() {
                            if checked {
                                selected.insert((*val).clone());
                            } else {
                                selected.remove(*val);
                            }
                        }
                    }
                });
        });
}

/// Two sliders over the catalogue's year span that never cross.
///
/// A range equal to the full span is stored as `None`.
fn year_controls(ui: &mut Ui, span: Option<YearRange>, years: &mut Option<YearRange>) {
    ui.strong("Publication year");
    let Some(span) = span else {
        ui.label("No publication years in the catalogue.");
        return;
    };

    let current = years.unwrap_or(span);
    let (mut from, mut to) = (current.min(), current.max());

    let from_changed = ui
        .add(egui::Slider::new(&mut from, span.min()..=span.max()).text("from"))
        .changed();
    let to_changed = ui
        .add(egui::Slider::new(&mut to, span.min()..=span.max()).text("to"))
        .changed();

    if from_changed && from > to {
        to = from;
    }
    if to_changed && to < from {
        from = to;
    }

    let range = YearRange::new(from, to);
    *years = if range.covers(&span) { None } else { Some(range) };
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title, search box and counts.
pub fn top_bar(ui: &mut Ui, state: &DashboardState, draft: &mut FilterSelection) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Book Catalogue");
        ui.separator();

        ui.add(
            egui::TextEdit::singleline(&mut draft.search_text)
                .hint_text("Search for 'Ramayana', '1950', 'Viswanatha'…")
                .desired_width(320.0),
        );
        ui.selectable_value(&mut draft.search_scope, SearchScope::Title, "Titles");
        ui.selectable_value(&mut draft.search_scope, SearchScope::AllFields, "All fields");

        ui.separator();
        ui.label(format!(
            "{} books loaded, {} shown",
            crate::ui::charts::thousands(state.catalogue().len()),
            crate::ui::charts::thousands(state.view().len())
        ));
    });
}
