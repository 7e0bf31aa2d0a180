use std::sync::Arc;

use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::AccessLink;
use crate::data::sort::SortColumn;
use crate::state::{DashboardEvent, DashboardState};
use crate::ui::charts::thousands;

const ROW_HEIGHT: f32 = 22.0;

// ---------------------------------------------------------------------------
// Results table
// ---------------------------------------------------------------------------

/// The current page of the filtered books. Header buttons cycle the sort.
pub fn results_table(ui: &mut Ui, state: &DashboardState, events: &mut Vec<DashboardEvent>) {
    if state.view().is_empty() {
        ui.add_space(40.0);
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(
                RichText::new("No books found. Try a different keyword like 'History', '1947', or 'Telugu'.")
                    .weak(),
            );
        });
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("Found {} results", thousands(state.view().len())));
        ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
            pagination(ui, state, events);
        });
    });

    let catalogue = Arc::clone(state.catalogue());
    let rows = state.page_rows();
    let sort = state.sort();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::initial(280.0).at_least(120.0).clip(true))
        .column(Column::initial(180.0).at_least(80.0).clip(true))
        .column(Column::initial(60.0))
        .column(Column::initial(90.0).clip(true))
        .column(Column::initial(120.0).clip(true))
        .column(Column::initial(140.0).clip(true))
        .column(Column::remainder())
        .header(ROW_HEIGHT, |mut header| {
            for column in SortColumn::ALL {
                header.col(|ui: &mut Ui| {
                    let arrow = match sort.column {
                        Some(c) if c == column && sort.ascending => " ⏶",
                        Some(c) if c == column => " ⏷",
                        _ => "",
                    };
                    let label = RichText::new(format!("{}{arrow}", column.header())).strong();
                    if ui.button(label).clicked() {
                        events.push(DashboardEvent::SortChanged(sort.cycle(column)));
                    }
                });
            }
            header.col(|_ui: &mut Ui| {});
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let index = rows[row.index()];
                let Some(rec) = catalogue.get(index) else {
                    return;
                };
                for column in SortColumn::ALL {
                    row.col(|ui: &mut Ui| {
                        ui.label(column.cell(rec));
                    });
                }
                row.col(|ui: &mut Ui| {
                    if ui.small_button("Details").clicked() {
                        events.push(DashboardEvent::ShowDetails(index));
                    }
                });
            });
        });
}

fn pagination(ui: &mut Ui, state: &DashboardState, events: &mut Vec<DashboardEvent>) {
    let page = state.page();
    let pages = state.page_count();
    if pages <= 1 {
        return;
    }
    // Right-to-left layout: widgets appear in reverse order.
    if ui.add_enabled(page + 1 < pages, egui::Button::new("Next ▶")).clicked() {
        events.push(DashboardEvent::PageChanged(page + 1));
    }
    ui.label(format!("Page {} of {}", page + 1, pages));
    if ui.add_enabled(page > 0, egui::Button::new("◀ Previous")).clicked() {
        events.push(DashboardEvent::PageChanged(page - 1));
    }
}

// ---------------------------------------------------------------------------
// Details window
// ---------------------------------------------------------------------------

/// Metadata and links of the selected book.
pub fn details_window(ctx: &egui::Context, state: &DashboardState, events: &mut Vec<DashboardEvent>) {
    let Some(rec) = state.details().and_then(|i| state.catalogue().get(i)) else {
        return;
    };

    let title = if rec.title.is_empty() {
        "Untitled"
    } else {
        rec.title.as_str()
    };
    let mut open = true;

    egui::Window::new(title)
        .id(egui::Id::new("book_details"))
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .show(ctx, |ui: &mut Ui| {
            egui::Grid::new("book_fields")
                .num_columns(2)
                .spacing([16.0, 6.0])
                .show(ui, |ui: &mut Ui| {
                    let year = rec.year_label();
                    let fields = [
                        ("Author", rec.author.label()),
                        ("Year", year.as_str()),
                        ("Language", rec.language.label()),
                        ("Category", rec.category.label()),
                        ("Publisher", rec.publisher.label()),
                    ];
                    for (name, value) in fields {
                        ui.strong(name);
                        ui.label(value);
                        ui.end_row();
                    }
                });

            if !rec.extra.is_empty() {
                ui.separator();
                egui::CollapsingHeader::new("Metadata")
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        egui::Grid::new("book_metadata")
                            .num_columns(2)
                            .spacing([16.0, 4.0])
                            .show(ui, |ui: &mut Ui| {
                                for (name, value) in &rec.extra {
                                    ui.label(RichText::new(name).weak());
                                    ui.label(value);
                                    ui.end_row();
                                }
                            });
                    });
            }

            ui.separator();
            match rec.access_link() {
                AccessLink::Direct(url) => {
                    ui.hyperlink_to("Access digital copy", url);
                }
                AccessLink::Search(url) => {
                    ui.hyperlink_to("Search for a copy", url);
                }
                AccessLink::None => {
                    ui.label("Visit the library to access this physical copy.");
                }
            }
            if let Some(url) = rec.author_profile_link() {
                ui.hyperlink_to("View author profile", url);
            }
        });

    if !open {
        events.push(DashboardEvent::CloseDetails);
    }
}
