use std::sync::Arc;

use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::data::loader::LoadError;
use crate::data::model::Catalogue;
use crate::state::DashboardState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub enum CatalogueDashboardApp {
    Ready(Box<DashboardState>),
    /// The catalogue could not be loaded; only the error is shown.
    LoadFailed(String),
}

impl CatalogueDashboardApp {
    pub fn new(loaded: Result<Catalogue, LoadError>, config: DashboardConfig) -> Self {
        match loaded {
            Ok(catalogue) => {
                let state = DashboardState::new(Arc::new(catalogue), config);
                Self::Ready(Box::new(state))
            }
            Err(e) => Self::LoadFailed(e.to_string()),
        }
    }
}

impl eframe::App for CatalogueDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = match self {
            Self::Ready(state) => state,
            Self::LoadFailed(message) => {
                egui::CentralPanel::default().show(ctx, |ui: &mut Ui| {
                    ui.centered_and_justified(|ui: &mut Ui| {
                        ui.label(
                            RichText::new(format!("Could not load the catalogue.\n\n{message}"))
                                .color(egui::Color32::RED)
                                .size(18.0),
                        );
                    });
                });
                return;
            }
        };

        let mut events = Vec::new();
        // Both panels edit one copy of the selection.
        let mut draft = state.selection().clone();

        // ---- Top panel: title, search ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui: &mut Ui| {
            panels::top_bar(ui, state, &mut draft);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui: &mut Ui| {
                panels::side_panel(ui, state, &mut draft);
            });
        events.extend(state.selection_edit(draft));

        // ---- Central panel: KPIs, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui: &mut Ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    charts::kpi_row(ui, state.summary());
                    ui.add_space(8.0);
                    ui.columns(3, |cols: &mut [Ui]| {
                        charts::author_bar_chart(&mut cols[0], state.summary());
                        charts::trend_area_chart(&mut cols[1], state.summary());
                        charts::language_donut(&mut cols[2], state.summary(), &state.language_colors);
                    });
                    ui.separator();
                    table::results_table(ui, state, &mut events);
                });
        });

        table::details_window(ctx, state, &mut events);

        if !events.is_empty() {
            for event in events {
                state.handle(event);
            }
            ctx.request_repaint();
        }
    }
}
