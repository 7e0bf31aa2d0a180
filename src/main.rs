mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::CatalogueDashboardApp;
use config::{DashboardConfig, CATALOGUE_FILE, CONFIG_FILE};
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE));

    let loaded = data::loader::load_file(Path::new(CATALOGUE_FILE));
    match &loaded {
        Ok(catalogue) if catalogue.is_empty() => {
            log::warn!("{CATALOGUE_FILE} has a header but no books")
        }
        Ok(catalogue) => log::info!(
            "Loaded {} books ({} languages, {} authors) from {CATALOGUE_FILE}",
            catalogue.len(),
            catalogue.languages().len(),
            catalogue.authors().len()
        ),
        Err(e) => log::error!("Failed to load catalogue: {e}"),
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Book Catalogue Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(CatalogueDashboardApp::new(loaded, config)))),
    )
}
