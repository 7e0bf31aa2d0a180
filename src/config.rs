use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::filter::SearchScope;

/// The catalogue is always read from this file in the working directory.
pub const CATALOGUE_FILE: &str = "final_catalogue.csv";

/// Optional settings file, also looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Presentation settings. Every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Bars in the top authors chart.
    pub top_authors: usize,
    /// Table rows per page.
    pub page_size: usize,
    /// Initial search scope.
    pub search_scope: SearchScope,
    /// Initial window size in points.
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_authors: 10,
            page_size: 20,
            search_scope: SearchScope::Title,
            window_size: [1280.0, 860.0],
        }
    }
}

impl DashboardConfig {
    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config.sanitized())
    }

    /// Load `path` if it exists. A broken file is reported and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                log::info!("Loaded settings from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring settings: {e:#}");
                Self::default()
            }
        }
    }

    fn sanitized(mut self) -> Self {
        self.top_authors = self.top_authors.max(1);
        self.page_size = self.page_size.max(1);
        self
    }
}
