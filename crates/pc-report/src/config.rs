//! Report configuration types.

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};

/// Charting library loader configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartsLoader {
    /// URL of the Google Charts loader script.
    #[serde(default = "default_loader_url")]
    pub loader_url: String,
    /// Release channel or pinned version passed to `google.charts.load`.
    #[serde(default = "default_loader_version")]
    pub version: String,
    /// Packages requested from the loader.
    #[serde(default = "default_packages")]
    pub packages: Vec<String>,
}

fn default_loader_url() -> String {
    "https://www.gstatic.com/charts/loader.js".to_string()
}

fn default_loader_version() -> String {
    "current".to_string()
}

fn default_packages() -> Vec<String> {
    vec!["corechart".to_string(), "bar".to_string()]
}

impl Default for ChartsLoader {
    fn default() -> Self {
        Self {
            loader_url: default_loader_url(),
            version: default_loader_version(),
            packages: default_packages(),
        }
    }
}

impl ChartsLoader {
    /// Pin the loader to a specific Google Charts version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

/// Chart card dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartLayout {
    /// Card height in pixels.
    #[serde(default = "default_height_px")]
    pub height_px: u32,
    /// Maximum card width in pixels.
    #[serde(default = "default_max_width_px")]
    pub max_width_px: u32,
    /// Share of the card used by the plot area (CSS width, e.g. `60%`).
    #[serde(default = "default_chart_area_width")]
    pub chart_area_width: String,
}

fn default_height_px() -> u32 {
    400
}

fn default_max_width_px() -> u32 {
    800
}

fn default_chart_area_width() -> String {
    "60%".to_string()
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            height_px: default_height_px(),
            max_width_px: default_max_width_px(),
            chart_area_width: default_chart_area_width(),
        }
    }
}

/// Complete report configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Custom page title.
    pub title: Option<String>,
    /// Page heading.
    #[serde(default = "default_heading")]
    pub heading: String,
    /// Charting library loader.
    #[serde(default)]
    pub loader: ChartsLoader,
    /// Chart card dimensions.
    #[serde(default)]
    pub layout: ChartLayout,
    /// Print the generation timestamp in the footer.
    #[serde(default = "default_true")]
    pub show_generated_at: bool,
    /// Minify the generated HTML.
    #[serde(default)]
    pub minify: bool,
}

fn default_schema_version() -> String {
    "1.0.0".to_string()
}

fn default_heading() -> String {
    "Data Analysis Report".to_string()
}

fn default_true() -> bool {
    true
}

/// Page title used when none is configured.
pub const DEFAULT_TITLE: &str = "CSV Data Charts";

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            title: None,
            heading: default_heading(),
            loader: ChartsLoader::default(),
            layout: ChartLayout::default(),
            show_generated_at: true,
            minify: false,
        }
    }
}

impl ReportConfig {
    /// Create a new report configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the page heading.
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = heading.into();
        self
    }

    /// Show or hide the generation timestamp.
    pub fn with_generated_at(mut self, show: bool) -> Self {
        self.show_generated_at = show;
        self
    }

    /// Enable HTML minification.
    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    /// Effective page title.
    pub fn page_title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    /// Reject configurations that would produce an unusable page.
    pub fn validate(&self) -> Result<()> {
        if self.loader.loader_url.trim().is_empty() {
            return Err(ReportError::InvalidConfig(
                "loader.loader_url must not be empty".to_string(),
            ));
        }
        if self.loader.packages.is_empty() {
            return Err(ReportError::InvalidConfig(
                "loader.packages must list at least one package".to_string(),
            ));
        }
        if self.layout.height_px == 0 || self.layout.max_width_px == 0 {
            return Err(ReportError::InvalidConfig(
                "layout dimensions must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from JSON.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.schema_version, "1.0.0");
        assert_eq!(config.page_title(), "CSV Data Charts");
        assert_eq!(config.heading, "Data Analysis Report");
        assert_eq!(config.loader.packages, vec!["corechart", "bar"]);
        assert!(config.show_generated_at);
        assert!(!config.minify);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ReportConfig::new()
            .with_title("Nightly")
            .with_heading("Regression Results")
            .with_generated_at(false)
            .with_minify(true);

        assert_eq!(config.page_title(), "Nightly");
        assert_eq!(config.heading, "Regression Results");
        assert!(!config.show_generated_at);
        assert!(config.minify);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ReportConfig::from_json(r#"{"title": "QA", "layout": {"height_px": 250}}"#)
            .unwrap();
        assert_eq!(config.page_title(), "QA");
        assert_eq!(config.layout.height_px, 250);
        assert_eq!(config.layout.max_width_px, 800);
        assert_eq!(config.loader, ChartsLoader::default());
    }

    #[test]
    fn test_validate_rejects_empty_packages() {
        let mut config = ReportConfig::default();
        config.loader.packages.clear();
        assert!(matches!(
            config.validate(),
            Err(ReportError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_height() {
        let mut config = ReportConfig::default();
        config.layout.height_px = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_loader_version_pin() {
        let loader = ChartsLoader::default().with_version("51");
        assert_eq!(loader.version, "51");
        assert_eq!(loader.loader_url, "https://www.gstatic.com/charts/loader.js");
    }

    #[test]
    fn test_config_serialization() {
        let config = ReportConfig::default().with_title("Round");
        let json = config.to_json().unwrap();
        let parsed = ReportConfig::from_json(&json).unwrap();
        assert_eq!(parsed.title, config.title);
        assert_eq!(parsed.layout, config.layout);
    }
}
