//! Configuration types for weekgrid rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every section is optional.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration root.
//! - [`ColumnMapping`] - Source header → canonical field table (`[columns]`).
//! - [`HeatmapConfig`] - Binary heatmap threshold (`[heatmap]`).
//! - [`StyleConfig`] - Visual styling such as the background color (`[style]`).
//! - [`ExportConfig`] - Raster export scale (`[export]`).
//!
//! # Example
//!
//! ```
//! # use weekgrid::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.heatmap().threshold(), 0.75);
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

use weekgrid_core::color::Color;
use weekgrid_data::ColumnMapping;

/// Default binary heatmap threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.75;

/// Default raster scale: 300 dpi over the 96 dpi SVG user unit.
pub const DEFAULT_SCALE: f32 = 300.0 / 96.0;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Column mapping section. A present table replaces the default mapping.
    #[serde(default)]
    columns: ColumnMapping,

    #[serde(default)]
    heatmap: HeatmapConfig,

    #[serde(default)]
    style: StyleConfig,

    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        columns: ColumnMapping,
        heatmap: HeatmapConfig,
        style: StyleConfig,
        export: ExportConfig,
    ) -> Self {
        Self {
            columns,
            heatmap,
            style,
            export,
        }
    }

    /// Returns the column mapping.
    pub fn columns(&self) -> &ColumnMapping {
        &self.columns
    }

    /// Returns the heatmap configuration.
    pub fn heatmap(&self) -> &HeatmapConfig {
        &self.heatmap
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    /// Checks every section for values the renderers cannot use.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        let threshold = self.heatmap.threshold();
        if !threshold.is_finite() {
            return Err(format!("heatmap threshold must be finite, got {threshold}"));
        }

        let scale = self.export.scale();
        if !scale.is_finite() || scale <= 0.0 {
            return Err(format!(
                "export scale must be a finite number greater than zero, got {scale}"
            ));
        }

        self.style.background_color().map(|_| ())
    }
}

/// Binary heatmap settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HeatmapConfig {
    /// Accuracy at or above which a cell counts as passing.
    #[serde(default = "default_threshold")]
    threshold: f64,
}

impl HeatmapConfig {
    /// Creates a heatmap configuration with the given threshold.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Returns the binary threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

/// Visual styling configuration for rendered images.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] for images, as a color string. Renderers
    /// fall back to white.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    /// Creates a style configuration with an optional background color string.
    pub fn new(background_color: Option<String>) -> Self {
        Self { background_color }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}

/// Raster export settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Ratio of PNG pixels to SVG user units.
    #[serde(default = "default_scale")]
    scale: f32,
}

impl ExportConfig {
    /// Creates an export configuration with the given raster scale.
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }

    /// Returns the raster scale.
    pub fn scale(&self) -> f32 {
        self.scale
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE)
    }
}

fn default_scale() -> f32 {
    DEFAULT_SCALE
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_approx_eq!(f64, config.heatmap().threshold(), 0.75);
        assert_approx_eq!(f32, config.export().scale(), 3.125);
        assert_eq!(config.style().background_color(), Ok(None));
        assert_eq!(config.columns(), &ColumnMapping::default());
    }

    #[test]
    fn test_validate_rejects_non_finite_threshold() {
        let config = AppConfig::new(
            ColumnMapping::default(),
            HeatmapConfig::new(f64::NAN),
            StyleConfig::default(),
            ExportConfig::default(),
        );
        assert!(config.validate().unwrap_err().contains("threshold"));
    }

    #[test]
    fn test_validate_rejects_bad_scale() {
        for scale in [0.0, -1.0, f32::INFINITY] {
            let config = AppConfig::new(
                ColumnMapping::default(),
                HeatmapConfig::default(),
                StyleConfig::default(),
                ExportConfig::new(scale),
            );
            assert!(config.validate().unwrap_err().contains("scale"));
        }
    }

    #[test]
    fn test_validate_rejects_bad_color() {
        let config = AppConfig::new(
            ColumnMapping::default(),
            HeatmapConfig::default(),
            StyleConfig::new(Some("not-a-color".to_string())),
            ExportConfig::default(),
        );
        assert!(config.validate().unwrap_err().contains("background color"));
    }

    #[test]
    fn test_background_color_parses() {
        let style = StyleConfig::new(Some("#fafafa".to_string()));
        assert_eq!(style.background_color().unwrap().unwrap().to_hex(), "#fafafa");
    }
}
