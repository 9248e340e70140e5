//! Export layout configuration: page, margins, type size, and header/footer toggles.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::metrics::{overflows, LayoutMetrics};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("invalid layout config: {0}")]
    InvalidLayoutConfig(String),
}

/// Page margins in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Margins {
    pub const fn uniform(mm: f32) -> Self {
        Self {
            top: mm,
            bottom: mm,
            left: mm,
            right: mm,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(20.0)
    }
}

/// Physical page size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: 210.0,
        height: 297.0,
    };
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Layout parameters for one export. Built per call; never stored between exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportLayoutConfig {
    pub page: PageSize,
    pub margins: Margins,
    /// Body font size in points.
    pub font_size: f32,
    /// Line-height multiplier applied to the font size.
    pub line_height: f32,
    pub show_header: bool,
    pub show_footer: bool,
    pub show_branding: bool,
    pub show_separator_line: bool,
}

impl Default for ExportLayoutConfig {
    fn default() -> Self {
        Self {
            page: PageSize::A4,
            margins: Margins::default(),
            font_size: 11.0,
            line_height: 1.6,
            show_header: true,
            show_footer: true,
            show_branding: false,
            show_separator_line: true,
        }
    }
}

/// Per-request overrides. Unset fields keep the service defaults; a margins override
/// replaces all four margins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportLayoutOverrides {
    pub page: Option<PageSize>,
    pub margins: Option<Margins>,
    pub font_size: Option<f32>,
    pub line_height: Option<f32>,
    pub show_header: Option<bool>,
    pub show_footer: Option<bool>,
    pub show_branding: Option<bool>,
    pub show_separator_line: Option<bool>,
}

impl ExportLayoutConfig {
    pub fn with_overrides(&self, overrides: &ExportLayoutOverrides) -> Self {
        Self {
            page: overrides.page.unwrap_or(self.page),
            margins: overrides.margins.unwrap_or(self.margins),
            font_size: overrides.font_size.unwrap_or(self.font_size),
            line_height: overrides.line_height.unwrap_or(self.line_height),
            show_header: overrides.show_header.unwrap_or(self.show_header),
            show_footer: overrides.show_footer.unwrap_or(self.show_footer),
            show_branding: overrides.show_branding.unwrap_or(self.show_branding),
            show_separator_line: overrides
                .show_separator_line
                .unwrap_or(self.show_separator_line),
        }
    }

    pub fn content_width(&self) -> f32 {
        self.page.width - self.margins.left - self.margins.right
    }

    pub fn content_height(&self) -> f32 {
        self.page.height - self.margins.top - self.margins.bottom
    }

    /// Lowest y a line may reach before it must move to the next page.
    pub fn content_bottom(&self) -> f32 {
        self.page.height - self.margins.bottom
    }

    /// Rejects configurations that leave no drawable content region.
    pub fn validate(&self) -> Result<LayoutMetrics, LayoutError> {
        let invalid = |msg: String| Err(LayoutError::InvalidLayoutConfig(msg));

        for (name, value) in [
            ("page width", self.page.width),
            ("page height", self.page.height),
            ("font size", self.font_size),
            ("line height", self.line_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return invalid(format!("{name} must be positive, got {value}"));
            }
        }

        let m = &self.margins;
        for (name, value) in [
            ("top", m.top),
            ("bottom", m.bottom),
            ("left", m.left),
            ("right", m.right),
        ] {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("{name} margin must be non-negative, got {value}"));
            }
        }

        let metrics = LayoutMetrics::from_config(self);
        if metrics.min_advance() <= 0.0 {
            return invalid(format!(
                "font size {} is too small to advance the carriage",
                self.font_size
            ));
        }

        let width = self.content_width();
        if overflows(metrics.advance, width) {
            return invalid(format!(
                "content width {width:.1}mm is smaller than one character ({:.1}mm); \
                 margins exceed the page width",
                metrics.advance
            ));
        }

        let height = self.content_height();
        if overflows(metrics.line_height, height) {
            return invalid(format!(
                "content height {height:.1}mm is smaller than one line ({:.1}mm); \
                 margins exceed the page height",
                metrics.line_height
            ));
        }

        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_export_defaults() {
        let config = ExportLayoutConfig::default();
        assert_eq!(config.margins, Margins::uniform(20.0));
        assert_eq!(config.font_size, 11.0);
        assert_eq!(config.line_height, 1.6);
        assert!(config.show_header);
        assert!(config.show_footer);
        assert!(!config.show_branding);
        assert!(config.show_separator_line);
        assert_eq!(config.content_width(), 170.0);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ExportLayoutConfig::default().validate().is_ok());
    }

    #[test]
    fn test_overrides_apply_only_set_fields() {
        let overrides = ExportLayoutOverrides {
            font_size: Some(9.0),
            show_branding: Some(true),
            ..Default::default()
        };
        let config = ExportLayoutConfig::default().with_overrides(&overrides);
        assert_eq!(config.font_size, 9.0);
        assert!(config.show_branding);
        assert_eq!(config.line_height, 1.6);
        assert_eq!(config.margins, Margins::uniform(20.0));
    }

    #[test]
    fn test_overrides_deserialize_partially() {
        let overrides: ExportLayoutOverrides =
            serde_json::from_str(r#"{ "show_header": false }"#).unwrap();
        assert_eq!(overrides.show_header, Some(false));
        assert!(overrides.margins.is_none());
    }

    #[test]
    fn test_margins_wider_than_page_are_rejected() {
        let config = ExportLayoutConfig {
            margins: Margins {
                left: 120.0,
                right: 120.0,
                ..Margins::default()
            },
            ..ExportLayoutConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidLayoutConfig(_))
        ));
    }

    #[test]
    fn test_zero_margins_narrow_page_is_rejected() {
        // 11pt → 6.6mm per character; a 5mm page cannot hold one.
        let config = ExportLayoutConfig {
            page: PageSize {
                width: 5.0,
                height: 297.0,
            },
            margins: Margins::uniform(0.0),
            ..ExportLayoutConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("content width"), "{err}");
    }

    #[test]
    fn test_margins_taller_than_page_are_rejected() {
        let config = ExportLayoutConfig {
            margins: Margins {
                top: 200.0,
                bottom: 100.0,
                ..Margins::default()
            },
            ..ExportLayoutConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("content height"), "{err}");
    }

    #[test]
    fn test_content_exactly_one_line_tall_is_valid() {
        for font_size in [9.0_f32, 10.0, 11.0, 12.0, 13.0] {
            let mut config = ExportLayoutConfig {
                font_size,
                line_height: 1.0,
                margins: Margins::uniform(20.0),
                ..ExportLayoutConfig::default()
            };
            let m = LayoutMetrics::from_config(&config);
            config.page.height = 40.0 + m.line_height;
            config.page.width = 40.0 + m.advance;
            assert!(config.validate().is_ok(), "font {font_size}");
        }
    }

    #[test]
    fn test_non_positive_type_settings_are_rejected() {
        for config in [
            ExportLayoutConfig {
                font_size: 0.0,
                ..ExportLayoutConfig::default()
            },
            ExportLayoutConfig {
                line_height: -1.0,
                ..ExportLayoutConfig::default()
            },
            ExportLayoutConfig {
                font_size: f32::NAN,
                ..ExportLayoutConfig::default()
            },
            ExportLayoutConfig {
                margins: Margins {
                    top: -5.0,
                    ..Margins::default()
                },
                ..ExportLayoutConfig::default()
            },
        ] {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }

    #[test]
    fn test_tiny_font_cannot_advance() {
        let config = ExportLayoutConfig {
            font_size: 0.5,
            ..ExportLayoutConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("too small"), "{err}");
    }
}
