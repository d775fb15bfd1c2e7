//! Line styles for outlines, arrows and heatmap cell borders.
//!
//! [`apply_stroke!`](crate::apply_stroke!) copies a [`StrokeDefinition`]
//! onto any SVG element builder:
//!
//! ```
//! use svg::node::element::Rectangle;
//! use weekgrid_core::{color::Color, draw::StrokeDefinition};
//!
//! let border = StrokeDefinition::new(Color::new("#f0f0f0").unwrap(), 0.4);
//! let cell = weekgrid_core::apply_stroke!(Rectangle::new().set("width", 32), &border);
//! assert!(cell.to_string().contains("stroke-width=\"0.4\""));
//! ```

use crate::color::Color;

/// Color and width, in pixels, of a line. Defaults to 1px black.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
}

impl StrokeDefinition {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

/// Sets `stroke`, `stroke-opacity` and `stroke-width` from a stroke definition.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let stroke = &$stroke;
        $element
            .set("stroke", stroke.color().to_hex())
            .set("stroke-opacity", stroke.color().alpha())
            .set("stroke-width", stroke.width())
    }};
}

#[cfg(test)]
mod tests {
    use svg::node::element::Line;

    use super::*;

    #[test]
    fn test_default_is_thin_black() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_hex(), "#000000");
    }

    #[test]
    fn test_apply_stroke_sets_attributes() {
        let stroke = StrokeDefinition::new(Color::new("#2c3e50").unwrap(), 1.2);
        let markup = crate::apply_stroke!(Line::new(), stroke).to_string();

        assert!(markup.contains("stroke=\"#2c3e50\""));
        assert!(markup.contains("stroke-width=\"1.2\""));
        assert!(markup.contains("stroke-opacity=\"1\""));
    }
}
