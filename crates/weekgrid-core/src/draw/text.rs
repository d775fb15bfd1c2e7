//! Labels, tick marks and titles.
//!
//! A [`Text`] borrows its style from a shared [`TextDefinition`] and is
//! measured with real glyph metrics from `cosmic-text`, so charts can align
//! tick labels against the grid and crop the image tightly around titles.
//!
//! Text renders as one SVG `<text>` with a `<tspan>` per line, centred on
//! its position, on [`RenderLayer::Text`]. A background, when styled, goes
//! underneath on [`RenderLayer::Background`].
//!
//! ```
//! # use weekgrid_core::draw::{TextDefinition, Text};
//! let mut style = TextDefinition::new();
//! style.set_font_size(9);
//!
//! let text = Text::new(&style, "Loop weeks");
//! assert!(text.calculate_size().width() > 0.0);
//! ```

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::{debug, info};
use svg::node::{Text as TextNode, element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Insets, Point, Size},
};

const FONT_FAMILY: &str = "DejaVu Sans";
const POINTS_TO_PIXELS: f32 = 1.33;
const LINE_SPACING: f32 = 1.15;
/// Average glyph advance relative to the font size when no font is available.
const FALLBACK_ADVANCE: f32 = 0.55;
const BACKGROUND_RADIUS: f32 = 3.0;

/// Shared style of a group of labels.
///
/// Defaults to 12pt DejaVu Sans, horizontal, without padding or background.
#[derive(Debug, Clone)]
pub struct TextDefinition {
    font_size: u16,
    background_color: Option<Color>,
    padding: Insets,
    vertical: bool,
}

impl TextDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Font size in points.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    /// Draws a rounded box of `color` behind the text and its padding.
    pub fn set_background_color(&mut self, color: Option<Color>) {
        self.background_color = color;
    }

    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
    }

    /// Rotates the text 90° counter-clockwise so it reads bottom to top.
    pub fn set_vertical(&mut self, vertical: bool) {
        self.vertical = vertical;
    }

    fn font_size_px(&self) -> f32 {
        f32::from(self.font_size) * POINTS_TO_PIXELS
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_size: 12,
            background_color: None,
            padding: Insets::default(),
            vertical: false,
        }
    }
}

/// One label: borrowed content in a borrowed style.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
        }
    }

    pub fn content(&self) -> &str {
        self.content
    }

    /// Footprint of the text including padding, rotated for vertical text.
    pub fn calculate_size(&self) -> Size {
        let size = self.padded_size();
        if self.definition.vertical {
            Size::new(size.height(), size.width())
        } else {
            size
        }
    }

    fn padded_size(&self) -> Size {
        self.glyph_size().add_padding(self.definition.padding)
    }

    fn glyph_size(&self) -> Size {
        FONTS
            .get_or_init(FontCache::new)
            .measure(self.content, self.definition)
    }

    fn rotation(&self, position: Point) -> Option<String> {
        self.definition
            .vertical
            .then(|| format!("rotate(-90 {} {})", position.x(), position.y()))
    }

    fn background(&self, color: Color, position: Point) -> svg_element::Rectangle {
        // Laid out unrotated, then turned with the text
        let bounds = position.to_bounds(self.padded_size());
        let corner = bounds.min_point();
        let rect = svg_element::Rectangle::new()
            .set("x", corner.x())
            .set("y", corner.y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("rx", BACKGROUND_RADIUS)
            .set("fill", color.to_hex())
            .set("fill-opacity", color.alpha());
        match self.rotation(position) {
            Some(transform) => rect.set("transform", transform),
            None => rect,
        }
    }
}

impl Drawable for Text<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        if self.content.is_empty() {
            return output;
        }

        let block = self.glyph_size();
        let line_count = self.content.lines().count().max(1);
        let line_height = block.height() / line_count as f32;
        // First tspan advances one line, so start half a block plus one line up
        let first_y = position.y() - (block.height() + line_height) / 2.0;

        let mut label = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", first_y)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", FONT_FAMILY)
            .set("font-size", self.definition.font_size);
        if let Some(transform) = self.rotation(position) {
            label = label.set("transform", transform);
        }
        label = self.content.lines().fold(label, |label, line| {
            label.add(
                svg_element::TSpan::new("")
                    .set("x", position.x())
                    .set("dy", line_height)
                    .add(TextNode::new(line)),
            )
        });

        if let Some(color) = self.definition.background_color {
            output.add_to_layer(
                RenderLayer::Background,
                Box::new(self.background(color, position)),
            );
        }
        output.add_to_layer(RenderLayer::Text, Box::new(label));
        output
    }

    fn size(&self) -> Size {
        self.calculate_size()
    }
}

/// Process-wide font database, loaded once on first measurement.
struct FontCache {
    fonts: Mutex<FontSystem>,
}

static FONTS: OnceLock<FontCache> = OnceLock::new();

impl FontCache {
    fn new() -> Self {
        info!("Loading system fonts");
        Self {
            fonts: Mutex::new(FontSystem::new()),
        }
    }

    /// Width of the widest line and height of all lines, in pixels.
    ///
    /// Estimates from the font size when shaping yields no glyphs, as on
    /// machines without fonts installed.
    fn measure(&self, content: &str, definition: &TextDefinition) -> Size {
        if content.is_empty() {
            return Size::default();
        }

        let font_size = definition.font_size_px();
        let metrics = Metrics::new(font_size, font_size * LINE_SPACING);

        let mut fonts = self
            .fonts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut buffer = Buffer::new(&mut fonts, metrics);
        let mut buffer = buffer.borrow_with(&mut fonts);
        buffer.set_size(None, None);
        buffer.set_text(
            content,
            &Attrs::new().family(Family::Name(FONT_FAMILY)),
            Shaping::Advanced,
            None,
        );
        buffer.shape_until_scroll(true);

        let runs: Vec<_> = buffer.layout_runs().collect();
        if runs.iter().all(|run| run.glyphs.is_empty()) {
            debug!(content = content; "No glyphs shaped, estimating text size");
            let lines = content.lines().count().max(1);
            let longest = content.lines().map(|line| line.chars().count()).max();
            return Size::new(
                longest.unwrap_or(0) as f32 * font_size * FALLBACK_ADVANCE,
                metrics.line_height * lines as f32,
            );
        }

        let width = runs
            .iter()
            .filter_map(|run| run.glyphs.last())
            .map(|glyph| glyph.x + glyph.w)
            .fold(0.0, f32::max);
        Size::new(width, metrics.line_height * runs.len() as f32)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_text_definition_defaults() {
        let def = TextDefinition::new();
        assert_eq!(def.font_size, 12);
        assert!(def.background_color.is_none());
        assert!(!def.vertical);
    }

    #[test]
    fn test_empty_text_has_no_size_or_output() {
        let def = TextDefinition::new();
        let text = Text::new(&def, "");

        assert_eq!(text.calculate_size(), Size::default());
        assert!(text.render_to_layers(Point::default()).is_empty());
    }

    #[test]
    fn test_multiline_text_is_taller() {
        let def = TextDefinition::new();
        let single = Text::new(&def, "Skip").calculate_size();
        let multi = Text::new(&def, "Skip\nexisting?").calculate_size();

        assert!(multi.height() > single.height());
    }

    #[test]
    fn test_multiline_text_renders_one_tspan_per_line() {
        let def = TextDefinition::new();
        let output = Text::new(&def, "Run one\nseason").render_to_layers(Point::default());

        let markup: String = output.render().iter().map(|n| n.to_string()).collect();
        assert_eq!(markup.matches("<tspan").count(), 2);
        assert!(markup.contains("font-family=\"DejaVu Sans\""));
    }

    #[test]
    fn test_padding_grows_size_on_both_axes() {
        let plain_def = TextDefinition::new();
        let plain = Text::new(&plain_def, "Yes").calculate_size();

        let mut padded_def = TextDefinition::new();
        padded_def.set_padding(Insets::uniform(20.0));
        let padded = Text::new(&padded_def, "Yes").calculate_size();

        assert_approx_eq!(f32, padded.width() - plain.width(), 40.0, epsilon = 0.001);
        assert_approx_eq!(f32, padded.height() - plain.height(), 40.0, epsilon = 0.001);
    }

    #[test]
    fn test_vertical_text_swaps_size_and_rotates() {
        let horizontal_def = TextDefinition::new();
        let mut vertical_def = TextDefinition::new();
        vertical_def.set_vertical(true);

        let horizontal = Text::new(&horizontal_def, "Season").calculate_size();
        let vertical = Text::new(&vertical_def, "Season");
        assert_approx_eq!(f32, horizontal.width(), vertical.calculate_size().height());
        assert_approx_eq!(f32, horizontal.height(), vertical.calculate_size().width());

        let output = vertical.render_to_layers(Point::new(10.0, 20.0));
        let markup: String = output.render().iter().map(|n| n.to_string()).collect();
        assert!(markup.contains("rotate(-90 10 20)"));
    }

    #[test]
    fn test_background_goes_under_text() {
        let mut def = TextDefinition::new();
        def.set_background_color(Some(Color::new("white").unwrap()));
        let output = Text::new(&def, "No").render_to_layers(Point::new(0.0, 0.0));

        assert_eq!(output.count(RenderLayer::Background), 1);
        assert_eq!(output.count(RenderLayer::Text), 1);
    }
}
