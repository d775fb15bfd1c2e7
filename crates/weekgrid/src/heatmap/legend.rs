//! Legends drawn to the right of the grid.

use svg::node::element as svg_element;

use weekgrid_core::{
    draw::{PositionedDrawable, RenderLayer, SvgNode, Text, TextDefinition},
    geometry::{Bounds, Point, Size},
};
use weekgrid_data::Classification;

use super::palette::{BinaryPalette, ContinuousPalette};
use crate::export::svg::Scene;

/// Horizontal space between the grid and the legend.
pub(super) const LEGEND_GAP: f32 = 24.0;
/// Smallest legend height, used for grids with few seasons.
pub(super) const MIN_LEGEND_HEIGHT: f32 = 120.0;

const BAR_WIDTH: f32 = 14.0;
const TICK_LENGTH: f32 = 4.0;
const LABEL_GAP: f32 = 4.0;
const CAPTION_GAP: f32 = 10.0;
const GRADIENT_ID: &str = "accuracy-gradient";
const CONTINUOUS_CAPTION: &str = "Weekly accuracy";
const TICK_STEPS: usize = 5;

/// Caption of the binary legend, e.g. `Accuracy >= 75%`.
///
/// The percentage is truncated, `0.759` reads as `75%`.
pub(super) fn threshold_caption(threshold: f64) -> String {
    format!("Accuracy >= {}%", threshold_percent(threshold))
}

fn threshold_percent(threshold: f64) -> f64 {
    (threshold * 100.0).trunc()
}

/// Vertical gradient bar over `[0, 1]` with ticks every 0.2.
pub(super) fn draw_continuous(
    scene: &mut Scene,
    palette: &ContinuousPalette,
    origin: Point,
    height: f32,
    text: &TextDefinition,
) {
    scene.add_definition(gradient_definition(palette));

    let bar = svg_element::Rectangle::new()
        .set("x", origin.x())
        .set("y", origin.y())
        .set("width", BAR_WIDTH)
        .set("height", height)
        .set("fill", format!("url(#{GRADIENT_ID})"));
    scene.add_node(
        RenderLayer::Content,
        Box::new(bar),
        Bounds::new_from_top_left(origin, Size::new(BAR_WIDTH, height)),
    );

    let bar_right = origin.x() + BAR_WIDTH;
    let mut label_extent: f32 = 0.0;
    for step in 0..=TICK_STEPS {
        let value = step as f64 / TICK_STEPS as f64;
        let y = origin.y() + height * (1.0 - value as f32);

        let tick = svg_element::Line::new()
            .set("x1", bar_right)
            .set("y1", y)
            .set("x2", bar_right + TICK_LENGTH)
            .set("y2", y)
            .set("stroke", "black")
            .set("stroke-width", 0.6);
        scene.add_node(
            RenderLayer::Content,
            Box::new(tick),
            Bounds::new_from_points(
                Point::new(bar_right, y),
                Point::new(bar_right + TICK_LENGTH, y),
            ),
        );

        let content = format!("{value:.1}");
        let label = Text::new(text, &content);
        let size = label.calculate_size();
        let x = bar_right + TICK_LENGTH + LABEL_GAP + size.width() / 2.0;
        label_extent = label_extent.max(TICK_LENGTH + LABEL_GAP + size.width());
        scene.draw(&PositionedDrawable::new(label).with_position(Point::new(x, y)));
    }

    draw_caption(
        scene,
        CONTINUOUS_CAPTION,
        bar_right + label_extent,
        origin.y() + height / 2.0,
        text,
    );
}

/// Two stacked swatches, the passing color on top.
pub(super) fn draw_binary(
    scene: &mut Scene,
    palette: BinaryPalette,
    threshold: f64,
    origin: Point,
    height: f32,
    text: &TextDefinition,
) {
    let percent = threshold_percent(threshold);
    let swatches = [
        (Classification::AtOrAbove, format!(">= {percent}%")),
        (Classification::Below, format!("< {percent}%")),
    ];

    let swatch_height = height / swatches.len() as f32;
    let mut label_extent: f32 = 0.0;
    for (index, (classification, content)) in swatches.iter().enumerate() {
        let top_left = Point::new(origin.x(), origin.y() + index as f32 * swatch_height);
        let color = palette.color_for(*classification);

        let swatch = svg_element::Rectangle::new()
            .set("x", top_left.x())
            .set("y", top_left.y())
            .set("width", BAR_WIDTH)
            .set("height", swatch_height)
            .set("fill", color.to_hex())
            .set("fill-opacity", color.alpha());
        scene.add_node(
            RenderLayer::Content,
            Box::new(swatch),
            Bounds::new_from_top_left(top_left, Size::new(BAR_WIDTH, swatch_height)),
        );

        let label = Text::new(text, content);
        let size = label.calculate_size();
        let center = Point::new(
            origin.x() + BAR_WIDTH + LABEL_GAP + size.width() / 2.0,
            top_left.y() + swatch_height / 2.0,
        );
        label_extent = label_extent.max(LABEL_GAP + size.width());
        scene.draw(&PositionedDrawable::new(label).with_position(center));
    }

    draw_caption(
        scene,
        &threshold_caption(threshold),
        origin.x() + BAR_WIDTH + label_extent,
        origin.y() + height / 2.0,
        text,
    );
}

fn draw_caption(scene: &mut Scene, content: &str, left: f32, center_y: f32, text: &TextDefinition) {
    let mut vertical = text.clone();
    vertical.set_vertical(true);

    let caption = Text::new(&vertical, content);
    let x = left + CAPTION_GAP + caption.calculate_size().width() / 2.0;
    scene.draw(&PositionedDrawable::new(caption).with_position(Point::new(x, center_y)));
}

/// Gradient running from the bottom (0) to the top (1) of the bar.
fn gradient_definition(palette: &ContinuousPalette) -> SvgNode {
    let stops = palette.stops();
    let last = stops.len().saturating_sub(1).max(1) as f32;

    let gradient = svg_element::LinearGradient::new()
        .set("id", GRADIENT_ID)
        .set("x1", 0)
        .set("y1", 1)
        .set("x2", 0)
        .set("y2", 0);

    let gradient = stops
        .iter()
        .enumerate()
        .fold(gradient, |gradient, (index, color)| {
            gradient.add(
                svg_element::Stop::new()
                    .set("offset", index as f32 / last)
                    .set("stop-color", color.to_hex()),
            )
        });

    Box::new(gradient)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_caption_truncates() {
        assert_eq!(threshold_caption(0.75), "Accuracy >= 75%");
        assert_eq!(threshold_caption(0.759), "Accuracy >= 75%");
        assert_eq!(threshold_caption(0.5), "Accuracy >= 50%");
    }

    #[test]
    fn test_gradient_runs_bottom_to_top() {
        let palette = ContinuousPalette::yl_gn_bu().unwrap();
        let markup = gradient_definition(&palette).to_string();

        assert!(markup.contains("id=\"accuracy-gradient\""));
        assert!(markup.contains("y1=\"1\""));
        assert_eq!(markup.matches("<stop").count(), 9);
        assert!(markup.contains("stop-color=\"#081d58\""));
    }

    #[test]
    fn test_binary_legend_draws_two_swatches() {
        let mut scene = Scene::new();
        let palette = BinaryPalette::paired_blues().unwrap();
        draw_binary(
            &mut scene,
            palette,
            0.75,
            Point::default(),
            MIN_LEGEND_HEIGHT,
            &TextDefinition::new(),
        );

        // Two swatches, two labels and the caption
        assert_eq!(scene.count(RenderLayer::Content), 2);
        assert_eq!(scene.count(RenderLayer::Text), 3);
    }

    #[test]
    fn test_continuous_legend_ticks() {
        let mut scene = Scene::new();
        let palette = ContinuousPalette::yl_gn_bu().unwrap();
        draw_continuous(
            &mut scene,
            &palette,
            Point::default(),
            MIN_LEGEND_HEIGHT,
            &TextDefinition::new(),
        );

        // Bar plus six tick marks; six tick labels plus the caption
        assert_eq!(scene.count(RenderLayer::Content), 7);
        assert_eq!(scene.count(RenderLayer::Text), 7);
    }
}
