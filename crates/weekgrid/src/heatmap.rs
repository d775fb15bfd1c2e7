//! Season × week accuracy heatmaps.
//!
//! The grid has one row per season (natural order, top to bottom) and one
//! column per week `1..=max_week`. Cells without records are left blank,
//! which keeps them apart from a genuine 0% week.
//!
//! Two modes share the layout:
//!
//! - [`HeatmapMode::Continuous`] colors each cell on the yellow-green-blue
//!   ramp over the fixed `[0, 1]` range and draws a gradient legend.
//! - [`HeatmapMode::Binary`] colors each cell by whether it reaches the
//!   threshold and draws a two-swatch legend.

mod legend;
mod palette;

pub use palette::{BinaryPalette, ContinuousPalette};

use std::rc::Rc;

use log::{debug, info, warn};
use svg::node::element as svg_element;

use weekgrid_core::{
    color::Color,
    draw::{PositionedDrawable, RenderLayer, StrokeDefinition, Text, TextDefinition},
    geometry::{Bounds, Point, Size},
};
use weekgrid_data::{AccuracyMatrix, AccuracyTable, classify};

use crate::{config::DEFAULT_THRESHOLD, error::WeekgridError, export::svg::Scene};

const CELL_WIDTH: f32 = 32.0;
const CELL_HEIGHT: f32 = 24.0;
const SEPARATOR_COLOR: &str = "#f0f0f0";
const SEPARATOR_WIDTH: f32 = 0.4;
const TICK_FONT_SIZE: u16 = 9;
const AXIS_FONT_SIZE: u16 = 10;
const TITLE_FONT_SIZE: u16 = 13;
const TICK_GAP: f32 = 6.0;
const AXIS_GAP: f32 = 10.0;
const TITLE_GAP: f32 = 14.0;

/// How cell accuracies map to colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeatmapMode {
    /// Continuous color scale over `[0, 1]`.
    Continuous,
    /// Two colors split at `threshold`; equality counts as reaching it.
    Binary { threshold: f64 },
}

impl HeatmapMode {
    /// Binary mode at the default threshold of 0.75.
    pub fn binary_default() -> Self {
        Self::Binary {
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Chart title for this mode.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Continuous => "Season-Week Prediction Accuracy",
            Self::Binary { .. } => "Season-Week Prediction Accuracy (Binary)",
        }
    }
}

/// Cell colors for one rendering.
enum CellPalette {
    Continuous(ContinuousPalette),
    Binary {
        palette: BinaryPalette,
        threshold: f64,
    },
}

impl CellPalette {
    fn for_mode(mode: HeatmapMode) -> Result<Self, WeekgridError> {
        Ok(match mode {
            HeatmapMode::Continuous => Self::Continuous(ContinuousPalette::yl_gn_bu()?),
            HeatmapMode::Binary { threshold } => Self::Binary {
                palette: BinaryPalette::paired_blues()?,
                threshold,
            },
        })
    }

    fn color(&self, accuracy: f64) -> Color {
        match self {
            Self::Continuous(palette) => palette.color_at(accuracy),
            Self::Binary { palette, threshold } => {
                palette.color_for(classify(accuracy, *threshold))
            }
        }
    }
}

/// Lays out the heatmap of `table` on a new scene.
///
/// An empty table yields an empty scene, rendered as a blank image.
pub(crate) fn render(table: &AccuracyTable, mode: HeatmapMode) -> Result<Scene, WeekgridError> {
    let matrix = AccuracyMatrix::from_table(table);
    let mut scene = Scene::new();
    if matrix.is_empty() {
        warn!("Accuracy table is empty, rendering a blank heatmap");
        return Ok(scene);
    }

    info!(
        seasons = matrix.seasons().len(),
        weeks = matrix.weeks().len(),
        mode:? = mode;
        "Rendering heatmap"
    );

    let grid = Size::new(
        matrix.weeks().len() as f32 * CELL_WIDTH,
        matrix.seasons().len() as f32 * CELL_HEIGHT,
    );

    let palette = CellPalette::for_mode(mode)?;
    draw_cells(&mut scene, &matrix, &palette)?;

    let mut tick_text = TextDefinition::new();
    tick_text.set_font_size(TICK_FONT_SIZE);
    let tick_extent = draw_ticks(&mut scene, &matrix, grid, &tick_text);
    draw_axis_labels(&mut scene, grid, tick_extent);

    let mut title_text = TextDefinition::new();
    title_text.set_font_size(TITLE_FONT_SIZE);
    let title = Text::new(&title_text, mode.title());
    let title_y = -TITLE_GAP - title.calculate_size().height() / 2.0;
    scene.draw(
        &PositionedDrawable::new(title).with_position(Point::new(grid.width() / 2.0, title_y)),
    );

    let legend_origin = Point::new(grid.width() + legend::LEGEND_GAP, 0.0);
    let legend_height = grid.height().max(legend::MIN_LEGEND_HEIGHT);
    match palette {
        CellPalette::Continuous(palette) => {
            legend::draw_continuous(&mut scene, &palette, legend_origin, legend_height, &tick_text);
        }
        CellPalette::Binary { palette, threshold } => {
            legend::draw_binary(
                &mut scene,
                palette,
                threshold,
                legend_origin,
                legend_height,
                &tick_text,
            );
        }
    }

    debug!(bounds:? = scene.bounds(); "Heatmap placed");
    Ok(scene)
}

fn draw_cells(
    scene: &mut Scene,
    matrix: &AccuracyMatrix,
    palette: &CellPalette,
) -> Result<(), WeekgridError> {
    let separator = Rc::new(StrokeDefinition::new(
        Color::new(SEPARATOR_COLOR).map_err(WeekgridError::Layout)?,
        SEPARATOR_WIDTH,
    ));

    for (row, column, accuracy) in matrix.present_cells() {
        let top_left = Point::new(column as f32 * CELL_WIDTH, row as f32 * CELL_HEIGHT);
        let color = palette.color(accuracy);

        let cell = svg_element::Rectangle::new()
            .set("x", top_left.x())
            .set("y", top_left.y())
            .set("width", CELL_WIDTH)
            .set("height", CELL_HEIGHT)
            .set("fill", color.to_hex())
            .set("fill-opacity", color.alpha());
        let cell = weekgrid_core::apply_stroke!(cell, &separator);

        scene.add_node(
            RenderLayer::Cells,
            Box::new(cell),
            Bounds::new_from_top_left(top_left, Size::new(CELL_WIDTH, CELL_HEIGHT)),
        );
    }
    Ok(())
}

/// Extent of the tick labels outside the grid.
struct TickExtent {
    below: f32,
    left: f32,
}

fn draw_ticks(
    scene: &mut Scene,
    matrix: &AccuracyMatrix,
    grid: Size,
    definition: &TextDefinition,
) -> TickExtent {
    let mut below: f32 = 0.0;
    for (column, week) in matrix.weeks().iter().enumerate() {
        let content = week.to_string();
        let text = Text::new(definition, &content);
        let size = text.calculate_size();
        let center = Point::new(
            (column as f32 + 0.5) * CELL_WIDTH,
            grid.height() + TICK_GAP + size.height() / 2.0,
        );
        below = below.max(TICK_GAP + size.height());
        scene.draw(&PositionedDrawable::new(text).with_position(center));
    }

    let mut left: f32 = 0.0;
    for (row, season) in matrix.seasons().iter().enumerate() {
        let text = Text::new(definition, season.as_str());
        let size = text.calculate_size();
        // Right-aligned against the grid edge
        let center = Point::new(
            -TICK_GAP - size.width() / 2.0,
            (row as f32 + 0.5) * CELL_HEIGHT,
        );
        left = left.max(TICK_GAP + size.width());
        scene.draw(&PositionedDrawable::new(text).with_position(center));
    }

    TickExtent { below, left }
}

fn draw_axis_labels(scene: &mut Scene, grid: Size, ticks: TickExtent) {
    let mut horizontal = TextDefinition::new();
    horizontal.set_font_size(AXIS_FONT_SIZE);
    let week = Text::new(&horizontal, "Week");
    let week_y = grid.height() + ticks.below + AXIS_GAP + week.calculate_size().height() / 2.0;
    scene.draw(&PositionedDrawable::new(week).with_position(Point::new(grid.width() / 2.0, week_y)));

    let mut vertical = horizontal.clone();
    vertical.set_vertical(true);
    let season = Text::new(&vertical, "Season");
    let season_x = -ticks.left - AXIS_GAP - season.calculate_size().width() / 2.0;
    scene.draw(
        &PositionedDrawable::new(season).with_position(Point::new(season_x, grid.height() / 2.0)),
    );
}

#[cfg(test)]
mod tests {
    use weekgrid_data::{AccuracyCell, Season};

    use super::*;
    use crate::export::svg::SvgBuilder;

    fn table(cells: &[(&str, u32, usize, usize)]) -> AccuracyTable {
        AccuracyTable::from_cells(
            cells
                .iter()
                .map(|&(season, week, correct, total)| {
                    AccuracyCell::new(Season::new(season), week, correct, total)
                }),
        )
    }

    fn markup(scene: Scene) -> String {
        SvgBuilder::new().build(scene).to_string()
    }

    #[test]
    fn test_missing_cells_are_not_drawn() {
        let table = table(&[("1", 1, 1, 2), ("1", 3, 2, 2), ("2", 2, 0, 1)]);
        let scene = render(&table, HeatmapMode::Continuous).unwrap();

        // 2 seasons × 3 weeks, three of them recorded
        assert_eq!(scene.count(RenderLayer::Cells), 3);
    }

    #[test]
    fn test_zero_accuracy_cell_is_colored() {
        let table = table(&[("1", 1, 0, 3)]);
        let markup = markup(render(&table, HeatmapMode::Continuous).unwrap());

        assert!(markup.contains("fill=\"#ffffd9\""), "{markup}");
    }

    #[test]
    fn test_binary_colors_split_at_threshold() {
        let table = table(&[("1", 1, 3, 4), ("1", 2, 1, 2)]);
        let markup = markup(render(&table, HeatmapMode::binary_default()).unwrap());

        assert!(markup.contains("fill=\"#1f78b4\""));
        assert!(markup.contains("fill=\"#a6cee3\""));
        assert!(markup.contains("Season-Week Prediction Accuracy (Binary)"));
    }

    #[test]
    fn test_continuous_legend_has_gradient() {
        let table = table(&[("1", 1, 1, 1)]);
        let markup = markup(render(&table, HeatmapMode::Continuous).unwrap());

        assert!(markup.contains("<linearGradient"));
        assert!(markup.contains("Weekly accuracy"));
        assert!(markup.contains(">0.6<"));
    }

    /// `y` of the `<text>` element whose content is exactly `label`.
    fn label_y(markup: &str, label: &str) -> f32 {
        let content = markup.find(&format!(">{label}<")).unwrap();
        let open = markup[..content].rfind("<text").unwrap();
        let tag = &markup[open..open + markup[open..].find('>').unwrap()];
        let value = &tag[tag.find(" y=\"").unwrap() + 4..];
        value[..value.find('"').unwrap()].parse().unwrap()
    }

    #[test]
    fn test_ticks_cover_every_week_and_season() {
        let table = table(&[("20", 1, 1, 1), ("100", 1, 0, 1), ("100", 3, 1, 1)]);
        let scene = render(&table, HeatmapMode::Continuous).unwrap();

        // 3 week ticks, 2 season ticks, 2 axis labels, title, legend texts
        let texts = scene.count(RenderLayer::Text);
        assert!(texts >= 3 + 2 + 2 + 1, "{texts}");

        let markup = markup(scene);
        assert!(markup.contains(">3<"));
        // Numeric season order puts 20 above 100, lexical order would not
        assert!(label_y(&markup, "20") < label_y(&markup, "100"));
    }

    #[test]
    fn test_empty_table_renders_empty_scene() {
        let scene = render(&AccuracyTable::default(), HeatmapMode::Continuous).unwrap();
        assert!(scene.is_empty());
    }

    #[test]
    fn test_mode_titles() {
        assert_eq!(HeatmapMode::Continuous.title(), "Season-Week Prediction Accuracy");
        assert_eq!(
            HeatmapMode::binary_default(),
            HeatmapMode::Binary { threshold: 0.75 }
        );
    }
}
