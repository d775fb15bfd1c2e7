//! Flowchart rendering onto a [`Scene`].

use std::rc::Rc;

use indexmap::IndexMap;
use log::{debug, info};

use weekgrid_core::{
    color::Color,
    draw::{
        Arrow, ArrowDefinition, ArrowDrawer, DiamondDefinition, Drawable,
        PositionedDrawable, RectangleDefinition, Shape, ShapeDefinition, ShapeWithText,
        StrokeDefinition, Text, TextDefinition,
    },
    geometry::{Bounds, Insets, Point, Size},
};

use super::{Endpoint, Flowchart, NodeShape, UNIT_PX, to_image};
use crate::{error::WeekgridError, export::svg::Scene};

const OUTLINE_COLOR: &str = "#2c3e50";
const BOX_FILL: &str = "#ecf0f1";
const DIAMOND_FILL: &str = "#fef9e7";
const SHAPE_STROKE_WIDTH: f32 = 1.2;
const ARROW_STROKE_WIDTH: f32 = 1.1;
const BOX_CORNER_RADIUS: f32 = 4.0;
const NODE_FONT_SIZE: u16 = 9;
const EDGE_FONT_SIZE: u16 = 8;

/// Shared styles for every node and edge of a chart.
struct FlowchartStyle {
    rectangle: Rc<dyn ShapeDefinition>,
    diamond: Rc<dyn ShapeDefinition>,
    arrow: Rc<ArrowDefinition>,
    node_text: TextDefinition,
    edge_text: TextDefinition,
}

impl FlowchartStyle {
    fn new() -> Result<Self, WeekgridError> {
        let outline = parse_color(OUTLINE_COLOR)?;
        let shape_stroke = Rc::new(StrokeDefinition::new(outline, SHAPE_STROKE_WIDTH));

        let rectangle = RectangleDefinition::new()
            .with_stroke(Rc::clone(&shape_stroke))
            .with_fill(parse_color(BOX_FILL)?)
            .with_corner_radius(BOX_CORNER_RADIUS);
        let diamond = DiamondDefinition::new()
            .with_stroke(shape_stroke)
            .with_fill(parse_color(DIAMOND_FILL)?);

        let arrow = ArrowDefinition::new(Rc::new(StrokeDefinition::new(
            outline,
            ARROW_STROKE_WIDTH,
        )));

        let mut node_text = TextDefinition::new();
        node_text.set_font_size(NODE_FONT_SIZE);

        let mut edge_text = TextDefinition::new();
        edge_text.set_font_size(EDGE_FONT_SIZE);
        edge_text.set_background_color(Some(parse_color("white")?));
        edge_text.set_padding(Insets::uniform(2.0));

        Ok(Self {
            rectangle: Rc::new(rectangle),
            diamond: Rc::new(diamond),
            arrow: Rc::new(arrow),
            node_text,
            edge_text,
        })
    }

    fn shape(&self, shape: NodeShape) -> Shape {
        match shape {
            NodeShape::Rectangle { width, height } => Shape::new(
                Rc::clone(&self.rectangle),
                Size::new(width, height).scale(UNIT_PX),
            ),
            NodeShape::Diamond { radius } => Shape::new(
                Rc::clone(&self.diamond),
                DiamondDefinition::size_for_radius(radius * UNIT_PX),
            ),
        }
    }
}

fn parse_color(value: &str) -> Result<Color, WeekgridError> {
    Color::new(value).map_err(WeekgridError::Layout)
}

/// Places the nodes and edges of `chart` on a new scene, in image pixels.
///
/// # Errors
///
/// Returns [`WeekgridError::Layout`] when an edge references an unknown node.
pub(crate) fn render(chart: &Flowchart) -> Result<Scene, WeekgridError> {
    chart.validate()?;
    info!(nodes = chart.nodes().len(), edges = chart.edges().len(); "Rendering flowchart");

    let style = FlowchartStyle::new()?;
    let mut scene = Scene::new();

    let mut placed: IndexMap<&str, PositionedDrawable<ShapeWithText>> = IndexMap::new();
    for node in chart.nodes() {
        let drawable = ShapeWithText::new(
            style.shape(node.shape()),
            Some(Text::new(&style.node_text, node.label())),
        );
        let positioned = PositionedDrawable::new(drawable).with_position(to_image(node.position()));
        scene.draw(&positioned);
        placed.insert(node.id(), positioned);
    }

    let centre = |endpoint: &Endpoint| -> Point {
        match endpoint {
            Endpoint::Node(id) => placed
                .get(id.as_str())
                .map(PositionedDrawable::position)
                .unwrap_or_default(),
            Endpoint::Point(point) => to_image(*point),
        }
    };
    let clip = |endpoint: &Endpoint, towards: Point| -> Point {
        match endpoint {
            Endpoint::Node(id) => placed
                .get(id.as_str())
                .map(|node| node.boundary_point_towards(towards))
                .unwrap_or(towards),
            Endpoint::Point(point) => to_image(*point),
        }
    };

    let mut drawer = ArrowDrawer::new();
    for edge in chart.edges() {
        let source = clip(edge.from(), centre(edge.to()));
        let destination = clip(edge.to(), centre(edge.from()));

        let label = edge.label().map(|text| Text::new(&style.edge_text, text));
        let mut bounds = Bounds::new_from_points(source, destination);
        if let Some(label) = &label {
            bounds = bounds.merge(&source.midpoint(destination).to_bounds(label.size()));
        }

        let arrow = Arrow::new(Rc::clone(&style.arrow)).with_label(label);
        scene.merge(drawer.draw(&arrow, source, destination), bounds);
    }
    scene.add_definition(drawer.marker_definitions());

    debug!(bounds:? = scene.bounds(); "Flowchart placed");
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use weekgrid_core::draw::RenderLayer;

    use super::*;
    use crate::flowchart::simulation_workflow;

    fn two_node_chart() -> Flowchart {
        let mut chart = Flowchart::new();
        chart
            .add_node("a", Point::new(5.0, 2.0), "Start", NodeShape::rectangle())
            .unwrap();
        chart
            .add_node("b", Point::new(5.0, 0.0), "Done?", NodeShape::diamond())
            .unwrap();
        chart.add_edge("a", "b", Some("Yes"));
        chart
    }

    #[test]
    fn test_shape_sizes_in_pixels() {
        let style = FlowchartStyle::new().unwrap();
        assert_eq!(
            style.shape(NodeShape::rectangle()).inner_size(),
            Size::new(3.6, 0.8).scale(UNIT_PX)
        );
        assert_eq!(
            style.shape(NodeShape::diamond()).inner_size(),
            Size::new(90.0, 90.0)
        );
    }

    #[test]
    fn test_render_rejects_unknown_node() {
        let mut chart = two_node_chart();
        chart.add_edge("a", "ghost", None);
        assert!(matches!(render(&chart), Err(WeekgridError::Layout(_))));
    }

    #[test]
    fn test_arrow_is_clipped_to_outlines() {
        let scene = render(&two_node_chart()).unwrap();
        let markup = crate::export::svg::SvgBuilder::new()
            .build(scene)
            .to_string();

        // Box bottom edge at y = -120 + 24, diamond top vertex at y = 0 - 45
        assert!(markup.contains("M 300 -96 L 300 -45"), "{markup}");
        assert!(markup.contains("arrow-right-hex2c3e50"));
    }

    #[test]
    fn test_render_workflow_layers() {
        let chart = simulation_workflow().unwrap();
        let scene = render(&chart).unwrap();

        let bounds = scene.bounds();
        assert!(bounds.width() > 4.2 * UNIT_PX);
        assert!(bounds.height() > 20.0 * UNIT_PX);

        let markup = crate::export::svg::SvgBuilder::new()
            .build(scene)
            .to_string();
        assert_eq!(markup.matches("<path d=\"M").count(), 19 + 1);
        assert!(markup.contains(&format!("data-layer=\"{}\"", RenderLayer::Content.name())));
        assert_eq!(markup.matches("<polygon").count(), 2);
    }
}
