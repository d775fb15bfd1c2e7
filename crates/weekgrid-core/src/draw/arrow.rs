//! Straight directed edges with an optional midpoint label.
//!
//! Each arrow is an SVG path whose `marker-end` points at a shared arrow
//! head. [`ArrowDrawer`] remembers every stroke color it has drawn so the
//! document can define one `<marker>` per color.

use std::{collections::BTreeMap, rc::Rc};

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition, Text},
    geometry::Point,
};

/// Shared line style of a group of arrows.
#[derive(Debug, Clone, Default)]
pub struct ArrowDefinition {
    stroke: Rc<StrokeDefinition>,
}

impl ArrowDefinition {
    pub fn new(stroke: Rc<StrokeDefinition>) -> Self {
        Self { stroke }
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }
}

/// One edge of a chart.
#[derive(Debug, Clone)]
pub struct Arrow<'a> {
    definition: Rc<ArrowDefinition>,
    label: Option<Text<'a>>,
}

impl<'a> Arrow<'a> {
    pub fn new(definition: Rc<ArrowDefinition>) -> Self {
        Self {
            definition,
            label: None,
        }
    }

    /// Label drawn centred on the arrow's midpoint.
    pub fn with_label(mut self, label: Option<Text<'a>>) -> Self {
        self.label = label;
        self
    }

    pub fn label(&self) -> Option<&Text<'a>> {
        self.label.as_ref()
    }

    fn color(&self) -> Color {
        self.definition.stroke().color()
    }

    fn path(&self, source: Point, destination: Point) -> svg_element::Path {
        let path = svg_element::Path::new()
            .set("d", path_data(source, destination))
            .set("fill", "none")
            .set("marker-end", format!("url(#{})", marker_id(self.color())));
        apply_stroke!(path, self.definition.stroke())
    }
}

/// Draws arrows and collects the arrow heads they reference.
#[derive(Debug, Default)]
pub struct ArrowDrawer {
    heads: BTreeMap<String, Color>,
}

impl ArrowDrawer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the line on the arrow layer and its label, if any, on top.
    pub fn draw(&mut self, arrow: &Arrow, source: Point, destination: Point) -> LayeredOutput {
        let color = arrow.color();
        self.heads.insert(marker_id(color), color);

        let mut output = LayeredOutput::new();
        output.add_to_layer(
            RenderLayer::Arrow,
            Box::new(arrow.path(source, destination)),
        );
        if let Some(label) = &arrow.label {
            output.merge(label.render_to_layers(source.midpoint(destination)));
        }
        output
    }

    /// A `<defs>` element with one arrow head per color drawn, sorted by id.
    pub fn marker_definitions(&self) -> Box<dyn svg::Node> {
        let defs = self
            .heads
            .iter()
            .fold(svg_element::Definitions::new(), |defs, (id, color)| {
                defs.add(arrow_head(id, *color))
            });
        Box::new(defs)
    }
}

fn marker_id(color: Color) -> String {
    format!("arrow-right-{}", color.to_id_safe_string())
}

fn path_data(start: Point, end: Point) -> String {
    format!("M {} {} L {} {}", start.x(), start.y(), end.x(), end.y())
}

fn arrow_head(id: &str, color: Color) -> svg_element::Marker {
    let head = svg_element::Path::new()
        .set("d", "M 0 0 L 10 5 L 0 10 z")
        .set("fill", color.to_hex())
        .set("fill-opacity", color.alpha());

    svg_element::Marker::new()
        .set("id", id)
        .set("viewBox", "0 0 10 10")
        .set("refX", 9)
        .set("refY", 5)
        .set("markerWidth", 6)
        .set("markerHeight", 6)
        .set("orient", "auto")
        .add(head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::TextDefinition;

    fn definition(color: &str) -> Rc<ArrowDefinition> {
        let stroke = StrokeDefinition::new(Color::new(color).unwrap(), 1.1);
        Rc::new(ArrowDefinition::new(Rc::new(stroke)))
    }

    fn markup(output: LayeredOutput) -> String {
        output.render().iter().map(|node| node.to_string()).collect()
    }

    #[test]
    fn test_path_data() {
        let data = path_data(Point::new(10.0, 20.0), Point::new(30.0, 40.5));
        assert_eq!(data, "M 10 20 L 30 40.5");
    }

    #[test]
    fn test_arrow_references_its_marker() {
        let mut drawer = ArrowDrawer::new();
        let arrow = Arrow::new(definition("#2c3e50"));

        let output = drawer.draw(&arrow, Point::new(0.0, 0.0), Point::new(0.0, 100.0));
        assert_eq!(output.count(RenderLayer::Arrow), 1);
        assert_eq!(output.count(RenderLayer::Text), 0);

        let markup = markup(output);
        assert!(markup.contains("marker-end=\"url(#arrow-right-hex2c3e50)\""));
        assert!(markup.contains("stroke-width=\"1.1\""));
    }

    #[test]
    fn test_label_is_centred_on_midpoint() {
        let text_def = TextDefinition::new();
        let arrow =
            Arrow::new(definition("#2c3e50")).with_label(Some(Text::new(&text_def, "Yes")));
        assert_eq!(arrow.label().map(Text::content), Some("Yes"));

        let mut drawer = ArrowDrawer::new();
        let output = drawer.draw(&arrow, Point::new(0.0, 0.0), Point::new(100.0, 50.0));
        assert_eq!(output.count(RenderLayer::Text), 1);
        assert!(markup(output).contains("x=\"50\""));
    }

    #[test]
    fn test_markers_are_deduplicated_by_color() {
        let mut drawer = ArrowDrawer::new();
        let dark = Arrow::new(definition("#2c3e50"));
        let red = Arrow::new(definition("red"));

        drawer.draw(&dark, Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        drawer.draw(&dark, Point::new(2.0, 2.0), Point::new(3.0, 3.0));
        drawer.draw(&red, Point::new(0.0, 0.0), Point::new(1.0, 1.0));

        let defs = drawer.marker_definitions().to_string();
        assert_eq!(defs.matches("<marker").count(), 2);
        assert!(defs.contains("id=\"arrow-right-hex2c3e50\""));
        assert!(defs.contains("id=\"arrow-right-hexff0000\""));
    }
}
