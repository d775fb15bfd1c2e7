use std::rc::Rc;

use svg::node::element as svg_element;

use super::{ShapeDefinition, apply_fill};
use crate::{
    apply_stroke,
    color::Color,
    draw::StrokeDefinition,
    geometry::{Point, Size},
};

/// Process box outline, optionally with rounded corners.
#[derive(Debug, Clone)]
pub struct RectangleDefinition {
    fill_color: Option<Color>,
    stroke: Rc<StrokeDefinition>,
    corner_radius: f32,
}

impl RectangleDefinition {
    /// Unfilled, square-cornered, default stroke.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }

    pub fn with_stroke(mut self, stroke: Rc<StrokeDefinition>) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius.max(0.0);
        self
    }

    pub fn fill_color(&self) -> Option<Color> {
        self.fill_color
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }
}

impl Default for RectangleDefinition {
    fn default() -> Self {
        Self {
            fill_color: None,
            stroke: Rc::new(StrokeDefinition::default()),
            corner_radius: 0.0,
        }
    }
}

impl ShapeDefinition for RectangleDefinition {
    fn render_to_svg(&self, size: Size, position: Point) -> Box<dyn svg::Node> {
        let top_left = position.to_bounds(size).min_point();

        let rect = svg_element::Rectangle::new()
            .set("x", top_left.x())
            .set("y", top_left.y())
            .set("width", size.width())
            .set("height", size.height())
            .set("rx", self.corner_radius);
        let rect = apply_fill!(rect, self.fill_color);

        Box::new(apply_stroke!(rect, self.stroke))
    }

    fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }
}
