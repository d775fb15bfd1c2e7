//! Drawables pinned to a position in the scene.

use crate::{
    draw::{Drawable, LayeredOutput, ShapeWithText},
    geometry::{Bounds, Point, Size},
};

/// A drawable with its centre fixed at an absolute point.
#[derive(Debug, Clone)]
pub struct PositionedDrawable<D: Drawable> {
    drawable: D,
    position: Point,
}

impl<D: Drawable> PositionedDrawable<D> {
    /// Places `drawable` at the origin.
    pub fn new(drawable: D) -> Self {
        Self {
            drawable,
            position: Point::default(),
        }
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Box the drawable covers at its position.
    pub fn bounds(&self) -> Bounds {
        self.position.to_bounds(self.drawable.size())
    }

    pub fn render_to_layers(&self) -> LayeredOutput {
        self.drawable.render_to_layers(self.position)
    }
}

impl PositionedDrawable<ShapeWithText<'_>> {
    /// Where an edge leaving this node towards `target` crosses its outline.
    pub fn boundary_point_towards(&self, target: Point) -> Point {
        self.drawable.find_intersection(self.position, target)
    }
}

impl<D: Drawable> Drawable for PositionedDrawable<D> {
    /// Renders at the stored position; `_position` is ignored.
    fn render_to_layers(&self, _position: Point) -> LayeredOutput {
        self.drawable.render_to_layers(self.position)
    }

    fn size(&self) -> Size {
        self.drawable.size()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::draw::{DiamondDefinition, RectangleDefinition, RenderLayer, Shape, Text, TextDefinition};

    fn node(shape: Shape) -> PositionedDrawable<ShapeWithText<'static>> {
        PositionedDrawable::new(ShapeWithText::new(shape, None))
            .with_position(Point::new(100.0, 100.0))
    }

    #[test]
    fn test_defaults_to_origin() {
        let text_def = TextDefinition::new();
        let positioned = PositionedDrawable::new(Text::new(&text_def, "Week"));
        assert_eq!(positioned.position(), Point::default());
    }

    #[test]
    fn test_bounds_are_centred_and_include_stroke() {
        let rectangle = Shape::new(Rc::new(RectangleDefinition::new()), Size::new(99.0, 39.0));
        let bounds = node(rectangle).bounds();

        assert_approx_eq!(f32, bounds.min_x(), 50.0);
        assert_approx_eq!(f32, bounds.max_x(), 150.0);
        assert_approx_eq!(f32, bounds.min_y(), 80.0);
        assert_approx_eq!(f32, bounds.max_y(), 120.0);
    }

    #[test]
    fn test_outer_position_argument_is_ignored() {
        let text_def = TextDefinition::new();
        let positioned = PositionedDrawable::new(Text::new(&text_def, "Season"))
            .with_position(Point::new(7.0, 9.0));

        let output = Drawable::render_to_layers(&positioned, Point::new(500.0, 500.0));
        assert_eq!(output.count(RenderLayer::Text), 1);
        let markup: String = output.render().iter().map(|n| n.to_string()).collect();
        assert!(markup.contains("x=\"7\""));
    }

    #[test]
    fn test_boundary_point_follows_outline() {
        let rectangle = Shape::new(Rc::new(RectangleDefinition::new()), Size::new(100.0, 40.0));
        let below = node(rectangle).boundary_point_towards(Point::new(100.0, 300.0));
        assert_approx_eq!(f32, below.x(), 100.0, epsilon = 0.001);
        assert_approx_eq!(f32, below.y(), 120.0, epsilon = 0.001);

        let diamond = Shape::new(Rc::new(DiamondDefinition::new()), Size::new(90.0, 90.0));
        let right = node(diamond).boundary_point_towards(Point::new(400.0, 100.0));
        assert_approx_eq!(f32, right.x(), 145.0, epsilon = 0.001);
        assert_approx_eq!(f32, right.y(), 100.0, epsilon = 0.001);
    }
}
