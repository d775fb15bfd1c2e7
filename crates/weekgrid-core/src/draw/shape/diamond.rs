use std::rc::Rc;

use svg::node::element as svg_element;

use super::{ShapeDefinition, apply_fill};
use crate::{
    apply_stroke,
    color::Color,
    draw::StrokeDefinition,
    geometry::{Point, Size},
};

/// Diamond (rhombus) shape definition used for decision nodes.
///
/// The four vertices sit at the midpoints of the edges of the bounding box,
/// so a square size gives a square rotated by 45°.
#[derive(Debug, Clone)]
pub struct DiamondDefinition {
    fill_color: Option<Color>,
    stroke: Rc<StrokeDefinition>,
}

impl DiamondDefinition {
    /// Unfilled, default stroke.
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

    pub fn fill_color(&self) -> Option<Color> {
        self.fill_color
    }

    /// Bounding size of a diamond whose vertices are `radius` from the centre.
    pub fn size_for_radius(radius: f32) -> Size {
        Size::new(radius * 2.0, radius * 2.0)
    }
}

impl Default for DiamondDefinition {
    fn default() -> Self {
        Self {
            fill_color: None,
            stroke: Rc::new(StrokeDefinition::default()),
        }
    }
}

impl ShapeDefinition for DiamondDefinition {
    fn find_intersection(&self, a: Point, b: Point, a_size: Size) -> Point {
        let half_width = a_size.width() / 2.0;
        let half_height = a_size.height() / 2.0;

        let dist = b.sub_point(a);
        let length = dist.hypot();
        if length < 0.001 || half_width <= 0.0 || half_height <= 0.0 {
            return b;
        }

        let ux = dist.x() / length;
        let uy = dist.y() / length;

        // Boundary satisfies |x| / hw + |y| / hh = 1
        let t = (half_width * half_height)
            / ux.abs().mul_add(half_height, uy.abs() * half_width);
        if !t.is_finite() {
            return b;
        }

        Point::new(ux.mul_add(t, a.x()), uy.mul_add(t, a.y()))
    }

    fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    fn render_to_svg(&self, size: Size, position: Point) -> Box<dyn svg::Node> {
        let half_width = size.width() / 2.0;
        let half_height = size.height() / 2.0;
        let (x, y) = (position.x(), position.y());

        let points = format!(
            "{},{} {},{} {},{} {},{}",
            x,
            y - half_height,
            x + half_width,
            y,
            x,
            y + half_height,
            x - half_width,
            y
        );

        let polygon = svg_element::Polygon::new().set("points", points);
        let polygon = apply_fill!(polygon, self.fill_color);

        Box::new(apply_stroke!(polygon, self.stroke))
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn intersect(b: Point) -> Point {
        let diamond = DiamondDefinition::new();
        diamond.find_intersection(Point::new(0.0, 0.0), b, Size::new(90.0, 90.0))
    }

    #[test]
    fn test_size_for_radius() {
        assert_eq!(DiamondDefinition::size_for_radius(45.0), Size::new(90.0, 90.0));
    }

    #[test]
    fn test_intersection_hits_vertices() {
        let below = intersect(Point::new(0.0, 300.0));
        assert_approx_eq!(f32, below.x(), 0.0, epsilon = 0.001);
        assert_approx_eq!(f32, below.y(), 45.0, epsilon = 0.001);

        let right = intersect(Point::new(500.0, 0.0));
        assert_approx_eq!(f32, right.x(), 45.0, epsilon = 0.001);
        assert_approx_eq!(f32, right.y(), 0.0, epsilon = 0.001);
    }

    #[test]
    fn test_intersection_diagonal_hits_edge_midpoint() {
        let result = intersect(Point::new(100.0, 100.0));
        assert_approx_eq!(f32, result.x(), 22.5, epsilon = 0.001);
        assert_approx_eq!(f32, result.y(), 22.5, epsilon = 0.001);
    }

    #[test]
    fn test_intersection_degenerate_falls_back() {
        let diamond = DiamondDefinition::new();
        let b = Point::new(10.0, 10.0);
        assert_eq!(
            diamond.find_intersection(Point::new(0.0, 0.0), b, Size::default()),
            b
        );
        assert_eq!(diamond.find_intersection(b, b, Size::new(90.0, 90.0)), b);
    }

    #[test]
    fn test_diamond_render_points() {
        let diamond = DiamondDefinition::new().with_fill(Color::new("#fef9e7").unwrap());

        let markup = diamond
            .render_to_svg(Size::new(90.0, 90.0), Point::new(100.0, 100.0))
            .to_string();

        assert!(markup.contains("100,55 145,100 100,145 55,100"));
        assert!(markup.contains("fill=\"#fef9e7\""));
    }
}
