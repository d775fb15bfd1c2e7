//! Node outlines for flowcharts.
//!
//! A [`ShapeDefinition`] knows how to draw one kind of outline and where a
//! ray leaving its centre crosses it. A [`Shape`] pairs a shared definition
//! with the size of one node.

use std::rc::Rc;

use crate::{
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Point, Size},
};

mod diamond;
mod rectangle;

pub use diamond::DiamondDefinition;
pub use rectangle::RectangleDefinition;

/// Outline style shared by every node of one kind.
pub trait ShapeDefinition: std::fmt::Debug {
    /// Point where the ray from the centre `a` towards `b` leaves an outline
    /// of `size` centred on `a`.
    ///
    /// Returns `b` when the ray is degenerate. The default treats the outline
    /// as its bounding box.
    fn find_intersection(&self, a: Point, b: Point, size: Size) -> Point {
        find_rectangle_intersection(a, b, size)
    }

    /// Draws the outline of `size` (stroke excluded) centred on `position`.
    fn render_to_svg(&self, size: Size, position: Point) -> Box<dyn svg::Node>;

    fn stroke(&self) -> &StrokeDefinition;
}

/// Sets `fill` on an SVG element, or `none` when there is no fill color.
macro_rules! apply_fill {
    ($element:expr, $fill:expr) => {
        match $fill {
            Some(color) => $element
                .set("fill", color.to_hex())
                .set("fill-opacity", color.alpha()),
            None => $element.set("fill", "none"),
        }
    };
}
pub(crate) use apply_fill;

/// One node outline: a shared definition at a fixed size.
#[derive(Debug, Clone)]
pub struct Shape {
    definition: Rc<dyn ShapeDefinition>,
    size: Size,
}

impl Shape {
    /// `size` excludes the stroke.
    pub fn new(definition: Rc<dyn ShapeDefinition>, size: Size) -> Self {
        Self { definition, size }
    }

    pub fn inner_size(&self) -> Size {
        self.size
    }

    /// Size including half the stroke on each side.
    pub fn outer_size(&self) -> Size {
        let stroke_width = self.definition.stroke().width();
        Size::new(
            self.size.width() + stroke_width,
            self.size.height() + stroke_width,
        )
    }

    pub fn find_intersection(&self, a: Point, b: Point) -> Point {
        self.definition.find_intersection(a, b, self.size)
    }
}

impl Drawable for Shape {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        output.add_to_layer(
            RenderLayer::Content,
            self.definition.render_to_svg(self.size, position),
        );
        output
    }

    fn size(&self) -> Size {
        self.outer_size()
    }
}

fn find_rectangle_intersection(a: Point, b: Point, size: Size) -> Point {
    let ray = b.sub_point(a);
    let length = ray.hypot();
    if length < 0.001 {
        return b;
    }
    let (ux, uy) = (ray.x() / length, ray.y() / length);

    // Ray length to the nearer of the side edges and the top/bottom edges
    let to_side = if ux == 0.0 {
        f32::INFINITY
    } else {
        size.width() / 2.0 / ux.abs()
    };
    let to_cap = if uy == 0.0 {
        f32::INFINITY
    } else {
        size.height() / 2.0 / uy.abs()
    };
    let t = to_side.min(to_cap);
    if !t.is_finite() || t <= 0.0 {
        return b;
    }

    Point::new(ux.mul_add(t, a.x()), uy.mul_add(t, a.y()))
}
