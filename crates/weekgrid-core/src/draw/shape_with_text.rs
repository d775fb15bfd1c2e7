//! Flowchart nodes: an outline with a label centred inside.

use crate::{
    draw::{Drawable, LayeredOutput, Shape, Text},
    geometry::{Point, Size},
};

/// An outline with an optional centred label.
///
/// Outlines keep their fixed size. A label wider than its outline spills
/// over, and [`size`](Drawable::size) grows to cover it.
#[derive(Debug, Clone)]
pub struct ShapeWithText<'a> {
    shape: Shape,
    text: Option<Text<'a>>,
}

impl<'a> ShapeWithText<'a> {
    pub fn new(shape: Shape, text: Option<Text<'a>>) -> Self {
        Self { shape, text }
    }

    /// See [`Shape::find_intersection`]; `a` is this node's centre.
    pub fn find_intersection(&self, a: Point, b: Point) -> Point {
        self.shape.find_intersection(a, b)
    }
}

impl Drawable for ShapeWithText<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = self.shape.render_to_layers(position);
        if let Some(text) = &self.text {
            output.merge(text.render_to_layers(position));
        }
        output
    }

    fn size(&self) -> Size {
        let label = self.text.as_ref().map(Text::calculate_size).unwrap_or_default();
        self.shape.size().max(label)
    }
}
