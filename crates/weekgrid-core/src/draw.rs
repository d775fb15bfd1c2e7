//! Drawable components for chart rendering.
//!
//! Every drawable implements the [`Drawable`] trait: it can report the size it
//! occupies and render itself, centred at a given position, into a
//! [`LayeredOutput`] whose layers are later flattened into SVG in z-order.

mod arrow;
mod layer;
mod positioned;
mod shape;
mod shape_with_text;
mod stroke;
mod text;

pub use arrow::{Arrow, ArrowDefinition, ArrowDrawer};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use positioned::PositionedDrawable;
pub use shape::{DiamondDefinition, RectangleDefinition, Shape, ShapeDefinition};
pub use shape_with_text::ShapeWithText;
pub use stroke::StrokeDefinition;
pub use text::{Text, TextDefinition};

use crate::geometry::{Point, Size};

/// Something that can be measured and rendered at a position.
pub trait Drawable: std::fmt::Debug {
    /// Renders the drawable centred at `position`.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// The full size the drawable occupies when rendered.
    fn size(&self) -> Size;
}
