//! SVG document assembly.

use log::debug;
use svg::{self, node::element as svg_element};

use weekgrid_core::{
    color::Color,
    draw::{Drawable, LayeredOutput, PositionedDrawable, RenderLayer, SvgNode},
    geometry::{Bounds, Insets},
};

/// Drawables placed in absolute coordinates together with their combined bounds.
#[derive(Debug, Default)]
pub struct Scene {
    output: LayeredOutput,
    bounds: Option<Bounds>,
    definitions: Vec<SvgNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders a positioned drawable into the scene.
    pub fn draw<D: Drawable>(&mut self, drawable: &PositionedDrawable<D>) {
        self.include(drawable.bounds());
        self.output.merge(drawable.render_to_layers());
    }

    /// Adds a raw node that covers `bounds`.
    pub fn add_node(&mut self, layer: RenderLayer, node: SvgNode, bounds: Bounds) {
        self.include(bounds);
        self.output.add_to_layer(layer, node);
    }

    /// Adds already rendered output that covers `bounds`.
    pub fn merge(&mut self, output: LayeredOutput, bounds: Bounds) {
        self.include(bounds);
        self.output.merge(output);
    }

    /// Adds an entry to the document's `<defs>` (markers, gradients).
    pub fn add_definition(&mut self, node: SvgNode) {
        self.definitions.push(node);
    }

    /// Combined bounds of everything drawn; zero-sized at the origin when empty.
    pub fn bounds(&self) -> Bounds {
        self.bounds.unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Number of nodes drawn on `layer`.
    pub fn count(&self, layer: RenderLayer) -> usize {
        self.output.count(layer)
    }

    fn include(&mut self, bounds: Bounds) {
        self.bounds = Some(match self.bounds {
            Some(current) => current.merge(&bounds),
            None => bounds,
        });
    }
}

/// Builds an SVG document cropped to a scene's bounds plus a margin.
#[derive(Debug, Clone)]
pub struct SvgBuilder {
    background: Option<Color>,
    margin: Insets,
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the background fill; `None` leaves the document transparent.
    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    /// Sets the margin around the content.
    pub fn with_margin(mut self, margin: Insets) -> Self {
        self.margin = margin;
        self
    }

    /// Renders the scene to a document.
    pub fn build(&self, scene: Scene) -> svg::Document {
        let content_bounds = scene.bounds();
        let svg_size = content_bounds.to_size().add_padding(self.margin);
        debug!(width = svg_size.width(), height = svg_size.height(); "Building SVG document");

        let mut doc = svg::Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", svg_size.width(), svg_size.height()),
            )
            .set("width", svg_size.width())
            .set("height", svg_size.height());

        if let Some(background) = self.background {
            let bg = svg_element::Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", svg_size.width())
                .set("height", svg_size.height())
                .set("fill", background.to_hex())
                .set("fill-opacity", background.alpha());
            doc = doc.add(bg);
        }

        if !scene.definitions.is_empty() {
            let defs = scene
                .definitions
                .into_iter()
                .fold(svg_element::Definitions::new(), |defs, node| defs.add(node));
            doc = doc.add(defs);
        }

        let main_group = svg_element::Group::new().set(
            "transform",
            format!(
                "translate({}, {})",
                self.margin.left() - content_bounds.min_x(),
                self.margin.top() - content_bounds.min_y()
            ),
        );

        let main_group = scene
            .output
            .render()
            .into_iter()
            .fold(main_group, |group, node| group.add(node));

        doc.add(main_group)
    }
}

impl Default for SvgBuilder {
    fn default() -> Self {
        Self {
            background: None,
            margin: Insets::uniform(20.0),
        }
    }
}
