//! Z-ordered rendering layers.
//!
//! Drawables do not emit SVG directly into a document. They push nodes into
//! a [`LayeredOutput`] under a [`RenderLayer`], and the output is flattened
//! at the end with one `<g data-layer="…">` group per non-empty layer, lowest
//! layer first. An edge label background therefore always sits under its
//! text even when the two come from different drawables.
//!
//! ```
//! # use weekgrid_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Rectangle, Text};
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Text, Box::new(Text::new("Week")));
//! output.add_to_layer(RenderLayer::Cells, Box::new(Rectangle::new()));
//!
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! assert!(groups[0].to_string().contains("data-layer=\"cells\""));
//! ```

use std::collections::BTreeMap;

use svg::node::element as svg_element;

/// A boxed SVG node of any element type.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Text backgrounds
    Background,
    /// Heatmap cells
    Cells,
    /// Flowchart shapes and legend marks
    Content,
    Arrow,
    /// Labels and titles
    Text,
}

impl RenderLayer {
    /// Value of the group's `data-layer` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Cells => "cells",
            Self::Content => "content",
            Self::Arrow => "arrow",
            Self::Text => "text",
        }
    }
}

/// SVG nodes collected per layer.
///
/// Within a layer, nodes render in insertion order.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    layers: BTreeMap<RenderLayer, Vec<SvgNode>>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.layers.entry(layer).or_default().push(node);
    }

    /// Appends every node of `other` after the nodes already on the same layer.
    pub fn merge(&mut self, other: LayeredOutput) {
        for (layer, nodes) in other.layers {
            self.layers.entry(layer).or_default().extend(nodes);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.layers.values().all(Vec::is_empty)
    }

    /// Number of nodes on `layer`.
    pub fn count(&self, layer: RenderLayer) -> usize {
        self.layers.get(&layer).map_or(0, Vec::len)
    }

    /// Flattens the layers into one group per non-empty layer, bottom first.
    pub fn render(self) -> Vec<SvgNode> {
        self.layers
            .into_iter()
            .filter(|(_, nodes)| !nodes.is_empty())
            .map(|(layer, nodes)| {
                let group = nodes.into_iter().fold(
                    svg_element::Group::new().set("data-layer", layer.name()),
                    |group, node| group.add(node),
                );
                Box::new(group) as SvgNode
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use svg::node::element::{Line, Rectangle};

    use super::*;

    #[test]
    fn test_empty_output_renders_nothing() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
        assert!(output.render().is_empty());
    }

    #[test]
    fn test_count_per_layer() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Cells, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Cells, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Text, Box::new(Rectangle::new()));

        assert_eq!(output.count(RenderLayer::Cells), 2);
        assert_eq!(output.count(RenderLayer::Text), 1);
        assert_eq!(output.count(RenderLayer::Arrow), 0);
    }

    #[test]
    fn test_merge_shares_groups() {
        let mut shapes = LayeredOutput::new();
        shapes.add_to_layer(RenderLayer::Content, Box::new(Rectangle::new()));

        let mut more = LayeredOutput::new();
        more.add_to_layer(RenderLayer::Content, Box::new(Line::new()));
        shapes.merge(more);

        let groups = shapes.render();
        assert_eq!(groups.len(), 1);

        let markup = groups[0].to_string();
        assert!(markup.find("<rect").unwrap() < markup.find("<line").unwrap());
    }

    #[test]
    fn test_layers_render_bottom_to_top() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Text, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Arrow, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Background, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Content, Box::new(Rectangle::new()));

        let names: Vec<String> = output
            .render()
            .into_iter()
            .map(|node| node.to_string())
            .collect();

        assert_eq!(names.len(), 4);
        for (markup, layer) in names.iter().zip(["background", "content", "arrow", "text"]) {
            assert!(markup.contains(&format!("data-layer=\"{layer}\"")), "{markup}");
        }
    }
}
