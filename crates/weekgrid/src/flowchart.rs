//! Declarative flowcharts of labeled shapes joined by directed arrows.
//!
//! Node positions and sizes are given in workflow units with the y axis
//! pointing up; one unit renders as [`UNIT_PX`] pixels. The image is cropped
//! to the drawing, so only relative positions matter.
//!
//! ```
//! use weekgrid::flowchart::{Flowchart, NodeShape};
//! use weekgrid::geometry::Point;
//!
//! let mut chart = Flowchart::new();
//! chart.add_node("start", Point::new(5.0, 2.0), "Start", NodeShape::rectangle()).unwrap();
//! chart.add_node("done", Point::new(5.0, 1.0), "Done?", NodeShape::diamond()).unwrap();
//! chart.add_edge("start", "done", None);
//!
//! assert_eq!(chart.nodes().len(), 2);
//! assert!(chart.validate().is_ok());
//! ```

mod render;
mod workflow;

pub use workflow::simulation_workflow;

pub(crate) use render::render;

use indexmap::IndexMap;

use weekgrid_core::geometry::Point;

use crate::error::WeekgridError;

/// Pixels per workflow unit.
pub const UNIT_PX: f32 = 60.0;

/// Outline of a node, sized in workflow units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeShape {
    /// Rounded box centred on the node position.
    Rectangle { width: f32, height: f32 },
    /// Square rotated by 45°, vertices `radius` from the centre.
    Diamond { radius: f32 },
}

impl NodeShape {
    /// A 3.6 × 0.8 box.
    pub fn rectangle() -> Self {
        Self::Rectangle {
            width: 3.6,
            height: 0.8,
        }
    }

    /// A box of the given size.
    pub fn rectangle_sized(width: f32, height: f32) -> Self {
        Self::Rectangle { width, height }
    }

    /// A diamond of radius 0.75.
    pub fn diamond() -> Self {
        Self::Diamond { radius: 0.75 }
    }
}

/// A labeled shape at a fixed position.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    position: Point,
    label: String,
    shape: NodeShape,
}

impl Node {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Position in workflow units.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Label text; `\n` separates lines.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn shape(&self) -> NodeShape {
        self.shape
    }
}

/// One end of an edge.
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    /// The node with this identifier; the arrow is clipped to its outline.
    Node(String),
    /// A raw coordinate in workflow units, used as-is.
    Point(Point),
}

impl From<&str> for Endpoint {
    fn from(id: &str) -> Self {
        Self::Node(id.to_string())
    }
}

impl From<Point> for Endpoint {
    fn from(point: Point) -> Self {
        Self::Point(point)
    }
}

/// A directed arrow from `from` to `to` with an optional midpoint label.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    from: Endpoint,
    to: Endpoint,
    label: Option<String>,
}

impl Edge {
    pub fn from(&self) -> &Endpoint {
        &self.from
    }

    pub fn to(&self) -> &Endpoint {
        &self.to
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// A set of nodes, in declaration order, and the edges between them.
#[derive(Debug, Clone, Default)]
pub struct Flowchart {
    nodes: IndexMap<String, Node>,
    edges: Vec<Edge>,
}

impl Flowchart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a node.
    ///
    /// # Errors
    ///
    /// Returns [`WeekgridError::Layout`] when `id` is already declared.
    pub fn add_node(
        &mut self,
        id: &str,
        position: Point,
        label: &str,
        shape: NodeShape,
    ) -> Result<(), WeekgridError> {
        if self.nodes.contains_key(id) {
            return Err(WeekgridError::Layout(format!(
                "node `{id}` is declared more than once"
            )));
        }

        self.nodes.insert(
            id.to_string(),
            Node {
                id: id.to_string(),
                position,
                label: label.to_string(),
                shape,
            },
        );
        Ok(())
    }

    /// Declares a directed edge. References are checked by [`Flowchart::validate`].
    pub fn add_edge(
        &mut self,
        from: impl Into<Endpoint>,
        to: impl Into<Endpoint>,
        label: Option<&str>,
    ) {
        self.edges.push(Edge {
            from: from.into(),
            to: to.into(),
            label: label.map(str::to_string),
        });
    }

    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Checks that every edge references declared nodes.
    ///
    /// # Errors
    ///
    /// Returns [`WeekgridError::Layout`] naming the first unknown node.
    pub fn validate(&self) -> Result<(), WeekgridError> {
        for (index, edge) in self.edges.iter().enumerate() {
            for endpoint in [&edge.from, &edge.to] {
                let Endpoint::Node(id) = endpoint else {
                    continue;
                };
                if !self.nodes.contains_key(id) {
                    return Err(WeekgridError::Layout(format!(
                        "edge {index} references unknown node `{id}`"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Converts workflow units (y up) to image pixels (y down).
pub(crate) fn to_image(point: Point) -> Point {
    Point::new(point.x() * UNIT_PX, -point.y() * UNIT_PX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_node_is_layout_error() {
        let mut chart = Flowchart::new();
        chart
            .add_node("a", Point::new(0.0, 0.0), "A", NodeShape::rectangle())
            .unwrap();
        let err = chart
            .add_node("a", Point::new(1.0, 1.0), "A again", NodeShape::diamond())
            .unwrap_err();

        assert!(matches!(err, WeekgridError::Layout(msg) if msg.contains("`a`")));
        assert_eq!(chart.nodes().len(), 1);
    }

    #[test]
    fn test_unknown_reference_is_layout_error() {
        let mut chart = Flowchart::new();
        chart
            .add_node("a", Point::new(0.0, 0.0), "A", NodeShape::rectangle())
            .unwrap();
        chart.add_edge("a", "missing", Some("No"));

        let err = chart.validate().unwrap_err();
        assert!(matches!(err, WeekgridError::Layout(msg) if msg.contains("`missing`")));
    }

    #[test]
    fn test_raw_points_need_no_declaration() {
        let mut chart = Flowchart::new();
        chart
            .add_node("a", Point::new(0.0, 0.0), "A", NodeShape::rectangle())
            .unwrap();
        chart.add_edge(Point::new(3.2, 16.8), "a", Some("Yes"));

        assert!(chart.validate().is_ok());
        assert_eq!(chart.edges()[0].label(), Some("Yes"));
        assert_eq!(chart.edges()[0].from(), &Endpoint::Point(Point::new(3.2, 16.8)));
    }

    #[test]
    fn test_nodes_keep_declaration_order() {
        let mut chart = Flowchart::new();
        for id in ["z", "a", "m"] {
            chart
                .add_node(id, Point::default(), id, NodeShape::rectangle())
                .unwrap();
        }
        let ids: Vec<&str> = chart.nodes().map(Node::id).collect();
        assert_eq!(ids, ["z", "a", "m"]);
    }

    #[test]
    fn test_to_image_flips_y() {
        let point = to_image(Point::new(5.0, 21.0));
        assert_eq!(point, Point::new(300.0, -1260.0));
    }
}
