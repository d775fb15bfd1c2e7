//! The built-in Monte-Carlo season simulation workflow.

use weekgrid_core::geometry::Point;

use super::{Flowchart, NodeShape};
use crate::error::WeekgridError;

/// Builds the season simulation workflow chart.
///
/// Seasons are processed one at a time: each runs a Monte-Carlo loop over its
/// weeks, keeps the models whose accuracy clears the threshold and reports
/// the best one, or skips the season when no model qualifies.
///
/// # Errors
///
/// Propagates declaration errors from [`Flowchart::add_node`].
pub fn simulation_workflow() -> Result<Flowchart, WeekgridError> {
    let mut chart = Flowchart::new();

    let nodes = [
        ("config", 5.0, 21.0, "Load config parameters", NodeShape::rectangle()),
        ("load_data", 5.0, 19.6, "Read weekly_modeling_data.csv", NodeShape::rectangle()),
        ("season_loop", 5.0, 18.2, "Loop seasons", NodeShape::rectangle()),
        ("check_skip", 5.0, 16.8, "Skip\nexisting?", NodeShape::diamond()),
        ("single_season", 5.0, 15.1, "Prepare season data & rule type", NodeShape::rectangle()),
        ("sim_loop", 5.0, 13.6, "Monte Carlo loop", NodeShape::rectangle()),
        ("week_loop", 5.0, 12.0, "Loop weeks", NodeShape::rectangle()),
        ("simulate_votes", 5.0, 10.4, "Compute votes & shares", NodeShape::rectangle()),
        ("eliminate", 5.0, 8.8, "Apply elimination rule", NodeShape::rectangle()),
        ("accuracy_check", 5.0, 7.2, "Accuracy\n≥ threshold?", NodeShape::diamond()),
        ("store_valid", 5.0, 5.6, "Store valid model", NodeShape::rectangle()),
        (
            "no_valid",
            1.8,
            6.2,
            "No valid model\n→ skip season",
            NodeShape::rectangle_sized(2.6, 0.9),
        ),
        ("best_model", 5.0, 4.2, "Select best model", NodeShape::rectangle()),
        ("metrics", 5.0, 2.7, "Build tables & metrics", NodeShape::rectangle()),
        ("season_outputs", 5.0, 1.2, "Save season CSV & plots", NodeShape::rectangle()),
        (
            "summary",
            5.0,
            0.2,
            "Season summary & final report",
            NodeShape::rectangle_sized(4.2, 0.9),
        ),
    ];

    for (id, x, y, label, shape) in nodes {
        chart.add_node(id, Point::new(x, y), label, shape)?;
    }

    chart.add_edge("config", "load_data", None);
    chart.add_edge("load_data", "season_loop", None);
    chart.add_edge("season_loop", "check_skip", None);
    chart.add_edge("check_skip", "single_season", Some("No"));
    chart.add_edge(Point::new(3.2, 16.8), "season_loop", Some("Yes"));

    chart.add_edge("single_season", "sim_loop", None);
    chart.add_edge("sim_loop", "week_loop", None);
    chart.add_edge("week_loop", "simulate_votes", None);
    chart.add_edge("simulate_votes", "eliminate", None);
    chart.add_edge("eliminate", "accuracy_check", None);
    chart.add_edge("accuracy_check", "store_valid", Some("Yes"));
    chart.add_edge("accuracy_check", "no_valid", Some("No"));
    chart.add_edge("store_valid", "sim_loop", None);

    chart.add_edge("no_valid", "season_loop", None);
    chart.add_edge("store_valid", "best_model", None);
    chart.add_edge("best_model", "metrics", None);
    chart.add_edge("metrics", "season_outputs", None);
    chart.add_edge("season_outputs", "summary", None);
    chart.add_edge("summary", "season_loop", None);

    Ok(chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flowchart::Endpoint;

    #[test]
    fn test_workflow_shape_counts() {
        let chart = simulation_workflow().unwrap();
        assert_eq!(chart.nodes().len(), 16);
        assert_eq!(chart.edges().len(), 19);
        assert!(chart.validate().is_ok());
    }

    #[test]
    fn test_workflow_decisions_are_diamonds() {
        let chart = simulation_workflow().unwrap();
        let diamonds: Vec<&str> = chart
            .nodes()
            .filter(|node| matches!(node.shape(), NodeShape::Diamond { .. }))
            .map(|node| node.id())
            .collect();
        assert_eq!(diamonds, ["check_skip", "accuracy_check"]);
        assert_eq!(
            chart.node("accuracy_check").unwrap().label(),
            "Accuracy\n≥ threshold?"
        );
    }

    #[test]
    fn test_workflow_labels_edges() {
        let chart = simulation_workflow().unwrap();
        let labels: Vec<&str> = chart.edges().iter().filter_map(|e| e.label()).collect();
        assert_eq!(labels, ["No", "Yes", "Yes", "No"]);

        let skip = &chart.edges()[4];
        assert_eq!(skip.from(), &Endpoint::Point(Point::new(3.2, 16.8)));
        assert_eq!(skip.to(), &Endpoint::from("season_loop"));
    }
}
