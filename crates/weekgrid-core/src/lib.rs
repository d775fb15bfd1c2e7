//! Weekgrid Core Types and Definitions
//!
//! This crate provides the foundational drawing types shared by the weekgrid
//! flowchart and heatmap renderers. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Shapes, text, arrows and layered SVG output ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
