//! PlantUML plugin
//!
//! Synthesizes PlantUML class and component diagrams from analyzed projects.

mod renderer;
mod writer;

pub use renderer::{generate_diagram, PlantUmlRenderer};
pub use writer::DiagramWriter;
