//! Front end, renderer and pipeline plugins

pub mod csharp;
pub mod orchestrator;
pub mod plantuml;
