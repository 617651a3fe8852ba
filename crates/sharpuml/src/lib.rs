//! Sharpuml - Turn C# solutions into PlantUML diagrams
//!
//! Reads a `.sln` (or a single `.csproj`), extracts the classes of every
//! project, classifies how each class relates to the types it uses, and
//! renders project dependencies and class structure as PlantUML.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! let plantuml = sharpuml::render_solution(Path::new("App.sln")).unwrap();
//! println!("{}", plantuml);
//! ```
//!
//! # Advanced Usage
//!
//! The diagram synthesizer works on plain data, so a model can be built by
//! hand or by another front end:
//!
//! ```rust
//! use sharpuml::prelude::*;
//!
//! let foo = ClassDescriptor::new("Foo", "App")
//!     .sealed()
//!     .with_base_type("IFoo")
//!     .with_property(Property::new("Id", "int").with_getter().with_init())
//!     .with_relationship(Relationship::new("IFoo", RelationshipKind::Implementation));
//! let projects = vec![ProjectDependency::new("App").with_class(foo)];
//!
//! let plantuml = generate_diagram(Some(projects.as_slice())).unwrap();
//! assert!(plantuml.contains("Foo --|> IFoo"));
//! assert!(plantuml.ends_with("@enduml"));
//! ```

pub mod core;
pub mod plugins;

pub use crate::core::*;
pub use plugins::plantuml::generate_diagram;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        CancellationToken, ClassDeclaration, ClassDescriptor, ClassExtractor, ClassModelBuilder,
        ClassifierConfig, DiagramError, Method, Parameter, ProjectDependency, ProjectHandle,
        ProjectReader, Property, Relationship, RelationshipClassifier, RelationshipKind,
        TypeParameter, TypeRef, Visibility,
    };
    pub use crate::plugins::csharp::{CSharpExtractor, SolutionReader};
    pub use crate::plugins::orchestrator::Orchestrator;
    pub use crate::plugins::plantuml::{generate_diagram, PlantUmlRenderer};
}

/// Analyze a solution with the default rules and render its diagram
///
/// # Example
/// ```rust,no_run
/// let plantuml = sharpuml::render_solution(std::path::Path::new("App.sln")).unwrap();
/// assert!(plantuml.starts_with("@startuml"));
/// ```
pub fn render_solution(solution: &std::path::Path) -> anyhow::Result<String> {
    use crate::plugins::orchestrator::Orchestrator;

    Orchestrator::new().process(solution)
}

/// Analyze a solution with custom classification rules
pub fn render_solution_with_config(
    solution: &std::path::Path,
    config: ClassifierConfig,
) -> anyhow::Result<String> {
    use crate::plugins::orchestrator::Orchestrator;

    Orchestrator::with_config(config).process(solution)
}

/// Analyze a solution without rendering
///
/// Useful when the model itself is wanted, e.g. to serialize it.
pub fn analyze_solution(
    solution: &std::path::Path,
    config: ClassifierConfig,
) -> anyhow::Result<Vec<ProjectDependency>> {
    use crate::plugins::orchestrator::Orchestrator;

    Orchestrator::with_config(config).analyze(solution, &CancellationToken::new())
}
