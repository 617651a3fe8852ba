//! PlantUML diagram renderer
//!
//! Renders analyzed projects to a PlantUML document in one linear pass:
//! preamble, project dependency block, class block, `@enduml`.

use std::collections::HashSet;
use std::fmt::{self, Write};

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info, span, trace, Level};

use super::writer::DiagramWriter;
use crate::core::{
    simple_name, ClassDescriptor, DiagramError, Method, ProjectDependency, Property,
    RelationshipKind, TypeParameter,
};

const PREAMBLE: &[&str] = &[
    "@startuml",
    "skinparam componentStyle rectangle",
    "skinparam packageStyle rectangle",
    "skinparam classAttributeIconSize 0",
    "skinparam component {",
    "  BackgroundColor White",
    "  ArrowColor Black",
    "  BorderColor Black",
    "}",
    "skinparam class {",
    "  BackgroundColor White",
    "  ArrowColor Black",
    "  BorderColor Black",
    "}",
    "skinparam package {",
    "  BackgroundColor LightGray",
    "  BorderColor Black",
    "}",
];

/// Render a diagram for the given projects.
///
/// `None` is a contract violation and yields [`DiagramError::InvalidArgument`];
/// an empty slice renders the minimal document.
pub fn generate_diagram(
    dependencies: Option<&[ProjectDependency]>,
) -> Result<String, DiagramError> {
    let dependencies = dependencies.ok_or_else(|| DiagramError::invalid_argument("dependencies"))?;
    Ok(PlantUmlRenderer::new().render(dependencies))
}

/// PlantUML renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct PlantUmlRenderer;

impl PlantUmlRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render into a `String`; identical input gives byte-identical output
    pub fn render(&self, projects: &[ProjectDependency]) -> String {
        self.render_to(projects, String::new()).unwrap_or_default()
    }

    /// Render into any [`fmt::Write`] sink and hand the sink back
    pub fn render_to<W: Write>(&self, projects: &[ProjectDependency], sink: W) -> Result<W, fmt::Error> {
        let render_span = span!(Level::INFO, "render_plantuml", projects = projects.len());
        let _enter = render_span.enter();

        info!("Generating PlantUML diagram");

        let mut writer = DiagramWriter::with_sink(sink);
        for line in PREAMBLE {
            writer.line(line)?;
        }
        writer.line("")?;

        if !projects.is_empty() {
            self.write_dependencies(&mut writer, projects)?;
            writer.line("")?;
        }

        let class_count: usize = projects.iter().map(ProjectDependency::class_count).sum();
        if class_count > 0 {
            self.write_classes(&mut writer, projects)?;
            writer.line("")?;
        }

        writer.last_line("@enduml")?;
        debug!(class_count, "Diagram rendered");
        Ok(writer.into_inner())
    }

    fn write_dependencies<W: Write>(
        &self,
        writer: &mut DiagramWriter<W>,
        projects: &[ProjectDependency],
    ) -> fmt::Result {
        writer.open("package \"Project Dependencies\" {")?;
        for project in projects {
            writer.line(format!("component [{}]", project.project_name))?;
            if !project.package_references.is_empty() {
                writer.open(format!("note right of [{}]", project.project_name))?;
                writer.line("Packages:")?;
                for package in &project.package_references {
                    writer.line(format!("- {}", package))?;
                }
                writer.dedent();
                writer.line("end note")?;
            }
        }
        writer.close()?;

        let mut edge_count = 0;
        for project in projects {
            for reference in &project.project_references {
                writer.line(format!("[{}] --> [{}]", project.project_name, reference))?;
                edge_count += 1;
            }
        }
        debug!(edge_count, "Wrote project dependencies");
        Ok(())
    }

    fn write_classes<W: Write>(
        &self,
        writer: &mut DiagramWriter<W>,
        projects: &[ProjectDependency],
    ) -> fmt::Result {
        let mut namespaces: IndexMap<&str, Vec<&ClassDescriptor>> = IndexMap::new();
        for class in projects.iter().flat_map(|p| &p.classes) {
            namespaces
                .entry(class.namespace.as_str())
                .or_default()
                .push(class);
        }
        debug!(namespace_count = namespaces.len(), "Grouped classes by namespace");

        for (namespace, classes) in &namespaces {
            let scoped = !namespace.is_empty();
            if scoped {
                writer.open(format!("namespace {} {{", namespace))?;
            }
            self.write_namespace(writer, classes)?;
            if scoped {
                writer.close()?;
            }
        }
        Ok(())
    }

    fn write_namespace<W: Write>(
        &self,
        writer: &mut DiagramWriter<W>,
        classes: &[&ClassDescriptor],
    ) -> fmt::Result {
        let mut declared: HashSet<&str> = HashSet::new();
        let mut nested: Vec<&ClassDescriptor> = Vec::new();
        let mut base_types: IndexSet<&str> = IndexSet::new();
        for class in classes {
            collect_names(class, &mut declared, &mut base_types);
            collect_nested(class, &mut nested);
        }

        // Names declared as classes here are already diagram entities.
        for base_type in base_types.iter().filter(|b| !declared.contains(*b)) {
            writer.line(format!("interface {} {{", base_type))?;
            writer.line("}")?;
        }

        // A class already rendered inside its parent is skipped; a namesake is not.
        for class in classes.iter().filter(|c| !nested.contains(*c)) {
            self.write_class(writer, class)?;
        }
        Ok(())
    }

    fn write_class<W: Write>(&self, writer: &mut DiagramWriter<W>, class: &ClassDescriptor) -> fmt::Result {
        trace!(class = %class.name, depth = writer.depth(), "Rendering class");

        writer.open(class_header(class))?;
        for property in &class.properties {
            writer.line(property_line(property))?;
        }
        for method in &class.methods {
            writer.line(method_line(method))?;
        }
        for nested in &class.nested_classes {
            self.write_class(writer, nested)?;
        }
        writer.close()?;

        for relationship in &class.relationships {
            let target = &relationship.target_type_name;
            let edge = match relationship.kind {
                RelationshipKind::Implementation => format!("{} --|> {}", class.name, target),
                RelationshipKind::Inheritance => format!("{} <|-- {}", target, class.name),
                RelationshipKind::Composition => format!("{} --* {}", target, class.name),
                RelationshipKind::Aggregation => format!("{} --o {}", target, class.name),
                RelationshipKind::Dependency => format!("{} <.. {}", target, class.name),
            };
            writer.line(edge)?;
        }
        for nested in &class.nested_classes {
            writer.line(format!("{} +-- {}", class.name, nested.name))?;
        }
        Ok(())
    }
}

fn collect_names<'a>(
    class: &'a ClassDescriptor,
    declared: &mut HashSet<&'a str>,
    base_types: &mut IndexSet<&'a str>,
) {
    declared.insert(class.name.as_str());
    for base_type in &class.base_types {
        let name = simple_name(base_type);
        if !name.is_empty() {
            base_types.insert(name);
        }
    }
    for nested in &class.nested_classes {
        collect_names(nested, declared, base_types);
    }
}

fn collect_nested<'a>(class: &'a ClassDescriptor, nested: &mut Vec<&'a ClassDescriptor>) {
    for child in &class.nested_classes {
        nested.push(child);
        collect_nested(child, nested);
    }
}

fn class_header(class: &ClassDescriptor) -> String {
    let mut header = format!("class {}", class.name);
    header.push_str(&type_parameter_list(&class.type_parameters, true));

    let stereotypes = [
        (class.is_sealed, "<<sealed>>"),
        (class.is_record, "<<record>>"),
        (class.is_abstract, "<<abstract>>"),
        (class.is_static, "<<static>>"),
    ];
    for (_, tag) in stereotypes.iter().filter(|(present, _)| *present) {
        header.push(' ');
        header.push_str(tag);
    }
    header.push_str(" {");
    header
}

/// `<T: class & new(), U>`; empty when there are no parameters
fn type_parameter_list(type_parameters: &[TypeParameter], with_constraints: bool) -> String {
    if type_parameters.is_empty() {
        return String::new();
    }
    let parameters: Vec<String> = type_parameters
        .iter()
        .map(|p| {
            if with_constraints && !p.constraints.is_empty() {
                format!("{}: {}", p.name, p.constraints.join(" & "))
            } else {
                p.name.clone()
            }
        })
        .collect();
    format!("<{}>", parameters.join(", "))
}

fn property_line(property: &Property) -> String {
    let traits = &property.traits;
    let mut line = format!("{} ", traits.visibility.symbol());
    for (present, keyword) in [
        (traits.is_static, "static "),
        (traits.is_virtual, "virtual "),
        (traits.is_override, "override "),
    ] {
        if present {
            line.push_str(keyword);
        }
    }
    line.push_str(&format!("{} : {}", property.name, property.type_name));

    let accessors = property.accessors();
    if !accessors.is_empty() {
        line.push_str(&format!(" {{ {} }}", accessors.join(" ")));
    }
    line
}

fn method_line(method: &Method) -> String {
    let traits = &method.traits;
    let mut line = format!("{} ", traits.visibility.symbol());
    for (present, keyword) in [
        (traits.is_static, "static "),
        (traits.is_virtual, "virtual "),
        (traits.is_override, "override "),
        (method.is_abstract, "abstract "),
        (method.is_async, "async "),
    ] {
        if present {
            line.push_str(keyword);
        }
    }

    let parameters: Vec<String> = method
        .parameters
        .iter()
        .map(|p| format!("{}: {}", p.name, p.type_name))
        .collect();
    line.push_str(&format!(
        "{}{}({}) : {}",
        method.name,
        type_parameter_list(&method.type_parameters, false),
        parameters.join(", "),
        method.return_type
    ));
    line
}
