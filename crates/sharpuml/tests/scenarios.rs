//! End-to-end scenarios for the diagram synthesizer
//!
//! Each scenario builds the analyzed model by hand and checks the PlantUML
//! text it renders to.

use sharpuml::prelude::*;

fn render(projects: &[ProjectDependency]) -> String {
    generate_diagram(Some(projects)).unwrap()
}

// =============================================================================
// Project dependencies
// =============================================================================

#[test]
fn test_core_web_logging_lib() {
    let projects = vec![
        ProjectDependency::new("Core").with_package_reference("LoggingLib"),
        ProjectDependency::new("Web").with_project_reference("Core"),
    ];
    let diagram = render(&projects);

    assert!(diagram.contains("component [Core]"));
    assert!(diagram.contains("component [Web]"));
    assert!(diagram.contains("note right of [Core]"));
    assert!(diagram.contains("    Packages:\n    - LoggingLib\n  end note"));
    assert!(diagram.contains("[Web] --> [Core]"));
    assert!(!diagram.contains("[Core] --> [Web]"));
    assert!(!diagram.contains("namespace"));
}

#[test]
fn test_note_lists_packages_in_order() {
    let projects = vec![ProjectDependency::new("Core")
        .with_package_reference("Zeta")
        .with_package_reference("Alpha")];
    let diagram = render(&projects);
    let zeta = diagram.find("- Zeta").unwrap();
    let alpha = diagram.find("- Alpha").unwrap();
    assert!(zeta < alpha);
}

#[test]
fn test_edges_follow_project_then_reference_order() {
    let projects = vec![
        ProjectDependency::new("Web")
            .with_project_reference("Core")
            .with_project_reference("Data"),
        ProjectDependency::new("Data").with_project_reference("Core"),
    ];
    let diagram = render(&projects);
    let edges: Vec<&str> = diagram.lines().filter(|l| l.contains("-->")).collect();
    assert_eq!(
        edges,
        vec!["[Web] --> [Core]", "[Web] --> [Data]", "[Data] --> [Core]"]
    );
}

// =============================================================================
// Classes
// =============================================================================

#[test]
fn test_sealed_foo_implements_ifoo() {
    let foo = ClassDescriptor::new("Foo", "Demo")
        .sealed()
        .with_base_type("IFoo")
        .with_property(Property::new("Id", "int").with_getter().with_init())
        .with_relationship(Relationship::new("IFoo", RelationshipKind::Implementation));
    let diagram = render(&[ProjectDependency::new("Demo").with_class(foo)]);

    assert!(diagram.contains("class Foo <<sealed>> {"));
    assert!(diagram.contains("+ Id : int { get init }"));
    assert!(diagram.contains("interface IFoo {"));
    assert!(diagram.contains("Foo --|> IFoo"));
}

#[test]
fn test_nested_child_rendered_between_members_and_edges() {
    let parent = ClassDescriptor::new("Order", "Shop")
        .with_method(Method::new("Total", "decimal"))
        .with_nested_class(
            ClassDescriptor::new("Line", "Shop")
                .with_property(Property::new("Sku", "string").with_getter()),
        )
        .with_relationship(Relationship::new("Customer", RelationshipKind::Aggregation));
    let diagram = render(&[ProjectDependency::new("Shop").with_class(parent)]);

    let member = diagram.find("+ Total() : decimal").unwrap();
    let child = diagram.find("    class Line {").unwrap();
    let child_member = diagram.find("      + Sku : string { get }").unwrap();
    let edge = diagram.find("Customer --o Order").unwrap();
    let nesting = diagram.find("Order +-- Line").unwrap();

    assert!(member < child);
    assert!(child < child_member);
    assert!(child_member < edge);
    assert!(edge < nesting);
}

#[test]
fn test_classes_from_several_projects_share_a_namespace() {
    let projects = vec![
        ProjectDependency::new("A").with_class(ClassDescriptor::new("First", "Shared")),
        ProjectDependency::new("B").with_class(ClassDescriptor::new("Second", "Shared")),
    ];
    let diagram = render(&projects);
    assert_eq!(diagram.matches("namespace Shared {").count(), 1);
    assert!(diagram.find("class First").unwrap() < diagram.find("class Second").unwrap());
}

#[test]
fn test_interface_stubs_are_distinct_and_ordered() {
    let projects = vec![ProjectDependency::new("App")
        .with_class(
            ClassDescriptor::new("A", "App")
                .with_base_type("IRead")
                .with_base_type("IWrite"),
        )
        .with_class(
            ClassDescriptor::new("B", "App")
                .with_base_type("IWrite")
                .with_base_type("IAudit"),
        )];
    let diagram = render(&projects);
    let stubs: Vec<&str> = diagram
        .lines()
        .filter(|l| l.trim_start().starts_with("interface "))
        .map(str::trim)
        .collect();
    assert_eq!(
        stubs,
        vec!["interface IRead {", "interface IWrite {", "interface IAudit {"]
    );
}

// =============================================================================
// Document invariants
// =============================================================================

#[test]
fn test_empty_list_is_header_and_footer() {
    let diagram = render(&[]);
    assert!(diagram.starts_with("@startuml"));
    assert!(diagram.ends_with("@enduml"));
    assert!(!diagram.ends_with('\n'));
    assert!(!diagram.contains("component ["));
    assert!(!diagram.contains("\nclass "));
    assert!(!diagram.contains("\nnamespace "));
}

#[test]
fn test_generate_twice_is_byte_identical() {
    let projects = vec![
        ProjectDependency::new("Core")
            .with_package_reference("LoggingLib")
            .with_class(
                ClassDescriptor::new("Service", "Core")
                    .with_base_type("IService")
                    .with_relationship(Relationship::new(
                        "IService",
                        RelationshipKind::Implementation,
                    )),
            ),
        ProjectDependency::new("Web").with_project_reference("Core"),
    ];
    assert_eq!(render(&projects), render(&projects));
}
