//! Structural model of an analyzed solution
//!
//! Value types produced once per analysis run and consumed by the diagram
//! synthesizer. Nested classes are owned by their parent.

use serde::{Deserialize, Serialize};

use super::modifiers::Visibility;

/// A generic type parameter with its constraints
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TypeParameter {
    pub name: String,
    pub constraints: Vec<String>,
}

impl TypeParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraints: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraints.push(constraint.into());
        self
    }
}

/// A method parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub type_name: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Modifiers shared by properties and methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MemberTraits {
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_virtual: bool,
    pub is_override: bool,
}

impl MemberTraits {
    pub fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            ..Self::default()
        }
    }
}

/// A property declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub traits: MemberTraits,
    pub name: String,
    pub type_name: String,
    pub has_getter: bool,
    pub has_setter: bool,
    pub has_init_only_setter: bool,
}

impl Property {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            traits: MemberTraits::new(Visibility::Public),
            name: name.into(),
            type_name: type_name.into(),
            has_getter: false,
            has_setter: false,
            has_init_only_setter: false,
        }
    }

    pub fn with_traits(mut self, traits: MemberTraits) -> Self {
        self.traits = traits;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.traits.visibility = visibility;
        self
    }

    pub fn with_getter(mut self) -> Self {
        self.has_getter = true;
        self
    }

    pub fn with_setter(mut self) -> Self {
        self.has_setter = true;
        self
    }

    pub fn with_init(mut self) -> Self {
        self.has_init_only_setter = true;
        self
    }

    /// Accessor keywords in display order
    pub fn accessors(&self) -> Vec<&'static str> {
        let mut accessors = Vec::new();
        if self.has_getter {
            accessors.push("get");
        }
        if self.has_setter {
            accessors.push("set");
        }
        if self.has_init_only_setter {
            accessors.push("init");
        }
        accessors
    }
}

/// A method declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub traits: MemberTraits,
    pub is_abstract: bool,
    pub is_async: bool,
    pub name: String,
    pub return_type: String,
    pub parameters: Vec<Parameter>,
    pub type_parameters: Vec<TypeParameter>,
}

impl Method {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            traits: MemberTraits::new(Visibility::Public),
            is_abstract: false,
            is_async: false,
            name: name.into(),
            return_type: return_type.into(),
            parameters: Vec::new(),
            type_parameters: Vec::new(),
        }
    }

    pub fn with_traits(mut self, traits: MemberTraits) -> Self {
        self.traits = traits;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.traits.visibility = visibility;
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_type_parameter(mut self, type_parameter: TypeParameter) -> Self {
        self.type_parameters.push(type_parameter);
        self
    }

    pub fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self
    }

    pub fn abstract_method(mut self) -> Self {
        self.is_abstract = true;
        self
    }
}

/// Relationship type between a class and a referenced type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    Inheritance,    // <|--
    Implementation, // --|>
    Composition,    // --*
    Aggregation,    // --o
    Dependency,     // <..
}

/// A classified reference from a class to another type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub target_type_name: String,
    pub kind: RelationshipKind,
}

impl Relationship {
    pub fn new(target_type_name: impl Into<String>, kind: RelationshipKind) -> Self {
        Self {
            target_type_name: target_type_name.into(),
            kind,
        }
    }
}

/// The analyzed shape of a single class
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassDescriptor {
    pub name: String,
    pub namespace: String,
    pub visibility: Visibility,
    pub is_sealed: bool,
    pub is_record: bool,
    pub is_abstract: bool,
    pub is_static: bool,
    /// Base list as declared in source, before classification
    pub base_types: Vec<String>,
    pub properties: Vec<Property>,
    pub methods: Vec<Method>,
    pub type_parameters: Vec<TypeParameter>,
    pub relationships: Vec<Relationship>,
    pub nested_classes: Vec<ClassDescriptor>,
}

impl ClassDescriptor {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            visibility: Visibility::Public,
            ..Self::default()
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn sealed(mut self) -> Self {
        self.is_sealed = true;
        self
    }

    pub fn record(mut self) -> Self {
        self.is_record = true;
        self
    }

    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn static_class(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_base_type(mut self, base_type: impl Into<String>) -> Self {
        self.base_types.push(base_type.into());
        self
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_type_parameter(mut self, type_parameter: TypeParameter) -> Self {
        self.type_parameters.push(type_parameter);
        self
    }

    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    pub fn with_nested_class(mut self, nested: ClassDescriptor) -> Self {
        self.nested_classes.push(nested);
        self
    }

    /// Names of every class nested below this one, at any depth
    pub fn nested_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for nested in &self.nested_classes {
            names.push(nested.name.as_str());
            names.extend(nested.nested_names());
        }
        names
    }

    /// This class plus the number of classes nested below it
    pub fn class_count(&self) -> usize {
        1 + self
            .nested_classes
            .iter()
            .map(ClassDescriptor::class_count)
            .sum::<usize>()
    }
}

/// A project, its declared references, and its top-level classes
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectDependency {
    pub project_name: String,
    pub project_path: String,
    pub target_framework: String,
    pub package_references: Vec<String>,
    pub project_references: Vec<String>,
    pub classes: Vec<ClassDescriptor>,
}

impl ProjectDependency {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            ..Self::default()
        }
    }

    pub fn with_path(mut self, project_path: impl Into<String>) -> Self {
        self.project_path = project_path.into();
        self
    }

    pub fn with_target_framework(mut self, target_framework: impl Into<String>) -> Self {
        self.target_framework = target_framework.into();
        self
    }

    pub fn with_package_reference(mut self, package: impl Into<String>) -> Self {
        self.package_references.push(package.into());
        self
    }

    pub fn with_project_reference(mut self, project: impl Into<String>) -> Self {
        self.project_references.push(project.into());
        self
    }

    pub fn with_class(mut self, class: ClassDescriptor) -> Self {
        self.classes.push(class);
        self
    }

    /// Every class of the project, nested ones included
    pub fn class_count(&self) -> usize {
        self.classes.iter().map(ClassDescriptor::class_count).sum()
    }
}
