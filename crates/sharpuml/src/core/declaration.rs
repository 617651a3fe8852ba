//! Front end neutral declarations
//!
//! This is what a source front end hands to the class model builder: the
//! syntax-level shape of a class with whatever type information the front
//! end could resolve.

use super::type_name::TypeRef;

/// A generic parameter as declared, constraints already rendered as text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeParameterDeclaration {
    pub name: String,
    pub constraints: Vec<String>,
}

impl TypeParameterDeclaration {
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

/// A field declaration; one declaration may introduce several names
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldDeclaration {
    pub modifiers: Vec<String>,
    pub names: Vec<String>,
    pub type_ref: Option<TypeRef>,
}

impl FieldDeclaration {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            modifiers: Vec::new(),
            names: vec![name.into()],
            type_ref: Some(type_ref),
        }
    }

    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertyDeclaration {
    pub modifiers: Vec<String>,
    pub name: String,
    pub type_ref: Option<TypeRef>,
    pub has_getter: bool,
    pub has_setter: bool,
    pub has_init: bool,
}

impl PropertyDeclaration {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref: Some(type_ref),
            ..Self::default()
        }
    }

    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }

    pub fn with_accessors(mut self, get: bool, set: bool, init: bool) -> Self {
        self.has_getter = get;
        self.has_setter = set;
        self.has_init = init;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParameterDeclaration {
    pub name: String,
    pub type_ref: Option<TypeRef>,
}

impl ParameterDeclaration {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref: Some(type_ref),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MethodDeclaration {
    pub modifiers: Vec<String>,
    pub name: String,
    pub return_type: Option<TypeRef>,
    pub parameters: Vec<ParameterDeclaration>,
    pub type_parameters: Vec<TypeParameterDeclaration>,
}

impl MethodDeclaration {
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            return_type: Some(return_type),
            ..Self::default()
        }
    }

    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterDeclaration) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_type_parameter(mut self, type_parameter: TypeParameterDeclaration) -> Self {
        self.type_parameters.push(type_parameter);
        self
    }
}

/// A class (or record class) declaration
///
/// `name` is `None` when the front end could not resolve the declaration;
/// such declarations are skipped by the builder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassDeclaration {
    pub name: Option<String>,
    pub namespace: String,
    pub modifiers: Vec<String>,
    pub is_record: bool,
    /// Base list entries exactly as written
    pub base_list: Vec<String>,
    /// Direct base class, if one could be told apart from the interfaces
    pub base_type: Option<TypeRef>,
    pub interfaces: Vec<TypeRef>,
    pub fields: Vec<FieldDeclaration>,
    pub properties: Vec<PropertyDeclaration>,
    pub methods: Vec<MethodDeclaration>,
    pub type_parameters: Vec<TypeParameterDeclaration>,
    pub nested: Vec<ClassDeclaration>,
}

impl ClassDeclaration {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// A declaration the front end failed to resolve
    pub fn unresolved(namespace: impl Into<String>) -> Self {
        Self {
            name: None,
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }

    pub fn record(mut self) -> Self {
        self.is_record = true;
        self
    }

    /// Declare a base class; it is also appended to the written base list
    pub fn with_base_type(mut self, base_type: TypeRef) -> Self {
        self.base_list.push(base_type.to_string());
        self.base_type = Some(base_type);
        self
    }

    /// Declare an interface; it is also appended to the written base list
    pub fn with_interface(mut self, interface: TypeRef) -> Self {
        self.base_list.push(interface.to_string());
        self.interfaces.push(interface);
        self
    }

    pub fn with_field(mut self, field: FieldDeclaration) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_property(mut self, property: PropertyDeclaration) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_method(mut self, method: MethodDeclaration) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_type_parameter(mut self, type_parameter: TypeParameterDeclaration) -> Self {
        self.type_parameters.push(type_parameter);
        self
    }

    pub fn with_nested(mut self, nested: ClassDeclaration) -> Self {
        self.nested.push(nested);
        self
    }
}
