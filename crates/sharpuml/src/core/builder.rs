//! Class model builder
//!
//! Turns front end [`ClassDeclaration`]s into [`ClassDescriptor`]s: modifiers
//! are normalized, member types formatted, and relationships classified.

use tracing::trace;

use super::classifier::{ClassifierConfig, ClassifierInput, MemberType, RelationshipClassifier};
use super::declaration::{
    ClassDeclaration, MethodDeclaration, PropertyDeclaration, TypeParameterDeclaration,
};
use super::model::{ClassDescriptor, MemberTraits, Method, Parameter, Property, TypeParameter};
use super::modifiers::Modifiers;
use super::type_name::format_type;

/// Builds class descriptors from declarations
#[derive(Debug, Clone, Default)]
pub struct ClassModelBuilder {
    classifier: RelationshipClassifier,
}

impl ClassModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ClassifierConfig) -> Self {
        Self {
            classifier: RelationshipClassifier::with_config(config),
        }
    }

    pub fn classifier(&self) -> &RelationshipClassifier {
        &self.classifier
    }

    /// Build every resolvable declaration, skipping the rest
    pub fn build_all(&self, declarations: &[ClassDeclaration]) -> Vec<ClassDescriptor> {
        declarations.iter().filter_map(|d| self.build(d)).collect()
    }

    /// Build one class and everything nested in it.
    ///
    /// Returns `None` when the declaration has no resolvable name.
    pub fn build(&self, declaration: &ClassDeclaration) -> Option<ClassDescriptor> {
        let name = declaration.name.as_deref()?.trim();
        if name.is_empty() {
            return None;
        }

        let modifiers = Modifiers::from_keywords(&declaration.modifiers);
        let descriptor = ClassDescriptor {
            name: name.to_string(),
            namespace: declaration.namespace.clone(),
            visibility: modifiers.visibility,
            is_sealed: modifiers.is_sealed,
            is_record: declaration.is_record || modifiers.is_record,
            is_abstract: modifiers.is_abstract,
            is_static: modifiers.is_static,
            base_types: declaration.base_list.clone(),
            properties: declaration.properties.iter().map(build_property).collect(),
            methods: declaration.methods.iter().map(build_method).collect(),
            type_parameters: declaration
                .type_parameters
                .iter()
                .map(build_type_parameter)
                .collect(),
            relationships: self.classifier.classify(&classifier_input(declaration)),
            nested_classes: self.build_all(&declaration.nested),
        };

        trace!(
            class = %descriptor.name,
            properties = descriptor.properties.len(),
            methods = descriptor.methods.len(),
            relationships = descriptor.relationships.len(),
            nested = descriptor.nested_classes.len(),
            "Built class"
        );

        Some(descriptor)
    }
}

fn classifier_input(declaration: &ClassDeclaration) -> ClassifierInput<'_> {
    let mut members = Vec::new();
    for field in &declaration.fields {
        let modifiers = Modifiers::from_keywords(&field.modifiers);
        if let Some(type_ref) = &field.type_ref {
            members.push(MemberType::new(
                type_ref,
                modifiers.is_readonly || modifiers.is_const,
            ));
        }
    }
    for property in &declaration.properties {
        if let Some(type_ref) = &property.type_ref {
            members.push(MemberType::new(type_ref, !property.has_setter));
        }
    }

    let mut signature_types = Vec::new();
    for method in &declaration.methods {
        signature_types.extend(method.parameters.iter().filter_map(|p| p.type_ref.as_ref()));
        signature_types.extend(method.return_type.as_ref());
    }

    ClassifierInput {
        base_type: declaration.base_type.as_ref(),
        interfaces: declaration.interfaces.iter().collect(),
        members,
        signature_types,
    }
}

fn member_traits(modifiers: &Modifiers) -> MemberTraits {
    MemberTraits {
        visibility: modifiers.visibility,
        is_static: modifiers.is_static,
        is_virtual: modifiers.is_virtual,
        is_override: modifiers.is_override,
    }
}

fn build_property(declaration: &PropertyDeclaration) -> Property {
    let modifiers = Modifiers::from_keywords(&declaration.modifiers);
    Property {
        traits: member_traits(&modifiers),
        name: declaration.name.clone(),
        type_name: format_type(declaration.type_ref.as_ref()),
        has_getter: declaration.has_getter,
        has_setter: declaration.has_setter,
        has_init_only_setter: declaration.has_init,
    }
}

fn build_method(declaration: &MethodDeclaration) -> Method {
    let modifiers = Modifiers::from_keywords(&declaration.modifiers);
    Method {
        traits: member_traits(&modifiers),
        is_abstract: modifiers.is_abstract,
        is_async: modifiers.is_async,
        name: declaration.name.clone(),
        return_type: format_type(declaration.return_type.as_ref()),
        parameters: declaration
            .parameters
            .iter()
            .map(|p| Parameter::new(p.name.clone(), format_type(p.type_ref.as_ref())))
            .collect(),
        type_parameters: declaration
            .type_parameters
            .iter()
            .map(build_type_parameter)
            .collect(),
    }
}

fn build_type_parameter(declaration: &TypeParameterDeclaration) -> TypeParameter {
    TypeParameter {
        name: declaration.name.clone(),
        constraints: declaration.constraints.clone(),
    }
}
