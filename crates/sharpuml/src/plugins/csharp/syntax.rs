//! C# syntax walker
//!
//! Walks a tree-sitter C# syntax tree and produces [`ClassDeclaration`]s.
//! Type references are resolved against a [`TypeIndex`] of the types
//! declared in the same project; anything else stays unresolved by kind.

use std::collections::HashMap;

use once_cell::sync::OnceCell;
use tree_sitter::{Language, Node, Parser, Tree};

use crate::core::{
    simple_name, ClassDeclaration, DiagramError, FieldDeclaration, MethodDeclaration,
    NamedType, ParameterDeclaration, PropertyDeclaration, SpecialType, TypeKind,
    TypeParameterDeclaration, TypeRef,
};

static LANGUAGE: OnceCell<Language> = OnceCell::new();

/// The C# grammar, loaded and checked once per process
pub fn language() -> Result<&'static Language, DiagramError> {
    LANGUAGE.get_or_try_init(|| {
        let language: Language = tree_sitter_c_sharp::LANGUAGE.into();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| DiagramError::frontend_init(e.to_string()))?;
        Ok(language)
    })
}

/// Parse C# source; `None` when the parser gives up
pub fn parse(language: &Language, source: &str) -> Option<Tree> {
    let mut parser = Parser::new();
    parser.set_language(language).ok()?;
    parser.parse(source, None)
}

/// What the project itself declares, keyed by simple type name
#[derive(Debug, Clone, Default)]
pub struct TypeIndex {
    types: HashMap<String, DeclaredType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DeclaredType {
    kind: TypeKind,
    is_sealed: bool,
}

impl TypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every type declared in a parsed file
    pub fn add_tree(&mut self, tree: &Tree, source: &str) {
        self.collect(tree.root_node(), source);
    }

    pub fn insert(&mut self, name: impl Into<String>, kind: TypeKind, is_sealed: bool) {
        self.types
            .entry(name.into())
            .or_insert(DeclaredType { kind, is_sealed });
    }

    pub fn kind_of(&self, name: &str) -> Option<TypeKind> {
        self.types.get(simple_name(name)).map(|t| t.kind)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn resolve(&self, name: &str) -> NamedType {
        let mut named = NamedType::new(name);
        if let Some(declared) = self.types.get(simple_name(name)) {
            named.kind = declared.kind;
            named.is_sealed = declared.is_sealed;
        }
        named
    }

    fn collect(&mut self, node: Node<'_>, source: &str) {
        let kind = match node.kind() {
            "class_declaration" => Some(TypeKind::Class),
            "record_declaration" if has_keyword(node, "struct") => Some(TypeKind::RecordStruct),
            "record_declaration" => Some(TypeKind::Record),
            "record_struct_declaration" => Some(TypeKind::RecordStruct),
            "struct_declaration" => Some(TypeKind::Struct),
            "interface_declaration" => Some(TypeKind::Interface),
            "enum_declaration" => Some(TypeKind::Enum),
            _ => None,
        };
        if let Some(kind) = kind {
            if let Some(name) = field_text(node, "name", source) {
                let is_sealed = modifiers(node, source).iter().any(|m| m == "sealed");
                self.insert(name, kind, is_sealed);
            }
        }

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.collect(child, source);
        }
    }
}

/// Extract the top-level class declarations of a file
pub fn class_declarations(tree: &Tree, source: &str, index: &TypeIndex) -> Vec<ClassDeclaration> {
    let walker = Walker { source, index };
    let mut declarations = Vec::new();
    walker.walk_container(tree.root_node(), "", &mut declarations);
    declarations
}

struct Walker<'a> {
    source: &'a str,
    index: &'a TypeIndex,
}

impl Walker<'_> {
    /// Walk a compilation unit, namespace body or declaration list
    fn walk_container(&self, node: Node<'_>, namespace: &str, out: &mut Vec<ClassDeclaration>) {
        // A file-scoped namespace applies to every declaration after it.
        let mut current = namespace.to_string();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "file_scoped_namespace_declaration" => {
                    if let Some(name) = field_text(child, "name", self.source) {
                        current = join_namespace(namespace, &name);
                    }
                    self.walk_container(child, &current, out);
                }
                "namespace_declaration" => {
                    let inner = match field_text(child, "name", self.source) {
                        Some(name) => join_namespace(&current, &name),
                        None => current.clone(),
                    };
                    if let Some(body) = child.child_by_field_name("body") {
                        self.walk_container(body, &inner, out);
                    }
                }
                "declaration_list" => self.walk_container(child, &current, out),
                kind if is_class_like(child, kind) => out.push(self.class(child, &current)),
                _ => {}
            }
        }
    }

    fn class(&self, node: Node<'_>, namespace: &str) -> ClassDeclaration {
        let Some(name) = field_text(node, "name", self.source) else {
            return ClassDeclaration::unresolved(namespace);
        };

        let mut declaration = ClassDeclaration::new(name, namespace);
        declaration.modifiers = modifiers(node, self.source);
        declaration.is_record = node.kind() == "record_declaration";

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "type_parameter_list" => {
                    declaration.type_parameters = self.type_parameters(child);
                }
                "base_list" => self.base_list(child, &mut declaration),
                "type_parameter_constraints_clause" => {
                    apply_constraints(
                        &mut declaration.type_parameters,
                        node_text(child, self.source),
                    );
                }
                "declaration_list" => self.members(child, &mut declaration),
                _ => {}
            }
        }

        declaration
    }

    fn members(&self, body: Node<'_>, declaration: &mut ClassDeclaration) {
        let mut cursor = body.walk();
        for child in body.named_children(&mut cursor) {
            match child.kind() {
                "field_declaration" => declaration.fields.push(self.field(child)),
                "property_declaration" => {
                    if let Some(property) = self.property(child) {
                        declaration.properties.push(property);
                    }
                }
                "method_declaration" => {
                    if let Some(method) = self.method(child) {
                        declaration.methods.push(method);
                    }
                }
                kind if is_class_like(child, kind) => {
                    let nested = self.class(child, &declaration.namespace);
                    declaration.nested.push(nested);
                }
                _ => {}
            }
        }
    }

    /// Split the base list into a base class and interfaces.
    ///
    /// Project-local types are classified by their declared kind. Unknown
    /// names follow the `IName` convention for interfaces; otherwise only the
    /// first entry can be a base class.
    fn base_list(&self, node: Node<'_>, declaration: &mut ClassDeclaration) {
        let mut cursor = node.walk();
        for (position, child) in node.named_children(&mut cursor).enumerate() {
            let type_node = match child.kind() {
                "argument_list" => continue,
                "primary_constructor_base_type" => child.child_by_field_name("type").unwrap_or(child),
                _ => child,
            };
            let written = node_text(type_node, self.source);
            if written.is_empty() {
                continue;
            }
            declaration.base_list.push(written.to_string());

            let type_ref = self.type_ref(type_node);
            let is_interface = match self.index.kind_of(written) {
                Some(TypeKind::Interface) => true,
                Some(_) => false,
                None => position > 0 || looks_like_interface(simple_name(written)),
            };
            if is_interface || declaration.base_type.is_some() {
                declaration.interfaces.push(type_ref);
            } else {
                declaration.base_type = Some(type_ref);
            }
        }
    }

    fn field(&self, node: Node<'_>) -> FieldDeclaration {
        let mut field = FieldDeclaration {
            modifiers: modifiers(node, self.source),
            ..FieldDeclaration::default()
        };
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() != "variable_declaration" {
                continue;
            }
            field.type_ref = child.child_by_field_name("type").map(|t| self.type_ref(t));
            let mut inner = child.walk();
            for declarator in child.named_children(&mut inner) {
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                if let Some(name) = field_text(declarator, "name", self.source) {
                    field.names.push(name);
                }
            }
        }
        field
    }

    fn property(&self, node: Node<'_>) -> Option<PropertyDeclaration> {
        let name = field_text(node, "name", self.source)?;
        let mut property = PropertyDeclaration {
            modifiers: modifiers(node, self.source),
            name,
            type_ref: node.child_by_field_name("type").map(|t| self.type_ref(t)),
            ..PropertyDeclaration::default()
        };

        let accessors = node.child_by_field_name("accessors").or_else(|| {
            let mut cursor = node.walk();
            let list = node
                .named_children(&mut cursor)
                .find(|c| c.kind() == "accessor_list");
            list
        });
        match accessors {
            Some(list) => {
                let mut cursor = list.walk();
                for accessor in list.named_children(&mut cursor) {
                    match accessor_keyword(accessor) {
                        Some("get") => property.has_getter = true,
                        Some("set") => property.has_setter = true,
                        Some("init") => property.has_init = true,
                        _ => {}
                    }
                }
            }
            // Expression-bodied: `public int Total => a + b;`
            None => property.has_getter = true,
        }
        Some(property)
    }

    fn method(&self, node: Node<'_>) -> Option<MethodDeclaration> {
        let name = field_text(node, "name", self.source)?;
        let mut method = MethodDeclaration {
            modifiers: modifiers(node, self.source),
            name,
            return_type: node
                .child_by_field_name("returns")
                .or_else(|| node.child_by_field_name("type"))
                .map(|t| self.type_ref(t)),
            ..MethodDeclaration::default()
        };

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "type_parameter_list" => method.type_parameters = self.type_parameters(child),
                "parameter_list" => method.parameters = self.parameters(child),
                "type_parameter_constraints_clause" => {
                    apply_constraints(&mut method.type_parameters, node_text(child, self.source));
                }
                _ => {}
            }
        }
        Some(method)
    }

    fn parameters(&self, list: Node<'_>) -> Vec<ParameterDeclaration> {
        let mut parameters = Vec::new();
        let mut cursor = list.walk();
        for child in list.named_children(&mut cursor) {
            if child.kind() != "parameter" {
                continue;
            }
            let Some(name) = field_text(child, "name", self.source) else {
                continue;
            };
            parameters.push(ParameterDeclaration {
                name,
                type_ref: child.child_by_field_name("type").map(|t| self.type_ref(t)),
            });
        }
        parameters
    }

    fn type_parameters(&self, list: Node<'_>) -> Vec<TypeParameterDeclaration> {
        let mut type_parameters = Vec::new();
        let mut cursor = list.walk();
        for child in list.named_children(&mut cursor) {
            if child.kind() != "type_parameter" {
                continue;
            }
            let name = field_text(child, "name", self.source).or_else(|| {
                let mut inner = child.walk();
                let identifier = child
                    .named_children(&mut inner)
                    .find(|c| c.kind() == "identifier")
                    .map(|c| node_text(c, self.source).to_string());
                identifier
            });
            if let Some(name) = name {
                type_parameters.push(TypeParameterDeclaration::new(name));
            }
        }
        type_parameters
    }

    /// Convert a type node into a [`TypeRef`]
    fn type_ref(&self, node: Node<'_>) -> TypeRef {
        let text = node_text(node, self.source);
        match node.kind() {
            "predefined_type" => SpecialType::from_keyword(text)
                .map(TypeRef::Special)
                .unwrap_or_else(|| TypeRef::source(text)),
            "identifier" => TypeRef::Named(self.index.resolve(text)),
            "generic_name" => {
                let mut cursor = node.walk();
                let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
                let Some(identifier) = children.iter().find(|c| c.kind() == "identifier") else {
                    return TypeRef::source(text);
                };
                let mut named = self.index.resolve(node_text(*identifier, self.source));
                if let Some(arguments) = children.iter().find(|c| c.kind() == "type_argument_list") {
                    let mut inner = arguments.walk();
                    for argument in arguments.named_children(&mut inner) {
                        named.arguments.push(self.type_ref(argument));
                    }
                }
                TypeRef::Named(named)
            }
            "qualified_name" | "alias_qualified_name" => match node.child_by_field_name("name") {
                Some(name) if name.kind() == "generic_name" => self.type_ref(name),
                _ => TypeRef::Named(self.index.resolve(text)),
            },
            "nullable_type" => match first_type_child(node) {
                Some(inner) => TypeRef::nullable(self.type_ref(inner)),
                None => TypeRef::source(text),
            },
            "array_type" => match first_type_child(node) {
                Some(element) => TypeRef::array(self.type_ref(element)),
                None => TypeRef::source(text),
            },
            _ => TypeRef::source(text),
        }
    }
}

fn first_type_child(node: Node<'_>) -> Option<Node<'_>> {
    node.child_by_field_name("type").or_else(|| {
        let mut cursor = node.walk();
        let first = node.named_children(&mut cursor).next();
        first
    })
}

/// Classes and record classes; record structs are value types, not classes
fn is_class_like(node: Node<'_>, kind: &str) -> bool {
    match kind {
        "class_declaration" => true,
        "record_declaration" => !has_keyword(node, "struct"),
        _ => false,
    }
}

fn has_keyword(node: Node<'_>, keyword: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .take_while(|c| c.kind() != "declaration_list")
        .any(|c| c.kind() == keyword);
    found
}

fn modifiers(node: Node<'_>, source: &str) -> Vec<String> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| c.kind() == "modifier")
        .map(|c| node_text(c, source).to_string())
        .collect()
}

fn accessor_keyword(accessor: Node<'_>) -> Option<&'static str> {
    if accessor.kind() != "accessor_declaration" {
        return None;
    }
    let mut cursor = accessor.walk();
    let keyword = accessor
        .children(&mut cursor)
        .find_map(|c| match c.kind() {
            "get" => Some("get"),
            "set" => Some("set"),
            "init" => Some("init"),
            _ => None,
        });
    keyword
}

/// Apply `where T : class, new()` to the matching type parameter
fn apply_constraints(type_parameters: &mut [TypeParameterDeclaration], clause: &str) {
    let Some((target, constraints)) = parse_constraint_clause(clause) else {
        return;
    };
    if let Some(parameter) = type_parameters.iter_mut().find(|p| p.name == target) {
        parameter.constraints.extend(constraints);
    }
}

fn parse_constraint_clause(clause: &str) -> Option<(String, Vec<String>)> {
    let body = clause.trim().strip_prefix("where")?;
    let (target, constraints) = body.split_once(':')?;
    let target = target.trim();
    if target.is_empty() {
        return None;
    }
    Some((target.to_string(), split_top_level(constraints)))
}

/// Split on commas that are not inside `<>` or `()`
fn split_top_level(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in text.chars() {
        match c {
            '<' | '(' => depth += 1,
            '>' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                push_part(&mut parts, &current);
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    push_part(&mut parts, &current);
    parts
}

fn push_part(parts: &mut Vec<String>, part: &str) {
    let part = part.trim();
    if !part.is_empty() {
        parts.push(part.to_string());
    }
}

fn looks_like_interface(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('I'), Some(second)) if second.is_ascii_uppercase()
    )
}

fn join_namespace(outer: &str, inner: &str) -> String {
    let inner: String = inner.split_whitespace().collect();
    if outer.is_empty() {
        inner
    } else {
        format!("{}.{}", outer, inner)
    }
}

fn field_text(node: Node<'_>, field: &str, source: &str) -> Option<String> {
    node.child_by_field_name(field)
        .map(|n| node_text(n, source).to_string())
        .filter(|text| !text.is_empty())
}

fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source
        .get(node.start_byte()..node.end_byte())
        .unwrap_or("")
        .trim()
}
