//! Relationship classification
//!
//! Assigns exactly one [`RelationshipKind`] to every type a class refers to.
//! Structural relationships (base class, interfaces) come first; member
//! types are then run through an ordered list of [`ClassificationRule`]s.
//! The first classification of a target name wins.

use std::borrow::Cow;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::model::{Relationship, RelationshipKind};
use super::type_name::{is_builtin_keyword, simple_name, SpecialType, TypeRef};

/// Predicate over a member type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeMatcher {
    /// Target name equals one of the names
    Exact(Vec<String>),
    /// Target name ends with one of the patterns
    Suffix(Vec<String>),
    /// Target name equals or ends with one of the patterns
    ExactOrSuffix(Vec<String>),
    ValueType,
    Sealed,
    Record,
    /// The member cannot be reassigned after construction
    ReadOnly,
    Any,
}

impl TypeMatcher {
    fn matches(&self, candidate: &MemberCandidate<'_>) -> bool {
        let name = candidate.target_name.as_str();
        match self {
            TypeMatcher::Exact(names) => names.iter().any(|n| n == name),
            TypeMatcher::Suffix(patterns) => patterns
                .iter()
                .any(|p| name.len() > p.len() && name.ends_with(p.as_str())),
            TypeMatcher::ExactOrSuffix(patterns) => {
                patterns.iter().any(|p| name.ends_with(p.as_str()))
            }
            TypeMatcher::ValueType => candidate.element.is_value_type(),
            TypeMatcher::Sealed => candidate.element.is_sealed(),
            TypeMatcher::Record => candidate.element.is_record(),
            TypeMatcher::ReadOnly => candidate.is_read_only,
            TypeMatcher::Any => true,
        }
    }
}

/// One step of the member classification policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub matcher: TypeMatcher,
    pub kind: RelationshipKind,
}

impl ClassificationRule {
    pub fn new(matcher: TypeMatcher, kind: RelationshipKind) -> Self {
        Self { matcher, kind }
    }
}

/// Classification policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Ordered member rules, first match wins
    pub rules: Vec<ClassificationRule>,
    /// Generic containers whose last type argument is the related type
    pub containers: Vec<String>,
    /// Relate to built-in types such as `int` and `string`
    pub include_builtin_types: bool,
    /// Relate to method parameter and return types as `Dependency`
    pub method_dependencies: bool,
}

impl ClassifierConfig {
    /// The standard rule order, parameterized by the two name lists
    pub fn rules_with(owned_components: &[&str], referenced_services: &[&str]) -> Vec<ClassificationRule> {
        let owned = owned_components.iter().map(|s| s.to_string()).collect();
        let services = referenced_services.iter().map(|s| s.to_string()).collect();
        vec![
            ClassificationRule::new(TypeMatcher::ExactOrSuffix(owned), RelationshipKind::Composition),
            ClassificationRule::new(TypeMatcher::Exact(services), RelationshipKind::Aggregation),
            ClassificationRule::new(TypeMatcher::ValueType, RelationshipKind::Composition),
            ClassificationRule::new(TypeMatcher::Sealed, RelationshipKind::Composition),
            ClassificationRule::new(TypeMatcher::Record, RelationshipKind::Composition),
            ClassificationRule::new(TypeMatcher::ReadOnly, RelationshipKind::Composition),
            ClassificationRule::new(TypeMatcher::Any, RelationshipKind::Aggregation),
        ]
    }

    pub fn with_rules(mut self, rules: Vec<ClassificationRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn without_builtin_types(mut self) -> Self {
        self.include_builtin_types = false;
        self
    }

    pub fn with_method_dependencies(mut self) -> Self {
        self.method_dependencies = true;
        self
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            rules: Self::rules_with(&["Component", "Element"], &[]),
            containers: [
                "List",
                "IList",
                "IEnumerable",
                "ICollection",
                "IReadOnlyList",
                "IReadOnlyCollection",
                "Collection",
                "ObservableCollection",
                "HashSet",
                "ISet",
                "IReadOnlySet",
                "SortedSet",
                "LinkedList",
                "Queue",
                "Stack",
                "Dictionary",
                "IDictionary",
                "IReadOnlyDictionary",
                "SortedDictionary",
                "ConcurrentDictionary",
                "ConcurrentBag",
                "ConcurrentQueue",
                "ImmutableArray",
                "ImmutableList",
                "Lazy",
                "Task",
                "ValueTask",
                "Nullable",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            include_builtin_types: true,
            method_dependencies: false,
        }
    }
}

/// A typed field or property as seen by the classifier
#[derive(Debug, Clone, Copy)]
pub struct MemberType<'a> {
    pub type_ref: &'a TypeRef,
    pub is_read_only: bool,
}

impl<'a> MemberType<'a> {
    pub fn new(type_ref: &'a TypeRef, is_read_only: bool) -> Self {
        Self {
            type_ref,
            is_read_only,
        }
    }
}

/// Everything the classifier looks at for one class
#[derive(Debug, Clone, Default)]
pub struct ClassifierInput<'a> {
    pub base_type: Option<&'a TypeRef>,
    pub interfaces: Vec<&'a TypeRef>,
    /// Fields first, then properties, in declaration order
    pub members: Vec<MemberType<'a>>,
    /// Method parameter and return types, in declaration order
    pub signature_types: Vec<&'a TypeRef>,
}

struct MemberCandidate<'a> {
    target_name: String,
    element: Cow<'a, TypeRef>,
    is_read_only: bool,
}

/// Relationship classifier driven by a [`ClassifierConfig`]
#[derive(Debug, Clone, Default)]
pub struct RelationshipClassifier {
    config: ClassifierConfig,
}

impl RelationshipClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify every referenced type; at most one relationship per target name
    pub fn classify(&self, input: &ClassifierInput<'_>) -> Vec<Relationship> {
        let mut seen: IndexSet<String> = IndexSet::new();
        let mut relationships = Vec::new();
        let mut push = |name: String, kind: RelationshipKind| {
            if seen.insert(name.clone()) {
                trace!(target_type = %name, ?kind, "Classified relationship");
                relationships.push(Relationship::new(name, kind));
            }
        };

        if let Some(base) = input.base_type {
            let name = simple_name_of(base);
            if !name.is_empty() && !is_root_object(base, &name) {
                push(name, RelationshipKind::Inheritance);
            }
        }

        for interface in &input.interfaces {
            let name = simple_name_of(interface);
            if !name.is_empty() {
                push(name, RelationshipKind::Implementation);
            }
        }

        for member in &input.members {
            let Some(candidate) = self.candidate(member.type_ref, member.is_read_only) else {
                continue;
            };
            if let Some(kind) = self.member_kind(&candidate) {
                push(candidate.target_name, kind);
            }
        }

        if self.config.method_dependencies {
            for type_ref in &input.signature_types {
                if let Some(candidate) = self.candidate(type_ref, false) {
                    push(candidate.target_name, RelationshipKind::Dependency);
                }
            }
        }

        relationships
    }

    fn member_kind(&self, candidate: &MemberCandidate<'_>) -> Option<RelationshipKind> {
        self.config
            .rules
            .iter()
            .find(|rule| rule.matcher.matches(candidate))
            .map(|rule| rule.kind)
    }

    fn candidate<'a>(&self, type_ref: &'a TypeRef, is_read_only: bool) -> Option<MemberCandidate<'a>> {
        let element = self.element_type(type_ref);
        // `string` spelled as source text must match the rules like `string` the keyword
        let element = match builtin_of(element) {
            Some(special) => Cow::Owned(TypeRef::Special(special)),
            None => Cow::Borrowed(element),
        };
        let target_name = self.target_name(&element)?;
        Some(MemberCandidate {
            target_name,
            element,
            is_read_only,
        })
    }

    /// Unwrap arrays, nullables and configured containers down to the related type
    fn element_type<'a>(&self, type_ref: &'a TypeRef) -> &'a TypeRef {
        match type_ref {
            TypeRef::Array(element) | TypeRef::Nullable(element) => self.element_type(element),
            TypeRef::Named(named) => {
                let is_container = self
                    .config
                    .containers
                    .iter()
                    .any(|c| c == named.simple_name());
                match named.arguments.last() {
                    Some(last) if is_container => self.element_type(last),
                    _ => type_ref,
                }
            }
            _ => type_ref,
        }
    }

    fn target_name(&self, element: &TypeRef) -> Option<String> {
        let builtin = match element {
            TypeRef::Special(special) => Some(special.alias().to_string()),
            TypeRef::Source(text) if is_builtin_keyword(source_text(text)) => {
                Some(source_text(text).to_string())
            }
            _ => None,
        };
        if let Some(name) = builtin {
            return self.config.include_builtin_types.then_some(name);
        }

        let name = simple_name_of(element);
        (!name.is_empty()).then_some(name)
    }
}

/// The special type a reference denotes, however it was spelled
fn builtin_of(element: &TypeRef) -> Option<SpecialType> {
    match element {
        TypeRef::Special(special) => Some(*special),
        TypeRef::Named(named) if named.arguments.is_empty() => SpecialType::from_clr_name(&named.name),
        TypeRef::Source(text) => {
            let text = source_text(text);
            SpecialType::from_keyword(text).or_else(|| SpecialType::from_clr_name(text))
        }
        _ => None,
    }
}

fn source_text(text: &str) -> &str {
    text.trim().trim_end_matches('?').trim_end_matches("[]")
}

fn simple_name_of(type_ref: &TypeRef) -> String {
    match type_ref {
        TypeRef::Special(special) => special.alias().to_string(),
        TypeRef::Named(named) => named.simple_name().to_string(),
        TypeRef::Array(element) | TypeRef::Nullable(element) => simple_name_of(element),
        TypeRef::Source(text) => simple_name(source_text(text)).to_string(),
    }
}

fn is_root_object(type_ref: &TypeRef, name: &str) -> bool {
    matches!(type_ref, TypeRef::Special(SpecialType::Object)) || name == "object" || name == "Object"
}
