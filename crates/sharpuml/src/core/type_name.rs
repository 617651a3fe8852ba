//! Type references and their canonical display names
//!
//! A [`TypeRef`] is what the front end knows about a type mentioned in a
//! declaration. [`format_type`] turns it into the short name shown in the
//! diagram; it is pure and never fails.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Built-in types with a fixed short alias
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialType {
    Void,
    Boolean,
    Int32,
    Int64,
    String,
    Object,
    Single,
    Double,
    Decimal,
    Byte,
    Char,
}

impl SpecialType {
    /// The short alias used in diagrams
    pub fn alias(self) -> &'static str {
        match self {
            SpecialType::Void => "void",
            SpecialType::Boolean => "bool",
            SpecialType::Int32 => "int",
            SpecialType::Int64 => "long",
            SpecialType::String => "string",
            SpecialType::Object => "object",
            SpecialType::Single => "float",
            SpecialType::Double => "double",
            SpecialType::Decimal => "decimal",
            SpecialType::Byte => "byte",
            SpecialType::Char => "char",
        }
    }

    /// Look up a language keyword such as `int` or `string`
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let special = match keyword {
            "void" => SpecialType::Void,
            "bool" => SpecialType::Boolean,
            "int" => SpecialType::Int32,
            "long" => SpecialType::Int64,
            "string" => SpecialType::String,
            "object" => SpecialType::Object,
            "float" => SpecialType::Single,
            "double" => SpecialType::Double,
            "decimal" => SpecialType::Decimal,
            "byte" => SpecialType::Byte,
            "char" => SpecialType::Char,
            _ => return None,
        };
        Some(special)
    }

    /// Look up a runtime type name, qualified or not (`Int32`, `System.Int32`)
    pub fn from_clr_name(name: &str) -> Option<Self> {
        let simple = name.strip_prefix("System.").unwrap_or(name);
        let special = match simple {
            "Void" => SpecialType::Void,
            "Boolean" => SpecialType::Boolean,
            "Int32" => SpecialType::Int32,
            "Int64" => SpecialType::Int64,
            "String" => SpecialType::String,
            "Object" => SpecialType::Object,
            "Single" => SpecialType::Single,
            "Double" => SpecialType::Double,
            "Decimal" => SpecialType::Decimal,
            "Byte" => SpecialType::Byte,
            "Char" => SpecialType::Char,
            _ => return None,
        };
        Some(special)
    }

    /// Whether values of this type are copied rather than referenced
    pub fn is_value_type(self) -> bool {
        !matches!(self, SpecialType::String | SpecialType::Object)
    }
}

/// What kind of declaration a named type resolved to, if known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TypeKind {
    #[default]
    Unknown,
    Class,
    Interface,
    Struct,
    Enum,
    Record,
    RecordStruct,
}

/// A named (possibly generic, possibly qualified) type
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NamedType {
    /// Name as written, may be namespace-qualified
    pub name: String,
    pub arguments: Vec<TypeRef>,
    pub kind: TypeKind,
    pub is_sealed: bool,
}

impl NamedType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_argument(mut self, argument: TypeRef) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn with_kind(mut self, kind: TypeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn sealed(mut self) -> Self {
        self.is_sealed = true;
        self
    }

    /// Unqualified name without generic arguments
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }
}

/// A reference to a type as seen by the front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeRef {
    Special(SpecialType),
    Named(NamedType),
    Array(Box<TypeRef>),
    Nullable(Box<TypeRef>),
    /// Raw source text, used when no structure could be recovered
    Source(String),
}

impl TypeRef {
    pub fn special(special: SpecialType) -> Self {
        TypeRef::Special(special)
    }

    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(NamedType::new(name))
    }

    pub fn generic(name: impl Into<String>, arguments: Vec<TypeRef>) -> Self {
        TypeRef::Named(NamedType {
            arguments,
            ..NamedType::new(name)
        })
    }

    pub fn array(element: TypeRef) -> Self {
        TypeRef::Array(Box::new(element))
    }

    pub fn nullable(inner: TypeRef) -> Self {
        TypeRef::Nullable(Box::new(inner))
    }

    pub fn source(text: impl Into<String>) -> Self {
        TypeRef::Source(text.into())
    }

    /// Value semantics: built-in value types, structs, enums and the
    /// well-known framework value types.
    pub fn is_value_type(&self) -> bool {
        match self {
            TypeRef::Special(special) => special.is_value_type(),
            TypeRef::Named(named) => {
                matches!(
                    named.kind,
                    TypeKind::Struct | TypeKind::Enum | TypeKind::RecordStruct
                ) || is_framework_value_type(named.simple_name())
            }
            TypeRef::Nullable(inner) => inner.is_value_type(),
            TypeRef::Array(_) | TypeRef::Source(_) => false,
        }
    }

    pub fn is_sealed(&self) -> bool {
        match self {
            TypeRef::Named(named) => named.is_sealed,
            TypeRef::Special(SpecialType::String) => true,
            TypeRef::Nullable(inner) => inner.is_sealed(),
            _ => false,
        }
    }

    pub fn is_record(&self) -> bool {
        match self {
            TypeRef::Named(named) => {
                matches!(named.kind, TypeKind::Record | TypeKind::RecordStruct)
            }
            TypeRef::Nullable(inner) => inner.is_record(),
            _ => false,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Special(special) => f.write_str(special.alias()),
            TypeRef::Named(named) => {
                if named.arguments.is_empty() {
                    if let Some(special) = SpecialType::from_clr_name(&named.name) {
                        return f.write_str(special.alias());
                    }
                    return f.write_str(&normalized_name(&named.name));
                }
                write!(f, "{}<", named.simple_name())?;
                for (i, argument) in named.arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                f.write_str(">")
            }
            TypeRef::Array(element) => write!(f, "{}[]", element),
            TypeRef::Nullable(inner) => write!(f, "{}?", inner),
            TypeRef::Source(text) => f.write_str(text.trim()),
        }
    }
}

/// Canonical display name of a type reference; `None` formats as `""`.
pub fn format_type(type_ref: Option<&TypeRef>) -> String {
    type_ref.map(ToString::to_string).unwrap_or_default()
}

/// Strip namespace qualification and generic arguments: `System.Collections.Generic.List<int>` → `List`
pub fn simple_name(name: &str) -> &str {
    let without_args = match name.find('<') {
        Some(idx) => &name[..idx],
        None => name,
    };
    let without_alias = without_args
        .rsplit("::")
        .next()
        .unwrap_or(without_args);
    without_alias
        .rsplit('.')
        .next()
        .unwrap_or(without_alias)
        .trim()
}

/// Any language keyword that names a built-in type, aliased or not
pub fn is_builtin_keyword(text: &str) -> bool {
    SpecialType::from_keyword(text).is_some()
        || matches!(
            text,
            "sbyte" | "short" | "ushort" | "uint" | "ulong" | "nint" | "nuint" | "dynamic"
        )
}

fn is_framework_value_type(name: &str) -> bool {
    matches!(name, "DateTime" | "DateTimeOffset" | "TimeSpan" | "Guid")
}

fn normalized_name(name: &str) -> String {
    let simple = simple_name(name);
    match simple.to_ascii_lowercase().as_str() {
        "datetime" => "DateTime".to_string(),
        "datetimeoffset" => "DateTimeOffset".to_string(),
        "timespan" => "TimeSpan".to_string(),
        "guid" => "Guid".to_string(),
        _ => simple.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_aliases() {
        assert_eq!(format_type(Some(&TypeRef::special(SpecialType::Boolean))), "bool");
        assert_eq!(format_type(Some(&TypeRef::special(SpecialType::Int32))), "int");
        assert_eq!(format_type(Some(&TypeRef::special(SpecialType::Int64))), "long");
        assert_eq!(format_type(Some(&TypeRef::special(SpecialType::Single))), "float");
        assert_eq!(format_type(Some(&TypeRef::special(SpecialType::Void))), "void");
    }

    #[test]
    fn test_clr_names_map_to_aliases() {
        assert_eq!(format_type(Some(&TypeRef::named("System.Int32"))), "int");
        assert_eq!(format_type(Some(&TypeRef::named("String"))), "string");
        assert_eq!(format_type(Some(&TypeRef::named("System.Object"))), "object");
    }

    #[test]
    fn test_namespace_is_stripped() {
        assert_eq!(
            format_type(Some(&TypeRef::named("MyApp.Domain.Customer"))),
            "Customer"
        );
        assert_eq!(format_type(Some(&TypeRef::named("global::Foo.Bar"))), "Bar");
    }

    #[test]
    fn test_framework_value_types_keep_casing() {
        assert_eq!(format_type(Some(&TypeRef::named("System.DateTime"))), "DateTime");
        assert_eq!(format_type(Some(&TypeRef::named("System.Guid"))), "Guid");
        assert_eq!(format_type(Some(&TypeRef::named("TimeSpan"))), "TimeSpan");
    }

    #[test]
    fn test_nested_generics() {
        let inner = TypeRef::generic(
            "List",
            vec![TypeRef::special(SpecialType::String)],
        );
        let outer = TypeRef::generic(
            "System.Collections.Generic.Dictionary",
            vec![TypeRef::special(SpecialType::Int32), inner],
        );
        assert_eq!(format_type(Some(&outer)), "Dictionary<int, List<string>>");
    }

    #[test]
    fn test_arrays_and_nullables() {
        let array = TypeRef::array(TypeRef::named("Order"));
        assert_eq!(format_type(Some(&array)), "Order[]");
        let nullable = TypeRef::nullable(TypeRef::special(SpecialType::Int32));
        assert_eq!(format_type(Some(&nullable)), "int?");
    }

    #[test]
    fn test_missing_type_is_empty() {
        assert_eq!(format_type(None), "");
    }

    #[test]
    fn test_source_fallback_is_verbatim() {
        assert_eq!(
            format_type(Some(&TypeRef::source(" (int, string) "))),
            "(int, string)"
        );
    }

    #[test]
    fn test_value_type_detection() {
        assert!(TypeRef::special(SpecialType::Int32).is_value_type());
        assert!(!TypeRef::special(SpecialType::String).is_value_type());
        assert!(TypeRef::named("Guid").is_value_type());
        assert!(TypeRef::Named(NamedType::new("Point").with_kind(TypeKind::Struct)).is_value_type());
        assert!(!TypeRef::named("Customer").is_value_type());
    }

    #[test]
    fn test_builtin_keywords() {
        assert!(is_builtin_keyword("int"));
        assert!(is_builtin_keyword("ushort"));
        assert!(!is_builtin_keyword("Order"));
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(simple_name("System.Collections.Generic.List<int>"), "List");
        assert_eq!(simple_name("Order"), "Order");
    }
}
