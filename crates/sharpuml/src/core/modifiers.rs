//! Access modifier normalization
//!
//! Maps the raw modifier keywords attached to a declaration onto a single
//! [`Visibility`] and a set of independent trait flags.

use serde::{Deserialize, Serialize};

/// Visibility of a type or member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Visibility {
    Public,            // +
    #[default]
    Private,           // -
    Protected,         // #
    Internal,          // ~
    ProtectedInternal, // #
    PrivateProtected,  // -#
}

impl Visibility {
    /// Resolve the visibility of a declaration from its modifier keywords.
    ///
    /// First match wins: `public`, `private protected`, `protected internal`,
    /// `protected`, `internal`, `private`. No access keyword means private.
    pub fn from_modifiers<S: AsRef<str>>(modifiers: &[S]) -> Self {
        let has = |keyword: &str| modifiers.iter().any(|m| m.as_ref() == keyword);

        let public = has("public");
        let private = has("private");
        let protected = has("protected");
        let internal = has("internal");

        if public {
            Visibility::Public
        } else if private && protected {
            Visibility::PrivateProtected
        } else if protected && internal {
            Visibility::ProtectedInternal
        } else if protected {
            Visibility::Protected
        } else if internal {
            Visibility::Internal
        } else {
            Visibility::Private
        }
    }

    /// PlantUML member visibility marker
    pub fn symbol(self) -> &'static str {
        match self {
            Visibility::Public => "+",
            Visibility::Private => "-",
            Visibility::Protected => "#",
            Visibility::Internal => "~",
            Visibility::ProtectedInternal => "#",
            Visibility::PrivateProtected => "-#",
        }
    }
}

/// Normalized modifier set of a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_virtual: bool,
    pub is_override: bool,
    pub is_abstract: bool,
    pub is_sealed: bool,
    pub is_async: bool,
    pub is_readonly: bool,
    pub is_const: bool,
    pub is_record: bool,
}

impl Modifiers {
    /// Build the modifier set from raw keywords; unknown keywords are ignored.
    pub fn from_keywords<S: AsRef<str>>(keywords: &[S]) -> Self {
        let mut modifiers = Self {
            visibility: Visibility::from_modifiers(keywords),
            ..Self::default()
        };

        for keyword in keywords {
            match keyword.as_ref() {
                "static" => modifiers.is_static = true,
                "virtual" => modifiers.is_virtual = true,
                "override" => modifiers.is_override = true,
                "abstract" => modifiers.is_abstract = true,
                "sealed" => modifiers.is_sealed = true,
                "async" => modifiers.is_async = true,
                "readonly" => modifiers.is_readonly = true,
                "const" => modifiers.is_const = true,
                "record" => modifiers.is_record = true,
                _ => {}
            }
        }

        modifiers
    }
}
