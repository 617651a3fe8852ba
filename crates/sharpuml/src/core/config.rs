//! TOML configuration
//!
//! ```toml
//! [classifier]
//! include_builtin_types = false
//! method_dependencies = true
//!
//! [[classifier.rules]]
//! matcher = { exact_or_suffix = ["Component", "Element"] }
//! kind = "composition"
//!
//! [[classifier.rules]]
//! matcher = "any"
//! kind = "aggregation"
//! ```
//!
//! Omitted keys fall back to [`ClassifierConfig::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::classifier::ClassifierConfig;
use super::error::DiagramError;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub classifier: ClassifierConfig,
}

impl Config {
    pub fn from_toml_str(input: &str) -> Result<Self, DiagramError> {
        toml::from_str(input).map_err(|e| DiagramError::config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, DiagramError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            DiagramError::Config { message } => {
                DiagramError::config(format!("{}: {}", path.display(), message))
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::{ClassificationRule, TypeMatcher};
    use crate::core::model::RelationshipKind;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_custom_rules() {
        let config = Config::from_toml_str(
            r#"
[classifier]
method_dependencies = true

[[classifier.rules]]
matcher = { suffix = ["Service"] }
kind = "aggregation"

[[classifier.rules]]
matcher = "any"
kind = "composition"
"#,
        )
        .unwrap();

        assert!(config.classifier.method_dependencies);
        assert!(config.classifier.include_builtin_types);
        assert_eq!(
            config.classifier.rules,
            vec![
                ClassificationRule::new(
                    TypeMatcher::Suffix(vec!["Service".to_string()]),
                    RelationshipKind::Aggregation
                ),
                ClassificationRule::new(TypeMatcher::Any, RelationshipKind::Composition),
            ]
        );
        assert_eq!(
            config.classifier.containers,
            ClassifierConfig::default().containers
        );
    }

    #[test]
    fn test_invalid_kind_is_config_error() {
        let error = Config::from_toml_str(
            r#"
[[classifier.rules]]
matcher = "any"
kind = "friendship"
"#,
        )
        .unwrap_err();
        assert!(format!("{}", error).contains("Configuration error"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.toml");
        std::fs::write(&path, "[classifier]\ninclude_builtin_types = false\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert!(!config.classifier.include_builtin_types);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let error = Config::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(error, DiagramError::Io { .. }));
    }
}
