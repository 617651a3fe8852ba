//! Core error types for diagram generation
//!
//! This module defines the error taxonomy shared by the analysis pipeline
//! and the diagram synthesizer.

use std::path::PathBuf;

use thiserror::Error;

/// Core error types for diagram generation
#[derive(Error, Debug)]
pub enum DiagramError {
    /// A required argument was absent. Never recovered.
    #[error("Invalid argument: `{name}` must be provided")]
    InvalidArgument { name: &'static str },

    /// The one-time source front end setup failed.
    #[error("Front end initialization failed: {message}")]
    FrontendInit { message: String },

    #[error("Failed to load project {}: {message}", path.display())]
    ProjectLoad { path: PathBuf, message: String },

    #[error("Failed to extract classes from {}: {message}", path.display())]
    Extraction { path: PathBuf, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new invalid-argument error for the named parameter
    pub fn invalid_argument(name: &'static str) -> Self {
        Self::InvalidArgument { name }
    }

    /// Create a new front end initialization error
    pub fn frontend_init(message: impl Into<String>) -> Self {
        Self::FrontendInit {
            message: message.into(),
        }
    }

    /// Create a new project load error
    pub fn project_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ProjectLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new extraction error
    pub fn extraction(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Extraction {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_names_parameter() {
        let error = DiagramError::invalid_argument("dependencies");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Invalid argument"));
        assert!(error_msg.contains("dependencies"));
    }

    #[test]
    fn test_frontend_init_error() {
        let error = DiagramError::frontend_init("grammar version mismatch");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Front end initialization failed"));
        assert!(error_msg.contains("grammar version mismatch"));
    }

    #[test]
    fn test_project_load_error() {
        let error = DiagramError::project_load("/src/App/App.csproj", "not found");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("App.csproj"));
        assert!(error_msg.contains("not found"));
    }

    #[test]
    fn test_extraction_error() {
        let error = DiagramError::extraction("Service.cs", "unreadable");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Failed to extract classes"));
        assert!(error_msg.contains("Service.cs"));
    }

    #[test]
    fn test_io_error_conversion() {
        use std::io;
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: DiagramError = io_err.into();
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("IO error"));
        assert!(error_msg.contains("File not found"));
    }
}
