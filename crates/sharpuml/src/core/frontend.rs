//! Seams to the source front end and the project reader
//!
//! The aggregator only talks to these traits; [`crate::plugins::csharp`]
//! provides the bundled implementations.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::error::DiagramError;
use super::model::ClassDescriptor;

/// Cooperative cancellation flag shared between a driver and the pipeline
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// An opened project as seen by the reader
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectHandle {
    pub name: String,
    pub path: PathBuf,
    pub target_framework: String,
    pub package_references: Vec<String>,
    pub project_references: Vec<String>,
    pub source_files: Vec<PathBuf>,
}

impl ProjectHandle {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            ..Self::default()
        }
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

    pub fn with_source_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.source_files.push(file.into());
        self
    }
}

/// Discovers projects and their references
pub trait ProjectReader {
    /// Absolute paths of every project in the solution
    fn list_project_files(&self, solution: &Path) -> Result<Vec<PathBuf>, DiagramError>;

    /// Open a project; `None` when it cannot be loaded
    fn open_project(&self, path: &Path) -> Option<ProjectHandle>;

    /// Names of the projects this project depends on
    fn project_references(&self, project: &ProjectHandle) -> Vec<String>;
}

/// Extracts class descriptors from a project's sources.
///
/// Implementations recover from per-file failures and return what they could
/// extract; an `Err` means the project as a whole could not be processed.
pub trait ClassExtractor {
    fn extract_classes(
        &self,
        project: &ProjectHandle,
        cancellation: &CancellationToken,
    ) -> Result<Vec<ClassDescriptor>, DiagramError>;
}
