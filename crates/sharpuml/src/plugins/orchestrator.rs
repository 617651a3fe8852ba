//! Analysis pipeline orchestrator
//!
//! Coordinates the pipeline from a solution file to diagram text:
//! ProjectReader → ClassExtractor → ProjectDependency → PlantUmlRenderer

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info, span, warn, Level};

use crate::core::{
    CancellationToken, ClassExtractor, ClassifierConfig, DiagramError, ProjectDependency,
    ProjectReader,
};
use crate::plugins::csharp::{CSharpExtractor, SolutionReader};
use crate::plugins::plantuml::PlantUmlRenderer;

/// Pipeline orchestrator
///
/// Generic over the project reader and class extractor so either side can be
/// replaced; the defaults read C# solutions from disk.
pub struct Orchestrator<R = SolutionReader, E = CSharpExtractor> {
    reader: R,
    extractor: E,
    renderer: PlantUmlRenderer,
}

impl Orchestrator {
    /// Create an orchestrator with the bundled C# front end
    pub fn new() -> Self {
        Self::with_config(ClassifierConfig::default())
    }

    /// Create an orchestrator with the bundled C# front end and custom rules
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self::with_components(SolutionReader::new(), CSharpExtractor::with_config(config))
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ProjectReader, E: ClassExtractor> Orchestrator<R, E> {
    pub fn with_components(reader: R, extractor: E) -> Self {
        Self {
            reader,
            extractor,
            renderer: PlantUmlRenderer::new(),
        }
    }

    /// Analyze every project of a solution.
    ///
    /// Projects that fail to open are skipped and extraction failures yield
    /// zero classes. Cancellation observed at any project boundary empties
    /// the whole result. Front end initialization failures are fatal.
    pub fn analyze(
        &self,
        solution: &Path,
        cancellation: &CancellationToken,
    ) -> Result<Vec<ProjectDependency>> {
        let analyze_span = span!(Level::INFO, "analyze_solution", solution = %solution.display());
        let _enter = analyze_span.enter();

        info!("Starting solution analysis");

        let project_files = self.reader.list_project_files(solution)?;
        debug!(project_count = project_files.len(), "Listed project files");

        let mut dependencies = Vec::with_capacity(project_files.len());
        for path in &project_files {
            if cancellation.is_cancelled() {
                info!("Analysis cancelled");
                return Ok(Vec::new());
            }

            let Some(project) = self.reader.open_project(path) else {
                let error = DiagramError::project_load(path, "project could not be opened");
                warn!(error = %error, "Skipping project");
                continue;
            };

            let project_span = span!(Level::DEBUG, "analyze_project", project = %project.name);
            let _project_enter = project_span.enter();

            let references = self.reader.project_references(&project);
            let classes = match self.extractor.extract_classes(&project, cancellation) {
                Ok(classes) => classes,
                Err(error @ DiagramError::FrontendInit { .. }) => return Err(error.into()),
                Err(error) => {
                    warn!(error = %error, "Class extraction failed");
                    Vec::new()
                }
            };

            if cancellation.is_cancelled() {
                info!("Analysis cancelled");
                return Ok(Vec::new());
            }

            debug!(
                references = references.len(),
                classes = classes.len(),
                "Analyzed project"
            );

            dependencies.push(ProjectDependency {
                project_name: project.name,
                project_path: project.path.display().to_string(),
                target_framework: project.target_framework,
                package_references: project.package_references,
                project_references: references,
                classes,
            });
        }

        info!(projects = dependencies.len(), "Solution analysis completed");
        Ok(dependencies)
    }

    /// Render already analyzed projects
    pub fn render(&self, dependencies: &[ProjectDependency]) -> String {
        self.renderer.render(dependencies)
    }

    /// Analyze a solution and render its diagram
    pub fn process(&self, solution: &Path) -> Result<String> {
        let process_span = span!(Level::INFO, "process_solution");
        let _enter = process_span.enter();

        let dependencies = self.analyze(solution, &CancellationToken::new())?;
        Ok(self.render(&dependencies))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ClassDescriptor, ProjectHandle};
    use std::cell::RefCell;
    use std::path::PathBuf;

    /// In-memory reader: project names map to handles, `None` fails to open
    struct FakeReader {
        projects: Vec<(PathBuf, Option<ProjectHandle>)>,
    }

    impl ProjectReader for FakeReader {
        fn list_project_files(&self, _solution: &Path) -> Result<Vec<PathBuf>, DiagramError> {
            Ok(self.projects.iter().map(|(path, _)| path.clone()).collect())
        }

        fn open_project(&self, path: &Path) -> Option<ProjectHandle> {
            self.projects
                .iter()
                .find(|(p, _)| p == path)
                .and_then(|(_, handle)| handle.clone())
        }

        fn project_references(&self, project: &ProjectHandle) -> Vec<String> {
            project.project_references.clone()
        }
    }

    struct FakeExtractor {
        fail_for: Option<&'static str>,
        init_failure: bool,
        cancel_after: Option<CancellationToken>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeExtractor {
        fn new() -> Self {
            Self {
                fail_for: None,
                init_failure: false,
                cancel_after: None,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl ClassExtractor for FakeExtractor {
        fn extract_classes(
            &self,
            project: &ProjectHandle,
            _cancellation: &CancellationToken,
        ) -> Result<Vec<ClassDescriptor>, DiagramError> {
            self.calls.borrow_mut().push(project.name.clone());
            if self.init_failure {
                return Err(DiagramError::frontend_init("grammar missing"));
            }
            if let Some(token) = &self.cancel_after {
                token.cancel();
            }
            if self.fail_for == Some(project.name.as_str()) {
                return Err(DiagramError::extraction(&project.path, "boom"));
            }
            Ok(vec![ClassDescriptor::new(format!("{}Class", project.name), "App")])
        }
    }

    fn reader() -> FakeReader {
        FakeReader {
            projects: vec![
                (
                    PathBuf::from("Core.csproj"),
                    Some(ProjectHandle::new("Core", "Core.csproj").with_package_reference("LoggingLib")),
                ),
                (PathBuf::from("Broken.csproj"), None),
                (
                    PathBuf::from("Web.csproj"),
                    Some(ProjectHandle::new("Web", "Web.csproj").with_project_reference("Core")),
                ),
            ],
        }
    }

    #[test]
    fn test_unopenable_project_is_skipped() {
        let orchestrator = Orchestrator::with_components(reader(), FakeExtractor::new());
        let result = orchestrator
            .analyze(Path::new("App.sln"), &CancellationToken::new())
            .unwrap();
        let names: Vec<_> = result.iter().map(|p| p.project_name.as_str()).collect();
        assert_eq!(names, vec!["Core", "Web"]);
        assert_eq!(result[0].package_references, vec!["LoggingLib"]);
        assert_eq!(result[1].project_references, vec!["Core"]);
        assert_eq!(result[1].classes[0].name, "WebClass");
    }

    #[test]
    fn test_extraction_failure_yields_zero_classes() {
        let extractor = FakeExtractor {
            fail_for: Some("Core"),
            ..FakeExtractor::new()
        };
        let orchestrator = Orchestrator::with_components(reader(), extractor);
        let result = orchestrator
            .analyze(Path::new("App.sln"), &CancellationToken::new())
            .unwrap();
        assert_eq!(result.len(), 2);
        assert!(result[0].classes.is_empty());
        assert_eq!(result[1].classes.len(), 1);
    }

    #[test]
    fn test_frontend_init_failure_is_fatal() {
        let extractor = FakeExtractor {
            init_failure: true,
            ..FakeExtractor::new()
        };
        let orchestrator = Orchestrator::with_components(reader(), extractor);
        let error = orchestrator
            .analyze(Path::new("App.sln"), &CancellationToken::new())
            .unwrap_err();
        assert!(format!("{}", error).contains("Front end initialization failed"));
    }

    #[test]
    fn test_cancelled_before_start_is_empty() {
        let extractor = FakeExtractor::new();
        let orchestrator = Orchestrator::with_components(reader(), extractor);
        let token = CancellationToken::new();
        token.cancel();
        let result = orchestrator.analyze(Path::new("App.sln"), &token).unwrap();
        assert!(result.is_empty());
        assert!(orchestrator.extractor.calls.borrow().is_empty());
    }

    #[test]
    fn test_cancelled_midway_discards_partial_results() {
        let token = CancellationToken::new();
        let extractor = FakeExtractor {
            cancel_after: Some(token.clone()),
            ..FakeExtractor::new()
        };
        let orchestrator = Orchestrator::with_components(reader(), extractor);
        let result = orchestrator.analyze(Path::new("App.sln"), &token).unwrap();
        assert!(result.is_empty());
        assert_eq!(*orchestrator.extractor.calls.borrow(), vec!["Core".to_string()]);
    }

    #[test]
    fn test_process_renders_dependencies() {
        let orchestrator = Orchestrator::with_components(reader(), FakeExtractor::new());
        let diagram = orchestrator.process(Path::new("App.sln")).unwrap();
        assert!(diagram.contains("component [Core]"));
        assert!(diagram.contains("[Web] --> [Core]"));
        assert!(diagram.contains("class CoreClass {"));
        assert!(diagram.ends_with("@enduml"));
    }
}
