//! Solution and project file reader
//!
//! Reads `.sln` project entries and the handful of `.csproj` elements the
//! diagram needs. No build evaluation happens: properties and versions are
//! passed through as written.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::core::{DiagramError, ProjectHandle, ProjectReader};

static SOLUTION_PROJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"Project\("\{[^}]+\}"\)\s*=\s*"([^"]+)"\s*,\s*"([^"]+)"\s*,\s*"\{[^}]+\}""#)
        .expect("solution project pattern is valid")
});
static TARGET_FRAMEWORK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<TargetFrameworks?>\s*([^<]*?)\s*</TargetFrameworks?>")
        .expect("target framework pattern is valid")
});
static PACKAGE_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<PackageReference\b([^>]*)>").expect("package reference pattern is valid")
});
static PROJECT_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<ProjectReference\b([^>]*)>").expect("project reference pattern is valid")
});
static INCLUDE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bInclude\s*=\s*"([^"]*)""#).expect("include pattern is valid"));

/// Reads `.sln` and `.csproj` files from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct SolutionReader;

impl SolutionReader {
    pub fn new() -> Self {
        Self
    }
}

impl ProjectReader for SolutionReader {
    fn list_project_files(&self, solution: &Path) -> Result<Vec<PathBuf>, DiagramError> {
        if !solution.is_file() {
            return Err(DiagramError::project_load(solution, "file not found"));
        }

        match extension(solution).as_deref() {
            Some("csproj") => Ok(vec![absolute(solution)]),
            Some("sln") => {
                let content = std::fs::read_to_string(solution)
                    .map_err(|e| DiagramError::project_load(solution, e.to_string()))?;
                let base = solution.parent().unwrap_or_else(|| Path::new("."));
                Ok(solution_projects(&content, base))
            }
            _ => Err(DiagramError::project_load(
                solution,
                "expected a .sln or .csproj file",
            )),
        }
    }

    fn open_project(&self, path: &Path) -> Option<ProjectHandle> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read project");
                return None;
            }
        };
        if !content.contains("<Project") {
            warn!(path = %path.display(), "Not an MSBuild project file");
            return None;
        }

        let mut handle = parse_project(&content, &project_name(path), path);
        handle.source_files = source_files(path.parent().unwrap_or_else(|| Path::new(".")));
        debug!(
            project = %handle.name,
            source_files = handle.source_files.len(),
            "Opened project"
        );
        Some(handle)
    }

    fn project_references(&self, project: &ProjectHandle) -> Vec<String> {
        project.project_references.clone()
    }
}

/// Project paths listed in a solution, relative to `base`
fn solution_projects(content: &str, base: &Path) -> Vec<PathBuf> {
    let mut projects = Vec::new();
    for captures in SOLUTION_PROJECT.captures_iter(content) {
        let name = &captures[1];
        let relative = captures[2].replace('\\', "/");
        let path = base.join(&relative);

        if extension(&path).as_deref() != Some("csproj") {
            debug!(name, path = %relative, "Skipping non C# solution entry");
            continue;
        }
        if !path.is_file() {
            warn!(name, path = %path.display(), "Project file not found");
            continue;
        }
        projects.push(absolute(&path));
    }
    projects
}

fn parse_project(content: &str, name: &str, path: &Path) -> ProjectHandle {
    let mut handle = ProjectHandle::new(name, path);

    if let Some(captures) = TARGET_FRAMEWORK.captures(content) {
        handle.target_framework = captures[1].to_string();
    }

    for captures in PACKAGE_REFERENCE.captures_iter(content) {
        let Some(include) = INCLUDE.captures(&captures[1]) else {
            continue;
        };
        handle.package_references.push(include[1].to_string());
    }

    for captures in PROJECT_REFERENCE.captures_iter(content) {
        let Some(include) = INCLUDE.captures(&captures[1]) else {
            continue;
        };
        let reference = project_name(Path::new(&include[1].replace('\\', "/")));
        if !reference.is_empty() {
            handle.project_references.push(reference);
        }
    }

    handle
}

/// Every `.cs` file below `root`, skipping build output, sorted by path
fn source_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_build_output(entry))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| extension(path).as_deref() == Some("cs"))
        .collect();
    files.sort();
    files
}

fn is_build_output(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && matches!(entry.file_name().to_str(), Some("bin") | Some("obj"))
}

fn project_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn absolute(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
