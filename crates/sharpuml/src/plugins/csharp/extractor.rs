//! C# class extractor
//!
//! Parses the source files of one project in parallel, indexes the types the
//! project declares, then builds class descriptors file by file. A file that
//! cannot be read or parsed contributes no classes.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, span, warn, Level};
use tree_sitter::{Language, Tree};

use super::syntax::{self, TypeIndex};
use crate::core::{
    CancellationToken, ClassDescriptor, ClassExtractor, ClassModelBuilder, ClassifierConfig,
    DiagramError, ProjectHandle,
};

/// tree-sitter backed [`ClassExtractor`]
#[derive(Debug, Clone, Default)]
pub struct CSharpExtractor {
    builder: ClassModelBuilder,
}

struct ParsedFile {
    path: PathBuf,
    source: String,
    tree: Tree,
}

impl CSharpExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ClassifierConfig) -> Self {
        Self {
            builder: ClassModelBuilder::with_config(config),
        }
    }

    /// Extract classes from in-memory sources, all treated as one project
    pub fn extract_sources(&self, sources: &[&str]) -> Result<Vec<ClassDescriptor>, DiagramError> {
        let language = syntax::language()?;
        let parsed: Vec<ParsedFile> = sources
            .iter()
            .enumerate()
            .filter_map(|(i, source)| {
                let path = PathBuf::from(format!("<source {}>", i));
                parse_source(language, path, source.to_string())
            })
            .collect();
        Ok(self.build(&parsed))
    }

    fn build(&self, files: &[ParsedFile]) -> Vec<ClassDescriptor> {
        let mut index = TypeIndex::new();
        for file in files {
            index.add_tree(&file.tree, &file.source);
        }
        debug!(declared_types = index.len(), "Indexed project types");

        files
            .par_iter()
            .map(|file| {
                let declarations = syntax::class_declarations(&file.tree, &file.source, &index);
                let classes = self.builder.build_all(&declarations);
                debug!(
                    file = %file.path.display(),
                    classes = classes.len(),
                    "Extracted classes"
                );
                classes
            })
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect()
    }
}

impl ClassExtractor for CSharpExtractor {
    fn extract_classes(
        &self,
        project: &ProjectHandle,
        cancellation: &CancellationToken,
    ) -> Result<Vec<ClassDescriptor>, DiagramError> {
        let extract_span = span!(
            Level::INFO,
            "extract_classes",
            project = %project.name,
            files = project.source_files.len()
        );
        let _enter = extract_span.enter();

        let language = syntax::language()?;

        let parsed: Vec<ParsedFile> = project
            .source_files
            .par_iter()
            .filter_map(|path| {
                if cancellation.is_cancelled() {
                    return None;
                }
                read_and_parse(language, path)
            })
            .collect();

        if cancellation.is_cancelled() {
            info!("Extraction cancelled");
            return Ok(Vec::new());
        }

        let classes = self.build(&parsed);
        info!(
            parsed_files = parsed.len(),
            classes = classes.len(),
            "Class extraction completed"
        );
        Ok(classes)
    }
}

fn read_and_parse(language: &Language, path: &Path) -> Option<ParsedFile> {
    match std::fs::read_to_string(path) {
        Ok(source) => parse_source(language, path.to_path_buf(), source),
        Err(e) => {
            let error = DiagramError::extraction(path, e.to_string());
            warn!(error = %error, "Skipping source file");
            None
        }
    }
}

fn parse_source(language: &Language, path: PathBuf, source: String) -> Option<ParsedFile> {
    match syntax::parse(language, &source) {
        Some(tree) => Some(ParsedFile { path, source, tree }),
        None => {
            let error = DiagramError::extraction(&path, "parser produced no syntax tree");
            warn!(error = %error, "Skipping source file");
            None
        }
    }
}
