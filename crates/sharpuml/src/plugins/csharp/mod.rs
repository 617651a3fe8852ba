//! C# front end
//!
//! A tree-sitter based source front end and a `.sln`/`.csproj` reader.
//! Type resolution is syntactic and limited to the project being read.

mod extractor;
mod project;
mod syntax;

pub use extractor::CSharpExtractor;
pub use project::SolutionReader;
pub use syntax::{class_declarations, language, parse, TypeIndex};
