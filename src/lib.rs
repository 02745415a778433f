//! # photocopier
//!
//! Generates new lessons for a course repository from a free-text
//! description, following the structure and style of an existing template
//! lesson. Content comes from an OpenAI-compatible chat model when one is
//! configured and from built-in placeholders otherwise.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Extracts course details from free text
pub mod analyzer;
/// Environment-driven configuration
pub mod config;
/// A module defining a bunch of constant values to be used throughout
pub mod constants;
/// Prompt assembly, model calls and placeholder fallback
pub mod generator;
/// The end-to-end pipeline and interactive session
pub mod photocopier;
/// Writes course directories
pub mod scaffold;
/// Reads the structure of a template course
pub mod template;
/// Utility functions for convenience
pub mod util;

pub use analyzer::{ContentAnalyzer, CourseInfo};
pub use config::Config;
pub use generator::{
    ContentModel, ContentSource, CourseContent, CourseFile, CourseGenerator, GeneratedFile,
    GenerationRequest, OpenAiModel, Sections,
};
pub use photocopier::{CourseReport, FileReport, Photocopier};
pub use scaffold::{CreatedCourse, FileManager, ScaffoldError};
pub use template::{TemplateError, TemplateExtractor, TemplateStructure};
