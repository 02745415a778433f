#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Analyzes the file layout and Markdown style of an existing course so that
//! generated courses can follow it.

/// Regex-based measurements of Markdown documents.
pub mod patterns;
/// Data describing a template course.
pub mod structure;

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use itertools::Itertools;
pub use structure::{
    ContentStructure, FileEntry, FileKind, FilePurpose, FileStructure, FormattingStyle, Heading,
    InternalLink, ListExamples, NavigationStructure, TemplateStructure,
};
use walkdir::WalkDir;

use crate::{
    constants::{LESSON_FILE, README_FILE, SUMMARY_FILE},
    util::normalize_newlines,
};

/// Documents whose shape is recorded, and the key each is stored under.
const KEY_FILES: [(&str, &str); 3] = [
    (README_FILE, "overview_pattern"),
    (LESSON_FILE, "lesson_pattern"),
    (SUMMARY_FILE, "summary_pattern"),
];

/// Errors raised while reading a template course.
#[derive(thiserror::Error, Debug)]
pub enum TemplateError {
    /// The template directory does not exist.
    #[error("Template course not found at {}", .0.display())]
    NotFound(PathBuf),
    /// A template file could not be read.
    #[error("Could not read template file {}", path.display())]
    Read {
        /// File that failed.
        path:   PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The directory walk failed.
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

/// Extracts template structure from an existing course directory.
#[derive(Debug, Clone)]
pub struct TemplateExtractor {
    /// Root of the template course.
    template_path: PathBuf,
}

impl TemplateExtractor {
    /// Creates an extractor for the course at `template_path`.
    pub fn new(template_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
        }
    }

    /// Root of the template course.
    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    /// Extracts the complete structure of the template course.
    pub fn extract_structure(&self) -> Result<TemplateStructure, TemplateError> {
        if !self.template_path.exists() {
            return Err(TemplateError::NotFound(self.template_path.clone()));
        }

        let course_id = self
            .template_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let structure = TemplateStructure {
            course_id,
            files: self.file_structure()?,
            content_patterns: self.content_patterns()?,
            formatting_style: self.formatting_style()?,
            navigation_structure: self.navigation_structure()?,
        };

        tracing::debug!(
            template = %self.template_path.display(),
            files = structure.files.files.len(),
            "extracted template structure"
        );
        Ok(structure)
    }

    /// Records every sub-directory and every Markdown or Python file.
    pub fn file_structure(&self) -> Result<FileStructure, TemplateError> {
        let mut structure = FileStructure::default();

        for entry in WalkDir::new(&self.template_path)
            .min_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            let rel_path = relative_key(entry.path(), &self.template_path);

            if entry.file_type().is_dir() {
                structure.directories.push(rel_path);
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            let kind = if name.ends_with(".md") {
                FileKind::Markdown
            } else if name.ends_with(".py") {
                FileKind::Python
            } else {
                continue;
            };

            structure.files.insert(rel_path, FileEntry {
                kind,
                size: entry.metadata()?.len(),
                purpose: FilePurpose::infer(&name),
            });
        }

        Ok(structure)
    }

    /// Measures README, lesson content and summary, when present.
    pub fn content_patterns(&self) -> Result<BTreeMap<String, ContentStructure>, TemplateError> {
        let mut patterns = BTreeMap::new();
        for (file_name, key) in KEY_FILES {
            if let Some(content) = self.read_optional(file_name)? {
                patterns.insert(key.to_string(), patterns::analyze_content(&content));
            }
        }
        Ok(patterns)
    }

    /// Samples the README's formatting; `None` without a README.
    pub fn formatting_style(&self) -> Result<Option<FormattingStyle>, TemplateError> {
        Ok(self.read_optional(README_FILE)?.map(|content| FormattingStyle {
            emoji_usage:      patterns::emojis(&content),
            header_style:     patterns::header_lines(&content),
            list_formatting:  patterns::list_examples(&content),
            code_block_style: patterns::code_fences(&content),
            emphasis_style:   patterns::emphasis(&content),
        }))
    }

    /// Collects the README's links, headings and folder tree; `None` without a
    /// README.
    pub fn navigation_structure(&self) -> Result<Option<NavigationStructure>, TemplateError> {
        Ok(self
            .read_optional(README_FILE)?
            .map(|content| NavigationStructure {
                internal_links:         patterns::internal_links(&content),
                section_hierarchy:      patterns::headings(&content),
                folder_structure_links: patterns::folder_tree_entries(&content),
            }))
    }

    /// Reads `file_name` under the template root if it exists.
    fn read_optional(&self, file_name: &str) -> Result<Option<String>, TemplateError> {
        let path = self.template_path.join(file_name);
        if !path.is_file() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(|text| Some(normalize_newlines(&text).into_owned()))
            .map_err(|source| TemplateError::Read { path, source })
    }
}

/// `/`-separated path of `path` relative to `root`.
fn relative_key(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .join("/")
}
