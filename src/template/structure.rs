#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Data describing a template course.

use std::{collections::BTreeMap, fmt::Write as _};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Source language of a template file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// `.md`
    Markdown,
    /// `.py`
    Python,
}

/// Role a file plays in a lesson, guessed from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilePurpose {
    /// `README.md`
    CourseOverview,
    /// `lesson-content.md`
    MainLesson,
    /// `summary.md`
    LessonSummary,
    /// Starter code students work on.
    PracticeModule,
    /// Test files.
    TestFile,
    /// Hardened versions of the practice modules.
    ReferenceImplementation,
    /// `exercise_instructions.md`
    ExerciseGuide,
    /// Cheat sheets, best practices, pitfalls.
    ReferenceMaterial,
    /// Anything else.
    Unknown,
}

impl FilePurpose {
    /// Name fragments and the purpose they imply, checked in order.
    const BY_NAME: [(&'static str, FilePurpose); 11] = [
        ("README.md", FilePurpose::CourseOverview),
        ("lesson-content.md", FilePurpose::MainLesson),
        ("summary.md", FilePurpose::LessonSummary),
        ("calculator.py", FilePurpose::PracticeModule),
        ("config_loader.py", FilePurpose::PracticeModule),
        ("test_", FilePurpose::TestFile),
        ("_hardened.py", FilePurpose::ReferenceImplementation),
        ("exercise_instructions.md", FilePurpose::ExerciseGuide),
        ("best_practices.md", FilePurpose::ReferenceMaterial),
        ("quick_reference.md", FilePurpose::ReferenceMaterial),
        ("common_pitfalls.md", FilePurpose::ReferenceMaterial),
    ];

    /// Infers the purpose of a file from its name.
    pub fn infer(file_name: &str) -> Self {
        Self::BY_NAME
            .iter()
            .find(|(fragment, _)| file_name.contains(fragment))
            .map(|(_, purpose)| *purpose)
            .unwrap_or(FilePurpose::Unknown)
    }

    /// Snake-case label, as serialized.
    pub fn label(self) -> &'static str {
        match self {
            FilePurpose::CourseOverview => "course_overview",
            FilePurpose::MainLesson => "main_lesson",
            FilePurpose::LessonSummary => "lesson_summary",
            FilePurpose::PracticeModule => "practice_module",
            FilePurpose::TestFile => "test_file",
            FilePurpose::ReferenceImplementation => "reference_implementation",
            FilePurpose::ExerciseGuide => "exercise_guide",
            FilePurpose::ReferenceMaterial => "reference_material",
            FilePurpose::Unknown => "unknown",
        }
    }
}

/// One tracked file of the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Markdown or Python.
    pub kind:    FileKind,
    /// Size in bytes.
    pub size:    u64,
    /// Guessed role.
    pub purpose: FilePurpose,
}

/// Directory and file layout of the template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStructure {
    /// Sub-directories, relative to the template root, `/`-separated.
    pub directories: Vec<String>,
    /// Markdown and Python files keyed by relative path.
    pub files:       BTreeMap<String, FileEntry>,
}

/// Shape of one Markdown document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStructure {
    /// Number of heading lines.
    pub header_count:        usize,
    /// Deepest heading level used.
    pub max_header_level:    usize,
    /// Number of fenced code blocks.
    pub code_block_count:    usize,
    /// Distinct fence languages, sorted.
    pub code_languages:      Vec<String>,
    /// Number of bullet items.
    pub bullet_list_items:   usize,
    /// Number of numbered items.
    pub numbered_list_items: usize,
    /// Length in characters.
    pub content_length:      usize,
    /// Non-blank blocks separated by blank lines.
    pub paragraph_count:     usize,
}

/// Sample bullet and numbered list lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListExamples {
    /// First bullet lines.
    pub bullet_examples:   Vec<String>,
    /// First numbered lines.
    pub numbered_examples: Vec<String>,
}

/// Formatting habits of the template README.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattingStyle {
    /// Emoji from the known palette, in order of first use.
    pub emoji_usage:      Vec<String>,
    /// First heading lines, verbatim.
    pub header_style:     Vec<String>,
    /// Sample list lines.
    pub list_formatting:  ListExamples,
    /// First code fence openers, e.g. `` ```python ``.
    pub code_block_style: Vec<String>,
    /// Bold, inline code and italic samples.
    pub emphasis_style:   Vec<String>,
}

/// A Markdown link to another `.md` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalLink {
    /// Link text.
    pub text:   String,
    /// Link target.
    pub target: String,
}

/// A heading and its level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Number of `#` marks.
    pub level: usize,
    /// Heading text.
    pub text:  String,
}

/// Linking and sectioning of the template README.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationStructure {
    /// Links to other Markdown files.
    pub internal_links:         Vec<InternalLink>,
    /// Every heading in order.
    pub section_hierarchy:      Vec<Heading>,
    /// Entries of ASCII folder trees.
    pub folder_structure_links: Vec<String>,
}

/// Everything learned from a template course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateStructure {
    /// Directory name of the template.
    pub course_id:            String,
    /// Directory and file layout.
    pub files:                FileStructure,
    /// Shape of README, lesson and summary, keyed `overview_pattern`,
    /// `lesson_pattern`, `summary_pattern`.
    pub content_patterns:     BTreeMap<String, ContentStructure>,
    /// README formatting; `None` without a README.
    pub formatting_style:     Option<FormattingStyle>,
    /// README navigation; `None` without a README.
    pub navigation_structure: Option<NavigationStructure>,
}

impl TemplateStructure {
    /// Renders a short Markdown digest used to steer generated content
    /// towards the template's look.
    pub fn style_guide(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Template course: {}", self.course_id);

        if !self.files.files.is_empty() {
            let _ = writeln!(out, "\nFiles:");
            for (path, entry) in &self.files.files {
                let _ = writeln!(out, "- {path} ({})", entry.purpose.label());
            }
        }

        for (name, pattern) in &self.content_patterns {
            let _ = writeln!(
                out,
                "\n{name}: {} headings (deepest level {}), {} code blocks{}, {} bullet items, \
                 {} numbered items, {} paragraphs",
                pattern.header_count,
                pattern.max_header_level,
                pattern.code_block_count,
                if pattern.code_languages.is_empty() {
                    String::new()
                } else {
                    format!(" in {}", pattern.code_languages.join(", "))
                },
                pattern.bullet_list_items,
                pattern.numbered_list_items,
                pattern.paragraph_count,
            );
        }

        if let Some(style) = &self.formatting_style {
            if !style.emoji_usage.is_empty() {
                let _ = writeln!(out, "\nEmoji used in headings: {}", style.emoji_usage.join(" "));
            }
            if !style.header_style.is_empty() {
                let _ = writeln!(out, "\nSample headings:");
                for header in &style.header_style {
                    let _ = writeln!(out, "    {header}");
                }
            }
            if !style.list_formatting.bullet_examples.is_empty() {
                let _ = writeln!(out, "\nSample list items:");
                for item in &style.list_formatting.bullet_examples {
                    let _ = writeln!(out, "    {item}");
                }
            }
        }

        if let Some(nav) = &self.navigation_structure
            && !nav.internal_links.is_empty()
        {
            let _ = writeln!(
                out,
                "\nREADME links to: {}",
                nav.internal_links.iter().map(|link| &link.target).join(", ")
            );
        }

        out
    }
}
