#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Generates the files of a course, one model call per file, falling back to
//! placeholder content whenever the model is missing or fails.

/// The language-model seam.
pub mod model;
/// Static fallback content.
pub mod placeholder;
/// Bundled prompt templates.
pub mod prompts;

use std::{collections::BTreeMap, fmt::Write as _, sync::Arc};

use anyhow::{Result, bail};
use bon::Builder;
pub use model::{ContentModel, OpenAiModel};
pub use prompts::CoursePrompts;
use serde::{Deserialize, Serialize};

use crate::{
    analyzer::CourseInfo,
    config::Config,
    constants::{
        BEST_PRACTICES_FILE, EXERCISE_INSTRUCTIONS_FILE, LESSON_FILE, PRACTICE_SOLUTION_FILE,
        PRACTICE_TESTS_FILE, QUICK_REFERENCE_FILE, README_FILE, SUMMARY_FILE,
    },
    template::TemplateStructure,
    util::{bullet_list, first_code_block, render, unwrap_outer_fence},
};

/// A file the generator can produce.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseFile {
    /// `README.md`
    Readme,
    /// `lesson-content.md`
    Lesson,
    /// `summary.md`
    Summary,
    /// `reference/quick_reference.md`
    QuickReference,
    /// `reference/best_practices.md`
    BestPractices,
    /// `reference/exercise_instructions.md`
    ExerciseInstructions,
    /// `solutions/practice_solution.py`
    PracticeSolution,
    /// `tests/test_practice.py`
    PracticeTests,
    /// Any other file, by path relative to the course directory.
    Extra(String),
}

impl CourseFile {
    /// Path relative to the course directory.
    pub fn path(&self) -> &str {
        match self {
            CourseFile::Readme => README_FILE,
            CourseFile::Lesson => LESSON_FILE,
            CourseFile::Summary => SUMMARY_FILE,
            CourseFile::QuickReference => QUICK_REFERENCE_FILE,
            CourseFile::BestPractices => BEST_PRACTICES_FILE,
            CourseFile::ExerciseInstructions => EXERCISE_INSTRUCTIONS_FILE,
            CourseFile::PracticeSolution => PRACTICE_SOLUTION_FILE,
            CourseFile::PracticeTests => PRACTICE_TESTS_FILE,
            CourseFile::Extra(path) => path,
        }
    }

    /// Whether the file holds Python source.
    pub fn is_python(&self) -> bool {
        self.path().ends_with(".py")
    }

    /// Trims a raw model response down to the file's content.
    fn clean(&self, response: &str) -> String {
        if self.is_python() {
            first_code_block(response, "python")
                .unwrap_or_else(|| response.trim().to_string() + "\n")
        } else {
            unwrap_outer_fence(response)
        }
    }
}

/// Optional parts of a course. Everything is generated by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sections {
    /// `summary.md`
    pub summary:   bool,
    /// The three guides under `reference/`.
    pub reference: bool,
    /// `solutions/practice_solution.py`
    pub solutions: bool,
    /// `tests/test_practice.py`
    pub tests:     bool,
}

impl Default for Sections {
    fn default() -> Self {
        Self {
            summary:   true,
            reference: true,
            solutions: true,
            tests:     true,
        }
    }
}

impl Sections {
    /// Standard files selected by these sections, README and lesson first.
    pub fn files(&self) -> Vec<CourseFile> {
        let mut files = vec![CourseFile::Readme, CourseFile::Lesson];
        if self.summary {
            files.push(CourseFile::Summary);
        }
        if self.reference {
            files.extend([
                CourseFile::QuickReference,
                CourseFile::BestPractices,
                CourseFile::ExerciseInstructions,
            ]);
        }
        if self.solutions {
            files.push(CourseFile::PracticeSolution);
        }
        if self.tests {
            files.push(CourseFile::PracticeTests);
        }
        files
    }
}

/// What to generate for one course.
#[derive(Debug, Clone, Builder)]
pub struct GenerationRequest {
    /// Course details extracted from the user's description.
    pub info:        CourseInfo,
    /// Optional parts to include.
    #[builder(default)]
    pub sections:    Sections,
    /// Extra files, by path relative to the course directory.
    #[builder(default)]
    pub extra_files: Vec<String>,
    /// Structure of the template course, when one was found.
    pub template:    Option<TemplateStructure>,
}

impl GenerationRequest {
    /// Every file to produce: the selected standard files followed by the
    /// extra files. Blank and repeated paths are dropped.
    pub fn files(&self) -> Vec<CourseFile> {
        let mut files = self.sections.files();
        for extra in &self.extra_files {
            let extra = extra.trim();
            if !extra.is_empty() && !files.iter().any(|file| file.path() == extra) {
                files.push(CourseFile::Extra(extra.to_string()));
            }
        }
        files
    }
}

/// Where a file's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    /// Written by the language model.
    Model,
    /// Static fallback text.
    Placeholder,
}

impl std::fmt::Display for ContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentSource::Model => write!(f, "model"),
            ContentSource::Placeholder => write!(f, "placeholder"),
        }
    }
}

/// Content of one generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// File text.
    pub content: String,
    /// Where the text came from.
    pub source:  ContentSource,
}

/// Generated files keyed by path relative to the course directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseContent {
    /// Files by relative path.
    files: BTreeMap<String, GeneratedFile>,
}

impl CourseContent {
    /// Adds or replaces a file.
    pub fn insert(&mut self, path: impl Into<String>, content: String, source: ContentSource) {
        self.files
            .insert(path.into(), GeneratedFile { content, source });
    }

    /// The generated file at `path`.
    pub fn get(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.get(path)
    }

    /// Text of the file at `path`.
    pub fn content(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(|file| file.content.as_str())
    }

    /// Whether a file exists at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Files in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GeneratedFile)> {
        self.files.iter().map(|(path, file)| (path.as_str(), file))
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no files were generated.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of files whose content came from `source`.
    pub fn count_from(&self, source: ContentSource) -> usize {
        self.files
            .values()
            .filter(|file| file.source == source)
            .count()
    }
}

/// Produces course files from course details and a template structure.
pub struct CourseGenerator {
    /// Model used for generation; placeholders only when `None`.
    model:   Option<Arc<dyn ContentModel>>,
    /// Prompt templates.
    prompts: CoursePrompts,
}

impl std::fmt::Debug for CourseGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CourseGenerator")
            .field("model", &self.model.as_ref().map(|model| model.name()))
            .finish_non_exhaustive()
    }
}

impl CourseGenerator {
    /// Creates a generator around `model`, or a placeholder-only generator.
    pub fn new(model: Option<Arc<dyn ContentModel>>) -> Self {
        Self {
            model,
            prompts: CoursePrompts::default(),
        }
    }

    /// Creates a generator backed by OpenAI when an API key is configured.
    pub fn from_config(config: &Config) -> Self {
        match config.model_settings() {
            Some(settings) => {
                tracing::debug!(model = %settings.model, "using OpenAI for content generation");
                Self::new(Some(Arc::new(OpenAiModel::new(settings))))
            }
            None => {
                tracing::warn!("OpenAI API key not configured; courses will use placeholder content");
                Self::new(None)
            }
        }
    }

    /// Replaces the bundled prompt templates.
    pub fn with_prompts(mut self, prompts: CoursePrompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Whether a model is available.
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Prompt templates in use.
    pub fn prompts(&self) -> &CoursePrompts {
        &self.prompts
    }

    /// Builds the user prompt for `file`: its template, the course details
    /// and the template style digest.
    pub fn build_prompt(&self, file: &CourseFile, request: &GenerationRequest) -> String {
        let info = &request.info;
        let instructions = render(self.prompts.for_file(file), &[
            ("course_id", info.course_id.as_str()),
            ("title", info.title.as_str()),
            ("duration", info.duration.as_str()),
            ("level", info.level.as_str()),
            ("file", file.path()),
        ]);

        let mut prompt = instructions.trim_end().to_string();
        let _ = write!(
            prompt,
            "\n\n## Course details\n\n- Course ID: {}\n- Title: {}\n- Level: {}\n- Duration: {}\n",
            info.course_id, info.title, info.level, info.duration,
        );
        if !info.description.is_empty() {
            let _ = writeln!(prompt, "- Description: {}", info.description);
        }
        for (heading, items) in [
            ("Learning objectives", &info.objectives),
            ("Topics", &info.topics),
            ("Prerequisites", &info.prerequisites),
        ] {
            if !items.is_empty() {
                let _ = write!(prompt, "\n### {heading}\n\n{}\n", bullet_list(items, "- "));
            }
        }

        if let Some(template) = &request.template {
            let _ = write!(
                prompt,
                "\n## Template style\n\nFollow the structure and tone of this existing \
                 course.\n\n{}",
                template.style_guide()
            );
        }

        prompt
    }

    /// Generates every requested file. Files the model cannot produce get
    /// placeholder content; this never fails as a whole.
    pub async fn generate_course_content(&self, request: &GenerationRequest) -> CourseContent {
        let files = request.files();
        let mut content = CourseContent::default();

        let Some(model) = &self.model else {
            tracing::warn!(
                "No model available; using placeholder content for {}",
                request.info.course_id
            );
            for file in &files {
                content.insert(
                    file.path(),
                    placeholder::for_file(file, &request.info),
                    ContentSource::Placeholder,
                );
            }
            return content;
        };

        for file in &files {
            match self.generate_file(model.as_ref(), file, request).await {
                Ok(text) => {
                    tracing::info!("Generated {} with {}", file.path(), model.name());
                    content.insert(file.path(), text, ContentSource::Model);
                }
                Err(e) => {
                    tracing::warn!(
                        "Generating {} failed, using placeholder content: {e:#}",
                        file.path()
                    );
                    content.insert(
                        file.path(),
                        placeholder::for_file(file, &request.info),
                        ContentSource::Placeholder,
                    );
                }
            }
        }

        content
    }

    /// Asks the model for one file and cleans the response.
    async fn generate_file(
        &self,
        model: &dyn ContentModel,
        file: &CourseFile,
        request: &GenerationRequest,
    ) -> Result<String> {
        let prompt = self.build_prompt(file, request);
        let response = model
            .complete(self.prompts.system_message(), &prompt)
            .await?;

        let text = file.clean(&response);
        if text.trim().is_empty() {
            bail!("Model returned an empty response for {}", file.path());
        }
        Ok(text)
    }
}
