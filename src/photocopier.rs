#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! The course generation pipeline: analyze the description, read the
//! template, generate content, write and register the course.

use std::{
    io::{BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use bon::Builder;
use itertools::Itertools;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::{
    analyzer::{ContentAnalyzer, CourseInfo},
    config::{self, Config},
    constants::{DEFAULT_SERIES, LESSONS_DIR},
    generator::{ContentSource, CourseGenerator, GenerationRequest, Sections},
    scaffold::FileManager,
    template::TemplateExtractor,
};

/// One written file, as shown in the summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct FileReport {
    /// Path relative to the course directory.
    #[tabled(rename = "File")]
    pub path:   String,
    /// Where the content came from.
    #[tabled(rename = "Source")]
    pub source: ContentSource,
    /// Size in bytes.
    #[tabled(rename = "Bytes")]
    pub bytes:  usize,
}

/// Outcome of generating one course.
#[derive(Debug, Clone, Serialize, Builder)]
pub struct CourseReport {
    /// Details extracted from the description.
    pub info:          CourseInfo,
    /// Directory the course was written to.
    pub course_path:   PathBuf,
    /// Generated files in path order.
    #[builder(default)]
    pub files:         Vec<FileReport>,
    /// Whether a template structure steered generation.
    #[builder(default)]
    pub template_used: bool,
    /// Whether a new entry was added to the lessons index.
    #[builder(default)]
    pub registered:    bool,
}

impl CourseReport {
    /// Number of files written by the model.
    pub fn model_files(&self) -> usize {
        self.files
            .iter()
            .filter(|file| file.source == ContentSource::Model)
            .count()
    }

    /// Number of files that fell back to placeholder content.
    pub fn placeholder_files(&self) -> usize {
        self.files.len() - self.model_files()
    }

    /// Written files as a table.
    pub fn table(&self) -> String {
        Table::new(&self.files).with(Style::modern()).to_string()
    }
}

/// Ties the analyzer, template extractor, generator and file manager
/// together for one project directory.
#[derive(Debug)]
pub struct Photocopier {
    /// Project root.
    base_dir:    PathBuf,
    /// Extracts course details from free text.
    analyzer:    ContentAnalyzer,
    /// Reads the template course.
    extractor:   TemplateExtractor,
    /// Produces file content.
    generator:   CourseGenerator,
    /// Writes courses under `Lessons/`.
    files:       FileManager,
    /// Sections used by the interactive session.
    sections:    Sections,
    /// Extra files used by the interactive session.
    extra_files: Vec<String>,
}

impl Photocopier {
    /// Creates a pipeline rooted at `base_dir`, using the default template
    /// and the process-wide model configuration.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let config = config::get();
        Self::assemble(
            base_dir.into(),
            config.template(),
            CourseGenerator::from_config(&config),
        )
    }

    /// Creates a pipeline from `config`: its base directory, template and
    /// model settings.
    pub fn from_config(config: &Config) -> Self {
        Self::assemble(
            config.base_dir().to_path_buf(),
            config.template(),
            CourseGenerator::from_config(config),
        )
    }

    /// Wires the components for `base_dir`.
    fn assemble(base_dir: PathBuf, template: &str, generator: CourseGenerator) -> Self {
        let lessons_dir = base_dir.join(LESSONS_DIR);
        Self {
            analyzer: ContentAnalyzer::new()
                .with_lessons_dir(&lessons_dir)
                .with_series(DEFAULT_SERIES),
            extractor: TemplateExtractor::new(lessons_dir.join(template)),
            files: FileManager::new(&lessons_dir),
            generator,
            base_dir,
            sections: Sections::default(),
            extra_files: Vec::new(),
        }
    }

    /// Replaces the content generator.
    pub fn with_generator(mut self, generator: CourseGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Uses the template course named `template` inside `Lessons/`.
    pub fn with_template(mut self, template: &str) -> Self {
        self.extractor = TemplateExtractor::new(self.lessons_dir().join(template));
        self
    }

    /// Allows regenerating into an existing course directory.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.files = self.files.with_overwrite(overwrite);
        self
    }

    /// Sections generated by [`Photocopier::run_interactive`].
    pub fn with_sections(mut self, sections: Sections) -> Self {
        self.sections = sections;
        self
    }

    /// Extra files generated by [`Photocopier::run_interactive`].
    pub fn with_extra_files(mut self, extra_files: Vec<String>) -> Self {
        self.extra_files = extra_files;
        self
    }

    /// Project root.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory holding every course.
    pub fn lessons_dir(&self) -> &Path {
        self.files.lessons_dir()
    }

    /// Directory of the template course.
    pub fn template_path(&self) -> &Path {
        self.extractor.template_path()
    }

    /// Generates a course from its free-text description and writes it to
    /// disk. A missing or unreadable template only loses the style guide.
    pub async fn generate_course(
        &self,
        description: &str,
        sections: Sections,
        extra_files: &[String],
    ) -> Result<CourseReport> {
        let info = self.analyzer.extract_course_info(description);
        tracing::info!(
            "Detected course {} ({} objectives)",
            info.title,
            info.objectives.len()
        );

        let template = match self.extractor.extract_structure() {
            Ok(structure) => Some(structure),
            Err(e) => {
                tracing::warn!("{e}; generating without a template style guide");
                None
            }
        };
        let template_used = template.is_some();

        let request = GenerationRequest::builder()
            .info(info.clone())
            .sections(sections)
            .extra_files(extra_files.to_vec())
            .maybe_template(template)
            .build();
        let content = self.generator.generate_course_content(&request).await;

        let created = self
            .files
            .create_course(&info, &content, sections)
            .with_context(|| format!("Failed to write course {}", info.course_id))?;

        let registered = match self.files.register_course(&info.course_id, &info.title) {
            Ok(added) => added,
            Err(e) => {
                tracing::warn!("Course written but not added to the lessons index: {e}");
                false
            }
        };

        let files = content
            .iter()
            .chain(created.fallbacks.iter())
            .sorted_by(|a, b| a.0.cmp(b.0))
            .map(|(path, file)| FileReport {
                path:   path.to_string(),
                source: file.source,
                bytes:  file.content.len(),
            })
            .collect();

        Ok(CourseReport::builder()
            .info(info)
            .course_path(created.path)
            .files(files)
            .template_used(template_used)
            .registered(registered)
            .build())
    }

    /// Runs the interactive session: checks configuration, reads a course
    /// description from `input` until a line `END` or end of input, and
    /// generates the course. Returns `None` when the user backs out or
    /// provides nothing.
    pub async fn run_interactive<R, W>(
        &self,
        mut input: R,
        mut output: W,
        config: &Config,
    ) -> Result<Option<CourseReport>>
    where
        R: BufRead,
        W: Write,
    {
        writeln!(output, "🤖 Photocopier - AI Course Generator")?;
        writeln!(output, "{}", "=".repeat(50))?;

        if config.is_configured() {
            writeln!(output, "✅ OpenAI API configured\n")?;
        } else {
            writeln!(output, "⚠️  Configuration Required\n")?;
            for item in config.missing_config() {
                writeln!(output, "❌ {item}")?;
            }
            writeln!(output)?;
            writeln!(output, "📋 To set up:")?;
            writeln!(output, "1. Copy .env.example to .env")?;
            writeln!(output, "2. Add your OpenAI API key to the .env file")?;
            writeln!(output, "3. Get API key from: https://platform.openai.com/api-keys\n")?;

            let sample = config.write_sample_env(&self.base_dir)?;
            writeln!(output, "📄 Sample configuration created: {}\n", sample.display())?;

            write!(output, "Continue with placeholder content? (y/N): ")?;
            output.flush()?;
            let mut answer = String::new();
            input.read_line(&mut answer)?;
            if answer.trim().to_lowercase() != "y" {
                writeln!(output, "Exiting. Please configure API key and try again.")?;
                return Ok(None);
            }
            writeln!(output, "⚠️  Using placeholder content (limited functionality)\n")?;
        }

        writeln!(output, "Please paste your complete course README content below.")?;
        writeln!(output, "(Press Ctrl+D when finished, or type 'END' on a new line)")?;
        writeln!(output, "{}", "-".repeat(50))?;
        output.flush()?;

        let mut lines = Vec::new();
        for line in input.lines() {
            let line = line.context("Failed to read course description")?;
            if line.trim() == "END" {
                break;
            }
            lines.push(line);
        }

        if lines.iter().all(|line| line.trim().is_empty()) {
            writeln!(output, "❌ No content provided. Exiting.")?;
            return Ok(None);
        }

        writeln!(output, "\n🔍 Analyzing course content...")?;
        let report = self
            .generate_course(&lines.join("\n"), self.sections, &self.extra_files)
            .await?;

        writeln!(output, "📊 Detected Course: {}", report.info.title)?;
        writeln!(
            output,
            "🎯 Learning Objectives: {} identified",
            report.info.objectives.len()
        )?;
        writeln!(
            output,
            "✅ Course '{}' generated successfully!",
            report.info.title
        )?;
        writeln!(output, "📍 Location: {}", report.course_path.display())?;
        writeln!(
            output,
            "🤖 {} files from the model, {} placeholders",
            report.model_files(),
            report.placeholder_files()
        )?;

        Ok(Some(report))
    }
}
