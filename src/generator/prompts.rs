#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Prompt templates bundled with the binary.

use serde::{Deserialize, Serialize};

use super::CourseFile;

/// Prompt templates for course generation. Per-file templates use
/// `{{placeholder}}` markers filled from the course details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoursePrompts {
    /// Shared system message.
    system_message:        String,
    /// `README.md`
    readme:                String,
    /// `lesson-content.md`
    lesson:                String,
    /// `summary.md`
    summary:               String,
    /// `reference/quick_reference.md`
    quick_reference:       String,
    /// `reference/best_practices.md`
    best_practices:        String,
    /// `reference/exercise_instructions.md`
    exercise_instructions: String,
    /// `solutions/practice_solution.py`
    practice_solution:     String,
    /// `tests/test_practice.py`
    practice_tests:        String,
    /// Any additional file.
    extra:                 String,
}

impl Default for CoursePrompts {
    fn default() -> Self {
        Self {
            system_message:        include_str!("prompts/system.md").to_string(),
            readme:                include_str!("prompts/readme.md").to_string(),
            lesson:                include_str!("prompts/lesson.md").to_string(),
            summary:               include_str!("prompts/summary.md").to_string(),
            quick_reference:       include_str!("prompts/quick_reference.md").to_string(),
            best_practices:        include_str!("prompts/best_practices.md").to_string(),
            exercise_instructions: include_str!("prompts/exercise_instructions.md").to_string(),
            practice_solution:     include_str!("prompts/practice_solution.md").to_string(),
            practice_tests:        include_str!("prompts/practice_tests.md").to_string(),
            extra:                 include_str!("prompts/extra.md").to_string(),
        }
    }
}

impl CoursePrompts {
    /// Returns the system message prompt.
    pub fn system_message(&self) -> &str {
        &self.system_message
    }

    /// Returns the template for `file`.
    pub fn for_file(&self, file: &CourseFile) -> &str {
        match file {
            CourseFile::Readme => &self.readme,
            CourseFile::Lesson => &self.lesson,
            CourseFile::Summary => &self.summary,
            CourseFile::QuickReference => &self.quick_reference,
            CourseFile::BestPractices => &self.best_practices,
            CourseFile::ExerciseInstructions => &self.exercise_instructions,
            CourseFile::PracticeSolution => &self.practice_solution,
            CourseFile::PracticeTests => &self.practice_tests,
            CourseFile::Extra(_) => &self.extra,
        }
    }
}
