#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Directory under the project root holding every lesson.
pub const LESSONS_DIR: &str = "Lessons";

/// Name of the hand-authored lesson used as the structural pattern.
pub const DEFAULT_TEMPLATE: &str = "A1-Defensive-Programming-Template";

/// Series letter used when numbering new courses.
pub const DEFAULT_SERIES: char = 'B';

/// Index file inside the lessons directory listing every generated course.
pub const LESSONS_INDEX: &str = "README.md";

/// Sample environment file written when the API key is missing.
pub const SAMPLE_ENV_FILE: &str = ".env.example";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default completion budget per file.
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Environment variables searched, in order, for the API key.
pub const API_KEY_VARS: [&str; 3] = ["OPENAI_API_KEY", "OPENAI_KEY", "API_KEY"];

/// Sub-directories every course scaffold carries.
pub const COURSE_DIRS: [&str; 3] = ["tests", "solutions", "reference"];

/// Course overview file.
pub const README_FILE: &str = "README.md";
/// Main lesson material.
pub const LESSON_FILE: &str = "lesson-content.md";
/// Key takeaways and self-assessment.
pub const SUMMARY_FILE: &str = "summary.md";
/// Cheat sheet for the lesson topic.
pub const QUICK_REFERENCE_FILE: &str = "reference/quick_reference.md";
/// Topic-specific best practices.
pub const BEST_PRACTICES_FILE: &str = "reference/best_practices.md";
/// Walkthrough of the hands-on exercise.
pub const EXERCISE_INSTRUCTIONS_FILE: &str = "reference/exercise_instructions.md";
/// Reference solution for the practice exercise.
pub const PRACTICE_SOLUTION_FILE: &str = "solutions/practice_solution.py";
/// Tests students run against their practice module.
pub const PRACTICE_TESTS_FILE: &str = "tests/test_practice.py";
/// Starter code students enhance during the exercise.
pub const PRACTICE_MODULE_FILE: &str = "tests/practice_module.py";

/// Emoji palette recognised when sampling a template's formatting style.
pub const EMOJI_PALETTE: [&str; 23] = [
    "🌟", "🎯", "📚", "🛡️", "🚀", "⚡", "💻", "🔧", "🆘", "🎮", "🏗️", "📈", "🎓", "💡", "🔍", "📊",
    "📖", "✅", "❌", "🤖", "📋", "🧪", "📁",
];
