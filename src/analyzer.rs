#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Extracts course metadata from a free-text course outline.
//!
//! Every field is found by an independent sequence of regular expressions and
//! falls back to a fixed default, so extraction never fails.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use bon::Builder;
use itertools::Itertools;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    constants::DEFAULT_SERIES,
    util::{normalize_newlines, slugify},
};

/// Title used when nothing in the outline looks like one.
pub const DEFAULT_TITLE: &str = "Generated Course";
/// Duration used when the outline does not state one.
pub const DEFAULT_DURATION: &str = "3-4 hours";
/// Level used when the outline does not state one.
pub const DEFAULT_LEVEL: &str = "Intermediate";
/// Objectives used when the outline lists none.
pub const DEFAULT_OBJECTIVES: [&str; 2] = ["Master the core concepts", "Apply practical skills"];
/// Prerequisites used when the outline lists none.
pub const DEFAULT_PREREQUISITES: [&str; 2] = [
    "Python programming fundamentals",
    "Basic software development experience",
];
/// Topics used when the outline has no usable headings or numbered items.
pub const DEFAULT_TOPICS: [&str; 5] = [
    "Introduction",
    "Core Concepts",
    "Advanced Techniques",
    "Best Practices",
    "Summary",
];

/// Upper bound on topics kept from an outline.
const MAX_TOPICS: usize = 5;
/// Upper bound on objectives taken from stray bullets outside a section.
const MAX_LOOSE_OBJECTIVES: usize = 5;
/// Lines of prose kept for the description.
const DESCRIPTION_LINES: usize = 3;
/// A line must be longer than this to start the description.
const DESCRIPTION_MIN_CHARS: usize = 20;

/// Compiles a pattern that is known to be valid.
fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("analyzer patterns are valid")
}

/// Explicit course code in the outline, e.g. `B3:`.
static EXPLICIT_CODE: LazyLock<Regex> = LazyLock::new(|| re(r"([A-Z]\d+):"));

/// Directory names of existing lessons, e.g. `B2-performance`.
static LESSON_DIR_CODE: LazyLock<Regex> = LazyLock::new(|| re(r"^([A-Z])(\d+)"));

/// Title candidates, tried in order.
static TITLE_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        // # B1: Title
        re(r"(?m)^[ \t]*#[ \t]*([^#\s][^\n]*)$"),
        // B1 Title [Core]
        re(r"(?m)^[ \t]*[A-Z]\d+:?[ \t]+([^\n]+)$"),
        // ## Title
        re(r"(?m)^[ \t]*##[ \t]*([^#\s][^\n]*)$"),
        // Course: Title / Topic: Title
        re(r"(?im)^[ \t]*(?:course|topic):[ \t]*([^\n]+)$"),
    ]
});

/// Course code at the start of a captured title.
static TITLE_CODE_PREFIX: LazyLock<Regex> = LazyLock::new(|| re(r"^[A-Z]\d+:?\s+"));

/// Trailing bracketed tag, e.g. `[Core Module]`.
static TRAILING_TAG: LazyLock<Regex> = LazyLock::new(|| re(r"\s*\[[^\]]*\]\s*$"));

/// A line that introduces the objectives list, with or without heading marks.
static OBJECTIVES_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?im)^[ \t]*(?:#{1,6}[ \t]*)?(?:learning[ \t]+)?objectives?[ \t]*:?[ \t]*$")
});

/// Plain-text objectives or goals label that ends the description.
static OBJECTIVES_LABEL: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)^(?:learning\s+)?(?:objectives?|goals?)\s*:?$"));

/// A line that introduces the prerequisites list.
static PREREQUISITES_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?im)^[ \t]*(?:#{1,6}[ \t]*)?(?:prerequisites?|requirements?)[ \t]*:?[ \t]*$")
});

/// List styles recognised inside an objectives section, in priority order.
static OBJECTIVE_BULLETS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        re(r"(?m)^[ \t]*[-*+][ \t]+(.+?)[ \t]*$"),
        re(r"(?m)^[ \t]*\d+\.[ \t]+(.+?)[ \t]*$"),
        re(r"(?m)^[ \t]*✅[ \t]*(.+?)[ \t]*$"),
        re(r"(?m)^[ \t]*•[ \t]*(.+?)[ \t]*$"),
    ]
});

/// Plain `-`/`*`/`+` bullets.
static BULLET: LazyLock<Regex> = LazyLock::new(|| re(r"(?m)^[ \t]*[-*+][ \t]+(.+?)[ \t]*$"));

/// Numbered list items.
static NUMBERED: LazyLock<Regex> = LazyLock::new(|| re(r"(?m)^[ \t]*\d+\.[ \t]+(.+?)[ \t]*$"));

/// Duration candidates, tried in order.
static DURATION_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        re(r"(?i)duration:?\s*(\d+\s*[-–]\s*\d+\s*hours?)"),
        re(r"(?i)time:?\s*(\d+\s*[-–]\s*\d+\s*hours?)"),
        re(r"(?i)(\d+\s*[-–]\s*\d+\s*hours?)"),
        re(r"(?i)duration:?\s*(\d+\s*hours?)"),
    ]
});

/// Level candidates, tried in order.
static LEVEL_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        re(r"(?i)level:?\s*(beginner|intermediate|advanced)\b"),
        re(r"(?i)difficulty:?\s*(beginner|intermediate|advanced)\b"),
        re(r"(?i)\b(beginner|intermediate|advanced)\b"),
    ]
});

/// Second- and third-level headings.
static SUB_HEADING: LazyLock<Regex> = LazyLock::new(|| re(r"(?m)^[ \t]*#{2,3}[ \t]*([^#\s][^\n]*)$"));

/// Headings that structure an outline rather than name a topic.
static STRUCTURAL_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)^(?:learning\s+)?(?:objectives?|goals?|description|prerequisites?|requirements?|overview)\b")
});

/// Structured information about a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
pub struct CourseInfo {
    /// Directory name of the course, `<code>-<slug>`.
    pub course_id:     String,
    /// Human-readable title.
    pub title:         String,
    /// Up to three lines of introductory prose.
    #[builder(default)]
    pub description:   String,
    /// Learning objectives.
    #[builder(default = DEFAULT_OBJECTIVES.map(String::from).to_vec())]
    pub objectives:    Vec<String>,
    /// Estimated time to complete, e.g. `3-4 hours`.
    #[builder(default = DEFAULT_DURATION.to_string())]
    pub duration:      String,
    /// Difficulty level.
    #[builder(default = DEFAULT_LEVEL.to_string())]
    pub level:         String,
    /// Main topics covered.
    #[builder(default = DEFAULT_TOPICS.map(String::from).to_vec())]
    pub topics:        Vec<String>,
    /// What students should know beforehand.
    #[builder(default = DEFAULT_PREREQUISITES.map(String::from).to_vec())]
    pub prerequisites: Vec<String>,
}

/// Analyzes user input to extract course information.
#[derive(Debug, Clone)]
pub struct ContentAnalyzer {
    /// Lessons directory scanned to number new courses.
    lessons_dir: Option<PathBuf>,
    /// Series letter for new course codes.
    series:      char,
}

impl Default for ContentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentAnalyzer {
    /// Creates an analyzer that numbers new courses from `B1`.
    pub fn new() -> Self {
        Self {
            lessons_dir: None,
            series:      DEFAULT_SERIES,
        }
    }

    /// Numbers new courses after the ones already in `lessons_dir`.
    pub fn with_lessons_dir(mut self, lessons_dir: impl Into<PathBuf>) -> Self {
        self.lessons_dir = Some(lessons_dir.into());
        self
    }

    /// Uses a different series letter for new course codes.
    pub fn with_series(mut self, series: char) -> Self {
        self.series = series.to_ascii_uppercase();
        self
    }

    /// Extracts every field of a `CourseInfo` from `content`. Windows line
    /// endings are accepted.
    pub fn extract_course_info(&self, content: &str) -> CourseInfo {
        let content = normalize_newlines(content);
        let content = content.as_ref();
        let title = self.title(content);
        let info = CourseInfo {
            course_id: self.course_id_for(content, &title),
            description: self.description(content),
            objectives: self.objectives(content),
            duration: self.duration(content),
            level: self.level(content),
            topics: self.topics(content),
            prerequisites: self.prerequisites(content),
            title,
        };
        tracing::debug!(course_id = %info.course_id, title = %info.title, "extracted course info");
        info
    }

    /// Returns the explicit course code in `content`, or the next free one.
    pub fn course_code(&self, content: &str) -> String {
        EXPLICIT_CODE
            .captures(content)
            .map(|caps| caps[1].to_string())
            .unwrap_or_else(|| next_course_code(self.lessons_dir.as_deref(), self.series))
    }

    /// Returns `<code>-<slug>` for the course described by `content`.
    pub fn course_id(&self, content: &str) -> String {
        let title = self.title(content);
        self.course_id_for(content, &title)
    }

    /// Builds the course id from an already extracted title.
    fn course_id_for(&self, content: &str, title: &str) -> String {
        let code = self.course_code(content);
        let slug = slugify(title);
        if slug.is_empty() { code } else { format!("{code}-{slug}") }
    }

    /// Returns the course title without its code or trailing tag.
    pub fn title(&self, content: &str) -> String {
        let content = normalize_newlines(content);
        let content = content.as_ref();
        TITLE_PATTERNS
            .iter()
            .filter_map(|pattern| pattern.captures(content))
            .map(|caps| clean_title(&caps[1]))
            .find(|title| title.chars().count() > 3)
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    /// Returns the first paragraph of substantial prose, at most three lines
    /// joined by spaces. May be empty.
    pub fn description(&self, content: &str) -> String {
        let mut lines: Vec<&str> = Vec::new();
        let mut started = false;

        for line in content.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                if !lines.is_empty() {
                    break;
                }
                continue;
            }

            if OBJECTIVES_LABEL.is_match(line) {
                break;
            }

            if !started && line.chars().count() > DESCRIPTION_MIN_CHARS {
                started = true;
            }

            if started {
                lines.push(line);
            }
        }

        lines.into_iter().take(DESCRIPTION_LINES).join(" ")
    }

    /// Returns the learning objectives.
    pub fn objectives(&self, content: &str) -> Vec<String> {
        let content = normalize_newlines(content);
        let content = content.as_ref();
        let from_section = section_body(content, &OBJECTIVES_HEADING).and_then(|body| {
            OBJECTIVE_BULLETS
                .iter()
                .map(|pattern| captures(pattern, &body))
                .find(|items| !items.is_empty())
        });

        let objectives = from_section.unwrap_or_else(|| {
            captures(&BULLET, content)
                .into_iter()
                .take(MAX_LOOSE_OBJECTIVES)
                .collect()
        });

        or_defaults(objectives, &DEFAULT_OBJECTIVES)
    }

    /// Returns the estimated duration.
    pub fn duration(&self, content: &str) -> String {
        DURATION_PATTERNS
            .iter()
            .find_map(|pattern| pattern.captures(content))
            .map(|caps| caps[1].trim().to_string())
            .unwrap_or_else(|| DEFAULT_DURATION.to_string())
    }

    /// Returns the difficulty level, title-cased.
    pub fn level(&self, content: &str) -> String {
        LEVEL_PATTERNS
            .iter()
            .find_map(|pattern| pattern.captures(content))
            .map(|caps| title_case(&caps[1]))
            .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
    }

    /// Returns up to five main topics.
    pub fn topics(&self, content: &str) -> Vec<String> {
        let content = normalize_newlines(content);
        let content = content.as_ref();
        let from_headings: Vec<String> = captures(&SUB_HEADING, content)
            .into_iter()
            .map(|heading| heading.trim_end_matches(':').trim().to_string())
            .filter(|heading| !heading.is_empty() && !STRUCTURAL_HEADING.is_match(heading))
            .unique()
            .take(MAX_TOPICS)
            .collect();

        let topics = if from_headings.is_empty() {
            captures(&NUMBERED, content)
                .into_iter()
                .unique()
                .take(MAX_TOPICS)
                .collect()
        } else {
            from_headings
        };

        or_defaults(topics, &DEFAULT_TOPICS)
    }

    /// Returns the prerequisites listed in a prerequisites or requirements
    /// section.
    pub fn prerequisites(&self, content: &str) -> Vec<String> {
        let content = normalize_newlines(content);
        let content = content.as_ref();
        let listed = section_body(content, &PREREQUISITES_HEADING)
            .map(|body| captures(&BULLET, &body))
            .unwrap_or_default();
        or_defaults(listed, &DEFAULT_PREREQUISITES)
    }
}

/// Returns the next free course code in `series`, scanning `lessons_dir` for
/// directories named `<series><number>...`. `<series>1` when nothing is found.
pub fn next_course_code(lessons_dir: Option<&Path>, series: char) -> String {
    let highest = lessons_dir
        .and_then(|dir| fs::read_dir(dir).ok())
        .into_iter()
        .flatten()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_dir()))
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            let caps = LESSON_DIR_CODE.captures(&name)?;
            let letter = caps[1].chars().next()?;
            (letter == series).then(|| caps[2].parse::<u32>().ok()).flatten()
        })
        .max()
        .unwrap_or(0);

    format!("{series}{}", highest.saturating_add(1))
}

/// Strips a leading course code and a trailing bracketed tag.
fn clean_title(raw: &str) -> String {
    let without_code = TITLE_CODE_PREFIX.replace(raw.trim(), "");
    TRAILING_TAG.replace(&without_code, "").trim().to_string()
}

/// Returns the text between a heading matched by `heading` and the next
/// Markdown heading.
fn section_body(content: &str, heading: &Regex) -> Option<String> {
    let found = heading.find(content)?;
    let body = content[found.end()..]
        .lines()
        .take_while(|line| !line.trim_start().starts_with('#'))
        .join("\n");
    Some(body)
}

/// Returns the trimmed first capture group of every match.
fn captures(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Returns `items`, or `defaults` when `items` is empty.
fn or_defaults(items: Vec<String>, defaults: &[&str]) -> Vec<String> {
    if items.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        items
    }
}

/// `"ADVANCED"` -> `"Advanced"`.
fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_normalizes() {
        assert_eq!(title_case("aDVANCED"), "Advanced");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn section_body_stops_at_next_heading() {
        let body = section_body("## Objectives\n- a\n- b\n## Next\n- c", &OBJECTIVES_HEADING)
            .expect("section found");
        assert!(body.contains("- b"));
        assert!(!body.contains("- c"));
    }
}
