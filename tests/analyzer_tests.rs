//! Tests for course detail extraction.

use std::{fs, path::PathBuf};

use photocopier::analyzer::{
    ContentAnalyzer, DEFAULT_DURATION, DEFAULT_LEVEL, DEFAULT_OBJECTIVES, DEFAULT_PREREQUISITES,
    DEFAULT_TITLE, DEFAULT_TOPICS, next_course_code,
};
use uuid::Uuid;

const OUTLINE: &str = r#"# B3: Design Patterns in Python [Core]

Learn the classic design patterns and when to apply them in modern Python code.
This course balances theory with refactoring exercises.

**Duration**: 4-6 hours | **Level**: Advanced

## Learning Objectives
- Recognise creational patterns
- Apply the strategy pattern
- Refactor towards composition

## Creational Patterns

## Behavioral Patterns

## Prerequisites
- Python classes
- Basic testing with pytest
"#;

fn temp_lessons(dirs: &[&str]) -> PathBuf {
    let root = std::env::temp_dir().join(format!("photocopier-analyzer-{}", Uuid::new_v4()));
    for dir in dirs {
        fs::create_dir_all(root.join(dir)).expect("create lesson dir");
    }
    fs::create_dir_all(&root).expect("create temp root");
    root
}

#[test]
fn full_outline_is_extracted() {
    let info = ContentAnalyzer::new().extract_course_info(OUTLINE);

    assert_eq!(info.title, "Design Patterns in Python");
    assert_eq!(info.course_id, "B3-design-patterns-in-python");
    assert_eq!(
        info.description,
        "Learn the classic design patterns and when to apply them in modern Python code. This \
         course balances theory with refactoring exercises."
    );
    assert_eq!(info.objectives, vec![
        "Recognise creational patterns",
        "Apply the strategy pattern",
        "Refactor towards composition"
    ]);
    assert_eq!(info.duration, "4-6 hours");
    assert_eq!(info.level, "Advanced");
    assert_eq!(info.topics, vec!["Creational Patterns", "Behavioral Patterns"]);
    assert_eq!(info.prerequisites, vec!["Python classes", "Basic testing with pytest"]);
}

#[test]
fn sparse_text_falls_back_to_defaults() {
    let info = ContentAnalyzer::new().extract_course_info("Some short text");

    assert_eq!(info.title, DEFAULT_TITLE);
    assert_eq!(info.course_id, "B1-generated-course");
    assert_eq!(info.description, "");
    assert_eq!(info.objectives, DEFAULT_OBJECTIVES.to_vec());
    assert_eq!(info.duration, DEFAULT_DURATION);
    assert_eq!(info.level, DEFAULT_LEVEL);
    assert_eq!(info.topics, DEFAULT_TOPICS.to_vec());
    assert_eq!(info.prerequisites, DEFAULT_PREREQUISITES.to_vec());
}

#[test]
fn titles_drop_codes_and_tags() {
    let analyzer = ContentAnalyzer::new();
    assert_eq!(analyzer.title("# A2: Advanced Topics [Core]"), "Advanced Topics");
    assert_eq!(analyzer.title("A2 DRY Programming [Core Module]"), "DRY Programming");
    assert_eq!(analyzer.title("Course: Data Pipelines"), "Data Pipelines");
    assert_eq!(analyzer.title("# Go"), DEFAULT_TITLE);
}

#[test]
fn course_codes_continue_the_series() {
    let lessons = temp_lessons(&["B1-intro", "B4-testing", "A9-other", "notes"]);

    assert_eq!(next_course_code(Some(lessons.as_path()), 'B'), "B5");
    assert_eq!(next_course_code(Some(lessons.as_path()), 'A'), "A10");
    assert_eq!(next_course_code(Some(lessons.as_path()), 'C'), "C1");
    assert_eq!(next_course_code(None, 'B'), "B1");
    assert_eq!(next_course_code(Some(lessons.join("missing").as_path()), 'B'), "B1");

    let analyzer = ContentAnalyzer::new().with_lessons_dir(&lessons);
    assert_eq!(analyzer.course_id("# Caching Strategies"), "B5-caching-strategies");
    assert_eq!(analyzer.course_id("# C7: Caching Strategies"), "C7-caching-strategies");
    assert_eq!(
        ContentAnalyzer::new()
            .with_lessons_dir(&lessons)
            .with_series('a')
            .course_code("no code here"),
        "A10"
    );

    let _ = fs::remove_dir_all(lessons);
}

#[test]
fn course_codes_ignore_files_and_saturate() {
    let lessons = temp_lessons(&["B2-caching", "B4294967295-huge"]);
    fs::write(lessons.join("B9-notes.md"), "# stray file").expect("write stray file");

    assert_eq!(next_course_code(Some(lessons.as_path()), 'B'), "B4294967295");
    fs::remove_dir_all(lessons.join("B4294967295-huge")).expect("remove huge lesson");
    assert_eq!(next_course_code(Some(lessons.as_path()), 'B'), "B3");

    let _ = fs::remove_dir_all(lessons);
}

#[test]
fn windows_line_endings_parse_like_unix_ones() {
    let crlf = OUTLINE.replace('\n', "\r\n");
    let analyzer = ContentAnalyzer::new();

    assert_eq!(analyzer.extract_course_info(&crlf), analyzer.extract_course_info(OUTLINE));
    assert_eq!(analyzer.prerequisites(&crlf), vec![
        "Python classes",
        "Basic testing with pytest"
    ]);
    assert_eq!(analyzer.objectives(&crlf).len(), 3);
}

#[test]
fn objectives_come_from_section_or_stray_bullets() {
    let analyzer = ContentAnalyzer::new();

    let plain_label = "Intro text\n\nObjectives:\n1. First goal\n2. Second goal\n";
    assert_eq!(analyzer.objectives(plain_label), vec!["First goal", "Second goal"]);

    let checked = "## Objectives\n✅ Ship it\n✅ Test it\n";
    assert_eq!(analyzer.objectives(checked), vec!["Ship it", "Test it"]);

    let loose = "- a\n- b\n- c\n- d\n- e\n- f\n- g\n";
    assert_eq!(analyzer.objectives(loose), vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn topics_fall_back_to_numbered_items() {
    let analyzer = ContentAnalyzer::new();
    let outline = "# Title Here\n\n1. Profiling\n2. Caching\n3. Profiling\n";
    assert_eq!(analyzer.topics(outline), vec!["Profiling", "Caching"]);

    let many = "## One\n## Two\n### Three\n## Four\n## Five\n## Six\n## Overview\n";
    assert_eq!(analyzer.topics(many), vec!["One", "Two", "Three", "Four", "Five"]);
}

#[test]
fn duration_and_level_accept_common_phrasings() {
    let analyzer = ContentAnalyzer::new();
    assert_eq!(analyzer.duration("Duration: 2-3 hours"), "2-3 hours");
    assert_eq!(analyzer.duration("Time: 5 - 8 hours"), "5 - 8 hours");
    assert_eq!(analyzer.duration("Duration: 6 hours"), "6 hours");
    assert_eq!(analyzer.duration("no time given"), DEFAULT_DURATION);

    assert_eq!(analyzer.level("Difficulty: beginner"), "Beginner");
    assert_eq!(analyzer.level("an INTERMEDIATE course"), "Intermediate");
    assert_eq!(analyzer.level("for experts"), DEFAULT_LEVEL);
}

#[test]
fn empty_prerequisites_section_uses_defaults() {
    let analyzer = ContentAnalyzer::new();
    let outline = "## Prerequisites\n\n## Next Section\n- not a prerequisite\n";
    assert_eq!(analyzer.prerequisites(outline), DEFAULT_PREREQUISITES.to_vec());
}

#[test]
fn course_info_round_trips_through_json() {
    let info = ContentAnalyzer::new().extract_course_info(OUTLINE);
    let json = serde_json::to_string(&info).expect("serialize info");
    let back: photocopier::CourseInfo = serde_json::from_str(&json).expect("deserialize info");
    assert_eq!(back, info);
}
