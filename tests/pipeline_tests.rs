//! End-to-end tests for the generation pipeline and interactive session.

use std::{
    fs,
    io::Cursor,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Result;
use futures::{FutureExt, future::BoxFuture};
use photocopier::{
    Config, ContentModel, CourseGenerator, Photocopier, Sections,
    constants::{DEFAULT_TEMPLATE, LESSONS_DIR, SAMPLE_ENV_FILE},
};
use uuid::Uuid;
use walkdir::WalkDir;

const OUTLINE: &str = "# B4: Testing Strategies\n\nPlan unit, integration and property tests for \
                       real projects.\n\n## Learning Objectives\n- Write focused unit tests\n- \
                       Choose integration boundaries\n";

/// Always answers with a short Markdown document.
struct EchoModel;

impl ContentModel for EchoModel {
    fn name(&self) -> &str {
        "echo"
    }

    fn complete<'a>(&'a self, _system: &'a str, _prompt: &'a str) -> BoxFuture<'a, Result<String>> {
        async { Ok("# From the model\n".to_string()) }.boxed()
    }
}

fn temp_root() -> PathBuf {
    let root = std::env::temp_dir().join(format!("photocopier-pipeline-{}", Uuid::new_v4()));
    fs::create_dir_all(&root).expect("create temp root");
    root
}

/// Copies the fixture template into `<root>/Lessons/`.
fn install_template(root: &Path) {
    let from = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("lessons")
        .join(DEFAULT_TEMPLATE);
    let to = root.join(LESSONS_DIR).join(DEFAULT_TEMPLATE);

    for entry in WalkDir::new(&from) {
        let entry = entry.expect("walk fixture");
        let dest = to.join(entry.path().strip_prefix(&from).expect("relative path"));
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest).expect("create fixture dir");
        } else {
            fs::copy(entry.path(), &dest).expect("copy fixture file");
        }
    }
}

fn offline(root: &Path) -> Photocopier {
    Photocopier::new(root).with_generator(CourseGenerator::new(None))
}

#[tokio::test]
async fn generates_a_course_from_the_template() {
    let root = temp_root();
    install_template(&root);

    let report = offline(&root)
        .generate_course(OUTLINE, Sections::default(), &[])
        .await
        .expect("generate course");

    let course = root.join(LESSONS_DIR).join("B4-testing-strategies");
    assert_eq!(report.course_path, course);
    assert_eq!(report.info.title, "Testing Strategies");
    assert!(report.template_used);
    assert!(report.registered);
    assert_eq!(report.files.len(), 9);
    assert_eq!(report.model_files(), 0);
    assert_eq!(report.placeholder_files(), 9);
    assert!(report.files.iter().any(|file| file.path == "tests/practice_module.py"));

    let readme = fs::read_to_string(course.join("README.md")).expect("read readme");
    assert!(readme.starts_with("# B4-testing-strategies: Testing Strategies"));
    assert!(course.join("tests/practice_module.py").is_file());
    let guide = fs::read_to_string(course.join("reference/quick_reference.md")).expect("guide");
    assert!(guide.starts_with("# Quick Reference: Testing Strategies"));
    assert!(course.join("solutions/practice_solution.py").is_file());

    let index = fs::read_to_string(root.join(LESSONS_DIR).join("README.md")).expect("read index");
    assert!(index.contains("(B4-testing-strategies/README.md)"));

    let table = report.table();
    assert!(table.contains("File"));
    assert!(table.contains("lesson-content.md"));
    assert!(table.contains("placeholder"));

    let _ = fs::remove_dir_all(root);
}

#[tokio::test]
async fn skipped_sections_are_not_written() {
    let root = temp_root();
    let sections = Sections {
        reference: false,
        tests: false,
        ..Sections::default()
    };

    let report = offline(&root)
        .generate_course(OUTLINE, sections, &[])
        .await
        .expect("generate course");

    let paths: Vec<_> = report.files.iter().map(|file| file.path.as_str()).collect();
    assert_eq!(paths, vec![
        "README.md",
        "lesson-content.md",
        "solutions/practice_solution.py",
        "summary.md",
    ]);
    for skipped in [
        "reference/quick_reference.md",
        "reference/best_practices.md",
        "tests/test_practice.py",
        "tests/practice_module.py",
    ] {
        assert!(!report.course_path.join(skipped).exists(), "{skipped} was written");
    }

    let _ = fs::remove_dir_all(root);
}

#[tokio::test]
async fn missing_template_is_not_fatal() {
    let root = temp_root();

    let report = offline(&root)
        .with_template("No-Such-Template")
        .generate_course(OUTLINE, Sections::default(), &[])
        .await
        .expect("generate without template");

    assert!(!report.template_used);
    assert!(report.course_path.join("README.md").is_file());

    let _ = fs::remove_dir_all(root);
}

#[tokio::test]
async fn new_courses_take_the_next_number() {
    let root = temp_root();
    install_template(&root);
    let photocopier = offline(&root);

    let first = photocopier
        .generate_course("# Caching Basics\n", Sections::default(), &[])
        .await
        .expect("first course");
    let second = photocopier
        .generate_course("# Profiling Basics\n", Sections::default(), &[])
        .await
        .expect("second course");

    assert_eq!(first.info.course_id, "B1-caching-basics");
    assert_eq!(second.info.course_id, "B2-profiling-basics");

    let _ = fs::remove_dir_all(root);
}

#[tokio::test]
async fn regenerating_needs_overwrite() {
    let root = temp_root();
    let photocopier = offline(&root);
    photocopier
        .generate_course(OUTLINE, Sections::default(), &[])
        .await
        .expect("first run");

    let err = photocopier
        .generate_course(OUTLINE, Sections::default(), &[])
        .await
        .expect_err("second run should refuse to overwrite");
    assert!(format!("{err:#}").contains("already exists"));

    let report = offline(&root)
        .with_overwrite(true)
        .generate_course(OUTLINE, Sections::default(), &[])
        .await
        .expect("forced run");
    assert!(!report.registered);

    let _ = fs::remove_dir_all(root);
}

#[tokio::test]
async fn model_content_flows_through_the_pipeline() {
    let root = temp_root();
    let photocopier =
        Photocopier::new(&root).with_generator(CourseGenerator::new(Some(Arc::new(EchoModel))));

    let extra = vec!["reference/glossary.md".to_string()];
    let sections = Sections {
        summary:   false,
        reference: false,
        solutions: false,
        tests:     false,
    };
    let report = photocopier
        .generate_course(OUTLINE, sections, &extra)
        .await
        .expect("generate with model");

    assert_eq!(report.files.len(), 3);
    assert_eq!(report.model_files(), 3);
    assert_eq!(
        fs::read_to_string(report.course_path.join("reference/glossary.md")).expect("glossary"),
        "# From the model\n"
    );
    assert!(!report.course_path.join("summary.md").exists());

    let _ = fs::remove_dir_all(root);
}

#[tokio::test]
async fn interactive_session_with_placeholders() {
    let root = temp_root();
    let config = Config::from_lookup(|_| None);
    let input = format!("y\n{OUTLINE}END\nthis line is ignored\n");
    let mut output = Vec::new();

    let report = offline(&root)
        .run_interactive(Cursor::new(input), &mut output, &config)
        .await
        .expect("interactive run")
        .expect("course generated");

    let transcript = String::from_utf8(output).expect("utf-8 output");
    assert!(transcript.contains("Configuration Required"));
    assert!(transcript.contains("OpenAI API Key"));
    assert!(transcript.contains("Using placeholder content"));
    assert!(transcript.contains("Course 'Testing Strategies' generated successfully!"));
    assert!(root.join(SAMPLE_ENV_FILE).is_file());
    assert_eq!(report.info.objectives.len(), 2);
    assert!(!report.info.description.contains("ignored"));

    let _ = fs::remove_dir_all(root);
}

#[tokio::test]
async fn interactive_session_can_be_declined() {
    let root = temp_root();
    let config = Config::from_lookup(|_| None);
    let mut output = Vec::new();

    let report = offline(&root)
        .run_interactive(Cursor::new("n\n"), &mut output, &config)
        .await
        .expect("interactive run");

    assert!(report.is_none());
    let transcript = String::from_utf8(output).expect("utf-8 output");
    assert!(transcript.contains("Exiting. Please configure API key and try again."));
    assert!(!root.join(LESSONS_DIR).exists());

    let _ = fs::remove_dir_all(root);
}

#[tokio::test]
async fn interactive_session_rejects_empty_input() {
    let root = temp_root();
    let config = Config::from_lookup(|key| (key == "OPENAI_API_KEY").then(|| "sk-test".into()));
    let mut output = Vec::new();

    let report = offline(&root)
        .run_interactive(Cursor::new("\n   \nEND\n"), &mut output, &config)
        .await
        .expect("interactive run");

    assert!(report.is_none());
    let transcript = String::from_utf8(output).expect("utf-8 output");
    assert!(transcript.contains("OpenAI API configured"));
    assert!(transcript.contains("No content provided"));
    assert!(!root.join(SAMPLE_ENV_FILE).exists());

    let _ = fs::remove_dir_all(root);
}
