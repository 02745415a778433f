#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Static course files used when the model is unavailable or fails.
//!
//! Every builder works from [`CourseInfo`] alone, so a course can always be
//! scaffolded. The text is deliberately plain: it gives instructors a
//! skeleton to edit rather than finished material.

use super::CourseFile;
use crate::{analyzer::CourseInfo, util::bullet_list};

/// Placeholder for any course file.
pub fn for_file(file: &CourseFile, info: &CourseInfo) -> String {
    match file {
        CourseFile::Readme => readme(info),
        CourseFile::Lesson => lesson_content(info),
        CourseFile::Summary => summary(info),
        CourseFile::QuickReference => quick_reference(info),
        CourseFile::BestPractices => best_practices(info),
        CourseFile::ExerciseInstructions => exercise_instructions(info),
        CourseFile::PracticeSolution => practice_solution(info),
        CourseFile::PracticeTests => practice_tests(info),
        CourseFile::Extra(path) => extra(path, info),
    }
}

/// Course overview with metadata, objectives and the folder layout.
pub fn readme(info: &CourseInfo) -> String {
    format!(
        r#"# {id}: {title}

## Course Overview
**Duration**: {duration} | **Level**: {level}

{description}

## Learning Objectives
By the end of this lesson, you will be able to:
{objectives}

## Topics Covered
{topics}

## Prerequisites
{prerequisites}

## Folder Structure
```
{id}/
├── README.md                    # This overview
├── lesson-content.md           # Detailed lesson material
├── summary.md                  # Key takeaways and assessment
├── tests/                      # Practice exercises and tests
├── solutions/                  # Reference solutions
└── reference/                  # Learning resources
```

## Learning Path
1. **Read** `lesson-content.md` for comprehensive theory
2. **Practice** with exercises in `tests/` directory
3. **Review** solutions and references
4. **Assess** your learning with `summary.md`

**Ready to start?** Open `lesson-content.md` and begin your journey! 🚀
"#,
        id = info.course_id,
        title = info.title,
        duration = info.duration,
        level = info.level,
        description = info.description,
        objectives = bullet_list(&info.objectives, "- "),
        topics = bullet_list(&info.topics, "- "),
        prerequisites = bullet_list(&info.prerequisites, "- "),
    )
}

/// Lesson skeleton with one module per topic.
pub fn lesson_content(info: &CourseInfo) -> String {
    let modules: String = info
        .topics
        .iter()
        .enumerate()
        .map(|(i, topic)| {
            let n = i + 2;
            format!(
                "## Module {n}: {topic}\n\n### {n}.1 Key Ideas\nExplain {topic_lower} and when \
                 it applies.\n\n### {n}.2 Worked Example\nWalk through a short Python example \
                 that uses {topic_lower}.\n\n",
                topic_lower = topic.to_lowercase(),
            )
        })
        .collect();

    format!(
        r#"# Lesson Content: {title}

## Module 1: Introduction (45 minutes)

### 1.1 Overview
This lesson covers {title_lower} with a focus on practical application.

{description}

### 1.2 Learning Objectives
{objectives}

{modules}## Hands-on Exercise Overview
Practice these concepts with the exercises in the `tests/` folder.

Ready to start practicing? Head to the practice exercises!
"#,
        title = info.title,
        title_lower = info.title.to_lowercase(),
        description = info.description,
        objectives = bullet_list(&info.objectives, "- "),
    )
}

/// Wrap-up with achieved objectives and a self-assessment checklist.
pub fn summary(info: &CourseInfo) -> String {
    let split = info.objectives.len().min(3);
    let (core, practical) = info.objectives.split_at(split);

    format!(
        r#"# Lesson Summary: {title}

## 🎯 Learning Objectives Achieved

By completing this lesson, you should now be able to:

{achieved}

## 📚 Key Concepts Mastered

{topics}

## 🎓 Assessment Checklist

Mark your understanding level for each concept:

**Core Concepts**
{core}

**Practical Skills**
{practical}

## 🚀 Next Steps

1. **Apply to projects**: Use these skills in real applications
2. **Explore advanced topics**: Dive deeper into specialized areas
3. **Share knowledge**: Teach others what you've learned

**Congratulations!** You've completed the {title} lesson.
"#,
        title = info.title,
        achieved = info
            .objectives
            .iter()
            .map(|obj| format!("- ✅ **{obj}**"))
            .collect::<Vec<_>>()
            .join("\n"),
        topics = bullet_list(&info.topics, "- "),
        core = bullet_list(core, "- [ ] "),
        practical = bullet_list(practical, "- [ ] "),
    )
}

/// Cheat-sheet skeleton.
pub fn quick_reference(info: &CourseInfo) -> String {
    format!(
        r#"# Quick Reference: {title}

## Key Concepts
{topics}

## Common Patterns
Add one short snippet per pattern used in `lesson-content.md`.

## Best Practices
See `best_practices.md` for the full list.

## Troubleshooting
| Symptom | Cause | Fix |
|---------|-------|-----|
|         |       |     |
"#,
        title = info.title,
        topics = bullet_list(&info.topics, "- "),
    )
}

/// Best-practices skeleton.
pub fn best_practices(info: &CourseInfo) -> String {
    format!(
        r#"# Best Practices: {title}

## Core Principles
{objectives}

## Implementation Guidelines
Record the conventions students should follow when applying {title_lower}.

## Performance Considerations
Note any costs introduced by the techniques in this lesson.

## Security Considerations
Note any security implications, if applicable.
"#,
        title = info.title,
        title_lower = info.title.to_lowercase(),
        objectives = bullet_list(&info.objectives, "- "),
    )
}

/// Three-phase exercise guide.
pub fn exercise_instructions(info: &CourseInfo) -> String {
    format!(
        r#"# Exercise Instructions: {title}

## Overview
This exercise will guide you through applying the concepts learned in this lesson.

## Your Tasks

### Phase 1: Analysis (15 minutes)
1. **Study the provided modules** in `tests/practice_module.py`
2. **Identify areas for improvement**
3. **Plan your implementation strategy**

### Phase 2: Implementation (60 minutes)
4. **Apply the learned concepts**
5. **Enhance the practice modules**
6. **Test your implementation**

### Phase 3: Validation (15 minutes)
7. **Run comprehensive tests** with `pytest tests/`
8. **Review and refine**
9. **Document your learnings**

## Success Criteria
Your implementation is complete when:
- [ ] All tests pass
- [ ] Code follows best practices
{criteria}

## Tips for Success
1. Start small and iterate
2. Test frequently
3. Apply the patterns learned in the lesson
4. Refer to the lesson content as needed

## Next Steps
After completing this exercise, review the solutions and consider how to apply these concepts to your own projects.
"#,
        title = info.title,
        criteria = bullet_list(&info.objectives, "- [ ] Demonstrates: "),
    )
}

/// Reference solution matching the practice module's interface.
pub fn practice_solution(info: &CourseInfo) -> String {
    format!(
        r#""""
Reference solution for {id}: {title}.

Replace the bodies below with a complete implementation once the lesson
content is final.
"""


def example_function():
    """Return a short description of the lesson."""
    return "{title}"


class ExampleClass:
    """Reference implementation of the practice class."""

    def __init__(self):
        """Initialize the example class."""
        self.topic = "{title}"

    def example_method(self):
        """Return the topic this class demonstrates."""
        return self.topic


if __name__ == "__main__":
    print(example_function())
    print(ExampleClass().example_method())
"#,
        id = info.course_id,
        title = info.title,
    )
}

/// Pytest suite for the practice module.
pub fn practice_tests(info: &CourseInfo) -> String {
    format!(
        r#""""
Tests for {id} practice exercises: {title}.

These tests validate the practice module and guide students through the
learning process.
"""

import pytest
from .practice_module import example_function, ExampleClass


class TestPracticeModule:
    """Test the practice module implementation."""

    def test_example_function(self):
        """The example function returns a value."""
        assert example_function() is not None

    def test_example_class(self):
        """The example class can be used."""
        example = ExampleClass()
        assert example is not None
        assert example.example_method() is not None
"#,
        id = info.course_id,
        title = info.title,
    )
}

/// Starter code students enhance during the exercise.
pub fn practice_module(info: &CourseInfo) -> String {
    format!(
        r#""""
Practice module for {id}: {title}.

This module contains exercises and practice code for the lesson.
Students will enhance this code by applying the concepts learned.
"""


def example_function():
    """Example function for practice."""
    return "{id}"


class ExampleClass:
    """Example class for practice exercises."""

    def __init__(self):
        """Initialize the example class."""
        self.name = "{id}"

    def example_method(self):
        """Example method for practice."""
        return self.name


if __name__ == "__main__":
    print("Practice module for {id} course")
    example = ExampleClass()
    print(example.example_method())
"#,
        id = info.course_id,
        title = info.title,
    )
}

/// Generic placeholder for a file outside the standard layout.
pub fn extra(path: &str, info: &CourseInfo) -> String {
    if path.ends_with(".py") {
        format!(
            "\"\"\"\n{path} for {id}: {title}.\n\"\"\"\n",
            id = info.course_id,
            title = info.title,
        )
    } else {
        format!(
            "# {title}: {path}\n\nThis file is part of {id}. Add its content here.\n",
            id = info.course_id,
            title = info.title,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> CourseInfo {
        CourseInfo::builder()
            .course_id("B7-error-handling")
            .title("Error Handling")
            .objectives(vec![
                "Raise errors".to_string(),
                "Catch errors".to_string(),
                "Log errors".to_string(),
                "Retry safely".to_string(),
            ])
            .build()
    }

    #[test]
    fn summary_splits_checklist_after_three_objectives() {
        let text = summary(&info());
        let practical = text
            .split("**Practical Skills**")
            .nth(1)
            .expect("practical section");
        assert!(practical.contains("- [ ] Retry safely"));
        assert!(!practical.contains("Raise errors"));
    }

    #[test]
    fn summary_handles_fewer_than_three_objectives() {
        let info = CourseInfo::builder()
            .course_id("B1-x")
            .title("Tiny")
            .objectives(vec!["Only one".to_string()])
            .build();
        assert!(summary(&info).contains("- [ ] Only one"));
    }

    #[test]
    fn extra_files_follow_their_extension() {
        assert!(extra("tests/helpers.py", &info()).starts_with("\"\"\""));
        assert!(extra("reference/glossary.md", &info()).starts_with("# Error Handling"));
    }
}
