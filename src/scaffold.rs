#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Writes generated courses to disk.

use std::{
    fs,
    io,
    path::{Component, Path, PathBuf},
};

use crate::{
    analyzer::CourseInfo,
    constants::{
        BEST_PRACTICES_FILE, COURSE_DIRS, EXERCISE_INSTRUCTIONS_FILE, LESSONS_INDEX,
        PRACTICE_MODULE_FILE, PRACTICE_TESTS_FILE, QUICK_REFERENCE_FILE,
    },
    generator::{ContentSource, CourseContent, Sections, placeholder},
};

/// Builds the text of a fallback file.
type FallbackBuilder = fn(&CourseInfo) -> String;

/// Files the practice tests rely on, written when the content lacks them.
static TEST_FALLBACKS: [(&str, FallbackBuilder); 2] = [
    (PRACTICE_MODULE_FILE, placeholder::practice_module),
    (PRACTICE_TESTS_FILE, placeholder::practice_tests),
];

/// Reference guides, written when the content lacks them.
static REFERENCE_FALLBACKS: [(&str, FallbackBuilder); 3] = [
    (QUICK_REFERENCE_FILE, placeholder::quick_reference),
    (BEST_PRACTICES_FILE, placeholder::best_practices),
    (EXERCISE_INSTRUCTIONS_FILE, placeholder::exercise_instructions),
];

/// Errors raised while writing a course.
#[derive(thiserror::Error, Debug)]
pub enum ScaffoldError {
    /// A course id or file path would escape the lessons directory.
    #[error("Refusing unsafe path `{0}`: paths must be relative and must not contain `..`")]
    UnsafePath(String),
    /// The course directory exists and overwriting is disabled.
    #[error("Course directory {} already exists (pass --force to overwrite)", .0.display())]
    CourseExists(PathBuf),
    /// A filesystem operation failed.
    #[error("Could not write {}", path.display())]
    Io {
        /// Path being written.
        path:   PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// A course written to disk.
#[derive(Debug, Clone)]
pub struct CreatedCourse {
    /// Course directory.
    pub path:      PathBuf,
    /// Placeholder files written because the content did not provide them.
    pub fallbacks: CourseContent,
}

/// Creates course directories under a lessons directory.
#[derive(Debug, Clone)]
pub struct FileManager {
    /// Directory holding every course.
    lessons_dir: PathBuf,
    /// Whether an existing course directory may be written into.
    overwrite:   bool,
}

impl FileManager {
    /// Creates a manager for `lessons_dir` that refuses to overwrite courses.
    pub fn new(lessons_dir: impl Into<PathBuf>) -> Self {
        Self {
            lessons_dir: lessons_dir.into(),
            overwrite:   false,
        }
    }

    /// Allows writing into an existing course directory.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Directory holding every course.
    pub fn lessons_dir(&self) -> &Path {
        &self.lessons_dir
    }

    /// Directory for `course_id`, after checking the id is a single plain
    /// path component.
    pub fn course_path(&self, course_id: &str) -> Result<PathBuf, ScaffoldError> {
        let mut components = Path::new(course_id).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.lessons_dir.join(course_id)),
            _ => Err(ScaffoldError::UnsafePath(course_id.to_string())),
        }
    }

    /// Creates the course directory and its sub-directories and writes every
    /// file of `content`. For each enabled section, the practice files or
    /// reference guides that `content` does not provide are filled in from
    /// placeholders built with `info`.
    ///
    /// Nothing is written when any path is unsafe. Files written before an
    /// I/O error are left in place.
    pub fn create_course(
        &self,
        info: &CourseInfo,
        content: &CourseContent,
        sections: Sections,
    ) -> Result<CreatedCourse, ScaffoldError> {
        let course_path = self.course_path(&info.course_id)?;
        for (rel_path, _) in content.iter() {
            check_relative(rel_path)?;
        }

        if course_path.exists() && !self.overwrite {
            return Err(ScaffoldError::CourseExists(course_path));
        }

        create_dir(&course_path)?;
        for dir in COURSE_DIRS {
            create_dir(&course_path.join(dir))?;
        }

        for (rel_path, file) in content.iter() {
            write_file(&course_path.join(rel_path), &file.content)?;
        }

        let wanted = sections
            .tests
            .then_some(TEST_FALLBACKS.as_slice())
            .into_iter()
            .chain(sections.reference.then_some(REFERENCE_FALLBACKS.as_slice()))
            .flatten();

        let mut fallbacks = CourseContent::default();
        for &(rel_path, build) in wanted {
            if content.contains(rel_path) {
                continue;
            }
            let text = build(info);
            write_file(&course_path.join(rel_path), &text)?;
            fallbacks.insert(rel_path, text, ContentSource::Placeholder);
        }

        tracing::info!(
            "Created course at {} ({} fallback files)",
            course_path.display(),
            fallbacks.len()
        );
        Ok(CreatedCourse {
            path: course_path,
            fallbacks,
        })
    }

    /// Adds a link to the course in the lessons index, creating the index
    /// when missing. Returns `false` when the course is already listed.
    pub fn register_course(&self, course_id: &str, title: &str) -> Result<bool, ScaffoldError> {
        self.course_path(course_id)?;

        let index = self.lessons_dir.join(LESSONS_INDEX);
        let mut text = match fs::read_to_string(&index) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => "# Lessons\n\n".to_string(),
            Err(source) => return Err(ScaffoldError::Io { path: index, source }),
        };

        let target = format!("({course_id}/README.md)");
        if text.contains(&target) {
            tracing::debug!("{course_id} already listed in {}", index.display());
            return Ok(false);
        }

        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&format!("- [{course_id}: {title}]{target}\n"));

        create_dir(&self.lessons_dir)?;
        write_file(&index, &text)?;
        Ok(true)
    }
}

/// Rejects empty, absolute and parent-relative paths.
fn check_relative(rel_path: &str) -> Result<(), ScaffoldError> {
    let path = Path::new(rel_path);
    let safe = !rel_path.trim().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if safe {
        Ok(())
    } else {
        Err(ScaffoldError::UnsafePath(rel_path.to_string()))
    }
}

/// `create_dir_all` with the path attached to errors.
fn create_dir(path: &Path) -> Result<(), ScaffoldError> {
    fs::create_dir_all(path).map_err(|source| ScaffoldError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `content` to `path`, creating parent directories.
fn write_file(path: &Path, content: &str) -> Result<(), ScaffoldError> {
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }
    fs::write(path, content).map_err(|source| ScaffoldError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_must_stay_inside() {
        assert!(check_relative("reference/glossary.md").is_ok());
        assert!(check_relative("./notes.md").is_ok());
        assert!(check_relative("../escape.md").is_err());
        assert!(check_relative("tests/../../escape.py").is_err());
        assert!(check_relative("/etc/passwd").is_err());
        assert!(check_relative("").is_err());
    }

    #[test]
    fn course_ids_are_single_components() {
        let manager = FileManager::new("Lessons");
        assert!(manager.course_path("B3-design-patterns").is_ok());
        for bad in ["..", "a/b", "/abs", ""] {
            assert!(
                matches!(manager.course_path(bad), Err(ScaffoldError::UnsafePath(_))),
                "{bad} should be rejected"
            );
        }
    }
}
