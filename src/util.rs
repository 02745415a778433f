#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;

/// Leading course code such as `A2:` or `B10 `.
static COURSE_CODE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[A-Z]\d+:?\s+").expect("valid course code regex"));

/// Anything that cannot appear in a slug.
static NON_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").expect("valid slug regex"));

/// Runs of whitespace or hyphens.
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s-]+").expect("valid separator regex"));

/// A fenced code block: language tag and body.
static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```([\w+-]*)[ \t]*\r?\n(.*?)```").expect("valid fence regex"));

/// A `{{key}}` placeholder in a prompt template.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("valid placeholder regex"));

/// Converts `\r\n` line endings to `\n`. Borrows when there is nothing to
/// change.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Converts a course title into a URL- and directory-friendly slug.
///
/// A leading course code is dropped, so `"A2: DRY, Cohesion & Coupling"`
/// becomes `"dry-cohesion-coupling"`.
pub fn slugify(title: &str) -> String {
    let without_code = COURSE_CODE_PREFIX.replace(title, "");
    let lowered = without_code.to_lowercase();
    let cleaned = NON_SLUG.replace_all(&lowered, "");
    let joined = SEPARATORS.replace_all(cleaned.trim(), "-");
    joined.trim_matches('-').to_string()
}

/// Renders `items` as a Markdown bullet list, one per line, each prefixed by
/// `marker` (e.g. `"- "` or `"- [ ] "`).
pub fn bullet_list<S: AsRef<str>>(items: &[S], marker: &str) -> String {
    items
        .iter()
        .map(|item| format!("{marker}{}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replaces every `{{key}}` in `template` with its value from `vars`, in a
/// single pass. Unknown placeholders are left untouched, and substituted
/// values are never expanded again.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures<'_>| {
            let key = &caps[1];
            vars.iter()
                .find(|(name, _)| *name == key)
                .map_or_else(|| caps[0].to_string(), |(_, value)| (*value).to_string())
        })
        .into_owned()
}

/// Returns the body of the first fenced code block, preferring one tagged
/// with `language`. `None` when the text has no fences.
pub fn first_code_block(text: &str, language: &str) -> Option<String> {
    let blocks: Vec<(String, String)> = CODE_FENCE
        .captures_iter(text)
        .map(|caps| (caps[1].to_lowercase(), caps[2].to_string()))
        .collect();

    blocks
        .iter()
        .find(|(lang, _)| lang == language)
        .or_else(|| blocks.first())
        .map(|(_, body)| body.trim_end().to_string() + "\n")
}

/// Strips a single fence wrapping the whole response (models like to return
/// ```` ```markdown ... ``` ````). Anything else is returned trimmed.
pub fn unwrap_outer_fence(text: &str) -> String {
    let trimmed = text.trim();
    if let Some(rest) = trimmed.strip_prefix("```")
        && let Some(body) = rest.strip_suffix("```")
        && let Some((_, inner)) = body.split_once('\n')
        && !inner.contains("\n```")
    {
        return inner.trim().to_string() + "\n";
    }
    trimmed.to_string() + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_drop_code_and_punctuation() {
        assert_eq!(slugify("A2: DRY, Cohesion & Coupling"), "dry-cohesion-coupling");
        assert_eq!(slugify("Advanced Machine Learning"), "advanced-machine-learning");
        assert_eq!(
            slugify("Python & JavaScript: Best Practices!"),
            "python-javascript-best-practices"
        );
        assert_eq!(slugify("  --- "), "");
    }

    #[test]
    fn render_fills_known_placeholders_only() {
        let out = render("# {{title}} ({{level}}) {{missing}}", &[
            ("title", "Rust"),
            ("level", "Beginner"),
        ]);
        assert_eq!(out, "# Rust (Beginner) {{missing}}");
    }

    #[test]
    fn render_does_not_expand_substituted_values() {
        let out = render("{{title}} / {{level}}", &[
            ("title", "Templating with {{level}}"),
            ("level", "Advanced"),
        ]);
        assert_eq!(out, "Templating with {{level}} / Advanced");
    }

    #[test]
    fn crlf_line_endings_become_lf() {
        assert_eq!(normalize_newlines("a\r\nb\r\n"), "a\nb\n");
        assert!(matches!(normalize_newlines("a\nb"), Cow::Borrowed(_)));
    }

    #[test]
    fn code_block_prefers_requested_language() {
        let text = "Sure!\n```text\nnot this\n```\nand\n```python\nprint('hi')\n```\nDone.";
        assert_eq!(first_code_block(text, "python").as_deref(), Some("print('hi')\n"));
        assert_eq!(first_code_block("no fences here", "python"), None);
    }

    #[test]
    fn outer_fence_is_removed_but_inner_fences_survive() {
        assert_eq!(unwrap_outer_fence("```markdown\n# Title\nBody\n```"), "# Title\nBody\n");
        let nested = "# Title\n```python\nx = 1\n```";
        assert_eq!(unwrap_outer_fence(nested), format!("{nested}\n"));
    }
}
