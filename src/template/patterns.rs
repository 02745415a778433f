#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Regex-based measurements of Markdown documents.

use std::{collections::BTreeSet, sync::LazyLock};

use itertools::Itertools;
use regex::Regex;

use super::structure::{ContentStructure, Heading, InternalLink, ListExamples};
use crate::constants::EMOJI_PALETTE;

/// Compiles a pattern that is known to be valid.
fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("template patterns are valid")
}

/// `#` marks and heading text.
static HEADING: LazyLock<Regex> = LazyLock::new(|| re(r"(?m)^(#+)[ \t]*(.+?)[ \t]*$"));
/// Whole heading line.
static HEADING_LINE: LazyLock<Regex> = LazyLock::new(|| re(r"(?m)^(#+[ \t]*.+?)[ \t]*$"));
/// Fenced code block with optional language.
static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| re(r"(?s)```(\w+)?\r?\n(.*?)```"));
/// Bullet item text.
static BULLET_ITEM: LazyLock<Regex> = LazyLock::new(|| re(r"(?m)^[-*+][ \t]+(.+)$"));
/// Numbered item text.
static NUMBERED_ITEM: LazyLock<Regex> = LazyLock::new(|| re(r"(?m)^\d+\.[ \t]+(.+)$"));
/// Whole bullet line, including check and cross marks.
static BULLET_LINE: LazyLock<Regex> = LazyLock::new(|| re(r"(?m)^([-*+✅❌][ \t]+.+?)[ \t]*$"));
/// Whole numbered line.
static NUMBERED_LINE: LazyLock<Regex> = LazyLock::new(|| re(r"(?m)^(\d+\.[ \t]+.+?)[ \t]*$"));
/// `**bold**`
static BOLD: LazyLock<Regex> = LazyLock::new(|| re(r"\*\*([^*]+)\*\*"));
/// `` `code` ``
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| re(r"`([^`\n]+)`"));
/// `_italic_`
static ITALIC: LazyLock<Regex> = LazyLock::new(|| re(r"_([^_\n]+)_"));
/// `[text](target.md)`
static MD_LINK: LazyLock<Regex> = LazyLock::new(|| re(r"\[([^\]]+)\]\(([^)]+\.md[^)]*)\)"));
/// Entry of an ASCII folder tree, e.g. `├── README.md`.
static TREE_ENTRY: LazyLock<Regex> = LazyLock::new(|| re(r"(?m)^[├└│ \t]*[├└]─+[ \t]*(.+?)[ \t]*$"));
/// Any emoji from the known palette.
static EMOJI: LazyLock<Regex> =
    LazyLock::new(|| re(&EMOJI_PALETTE.iter().map(|e| regex::escape(e)).join("|")));

/// Measures headings, code blocks, lists and paragraphs of a document.
pub fn analyze_content(content: &str) -> ContentStructure {
    let headings = headings(content);
    let code_blocks: Vec<_> = CODE_BLOCK.captures_iter(content).collect();
    let code_languages: BTreeSet<String> = code_blocks
        .iter()
        .filter_map(|caps| caps.get(1))
        .map(|lang| lang.as_str().to_string())
        .collect();

    ContentStructure {
        header_count:        headings.len(),
        max_header_level:    headings.iter().map(|h| h.level).max().unwrap_or(0),
        code_block_count:    code_blocks.len(),
        code_languages:      code_languages.into_iter().collect(),
        bullet_list_items:   BULLET_ITEM.find_iter(content).count(),
        numbered_list_items: NUMBERED_ITEM.find_iter(content).count(),
        content_length:      content.chars().count(),
        paragraph_count:     content
            .split("\n\n")
            .filter(|p| !p.trim().is_empty())
            .count(),
    }
}

/// Every heading in document order.
pub fn headings(content: &str) -> Vec<Heading> {
    HEADING
        .captures_iter(content)
        .map(|caps| Heading {
            level: caps[1].len(),
            text:  caps[2].to_string(),
        })
        .collect()
}

/// Palette emoji used in `content`, in order of first appearance.
pub fn emojis(content: &str) -> Vec<String> {
    EMOJI
        .find_iter(content)
        .map(|m| m.as_str().to_string())
        .unique()
        .collect()
}

/// The first ten heading lines, verbatim.
pub fn header_lines(content: &str) -> Vec<String> {
    first_captures(&HEADING_LINE, content, 10)
}

/// The first five bullet and numbered lines.
pub fn list_examples(content: &str) -> ListExamples {
    ListExamples {
        bullet_examples:   first_captures(&BULLET_LINE, content, 5),
        numbered_examples: first_captures(&NUMBERED_LINE, content, 5),
    }
}

/// The first five code fence openers that name a language.
pub fn code_fences(content: &str) -> Vec<String> {
    CODE_BLOCK
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|lang| format!("```{}", lang.as_str())))
        .take(5)
        .collect()
}

/// Up to three bold, three inline code and three italic samples.
pub fn emphasis(content: &str) -> Vec<String> {
    [&*BOLD, &*INLINE_CODE, &*ITALIC]
        .into_iter()
        .flat_map(|pattern| first_captures(pattern, content, 3))
        .collect()
}

/// Links to other Markdown files.
pub fn internal_links(content: &str) -> Vec<InternalLink> {
    MD_LINK
        .captures_iter(content)
        .map(|caps| InternalLink {
            text:   caps[1].to_string(),
            target: caps[2].to_string(),
        })
        .collect()
}

/// The first ten entries of ASCII folder trees.
pub fn folder_tree_entries(content: &str) -> Vec<String> {
    first_captures(&TREE_ENTRY, content, 10)
}

/// First capture group of the first `limit` matches.
fn first_captures(pattern: &Regex, content: &str, limit: usize) -> Vec<String> {
    pattern
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_entries_strip_box_drawing() {
        let tree = "```\nA1/\n├── README.md      # overview\n│   └── tests/\n└── summary.md\n```";
        assert_eq!(folder_tree_entries(tree), vec![
            "README.md      # overview",
            "tests/",
            "summary.md"
        ]);
    }

    #[test]
    fn emphasis_samples_each_style() {
        let text = "**bold** then `code` and _italic_ plus **more**";
        assert_eq!(emphasis(text), vec!["bold", "more", "code", "italic"]);
    }

    #[test]
    fn multi_codepoint_emoji_are_kept_whole() {
        assert_eq!(emojis("## 🛡️ Safety ## 🎯 Goals 🛡️"), vec!["🛡️", "🎯"]);
    }
}
